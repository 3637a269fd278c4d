//! Headless browser view state machine
//!
//! Owns one view instance's navigation, listing, selection, and bulk
//! download lifecycle. UI shells wire user events to these methods and
//! render the resulting state; nothing here depends on a rendering
//! environment.

mod view;

pub use view::{BrowseError, BrowserView, ListingRequest, ListingResponse};
