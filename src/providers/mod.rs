//! Storage backend implementations

pub mod aws;
pub mod s3_client;
