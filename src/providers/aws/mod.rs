mod backend;
mod list;
mod objects;
mod presigned;
mod types;

pub use backend::AwsBackend;
pub use list::list_path;
pub use objects::fetch_object;
pub use presigned::generate_presigned_url;
pub use types::AwsConfig;
