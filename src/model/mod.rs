pub mod error;
pub mod request;
pub mod resource;
pub mod response;
pub mod tag;

// the shared contract, re-exported so consumers don't need to know the module layout
pub use resource::{Resource, ResourceStatus};
pub use tag::Tag;

/// the product name
pub const APP_NAME: &str = "IndexAll";
