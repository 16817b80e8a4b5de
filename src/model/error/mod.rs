pub mod resource_errors;
pub mod tag_errors;
