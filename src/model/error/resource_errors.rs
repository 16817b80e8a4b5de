#[derive(PartialEq, Debug)]
pub enum CreateResourceError {
    /// an error with the database
    DbError,
    /// a required field is blank
    Validation(String),
    /// a resource with the same id, or the same source and external id, already exists
    AlreadyExists,
    /// one of the requested tags does not exist
    TagNotFound(String),
}

#[derive(PartialEq, Debug)]
pub enum GetResourceError {
    /// an error with the database
    DbError,
    /// the resource was not found
    ResourceNotFound,
}

#[derive(PartialEq, Debug)]
pub enum SearchResourcesError {
    /// an error with the database
    DbError,
    /// the tag being filtered on does not exist
    TagNotFound,
}

#[derive(PartialEq, Debug)]
pub enum UpdateResourceError {
    /// an error with the database
    DbError,
    /// no resource with that id can be found
    ResourceNotFound,
    /// a required field is blank
    Validation(String),
    /// another resource already has the new source and external id
    AlreadyExists,
    /// one of the requested tags does not exist
    TagNotFound(String),
}

#[derive(PartialEq, Debug)]
pub enum StatusChangeError {
    /// an error with the database
    DbError,
    /// no resource with that id can be found
    ResourceNotFound,
    /// the resource can't move from its current status to the requested one
    InvalidTransition {
        from: crate::model::ResourceStatus,
        to: crate::model::ResourceStatus,
    },
}

#[derive(PartialEq, Debug)]
pub enum IndexResourceError {
    /// an error with the database
    DbError,
    /// a required field is blank
    Validation(String),
    /// one of the requested tags does not exist
    TagNotFound(String),
}
