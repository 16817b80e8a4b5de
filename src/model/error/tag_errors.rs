#[derive(PartialEq, Debug)]
pub enum CreateTagError {
    /// an error with the database
    DbError,
    /// the name is blank, or the color isn't a hex color
    Validation(String),
    /// a tag with the same id or name already exists
    AlreadyExists,
    /// one of the requested parents does not exist
    ParentNotFound(String),
}

#[derive(PartialEq, Debug)]
pub enum GetTagError {
    /// an error with the database
    DbError,
    /// the tag was not found
    TagNotFound,
}

#[derive(PartialEq, Debug)]
pub enum UpdateTagError {
    /// an error with the database
    DbError,
    /// no tag with that id can be found
    TagNotFound,
    /// a tag with the selected name already exists, and is not the tag being updated
    NewNameAlreadyExists,
    /// the name is blank, or the color isn't a hex color
    Validation(String),
    /// one of the requested parents does not exist
    ParentNotFound(String),
    /// the requested parents would make the tag its own ancestor
    CycleDetected(String),
}

#[derive(PartialEq, Debug)]
pub enum DeleteTagError {
    /// an error with the database
    DbError,
    /// no tag with that id can be found
    TagNotFound,
}
