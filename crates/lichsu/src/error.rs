use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("cannot build slug from: {0:?}")]
    EmptySlug(String),
    #[error("fixture file not found: {0}")]
    MissingFixture(String),
    #[error("invalid fixture {file}: {reason}")]
    InvalidFixture { file: String, reason: String },
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
    #[error("password too short, at least {0} characters required")]
    PasswordTooShort(usize),
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
    #[error("unsupported media type {mime} for {path}")]
    UnsupportedMedia { path: String, mime: String },
    #[error("{table} row not found: {key}")]
    RowNotFound { table: &'static str, key: String },
}
