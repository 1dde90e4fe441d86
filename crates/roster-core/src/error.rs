use std::fmt;

/// Returns an [`Error::InvalidSchema`] from the enclosing function.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::invalid_schema(format!($($arg)*)))
    };
}

/// An error raised while configuring or lowering a schema.
///
/// Storage-level failures (constraint violations, missing foreign key
/// targets) are not represented here; they surface directly from the
/// database engine at execution time.
#[derive(Debug)]
pub enum Error {
    /// The mapping configuration is inconsistent: an unknown relation
    /// target, a missing or mistyped foreign key field, an unpaired
    /// association, or a duplicate name.
    InvalidSchema(String),

    /// A schema snapshot could not be decoded.
    MalformedSnapshot(serde_json::Error),
}

impl Error {
    pub fn invalid_schema(message: impl Into<String>) -> Self {
        Self::InvalidSchema(message.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSchema(message) => write!(f, "invalid schema: {message}"),
            Self::MalformedSnapshot(err) => write!(f, "malformed snapshot: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidSchema(_) => None,
            Self::MalformedSnapshot(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedSnapshot(err)
    }
}
