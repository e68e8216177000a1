//! Contains the `Error` and `Result` types that `mongo-compat` uses.

use std::fmt;

use thiserror::Error;

/// The result type for all methods that can return an error in the `mongo-compat` crate.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur in the `mongo-compat` crate. The inner
/// [`ErrorKind`] is wrapped in a `Box` to keep the type small on the happy path.
///
/// Errors raised by the driver collaborator are carried through this type
/// unchanged in kind and message; the compatibility layer never remaps them.
#[derive(Clone, Debug, Error)]
#[error("{kind}")]
#[non_exhaustive]
pub struct Error {
    /// The type of error that occurred.
    pub kind: Box<ErrorKind>,
}

impl Error {
    /// Creates an `InvalidArgument` error with the provided message.
    pub fn invalid_argument(message: impl Into<String>) -> Error {
        ErrorKind::InvalidArgument {
            message: message.into(),
        }
        .into()
    }

    /// Creates a `Conversion` error with the provided message.
    pub fn conversion(message: impl Into<String>) -> Error {
        ErrorKind::Conversion {
            message: message.into(),
        }
        .into()
    }

    /// Creates a server-side `Command` error with the provided code and message.
    pub fn command(code: i32, message: impl Into<String>) -> Error {
        ErrorKind::Command(CommandError {
            code,
            code_name: String::new(),
            message: message.into(),
        })
        .into()
    }

    /// The server-side error code, if this error originated from the server.
    pub fn code(&self) -> Option<i32> {
        match self.kind.as_ref() {
            ErrorKind::Command(err) => Some(err.code),
            ErrorKind::Write(WriteFailure::WriteError(err)) => Some(err.code),
            ErrorKind::Write(WriteFailure::WriteConcernError(err)) => Some(err.code),
            _ => None,
        }
    }

    /// Whether this error is a duplicate key error or not.
    pub fn is_duplicate_key(&self) -> bool {
        self.code() == Some(11000)
    }
}

impl<E> From<E> for Error
where
    ErrorKind: From<E>,
{
    fn from(err: E) -> Self {
        Self {
            kind: Box::new(err.into()),
        }
    }
}

/// The types of errors that can occur.
#[allow(missing_docs)]
#[derive(Clone, Debug, Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// An invalid argument was provided to a collection operation.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A legacy or modern document structure could not be converted.
    ///
    /// Conversion is expected to succeed for any structurally valid input;
    /// this kind only surfaces for malformed structures (for example, an
    /// aggregation pipeline stage that is not a mapping).
    #[error("conversion failure: {message}")]
    Conversion { message: String },

    /// The driver collaborator reported a command failure from the server.
    #[error("command failed: {0}")]
    Command(CommandError),

    /// The driver collaborator reported that a write failed.
    #[error("write failure: {0}")]
    Write(WriteFailure),
}

/// An error that occurred due to a database command failing.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct CommandError {
    /// Identifies the type of error.
    pub code: i32,

    /// The name associated with the error code.
    pub code_name: String,

    /// A description of the error that occurred.
    pub message: String,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}): {}", self.code_name, self.message)
    }
}

/// An error that occurred when trying to execute a write operation.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum WriteFailure {
    /// An error that occurred due to not being able to satisfy a write concern.
    WriteConcernError(WriteConcernError),

    /// An error that occurred during a write operation that wasn't due to being unable to satisfy
    /// a write concern.
    WriteError(WriteError),
}

impl fmt::Display for WriteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteFailure::WriteConcernError(err) => write!(f, "{}: {}", err.code, err.message),
            WriteFailure::WriteError(err) => write!(f, "{}: {}", err.code, err.message),
        }
    }
}

/// An error that occurred due to a database write failing.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct WriteError {
    /// Identifies the type of write error.
    pub code: i32,

    /// A description of the error that occurred.
    pub message: String,
}

/// An error that occurred due to the server being unable to satisfy a write concern.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct WriteConcernError {
    /// Identifies the type of write concern error.
    pub code: i32,

    /// A description of the error that occurred.
    pub message: String,
}
