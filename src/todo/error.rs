//! Todo error types
//!
//! Every variant is a client-visible, terminal failure for a single request.
//! None of them leaves the collection modified.

use hyper::StatusCode;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoError {
    /// Id segment is not a base-10 integer >= 1
    InvalidId,
    /// Create body is not a JSON object with a string `title`
    InvalidBody,
    /// Create body parsed but `title` is empty
    MissingTitle,
    /// POST to a path other than the collection
    BadPath,
    /// No item with the requested id
    NotFound,
    /// Method outside GET/POST/DELETE on a todo path
    MethodNotAllowed,
}

impl TodoError {
    pub const fn status(self) -> StatusCode {
        match self {
            Self::InvalidId | Self::InvalidBody | Self::MissingTitle | Self::BadPath => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidId => "Invalid todo ID",
            Self::InvalidBody => "Invalid JSON",
            Self::MissingTitle => "Title is required",
            Self::BadPath => "Bad path",
            Self::NotFound => "Todo not found",
            Self::MethodNotAllowed => "Method not allowed",
        }
    }
}

impl fmt::Display for TodoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.status().as_u16())
    }
}

impl std::error::Error for TodoError {}
