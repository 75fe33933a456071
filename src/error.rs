//! Error types
//!
//! There are two families of errors:
//!
//! - [`ErrorKind`] / [`Error`]: application errors raised while starting up,
//!   e.g. a broken configuration file or a listener that cannot be bound.
//! - [`ApiErrorKind`]: errors raised while answering a single request. They
//!   are turned into plain-text HTTP responses and never outlive the request.

use std::{
    fmt::{self, Display},
    io,
    ops::Deref,
};

use abscissa_core::error::{BoxError, Context};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use displaydoc::Display as DisplayDoc;
use thiserror::Error;

/// Result type for startup and configuration code
pub type AppResult<T> = Result<T, Error>;

/// Result type for request handlers
pub type ApiResult<T> = Result<T, ApiErrorKind>;

/// Kinds of application errors
#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
pub enum ErrorKind {
    /// Error in configuration file
    #[error("config error")]
    Config,

    /// Input/output error
    #[error("I/O error")]
    Io,

    /// The web server could not be started or crashed
    #[error("server error")]
    Server,
}

impl ErrorKind {
    /// Create an error context from this error
    pub fn context(self, source: impl Into<BoxError>) -> Context<Self> {
        Context::new(self, Some(source.into()))
    }
}

/// Error type
#[derive(Debug)]
pub struct Error(Box<Context<ErrorKind>>);

impl Deref for Error {
    type Target = Context<ErrorKind>;

    fn deref(&self) -> &Context<ErrorKind> {
        &self.0
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Context::new(kind, None).into()
    }
}

impl From<Context<ErrorKind>> for Error {
    fn from(context: Context<ErrorKind>) -> Self {
        Self(Box::new(context))
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        ErrorKind::Io.context(err).into()
    }
}

/// Errors returned to the HTTP client
#[derive(Debug, DisplayDoc, Error, Clone, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Method Not Allowed
    MethodNotAllowed,
    /// Not Found
    RouteNotFound,
    /// Unknown type: {0}
    UnknownCategory(String),
    /// Bad request. Use /api/file/exams/<filename> or /api/file/answer-keys/<filename>
    MissingFilename,
    /// Invalid filename
    InvalidFilename,
    /// Invalid path
    PathEscape,
    /// File not found
    NotFound,
    /// Could not list files: {0}
    ListingFailed(String),
    /// Could not read file: {0}
    ReadingFileFailed(String),
}

impl ApiErrorKind {
    /// HTTP status code this error is answered with
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::RouteNotFound | Self::UnknownCategory(_) | Self::NotFound => {
                StatusCode::NOT_FOUND
            }
            Self::MissingFilename | Self::InvalidFilename | Self::PathEscape => {
                StatusCode::BAD_REQUEST
            }
            Self::ListingFailed(_) | Self::ReadingFileFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiErrorKind {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(%status, "{self}");
        } else {
            tracing::debug!(%status, "{self}");
        }
        (status, self.to_string()).into_response()
    }
}
