use std::result;

use thiserror::Error;

use crate::ElementId;

/// Errors raised by the driver-facing document APIs.
///
/// Binding itself never fails: unmatched groups and missing tables are
/// reported as [`crate::BindOutcome::Skipped`], not as errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Error {
    /// The id does not name an element of this document.
    #[error("unknown element {id}")]
    UnknownElement { id: ElementId },
    /// A snapshot could not be parsed.
    #[error("failed to parse {format} snapshot: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },
    /// A snapshot could not be rendered.
    #[error("failed to render {format} snapshot: {message}")]
    Render {
        format: &'static str,
        message: String,
    },
}

/// Convenient result type for document operations.
pub type Result<T> = result::Result<T, Error>;
