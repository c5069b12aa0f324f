//! Error handling for CRL decoding.
//!
//! All fallible operations of this crate return [`Error`], a pairing of an
//! [`ErrorKind`] discriminant with an optional lower-level cause. The kind
//! states which contract of the decoder was violated, the cause preserves
//! the structural reader's diagnostics for the curious.

use std::{error, fmt};


//------------ ErrorKind -----------------------------------------------------

/// The category of a CRL decoding failure.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// The record violates the `CertificateList` structure.
    ///
    /// This also covers declared lengths that do not match the data
    /// actually present.
    InvalidFormat,

    /// The version field is present but not a well-formed small integer.
    InvalidVersion,

    /// The version field decodes to a value other than v1 or v2.
    UnknownVersion,

    /// The CRL or entry extensions envelope is structurally broken.
    InvalidExtensions,

    /// The signature algorithm identifier is not one we know.
    UnknownSigAlg,

    /// The inner and outer signature algorithm identifiers differ.
    SigMismatch,

    /// The output buffer handed to the renderer is too small.
    BufferTooSmall,
}

impl ErrorKind {
    fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidFormat => "invalid CRL format",
            ErrorKind::InvalidVersion => "invalid CRL version field",
            ErrorKind::UnknownVersion => "unknown CRL version",
            ErrorKind::InvalidExtensions => "invalid CRL extensions",
            ErrorKind::UnknownSigAlg => "unknown signature algorithm",
            ErrorKind::SigMismatch => {
                "signature algorithm identifiers do not match"
            }
            ErrorKind::BufferTooSmall => "output buffer too small",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


//------------ Error ---------------------------------------------------------

/// An error happened while decoding or rendering a CRL.
#[derive(Debug)]
pub struct Error {
    /// The category of the failure.
    kind: ErrorKind,

    /// The lower-level failure that caused it, if any.
    cause: Option<Box<dyn error::Error + Send + Sync>>,
}

impl Error {
    /// Creates an error of the given kind without a cause.
    pub(crate) fn new(kind: ErrorKind) -> Self {
        Error { kind, cause: None }
    }

    /// Creates an error wrapping the failure that caused it.
    pub(crate) fn with_cause(
        kind: ErrorKind,
        cause: impl Into<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error { kind, cause: Some(cause.into()) }
    }

    /// Returns the category of the failure.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.cause {
            Some(ref cause) => write!(f, "{}: {}", self.kind, cause),
            None => self.kind.fmt(f),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.cause.as_ref().map(|err| {
            &**err as &(dyn error::Error + 'static)
        })
    }
}
