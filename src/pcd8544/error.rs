//! Error kinds reported by the display controller

use core::fmt;

/// Failure of a controller, frame buffer or text operation.
///
/// Transport errors are logged with their [`display_interface::DisplayError`] detail and
/// surface as [`Error::TransportFailure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Operation needs an initialized controller
    NotInitialized,
    /// `initialize` was called before a transport was bound
    TransportNotBound,
    /// Pin description or display configuration is malformed
    InvalidConfig,
    /// Coordinate, size or scale outside the accepted range
    InvalidArgument,
    /// The frame buffer could not be reserved
    BufferAllocationFailed,
    /// The transport reported a failed byte write or reset
    TransportFailure,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotInitialized => write!(f, "display is not initialized"),
            Error::TransportNotBound => write!(f, "no transport bound"),
            Error::InvalidConfig => write!(f, "invalid configuration"),
            Error::InvalidArgument => write!(f, "argument out of range"),
            Error::BufferAllocationFailed => write!(f, "frame buffer allocation failed"),
            Error::TransportFailure => write!(f, "transport failure"),
        }
    }
}

impl core::error::Error for Error {}
