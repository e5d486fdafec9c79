//! Error types for LIBAD4 operations.
//!
//! Every fallible operation follows the same protocol: the native entry
//! point returns an integer code, zero means success, and any nonzero value
//! is surfaced verbatim as [`Libad4Error::Driver`]. The only checks the
//! binding performs itself are the slice-length preconditions of the vector
//! operations and CString marshalling of the device name.

use thiserror::Error;

/// Result type alias for LIBAD4 operations.
pub type Result<T> = std::result::Result<T, Libad4Error>;

/// Errors that can occur when working with LIBAD4 devices.
#[derive(Error, Debug)]
pub enum Libad4Error {
    /// The vendor library could not be located or loaded.
    #[error("failed to load the LIBAD4 library: {0}")]
    Load(#[from] libloading::Error),

    /// `ad_open` returned its sentinel value; there is no numeric code for
    /// connection failures.
    #[error("could not connect to device '{name}'")]
    Connect { name: String },

    /// A native call returned a nonzero driver error code.
    ///
    /// The code is device/driver-specific and passed through unchanged
    /// (observed examples: 6 for a stale handle, 87).
    #[error("{function}({context}) returned driver error code {code}")]
    Driver {
        function: &'static str,
        context: String,
        code: i32,
    },

    /// Parallel slice arguments to a vector operation have mismatched
    /// lengths. Raised before the native layer is invoked.
    #[error("{function} called with mismatched slice lengths ({lengths})")]
    SliceLength {
        function: &'static str,
        lengths: String,
    },

    /// The device name contains an interior NUL byte and cannot be passed
    /// to the native layer.
    #[error("invalid device name: {0}")]
    InvalidName(#[from] std::ffi::NulError),
}

impl Libad4Error {
    /// The native error code carried by this error, if any.
    pub fn driver_code(&self) -> Option<i32> {
        match self {
            Self::Driver { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Translate a native return code into a `Result`.
///
/// The context closure is only evaluated on the error path.
pub(crate) fn check<F>(function: &'static str, code: i32, context: F) -> Result<()>
where
    F: FnOnce() -> String,
{
    if code == libad4_sys::AD_RETURN_CODE_OK {
        Ok(())
    } else {
        Err(Libad4Error::Driver {
            function,
            context: context(),
            code,
        })
    }
}

/// Enforce the equal-length precondition of the vector operations.
pub(crate) fn ensure_equal_lengths(
    function: &'static str,
    lengths: &[(&str, usize)],
) -> Result<()> {
    let first = lengths[0].1;
    if lengths.iter().any(|&(_, len)| len != first) {
        let detail = lengths
            .iter()
            .map(|&(name, len)| format!("{name}: {len}"))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(Libad4Error::SliceLength {
            function,
            lengths: detail,
        });
    }
    Ok(())
}
