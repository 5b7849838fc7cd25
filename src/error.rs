use crate::alphabet::SIGMA;

/// Custom Result type for index operations, wrapping the custom [`Error`] type
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the library, encompassing all possible error cases
/// that can occur while building, persisting or querying an index.
///
/// A k-mer that is not in the index is *not* an error: queries report misses
/// in-band as `None`.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Errors raised while restoring a persisted index
    #[error("Error loading index: {0}")]
    LoadError(#[from] LoadError),

    /// Errors raised by query operations
    #[error("Error searching index: {0}")]
    SearchError(#[from] SearchError),

    /// Errors raised while assembling an index from construction output
    #[error("Error building index: {0}")]
    BuildError(#[from] BuildError),

    /// Standard I/O errors
    #[error("Error with IO: {0}")]
    IoError(#[from] std::io::Error),

    /// A worker thread of a parallel batch query panicked
    #[error("Worker thread {0} panicked")]
    WorkerPanic(usize),
}
impl Error {
    /// Checks if the error indicates a malformed index
    ///
    /// A fatal error means the data structure violates its own invariants and
    /// retrying the operation can never succeed.
    ///
    /// # Returns
    ///
    /// * `true` if the error is a `SearchError::DegenerateInterval`
    /// * `false` for all other error types
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::SearchError(SearchError::DegenerateInterval { .. }))
    }

    /// Checks if the error was raised while reading or writing bytes
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self, Self::LoadError(_) | Self::IoError(_))
    }

    /// Maps an error from the `sucds` serializers into an I/O error
    pub(crate) fn from_succinct_write(err: anyhow::Error) -> Self {
        match err.downcast::<std::io::Error>() {
            Ok(io_err) => Self::IoError(io_err),
            Err(other) => Self::IoError(std::io::Error::other(other.to_string())),
        }
    }
}

/// Errors that can occur while deserializing an index
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    /// The stream ended before the named field was complete
    #[error("Stream truncated while reading {field}")]
    Truncated { field: &'static str },

    /// The declared byte length of the C-array does not describe four 8-byte integers
    ///
    /// # Arguments
    /// * `u64` - The declared number of bytes
    #[error("Invalid C-array byte length: {0}. Expected: 32")]
    InvalidCArrayLength(u64),

    /// The persisted parts disagree on the number of columns
    #[error("Inconsistent length for {field}: found {found}, expected {expected}")]
    InconsistentLength {
        field: &'static str,
        found: usize,
        expected: usize,
    },

    /// The persisted k-mer length is zero
    #[error("Invalid k-mer length: {0}")]
    InvalidK(u64),

    /// A persisted integer does not fit in `usize` on this platform
    #[error("Value of {field} does not fit in usize: {value}")]
    Oversized { field: &'static str, value: u64 },

    /// The persisted C-array disagrees with the counts of the rank structure
    #[error("Invalid C-array: stored {stored:?}, derived from rank structure {derived:?}")]
    InvalidCArray {
        stored: [u64; SIGMA],
        derived: [u64; SIGMA],
    },

    /// The persisted suffix-group marker does not mark column 0
    #[error("Suffix-group marker does not mark column 0")]
    UnmarkedFirstColumn,

    /// Any other failure reported by a succinct structure deserializer
    #[error("Invalid {field}: {message}")]
    Succinct {
        field: &'static str,
        message: String,
    },
}
impl LoadError {
    /// Maps an I/O error raised while reading `field` into a load error
    ///
    /// End-of-stream becomes [`LoadError::Truncated`], everything else is
    /// passed through as a plain I/O error.
    pub(crate) fn from_io(err: std::io::Error, field: &'static str) -> Error {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            Self::Truncated { field }.into()
        } else {
            Error::IoError(err)
        }
    }

    /// Maps an error from the `sucds` deserializers into a load error
    pub(crate) fn from_succinct(err: anyhow::Error, field: &'static str) -> Error {
        match err.downcast::<std::io::Error>() {
            Ok(io_err) => Self::from_io(io_err, field),
            Err(other) => Self::Succinct {
                field,
                message: other.to_string(),
            }
            .into(),
        }
    }
}

/// Errors that can occur while querying an index
#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    /// Streaming search was requested on an index built without suffix-group marks
    #[error("Streaming search support not built")]
    StreamingUnsupported,

    /// A complete k-mer resolved to more than one column
    ///
    /// This only happens on a malformed index (e.g. corrupted bit vectors).
    #[error("Interval [{left}, {right}] did not collapse to a single column")]
    DegenerateInterval { left: usize, right: usize },
}

/// Errors that can occur while assembling an index from construction output
#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    /// The k-mer length was not set or is zero
    #[error("Missing or zero k-mer length")]
    InvalidK,

    /// A per-symbol bit vector differs in length from the others
    #[error("Bit vector for symbol {symbol} has length {found}, expected {expected}")]
    MismatchedRows {
        symbol: char,
        found: usize,
        expected: usize,
    },

    /// The suffix-group marker is neither empty nor as long as the index
    #[error("Suffix-group marker has length {found}, expected 0 or {expected}")]
    MarkerLength { found: usize, expected: usize },

    /// The first column of a non-empty suffix-group marker is not marked
    #[error("Suffix-group marker does not mark column 0")]
    UnmarkedFirstColumn,

    /// The cumulative symbol counts do not add up to the number of columns
    #[error("C-array {c_array:?} does not account for {n_nodes} columns")]
    InconsistentCounts { c_array: [u64; SIGMA], n_nodes: usize },
}

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_is_fatal_with_degenerate_interval() {
        let error = Error::SearchError(SearchError::DegenerateInterval { left: 3, right: 5 });
        assert!(error.is_fatal());
        assert!(!error.is_io());
    }

    #[test]
    fn test_is_fatal_with_unsupported_streaming() {
        let error = Error::SearchError(SearchError::StreamingUnsupported);
        assert!(!error.is_fatal());
    }

    #[test]
    fn test_is_io_with_load_error() {
        let error = Error::LoadError(LoadError::Truncated { field: "k" });
        assert!(error.is_io());
        assert!(!error.is_fatal());
    }

    #[test]
    fn test_from_io_maps_eof_to_truncation() {
        let err = std::io::Error::from(std::io::ErrorKind::UnexpectedEof);
        let error = LoadError::from_io(err, "n_nodes");
        assert!(matches!(
            error,
            Error::LoadError(LoadError::Truncated { field: "n_nodes" })
        ));
    }

    #[test]
    fn test_from_io_passes_other_kinds() {
        let err = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        let error = LoadError::from_io(err, "n_nodes");
        assert!(matches!(error, Error::IoError(_)));
    }

    #[test]
    fn test_from_succinct_downcasts_io() {
        let err = anyhow::Error::new(std::io::Error::from(std::io::ErrorKind::UnexpectedEof));
        let error = LoadError::from_succinct(err, "subset rank");
        assert!(matches!(
            error,
            Error::LoadError(LoadError::Truncated {
                field: "subset rank"
            })
        ));
    }

    #[test]
    fn test_from_succinct_keeps_message() {
        let err = anyhow::anyhow!("bad words");
        let error = LoadError::from_succinct(err, "suffix groups");
        let error_str = format!("{error}");
        assert!(error_str.contains("suffix groups"));
        assert!(error_str.contains("bad words"));
    }

    #[test]
    fn test_load_error_invalid_c_array_length() {
        let error = LoadError::InvalidCArrayLength(24);
        let error_str = format!("{error}");
        assert!(error_str.contains("24"));
        assert!(error_str.contains("32"));
    }

    #[test]
    fn test_build_error_mismatched_rows() {
        let error = BuildError::MismatchedRows {
            symbol: 'G',
            found: 7,
            expected: 9,
        };
        let error_str = format!("{error}");
        assert!(error_str.contains('G'));
        assert!(error_str.contains('7'));
        assert!(error_str.contains('9'));
    }

    #[test]
    fn test_error_from_search_error() {
        let error: Error = SearchError::StreamingUnsupported.into();
        assert!(matches!(error, Error::SearchError(_)));
    }

    #[test]
    fn test_error_from_build_error() {
        let error: Error = BuildError::InvalidK.into();
        assert!(matches!(error, Error::BuildError(_)));
    }
}
