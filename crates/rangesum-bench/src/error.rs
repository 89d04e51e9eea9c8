use core::fmt;

/// A type containing error variants that may arise when running the benchmark
#[derive(Debug)]
pub enum Error {
    /// The configuration cannot be used to generate a workload
    InvalidConf {
        /// What is wrong with the configuration
        reason: String,
    },
    /// Two structures answered the same query differently
    Divergence {
        /// Position of the query in the trace
        step: usize,
        /// The answer of the segment tree
        expected: f64,
        /// The answer of the range optimized BIT
        actual: f64,
    },
    /// Writing the report failed
    Io(std::io::Error),
    /// Serializing the report failed
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConf { reason } => write!(f, "invalid configuration: {reason}"),
            Error::Divergence {
                step,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "structures diverged at operation {step}: expected {expected} got {actual}"
                )
            }
            Error::Io(err) => write!(f, "failed to write report: {err}"),
            Error::Json(err) => write!(f, "failed to serialize report: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl Error {
    /// Returns `true` if the error represents [Error::InvalidConf]
    pub fn is_invalid_conf(&self) -> bool {
        matches!(self, Error::InvalidConf { .. })
    }
    /// Returns `true` if the error represents [Error::Divergence]
    pub fn is_divergence(&self) -> bool {
        matches!(self, Error::Divergence { .. })
    }
}
