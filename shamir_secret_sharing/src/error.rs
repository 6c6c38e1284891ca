use num_bigint::BigInt;
use polynomials::linear::linear_system::SolveError;
use polynomials::univariate::univariate::InterpolationError;

use crate::decoder::DecodeError;

// Every failure ends the current reconstruction, there are no partial results.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("share {x}: {source}")]
    ShareDecode { x: u32, #[source] source: DecodeError },

    #[error("singular system: {0}")]
    SingularSystem(Singularity),

    #[error("secret may be wrong: {0}")]
    Precision(#[from] PrecisionError),

    #[error("not enough points: need {required}, got {available}")]
    NotEnoughPoints { required: usize, available: usize },

    #[error("threshold requires {k} shares, got {available}")]
    Threshold { k: usize, available: usize },

    #[error(transparent)]
    ShareFile(#[from] ShareFileError),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Singularity {
    #[error("zero pivot in column {column}, the shares do not determine a unique polynomial")]
    Pivot { column: usize },
    #[error("share index {x} appears more than once")]
    DuplicateIndex { x: BigInt },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PrecisionError {
    #[error("share {x} is too large to convert to a double")]
    UnrepresentableShare { x: u32 },
    #[error("coefficient {index} is not finite ({value})")]
    NonFinite { index: usize, value: f64 },
    #[error("coefficient {index} = {value} is {residue} away from the nearest integer (tolerance {tolerance})")]
    Residue { index: usize, value: f64, residue: f64, tolerance: f64 },
    #[error("coefficient of x^{degree} is {numerator}/{denominator}, not an integer")]
    NonInteger { degree: usize, numerator: BigInt, denominator: BigInt },
}

#[derive(thiserror::Error, Debug)]
pub enum ShareFileError {
    #[error("malformed share file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("share key {0:?} is not a share index")]
    InvalidIndex(String),
}

impl From<SolveError> for Error {
    fn from(error: SolveError) -> Self {
        match error {
            SolveError::Singular { column, .. } => Error::SingularSystem(Singularity::Pivot { column }),
        }
    }
}

impl From<InterpolationError> for Error {
    fn from(error: InterpolationError) -> Self {
        match error {
            InterpolationError::Empty => Error::NotEnoughPoints { required: 1, available: 0 },
            InterpolationError::DuplicateAbscissa { x, .. } => {
                Error::SingularSystem(Singularity::DuplicateIndex { x })
            }
            InterpolationError::NonIntegerCoefficient { degree, numerator, denominator } => {
                Error::Precision(PrecisionError::NonInteger { degree, numerator, denominator })
            }
        }
    }
}
