//! Error types for training and scoring.

use data_loader::DataLoadError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BaselineError {
    /// Training or query data could not be loaded
    #[error(transparent)]
    Data(#[from] DataLoadError),

    /// The training file held no ratings, so there is no global mean
    #[error("Training set is empty: the global mean is undefined")]
    EmptyTrainingSet,

    /// Damping must be a finite, non-negative number
    #[error("Invalid damping {0}: must be finite and non-negative")]
    InvalidDamping(f64),
}

pub type Result<T> = std::result::Result<T, BaselineError>;
