use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum NNError {
    // Construction errors
    InvalidArchitecture(String),

    // Data / propagation errors
    ShapeMismatch(String),
    EmptyDataset,

    // Training configuration errors
    InvalidConfig(String),

    // Reporting errors
    IoError(std::io::Error),
    CsvError(csv::Error),
    PlotError(String),

    ShapeError(ndarray::ShapeError),
}

impl fmt::Display for NNError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NNError::InvalidArchitecture(msg) => write!(f, "Invalid architecture: {}", msg),
            NNError::ShapeMismatch(msg) => write!(f, "Shape mismatch: {}", msg),
            NNError::EmptyDataset => write!(f, "Dataset has no samples"),
            NNError::InvalidConfig(msg) => write!(f, "Invalid training configuration: {}", msg),
            NNError::IoError(err) => write!(f, "I/O error: {}", err),
            NNError::CsvError(err) => write!(f, "CSV error: {}", err),
            NNError::PlotError(msg) => write!(f, "Plot error: {}", msg),
            NNError::ShapeError(err) => write!(f, "Shape error: {}", err),
        }
    }
}

impl From<std::io::Error> for NNError {
    fn from(err: std::io::Error) -> NNError {
        NNError::IoError(err)
    }
}

impl From<csv::Error> for NNError {
    fn from(err: csv::Error) -> NNError {
        NNError::CsvError(err)
    }
}

impl From<ndarray::ShapeError> for NNError {
    fn from(err: ndarray::ShapeError) -> NNError {
        NNError::ShapeError(err)
    }
}

impl Error for NNError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            NNError::IoError(err) => Some(err),
            NNError::CsvError(err) => Some(err),
            NNError::ShapeError(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, NNError>;
