use std::fmt;

use grid_labs_common::ColorMode;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// A shape with no axes or with a zero-length axis.
    InvalidDimensions(Vec<usize>),
    InvalidCoordinate {
        coord: Vec<usize>,
        dimensions: Vec<usize>,
    },
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    /// Nested dictionary data does not match the declared dimensions.
    ShapeMismatch(String),
    TooLarge {
        cells: usize,
        limit: usize,
    },
    NotTwoDimensional(usize),
    InvalidKernel(String),
    InvalidSeam(String),
    PixelCount {
        expected: usize,
        actual: usize,
    },
    TooManySeams {
        requested: usize,
        width: usize,
    },
    UnsupportedFormat(ColorMode),
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidDimensions(dimensions) => {
                write!(f, "invalid dimensions {dimensions:?}")
            }
            Error::InvalidCoordinate { coord, dimensions } => {
                write!(f, "coordinate {coord:?} is outside dimensions {dimensions:?}")
            }
            Error::OutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(f, "pixel ({x}, {y}) is outside a {width}x{height} image"),
            Error::ShapeMismatch(reason) => write!(f, "shape mismatch: {reason}"),
            Error::TooLarge { cells, limit } => {
                write!(f, "{cells} cells exceed the limit of {limit}")
            }
            Error::NotTwoDimensional(rank) => {
                write!(f, "expected a 2-dimensional board, found {rank} dimensions")
            }
            Error::InvalidKernel(reason) => write!(f, "invalid kernel: {reason}"),
            Error::InvalidSeam(reason) => write!(f, "invalid seam: {reason}"),
            Error::PixelCount { expected, actual } => {
                write!(f, "expected {expected} pixels, got {actual}")
            }
            Error::TooManySeams { requested, width } => {
                write!(f, "cannot remove {requested} columns from an image {width} wide")
            }
            Error::UnsupportedFormat(mode) => write!(f, "unsupported image mode {mode}"),
            Error::Json(err) => write!(f, "json: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::Json(value)
    }
}
