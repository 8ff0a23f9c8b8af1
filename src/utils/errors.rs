use std::fmt;
use std::error::Error;

/// Represents errors that can occur when constructing spatial indexes.
#[derive(Debug, Clone)]
pub enum LayoutError {
    /// Indicates a malformed boundary rectangle (non-positive or non-finite
    /// width/height). Rejected at construction so a tree can never subdivide
    /// a zero-area region.
    InvalidBoundary,
    /// Indicates a leaf capacity of zero, which would force subdivision on
    /// every insertion.
    InvalidCapacity,
    /// Indicates an invalid Barnes-Hut theta (negative or non-finite).
    InvalidTheta,
    /// A general error for calculations that produce invalid results.
    CalculationError(String),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LayoutError::InvalidBoundary => write!(f, "Invalid boundary rectangle"),
            LayoutError::InvalidCapacity => write!(f, "Invalid leaf capacity"),
            LayoutError::InvalidTheta => write!(f, "Invalid theta value"),
            LayoutError::CalculationError(msg) => write!(f, "Calculation error: {}", msg),
        }
    }
}

impl Error for LayoutError {}
