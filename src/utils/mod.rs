pub mod constants;
pub mod errors;

pub use constants::*;
pub use errors::LayoutError;
