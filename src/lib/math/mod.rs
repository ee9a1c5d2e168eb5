mod coordinate;
mod region;

pub use coordinate::*;
pub use region::*;
