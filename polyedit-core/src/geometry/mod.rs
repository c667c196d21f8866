pub mod distance;
pub mod r2;

pub use distance::*;
