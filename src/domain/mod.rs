pub mod candidate;
pub mod selection;

pub use candidate::*;
pub use selection::*;
