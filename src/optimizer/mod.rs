pub mod brute_force;
pub mod constraints;
pub mod dp;
pub mod error;
pub mod greedy;
pub mod sampling;
pub mod types;

pub use brute_force::*;
pub use constraints::*;
pub use dp::*;
pub use error::*;
pub use greedy::*;
pub use types::*;
