pub mod annotation;
pub mod dataset;
pub mod normalizer;
pub mod outcome;

pub use annotation::*;
pub use dataset::*;
pub use normalizer::normalize;
pub use outcome::*;
