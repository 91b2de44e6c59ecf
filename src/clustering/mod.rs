pub mod absorb;
pub use absorb::*;

pub mod dataset;
pub use dataset::*;

pub mod distance;
pub use distance::*;

pub mod error;
pub use error::*;

pub mod kmeans;
pub use kmeans::*;

pub mod lloyd;
pub use lloyd::*;

pub mod point;
pub use point::*;

pub mod seeding;
pub use seeding::*;

#[cfg(test)]
pub mod tests;
#[cfg(test)]
pub use tests::*;
