pub mod join;
pub use join::*;

pub mod table;
pub use table::*;
