pub mod links;
pub mod normalize;
pub mod records;

pub use records::*;
