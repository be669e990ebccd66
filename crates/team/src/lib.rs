mod cache;
mod colors;

pub use cache::*;
pub use colors::*;
