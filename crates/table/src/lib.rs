mod bucket;
pub mod format;
mod sort;
mod state;
mod view;

pub use bucket::*;
pub use sort::*;
pub use state::*;
pub use view::*;
