mod crews;
mod grid;
mod week;

pub use crews::*;
pub use grid::*;
pub use week::*;
