pub mod controls;
pub mod map;
pub mod page;
pub mod tiles;

pub use map::*;
