pub mod decode;
pub mod geojson;
pub mod plates;
pub mod quake;

pub use decode::*;
pub use geojson::*;
pub use plates::*;
pub use quake::*;
