pub mod boundaries;
pub mod html;
pub mod layer;
pub mod legend;
pub mod markers;
pub mod raster;
pub mod symbology;
pub mod transform;

pub use layer::*;
pub use transform::*;
