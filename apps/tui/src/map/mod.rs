mod geometry;
mod html;
mod renderer;
mod sink;

pub use geometry::{boundary_path, load_boundary, Boundary};
pub use renderer::{MapPlan, MapRenderer, Marker};
pub use sink::{FileMapSink, MapSink};
