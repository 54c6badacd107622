// src/rendering_lib/mod.rs

pub mod figure_renderer;
pub mod geometry;
pub mod intersection;
pub mod renderer;
pub mod shader;
pub mod vertex;

pub use figure_renderer::{FigureRenderer, FrameView};
pub use geometry::{Circle, ConvexPolygon, Point2, MAX_VERTICES};
pub use intersection::ConvexIntersection;
pub use renderer::Renderer;
pub use shader::{FIGURE_SHADER_SOURCE, WGSL_SHADER_SOURCE};
pub use vertex::Vertex;
