// src/engine_lib/mod.rs
pub mod camera;
pub mod controller;
pub mod figure_logic;
pub mod figure_types;
pub mod matrix_stack;
pub mod shapes;
pub mod trackball;

pub use camera::Camera;
pub use controller::PoseController;
pub use figure_logic::{draw_figure, CubeSink, PartDraw, PoseCommand};
pub use figure_types::{BodyPart, Figure, PartNode};
pub use matrix_stack::MatrixStack;
pub use shapes::{Shape, ShapeColor, ShapesScene};
pub use trackball::TrackballRotator;
