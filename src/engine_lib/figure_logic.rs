// src/engine_lib/figure_logic.rs
use glam::{Mat3, Mat4};

use crate::engine_lib::figure_types::{BodyPart, Figure, PartId};
use crate::engine_lib::matrix_stack::MatrixStack;

/// Everything a renderer needs to draw one part as a scaled unit cube.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PartDraw {
    pub part: BodyPart,
    pub model: Mat4,
    pub normal_matrix: Mat3,
    pub color: [f32; 4],
}

pub trait CubeSink {
    fn draw_cube(&mut self, draw: &PartDraw);
}

impl CubeSink for Vec<PartDraw> {
    fn draw_cube(&mut self, draw: &PartDraw) {
        self.push(*draw);
    }
}

/// Inverse-transpose of the upper 3x3, falling back to the plain 3x3 for
/// singular models.
pub fn normal_matrix(model: &Mat4) -> Mat3 {
    let upper = Mat3::from_mat4(*model);
    if upper.determinant().abs() <= f32::EPSILON {
        return upper;
    }
    upper.inverse().transpose()
}

/// Depth-first walk of the figure. `base` is pushed first, every part pushes
/// `parent_top * placement` before drawing and pops after its subtree.
/// Returns the number of parts drawn.
pub fn draw_figure<S: CubeSink + ?Sized>(
    figure: &Figure,
    base: Mat4,
    stack: &mut MatrixStack,
    sink: &mut S,
) -> usize {
    let start_depth = stack.depth();
    stack.push(base);

    let mut drawn = 0;
    if !figure.is_empty() {
        visit(figure, figure.root(), stack, sink, &mut drawn);
    }

    stack.pop();
    if stack.depth() != start_depth {
        log::warn!(
            "draw_figure: unbalanced matrix stack (depth {} after walk, expected {})",
            stack.depth(),
            start_depth
        );
    }
    drawn
}

fn visit<S: CubeSink + ?Sized>(
    figure: &Figure,
    id: PartId,
    stack: &mut MatrixStack,
    sink: &mut S,
    drawn: &mut usize,
) {
    let Some(node) = figure.node(id) else {
        log::warn!("draw_figure: dangling part id {}", id);
        return;
    };
    let parent_top = stack.top().unwrap_or(Mat4::IDENTITY);
    let current = parent_top * node.placement();
    stack.push(current);

    let model = current * node.local;
    sink.draw_cube(&PartDraw {
        part: node.part,
        model,
        normal_matrix: normal_matrix(&model),
        color: node.color,
    });
    *drawn += 1;

    for &child in &node.children {
        visit(figure, child, stack, sink, drawn);
    }
    stack.pop();
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PoseCommand {
    /// Turn one part by `direction * step` degrees.
    Rotate { part: BodyPart, direction: i8 },
    Reset,
}

/// Applies a pose command. Returns false if the figure has no such part.
pub fn apply_pose_command(figure: &mut Figure, command: PoseCommand, step_deg: f32) -> bool {
    match command {
        PoseCommand::Rotate { part, direction } => match figure.part_mut(part) {
            Some(node) => {
                let angle = node.angle_deg() + f32::from(direction) * step_deg;
                node.set_angle_deg(angle);
                log::debug!("{} -> {:.1} deg", part.name(), angle);
                true
            }
            None => {
                log::warn!("pose command for missing part {}", part.name());
                false
            }
        },
        PoseCommand::Reset => {
            figure.reset_pose();
            log::debug!("pose reset");
            true
        }
    }
}
