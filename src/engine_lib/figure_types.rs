// src/engine_lib/figure_types.rs
use glam::{Mat4, Vec3};

pub type PartId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyPart {
    Torso,
    Head,
    LeftShoulder,
    LeftArm,
    LeftHand,
    RightShoulder,
    RightArm,
    RightHand,
    LeftLeg,
    LeftAnkle,
    LeftFoot,
    RightLeg,
    RightAnkle,
    RightFoot,
}

impl BodyPart {
    pub const ALL: [BodyPart; 14] = [
        BodyPart::Torso,
        BodyPart::Head,
        BodyPart::LeftShoulder,
        BodyPart::LeftArm,
        BodyPart::LeftHand,
        BodyPart::RightShoulder,
        BodyPart::RightArm,
        BodyPart::RightHand,
        BodyPart::LeftLeg,
        BodyPart::LeftAnkle,
        BodyPart::LeftFoot,
        BodyPart::RightLeg,
        BodyPart::RightAnkle,
        BodyPart::RightFoot,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BodyPart::Torso => "torso",
            BodyPart::Head => "head",
            BodyPart::LeftShoulder => "left shoulder",
            BodyPart::LeftArm => "left arm",
            BodyPart::LeftHand => "left hand",
            BodyPart::RightShoulder => "right shoulder",
            BodyPart::RightArm => "right arm",
            BodyPart::RightHand => "right hand",
            BodyPart::LeftLeg => "left leg",
            BodyPart::LeftAnkle => "left ankle",
            BodyPart::LeftFoot => "left foot",
            BodyPart::RightLeg => "right leg",
            BodyPart::RightAnkle => "right ankle",
            BodyPart::RightFoot => "right foot",
        }
    }
}

/// One rigid part of the figure.
///
/// `local` scales the unit cube into the part's shape and never changes.
/// `placement` maps the part frame into the parent frame and is rebuilt from
/// `offset`, `pivot`, `axis` and `angle_deg` whenever the angle changes.
#[derive(Clone, Debug)]
pub struct PartNode {
    pub part: BodyPart,
    pub local: Mat4,
    pub offset: Vec3,
    pub pivot: Vec3,
    pub axis: Vec3,
    pub color: [f32; 4],
    pub children: Vec<PartId>,
    angle_deg: f32,
    placement: Mat4,
}

impl PartNode {
    pub fn new(part: BodyPart, size: Vec3, offset: Vec3, pivot: Vec3, axis: Vec3, color: [f32; 4]) -> Self {
        let mut node = Self {
            part,
            local: Mat4::from_scale(size),
            offset,
            pivot,
            axis: axis.normalize_or_zero(),
            color,
            children: Vec::new(),
            angle_deg: 0.0,
            placement: Mat4::IDENTITY,
        };
        node.recompute_placement();
        node
    }

    pub fn angle_deg(&self) -> f32 {
        self.angle_deg
    }

    pub fn placement(&self) -> Mat4 {
        self.placement
    }

    pub fn set_angle_deg(&mut self, angle_deg: f32) {
        self.angle_deg = angle_deg;
        self.recompute_placement();
    }

    // offset * T(pivot) * R(angle, axis) * T(-pivot)
    fn recompute_placement(&mut self) {
        let rotation = if self.axis == Vec3::ZERO {
            Mat4::IDENTITY
        } else {
            Mat4::from_axis_angle(self.axis, self.angle_deg.to_radians())
        };
        self.placement = Mat4::from_translation(self.offset)
            * Mat4::from_translation(self.pivot)
            * rotation
            * Mat4::from_translation(-self.pivot);
    }
}

/// Arena-backed articulated figure. Children are referenced by index into
/// `nodes`; the figure owns every node.
#[derive(Clone, Debug)]
pub struct Figure {
    nodes: Vec<PartNode>,
    root: PartId,
}

impl Figure {
    pub fn new(root: PartNode) -> Self {
        Self {
            nodes: vec![root],
            root: 0,
        }
    }

    /// Returns `None` if `parent` does not exist.
    pub fn add_child(&mut self, parent: PartId, node: PartNode) -> Option<PartId> {
        if parent >= self.nodes.len() {
            log::warn!("Figure::add_child: no parent with id {}", parent);
            return None;
        }
        let id = self.nodes.len();
        self.nodes.push(node);
        self.nodes[parent].children.push(id);
        Some(id)
    }

    pub fn root(&self) -> PartId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: PartId) -> Option<&PartNode> {
        self.nodes.get(id)
    }

    pub fn part_id(&self, part: BodyPart) -> Option<PartId> {
        self.nodes.iter().position(|n| n.part == part)
    }

    pub fn part(&self, part: BodyPart) -> Option<&PartNode> {
        self.part_id(part).map(|id| &self.nodes[id])
    }

    pub fn part_mut(&mut self, part: BodyPart) -> Option<&mut PartNode> {
        self.nodes.iter_mut().find(|n| n.part == part)
    }

    pub fn placement(&self, part: BodyPart) -> Option<Mat4> {
        self.part(part).map(PartNode::placement)
    }

    pub fn angle_deg(&self, part: BodyPart) -> Option<f32> {
        self.part(part).map(PartNode::angle_deg)
    }

    pub fn reset_pose(&mut self) {
        for node in &mut self.nodes {
            node.set_angle_deg(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(part: BodyPart) -> PartNode {
        PartNode::new(part, Vec3::ONE, Vec3::ZERO, Vec3::ZERO, Vec3::X, [1.0; 4])
    }

    #[test]
    fn add_child_links_parent_and_child() {
        let mut figure = Figure::new(cube(BodyPart::Torso));
        let head = figure.add_child(figure.root(), cube(BodyPart::Head));
        assert_eq!(head, Some(1));
        assert_eq!(figure.node(0).map(|n| n.children.clone()), Some(vec![1]));
        assert_eq!(figure.part_id(BodyPart::Head), Some(1));
    }

    #[test]
    fn add_child_rejects_missing_parent() {
        let mut figure = Figure::new(cube(BodyPart::Torso));
        assert_eq!(figure.add_child(7, cube(BodyPart::Head)), None);
        assert_eq!(figure.len(), 1);
        assert!(figure.node(0).map_or(false, |n| n.children.is_empty()));
        assert!(figure.part(BodyPart::Head).is_none());
    }

    #[test]
    fn placement_pivots_about_joint() {
        // Rotating a unit arm hanging from (0, 0.5) by 90 deg about Z swings
        // its center from the origin to (0.5, 0.5).
        let mut arm = PartNode::new(
            BodyPart::LeftArm,
            Vec3::ONE,
            Vec3::ZERO,
            Vec3::new(0.0, 0.5, 0.0),
            Vec3::Z,
            [1.0; 4],
        );
        arm.set_angle_deg(90.0);
        let center = arm.placement().transform_point3(Vec3::ZERO);
        assert!(center.abs_diff_eq(Vec3::new(0.5, 0.5, 0.0), 1e-5), "{center:?}");
    }

    #[test]
    fn reset_pose_zeroes_every_angle() {
        let mut figure = Figure::new(cube(BodyPart::Torso));
        figure.add_child(0, cube(BodyPart::Head));
        for part in [BodyPart::Torso, BodyPart::Head] {
            if let Some(node) = figure.part_mut(part) {
                node.set_angle_deg(30.0);
            }
        }
        figure.reset_pose();
        assert_eq!(figure.angle_deg(BodyPart::Torso), Some(0.0));
        assert_eq!(figure.placement(BodyPart::Head), Some(Mat4::IDENTITY));
    }
}
