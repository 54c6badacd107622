// src/demo_scene.rs

use glam::Vec3;

use crate::engine_lib::figure_types::{BodyPart, Figure, PartNode};
use crate::engine_lib::shapes::{Shape, ShapesScene};
use crate::rendering_lib::geometry::Point2;

const TORSO_COLOR: [f32; 4] = [0.20, 0.45, 0.80, 1.0];
const HEAD_COLOR: [f32; 4] = [0.95, 0.80, 0.60, 1.0];
const JOINT_COLOR: [f32; 4] = [0.85, 0.25, 0.25, 1.0];
const LIMB_COLOR: [f32; 4] = [0.30, 0.70, 0.35, 1.0];
const EXTREMITY_COLOR: [f32; 4] = [0.90, 0.75, 0.20, 1.0];

// Unit cube edge is 1, so part sizes are full extents. Offsets are measured
// from the parent part's center; pivots from the part's own center.
const TORSO_SIZE: Vec3 = Vec3::new(3.0, 4.0, 1.5);
const HEAD_SIZE: Vec3 = Vec3::new(1.5, 1.5, 1.5);
const SHOULDER_SIZE: Vec3 = Vec3::new(0.8, 0.8, 0.8);
const ARM_SIZE: Vec3 = Vec3::new(0.6, 2.4, 0.6);
const HAND_SIZE: Vec3 = Vec3::new(0.7, 0.7, 0.7);
const LEG_SIZE: Vec3 = Vec3::new(0.9, 3.0, 0.9);
const ANKLE_SIZE: Vec3 = Vec3::new(0.6, 0.6, 0.6);
const FOOT_SIZE: Vec3 = Vec3::new(0.8, 0.3, 1.6);

fn arm_chain(figure: &mut Figure, torso: usize, side: f32, parts: [BodyPart; 3]) {
    let [shoulder_part, arm_part, hand_part] = parts;
    let shoulder_x = side * (TORSO_SIZE.x + SHOULDER_SIZE.x) * 0.5;
    let Some(shoulder) = figure.add_child(
        torso,
        PartNode::new(
            shoulder_part,
            SHOULDER_SIZE,
            Vec3::new(shoulder_x, TORSO_SIZE.y * 0.5 - SHOULDER_SIZE.y * 0.5, 0.0),
            Vec3::ZERO,
            Vec3::X,
            JOINT_COLOR,
        ),
    ) else {
        return;
    };
    let Some(arm) = figure.add_child(
        shoulder,
        PartNode::new(
            arm_part,
            ARM_SIZE,
            Vec3::new(0.0, -(SHOULDER_SIZE.y + ARM_SIZE.y) * 0.5, 0.0),
            Vec3::new(0.0, ARM_SIZE.y * 0.5, 0.0),
            Vec3::X,
            LIMB_COLOR,
        ),
    ) else {
        return;
    };
    figure.add_child(
        arm,
        PartNode::new(
            hand_part,
            HAND_SIZE,
            Vec3::new(0.0, -(ARM_SIZE.y + HAND_SIZE.y) * 0.5, 0.0),
            Vec3::new(0.0, HAND_SIZE.y * 0.5, 0.0),
            Vec3::X,
            EXTREMITY_COLOR,
        ),
    );
}

fn leg_chain(figure: &mut Figure, torso: usize, side: f32, parts: [BodyPart; 3]) {
    let [leg_part, ankle_part, foot_part] = parts;
    let Some(leg) = figure.add_child(
        torso,
        PartNode::new(
            leg_part,
            LEG_SIZE,
            Vec3::new(side * 0.8, -(TORSO_SIZE.y + LEG_SIZE.y) * 0.5 - 0.1, 0.0),
            Vec3::new(0.0, LEG_SIZE.y * 0.5, 0.0),
            Vec3::X,
            LIMB_COLOR,
        ),
    ) else {
        return;
    };
    let Some(ankle) = figure.add_child(
        leg,
        PartNode::new(
            ankle_part,
            ANKLE_SIZE,
            Vec3::new(0.0, -(LEG_SIZE.y + ANKLE_SIZE.y) * 0.5, 0.0),
            Vec3::new(0.0, ANKLE_SIZE.y * 0.5, 0.0),
            Vec3::X,
            JOINT_COLOR,
        ),
    ) else {
        return;
    };
    // Foot sticks forward (+z) from under the ankle; it turns about the ankle center.
    let foot_offset = Vec3::new(0.0, -(ANKLE_SIZE.y + FOOT_SIZE.y) * 0.5, FOOT_SIZE.z * 0.5 - ANKLE_SIZE.z * 0.5);
    figure.add_child(
        ankle,
        PartNode::new(foot_part, FOOT_SIZE, foot_offset, -foot_offset, Vec3::X, EXTREMITY_COLOR),
    );
}

/// torso -> {shoulder -> arm -> hand} x2, head, {leg -> ankle -> foot} x2
pub fn create_figure() -> Figure {
    let mut figure = Figure::new(PartNode::new(
        BodyPart::Torso,
        TORSO_SIZE,
        Vec3::ZERO,
        Vec3::ZERO,
        Vec3::Y,
        TORSO_COLOR,
    ));
    let torso = figure.root();

    arm_chain(&mut figure, torso, -1.0, [BodyPart::LeftShoulder, BodyPart::LeftArm, BodyPart::LeftHand]);
    arm_chain(&mut figure, torso, 1.0, [BodyPart::RightShoulder, BodyPart::RightArm, BodyPart::RightHand]);

    figure.add_child(
        torso,
        PartNode::new(
            BodyPart::Head,
            HEAD_SIZE,
            Vec3::new(0.0, (TORSO_SIZE.y + HEAD_SIZE.y) * 0.5 + 0.1, 0.0),
            Vec3::ZERO,
            Vec3::Y,
            HEAD_COLOR,
        ),
    );

    leg_chain(&mut figure, torso, -1.0, [BodyPart::LeftLeg, BodyPart::LeftAnkle, BodyPart::LeftFoot]);
    leg_chain(&mut figure, torso, 1.0, [BodyPart::RightLeg, BodyPart::RightAnkle, BodyPart::RightFoot]);

    figure
}

pub fn create_shapes_scene(pick_radius: f32) -> ShapesScene {
    let p = Point2::new;
    ShapesScene::new(
        vec![
            Shape::triangle(p(150.0, 250.0), p(150.0, 150.0)),
            Shape::triangle(p(420.0, 480.0), p(480.0, 400.0)),
            Shape::rectangle(p(350.0, 200.0), p(420.0, 250.0)),
            Shape::rectangle(p(650.0, 450.0), p(700.0, 480.0)),
            Shape::circle(p(100.0, 450.0), p(150.0, 450.0)),
            Shape::circle(p(600.0, 200.0), p(660.0, 200.0)),
        ],
        pick_radius,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn figure_has_fourteen_distinct_parts() {
        let figure = create_figure();
        assert_eq!(figure.len(), 14);
        for part in BodyPart::ALL {
            assert!(figure.part(part).is_some(), "{:?} missing", part);
        }
    }

    #[test]
    fn hierarchy_matches_body_layout() {
        let figure = create_figure();
        let children_of = |part: BodyPart| -> Vec<BodyPart> {
            figure
                .part(part)
                .unwrap()
                .children
                .iter()
                .map(|&id| figure.node(id).unwrap().part)
                .collect()
        };
        assert_eq!(
            children_of(BodyPart::Torso),
            vec![
                BodyPart::LeftShoulder,
                BodyPart::RightShoulder,
                BodyPart::Head,
                BodyPart::LeftLeg,
                BodyPart::RightLeg
            ]
        );
        assert_eq!(children_of(BodyPart::LeftShoulder), vec![BodyPart::LeftArm]);
        assert_eq!(children_of(BodyPart::LeftArm), vec![BodyPart::LeftHand]);
        assert_eq!(children_of(BodyPart::RightLeg), vec![BodyPart::RightAnkle]);
        assert_eq!(children_of(BodyPart::RightAnkle), vec![BodyPart::RightFoot]);
        assert!(children_of(BodyPart::Head).is_empty());
    }

    #[test]
    fn initial_shapes_do_not_overlap() {
        assert_eq!(create_shapes_scene(8.0).intersecting_pairs(), 0);
    }
}
