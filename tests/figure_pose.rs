use glam::{Mat4, Vec3};

use figure_demos::demo_scene::create_figure;
use figure_demos::engine_lib::controller::{binding_for_key, PoseController};
use figure_demos::engine_lib::figure_logic::{draw_figure, PartDraw};
use figure_demos::engine_lib::figure_types::BodyPart;
use figure_demos::engine_lib::matrix_stack::MatrixStack;

fn assert_mat_eq(a: Mat4, b: Mat4) {
    assert!(a.abs_diff_eq(b, 1e-5), "matrices differ:\n{a:?}\n{b:?}");
}

#[test]
fn traversal_draws_every_part_once() {
    let figure = create_figure();
    let mut stack = MatrixStack::new();
    let mut draws: Vec<PartDraw> = Vec::new();
    let drawn = draw_figure(&figure, Mat4::IDENTITY, &mut stack, &mut draws);

    assert_eq!(drawn, 14);
    assert_eq!(draws.len(), 14);
    for part in BodyPart::ALL {
        assert_eq!(draws.iter().filter(|d| d.part == part).count(), 1, "{}", part.name());
    }
    assert_eq!(draws[0].part, BodyPart::Torso);
    assert!(stack.is_empty());
}

#[test]
fn stack_depth_is_restored_after_draw() {
    let figure = create_figure();
    let mut stack = MatrixStack::new();
    stack.push(Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)));
    let mut draws: Vec<PartDraw> = Vec::new();
    draw_figure(&figure, Mat4::IDENTITY, &mut stack, &mut draws);
    assert_eq!(stack.depth(), 1);
}

#[test]
fn increment_then_decrement_restores_every_part() {
    let controller = PoseController::new(15.0);
    let mut figure = create_figure();
    let before: Vec<Mat4> = BodyPart::ALL.iter().filter_map(|&p| figure.placement(p)).collect();

    for key in "thqweasdzxcvbn".chars() {
        let lower = key.to_string();
        let upper = key.to_ascii_uppercase().to_string();
        assert!(controller.press_key(&lower, &mut figure), "key {lower}");
        assert!(controller.press_key(&upper, &mut figure), "key {upper}");
    }

    let after: Vec<Mat4> = BodyPart::ALL.iter().filter_map(|&p| figure.placement(p)).collect();
    assert_eq!(before.len(), 14);
    for (a, b) in before.into_iter().zip(after) {
        assert_mat_eq(a, b);
    }
}

#[test]
fn torso_key_rotates_about_vertical_axis() {
    let controller = PoseController::new(15.0);
    let mut figure = create_figure();
    assert!(controller.press_key("t", &mut figure));

    let expected = Mat4::from_translation(Vec3::ZERO) * Mat4::from_rotation_y(15f32.to_radians());
    assert_mat_eq(figure.placement(BodyPart::Torso).unwrap(), expected);
    assert_eq!(figure.angle_deg(BodyPart::Torso), Some(15.0));
}

#[test]
fn torso_rotation_carries_children() {
    let controller = PoseController::new(15.0);
    let mut figure = create_figure();
    let mut stack = MatrixStack::new();

    let mut rest: Vec<PartDraw> = Vec::new();
    draw_figure(&figure, Mat4::IDENTITY, &mut stack, &mut rest);
    controller.press_key("t", &mut figure);
    let mut turned: Vec<PartDraw> = Vec::new();
    draw_figure(&figure, Mat4::IDENTITY, &mut stack, &mut turned);

    let rotation = Mat4::from_rotation_y(15f32.to_radians());
    for (r, t) in rest.iter().zip(&turned) {
        assert_eq!(r.part, t.part);
        assert_mat_eq(rotation * r.model, t.model);
    }
}

#[test]
fn reset_key_restores_rest_pose() {
    let controller = PoseController::new(15.0);
    let mut figure = create_figure();
    for key in ["q", "q", "z", "B", "h"] {
        controller.press_key(key, &mut figure);
    }
    assert!(controller.press_key("0", &mut figure));
    for part in BodyPart::ALL {
        assert_eq!(figure.angle_deg(part), Some(0.0), "{}", part.name());
    }
}

#[test]
fn unbound_keys_do_nothing() {
    assert!(binding_for_key("p").is_none());
    assert!(binding_for_key("").is_none());
    let controller = PoseController::new(15.0);
    let mut figure = create_figure();
    assert!(!controller.press_key("p", &mut figure));
}
