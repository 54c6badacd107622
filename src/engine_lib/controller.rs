// src/engine_lib/controller.rs

use winit::{
    event::{ElementState, WindowEvent},
    keyboard::Key,
};

use crate::engine_lib::figure_logic::{apply_pose_command, PoseCommand};
use crate::engine_lib::figure_types::{BodyPart, Figure};

// (increment key, part); the uppercase key decrements.
const POSE_KEYS: [(char, BodyPart); 14] = [
    ('t', BodyPart::Torso),
    ('h', BodyPart::Head),
    ('q', BodyPart::LeftShoulder),
    ('w', BodyPart::LeftArm),
    ('e', BodyPart::LeftHand),
    ('a', BodyPart::RightShoulder),
    ('s', BodyPart::RightArm),
    ('d', BodyPart::RightHand),
    ('z', BodyPart::LeftLeg),
    ('x', BodyPart::LeftAnkle),
    ('c', BodyPart::LeftFoot),
    ('v', BodyPart::RightLeg),
    ('b', BodyPart::RightAnkle),
    ('n', BodyPart::RightFoot),
];

const RESET_KEY: char = '0';

/// Maps a typed character to a pose command. Unknown keys map to `None`.
pub fn binding_for_key(key: &str) -> Option<PoseCommand> {
    let mut chars = key.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if c == RESET_KEY {
        return Some(PoseCommand::Reset);
    }
    let lower = c.to_ascii_lowercase();
    let (_, part) = POSE_KEYS.iter().find(|(k, _)| *k == lower)?;
    let direction = if c.is_ascii_uppercase() { -1 } else { 1 };
    Some(PoseCommand::Rotate { part: *part, direction })
}

/// Increment/decrement key pair for a part, for on-screen help.
pub fn keys_for_part(part: BodyPart) -> Option<(char, char)> {
    POSE_KEYS
        .iter()
        .find(|(_, p)| *p == part)
        .map(|(k, _)| (*k, k.to_ascii_uppercase()))
}

pub struct PoseController {
    pub angle_step_deg: f32,
}

impl PoseController {
    pub fn new(angle_step_deg: f32) -> Self {
        Self { angle_step_deg }
    }

    /// Applies the command bound to `key`; true if the figure changed.
    pub fn press_key(&self, key: &str, figure: &mut Figure) -> bool {
        match binding_for_key(key) {
            Some(command) => apply_pose_command(figure, command, self.angle_step_deg),
            None => false,
        }
    }

    pub fn handle_window_event(&self, event: &WindowEvent, figure: &mut Figure) -> bool {
        match event {
            WindowEvent::KeyboardInput { event: key_event, .. }
                if key_event.state == ElementState::Pressed =>
            {
                match &key_event.logical_key {
                    Key::Character(text) => self.press_key(text.as_str(), figure),
                    _ => false,
                }
            }
            _ => false,
        }
    }
}
