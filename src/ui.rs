// src/ui.rs
use egui;

use figure_demos::config::DemoMode;
use figure_demos::engine_lib::controller::keys_for_part;
use figure_demos::engine_lib::figure_types::{BodyPart, Figure};

pub struct UiModel<'a> {
    pub mode: DemoMode,
    pub figure: &'a Figure,
    pub view_distance: f32,
    pub intersecting_pairs: usize,
}

#[derive(Debug, Default)]
pub struct UiActions {
    pub mode: Option<DemoMode>,
    pub view_distance: Option<f32>,
    pub reset_pose: bool,
}

pub fn build_ui(ctx: &egui::Context, model: &UiModel) -> UiActions {
    let mut actions = UiActions::default();
    egui::Window::new("Controls & Info")
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
        .resizable(false)
        .show(ctx, |ui| {
            let mut mode = model.mode;
            ui.horizontal(|ui| {
                ui.label("Demo:");
                ui.selectable_value(&mut mode, DemoMode::Figure, DemoMode::Figure.label());
                ui.selectable_value(&mut mode, DemoMode::Shapes, DemoMode::Shapes.label());
            });
            if mode != model.mode {
                actions.mode = Some(mode);
            }
            ui.label("Tab: switch demo");
            ui.separator();

            match model.mode {
                DemoMode::Figure => figure_panel(ui, model, &mut actions),
                DemoMode::Shapes => {
                    ui.label("Drag the blue handles to move or reshape shapes.");
                    ui.label("Overlapping shapes turn red.");
                    ui.label(format!("Intersecting pairs: {}", model.intersecting_pairs));
                }
            }
        });
    actions
}

fn figure_panel(ui: &mut egui::Ui, model: &UiModel, actions: &mut UiActions) {
    ui.label("Drag with the left mouse button to rotate the view.");

    let mut distance = model.view_distance;
    if ui
        .add(egui::Slider::new(&mut distance, 5.0..=60.0).text("View distance"))
        .changed()
    {
        actions.view_distance = Some(distance);
    }
    if ui.button("Reset pose (0)").clicked() {
        actions.reset_pose = true;
    }

    egui::CollapsingHeader::new("Pose keys (lowercase +, uppercase -)")
        .default_open(true)
        .show(ui, |ui| {
            egui::Grid::new("pose_keys").striped(true).show(ui, |ui| {
                for part in BodyPart::ALL {
                    let (inc, dec) = keys_for_part(part).unwrap_or(('?', '?'));
                    ui.label(format!("{} / {}", inc, dec));
                    ui.label(part.name());
                    let angle = model.figure.angle_deg(part).unwrap_or(0.0);
                    ui.label(format!("{:>6.1}°", angle));
                    ui.end_row();
                }
            });
        });
}
