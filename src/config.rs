// src/config.rs

use clap::{Parser, ValueEnum};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum DemoMode {
    /// Articulated figure with trackball view
    #[default]
    Figure,
    /// Draggable 2D shapes with overlap highlighting
    Shapes,
}

impl DemoMode {
    pub fn toggled(self) -> Self {
        match self {
            DemoMode::Figure => DemoMode::Shapes,
            DemoMode::Shapes => DemoMode::Figure,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DemoMode::Figure => "Figure",
            DemoMode::Shapes => "Shapes",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "figure_demos", about = "Articulated figure and 2D intersection demos")]
pub struct Cli {
    /// Demo shown at startup
    #[arg(long, value_enum, default_value_t = DemoMode::Figure)]
    pub demo: DemoMode,

    /// Window width in logical pixels
    #[arg(long, default_value_t = 1024)]
    pub width: u32,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 768)]
    pub height: u32,

    /// Degrees added or removed per pose key press
    #[arg(long, default_value_t = 15.0)]
    pub angle_step: f32,

    /// Distance from the eye to the rotation center
    #[arg(long, default_value_t = 20.0)]
    pub view_distance: f32,

    /// How close (in pixels) a press must be to grab a shape anchor
    #[arg(long, default_value_t = 8.0)]
    pub pick_radius: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub demo: DemoMode,
    pub width: u32,
    pub height: u32,
    pub angle_step_deg: f32,
    pub view_distance: f32,
    pub pick_radius: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            demo: DemoMode::Figure,
            width: 1024,
            height: 768,
            angle_step_deg: 15.0,
            view_distance: 20.0,
            pick_radius: 8.0,
        }
    }
}

impl From<Cli> for AppConfig {
    fn from(cli: Cli) -> Self {
        Self {
            demo: cli.demo,
            width: cli.width.max(1),
            height: cli.height.max(1),
            angle_step_deg: cli.angle_step,
            view_distance: cli.view_distance,
            pick_radius: cli.pick_radius.max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_match_app_defaults() {
        let cli = Cli::parse_from(["figure_demos"]);
        assert_eq!(AppConfig::from(cli), AppConfig::default());
    }

    #[test]
    fn cli_overrides() {
        let cli = Cli::parse_from(["figure_demos", "--demo", "shapes", "--angle-step", "5", "--pick-radius", "12"]);
        let config = AppConfig::from(cli);
        assert_eq!(config.demo, DemoMode::Shapes);
        assert_eq!(config.angle_step_deg, 5.0);
        assert_eq!(config.pick_radius, 12.0);
    }
}
