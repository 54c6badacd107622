// src/lib.rs

pub mod config;
pub mod demo_scene;
pub mod engine_lib;
pub mod error;
pub mod rendering_lib;
