// src/error.rs

use thiserror::Error;

/// Failures while bringing up the window and GPU. Runtime misuse inside the
/// demos is logged instead.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("could not create rendering surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("GPU device request failed: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}
