// src/main.rs

pub mod app;
pub mod ui;

use anyhow::Context;
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    window::WindowBuilder,
};

use app::DemoApp;
use figure_demos::config::AppConfig;

fn init_logging() {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            std::panic::set_hook(Box::new(console_error_panic_hook::hook));
            if let Err(err) = console_log::init_with_level(log::Level::Warn) {
                web_sys::console::error_1(&format!("Couldn't initialize logger: {err}").into());
            }
        } else {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        }
    }
}

pub async fn run(app_config: AppConfig) -> anyhow::Result<()> {
    log::info!("Starting with {:?}", app_config);

    let event_loop = EventLoop::new().context("Couldn't create event loop")?;
    let window = std::sync::Arc::new(
        WindowBuilder::new()
            .with_title("Figure Demos")
            .with_inner_size(winit::dpi::LogicalSize::new(app_config.width, app_config.height))
            .build(&event_loop)
            .context("Couldn't create window")?,
    );

    #[cfg(target_arch = "wasm32")]
    {
        use winit::platform::web::WindowExtWebSys;
        web_sys::window()
            .and_then(|win| win.document())
            .and_then(|doc| {
                let dst = doc.get_element_by_id("wasm-viewport")?;
                let canvas = web_sys::Element::from(window.canvas()?);
                dst.append_child(&canvas).ok()?;
                Some(())
            })
            .context("Couldn't append canvas to document body.")?;
    }

    let mut app_state = DemoApp::new(window.clone(), &app_config).await?;
    window.request_redraw();

    event_loop.run(move |event, target: &EventLoopWindowTarget<()>| {
        target.set_control_flow(ControlFlow::Wait);

        if let Event::WindowEvent { ref event, window_id } = event {
            if window_id != window.id() || app_state.handle_window_event(event, &window) {
                return;
            }
            match event {
                WindowEvent::CloseRequested => target.exit(),
                WindowEvent::Resized(physical_size) => {
                    app_state.resize(*physical_size);
                    window.request_redraw();
                }
                WindowEvent::RedrawRequested => match app_state.render(&window) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        app_state.resize(app_state.get_size());
                        window.request_redraw();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("WGPU Out Of Memory! Exiting.");
                        target.exit();
                    }
                    Err(e) => log::warn!("Surface error: {:?}", e),
                },
                _ => {}
            }
        }
    })?;
    Ok(())
}

cfg_if::cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        #[wasm_bindgen::prelude::wasm_bindgen(start)]
        pub async fn start() {
            init_logging();
            if let Err(err) = run(AppConfig::default()).await {
                log::error!("{err:#}");
            }
        }

        fn main() {}
    } else {
        #[tokio::main]
        async fn main() -> anyhow::Result<()> {
            use clap::Parser;

            init_logging();
            let cli = figure_demos::config::Cli::parse();
            run(AppConfig::from(cli)).await
        }
    }
}
