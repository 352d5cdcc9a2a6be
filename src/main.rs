use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use glow::HasContext as _;
use glutin::event::{Event, WindowEvent};
use glutin::event_loop::{ControlFlow, EventLoop};
use glutin::window::WindowBuilder;
use glutin::{Api, ContextBuilder, GlProfile, GlRequest};
use log::{error, info};

mod error;
mod math;
mod rendering;
mod shader_source;

use error::Error;
use rendering::Scene;

const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 600;

fn main() -> ExitCode {
    env_logger::init();
    if let Err(err) = run() {
        error!("{}", err);
        return ExitCode::FAILURE;
    }
    return ExitCode::SUCCESS;
}

/// Linear setup (window, context, function table, scene), then the render
/// loop. Any setup failure propagates out; once the loop starts, the only
/// way out is a close request, which exits the process with code 0.
fn run() -> Result<(), Error> {
    let event_loop = EventLoop::new();
    let window_builder = WindowBuilder::new()
        .with_title("QStom")
        .with_inner_size(glutin::dpi::LogicalSize::new(
            WINDOW_WIDTH as f64,
            WINDOW_HEIGHT as f64,
        ));
    let context = ContextBuilder::new()
        .with_gl(GlRequest::Specific(Api::OpenGl, (3, 3)))
        .with_gl_profile(GlProfile::Core)
        .with_vsync(true)
        .build_windowed(window_builder, &event_loop)?;
    let context = unsafe { context.make_current() }.map_err(|(_, err)| err)?;

    let gl = Arc::new(unsafe {
        glow::Context::from_loader_function(|name| context.get_proc_address(name) as *const _)
    });
    unsafe {
        info!(
            "OpenGL {}, GLSL {}",
            gl.get_parameter_string(glow::VERSION),
            gl.get_parameter_string(glow::SHADING_LANGUAGE_VERSION)
        );
    }

    let size = context.window().inner_size();
    // Held in an Option so the LoopDestroyed arm can release the GL
    // objects while the context is still current; closure captures have
    // no guaranteed drop order.
    let mut scene = Some(Scene::new(gl, size.width, size.height)?);

    let mut last_frame = Instant::now();
    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    context.resize(size);
                    if let Some(scene) = scene.as_mut() {
                        scene.resize(size.width, size.height);
                    }
                }
                _ => {}
            },
            Event::MainEventsCleared => {
                context.window().request_redraw();
            }
            Event::RedrawRequested(_) => {
                let now = Instant::now();
                let dt = now.duration_since(last_frame).as_secs_f32();
                last_frame = now;

                if let Some(scene) = scene.as_mut() {
                    scene.advance(dt);
                    scene.draw();
                }
                if let Err(err) = context.swap_buffers() {
                    error!("buffer swap failed: {}", err);
                }
            }
            Event::LoopDestroyed => {
                // Delete the program and buffers while the context lives.
                scene.take();
            }
            _ => {}
        }
    });
}
