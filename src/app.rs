//! Windowed shell: presents the engine's framebuffer and maps keyboard
//! input onto the engine's reconfiguration operations.
//!
//! The engine draws into its own logical 800x500 [`PixelSurface`]; this
//! shell copies that buffer into a `softbuffer` window surface (scaled by
//! nearest neighbor when the physical size differs) and feeds the engine
//! one tick per `RedrawRequested`, which the scheduler below re-arms via
//! `request_redraw`.

use std::num::NonZeroU32;
use std::rc::Rc;

use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use bobble::error::ShellError;
use bobble::prelude::*;

const SURFACE_WIDTH: u32 = 800;
const SURFACE_HEIGHT: u32 = 500;
const COUNT_STEP: usize = 500;

/// Frame scheduler backed by winit redraw requests.
///
/// `cancel` cannot retract a redraw already queued by the OS; the engine
/// ignores ticks that arrive with no pending handle, so a stale redraw is
/// harmless.
struct RedrawScheduler {
    window: Rc<Window>,
    next: u64,
}

impl RedrawScheduler {
    fn new(window: Rc<Window>) -> Self {
        Self { window, next: 0 }
    }
}

impl FrameScheduler for RedrawScheduler {
    fn schedule(&mut self) -> FrameHandle {
        self.window.request_redraw();
        self.next += 1;
        FrameHandle(self.next)
    }

    fn cancel(&mut self, _handle: FrameHandle) {}
}

struct Gfx {
    window: Rc<Window>,
    surface: softbuffer::Surface<Rc<Window>, Rc<Window>>,
    physical_width: u32,
    physical_height: u32,
}

pub struct App {
    gfx: Option<Gfx>,
    scene: Option<Scene<PixelSurface>>,
}

impl App {
    pub fn new() -> Self {
        Self {
            gfx: None,
            scene: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ShellError> {
        let window_attrs = Window::default_attributes()
            .with_title("bobble")
            .with_inner_size(LogicalSize::new(SURFACE_WIDTH, SURFACE_HEIGHT))
            .with_resizable(false);

        let window = Rc::new(event_loop.create_window(window_attrs)?);

        let context = softbuffer::Context::new(window.clone())?;
        let mut surface = softbuffer::Surface::new(&context, window.clone())?;

        let physical = window.inner_size();
        let physical_width = physical.width.max(1);
        let physical_height = physical.height.max(1);
        surface.resize(
            NonZeroU32::new(physical_width).unwrap_or(NonZeroU32::MIN),
            NonZeroU32::new(physical_height).unwrap_or(NonZeroU32::MIN),
        )?;

        let title_window = window.clone();
        let scene = Scene::new(
            PixelSurface::new(SURFACE_WIDTH, SURFACE_HEIGHT),
            Box::new(RedrawScheduler::new(window.clone())),
            Box::new(move |frames| {
                title_window.set_title(&format!("bobble | {} fps", frames));
            }),
        );

        println!(
            "Scene: {}x{}, {} particles",
            SURFACE_WIDTH,
            SURFACE_HEIGHT,
            scene.config().particle_count
        );

        self.gfx = Some(Gfx {
            window,
            surface,
            physical_width,
            physical_height,
        });
        self.scene = Some(scene);
        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, event_loop: &ActiveEventLoop) {
        let Some(scene) = &mut self.scene else {
            return;
        };

        match key {
            KeyCode::Escape | KeyCode::KeyQ => event_loop.exit(),
            KeyCode::ArrowUp => {
                let count = scene.config().particle_count + COUNT_STEP;
                scene.set_particle_count(count);
                println!("Particles: {}", count);
            }
            KeyCode::ArrowDown => {
                let count = scene.config().particle_count.saturating_sub(COUNT_STEP);
                scene.set_particle_count(count);
                println!("Particles: {}", count);
            }
            KeyCode::KeyR => {
                scene.toggle_offscreen_rendering();
                let mode = if scene.config().offscreen_rendering {
                    "offscreen sprite blit"
                } else {
                    "direct draw"
                };
                println!("Rendering: {}", mode);
            }
            KeyCode::KeyM => {
                if scene.toggle_multi_sprite_instances() {
                    let mode = if scene.config().multi_sprite_instances {
                        "per particle"
                    } else {
                        "shared"
                    };
                    println!("Sprite instances: {}", mode);
                } else {
                    println!("Sprite instancing needs offscreen rendering (press R first)");
                }
            }
            _ => {}
        }
    }

    /// Copy the engine's RGBA framebuffer into the window surface, scaling
    /// logical to physical pixels by nearest neighbor, and present it.
    fn present(&mut self) -> Result<(), ShellError> {
        let (Some(gfx), Some(scene)) = (self.gfx.as_mut(), self.scene.as_ref()) else {
            return Ok(());
        };

        let frame = scene.surface().data();
        let logical_width = SURFACE_WIDTH as usize;
        let logical_height = SURFACE_HEIGHT as usize;
        let physical_width = gfx.physical_width as usize;
        let physical_height = gfx.physical_height as usize;

        let mut buffer = gfx.surface.buffer_mut()?;
        for py in 0..physical_height {
            let ly = (py * logical_height / physical_height).min(logical_height - 1);
            for px in 0..physical_width {
                let lx = (px * logical_width / physical_width).min(logical_width - 1);
                let src = (ly * logical_width + lx) * 4;
                let r = u32::from(frame[src]);
                let g = u32::from(frame[src + 1]);
                let b = u32::from(frame[src + 2]);
                buffer[py * physical_width + px] = (r << 16) | (g << 8) | b;
            }
        }
        buffer.present()?;
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gfx.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            eprintln!("Initialization failed: {}", e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(gfx) = &mut self.gfx {
                    gfx.physical_width = size.width.max(1);
                    gfx.physical_height = size.height.max(1);
                    let resized = gfx.surface.resize(
                        NonZeroU32::new(gfx.physical_width).unwrap_or(NonZeroU32::MIN),
                        NonZeroU32::new(gfx.physical_height).unwrap_or(NonZeroU32::MIN),
                    );
                    if let Err(e) = resized {
                        eprintln!("Resize failed: {}", e);
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                self.handle_key(key, event_loop);
            }
            WindowEvent::RedrawRequested => {
                if let Some(scene) = &mut self.scene {
                    scene.tick();
                }
                if let Err(e) = self.present() {
                    eprintln!("Present failed: {}", e);
                }
                if let Some(gfx) = &self.gfx {
                    // Keep the loop alive even if a stale tick was ignored.
                    gfx.window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Build the event loop and run the shell until the window closes.
pub fn run() -> Result<(), ShellError> {
    println!("Controls:");
    println!("  Up/Down  add/remove {} particles", COUNT_STEP);
    println!("  R        toggle offscreen sprite rendering");
    println!("  M        toggle per-particle sprite instances");
    println!("  Esc/Q    quit");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app)?;
    Ok(())
}
