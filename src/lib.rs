//! # bobble
//!
//! A bouncing-particle animation engine for comparing rendering strategies:
//! rasterize every circle fresh each frame, or pre-render one circle into an
//! offscreen sprite and blit it, with either a single shared sprite or one
//! sprite per particle.
//!
//! The engine is deliberately small: particles only move vertically,
//! reflecting off the top and bottom of a fixed-size surface, and the one
//! measurement that matters is the achieved frame rate, reported once per
//! second. Everything around the engine (windowing, input, presentation)
//! lives in the demo binary.
//!
//! ## Quick start
//!
//! ```ignore
//! use bobble::prelude::*;
//!
//! // Headless: drive the engine by hand.
//! let mut scene = Scene::new(
//!     PixelSurface::new(800, 500),
//!     Box::new(ManualScheduler::new()),
//!     Box::new(|fps| println!("{} fps", fps)),
//! );
//!
//! for _ in 0..600 {
//!     scene.tick();
//! }
//!
//! // Switch to blitting a cached sprite instead of redrawing circles.
//! scene.toggle_offscreen_rendering();
//! ```
//!
//! ## Core concepts
//!
//! - [`Scene`] owns the particle collection and the frame loop state; every
//!   reconfiguration (count, rendering mode, sprite instancing) cancels the
//!   pending frame tick, rebuilds particle state, and restarts the loop.
//! - [`Sprite`] is a circle rasterized once into a square RGBA bitmap and
//!   copied per frame in offscreen mode.
//! - [`DrawSurface`] is the rendering seam: the engine only needs clear,
//!   fill-circle, and blit, so it runs identically against a window-backed
//!   framebuffer or an in-memory one in tests and benchmarks.
//! - [`FrameScheduler`] stands in for the display's vertical refresh; the
//!   demo binary backs it with winit redraw requests.

pub mod error;
pub mod fps;
pub mod particle;
pub mod scene;
pub mod sched;
pub mod sprite;
pub mod surface;

pub use fps::FpsCounter;
pub use particle::Particle;
pub use scene::{Scene, SceneConfig, SpriteStrategy, PARTICLE_COLOR};
pub use sched::{FrameHandle, FrameScheduler, ManualScheduler};
pub use sprite::Sprite;
pub use surface::{DrawSurface, PixelSurface, Rgba, BACKGROUND};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use bobble::prelude::*;
/// ```
pub mod prelude {
    pub use crate::fps::FpsCounter;
    pub use crate::particle::Particle;
    pub use crate::scene::{Scene, SceneConfig, SpriteStrategy, PARTICLE_COLOR};
    pub use crate::sched::{FrameHandle, FrameScheduler, ManualScheduler};
    pub use crate::sprite::Sprite;
    pub use crate::surface::{DrawSurface, PixelSurface, Rgba, BACKGROUND};
}
