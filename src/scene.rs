//! The scene engine: particle collection, frame loop, and reconfiguration.
//!
//! A [`Scene`] owns everything that moves: the particle collection, the
//! sprite strategy for the current rendering mode, the FPS counter, and the
//! pending-tick handle that makes up its Running/Stopped state. Every
//! reconfiguration runs through one stop-mutate-reset helper so the pending
//! tick is always canceled before any state is rebuilt.

use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::fps::FpsCounter;
use crate::particle::Particle;
use crate::sched::{FrameHandle, FrameScheduler};
use crate::sprite::Sprite;
use crate::surface::{DrawSurface, Rgba, BACKGROUND};

/// Color particles are rendered in, both directly and via sprites.
pub const PARTICLE_COLOR: Rgba = [0, 0, 0, 255];

/// Engine configuration. Surface dimensions are not part of it; they are
/// fixed by the surface handed to the constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Number of particles to spawn on the next reset. Zero is valid: the
    /// engine keeps running and clears the surface every frame.
    pub particle_count: usize,
    /// Particle radius in pixels.
    pub particle_radius: f32,
    /// Vertical speed in pixels per frame.
    pub speed: f32,
    /// Blit pre-rasterized sprites instead of drawing circles each frame.
    pub offscreen_rendering: bool,
    /// One sprite per particle instead of a single shared sprite. Only
    /// meaningful while `offscreen_rendering` is on.
    pub multi_sprite_instances: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_count: 1000,
            particle_radius: 5.0,
            speed: 10.0,
            offscreen_rendering: false,
            multi_sprite_instances: false,
        }
    }
}

/// Sprite ownership for one reset cycle: either every particle blits the
/// same bitmap, or each particle carries its own. Selected once per reset,
/// never mixed within a collection.
#[derive(Debug)]
pub enum SpriteStrategy {
    /// One sprite shared by all particles.
    Shared(Sprite),
    /// One sprite per particle, indexed in particle order; the vector length
    /// equals the particle count.
    PerParticle(Vec<Sprite>),
}

/// The animation engine.
///
/// Constructing a scene spawns its particles and schedules the first frame
/// tick; the scene is running from that moment on. The frame pump (a window
/// shell, a test loop, a benchmark) delivers ticks via [`Scene::tick`].
pub struct Scene<S: DrawSurface> {
    surface: S,
    width: f32,
    height: f32,
    config: SceneConfig,
    particles: Vec<Particle>,
    strategy: SpriteStrategy,
    rng: SmallRng,
    fps: FpsCounter,
    fps_sink: Box<dyn FnMut(u32)>,
    scheduler: Box<dyn FrameScheduler>,
    pending: Option<FrameHandle>,
}

impl<S: DrawSurface> Scene<S> {
    /// Create a scene with the default configuration, immediately running.
    ///
    /// `fps_sink` receives the frame count roughly once per second.
    pub fn new(
        surface: S,
        scheduler: Box<dyn FrameScheduler>,
        fps_sink: Box<dyn FnMut(u32)>,
    ) -> Self {
        Self::with_config(surface, SceneConfig::default(), scheduler, fps_sink)
    }

    /// Create a scene with an explicit configuration, immediately running.
    pub fn with_config(
        surface: S,
        config: SceneConfig,
        scheduler: Box<dyn FrameScheduler>,
        fps_sink: Box<dyn FnMut(u32)>,
    ) -> Self {
        let width = surface.width() as f32;
        let height = surface.height() as f32;
        let shared = Sprite::new(config.particle_radius, PARTICLE_COLOR);

        let mut scene = Self {
            surface,
            width,
            height,
            config,
            particles: Vec::new(),
            strategy: SpriteStrategy::Shared(shared),
            rng: SmallRng::seed_from_u64(clock_seed()),
            fps: FpsCounter::new(Instant::now()),
            fps_sink,
            scheduler,
            pending: None,
        };
        scene.reset();
        scene
    }

    /// Tear down and rebuild particle and sprite state from the current
    /// configuration, then start the frame loop. Callable any number of
    /// times over the scene's life.
    fn reset(&mut self) {
        let radius = self.config.particle_radius;
        let count = self.config.particle_count;

        self.particles.clear();

        // Per-particle sprites only materialize when blitting is active;
        // otherwise one shared sprite is allocated up front.
        self.strategy = if self.config.multi_sprite_instances && self.config.offscreen_rendering {
            SpriteStrategy::PerParticle(
                (0..count)
                    .map(|_| Sprite::new(radius, PARTICLE_COLOR))
                    .collect(),
            )
        } else {
            SpriteStrategy::Shared(Sprite::new(radius, PARTICLE_COLOR))
        };

        for _ in 0..count {
            let x = self.random_coord(self.width);
            let y = self.random_coord(self.height);
            if !self.config.offscreen_rendering {
                // Direct-draw mode paints each particle once at spawn so the
                // surface is never blank before the first frame tick.
                self.surface.fill_circle(x, y, radius, PARTICLE_COLOR);
            }
            self.particles.push(Particle::new(x, y));
        }

        self.fps.restart(Instant::now());
        self.start();
    }

    /// Uniform random coordinate satisfying `radius <= c <= extent - radius`.
    fn random_coord(&mut self, extent: f32) -> f32 {
        let radius = self.config.particle_radius;
        let span = extent - 2.0 * radius;
        if span <= 0.0 {
            // Surface too small for this radius; park on the midpoint.
            return extent / 2.0;
        }
        (radius + self.rng.gen::<f32>() * span).floor()
    }

    /// Schedule the next frame tick if none is pending.
    fn start(&mut self) {
        if self.pending.is_none() {
            self.pending = Some(self.scheduler.schedule());
        }
    }

    /// Cancel the pending frame tick. Idempotent; stopping a stopped scene
    /// is a no-op.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }

    /// Whether a frame tick is currently scheduled.
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Stop, apply one configuration mutation, rebuild, restart. Every
    /// public reconfiguration operation funnels through here so the
    /// cancel-before-mutate ordering holds everywhere.
    fn apply_config_change(&mut self, mutate: impl FnOnce(&mut SceneConfig)) {
        self.stop();
        mutate(&mut self.config);
        self.reset();
    }

    /// Set the particle count and rebuild. Any value is accepted; zero
    /// yields a scene that clears the surface every frame and draws nothing.
    pub fn set_particle_count(&mut self, count: usize) {
        self.apply_config_change(|c| c.particle_count = count);
    }

    /// Flip between direct circle drawing and sprite blitting, rebuilding
    /// particle state.
    pub fn toggle_offscreen_rendering(&mut self) {
        self.apply_config_change(|c| c.offscreen_rendering = !c.offscreen_rendering);
    }

    /// Flip between one shared sprite and one sprite per particle.
    ///
    /// Only applies while offscreen rendering is active; in direct-draw mode
    /// nothing changes and `false` is returned.
    pub fn toggle_multi_sprite_instances(&mut self) -> bool {
        if !self.config.offscreen_rendering {
            return false;
        }
        self.apply_config_change(|c| c.multi_sprite_instances = !c.multi_sprite_instances);
        true
    }

    /// Deliver the scheduled frame tick using the real clock.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Deliver the scheduled frame tick at an explicit instant.
    ///
    /// A tick with no pending handle (the scene was stopped after the tick
    /// was queued) is ignored. Otherwise: run one frame step, feed the FPS
    /// counter, report to the sink when a window closes, and reschedule.
    pub fn tick_at(&mut self, now: Instant) {
        if self.pending.take().is_none() {
            return;
        }

        self.frame_step();

        if let Some(frames) = self.fps.tick(now) {
            (self.fps_sink)(frames);
        }

        self.pending = Some(self.scheduler.schedule());
    }

    /// One update-and-draw pass over the whole collection.
    fn frame_step(&mut self) {
        let radius = self.config.particle_radius;
        let speed = self.config.speed;
        let floor = self.height - radius;
        let offscreen = self.config.offscreen_rendering;

        let Self {
            surface,
            particles,
            strategy,
            ..
        } = self;

        surface.clear(BACKGROUND);

        for (i, particle) in particles.iter_mut().enumerate() {
            particle.step(speed, radius, floor);

            if offscreen {
                let sprite = match &*strategy {
                    SpriteStrategy::Shared(sprite) => sprite,
                    SpriteStrategy::PerParticle(sprites) => &sprites[i],
                };
                surface.blit(
                    sprite,
                    (particle.x - radius).round() as i32,
                    (particle.y - radius).round() as i32,
                );
            } else {
                surface.fill_circle(particle.x, particle.y, radius, PARTICLE_COLOR);
            }
        }
    }

    /// The drawing surface, for presentation by the shell.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Current particle collection.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Current configuration.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Sprite ownership selected at the last reset.
    pub fn sprite_strategy(&self) -> &SpriteStrategy {
        &self.strategy
    }
}

/// Seed drawn from the system clock, different each program execution.
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sched::ManualScheduler;
    use crate::surface::PixelSurface;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    fn quiet_scene(config: SceneConfig) -> Scene<PixelSurface> {
        Scene::with_config(
            PixelSurface::new(800, 500),
            config,
            Box::new(ManualScheduler::new()),
            Box::new(|_| {}),
        )
    }

    #[test]
    fn test_spawn_positions_satisfy_invariant() {
        let scene = quiet_scene(SceneConfig::default());
        assert_eq!(scene.particles().len(), 1000);
        for p in scene.particles() {
            assert!(p.x >= 5.0 && p.x <= 795.0, "x = {}", p.x);
            assert!(p.y >= 5.0 && p.y <= 495.0, "y = {}", p.y);
            assert!(!p.rising);
        }
    }

    #[test]
    fn test_direct_mode_draws_eagerly_at_spawn() {
        let scene = quiet_scene(SceneConfig {
            particle_count: 50,
            ..Default::default()
        });
        // No tick has run yet, but the surface must not be blank.
        let inked = scene
            .surface()
            .data()
            .chunks_exact(4)
            .any(|px| px == &PARTICLE_COLOR);
        assert!(inked);
    }

    #[test]
    fn test_offscreen_mode_defers_drawing_to_first_tick() {
        let mut scene = quiet_scene(SceneConfig {
            particle_count: 50,
            offscreen_rendering: true,
            ..Default::default()
        });
        scene.tick();
        let inked = scene
            .surface()
            .data()
            .chunks_exact(4)
            .any(|px| px == &PARTICLE_COLOR);
        assert!(inked);
    }

    #[test]
    fn test_fps_report_reaches_sink() {
        let reports: Rc<RefCell<Vec<u32>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = reports.clone();

        let mut scene = Scene::with_config(
            PixelSurface::new(100, 100),
            SceneConfig {
                particle_count: 3,
                ..Default::default()
            },
            Box::new(ManualScheduler::new()),
            Box::new(move |frames| sink.borrow_mut().push(frames)),
        );

        // Re-anchor the FPS window on a known instant, then drive the loop
        // with a simulated clock.
        let t0 = Instant::now();
        scene.fps = FpsCounter::new(t0);

        for i in 0..37 {
            scene.tick_at(t0 + Duration::from_millis(i * 25));
        }
        assert!(reports.borrow().is_empty());

        scene.tick_at(t0 + Duration::from_millis(1000));
        assert_eq!(*reports.borrow(), vec![37]);
    }

    #[test]
    fn test_tick_without_pending_handle_is_ignored() {
        let mut scene = quiet_scene(SceneConfig {
            particle_count: 10,
            ..Default::default()
        });
        scene.stop();

        let before: Vec<_> = scene.particles().to_vec();
        scene.tick();
        assert_eq!(scene.particles(), &before[..]);
        assert!(!scene.is_running());
    }

    #[test]
    fn test_tiny_surface_spawns_at_midpoint() {
        let scene = Scene::with_config(
            PixelSurface::new(8, 8),
            SceneConfig {
                particle_count: 4,
                particle_radius: 5.0,
                ..Default::default()
            },
            Box::new(ManualScheduler::new()),
            Box::new(|_| {}),
        );
        for p in scene.particles() {
            assert_eq!((p.x, p.y), (4.0, 4.0));
        }
    }
}
