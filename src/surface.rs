//! Drawing surface abstraction and a CPU framebuffer implementation.
//!
//! The engine only ever talks to a [`DrawSurface`]: a fixed-size pixel
//! target that can be cleared, have filled circles rasterized into it, and
//! have pre-rendered sprites blitted onto it. [`PixelSurface`] is the
//! in-memory RGBA8 implementation used by both the windowed shell and the
//! headless tests/benchmarks.

use crate::sprite::Sprite;

/// RGBA color, 8 bits per channel.
pub type Rgba = [u8; 4];

/// Surface clear color (opaque white).
pub const BACKGROUND: Rgba = [255, 255, 255, 255];

/// A fixed-size pixel target the scene engine renders into.
///
/// Implementations are expected to clip out-of-bounds writes rather than
/// panic; the engine itself keeps particles in bounds, but blit positions
/// may graze the edges.
pub trait DrawSurface {
    /// Surface width in pixels.
    fn width(&self) -> u32;

    /// Surface height in pixels.
    fn height(&self) -> u32;

    /// Fill the entire surface with one color.
    fn clear(&mut self, color: Rgba);

    /// Rasterize a filled circle centered at `(cx, cy)`.
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba);

    /// Copy a sprite's bitmap so its top-left corner lands at `(x, y)`.
    /// Fully transparent sprite pixels are skipped.
    fn blit(&mut self, sprite: &Sprite, x: i32, y: i32);
}

/// CPU-side RGBA8 framebuffer.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelSurface {
    /// Create a surface of the given dimensions, filled with [`BACKGROUND`].
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "surface dimensions must be nonzero");
        let mut surface = Self {
            width,
            height,
            data: vec![0; (width * height * 4) as usize],
        };
        surface.clear(BACKGROUND);
        surface
    }

    /// Raw RGBA pixel data, row-major, 4 bytes per pixel.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Read one pixel. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        assert!(x < self.width && y < self.height);
        let idx = ((y * self.width + x) * 4) as usize;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    #[inline]
    fn put(&mut self, x: u32, y: u32, color: Rgba) {
        let idx = ((y * self.width + x) * 4) as usize;
        self.data[idx..idx + 4].copy_from_slice(&color);
    }
}

impl DrawSurface for PixelSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, color: Rgba) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        let r_sq = radius * radius;

        // Bounding box clamped to the surface; float-to-u32 casts saturate,
        // so coordinates left of / above the surface clamp to 0.
        let min_x = (cx - radius).floor() as u32;
        let max_x = ((cx + radius).ceil() as u32).min(self.width.saturating_sub(1));
        let min_y = (cy - radius).floor() as u32;
        let max_y = ((cy + radius).ceil() as u32).min(self.height.saturating_sub(1));

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                // Test pixel centers for coverage.
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r_sq {
                    self.put(x, y, color);
                }
            }
        }
    }

    fn blit(&mut self, sprite: &Sprite, x: i32, y: i32) {
        let side = sprite.side() as i32;
        let data = sprite.data();

        for sy in 0..side {
            let py = y + sy;
            if py < 0 || py >= self.height as i32 {
                continue;
            }
            for sx in 0..side {
                let px = x + sx;
                if px < 0 || px >= self.width as i32 {
                    continue;
                }
                let src = ((sy * side + sx) * 4) as usize;
                if data[src + 3] == 0 {
                    continue;
                }
                self.put(
                    px as u32,
                    py as u32,
                    [data[src], data[src + 1], data[src + 2], data[src + 3]],
                );
            }
        }
    }
}
