//! Pre-rasterized particle sprite.
//!
//! A [`Sprite`] is a square RGBA bitmap of side `2 * radius` holding one
//! filled circle, rasterized once at construction and immutable afterwards.
//! Blitting copies the cached bitmap instead of re-rasterizing the circle,
//! which is the whole trade the offscreen rendering mode makes: pay the
//! rasterization cost once, then do plain pixel copies every frame.
//!
//! The sprite is stateless with respect to position; the target coordinates
//! are supplied at blit time and name the bitmap's top-left corner. Callers
//! that track circle centers (the scene engine does) blit at
//! `(x - radius, y - radius)`.

use crate::surface::{DrawSurface, Rgba};

/// An immutable, pre-rendered circle bitmap.
#[derive(Debug, Clone)]
pub struct Sprite {
    side: u32,
    data: Vec<u8>,
}

impl Sprite {
    /// Rasterize a filled circle of the given radius and color into a fresh
    /// square bitmap of side `2 * radius`. Pixels outside the circle stay
    /// fully transparent so blitting does not stamp square corners.
    pub fn new(radius: f32, color: Rgba) -> Self {
        let side = (radius * 2.0).ceil().max(1.0) as u32;
        let mut data = vec![0u8; (side * side * 4) as usize];
        let r_sq = radius * radius;

        for y in 0..side {
            for x in 0..side {
                // Same pixel-center coverage test as direct circle drawing,
                // so a blit at (cx - r, cy - r) matches fill_circle(cx, cy, r)
                // exactly at integer positions.
                let dx = x as f32 + 0.5 - radius;
                let dy = y as f32 + 0.5 - radius;
                if dx * dx + dy * dy <= r_sq {
                    let idx = ((y * side + x) * 4) as usize;
                    data[idx..idx + 4].copy_from_slice(&color);
                }
            }
        }

        Self { side, data }
    }

    /// Bitmap side length in pixels (`2 * radius`, rounded up).
    #[inline]
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Raw RGBA bitmap, row-major, 4 bytes per pixel.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Copy the bitmap onto `surface` with its top-left corner at `(x, y)`.
    pub fn blit<S: DrawSurface>(&self, surface: &mut S, x: i32, y: i32) {
        surface.blit(self, x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{PixelSurface, BACKGROUND};

    const INK: Rgba = [0, 0, 0, 255];

    #[test]
    fn test_sprite_dimensions() {
        assert_eq!(Sprite::new(5.0, INK).side(), 10);
        assert_eq!(Sprite::new(2.5, INK).side(), 5);
        // Degenerate radius still yields a usable bitmap.
        assert_eq!(Sprite::new(0.25, INK).side(), 1);
    }

    #[test]
    fn test_sprite_center_filled_corners_transparent() {
        let sprite = Sprite::new(4.0, INK);
        let side = sprite.side() as usize;
        let center = ((side / 2) * side + side / 2) * 4;
        assert_eq!(sprite.data()[center + 3], 255);
        // Corner pixel lies outside the inscribed circle.
        assert_eq!(sprite.data()[3], 0);
        assert_eq!(sprite.data()[(side * side - 1) * 4 + 3], 0);
    }

    #[test]
    fn test_blit_matches_direct_draw_at_integer_positions() {
        let radius = 5.0;
        let (cx, cy) = (17.0, 11.0);

        let mut direct = PixelSurface::new(40, 30);
        direct.fill_circle(cx, cy, radius, INK);

        let mut blitted = PixelSurface::new(40, 30);
        let sprite = Sprite::new(radius, INK);
        sprite.blit(
            &mut blitted,
            (cx - radius) as i32,
            (cy - radius) as i32,
        );

        assert_eq!(direct.data(), blitted.data());
    }

    #[test]
    fn test_blit_leaves_background_outside_circle() {
        let mut surface = PixelSurface::new(20, 20);
        let sprite = Sprite::new(4.0, INK);
        sprite.blit(&mut surface, 6, 6);
        // Transparent sprite corners must not overwrite the background.
        assert_eq!(surface.pixel(6, 6), BACKGROUND);
        assert_eq!(surface.pixel(10, 10), INK);
    }
}
