//! Particle state and the vertical reflection bounce.

/// One animated particle.
///
/// `x` is fixed after spawn; `y` moves by the scene's speed every frame.
/// `rising` is set the moment the particle touches its lower bound and
/// cleared when it touches its upper bound, so the particle shuttles
/// between the two forever.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Center x coordinate in pixels.
    pub x: f32,
    /// Center y coordinate in pixels.
    pub y: f32,
    /// True while travelling upward (lower bound was reached).
    pub rising: bool,
}

impl Particle {
    /// Spawn at `(x, y)`, initially falling.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            rising: false,
        }
    }

    /// Advance one frame: move `speed` pixels in the current direction and
    /// reflect off `top` / `bottom`. Overshoot is clamped exactly onto the
    /// bound, so `top <= y <= bottom` holds after every step and the
    /// particle is never left stuck past an edge.
    pub fn step(&mut self, speed: f32, top: f32, bottom: f32) {
        if self.rising {
            self.y -= speed;
            if self.y <= top {
                self.y = top;
                self.rising = false;
            }
        } else {
            self.y += speed;
            if self.y >= bottom {
                self.y = bottom;
                self.rising = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falls_then_reflects_at_bottom() {
        let mut p = Particle::new(10.0, 480.0);
        p.step(10.0, 5.0, 495.0);
        assert_eq!(p.y, 490.0);
        assert!(!p.rising);

        // Next step would land on 500; it must clamp to the bound and flip.
        p.step(10.0, 5.0, 495.0);
        assert_eq!(p.y, 495.0);
        assert!(p.rising);
    }

    #[test]
    fn test_rises_then_reflects_at_top() {
        let mut p = Particle {
            x: 0.0,
            y: 12.0,
            rising: true,
        };
        p.step(10.0, 5.0, 495.0);
        assert_eq!(p.y, 5.0);
        assert!(!p.rising);
    }

    #[test]
    fn test_exact_landing_on_bound_flips() {
        let mut p = Particle::new(0.0, 485.0);
        p.step(10.0, 5.0, 495.0);
        assert_eq!(p.y, 495.0);
        assert!(p.rising);
    }

    #[test]
    fn test_never_escapes_bounds() {
        let mut p = Particle::new(0.0, 7.0);
        for _ in 0..1000 {
            p.step(13.0, 5.0, 495.0);
            assert!(p.y >= 5.0 && p.y <= 495.0, "y = {}", p.y);
        }
    }
}
