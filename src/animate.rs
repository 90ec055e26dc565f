/*
    YearWheel
    https://github.com/yearwheel/yearwheel

    Copyright 2025 YearWheel AB

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------
*/

//! The rotation animation loop. Rotation is a pure display offset (the date
//! mapping never changes), so the animator is just an elapsed-time
//! accumulator the host ticks once per frame and can cancel at any point
//! with no effect on data correctness.

use std::time::Duration;

use web_time::Instant;

/// Default rotation speed in radians per second.
pub const DEFAULT_ROTATION_SPEED: f32 = 0.15;

#[derive(Clone, Debug)]
pub struct RotationAnimator {
    speed: f32,
    offset_deg: f32,
    last_tick: Option<Instant>,
}

impl Default for RotationAnimator {
    fn default() -> Self {
        RotationAnimator::new()
    }
}

impl RotationAnimator {
    pub fn new() -> RotationAnimator {
        RotationAnimator {
            speed: DEFAULT_ROTATION_SPEED,
            offset_deg: 0.0,
            last_tick: None,
        }
    }

    /// Rotation speed in radians per second.
    pub fn with_speed(mut self, speed: f32) -> RotationAnimator {
        self.speed = speed;
        self
    }

    pub fn is_running(&self) -> bool {
        self.last_tick.is_some()
    }

    /// Current accumulated rotation offset in degrees.
    pub fn offset_deg(&self) -> f32 {
        self.offset_deg
    }

    pub fn set_offset_deg(&mut self, offset_deg: f32) {
        self.offset_deg = offset_deg;
    }

    pub fn start(&mut self) {
        self.last_tick = Some(Instant::now());
    }

    /// Stop the loop, keeping the current offset.
    pub fn cancel(&mut self) {
        self.last_tick = None;
    }

    /// Per-frame callback: read elapsed time, advance the offset, return it.
    /// A no-op while cancelled.
    pub fn tick(&mut self) -> f32 {
        if let Some(last) = self.last_tick {
            let now = Instant::now();
            self.advance(now - last);
            self.last_tick = Some(now);
        }
        self.offset_deg
    }

    /// Advance by an explicit elapsed duration.
    pub fn advance(&mut self, elapsed: Duration) -> f32 {
        self.offset_deg += (self.speed * elapsed.as_secs_f32()).to_degrees();
        self.offset_deg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates_at_the_configured_speed() {
        let mut animator = RotationAnimator::new().with_speed(1.0);
        animator.advance(Duration::from_secs(1));
        assert!((animator.offset_deg() - 1.0f32.to_degrees()).abs() < 1e-3);
        animator.advance(Duration::from_secs(1));
        assert!((animator.offset_deg() - 2.0f32.to_degrees()).abs() < 1e-3);
    }

    #[test]
    fn cancel_freezes_the_offset() {
        let mut animator = RotationAnimator::new();
        animator.start();
        assert!(animator.is_running());
        animator.cancel();
        let frozen = animator.offset_deg();
        assert_eq!(animator.tick(), frozen);
        assert!(!animator.is_running());
    }
}
