//! Full-screen black overlay ramped one step per tick.

pub const FADE_SPEED: u8 = 5;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FadeDirection {
    /// Overlay clears, 255 -> 0.
    In,
    /// Overlay darkens, 0 -> 255.
    Out,
}

#[derive(Clone, Debug)]
pub struct FadeOverlay {
    alpha: u8,
    direction: FadeDirection,
    speed: u8,
    active: bool,
}

impl Default for FadeOverlay {
    fn default() -> Self {
        Self::new(FADE_SPEED)
    }
}

impl FadeOverlay {
    pub fn new(speed: u8) -> Self {
        Self {
            alpha: 255,
            direction: FadeDirection::In,
            speed,
            active: false,
        }
    }

    pub fn fade_in(&mut self) {
        self.alpha = 255;
        self.direction = FadeDirection::In;
        self.active = true;
    }

    pub fn fade_out(&mut self) {
        self.alpha = 0;
        self.direction = FadeDirection::Out;
        self.active = true;
    }

    /// Advances the ramp by one tick. Returns `true` on the single tick the
    /// ramp reaches its bound.
    pub fn step(&mut self) -> bool {
        if !self.active {
            return false;
        }
        let done = match self.direction {
            FadeDirection::In => {
                self.alpha = self.alpha.saturating_sub(self.speed);
                self.alpha == 0
            }
            FadeDirection::Out => {
                self.alpha = self.alpha.saturating_add(self.speed);
                self.alpha == u8::MAX
            }
        };
        if done {
            self.active = false;
        }
        done
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn opacity(&self) -> f32 {
        f32::from(self.alpha()) / 255.0
    }

    #[cfg(test)]
    pub fn direction(&self) -> FadeDirection {
        self.direction
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.active
    }
}
