//! Time-based scale/opacity animations for atom transitions.

/// Overshoot constant of the "back" easing family.
const BACK_OVERSHOOT: f32 = 1.70158;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Pulls back slightly before accelerating toward the target.
    BackIn,
    /// Overshoots the target and settles back onto it.
    BackOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let s = BACK_OVERSHOOT;
        match self {
            Self::Linear => t,
            Self::BackIn => t * t * ((s + 1.0) * t - s),
            Self::BackOut => {
                let u = t - 1.0;
                u * u * ((s + 1.0) * u + s) + 1.0
            }
        }
    }
}

/// Uniform scale and material opacity of a whole atom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub scale: f32,
    pub opacity: f32,
}

impl Appearance {
    pub const VISIBLE: Self = Self {
        scale: 1.0,
        opacity: 1.0,
    };
    pub const VANISHED: Self = Self {
        scale: 0.1,
        opacity: 0.0,
    };

    pub fn lerp(self, to: Self, t: f32) -> Self {
        Self {
            scale: self.scale + (to.scale - self.scale) * t,
            opacity: self.opacity + (to.opacity - self.opacity) * t,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    /// Shrink and fade; the atom is released when it completes.
    Outgoing,
    /// Grow and fade in; the atom becomes fully visible when it completes.
    Incoming,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    pub appearance: Appearance,
    pub finished: bool,
}

#[derive(Debug, Clone)]
pub struct Animation {
    pub kind: AnimationKind,
    pub start_secs: f32,
    pub duration_secs: f32,
    pub easing: Easing,
    pub from: Appearance,
    pub to: Appearance,
}

impl Animation {
    pub fn outgoing(from: Appearance, start_secs: f32, duration_secs: f32) -> Self {
        Self {
            kind: AnimationKind::Outgoing,
            start_secs,
            duration_secs,
            easing: Easing::BackIn,
            from,
            to: Appearance::VANISHED,
        }
    }

    pub fn incoming(start_secs: f32, duration_secs: f32) -> Self {
        Self {
            kind: AnimationKind::Incoming,
            start_secs,
            duration_secs,
            easing: Easing::BackOut,
            from: Appearance::VANISHED,
            to: Appearance::VISIBLE,
        }
    }

    /// Samples the animation at absolute time `now_secs`.
    pub fn sample(&self, now_secs: f32) -> AnimationFrame {
        let elapsed = (now_secs - self.start_secs).max(0.0);
        let finished = self.duration_secs <= 0.0 || elapsed >= self.duration_secs;
        if finished {
            return AnimationFrame {
                appearance: self.to,
                finished,
            };
        }
        let eased = self.easing.apply(elapsed / self.duration_secs);
        let mut appearance = self.from.lerp(self.to, eased);
        // Overshoot may push opacity outside the valid range; scale is left to overshoot.
        appearance.opacity = appearance.opacity.clamp(0.0, 1.0);
        AnimationFrame {
            appearance,
            finished,
        }
    }
}
