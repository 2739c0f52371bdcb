use crate::builder::NucleonKind;
use crate::orbit::Ellipse;
use crate::stage::AtomId;
use bevy::prelude::*;

/// Root of one atom's subtree; its uniform scale is the transition scale.
#[derive(Component, Debug, Clone, Copy)]
pub struct AtomRoot(pub AtomId);

/// Container of an atom's nucleons; spins slowly around its Y axis.
#[derive(Component, Debug, Default)]
pub struct Nucleus;

#[derive(Component, Debug, Clone, Copy)]
pub struct Electron {
    pub orbit: Ellipse,
    pub progress: f32,
    pub speed: f32,
}

/// What a scene node is, so opacity rules can match on it instead of probing.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderNode {
    Particle(ParticleKind),
    OrbitLine,
    Group,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Proton,
    Neutron,
    Electron,
}

impl From<NucleonKind> for ParticleKind {
    fn from(kind: NucleonKind) -> Self {
        match kind {
            NucleonKind::Proton => ParticleKind::Proton,
            NucleonKind::Neutron => ParticleKind::Neutron,
        }
    }
}

impl RenderNode {
    /// Material opacity for this node when its atom is at `opacity`.
    pub fn opacity(&self, opacity: f32, orbit_line_factor: f32) -> Option<f32> {
        match self {
            RenderNode::Particle(_) => Some(opacity),
            RenderNode::OrbitLine => Some(opacity * orbit_line_factor),
            RenderNode::Group => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbit_lines_stay_fainter_than_particles() {
        let particle = RenderNode::Particle(ParticleKind::Electron).opacity(0.8, 0.25);
        let line = RenderNode::OrbitLine.opacity(0.8, 0.25);
        assert_eq!(particle, Some(0.8));
        assert_eq!(line, Some(0.2));
        assert_eq!(RenderNode::Group.opacity(0.8, 0.25), None);
    }
}
