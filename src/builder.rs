//! Procedural layout of an atom from its catalog entry.
//!
//! The builder produces a plain-data [`AtomBlueprint`]; turning that into
//! entities and GPU assets is the job of `spawning`.

use crate::catalog::{self, ElementSpec};
use crate::config::LayoutConfig;
use crate::error::AtomError;
use crate::orbit::{Ellipse, shell_speed};
use crate::random::RandomSource;
use bevy::prelude::*;
use std::f32::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NucleonKind {
    Proton,
    Neutron,
}

#[derive(Debug, Clone, Copy)]
pub struct NucleonBlueprint {
    pub kind: NucleonKind,
    pub offset: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElectronBlueprint {
    pub progress: f32,
    pub speed: f32,
}

#[derive(Debug, Clone)]
pub struct ShellBlueprint {
    pub index: usize,
    pub orbit: Ellipse,
    pub rotation: Quat,
    pub electrons: Vec<ElectronBlueprint>,
}

#[derive(Debug, Clone)]
pub struct AtomBlueprint {
    pub element: &'static ElementSpec,
    pub nucleons: Vec<NucleonBlueprint>,
    pub shells: Vec<ShellBlueprint>,
}

impl AtomBlueprint {
    pub fn electron_count(&self) -> usize {
        self.shells.iter().map(|s| s.electrons.len()).sum()
    }
}

/// Lays out nucleus and shells for `element`.
///
/// Nucleons are scattered uniformly in a cube of side `protons * nucleus_spread`.
/// This is a deliberately crude stand-in for real nuclear packing.
pub fn build(
    element: &'static ElementSpec,
    rng: &mut impl RandomSource,
    layout: &LayoutConfig,
) -> AtomBlueprint {
    let side = element.protons as f32 * layout.nucleus_spread;
    let kinds = std::iter::repeat_n(NucleonKind::Proton, element.protons as usize)
        .chain(std::iter::repeat_n(NucleonKind::Neutron, element.neutrons as usize));
    let nucleons = kinds
        .map(|kind| {
            let unit = Vec3::new(rng.next_unit(), rng.next_unit(), rng.next_unit());
            NucleonBlueprint {
                kind,
                offset: (unit - Vec3::splat(0.5)) * side,
            }
        })
        .collect();

    let shells = element
        .shells
        .iter()
        .enumerate()
        .map(|(index, &occupancy)| build_shell(index, occupancy, rng, layout))
        .collect();

    AtomBlueprint {
        element,
        nucleons,
        shells,
    }
}

/// Looks `name` up in the catalog and builds it.
pub fn build_named(
    name: &str,
    rng: &mut impl RandomSource,
    layout: &LayoutConfig,
) -> Result<AtomBlueprint, AtomError> {
    let element = catalog::lookup(name)?;
    Ok(build(element, rng, layout))
}

fn build_shell(
    index: usize,
    occupancy: u32,
    rng: &mut impl RandomSource,
    layout: &LayoutConfig,
) -> ShellBlueprint {
    let radius_x = layout.base_radius + index as f32 * layout.radius_spacing;
    let radius_y =
        radius_x * (layout.eccentricity_min + rng.next_unit() * layout.eccentricity_range);
    let rotation = Quat::from_euler(
        EulerRot::XYZ,
        rng.next_unit() * PI,
        rng.next_unit() * PI,
        rng.next_unit() * PI,
    );
    let speed = shell_speed(index);
    let electrons = (0..occupancy)
        .map(|_| ElectronBlueprint {
            progress: rng.next_unit(),
            speed,
        })
        .collect();

    ShellBlueprint {
        index,
        orbit: Ellipse { radius_x, radius_y },
        rotation,
        electrons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ELEMENTS;
    use crate::random::AtomRng;
    use crate::random::testing::SequenceSource;

    #[test]
    fn particle_counts_match_catalog_for_every_element() {
        let mut rng = AtomRng::new(Some(7));
        let layout = LayoutConfig::default();
        for spec in &ELEMENTS {
            let atom = build(spec, &mut *rng, &layout);
            let protons = atom
                .nucleons
                .iter()
                .filter(|n| n.kind == NucleonKind::Proton)
                .count();
            assert_eq!(protons, spec.protons as usize, "{}", spec.name);
            assert_eq!(atom.nucleons.len(), spec.nucleon_count() as usize);
            assert_eq!(atom.shells.len(), spec.shells.len());
            for (shell, &occupancy) in atom.shells.iter().zip(spec.shells) {
                assert_eq!(shell.electrons.len(), occupancy as usize);
            }
            assert_eq!(atom.electron_count(), spec.electron_count() as usize);
        }
    }

    #[test]
    fn shell_geometry_follows_layout() {
        let layout = LayoutConfig::default();
        let mut rng = SequenceSource::new(&[0.5]);
        let atom = build_named("Carbon", &mut rng, &layout).unwrap();

        let inner = &atom.shells[0];
        let outer = &atom.shells[1];
        assert_eq!(inner.orbit.radius_x, 4.0);
        assert_eq!(outer.orbit.radius_x, 7.0);
        assert!((inner.orbit.radius_y - 4.0 * 0.85).abs() < 1e-5);
        assert!(outer.electrons.iter().all(|e| e.speed < inner.electrons[0].speed));
        assert!((inner.electrons[0].speed - 0.4).abs() < 1e-6);
    }

    #[test]
    fn eccentricity_stays_in_range() {
        let layout = LayoutConfig::default();
        let mut rng = SequenceSource::new(&[0.01, 0.99]);
        for _ in 0..4 {
            let atom = build_named("Neon", &mut rng, &layout).unwrap();
            for shell in &atom.shells {
                let ratio = shell.orbit.radius_y / shell.orbit.radius_x;
                assert!((0.8..0.9).contains(&ratio), "ratio {ratio}");
            }
        }
    }

    #[test]
    fn nucleons_stay_inside_cube() {
        let layout = LayoutConfig::default();
        let mut rng = AtomRng::new(Some(3));
        let atom = build_named("Fluorine", &mut *rng, &layout).unwrap();
        let half = 9.0 * 0.2 / 2.0;
        for n in &atom.nucleons {
            assert!(n.offset.abs().max_element() <= half + 1e-5);
        }
    }

    #[test]
    fn electrons_start_desynchronized() {
        let layout = LayoutConfig::default();
        let mut rng = AtomRng::new(Some(11));
        let atom = build_named("Neon", &mut *rng, &layout).unwrap();
        let outer = &atom.shells[1].electrons;
        assert!(outer.iter().all(|e| (0.0..1.0).contains(&e.progress)));
        assert!(outer.windows(2).any(|w| w[0].progress != w[1].progress));
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let layout = LayoutConfig::default();
        let a = build_named("Oxygen", &mut *AtomRng::new(Some(5)), &layout).unwrap();
        let b = build_named("Oxygen", &mut *AtomRng::new(Some(5)), &layout).unwrap();
        assert_eq!(a.shells[1].rotation, b.shells[1].rotation);
        assert_eq!(a.nucleons[3].offset, b.nucleons[3].offset);
    }

    #[test]
    fn unknown_element_builds_nothing() {
        let layout = LayoutConfig::default();
        let mut rng = SequenceSource::new(&[0.5]);
        assert!(matches!(
            build_named("Unobtainium", &mut rng, &layout),
            Err(AtomError::UnknownElement(_))
        ));
    }
}
