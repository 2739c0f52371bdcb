// src/spawning_utils.rs

use crate::components::ParticleKind;
use bevy::prelude::*;

pub const NUCLEON_RADIUS: f32 = 0.5;
pub const ELECTRON_RADIUS: f32 = 0.2;

/// A pure function that returns the material for a given particle kind.
/// This is the single source of truth for particle visuals.
pub fn particle_material(kind: ParticleKind) -> StandardMaterial {
    let (color, emissive, metallic, roughness) = match kind {
        ParticleKind::Proton => (
            Color::srgb_u8(0xff, 0x88, 0x55),
            LinearRgba::from(Color::srgb_u8(0xff, 0x66, 0x22)) * 0.5,
            0.3,
            0.3,
        ),
        ParticleKind::Neutron => (Color::srgb_u8(0xcc, 0xcc, 0xcc), LinearRgba::BLACK, 0.2, 0.4),
        ParticleKind::Electron => (
            Color::srgb_u8(0x55, 0xaa, 0xff),
            LinearRgba::from(Color::srgb_u8(0x00, 0x88, 0xff)) * 2.0,
            0.5,
            0.2,
        ),
    };
    StandardMaterial {
        base_color: color,
        emissive,
        metallic,
        perceptual_roughness: roughness,
        alpha_mode: AlphaMode::Blend,
        ..default()
    }
}

pub fn orbit_line_material() -> StandardMaterial {
    StandardMaterial {
        base_color: Color::srgb_u8(0x44, 0x66, 0x88),
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        ..default()
    }
}

/// Sets the alpha of `material`, leaving its colour untouched.
pub fn set_opacity(material: &mut StandardMaterial, opacity: f32) {
    material.base_color.set_alpha(opacity.clamp(0.0, 1.0));
}
