// src/spawning.rs

use crate::animation::Appearance;
use crate::builder::AtomBlueprint;
use crate::components::*;
use crate::config::ViewerConfig;
use crate::orbit::Ellipse;
use crate::resources::{AtomAssets, SharedAssetHandles, SpawnedAtom};
use crate::spawning_utils::{orbit_line_material, particle_material, set_opacity};
use crate::stage::AtomId;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;

pub fn orbit_line_mesh(orbit: &Ellipse, segments: usize) -> Mesh {
    let points: Vec<[f32; 3]> = orbit
        .polyline(segments)
        .into_iter()
        .map(|p| p.to_array())
        .collect();
    Mesh::new(PrimitiveTopology::LineStrip, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, points)
}

/// Spawns the entity tree for `blueprint` and returns the handles it owns.
///
/// Layout: root (scale = transition scale) -> nucleus -> nucleons, and
/// root -> orbit line (shell rotation) -> electrons.
#[allow(clippy::too_many_arguments)]
pub fn spawn_atom(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    shared: &SharedAssetHandles,
    config: &ViewerConfig,
    atom: AtomId,
    blueprint: &AtomBlueprint,
    appearance: Appearance,
) -> SpawnedAtom {
    let orbit_factor = config.render.orbit_line_opacity;
    let mut assets = AtomAssets::default();

    let mut add_material = |node: RenderNode, mut material: StandardMaterial| {
        if let Some(alpha) = node.opacity(appearance.opacity, orbit_factor) {
            set_opacity(&mut material, alpha);
        }
        let handle = materials.add(material);
        assets.materials.push((node, handle.clone()));
        handle
    };
    let particle = |kind| (RenderNode::Particle(kind), particle_material(kind));
    let (node, material) = particle(ParticleKind::Proton);
    let proton_material = add_material(node, material);
    let (node, material) = particle(ParticleKind::Neutron);
    let neutron_material = add_material(node, material);
    let (node, material) = particle(ParticleKind::Electron);
    let electron_material = add_material(node, material);
    let orbit_material = add_material(RenderNode::OrbitLine, orbit_line_material());

    let line_meshes: Vec<Handle<Mesh>> = blueprint
        .shells
        .iter()
        .map(|shell| meshes.add(orbit_line_mesh(&shell.orbit, config.layout.orbit_segments)))
        .collect();
    assets.meshes.extend(line_meshes.iter().cloned());

    let root = commands
        .spawn((
            AtomRoot(atom),
            RenderNode::Group,
            Name::new(format!("{} atom", blueprint.element.name)),
            Transform::from_scale(Vec3::splat(appearance.scale)),
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Nucleus,
                    RenderNode::Group,
                    Transform::default(),
                    Visibility::default(),
                ))
                .with_children(|nucleus| {
                    for nucleon in &blueprint.nucleons {
                        let kind = ParticleKind::from(nucleon.kind);
                        let material = match kind {
                            ParticleKind::Proton => proton_material.clone(),
                            _ => neutron_material.clone(),
                        };
                        nucleus.spawn((
                            RenderNode::Particle(kind),
                            Mesh3d(shared.nucleon_mesh.clone()),
                            MeshMaterial3d(material),
                            Transform::from_translation(nucleon.offset),
                        ));
                    }
                });

            for (shell, line_mesh) in blueprint.shells.iter().zip(&line_meshes) {
                parent
                    .spawn((
                        RenderNode::OrbitLine,
                        Name::new(format!("Shell {}", shell.index)),
                        Mesh3d(line_mesh.clone()),
                        MeshMaterial3d(orbit_material.clone()),
                        Transform::from_rotation(shell.rotation),
                    ))
                    .with_children(|orbit| {
                        for electron in &shell.electrons {
                            orbit.spawn((
                                Electron {
                                    orbit: shell.orbit,
                                    progress: electron.progress,
                                    speed: electron.speed,
                                },
                                RenderNode::Particle(ParticleKind::Electron),
                                Mesh3d(shared.electron_mesh.clone()),
                                MeshMaterial3d(electron_material.clone()),
                                Transform::from_translation(shell.orbit.point_at(electron.progress)),
                            ));
                        }
                    });
            }
        })
        .id();

    SpawnedAtom { root, assets }
}

/// Writes `opacity` into every material the atom owns.
pub fn apply_opacity(
    assets: &AtomAssets,
    materials: &mut Assets<StandardMaterial>,
    opacity: f32,
    orbit_line_factor: f32,
) {
    for (node, handle) in &assets.materials {
        let Some(alpha) = node.opacity(opacity, orbit_line_factor) else {
            continue;
        };
        match materials.get_mut(handle) {
            Some(material) => set_opacity(material, alpha),
            None => warn!("Material {:?} missing while fading atom", handle.id()),
        }
    }
}

/// Frees the atom's meshes and materials, then detaches its tree.
pub fn release_atom(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    spawned: SpawnedAtom,
) {
    for (_, handle) in &spawned.assets.materials {
        materials.remove(handle);
    }
    for handle in &spawned.assets.meshes {
        meshes.remove(handle);
    }
    commands.entity(spawned.root).despawn();
}
