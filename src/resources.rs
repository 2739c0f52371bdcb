use crate::catalog::{DEFAULT_ELEMENT, ElementSpec};
use crate::components::RenderNode;
use crate::stage::AtomId;
use bevy::prelude::*;
use std::collections::HashMap;

#[derive(Resource)]
pub struct SharedAssetHandles {
    pub nucleon_mesh: Handle<Mesh>,
    pub electron_mesh: Handle<Mesh>,
}

/// The element currently chosen in the selector.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct ElementSelection(pub String);

impl Default for ElementSelection {
    fn default() -> Self {
        Self(DEFAULT_ELEMENT.to_string())
    }
}

/// Fields shown in the info panel, written whenever an atom is built.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoPanel {
    pub name: String,
    pub atomic_number: u32,
    pub protons: u32,
    pub neutrons: u32,
    pub electrons: u32,
}

impl From<&ElementSpec> for InfoPanel {
    fn from(spec: &ElementSpec) -> Self {
        Self {
            name: spec.name.to_string(),
            atomic_number: spec.atomic_number(),
            protons: spec.protons,
            neutrons: spec.neutrons,
            electrons: spec.electron_count(),
        }
    }
}

/// GPU resources created for one atom and owned by it alone.
#[derive(Debug, Default)]
pub struct AtomAssets {
    pub materials: Vec<(RenderNode, Handle<StandardMaterial>)>,
    pub meshes: Vec<Handle<Mesh>>,
}

#[derive(Debug)]
pub struct SpawnedAtom {
    pub root: Entity,
    pub assets: AtomAssets,
}

#[derive(Resource, Default, Deref, DerefMut)]
pub struct SpawnedAtoms(pub HashMap<AtomId, SpawnedAtom>);
