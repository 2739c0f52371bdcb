// src/catalog.rs

use crate::error::AtomError;

/// Particle counts and shell occupancy for one supported element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSpec {
    pub name: &'static str,
    pub protons: u32,
    pub neutrons: u32,
    pub shells: &'static [u32],
}

impl ElementSpec {
    pub fn atomic_number(&self) -> u32 {
        self.protons
    }

    pub fn electron_count(&self) -> u32 {
        self.shells.iter().sum()
    }

    pub fn nucleon_count(&self) -> u32 {
        self.protons + self.neutrons
    }
}

pub const DEFAULT_ELEMENT: &str = "Helium";

/// The fixed element table, in dropdown order.
pub static ELEMENTS: [ElementSpec; 10] = [
    element("Hydrogen", 1, 0, &[1]),
    element("Helium", 2, 2, &[2]),
    element("Lithium", 3, 4, &[2, 1]),
    element("Beryllium", 4, 5, &[2, 2]),
    element("Boron", 5, 6, &[2, 3]),
    element("Carbon", 6, 6, &[2, 4]),
    element("Nitrogen", 7, 7, &[2, 5]),
    element("Oxygen", 8, 8, &[2, 6]),
    element("Fluorine", 9, 10, &[2, 7]),
    element("Neon", 10, 10, &[2, 8]),
];

const fn element(
    name: &'static str,
    protons: u32,
    neutrons: u32,
    shells: &'static [u32],
) -> ElementSpec {
    ElementSpec {
        name,
        protons,
        neutrons,
        shells,
    }
}

pub fn lookup(name: &str) -> Result<&'static ElementSpec, AtomError> {
    ELEMENTS
        .iter()
        .find(|spec| spec.name == name)
        .ok_or_else(|| AtomError::UnknownElement(name.to_string()))
}

/// Returns the element `step` positions away from `name`, wrapping around the table.
pub fn cycle(name: &str, step: i32) -> &'static ElementSpec {
    let len = ELEMENTS.len() as i32;
    let index = ELEMENTS
        .iter()
        .position(|spec| spec.name == name)
        .map(|i| i as i32)
        .unwrap_or(0);
    &ELEMENTS[(index + step).rem_euclid(len) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neon_has_ten_electrons_in_two_shells() {
        let neon = lookup("Neon").unwrap();
        assert_eq!(neon.protons, 10);
        assert_eq!(neon.neutrons, 10);
        assert_eq!(neon.shells, &[2, 8]);
        assert_eq!(neon.electron_count(), 10);
    }

    #[test]
    fn unknown_name_is_rejected() {
        match lookup("Unobtainium") {
            Err(AtomError::UnknownElement(name)) => assert_eq!(name, "Unobtainium"),
            other => panic!("expected UnknownElement, got {other:?}"),
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(lookup("helium").is_err());
        assert!(lookup(DEFAULT_ELEMENT).is_ok());
    }

    #[test]
    fn every_element_is_neutral_with_non_empty_shells() {
        for spec in &ELEMENTS {
            assert!(!spec.shells.is_empty(), "{} has no shells", spec.name);
            assert_eq!(spec.electron_count(), spec.atomic_number(), "{}", spec.name);
        }
    }

    #[test]
    fn cycling_wraps_in_both_directions() {
        assert_eq!(cycle("Neon", 1).name, "Hydrogen");
        assert_eq!(cycle("Hydrogen", -1).name, "Neon");
        assert_eq!(cycle("Carbon", 1).name, "Nitrogen");
    }
}
