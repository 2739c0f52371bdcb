use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws in `[0, 1)` used for procedural atom layout.
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

#[derive(Resource, Deref, DerefMut)]
pub struct AtomRng(pub StdRng);

impl AtomRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => {
                info!("Seeding atom layout RNG with {}", seed);
                Self(StdRng::seed_from_u64(seed))
            }
            None => Self(StdRng::from_os_rng()),
        }
    }
}
