//! Transition controller: which atoms exist, which is current, and how they
//! animate in and out.
//!
//! The stage is pure bookkeeping. Each call to [`AtomStage::advance`] returns
//! the [`StageEffect`]s the scene must apply for that frame; the stage never
//! touches entities or assets itself.

use crate::animation::{Animation, AnimationKind, Appearance};
use crate::catalog::{self, ElementSpec};
use crate::config::TimingConfig;
use crate::error::AtomError;
use bevy::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomPhase {
    Incoming,
    Current,
    Outgoing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionState {
    Idle,
    /// The previous atom is shrinking while the next build waits for its delay.
    OutgoingAnimating,
    /// A new atom was just constructed, or a build is due with nothing animating.
    Building,
    IncomingAnimating,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StageEffect {
    /// Construct `element` as a new atom, starting at `appearance`.
    Build {
        atom: AtomId,
        element: &'static ElementSpec,
        appearance: Appearance,
    },
    /// Apply `appearance` to `atom`; `kind` selects the per-node opacity rule.
    Appearance {
        atom: AtomId,
        appearance: Appearance,
        kind: AnimationKind,
    },
    /// Free every resource owned by `atom` and detach it. Emitted once per atom.
    Release { atom: AtomId },
}

#[derive(Debug, Clone)]
struct PendingBuild {
    due_secs: f32,
    element: &'static ElementSpec,
    animate: bool,
}

#[derive(Debug, Clone)]
struct StagedAtom {
    element: &'static ElementSpec,
    phase: AtomPhase,
    appearance: Appearance,
    animation: Option<Animation>,
    /// Built by the last `advance`; its incoming animation has not been sampled.
    fresh: bool,
}

#[derive(Resource, Debug, Default)]
pub struct AtomStage {
    timing: TimingConfig,
    next_id: u64,
    current: Option<AtomId>,
    atoms: HashMap<AtomId, StagedAtom>,
    pending: Vec<PendingBuild>,
}

impl AtomStage {
    pub fn new(timing: TimingConfig) -> Self {
        Self {
            timing,
            ..default()
        }
    }

    pub fn current(&self) -> Option<AtomId> {
        self.current
    }

    pub fn current_element(&self) -> Option<&'static ElementSpec> {
        self.current
            .and_then(|id| self.atoms.get(&id))
            .map(|atom| atom.element)
    }

    pub fn phase(&self, atom: AtomId) -> Option<AtomPhase> {
        self.atoms.get(&atom).map(|a| a.phase)
    }

    pub fn appearance(&self, atom: AtomId) -> Option<Appearance> {
        self.atoms.get(&atom).map(|a| a.appearance)
    }

    /// Number of atoms that still own scene resources.
    pub fn live_atoms(&self) -> usize {
        self.atoms.len()
    }

    pub fn state(&self) -> TransitionState {
        let animating = |kind: AnimationKind| {
            self.atoms
                .values()
                .any(|a| a.animation.as_ref().is_some_and(|anim| anim.kind == kind))
        };
        let incoming = animating(AnimationKind::Incoming);
        let outgoing = animating(AnimationKind::Outgoing);
        if self.atoms.values().any(|a| a.fresh) {
            TransitionState::Building
        } else if incoming {
            TransitionState::IncomingAnimating
        } else if outgoing {
            TransitionState::OutgoingAnimating
        } else if !self.pending.is_empty() {
            TransitionState::Building
        } else {
            TransitionState::Idle
        }
    }

    /// Schedules `name` to appear at `now_secs` without a transition.
    pub fn show(&mut self, name: &str, now_secs: f32) -> Result<(), AtomError> {
        let element = catalog::lookup(name)?;
        info!("Showing {} without transition", element.name);
        self.pending.push(PendingBuild {
            due_secs: now_secs,
            element,
            animate: false,
        });
        Ok(())
    }

    /// Starts a transition to `name`: the current atom begins shrinking now and
    /// the new atom is built after the configured delay.
    ///
    /// Unknown names leave the stage untouched.
    pub fn request(&mut self, name: &str, now_secs: f32) -> Result<(), AtomError> {
        let element = catalog::lookup(name)?;
        info!("Transition to {} requested", element.name);
        if let Some(current) = self.current.take() {
            self.send_outgoing(current, now_secs);
        }
        self.pending.push(PendingBuild {
            due_secs: now_secs + self.timing.build_delay_secs,
            element,
            animate: true,
        });
        Ok(())
    }

    /// Advances every animation and due build to `now_secs`.
    pub fn advance(&mut self, now_secs: f32) -> Vec<StageEffect> {
        let mut effects = Vec::new();

        // Animations created by builds below start at `now_secs`, so their
        // first sample would equal the build appearance; sample existing ones only.
        let mut ids: Vec<AtomId> = self.atoms.keys().copied().collect();
        ids.sort();
        for id in ids {
            let Some(atom) = self.atoms.get_mut(&id) else {
                continue;
            };
            let Some(animation) = &atom.animation else {
                continue;
            };
            let frame = animation.sample(now_secs);
            let kind = animation.kind;
            atom.appearance = frame.appearance;
            atom.fresh = false;
            effects.push(StageEffect::Appearance {
                atom: id,
                appearance: frame.appearance,
                kind,
            });
            if !frame.finished {
                continue;
            }
            match kind {
                AnimationKind::Incoming => {
                    atom.animation = None;
                    atom.phase = AtomPhase::Current;
                }
                AnimationKind::Outgoing => {
                    self.atoms.remove(&id);
                    info!("Releasing atom {:?}", id);
                    effects.push(StageEffect::Release { atom: id });
                }
            }
        }

        let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|p| p.due_secs <= now_secs);
        self.pending = waiting;
        for build in due {
            effects.push(self.build(build, now_secs));
        }

        effects
    }

    fn build(&mut self, build: PendingBuild, now_secs: f32) -> StageEffect {
        // A second request may have built an atom since this one was scheduled.
        if let Some(previous) = self.current.take() {
            self.send_outgoing(previous, now_secs);
        }
        let id = AtomId(self.next_id);
        self.next_id += 1;
        let (phase, appearance, animation) = if build.animate {
            (
                AtomPhase::Incoming,
                Appearance::VANISHED,
                Some(Animation::incoming(now_secs, self.timing.transition_secs)),
            )
        } else {
            (AtomPhase::Current, Appearance::VISIBLE, None)
        };
        self.atoms.insert(
            id,
            StagedAtom {
                element: build.element,
                phase,
                appearance,
                animation,
                fresh: build.animate,
            },
        );
        self.current = Some(id);
        info!("Building {} as atom {:?}", build.element.name, id);
        StageEffect::Build {
            atom: id,
            element: build.element,
            appearance,
        }
    }

    fn send_outgoing(&mut self, id: AtomId, now_secs: f32) {
        let Some(atom) = self.atoms.get_mut(&id) else {
            warn!("Atom {:?} vanished before it could transition out", id);
            return;
        };
        if atom.phase == AtomPhase::Outgoing {
            return;
        }
        atom.phase = AtomPhase::Outgoing;
        atom.fresh = false;
        atom.animation = Some(Animation::outgoing(
            atom.appearance,
            now_secs,
            self.timing.transition_secs,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn releases(effects: &[StageEffect]) -> Vec<AtomId> {
        effects
            .iter()
            .filter_map(|e| match e {
                StageEffect::Release { atom } => Some(*atom),
                _ => None,
            })
            .collect()
    }

    fn builds(effects: &[StageEffect]) -> Vec<(AtomId, &'static str)> {
        effects
            .iter()
            .filter_map(|e| match e {
                StageEffect::Build { atom, element, .. } => Some((*atom, element.name)),
                _ => None,
            })
            .collect()
    }

    fn helium_stage() -> (AtomStage, AtomId) {
        let mut stage = AtomStage::new(TimingConfig::default());
        stage.show("Helium", 0.0).unwrap();
        let effects = stage.advance(0.0);
        let built = builds(&effects);
        assert_eq!(built.len(), 1);
        assert_eq!(effects[0], StageEffect::Build {
            atom: built[0].0,
            element: catalog::lookup("Helium").unwrap(),
            appearance: Appearance::VISIBLE,
        });
        (stage, built[0].0)
    }

    #[test]
    fn initial_atom_appears_without_animation() {
        let (mut stage, helium) = helium_stage();
        assert_eq!(stage.current(), Some(helium));
        assert_eq!(stage.phase(helium), Some(AtomPhase::Current));
        assert_eq!(stage.state(), TransitionState::Idle);
        assert!(stage.advance(1.0).is_empty());
    }

    #[test]
    fn helium_to_carbon_end_to_end() {
        let (mut stage, helium) = helium_stage();
        stage.request("Carbon", 10.0).unwrap();
        assert_eq!(stage.state(), TransitionState::OutgoingAnimating);
        assert_eq!(stage.current(), None);

        // Outgoing animation is under way, nothing built yet.
        let effects = stage.advance(10.1);
        assert!(builds(&effects).is_empty());
        assert!(releases(&effects).is_empty());
        assert_ne!(stage.appearance(helium), Some(Appearance::VISIBLE));

        // Build fires at the fixed delay while Helium is still fading.
        let effects = stage.advance(10.25);
        let built = builds(&effects);
        assert_eq!(built.len(), 1);
        let (carbon, name) = built[0];
        assert_eq!(name, "Carbon");
        assert_eq!(stage.current(), Some(carbon));
        assert_eq!(stage.phase(helium), Some(AtomPhase::Outgoing));
        assert_eq!(stage.live_atoms(), 2);
        assert_eq!(stage.state(), TransitionState::Building);

        // Helium resources stay allocated until its shrink completes.
        let effects = stage.advance(10.49);
        assert!(releases(&effects).is_empty());
        assert_eq!(stage.state(), TransitionState::IncomingAnimating);
        assert!(stage.phase(helium).is_some());

        let effects = stage.advance(10.5);
        assert_eq!(releases(&effects), vec![helium]);
        assert_eq!(stage.live_atoms(), 1);

        // Never released twice.
        let effects = stage.advance(10.6);
        assert!(releases(&effects).is_empty());

        let effects = stage.advance(10.75);
        assert!(effects.contains(&StageEffect::Appearance {
            atom: carbon,
            appearance: Appearance::VISIBLE,
            kind: AnimationKind::Incoming,
        }));
        assert_eq!(stage.phase(carbon), Some(AtomPhase::Current));
        assert_eq!(stage.state(), TransitionState::Idle);
        assert_eq!(stage.current_element().map(|e| e.name), Some("Carbon"));
    }

    #[test]
    fn transition_walks_through_every_state_in_order() {
        let (mut stage, _) = helium_stage();
        stage.request("Carbon", 1.0).unwrap();

        let mut seen = vec![stage.state()];
        let mut t = 1.0;
        while t < 2.0 {
            t += 1.0 / 60.0;
            stage.advance(t);
            let state = stage.state();
            if seen.last() != Some(&state) {
                seen.push(state);
            }
        }

        assert_eq!(
            seen,
            vec![
                TransitionState::OutgoingAnimating,
                TransitionState::Building,
                TransitionState::IncomingAnimating,
                TransitionState::Idle,
            ]
        );
    }

    #[test]
    fn due_build_with_nothing_animating_is_building() {
        let mut stage = AtomStage::new(TimingConfig::default());
        stage.request("Boron", 0.0).unwrap();
        assert_eq!(stage.state(), TransitionState::Building);
        stage.advance(0.25);
        assert_eq!(stage.state(), TransitionState::Building);
        stage.advance(0.3);
        assert_eq!(stage.state(), TransitionState::IncomingAnimating);
    }

    #[test]
    fn incoming_atom_starts_vanished() {
        let (mut stage, _) = helium_stage();
        stage.request("Neon", 0.0).unwrap();
        let effects = stage.advance(0.25);
        let StageEffect::Build { appearance, .. } = effects.last().unwrap() else {
            panic!("expected a build, got {effects:?}");
        };
        assert_eq!(*appearance, Appearance::VANISHED);
    }

    #[test]
    fn unknown_element_leaves_stage_untouched() {
        let (mut stage, helium) = helium_stage();
        let err = stage.request("Unobtainium", 1.0).unwrap_err();
        assert!(matches!(err, AtomError::UnknownElement(_)));
        assert_eq!(stage.current(), Some(helium));
        assert_eq!(stage.phase(helium), Some(AtomPhase::Current));
        assert_eq!(stage.appearance(helium), Some(Appearance::VISIBLE));
        assert!(stage.advance(2.0).is_empty());
    }

    #[test]
    fn overlapping_requests_release_every_atom_exactly_once() {
        let (mut stage, helium) = helium_stage();
        stage.request("Lithium", 0.0).unwrap();
        stage.request("Boron", 0.1).unwrap();

        let mut released = Vec::new();
        let mut built = Vec::new();
        let mut t = 0.0;
        while t < 3.0 {
            let effects = stage.advance(t);
            released.extend(releases(&effects));
            built.extend(builds(&effects).into_iter().map(|(_, name)| name));
            t += 1.0 / 60.0;
        }

        assert_eq!(built, vec!["Lithium", "Boron"]);
        assert_eq!(released.len(), 2);
        assert!(released.contains(&helium));
        let unique: HashSet<AtomId> = released.iter().copied().collect();
        assert_eq!(unique.len(), released.len());
        assert_eq!(stage.live_atoms(), 1);
        assert_eq!(stage.current_element().map(|e| e.name), Some("Boron"));
        assert_eq!(stage.state(), TransitionState::Idle);
    }

    #[test]
    fn request_during_incoming_shrinks_from_current_appearance() {
        let (mut stage, _) = helium_stage();
        stage.request("Oxygen", 0.0).unwrap();
        stage.advance(0.25);
        stage.advance(0.35);
        let oxygen = stage.current().unwrap();
        let partial = stage.appearance(oxygen).unwrap();
        assert!(partial.opacity < 1.0);

        stage.request("Neon", 0.35).unwrap();
        assert_eq!(stage.phase(oxygen), Some(AtomPhase::Outgoing));
        let effects = stage.advance(0.35);
        assert!(effects.contains(&StageEffect::Appearance {
            atom: oxygen,
            appearance: partial,
            kind: AnimationKind::Outgoing,
        }));

        let effects = stage.advance(0.9);
        assert!(releases(&effects).contains(&oxygen));
    }
}
