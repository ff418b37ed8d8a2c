use std::fmt;

/// High-level mode of the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScenePhase {
    /// The store holds a fixed structure.
    #[default]
    Stable,
    /// The structure has been blown apart; debris is flying or resting.
    Dismantling,
    /// Particles are flying into a new target structure.
    Rebuilding,
}

impl ScenePhase {
    /// Upper-case label used in logs and host UIs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stable => "STABLE",
            Self::Dismantling => "DISMANTLING",
            Self::Rebuilding => "REBUILDING",
        }
    }
}

impl fmt::Display for ScenePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requests and notifications that may move the phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    /// Hard reset with a new model. Legal from every phase.
    Load,
    /// Blow the current structure apart.
    Dismantle,
    /// Reassemble into a new target list.
    Rebuild,
    /// The last rebuild particle has landed.
    AssemblyComplete,
}

/// Outcome of offering an event to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The event is illegal in the current phase and was ignored.
    Rejected,
    /// The event was accepted. `from == to` when the phase did not move.
    Accepted {
        /// Phase before the event.
        from: ScenePhase,
        /// Phase after the event.
        to: ScenePhase,
    },
}

impl Verdict {
    /// Whether the event was accepted.
    #[must_use]
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// The new phase, if the event actually changed it.
    #[must_use]
    pub fn changed(self) -> Option<ScenePhase> {
        match self {
            Self::Accepted { from, to } if from != to => Some(to),
            _ => None,
        }
    }
}

/// Authoritative phase plus the rules for which requests are legal.
///
/// ```text
/// STABLE --dismantle--> DISMANTLING --rebuild--> REBUILDING --complete--> STABLE
/// ```
///
/// `Load` forces `STABLE` from anywhere. `Rebuild` while `STABLE` is an
/// immediate swap and leaves the phase alone.
#[derive(Debug, Clone, Default)]
pub struct SceneStateMachine {
    phase: ScenePhase,
}

impl SceneStateMachine {
    /// Start in [`ScenePhase::Stable`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> ScenePhase {
        self.phase
    }

    /// Phase that `event` would lead to, or `None` if it is illegal now.
    #[must_use]
    pub fn next(&self, event: SceneEvent) -> Option<ScenePhase> {
        use ScenePhase::{Dismantling, Rebuilding, Stable};
        match (self.phase, event) {
            (_, SceneEvent::Load) => Some(Stable),
            (Stable, SceneEvent::Dismantle) => Some(Dismantling),
            (Stable, SceneEvent::Rebuild) => Some(Stable),
            (Dismantling, SceneEvent::Rebuild) => Some(Rebuilding),
            (Rebuilding, SceneEvent::AssemblyComplete) => Some(Stable),
            _ => None,
        }
    }

    /// Whether `event` is legal in the current phase.
    #[must_use]
    pub fn allows(&self, event: SceneEvent) -> bool {
        self.next(event).is_some()
    }

    /// Offer `event`; on acceptance the phase flips before this returns.
    pub fn apply(&mut self, event: SceneEvent) -> Verdict {
        let Some(to) = self.next(event) else {
            log::debug!("scene: {event:?} ignored while {}", self.phase);
            return Verdict::Rejected;
        };
        let from = self.phase;
        self.phase = to;
        if from != to {
            log::debug!("scene: {from} -> {to} on {event:?}");
        }
        Verdict::Accepted { from, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_cycle() {
        let mut sm = SceneStateMachine::new();
        assert_eq!(sm.phase(), ScenePhase::Stable);
        assert_eq!(
            sm.apply(SceneEvent::Dismantle).changed(),
            Some(ScenePhase::Dismantling)
        );
        assert_eq!(
            sm.apply(SceneEvent::Rebuild).changed(),
            Some(ScenePhase::Rebuilding)
        );
        assert_eq!(
            sm.apply(SceneEvent::AssemblyComplete).changed(),
            Some(ScenePhase::Stable)
        );
    }

    #[test]
    fn illegal_requests_are_rejected_without_moving() {
        let mut sm = SceneStateMachine::new();
        assert_eq!(sm.apply(SceneEvent::AssemblyComplete), Verdict::Rejected);
        let _ = sm.apply(SceneEvent::Dismantle);
        assert_eq!(sm.apply(SceneEvent::Dismantle), Verdict::Rejected);
        assert_eq!(sm.phase(), ScenePhase::Dismantling);
        let _ = sm.apply(SceneEvent::Rebuild);
        assert_eq!(sm.apply(SceneEvent::Rebuild), Verdict::Rejected);
        assert_eq!(sm.apply(SceneEvent::Dismantle), Verdict::Rejected);
        assert_eq!(sm.phase(), ScenePhase::Rebuilding);
    }

    #[test]
    fn rebuild_while_stable_is_accepted_in_place() {
        let mut sm = SceneStateMachine::new();
        let verdict = sm.apply(SceneEvent::Rebuild);
        assert!(verdict.is_accepted());
        assert_eq!(verdict.changed(), None);
        assert_eq!(sm.phase(), ScenePhase::Stable);
    }

    #[test]
    fn load_resets_from_every_phase() {
        for setup in [
            &[][..],
            &[SceneEvent::Dismantle][..],
            &[SceneEvent::Dismantle, SceneEvent::Rebuild][..],
        ] {
            let mut sm = SceneStateMachine::new();
            for event in setup {
                let _ = sm.apply(*event);
            }
            assert!(sm.apply(SceneEvent::Load).is_accepted());
            assert_eq!(sm.phase(), ScenePhase::Stable);
        }
    }

    #[test]
    fn phase_labels() {
        assert_eq!(ScenePhase::Dismantling.to_string(), "DISMANTLING");
    }
}
