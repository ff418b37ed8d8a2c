use super::ScenePhase;

/// Host-side listener for aggregate scene state.
///
/// Both methods run synchronously, after the store and phase are already
/// consistent, so an implementation may query the engine's read-only
/// projections freely from its own state.
pub trait SceneObserver {
    /// The phase changed. Called exactly once per change.
    fn on_phase_changed(&mut self, _phase: ScenePhase) {}

    /// The number of voxels in the store changed.
    fn on_voxel_count_changed(&mut self, _count: usize) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl SceneObserver for NullObserver {}

/// Adapts a pair of closures into a [`SceneObserver`].
pub struct CallbackObserver<P, C>
where
    P: FnMut(ScenePhase),
    C: FnMut(usize),
{
    on_phase: P,
    on_count: C,
}

impl<P, C> CallbackObserver<P, C>
where
    P: FnMut(ScenePhase),
    C: FnMut(usize),
{
    /// Wrap a phase callback and a count callback.
    pub fn new(on_phase: P, on_count: C) -> Self {
        Self { on_phase, on_count }
    }
}

impl<P, C> SceneObserver for CallbackObserver<P, C>
where
    P: FnMut(ScenePhase),
    C: FnMut(usize),
{
    fn on_phase_changed(&mut self, phase: ScenePhase) {
        (self.on_phase)(phase);
    }

    fn on_voxel_count_changed(&mut self, count: usize) {
        (self.on_count)(count);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn callbacks_receive_values() {
        let phases = Rc::new(RefCell::new(Vec::new()));
        let counts = Rc::new(RefCell::new(Vec::new()));
        let (p, c) = (Rc::clone(&phases), Rc::clone(&counts));
        let mut observer = CallbackObserver::new(
            move |phase| p.borrow_mut().push(phase),
            move |count| c.borrow_mut().push(count),
        );
        observer.on_phase_changed(ScenePhase::Dismantling);
        observer.on_voxel_count_changed(7);
        assert_eq!(*phases.borrow(), vec![ScenePhase::Dismantling]);
        assert_eq!(*counts.borrow(), vec![7]);
    }
}
