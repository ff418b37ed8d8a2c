//! Scene phase bookkeeping and host notification.

mod observer;
mod phase;

pub use observer::{CallbackObserver, NullObserver, SceneObserver};
pub use phase::{SceneEvent, ScenePhase, SceneStateMachine, Verdict};
