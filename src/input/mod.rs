//! Key-bindable action vocabulary for the viewer.

mod keyboard;

pub use keyboard::KeyAction;
