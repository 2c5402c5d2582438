//! Reactive primitives
//!
//! Minimal stand-ins for a UI framework's state and lifecycle:
//! - `State<T>`: observable value with `Init`/`Update` notifications
//! - `Scope`: one-shot mount callbacks

pub mod lifecycle;
pub mod state;

pub use lifecycle::Scope;
pub use state::{Change, State, WeakState};
