//! shortkey: keyboard shortcut dispatch engine
//!
//! Components register [`Shortcut`]s in a shared [`Registry`]; a
//! [`Dispatcher`] receives each physical key event once and invokes the
//! callbacks of every matching shortcut in registration order.
//!
//! - [`shortcut`]: shortcut definitions and the pure matching rules
//! - [`registry`]: the registry, the dispatcher and lifecycle bindings
//! - [`events`]: key event snapshots as delivered by the host
//! - [`host`]: event sources (stdin JSON lines, macOS event tap)
//! - [`config`]: environment-driven configuration for the monitor

pub mod config;
pub mod events;
pub mod host;
pub mod registry;
pub mod shortcut;

pub use events::{Element, HostEvent, KeyEvent, KeyPhase, Target};
pub use registry::{Dispatcher, Handle, Registry, ShortcutBinding};
pub use shortcut::{is_matched, Callback, Shortcut};
