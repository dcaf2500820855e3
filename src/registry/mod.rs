//! Shortcut registry and event dispatch
//!
//! - [`Registry`]: the shared, ordered set of live shortcuts
//! - [`Dispatcher`]: keypress/keydown/keyup handlers over a registry
//! - [`ShortcutBinding`]: ties a registration to the lifetime of its owner

mod binding;
mod dispatcher;
mod store;

pub use binding::ShortcutBinding;
pub use dispatcher::Dispatcher;
pub use store::{Handle, Registry};
