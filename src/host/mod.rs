//! Host-side delivery of keyboard events
//!
//! Sources turn raw input into [`HostEvent`](crate::events::HostEvent)s and
//! push them into the channel drained by
//! [`Dispatcher::run`](crate::registry::Dispatcher::run):
//! - [`StdinSource`]: JSON lines on standard input
//! - [`NativeListener`]: macOS CGEventTap (macOS only)

mod error;
pub mod keys;
#[cfg(target_os = "macos")]
mod listener;
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
mod ready;
mod shutdown;
pub mod stdin;
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
mod tap;

pub use error::SourceError;
pub use keys::Modifiers;
#[cfg(target_os = "macos")]
pub use listener::NativeListener;
pub use shutdown::ShutdownSignal;
pub use stdin::StdinSource;
