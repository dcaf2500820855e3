//! Shortcut definitions and the matching rules applied to them
//!
//! Matching is pure: a [`Shortcut`] and a [`KeyEvent`](crate::events::KeyEvent)
//! go in, a bool comes out.

pub mod matcher;
mod definition;

pub use matcher::is_matched;
pub use definition::{Callback, Shortcut};
