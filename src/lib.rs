//! Two small interactive record keepers: a banking ledger and an employee roster.
//!
//! Records live in a [`Store`](features::Store) owned by the caller and passed
//! to every operation. The [`shell`] module drives the text menus.

#[macro_use]
extern crate log;

pub mod features;
pub mod shell;
