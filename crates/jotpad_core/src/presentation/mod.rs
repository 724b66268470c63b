//! Presentation side: list adapter, controller, and input forms.
//!
//! # Responsibility
//! - Keep the on-screen list equal to the last loaded store snapshot while
//!   redrawing only what changed.
//! - Turn form input into create/update/delete commands.
//!
//! # Invariants
//! - Snapshots are mutated only on the controller's thread.
//! - The adapter never shares entry storage with the controller.

pub mod adapter;
pub mod commands;
pub mod controller;
pub mod diff;
pub mod forms;
pub mod view;
