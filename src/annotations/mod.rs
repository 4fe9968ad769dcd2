//! Session message handlers
//!
//! This module routes SessionMsg values to the live annotation session:
//! - Open/Close manage the single live session
//! - Pointer, tool, undo and save messages act on it

pub mod handlers;
