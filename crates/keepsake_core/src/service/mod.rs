//! Feature use-case services.
//!
//! # Responsibility
//! - Orchestrate record-store calls into per-collection APIs (notes,
//!   letters, calendar, watchlist, memories).
//! - Keep UI/FFI layers decoupled from storage and clock details.

pub mod calendar_service;
pub mod letter_service;
pub mod memory_service;
pub mod note_service;
pub mod session;
pub mod watchlist_service;
