//! Core use-case services.
//!
//! # Responsibility
//! - Own the authoritative in-memory todo list and its validated mutations.
//! - Keep rendering layers decoupled from storage details.
//!
//! # Invariants
//! - Every successful mutation is persisted before the call returns.
//! - Every failed persistence attempt leaves the in-memory list exactly as
//!   it was before the call.

pub mod todo_service;
