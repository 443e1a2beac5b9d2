//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store mutations, persistence and import/export into
//!   use-case level APIs.
//! - Keep callers decoupled from storage details.

pub mod family_service;
