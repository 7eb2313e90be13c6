//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store and engine calls into command-level APIs.
//! - Keep the CLI decoupled from storage details.

pub mod goal_service;
