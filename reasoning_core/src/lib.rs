//! # Reasoning Core
//!
//! Question answering and perspective scoring for Life. This crate reads a
//! `concept_graph::ConceptStore`, decides how each question should be
//! answered, and scores free-text situations against taught ideologies.
//!
//! ## Core Components
//!
//! - **metacognition**: classifies questions and routes them to a direct
//!   lookup (fast) or a path traversal (slow), returning an explicit trace
//! - **perspective**: ideology value hierarchies, situation scoring and
//!   multi-ideology comparison
//! - **config**: TOML-loadable tuning for both
//!
//! ## Design Philosophy
//!
//! - **Deterministic**: the same teaching sequence always yields the same answers
//! - **Transparent**: every answer carries the steps that produced it
//! - **Explicit failure**: unknown concepts, missing paths and unknown
//!   ideologies are typed errors, never default answers

pub mod config;
pub mod error;
pub mod metacognition;
pub mod perspective;

pub use config::*;
pub use error::*;
pub use metacognition::*;
pub use perspective::*;
