//! Test Helper Utilities
//!
//! Shared stubs and profile fixtures for shelf-wizard integration tests

#![allow(dead_code, unused_imports)]

pub mod profile;
pub mod stubs;

pub use profile::{ada_inputs_for_step, fill_step, new_wizard, walk_to_step};
pub use stubs::{gated_search, GatedSearch, Reply, ScriptedSearch, StubRecommender};
