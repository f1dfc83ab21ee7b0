//! Core types and definitions for the siege targeting engine.
//!
//! This crate defines the vocabulary shared across all other crates:
//! ground-plane geometry, wall segments and their registry, unit state
//! components, commands, events, snapshots, configuration and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod geometry;
pub mod state;
pub mod types;
pub mod walls;
