//! # Tinker Engine
//!
//! Headless host for the Tinker gameplay systems.
//!
//! This crate provides the host side:
//! - Engine configuration (`tinker.toml`)
//! - Item catalog loading
//! - Console, spawner and audio hook implementations
//! - Fixed timestep and a scripted demo session

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod catalog_loader;
pub mod config;
pub mod console;
pub mod demo;
pub mod timing;
