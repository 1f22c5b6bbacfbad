//! Shared types and configuration for Meridian.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Currency code handling
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
