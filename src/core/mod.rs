//! core
//!
//! Core domain types and configuration for vstamp.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Oid, AbbrevLength
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing

pub mod config;
pub mod types;
