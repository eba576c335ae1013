//! # itemservice-core
//!
//! Configuration and error handling shared by the item service crates.

pub mod config;
pub mod error;
