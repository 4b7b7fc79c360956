//! Mediaref CLI
//!
//! A thin front end over the resolver that plays the role of the legacy
//! admin screens: it loads a corpus snapshot from JSON, prints the where-used
//! report pane by pane, and applies parent/sort-order updates back to the
//! snapshot file.

pub mod cli;
pub mod commands;
pub mod config;
pub mod render;
