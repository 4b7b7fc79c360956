//! Mediaref Content Scanner
//!
//! This crate turns raw corpus content into typed references for one media
//! asset:
//! - a marker grammar for the shortcode-style directives that carry explicit
//!   asset ids inside post bodies
//! - a paged, best-effort corpus scanner that combines body markers with
//!   precomputed featured-image and gallery metadata
//!
//! Classification of the results lives in `mediaref-resolver`.

pub mod config;
pub mod markers;
pub mod scanner;

pub use config::ScanConfig;
pub use markers::{extract_markers, Marker, MarkerKind};
pub use scanner::{ContentScanner, ScanOutcome};
