//! Attachment Usage Resolver
//!
//! Public entry points for where-used reporting:
//! - [`ReferenceResolver::resolve`] builds an
//!   [`AssetReferenceReport`](mediaref_core::AssetReferenceReport) for one
//!   asset from scanner output plus parent validation
//! - [`ReferenceResolver::update_asset`] applies a partial parent/sort-order
//!   update through the corpus store
//! - [`ResolverSession`] caches reports for the lifetime of one request scope
//!   so repeated presentation components share a single scan
//!
//! The resolver never mutates content while reporting and never repairs
//! inconsistencies: a dangling or unsubstantiated parent pointer is a
//! classification in the report, not an error.

pub mod error;
pub mod resolver;
pub mod session;
pub mod validator;

pub use error::{ResolveError, ResolveResult};
pub use resolver::ReferenceResolver;
pub use session::ResolverSession;
pub use validator::{classify_parent, ParentClassification};
