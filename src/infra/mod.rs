//! Slug normalization and logging setup

pub mod logging;
mod slug;

pub use slug::{is_canonical_slug, slugify};
