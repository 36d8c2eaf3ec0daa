pub mod activities;
pub mod catalog;
pub mod serve;

use anyhow::Context;
use mergington_core::Catalog;
use std::path::Path;

/// Load the catalog at `path`, or the built-in one when no path is given.
pub fn load_catalog(path: Option<&Path>) -> anyhow::Result<Catalog> {
    match path {
        Some(p) => Catalog::load(p)
            .with_context(|| format!("failed to load catalog {}", p.display())),
        None => Ok(Catalog::builtin()),
    }
}
