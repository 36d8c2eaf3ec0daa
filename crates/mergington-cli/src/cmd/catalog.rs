use crate::output::print_json;
use clap::Subcommand;
use mergington_core::catalog::WarnLevel;
use mergington_core::Catalog;
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum CatalogSubcommand {
    /// Validate a catalog file for common mistakes
    Check {
        /// Path to the YAML catalog
        path: PathBuf,
    },

    /// Print the built-in catalog as YAML
    Dump,
}

pub fn run(subcommand: CatalogSubcommand, json: bool) -> anyhow::Result<()> {
    match subcommand {
        CatalogSubcommand::Check { path } => check(&path, json),
        CatalogSubcommand::Dump => dump(),
    }
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

fn check(path: &Path, json: bool) -> anyhow::Result<()> {
    let catalog = super::load_catalog(Some(path))?;
    let warnings = catalog.validate();

    if json {
        print_json(&serde_json::json!({
            "activities": catalog.activities.len(),
            "warnings": warnings,
        }))?;
    } else if warnings.is_empty() {
        println!(
            "Catalog is valid: {} activities, no warnings.",
            catalog.activities.len()
        );
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    if Catalog::has_errors(&warnings) {
        anyhow::bail!("catalog validation found errors");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// dump
// ---------------------------------------------------------------------------

fn dump() -> anyhow::Result<()> {
    print!("{}", Catalog::builtin().to_yaml()?);
    Ok(())
}
