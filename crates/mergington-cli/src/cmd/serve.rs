use anyhow::Result;
use clap::Args;
use mergington_core::{catalog::WarnLevel, ActivityStore, Catalog};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "MERGINGTON_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on (0 = OS-assigned)
    #[arg(long, env = "MERGINGTON_PORT", default_value = "8000")]
    pub port: u16,

    /// YAML catalog to seed the activity table from (default: built-in)
    #[arg(long, env = "MERGINGTON_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Open the frontend in a browser once listening
    #[arg(long)]
    pub open: bool,
}

pub fn run(args: ServeArgs) -> Result<()> {
    let catalog = super::load_catalog(args.catalog.as_deref())?;
    let store = seed_store(&catalog)?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind((args.host.as_str(), args.port)).await?;
        let actual_port = listener.local_addr()?.port();
        println!("Mergington activities → http://localhost:{actual_port}");

        tokio::select! {
            res = mergington_server::serve_on(store, listener, args.open) => res,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                Ok(())
            }
        }
    })
}

/// Validate the catalog and build the store. Warnings are logged; any
/// error-level finding aborts startup.
fn seed_store(catalog: &Catalog) -> Result<ActivityStore> {
    let warnings = catalog.validate();
    for w in &warnings {
        match w.level {
            WarnLevel::Warning => tracing::warn!("catalog: {}", w.message),
            WarnLevel::Error => tracing::error!("catalog: {}", w.message),
        }
    }
    if Catalog::has_errors(&warnings) {
        anyhow::bail!("catalog has errors; run `mergington catalog check` for details");
    }

    let store = ActivityStore::from_catalog(catalog);
    tracing::info!(activities = catalog.activities.len(), "activity table seeded");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_seeds() {
        let store = seed_store(&Catalog::builtin()).unwrap();
        assert_eq!(store.list().len(), 9);
    }

    #[test]
    fn duplicate_names_abort() {
        let mut catalog = Catalog::builtin();
        catalog.activities.push(catalog.activities[0].clone());
        assert!(seed_store(&catalog).is_err());
    }
}
