use crate::output::{print_json, print_table};
use mergington_core::ActivityStore;
use std::path::Path;

/// Print the activity table a server would start with.
pub fn run(catalog: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let catalog = super::load_catalog(catalog)?;
    let directory = ActivityStore::from_catalog(&catalog).list();

    if json {
        return print_json(&directory);
    }

    if directory.is_empty() {
        println!("No activities.");
        return Ok(());
    }

    let rows = directory
        .iter()
        .map(|(name, a)| {
            vec![
                name.to_string(),
                a.schedule.clone(),
                format!("{}/{}", a.enrolled(), a.max_participants),
                a.spots_left().to_string(),
            ]
        })
        .collect();
    print_table(&["NAME", "SCHEDULE", "ENROLLED", "SPOTS LEFT"], rows);
    Ok(())
}
