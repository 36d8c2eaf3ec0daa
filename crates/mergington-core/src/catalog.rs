use crate::activity::{Activity, Directory};
use crate::error::{ActivityError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

// ---------------------------------------------------------------------------
// CatalogWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// CatalogEntry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(flatten)]
    pub activity: Activity,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The ordered list of activities the in-memory table is seeded from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub activities: Vec<CatalogEntry>,
}

impl Catalog {
    /// The school's standard offering.
    pub fn builtin() -> Self {
        fn entry(
            name: &str,
            description: &str,
            schedule: &str,
            max: u32,
            who: &[&str],
        ) -> CatalogEntry {
            CatalogEntry {
                name: name.to_string(),
                activity: Activity::new(description, schedule, max)
                    .with_participants(who.iter().copied()),
            }
        }

        Self {
            activities: vec![
                entry(
                    "Chess Club",
                    "Learn strategies and compete in chess tournaments",
                    "Fridays, 3:30 PM - 5:00 PM",
                    12,
                    &["michael@mergington.edu", "daniel@mergington.edu"],
                ),
                entry(
                    "Programming Class",
                    "Learn programming fundamentals and build software projects",
                    "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
                    20,
                    &["emma@mergington.edu", "sophia@mergington.edu"],
                ),
                entry(
                    "Gym Class",
                    "Physical education and sports activities",
                    "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
                    30,
                    &["john@mergington.edu", "olivia@mergington.edu"],
                ),
                entry(
                    "Basketball Team",
                    "Practice drills and compete in the regional school league",
                    "Tuesdays and Thursdays, 4:00 PM - 6:00 PM",
                    15,
                    &["alex@mergington.edu"],
                ),
                entry(
                    "Tennis Club",
                    "Improve your serve and play friendly matches",
                    "Mondays and Wednesdays, 3:30 PM - 5:00 PM",
                    10,
                    &["jordan@mergington.edu"],
                ),
                entry(
                    "Art Studio",
                    "Explore painting, drawing and sculpture in an open studio",
                    "Wednesdays, 3:30 PM - 5:30 PM",
                    18,
                    &["maya@mergington.edu"],
                ),
                entry(
                    "Music Ensemble",
                    "Rehearse and perform with the school's instrumental ensemble",
                    "Mondays and Thursdays, 4:00 PM - 5:30 PM",
                    25,
                    &["liam@mergington.edu"],
                ),
                entry(
                    "Debate Team",
                    "Sharpen public speaking and argumentation in competitive debate",
                    "Tuesdays, 4:00 PM - 5:30 PM",
                    16,
                    &["ava@mergington.edu"],
                ),
                entry(
                    "Science Olympiad",
                    "Prepare for science competitions with hands-on experiments",
                    "Saturdays, 10:00 AM - 12:00 PM",
                    20,
                    &["noah@mergington.edu"],
                ),
            ],
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ActivityError::CatalogNotFound(path.to_path_buf()));
        }
        let data = std::fs::read_to_string(path)?;
        Self::from_yaml(&data)
    }

    pub fn from_yaml(data: &str) -> Result<Self> {
        let catalog: Catalog = serde_yaml::from_str(data)?;
        Ok(catalog)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Build the lookup table. Later entries whose name is already taken are
    /// dropped; `validate` reports them as errors.
    pub fn to_directory(&self) -> Directory {
        let mut dir = Directory::new();
        for entry in &self.activities {
            dir.insert(entry.name.clone(), entry.activity.clone());
        }
        dir
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<CatalogWarning> {
        let mut warnings = Vec::new();
        let mut seen_names = HashSet::new();

        for entry in &self.activities {
            let name = entry.name.as_str();

            if name.trim().is_empty() {
                warnings.push(CatalogWarning {
                    level: WarnLevel::Error,
                    message: "activity with an empty name".to_string(),
                });
            } else if !seen_names.insert(name) {
                warnings.push(CatalogWarning {
                    level: WarnLevel::Error,
                    message: format!("duplicate activity '{name}'"),
                });
            }

            let mut seen_emails = HashSet::new();
            for email in &entry.activity.participants {
                if !seen_emails.insert(email.as_str()) {
                    warnings.push(CatalogWarning {
                        level: WarnLevel::Error,
                        message: format!("'{email}' is listed twice in '{name}'"),
                    });
                }
            }

            let a = &entry.activity;
            if a.max_participants == 0 {
                warnings.push(CatalogWarning {
                    level: WarnLevel::Warning,
                    message: format!("'{name}' has max_participants=0"),
                });
            } else if a.enrolled() > a.max_participants as usize {
                warnings.push(CatalogWarning {
                    level: WarnLevel::Warning,
                    message: format!(
                        "'{name}' has {} participants but max_participants={}",
                        a.enrolled(),
                        a.max_participants
                    ),
                });
            }
        }

        warnings
    }

    pub fn has_errors(warnings: &[CatalogWarning]) -> bool {
        warnings.iter().any(|w| w.level == WarnLevel::Error)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_clean() {
        let warnings = Catalog::builtin().validate();
        assert!(warnings.is_empty(), "unexpected findings: {warnings:?}");
    }

    #[test]
    fn builtin_catalog_seeds_known_roster() {
        let dir = Catalog::builtin().to_directory();
        assert_eq!(dir.len(), 9);
        assert_eq!(dir.iter().next().map(|(n, _)| n), Some("Chess Club"));
        assert!(dir
            .get("Basketball Team")
            .unwrap()
            .is_registered("alex@mergington.edu"));
        assert!(dir.get("Tennis Club").is_some());
    }

    #[test]
    fn yaml_roundtrip_keeps_order() {
        let original = Catalog::builtin();
        let yaml = original.to_yaml().unwrap();
        let parsed = Catalog::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn participants_default_to_empty() {
        let yaml = "activities:\n  - name: Robotics\n    description: Build robots\n    schedule: Thursdays\n    max_participants: 8\n";
        let catalog = Catalog::from_yaml(yaml).unwrap();
        assert_eq!(catalog.activities.len(), 1);
        assert!(catalog.activities[0].activity.participants.is_empty());
    }

    #[test]
    fn load_missing_file_is_catalog_not_found() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = Catalog::load(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ActivityError::CatalogNotFound(_)));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("catalog.yaml");
        std::fs::write(&path, Catalog::builtin().to_yaml().unwrap()).unwrap();
        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.activities.len(), 9);
    }

    #[test]
    fn load_rejects_malformed_yaml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("catalog.yaml");
        std::fs::write(&path, "activities: [name: {").unwrap();
        assert!(matches!(Catalog::load(&path), Err(ActivityError::Yaml(_))));
    }

    #[test]
    fn validate_flags_duplicates_as_errors() {
        let mut catalog = Catalog::builtin();
        let mut dup = catalog.activities[0].clone();
        dup.activity
            .participants
            .push(dup.activity.participants[0].clone());
        catalog.activities.push(dup);

        let warnings = catalog.validate();
        assert!(Catalog::has_errors(&warnings));
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("duplicate activity 'Chess Club'")));
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("listed twice in 'Chess Club'")));
    }

    #[test]
    fn validate_warns_on_capacity() {
        let catalog = Catalog {
            activities: vec![
                CatalogEntry {
                    name: "Empty".into(),
                    activity: Activity::new("d", "s", 0),
                },
                CatalogEntry {
                    name: "Crowded".into(),
                    activity: Activity::new("d", "s", 1)
                        .with_participants(["a@mergington.edu", "b@mergington.edu"]),
                },
            ],
        };
        let warnings = catalog.validate();
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.level == WarnLevel::Warning));
        assert!(!Catalog::has_errors(&warnings));
    }

    #[test]
    fn to_directory_keeps_first_of_duplicate_names() {
        let mut catalog = Catalog::builtin();
        let mut dup = catalog.activities[0].clone();
        dup.activity.description = "shadow".into();
        catalog.activities.push(dup);
        let dir = catalog.to_directory();
        assert_eq!(dir.len(), 9);
        assert_ne!(dir.get("Chess Club").unwrap().description, "shadow");
    }
}
