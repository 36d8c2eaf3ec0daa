use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the activity table and catalog loading.
///
/// The display text of the roster variants is the detail message shown to
/// API clients, so it stays short and free of the offending values.
#[derive(Debug, Error)]
pub enum ActivityError {
    #[error("Activity not found")]
    ActivityNotFound(String),

    #[error("Student is already signed up")]
    AlreadySignedUp { activity: String, email: String },

    #[error("Student is not registered for this activity")]
    NotRegistered { activity: String, email: String },

    #[error("catalog file not found: {}", .0.display())]
    CatalogNotFound(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, ActivityError>;
