//! Failure kinds surfaced by the stores and the provisioning run.
//!
//! Display strings are the exact messages reported to the caller.
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// File missing, unreadable, or not YAML.
    #[error("Error reading {entity} from file '{}'", .path.display())]
    Read {
        entity: &'static str,
        path: PathBuf,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Valid YAML without the expected section.
    #[error(
        "Error parsing {entity} from file '{}', {section} section is not present",
        .path.display()
    )]
    Parse {
        entity: &'static str,
        section: &'static str,
        path: PathBuf,
    },

    #[error("Email already exists within file {}: {record}", .path.display())]
    Conflict { path: PathBuf, record: String },

    #[error("Email prefix '{prefix}' is too long, must be 64 characters or less")]
    EmailPrefixTooLong { prefix: String },

    #[error("Contact email '{email}' must contain '@'")]
    InvalidContactEmail { email: String },

    #[error("Error writing {entity} to file '{}'", .path.display())]
    Write {
        entity: &'static str,
        path: PathBuf,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("No workload accounts added")]
    NoAccountsAdded,
}

impl StoreError {
    pub fn read(
        entity: &'static str,
        path: impl Into<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Read {
            entity,
            path: path.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn write(
        entity: &'static str,
        path: impl Into<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Write {
            entity,
            path: path.into(),
            source: Some(Box::new(source)),
        }
    }
}
