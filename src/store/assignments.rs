//! Identity-center assignment registry (`iam-config.yaml`).
use super::StoreFile;
use crate::document::Section;
use crate::error::StoreError;
use crate::records::{IdentityCenterAssignment, WorkloadAccount};
use std::path::Path;

pub const ENTITY: &str = "assignments";
const SECTION_LABEL: &str = "assignments";

/// Current layout nests assignments under `identityCenter`; older files keep
/// them at the top level.
const SECTION_PATHS: [&[&str]; 2] = [
    &["identityCenter", "identityCenterAssignments"],
    &["identityCenterAssignments"],
];

#[derive(Debug)]
pub struct AssignmentStore {
    file: StoreFile,
    section: &'static [&'static str],
    count: usize,
}

impl AssignmentStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let file = StoreFile::open(ENTITY, path)?;
        let found = SECTION_PATHS.iter().find_map(|section| {
            match file.document().section(section) {
                Section::Items(items) => Some((*section, items.len())),
                _ => None,
            }
        });
        let Some((section, count)) = found else {
            return Err(StoreError::Parse {
                entity: ENTITY,
                section: SECTION_LABEL,
                path: path.to_path_buf(),
            });
        };
        file.report_loaded(count);
        Ok(Self {
            file,
            section,
            count,
        })
    }

    pub fn assignment_count(&self) -> usize {
        self.count
    }

    /// Append one assignment covering every account in `accounts`.
    ///
    /// The file is written even when `accounts` is empty.
    pub fn add_assignments(
        &mut self,
        customer_id: &str,
        permission_set_name: &str,
        accounts: &[WorkloadAccount],
    ) -> Result<IdentityCenterAssignment, StoreError> {
        let assignment = IdentityCenterAssignment::derive(customer_id, permission_set_name, accounts);
        self.count = self
            .file
            .append(self.section, std::slice::from_ref(&assignment))?;
        self.file.write(self.count)?;
        Ok(assignment)
    }
}
