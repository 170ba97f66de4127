//! Workload account registry (`workloadAccounts`).
use super::StoreFile;
use crate::document::Section;
use crate::error::StoreError;
use crate::records::WorkloadAccount;
use crate::units::{parse_organizational_units, OrganizationalUnit};
use serde_yaml::Value;
use std::path::Path;

pub const ENTITY: &str = "workload accounts";
const SECTION: &[&str] = &["workloadAccounts"];
const SECTION_LABEL: &str = "accounts";

#[derive(Debug)]
pub struct AccountStore {
    file: StoreFile,
    units: Vec<OrganizationalUnit>,
}

impl AccountStore {
    /// Load the registry at `path` and parse the requested unit list.
    pub fn open(path: &Path, organisational_units: &str) -> Result<Self, StoreError> {
        let units = parse_organizational_units(organisational_units);
        let file = StoreFile::open(ENTITY, path)?;
        let Section::Items(existing) = file.document().section(SECTION) else {
            return Err(StoreError::Parse {
                entity: ENTITY,
                section: SECTION_LABEL,
                path: path.to_path_buf(),
            });
        };
        file.report_loaded(existing.len());
        Ok(Self { file, units })
    }

    pub fn units(&self) -> &[OrganizationalUnit] {
        &self.units
    }

    pub fn account_count(&self) -> usize {
        self.existing().len()
    }

    /// Create one account per requested unit and persist them together.
    ///
    /// Any derivation failure or email collision, including a collision with
    /// an account created earlier in the same call, aborts before anything is
    /// written. With no units nothing is written at all.
    pub fn add_accounts(
        &mut self,
        customer_id: &str,
        contact_email: &str,
    ) -> Result<Vec<WorkloadAccount>, StoreError> {
        let mut created: Vec<WorkloadAccount> = Vec::with_capacity(self.units.len());
        for unit in &self.units {
            let account = WorkloadAccount::derive(customer_id, contact_email, *unit)?;
            if let Some(record) = self.conflicting_record(&account.email, &created) {
                return Err(StoreError::Conflict {
                    path: self.file.path().to_path_buf(),
                    record,
                });
            }
            created.push(account);
        }

        if created.is_empty() {
            return Ok(created);
        }

        let count = self.file.append(SECTION, &created)?;
        self.file.write(count)?;
        Ok(created)
    }

    fn existing(&self) -> &[Value] {
        match self.file.document().section(SECTION) {
            Section::Items(items) => items,
            _ => &[],
        }
    }

    fn conflicting_record(&self, email: &str, pending: &[WorkloadAccount]) -> Option<String> {
        let stored = self.existing().iter().find(|account| {
            account
                .get("email")
                .and_then(Value::as_str)
                .is_some_and(|existing| existing.eq_ignore_ascii_case(email))
        });
        if let Some(account) = stored {
            return Some(render_record(account));
        }
        pending
            .iter()
            .find(|account| account.email.eq_ignore_ascii_case(email))
            .map(render_record)
    }
}

fn render_record<T: serde::Serialize + std::fmt::Debug>(record: &T) -> String {
    serde_json::to_string(record).unwrap_or_else(|_| format!("{record:?}"))
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
