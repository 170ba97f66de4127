//! Workflow status step.
//!
//! Status opens every addressable store read-only and reports its size.
use crate::cli::StatusArgs;
use crate::error::StoreError;
use crate::paths::{groups_path, StoreLayout};
use crate::store::{accounts, assignments, groups, AccountStore, AssignmentStore, GroupStore};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize)]
pub struct StoreStatus {
    pub entity: &'static str,
    pub path: PathBuf,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusSummary {
    pub stores: Vec<StoreStatus>,
}

/// Load each store reachable from `layout` without modifying anything.
pub fn status_summary(layout: &StoreLayout) -> Result<StatusSummary, StoreError> {
    let mut stores = Vec::new();

    let accounts_path = layout.accounts_path();
    let account_store = AccountStore::open(&accounts_path, "")?;
    stores.push(StoreStatus {
        entity: accounts::ENTITY,
        path: accounts_path,
        count: account_store.account_count(),
    });

    if let Some(assignments_path) = layout.assignments_path() {
        let assignment_store = AssignmentStore::open(&assignments_path)?;
        stores.push(StoreStatus {
            entity: assignments::ENTITY,
            path: assignments_path,
            count: assignment_store.assignment_count(),
        });
    }

    if let Some(folder) = layout.groups_folder() {
        let group_store = GroupStore::open(folder)?;
        stores.push(StoreStatus {
            entity: groups::ENTITY,
            path: groups_path(folder),
            count: group_store.group_count(),
        });
    }

    Ok(StatusSummary { stores })
}

/// Run the status step and print the summary.
pub fn run_status(args: &StatusArgs) -> Result<()> {
    let summary = status_summary(&args.location.layout())?;
    if args.json {
        let text = serde_json::to_string_pretty(&summary).context("serialize status summary")?;
        println!("{text}");
    } else {
        for store in &summary.stores {
            println!("{}: {} ({})", store.entity, store.count, store.path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::write_store;

    #[test]
    fn summarizes_every_store_in_folder_layout() {
        let dir = tempfile::tempdir().unwrap();
        write_store(dir.path(), "accounts-config.yaml", "workloadAccounts: []\n");
        write_store(
            dir.path(),
            "iam-config.yaml",
            "identityCenter:\n  identityCenterAssignments:\n    - name: A\n",
        );
        write_store(dir.path(), "terraform/groups.yaml", "");

        let summary = status_summary(&StoreLayout::Folder(dir.path().to_path_buf())).unwrap();
        let counts: Vec<_> = summary
            .stores
            .iter()
            .map(|store| (store.entity, store.count))
            .collect();
        assert_eq!(
            counts,
            vec![("workload accounts", 0), ("assignments", 1), ("groups", 0)]
        );
    }

    #[test]
    fn file_layout_only_reports_accounts() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_store(dir.path(), "custom.yaml", "workloadAccounts:\n  - name: A\n");
        let summary = status_summary(&StoreLayout::AccountsFile(path)).unwrap();
        assert_eq!(summary.stores.len(), 1);
        assert_eq!(summary.stores[0].count, 1);
    }
}
