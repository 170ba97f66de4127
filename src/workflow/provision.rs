//! Workflow provision step.
use crate::cli::ProvisionArgs;
use crate::error::StoreError;
use crate::naming;
use crate::paths::StoreLayout;
use crate::records::{AccessGroup, IdentityCenterAssignment, WorkloadAccount};
use crate::store::{AccountStore, AssignmentStore, GroupStore};
use anyhow::Result;
use serde::Serialize;

/// Inputs for one provisioning run.
#[derive(Debug, Clone)]
pub struct ProvisionRequest<'a> {
    pub layout: StoreLayout,
    pub customer_id: &'a str,
    pub contact_email: &'a str,
    pub organisational_units: &'a str,
    pub permission_set_name: &'a str,
}

/// Records committed by a successful run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProvisionOutcome {
    pub accounts: Vec<WorkloadAccount>,
    pub assignment: Option<IdentityCenterAssignment>,
    pub group: Option<AccessGroup>,
}

/// Run accounts, then assignments, then groups.
///
/// Stops with [`StoreError::NoAccountsAdded`] when no account was created.
/// A failure in a later store leaves earlier stores written.
pub fn provision(request: &ProvisionRequest<'_>) -> Result<ProvisionOutcome, StoreError> {
    let mut accounts = AccountStore::open(
        &request.layout.accounts_path(),
        request.organisational_units,
    )?;
    tracing::debug!(units = ?accounts.units(), "organizational units requested");
    let created = accounts.add_accounts(request.customer_id, request.contact_email)?;
    if created.is_empty() {
        return Err(StoreError::NoAccountsAdded);
    }

    let mut outcome = ProvisionOutcome {
        accounts: created,
        ..ProvisionOutcome::default()
    };
    let (Some(assignments_path), Some(groups_folder)) = (
        request.layout.assignments_path(),
        request.layout.groups_folder(),
    ) else {
        tracing::debug!("account store addressed directly; skipping assignments and groups");
        return Ok(outcome);
    };

    let mut assignments = AssignmentStore::open(&assignments_path)?;
    let assignment = assignments.add_assignments(
        request.customer_id,
        request.permission_set_name,
        &outcome.accounts,
    )?;

    let mut groups = GroupStore::open(groups_folder)?;
    let group_name = naming::derive_group_name(request.permission_set_name, request.customer_id);
    let group = groups.add_group(&group_name, request.customer_id)?;

    outcome.assignment = Some(assignment);
    outcome.group = Some(group);
    Ok(outcome)
}

/// Run the provision step from CLI inputs.
pub fn run_provision(args: &ProvisionArgs) -> Result<()> {
    let request = ProvisionRequest {
        layout: args.location.layout(),
        customer_id: &args.customer_id,
        contact_email: &args.spoc_email,
        organisational_units: &args.organisational_units,
        permission_set_name: &args.permission_set_name,
    };
    let outcome = provision(&request)?;
    tracing::debug!(
        accounts = outcome.accounts.len(),
        assignment = outcome.assignment.is_some(),
        group = outcome.group.is_some(),
        "provisioning complete"
    );
    Ok(())
}

#[cfg(test)]
#[path = "provision_tests.rs"]
mod tests;
