//! Record types persisted in the three stores.
//!
//! Field order matches the order keys are written to YAML.
use crate::error::StoreError;
use crate::naming;
use crate::units::OrganizationalUnit;
use serde::{Deserialize, Serialize};

/// Principal type used for every assignment principal.
pub const GROUP_PRINCIPAL_TYPE: &str = "GROUP";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadAccount {
    pub name: String,
    pub description: String,
    pub email: String,
    pub organizational_unit: String,
}

impl WorkloadAccount {
    /// Derive the account for one unit of a customer.
    pub fn derive(
        customer_id: &str,
        contact_email: &str,
        unit: OrganizationalUnit,
    ) -> Result<Self, StoreError> {
        let label = unit.label();
        Ok(Self {
            name: naming::derive_account_name(customer_id, label),
            description: naming::derive_description(customer_id, label),
            email: naming::derive_email(contact_email, customer_id, label)?,
            organizational_unit: label.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentTargets {
    pub accounts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityCenterAssignment {
    pub name: String,
    pub permission_set_name: String,
    pub principals: Vec<Principal>,
    pub deployment_targets: DeploymentTargets,
}

impl IdentityCenterAssignment {
    /// One assignment granting `permission_set_name` on every account in `accounts`.
    pub fn derive(
        customer_id: &str,
        permission_set_name: &str,
        accounts: &[WorkloadAccount],
    ) -> Self {
        Self {
            name: naming::derive_assignment_name(customer_id),
            permission_set_name: permission_set_name.to_string(),
            principals: vec![Principal {
                kind: GROUP_PRINCIPAL_TYPE.to_string(),
                name: naming::derive_group_name(permission_set_name, customer_id),
            }],
            deployment_targets: DeploymentTargets {
                accounts: accounts.iter().map(|account| account.name.clone()).collect(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGroup {
    pub name: String,
    pub description: String,
}

impl AccessGroup {
    pub fn new(name: &str, customer_name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: naming::derive_group_description(customer_name),
        }
    }
}
