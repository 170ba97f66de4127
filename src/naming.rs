//! Pure string derivations shared by every store.
//!
//! Record fields are computed from the raw inputs here so the stores only
//! decide where a record goes, never what it contains.
use crate::error::StoreError;
use regex::Regex;
use std::sync::OnceLock;

/// Longest local part (before `@`) a derived email may have.
pub const MAX_EMAIL_LOCAL_PART: usize = 64;

/// Upper-case the first character and lower-case the rest.
pub fn sentence_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Upper-case the first character and leave the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Strip everything outside `[A-Za-z0-9 ]` from an organizational unit label.
///
/// Names drop the remaining spaces entirely; email fragments turn each run of
/// spaces into a single hyphen.
pub fn sanitize_unit(unit: &str, for_name: bool) -> String {
    let stripped: String = unit
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || *ch == ' ')
        .collect();
    if for_name {
        stripped.chars().filter(|ch| !ch.is_whitespace()).collect()
    } else {
        whitespace_run().replace_all(&stripped, "-").into_owned()
    }
}

/// `Customerid` + `Unit`, case-normalized so input casing never changes the name.
pub fn derive_account_name(customer_id: &str, org_unit: &str) -> String {
    format!(
        "{}{}",
        sentence_case(customer_id),
        sentence_case(&sanitize_unit(org_unit, true))
    )
}

pub fn derive_description(customer_id: &str, org_unit: &str) -> String {
    format!(
        "The {} {} Account",
        sentence_case(customer_id),
        sentence_case(org_unit)
    )
}

/// Plus-address the contact email with the customer and unit.
///
/// `user@example.com` + `projectname` + `dev` becomes
/// `user+projectname-dev@example.com`. The whole address is lower-cased.
pub fn derive_email(
    contact_email: &str,
    customer_id: &str,
    org_unit: &str,
) -> Result<String, StoreError> {
    let (local_part, domain) =
        contact_email
            .split_once('@')
            .ok_or_else(|| StoreError::InvalidContactEmail {
                email: contact_email.to_string(),
            })?;
    let unit_fragment = sanitize_unit(org_unit, false);
    let prefix = format!("{local_part}+{customer_id}-{unit_fragment}");
    if prefix.chars().count() > MAX_EMAIL_LOCAL_PART {
        return Err(StoreError::EmailPrefixTooLong { prefix });
    }
    Ok(format!("{prefix}@{domain}").to_lowercase())
}

/// `Customerid` + `Assignment`.
pub fn derive_assignment_name(customer_id: &str) -> String {
    format!("{}Assignment", capitalize_first(customer_id))
}

/// Name of the identity group an assignment grants the permission set to.
pub fn derive_group_name(permission_set_name: &str, customer_id: &str) -> String {
    format!(
        "Foundry{}{}",
        permission_set_name,
        capitalize_first(customer_id)
    )
}

pub fn derive_group_description(customer_name: &str) -> String {
    format!("Foundry Identity Center Group for {customer_name}")
}

fn whitespace_run() -> &'static Regex {
    static WHITESPACE_RUN: OnceLock<Regex> = OnceLock::new();
    WHITESPACE_RUN.get_or_init(|| Regex::new(r"\s+").expect("regex for whitespace runs"))
}

#[cfg(test)]
#[path = "naming_tests.rs"]
mod tests;
