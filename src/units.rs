//! Organizational unit labels accepted on input.
use std::fmt;

/// Deployment environment a workload account is provisioned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganizationalUnit {
    Dev,
    Test,
    Prod,
}

impl OrganizationalUnit {
    pub const ALL: [OrganizationalUnit; 3] = [Self::Dev, Self::Test, Self::Prod];

    /// Label written to the `organizationalUnit` field.
    pub fn label(self) -> &'static str {
        match self {
            Self::Dev => "Dev",
            Self::Test => "Test",
            Self::Prod => "Prod",
        }
    }

    /// Case-insensitive lookup of a single token.
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.label().eq_ignore_ascii_case(token))
    }
}

impl fmt::Display for OrganizationalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parse a comma-separated unit list, keeping input order.
///
/// Unrecognized tokens are dropped with a warning. Repeated units are kept, so
/// `Dev,Dev` yields two entries whose emails collide downstream.
pub fn parse_organizational_units(csv: &str) -> Vec<OrganizationalUnit> {
    let mut units = Vec::new();
    for token in csv.split(',').map(str::trim) {
        if token.is_empty() {
            continue;
        }
        match OrganizationalUnit::parse(token) {
            Some(unit) => units.push(unit),
            None => tracing::warn!("Invalid environment string: {token}"),
        }
    }
    units
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_unit() {
        assert_eq!(
            parse_organizational_units("Dev"),
            vec![OrganizationalUnit::Dev]
        );
    }

    #[test]
    fn parses_multiple_units_in_order() {
        assert_eq!(
            parse_organizational_units("prod, TEST ,dev"),
            vec![
                OrganizationalUnit::Prod,
                OrganizationalUnit::Test,
                OrganizationalUnit::Dev
            ]
        );
    }

    #[test]
    fn empty_input_yields_no_units() {
        assert!(parse_organizational_units("").is_empty());
    }

    #[test]
    fn drops_unrecognized_tokens() {
        assert_eq!(
            parse_organizational_units("Dev,INVALID,Prod"),
            vec![OrganizationalUnit::Dev, OrganizationalUnit::Prod]
        );
        assert!(parse_organizational_units("INVALID").is_empty());
    }

    #[test]
    fn keeps_repeated_units() {
        assert_eq!(
            parse_organizational_units("Dev,dev"),
            vec![OrganizationalUnit::Dev, OrganizationalUnit::Dev]
        );
    }
}
