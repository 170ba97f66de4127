//! CLI argument parsing for the provisioning run.
//!
//! Every input can also come from the CI-style `INPUT_<NAME>` environment
//! variable, so the binary can run unchanged as a pipeline step.
use crate::paths::StoreLayout;
use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Permission set granted by the assignment created in each run.
pub const DEFAULT_PERMISSION_SET: &str = "AdministratorAccess";

#[derive(Parser, Debug)]
#[command(
    name = "fprov",
    version,
    about = "Provision workload account records across YAML configuration stores",
    after_help = "Examples:\n  fprov provision --folder-path ./config --customer-id acme --spoc-email ops@example.com --organisational-units Dev,Test,Prod\n  fprov status --folder-path ./config --json",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Provision(ProvisionArgs),
    Status(StatusArgs),
}

/// Where the store files live.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct LocationArgs {
    /// Folder holding accounts-config.yaml, iam-config.yaml and terraform/groups.yaml
    #[arg(long, value_name = "DIR", env = "INPUT_FOLDER_PATH")]
    pub folder_path: Option<PathBuf>,

    /// Account store file (only the account store is updated)
    #[arg(long, value_name = "FILE", env = "INPUT_FILE_PATH")]
    pub file_path: Option<PathBuf>,
}

impl LocationArgs {
    pub fn layout(&self) -> StoreLayout {
        match (&self.folder_path, &self.file_path) {
            (Some(folder), _) => StoreLayout::Folder(folder.clone()),
            (None, Some(file)) => StoreLayout::AccountsFile(file.clone()),
            // clap enforces one of the two.
            (None, None) => StoreLayout::Folder(PathBuf::from(".")),
        }
    }
}

/// Provision command inputs for a single customer.
#[derive(Parser, Debug)]
#[command(about = "Create workload accounts, an assignment and an access group")]
pub struct ProvisionArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    /// Customer identifier used in every derived name
    #[arg(long, env = "INPUT_CUSTOMER_ID", value_parser = NonEmptyStringValueParser::new())]
    pub customer_id: String,

    /// Single point of contact email, plus-addressed per account
    #[arg(long, env = "INPUT_SPOC_EMAIL", value_parser = NonEmptyStringValueParser::new())]
    pub spoc_email: String,

    /// Comma-separated organizational units (Dev,Test,Prod)
    #[arg(long, env = "INPUT_ORGANISATIONAL_UNITS")]
    pub organisational_units: String,

    /// Permission set assigned to the customer's group
    #[arg(
        long,
        env = "INPUT_PERMISSION_SET_NAME",
        default_value = DEFAULT_PERMISSION_SET,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub permission_set_name: String,
}

/// Status command inputs.
#[derive(Parser, Debug)]
#[command(about = "Report how many records each store holds")]
pub struct StatusArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}
