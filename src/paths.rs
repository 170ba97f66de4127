//! Typed paths into a configuration folder.
//!
//! The current layout is a folder holding conventionally named store files.
//! The historical layout addressed the account store file directly, in which
//! case the other stores are not reachable.
use std::path::{Path, PathBuf};

pub const ACCOUNTS_CONFIG_FILE: &str = "accounts-config.yaml";
pub const IAM_CONFIG_FILE: &str = "iam-config.yaml";
pub const GROUPS_FILE_REL: &str = "terraform/groups.yaml";

/// How the caller addresses the stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLayout {
    /// Folder containing every store file.
    Folder(PathBuf),
    /// The account store file itself.
    AccountsFile(PathBuf),
}

impl StoreLayout {
    /// Return the account store file path.
    pub fn accounts_path(&self) -> PathBuf {
        match self {
            Self::Folder(root) => root.join(ACCOUNTS_CONFIG_FILE),
            Self::AccountsFile(path) => path.clone(),
        }
    }

    /// Return the assignment store file path, if this layout has one.
    pub fn assignments_path(&self) -> Option<PathBuf> {
        self.folder().map(|root| root.join(IAM_CONFIG_FILE))
    }

    /// Return the folder the group store is resolved against, if any.
    pub fn groups_folder(&self) -> Option<&Path> {
        self.folder()
    }

    fn folder(&self) -> Option<&Path> {
        match self {
            Self::Folder(root) => Some(root),
            Self::AccountsFile(_) => None,
        }
    }
}

/// Return `<folder>/terraform/groups.yaml`.
pub fn groups_path(folder: &Path) -> PathBuf {
    folder.join(GROUPS_FILE_REL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_layout_resolves_every_store() {
        let layout = StoreLayout::Folder(PathBuf::from("/cfg"));
        assert_eq!(layout.accounts_path(), Path::new("/cfg/accounts-config.yaml"));
        assert_eq!(
            layout.assignments_path(),
            Some(PathBuf::from("/cfg/iam-config.yaml"))
        );
        assert_eq!(
            layout.groups_folder().map(groups_path),
            Some(PathBuf::from("/cfg/terraform/groups.yaml"))
        );
    }

    #[test]
    fn file_layout_only_reaches_accounts() {
        let layout = StoreLayout::AccountsFile(PathBuf::from("/cfg/custom.yaml"));
        assert_eq!(layout.accounts_path(), Path::new("/cfg/custom.yaml"));
        assert_eq!(layout.assignments_path(), None);
        assert_eq!(layout.groups_folder(), None);
    }
}
