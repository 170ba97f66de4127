//! Access group registry (`terraform/groups.yaml`), a bare top-level list.
use super::StoreFile;
use crate::error::StoreError;
use crate::paths::groups_path;
use crate::records::AccessGroup;
use std::path::Path;

pub const ENTITY: &str = "groups";
const ROOT: &[&str] = &[];

#[derive(Debug)]
pub struct GroupStore {
    file: StoreFile,
    count: usize,
}

impl GroupStore {
    /// Load `<folder>/terraform/groups.yaml`. An empty or `null` document is
    /// an empty list.
    pub fn open(folder: &Path) -> Result<Self, StoreError> {
        let path = groups_path(folder);
        let file = StoreFile::open(ENTITY, &path)?;
        let Some(count) = file.document().section(ROOT).item_count() else {
            return Err(StoreError::Read {
                entity: ENTITY,
                path,
                source: None,
            });
        };
        file.report_loaded(count);
        Ok(Self { file, count })
    }

    pub fn group_count(&self) -> usize {
        self.count
    }

    pub fn add_group(
        &mut self,
        group_name: &str,
        customer_name: &str,
    ) -> Result<AccessGroup, StoreError> {
        let group = AccessGroup::new(group_name, customer_name);
        self.count = self.file.append(ROOT, std::slice::from_ref(&group))?;
        self.file.write(self.count)?;
        Ok(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::write_store;

    const ONE_GROUP: &str = "\
- name: FoundryAdministratorAccessExisting
  description: Foundry Identity Center Group for Existing
";

    #[test]
    fn empty_file_is_an_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        write_store(dir.path(), "terraform/groups.yaml", "");
        assert_eq!(GroupStore::open(dir.path()).unwrap().group_count(), 0);
    }

    #[test]
    fn loads_existing_groups() {
        let dir = tempfile::tempdir().unwrap();
        write_store(dir.path(), "terraform/groups.yaml", ONE_GROUP);
        assert_eq!(GroupStore::open(dir.path()).unwrap().group_count(), 1);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = GroupStore::open(dir.path()).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "Error reading groups from file '{}'",
                dir.path().join("terraform/groups.yaml").display()
            )
        );
    }

    #[test]
    fn mapping_root_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_store(dir.path(), "terraform/groups.yaml", "groups: []\n");
        assert!(matches!(
            GroupStore::open(dir.path()).unwrap_err(),
            StoreError::Read { .. }
        ));
    }

    #[test]
    fn empty_and_null_documents_accept_new_groups() {
        for contents in ["", "null\n", "~\n", "--- null\n", "# groups\nnull\n"] {
            let dir = tempfile::tempdir().unwrap();
            let path = write_store(dir.path(), "terraform/groups.yaml", contents);
            let mut store = GroupStore::open(dir.path()).unwrap();
            assert_eq!(store.group_count(), 0, "{contents:?}");
            store
                .add_group("FoundryAdministratorAccessAcme", "acme")
                .unwrap_or_else(|err| panic!("{contents:?}: {err}"));

            let reloaded = GroupStore::open(dir.path()).unwrap();
            assert_eq!(reloaded.group_count(), 1, "{contents:?}");
            let text = std::fs::read_to_string(&path).unwrap();
            assert!(
                text.ends_with("- name: FoundryAdministratorAccessAcme\n  description: Foundry Identity Center Group for acme\n"),
                "{contents:?}: {text}"
            );
            assert!(!text.contains("null") && !text.contains('~'), "{text}");
        }
    }

    #[test]
    fn null_document_keeps_marker_and_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_store(dir.path(), "terraform/groups.yaml", "# groups\n--- ~ # none yet\n");
        let mut store = GroupStore::open(dir.path()).unwrap();
        store.add_group("FoundryReadOnlyAcme", "acme").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "# groups\n--- # none yet\n- name: FoundryReadOnlyAcme\n  description: Foundry Identity Center Group for acme\n"
        );
    }

    #[test]
    fn adds_group_in_block_style() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_store(dir.path(), "terraform/groups.yaml", "[]\n");
        let mut store = GroupStore::open(dir.path()).unwrap();
        let group = store
            .add_group("FoundryAdministratorAccessAcme", "acme")
            .unwrap();
        assert_eq!(group.description, "Foundry Identity Center Group for acme");
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "- name: FoundryAdministratorAccessAcme\n  description: Foundry Identity Center Group for acme\n"
        );
    }

    #[test]
    fn appends_after_existing_groups() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_store(dir.path(), "terraform/groups.yaml", ONE_GROUP);
        let mut store = GroupStore::open(dir.path()).unwrap();
        store.add_group("FoundryReadOnlyAcme", "acme").unwrap();
        assert_eq!(store.group_count(), 2);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with(ONE_GROUP));
        assert!(text.ends_with("- name: FoundryReadOnlyAcme\n  description: Foundry Identity Center Group for acme\n"));
    }
}
