//! Shared test infrastructure for integration tests.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// CI-style inputs the binary reads from the environment.
const INPUT_VARS: [&str; 6] = [
    "INPUT_FOLDER_PATH",
    "INPUT_FILE_PATH",
    "INPUT_CUSTOMER_ID",
    "INPUT_SPOC_EMAIL",
    "INPUT_ORGANISATIONAL_UNITS",
    "INPUT_PERMISSION_SET_NAME",
];

fn manifest_dir() -> PathBuf {
    PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into()))
}

pub fn fixture_path(rel: &str) -> PathBuf {
    manifest_dir().join("tests/fixtures").join(rel)
}

/// A temporary configuration folder seeded from `tests/fixtures`.
pub struct ConfigFolder {
    dir: TempDir,
}

impl ConfigFolder {
    /// Folder with empty account, assignment and group stores.
    pub fn seeded() -> Self {
        let folder = Self::empty();
        folder.copy_fixture("accounts-config.yaml", "accounts-config.yaml");
        folder.copy_fixture("iam-config.yaml", "iam-config.yaml");
        folder.copy_fixture("terraform/groups.yaml", "terraform/groups.yaml");
        folder
    }

    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn copy_fixture(&self, fixture: &str, rel: &str) -> PathBuf {
        let dest = self.path(rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).expect("create fixture parent");
        }
        fs::copy(fixture_path(fixture), &dest).expect("copy fixture");
        dest
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel)).expect("read store file")
    }
}

/// Result of one `fprov` invocation.
pub struct RunResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl RunResult {
    fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Assert a notification line was logged.
    pub fn assert_logged(&self, message: &str) {
        assert!(
            self.stderr.contains(message),
            "expected {message:?} in stderr:\n{}",
            self.stderr
        );
    }
}

/// Run `fprov` with the given arguments and `INPUT_*` environment.
pub fn run_fprov(args: &[&str], inputs: &[(&str, &str)]) -> RunResult {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_fprov"));
    for var in INPUT_VARS {
        cmd.env_remove(var);
    }
    cmd.env("RUST_LOG", "info").args(args);
    for (key, value) in inputs {
        cmd.env(key, value);
    }
    RunResult::from_output(cmd.output().expect("run fprov"))
}
