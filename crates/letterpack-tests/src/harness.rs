//! Test harness utilities for running the CLI against a scratch assets tree.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::OnceLock;
use tempfile::TempDir;

use letterpack_cli::AssetConfig;

/// Result of running the letterpack CLI.
#[derive(Debug)]
pub struct CliResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Create a CliResult from a Command Output.
    pub fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Assert that the command succeeded.
    pub fn assert_success(&self) {
        assert!(
            self.success,
            "Command failed with exit code {}.\nstdout: {}\nstderr: {}",
            self.exit_code, self.stdout, self.stderr
        );
    }

    /// Assert that the command failed.
    pub fn assert_failure(&self) {
        assert!(
            !self.success,
            "Expected command to fail, but it succeeded.\nstdout: {}",
            self.stdout
        );
    }
}

/// A scratch working directory with an `assets/` tree.
pub struct TestHarness {
    /// Working directory for test inputs and outputs.
    pub work_dir: TempDir,
}

impl TestHarness {
    /// Create a new harness with an empty `assets/` directory.
    pub fn new() -> Self {
        let work_dir = TempDir::new().expect("Failed to create work dir");
        fs::create_dir(work_dir.path().join("assets")).expect("Failed to create assets dir");
        Self { work_dir }
    }

    /// Get the working directory path.
    pub fn path(&self) -> &Path {
        self.work_dir.path()
    }

    /// Get the assets directory path.
    pub fn assets(&self) -> PathBuf {
        self.path().join("assets")
    }

    /// Asset config rooted at this harness's assets directory.
    pub fn config(&self) -> AssetConfig {
        AssetConfig::new(self.assets())
    }

    /// Write `words.txt`.
    pub fn write_words(&self, contents: &str) {
        fs::write(self.config().words_input_path(), contents).expect("Failed to write words.txt");
    }

    /// Create empty sprite files with the given names.
    pub fn write_sprites(&self, names: &[&str]) {
        let dir = self.config().sprites_dir_path();
        fs::create_dir_all(&dir).expect("Failed to create sprite dir");
        for name in names {
            fs::write(dir.join(name), b"").expect("Failed to write sprite");
        }
    }

    /// Read an output file from the assets directory.
    pub fn read_asset(&self, name: &str) -> String {
        fs::read_to_string(self.assets().join(name))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", name, e))
    }

    /// Run the letterpack CLI with the given arguments, in the work directory.
    pub fn run_cli(&self, args: &[&str]) -> CliResult {
        self.run_cli_with_env(args, &[])
    }

    /// Run the letterpack CLI with extra environment variables.
    pub fn run_cli_with_env(&self, args: &[&str], env: &[(&str, &str)]) -> CliResult {
        let manifest_path = workspace_manifest_path();

        let mut cmd = Command::new("cargo");
        cmd.args(["run", "--quiet", "--manifest-path"])
            .arg(&manifest_path)
            .args(["-p", "letterpack-cli", "--bin", "letterpack", "--"])
            .args(args)
            .env("NO_COLOR", "1")
            .current_dir(self.path());
        for (key, value) in env {
            cmd.env(key, value);
        }

        match cmd.output() {
            Ok(out) => CliResult::from_output(out),
            Err(e) => CliResult {
                success: false,
                exit_code: -1,
                stdout: String::new(),
                stderr: format!("Failed to run CLI: {}", e),
            },
        }
    }
}

fn workspace_manifest_path() -> PathBuf {
    static PATH: OnceLock<PathBuf> = OnceLock::new();
    PATH.get_or_init(|| {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let manifest_path = manifest_dir.join("..").join("..").join("Cargo.toml");
        manifest_path.canonicalize().unwrap_or(manifest_path)
    })
    .clone()
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if tests against a real montage install should run.
pub fn should_run_montage_tests() -> bool {
    std::env::var("LETTERPACK_RUN_MONTAGE_TESTS")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
