//! Montage subprocess orchestrator.
//!
//! Resolves an ImageMagick `montage` executable and runs it once per sheet.
//! The command line is
//! `montage <images...> -tile <cols>x<rows> -geometry <w>x<h> <output>`.

use std::ffi::OsString;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use crate::error::{MontageError, MontageResult};
use crate::tiler::{TileRequest, Tiler};

/// Environment variable that overrides montage discovery.
pub const MONTAGE_PATH_ENV: &str = "LETTERPACK_MONTAGE";

/// Configuration for the montage orchestrator.
#[derive(Debug, Clone)]
pub struct MontageConfig {
    /// Explicit path (or PATH-resolvable name) of the montage executable.
    pub tool_path: Option<PathBuf>,
    /// Upper bound on the tool's run time. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Whether to capture the tool's stderr for error reporting.
    pub capture_stderr: bool,
}

impl Default for MontageConfig {
    fn default() -> Self {
        Self {
            tool_path: None,
            timeout: None,
            capture_stderr: true,
        }
    }
}

impl MontageConfig {
    /// Sets the montage executable path.
    pub fn tool_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.tool_path = Some(path.into());
        self
    }

    /// Sets the timeout duration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }
}

/// A located montage executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MontageTool {
    /// The program to spawn.
    pub program: PathBuf,
    /// Leading argument for multiplexed binaries (`magick montage`).
    pub subcommand: Option<&'static str>,
}

impl MontageTool {
    fn direct(program: PathBuf) -> Self {
        Self {
            program,
            subcommand: None,
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        if let Some(sub) = self.subcommand {
            cmd.arg(sub);
        }
        cmd
    }

    /// Human-readable invocation, e.g. `/usr/bin/magick montage`.
    pub fn display(&self) -> String {
        match self.subcommand {
            Some(sub) => format!("{} {}", self.program.display(), sub),
            None => self.program.display().to_string(),
        }
    }
}

/// The montage subprocess orchestrator.
#[derive(Debug, Clone, Default)]
pub struct Montage {
    config: MontageConfig,
}

impl Montage {
    /// Creates a new orchestrator with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new orchestrator with the given configuration.
    pub fn with_config(config: MontageConfig) -> Self {
        Self { config }
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &MontageConfig {
        &self.config
    }

    /// Finds the montage executable.
    pub fn find_tool(&self) -> MontageResult<MontageTool> {
        // Explicit configuration must resolve, otherwise it is an error.
        if let Some(ref path) = self.config.tool_path {
            if path.exists() {
                return Ok(MontageTool::direct(path.clone()));
            }
            if let Ok(found) = which::which(path) {
                return Ok(MontageTool::direct(found));
            }
            return Err(MontageError::ConfiguredToolMissing { path: path.clone() });
        }

        if let Ok(path) = std::env::var(MONTAGE_PATH_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(MontageTool::direct(path));
            }
        }

        if let Ok(path) = which::which("montage") {
            return Ok(MontageTool::direct(path));
        }

        // ImageMagick 7 may only ship the multiplexed binary.
        if let Ok(path) = which::which("magick") {
            return Ok(MontageTool {
                program: path,
                subcommand: Some("montage"),
            });
        }

        let common_paths: &[&str] = if cfg!(windows) {
            &["C:\\Program Files\\ImageMagick\\montage.exe"]
        } else if cfg!(target_os = "macos") {
            &["/opt/homebrew/bin/montage", "/usr/local/bin/montage"]
        } else {
            &["/usr/bin/montage", "/usr/local/bin/montage"]
        };

        for path_str in common_paths {
            let path = PathBuf::from(path_str);
            if path.exists() {
                return Ok(MontageTool::direct(path));
            }
        }

        Err(MontageError::ToolNotFound)
    }

    /// Returns the first line of `montage -version`.
    pub fn version(&self) -> MontageResult<String> {
        let tool = self.find_tool()?;
        let output = tool
            .command()
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .map_err(MontageError::SpawnFailed)?;
        if !output.status.success() {
            return Err(MontageError::process_failed(
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr),
            ));
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().next().unwrap_or_default().trim().to_string())
    }

    /// Runs montage for a single sheet.
    pub fn run(&self, request: &TileRequest<'_>) -> MontageResult<PathBuf> {
        let tool = self.find_tool()?;

        let mut cmd = tool.command();
        cmd.args(build_args(request));
        cmd.stdin(Stdio::null()).stdout(Stdio::null());
        if self.config.capture_stderr {
            cmd.stderr(Stdio::piped());
        } else {
            cmd.stderr(Stdio::inherit());
        }

        let child = cmd.spawn().map_err(MontageError::SpawnFailed)?;
        let (status, stderr) =
            wait_with_timeout(child, self.config.timeout, self.config.capture_stderr)?;

        if !status.success() {
            let exit_code = status.code().unwrap_or(-1);
            return Err(MontageError::process_failed(exit_code, stderr));
        }

        Ok(request.output.to_path_buf())
    }
}

impl Tiler for Montage {
    fn tile(&self, request: &TileRequest<'_>) -> MontageResult<PathBuf> {
        self.run(request)
    }
}

/// Builds the montage argument list (without the program itself).
pub fn build_args(request: &TileRequest<'_>) -> Vec<OsString> {
    let mut args: Vec<OsString> = request
        .images
        .iter()
        .map(|p| p.as_os_str().to_os_string())
        .collect();
    args.push("-tile".into());
    args.push(request.grid.to_string().into());
    args.push("-geometry".into());
    args.push(request.cell.to_string().into());
    args.push(request.output.as_os_str().to_os_string());
    args
}

fn wait_with_timeout(
    mut child: Child,
    timeout: Option<Duration>,
    capture_stderr: bool,
) -> MontageResult<(ExitStatus, String)> {
    let Some(timeout) = timeout else {
        let output = child.wait_with_output()?;
        let stderr = if capture_stderr {
            String::from_utf8_lossy(&output.stderr).to_string()
        } else {
            String::new()
        };
        return Ok((output.status, stderr));
    };

    // Drain stderr while polling, a full pipe would stall the tool.
    let reader = child
        .stderr
        .take()
        .filter(|_| capture_stderr)
        .map(|mut err| {
            std::thread::spawn(move || {
                let mut buf = String::new();
                let _ = err.read_to_string(&mut buf);
                buf
            })
        });

    let start = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(MontageError::Timeout {
                        timeout_secs: timeout.as_secs(),
                    });
                }
                std::thread::sleep(Duration::from_millis(50));
            }
            Err(e) => return Err(MontageError::SpawnFailed(e)),
        }
    };

    let stderr = reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default();
    Ok((status, stderr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiler::{CellSize, GridSize};
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn request<'a>(images: &'a [PathBuf], output: &'a Path) -> TileRequest<'a> {
        TileRequest {
            images,
            grid: GridSize::for_count(images.len(), 8),
            cell: CellSize {
                width: 215,
                height: 265,
            },
            output,
        }
    }

    #[test]
    fn test_build_args_order() {
        let images = vec![PathBuf::from("a/A1.png"), PathBuf::from("a/B1.png")];
        let output = Path::new("assets/spritesheet.webp");
        let args = build_args(&request(&images, output));
        let args: Vec<_> = args.iter().map(|a| a.to_string_lossy().to_string()).collect();
        assert_eq!(
            args,
            vec![
                "a/A1.png",
                "a/B1.png",
                "-tile",
                "8x1",
                "-geometry",
                "215x265",
                "assets/spritesheet.webp",
            ]
        );
    }

    #[test]
    fn test_config_builder() {
        let config = MontageConfig::default()
            .tool_path("/usr/bin/montage")
            .timeout_secs(30);
        assert_eq!(config.tool_path, Some(PathBuf::from("/usr/bin/montage")));
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert!(config.capture_stderr);
    }

    #[test]
    fn test_missing_configured_tool_is_an_error() {
        let montage = Montage::with_config(
            MontageConfig::default().tool_path("/definitely/not/here/montage-xyz"),
        );
        assert!(matches!(
            montage.find_tool(),
            Err(MontageError::ConfiguredToolMissing { .. })
        ));
    }

    #[test]
    fn test_tool_display() {
        let tool = MontageTool {
            program: PathBuf::from("/usr/bin/magick"),
            subcommand: Some("montage"),
        };
        assert_eq!(tool.display(), "/usr/bin/magick montage");
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use pretty_assertions::assert_eq;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
            let path = dir.join(name);
            fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[test]
        fn test_run_success_writes_last_argument() {
            let tmp = TempDir::new().unwrap();
            // The last argument is the output path.
            let tool = write_script(
                tmp.path(),
                "montage",
                r#"for last in "$@"; do :; done; echo sheet > "$last""#,
            );
            let images = vec![tmp.path().join("A1.png")];
            let output = tmp.path().join("sheet.webp");
            let montage = Montage::with_config(MontageConfig::default().tool_path(&tool));

            let written = montage.tile(&request(&images, &output)).unwrap();
            assert_eq!(written, output);
            assert!(output.exists());
        }

        #[test]
        fn test_run_failure_captures_stderr() {
            let tmp = TempDir::new().unwrap();
            let tool = write_script(
                tmp.path(),
                "montage",
                "echo 'unable to open image' 1>&2; exit 3",
            );
            let images = vec![tmp.path().join("A1.png")];
            let output = tmp.path().join("sheet.webp");
            let montage = Montage::with_config(MontageConfig::default().tool_path(&tool));

            match montage.tile(&request(&images, &output)) {
                Err(MontageError::ProcessFailed { exit_code, stderr }) => {
                    assert_eq!(exit_code, 3);
                    assert!(stderr.contains("unable to open image"));
                }
                other => panic!("expected ProcessFailed, got {:?}", other),
            }
        }

        #[test]
        fn test_run_failure_with_large_stderr_under_timeout() {
            let tmp = TempDir::new().unwrap();
            // More than a pipe buffer of warnings before failing.
            let tool = write_script(
                tmp.path(),
                "montage",
                "i=0; while [ $i -lt 4000 ]; do echo 'montage: unable to open image A1.png: No such file' 1>&2; i=$((i+1)); done; exit 1",
            );
            let images = vec![tmp.path().join("A1.png")];
            let output = tmp.path().join("sheet.webp");
            let montage = Montage::with_config(
                MontageConfig::default().tool_path(&tool).timeout_secs(30),
            );

            match montage.tile(&request(&images, &output)) {
                Err(MontageError::ProcessFailed { exit_code, stderr }) => {
                    assert_eq!(exit_code, 1);
                    assert!(stderr.len() > 65536);
                    assert!(stderr.starts_with("montage: unable to open image"));
                }
                other => panic!("expected ProcessFailed, got {:?}", other),
            }
        }

        #[test]
        fn test_run_times_out() {
            let tmp = TempDir::new().unwrap();
            let tool = write_script(tmp.path(), "montage", "sleep 5");
            let images = vec![tmp.path().join("A1.png")];
            let output = tmp.path().join("sheet.webp");
            let montage = Montage::with_config(
                MontageConfig::default()
                    .tool_path(&tool)
                    .timeout(Duration::from_millis(200)),
            );

            assert!(matches!(
                montage.tile(&request(&images, &output)),
                Err(MontageError::Timeout { .. })
            ));
        }

        #[test]
        fn test_version_reads_first_line() {
            let tmp = TempDir::new().unwrap();
            let tool = write_script(
                tmp.path(),
                "montage",
                "echo 'Version: ImageMagick 6.9.12'; echo 'Copyright'",
            );
            let montage = Montage::with_config(MontageConfig::default().tool_path(&tool));
            assert_eq!(montage.version().unwrap(), "Version: ImageMagick 6.9.12");
        }
    }
}
