//! Builder for executing external tool commands.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use ddsforge_common::{Error, Result};

use crate::tools::Shim;

/// Output captured from a tool execution.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Process exit status.
    pub status: ExitStatus,
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
}

/// A builder for constructing and executing external tool invocations.
///
/// When a [`Shim`] is attached the shim becomes the spawned program and the
/// tool path is passed as its first argument.
///
/// # Example
///
/// ```no_run
/// use ddsforge_tools::{Shim, ToolCommand};
/// use std::path::PathBuf;
///
/// let output = ToolCommand::new(PathBuf::from("texconv.exe"))
///     .via(Shim::wine("/usr/bin/wine"))
///     .args(["-f", "DXT5"])
///     .arg("x.png")
///     .execute()?;
/// println!("{}", output.stdout);
/// # Ok::<(), ddsforge_common::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<OsString>,
    shim: Option<Shim>,
}

impl ToolCommand {
    /// Create a new command for the given program path.
    pub fn new(program: PathBuf) -> Self {
        Self {
            program,
            args: Vec::new(),
            shim: None,
        }
    }

    /// Run the program through a launcher.
    pub fn via(&mut self, shim: Shim) -> &mut Self {
        self.shim = Some(shim);
        self
    }

    /// Append a single argument.
    pub fn arg(&mut self, s: impl AsRef<OsStr>) -> &mut Self {
        self.args.push(s.as_ref().to_os_string());
        self
    }

    /// Append multiple arguments.
    pub fn args(&mut self, iter: impl IntoIterator<Item = impl AsRef<OsStr>>) -> &mut Self {
        self.args
            .extend(iter.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Name of the tool, used in errors and logs.
    pub fn tool_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string())
    }

    /// The full argv that will be spawned, launcher first when present.
    pub fn command_line(&self) -> Vec<OsString> {
        let mut argv = Vec::with_capacity(self.args.len() + 2);
        if let Some(ref shim) = self.shim {
            argv.push(shim.path.clone().into_os_string());
        }
        argv.push(self.program.clone().into_os_string());
        argv.extend(self.args.iter().cloned());
        argv
    }

    /// Environment overrides applied to the spawned process.
    pub fn envs(&self) -> &[(String, String)] {
        self.shim.as_ref().map(|s| s.env.as_slice()).unwrap_or(&[])
    }

    fn build(&self) -> Command {
        let argv = self.command_line();
        let mut cmd = Command::new(&argv[0]);
        cmd.args(&argv[1..]);
        for (key, value) in self.envs() {
            cmd.env(key, value);
        }
        cmd
    }

    /// Execute the command and wait for it, capturing stdout and stderr.
    ///
    /// # Errors
    ///
    /// - Returns [`Error::Tool`] if spawning the process fails.
    /// - Returns [`Error::Tool`] if the process exits with a non-zero status
    ///   (message includes stderr, or the tail of stdout when stderr is empty).
    pub fn execute(&self) -> Result<ToolOutput> {
        let tool = self.tool_name();
        tracing::debug!("Running {:?}", self.command_line());

        let output = self
            .build()
            .output()
            .map_err(|e| Error::tool_failed(&tool, format!("failed to spawn: {e}")))?;

        let tool_output = ToolOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        if !output.status.success() {
            return Err(Error::tool_failed(
                tool,
                format!(
                    "exited with status {}: {}",
                    output.status,
                    failure_detail(&tool_output)
                ),
            ));
        }

        tracing::trace!("{} output: {}", tool, tool_output.stdout.trim());
        Ok(tool_output)
    }
}

// texconv reports most errors on stdout.
fn failure_detail(output: &ToolOutput) -> &str {
    let stderr = output.stderr.trim();
    if !stderr.is_empty() {
        return stderr;
    }
    output.stdout.trim().lines().last().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_without_shim() {
        let mut cmd = ToolCommand::new(PathBuf::from("/opt/texconv.exe"));
        cmd.args(["-f", "DXT5"]).arg("x.png");

        let argv: Vec<_> = cmd.command_line();
        assert_eq!(argv, vec!["/opt/texconv.exe", "-f", "DXT5", "x.png"]);
        assert!(cmd.envs().is_empty());
        assert_eq!(cmd.tool_name(), "texconv.exe");
    }

    #[test]
    fn command_line_with_shim() {
        let mut cmd = ToolCommand::new(PathBuf::from("/opt/texconv.exe"));
        cmd.via(Shim::wine("/usr/bin/wine")).arg("x.png");

        assert_eq!(
            cmd.command_line(),
            vec!["/usr/bin/wine", "/opt/texconv.exe", "x.png"]
        );
        assert_eq!(
            cmd.envs(),
            &[("WINEDEBUG".to_string(), "-all".to_string())]
        );
        // Errors still name the wrapped tool
        assert_eq!(cmd.tool_name(), "texconv.exe");
    }

    #[test]
    fn execute_nonexistent_tool() {
        let result = ToolCommand::new(PathBuf::from("nonexistent_tool_xyz_12345")).execute();
        let err = result.unwrap_err();
        assert!(err.to_string().contains("failed to spawn"), "unexpected error: {err}");
    }

    #[cfg(unix)]
    #[test]
    fn execute_reports_non_zero_exit() {
        let result = ToolCommand::new(PathBuf::from("sh"))
            .args(["-c", "echo boom >&2; exit 3"])
            .execute();
        let err = result.unwrap_err().to_string();
        assert!(err.contains("boom"), "unexpected error: {err}");
    }

    #[cfg(unix)]
    #[test]
    fn execute_captures_stdout() {
        let out = ToolCommand::new(PathBuf::from("sh"))
            .args(["-c", "echo hello"])
            .execute()
            .unwrap();
        assert!(out.status.success());
        assert_eq!(out.stdout.trim(), "hello");
    }

    #[cfg(unix)]
    #[test]
    fn shim_env_reaches_process() {
        // `sh` as launcher: argv becomes `sh <script> ...`
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("print-env.sh");
        std::fs::write(&script, "echo \"$WINEDEBUG\"\n").unwrap();

        let shim = Shim {
            name: "sh".to_string(),
            path: PathBuf::from("sh"),
            env: vec![("WINEDEBUG".to_string(), "-all".to_string())],
        };
        let out = ToolCommand::new(script).via(shim).execute().unwrap();
        assert_eq!(out.stdout.trim(), "-all");
    }
}
