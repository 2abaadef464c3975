use std::{fs, process::Command};

use super::{Case, CaseError};

impl Case {
    /// Runs an OpenFOAM utility or solver with the case root as working directory.
    ///
    /// When [`CaseConfig::log_tool_output`](super::CaseConfig::log_tool_output)
    /// is set, stdout and stderr are written to `log.<tool>` in the case root.
    /// Returns the tool's standard output.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::Spawn`] if the executable cannot be started,
    /// [`CaseError::ToolFailed`] if it exits unsuccessfully, or
    /// [`CaseError::Io`] if the log cannot be written.
    pub fn run_tool(&self, tool: &str, args: &[&str]) -> Result<String, CaseError> {
        let program = self.config.program(tool);
        tracing::info!(tool, ?args, case = %self.root.display(), "running tool");

        let output = Command::new(&program)
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|source| CaseError::Spawn {
                tool: tool.to_string(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr);

        let log = if self.config.log_tool_output {
            let path = self.log_path(tool);
            let mut text = stdout.clone();
            text.push_str(&stderr);
            fs::write(&path, text).map_err(CaseError::io(&path))?;
            Some(path)
        } else {
            None
        };

        if !output.status.success() {
            tracing::warn!(tool, status = ?output.status.code(), "tool failed");
            return Err(CaseError::ToolFailed {
                tool: tool.to_string(),
                status: output.status.code(),
                log,
            });
        }

        tracing::info!(tool, "tool finished");
        Ok(stdout)
    }

    fn log_path(&self, tool: &str) -> std::path::PathBuf {
        let name = tool.rsplit(['/', '\\']).next().unwrap_or(tool);
        self.root.join(format!("log.{name}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::case::CaseConfig;

    #[test]
    fn missing_executable_is_a_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let case = Case::new(dir.path()).unwrap();

        let error = case
            .run_tool("firefish-no-such-tool", &[])
            .unwrap_err();
        assert!(matches!(error, CaseError::Spawn { ref tool, .. } if tool == "firefish-no-such-tool"));
        assert!(!case.path("log.firefish-no-such-tool").exists());
    }

    #[test]
    fn executable_dir_is_prepended() {
        let config = CaseConfig {
            executable_dir: Some("/opt/openfoam/bin".into()),
            ..CaseConfig::default()
        };
        assert_eq!(
            config.program("blockMesh"),
            std::path::Path::new("/opt/openfoam/bin/blockMesh")
        );
    }

    #[cfg(unix)]
    #[test]
    fn output_is_logged_in_the_case_root() {
        let dir = tempfile::tempdir().unwrap();
        let case = Case::new(dir.path()).unwrap();

        let stdout = case.run_tool("sh", &["-c", "pwd; echo meshed"]).unwrap();
        assert!(stdout.trim_end().ends_with("meshed"));

        let log = fs::read_to_string(case.path("log.sh")).unwrap();
        assert!(log.contains("meshed"));
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let case = Case::with_config(
            dir.path(),
            CaseConfig {
                log_tool_output: false,
                ..CaseConfig::default()
            },
        )
        .unwrap();

        let error = case.run_tool("sh", &["-c", "exit 3"]).unwrap_err();
        match error {
            CaseError::ToolFailed { status, log, .. } => {
                assert_eq!(status, Some(3));
                assert!(log.is_none());
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
