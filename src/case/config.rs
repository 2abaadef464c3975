use std::path::PathBuf;

/// Settings that control how a [`Case`](super::Case) runs external tools.
#[derive(Debug, Clone)]
pub struct CaseConfig {
    /// Write each tool's combined output to `log.<tool>` in the case root.
    pub log_tool_output: bool,

    /// Directory holding the OpenFOAM executables.
    ///
    /// When `None`, tools are looked up on `PATH`.
    pub executable_dir: Option<PathBuf>,
}

impl Default for CaseConfig {
    fn default() -> Self {
        Self {
            log_tool_output: true,
            executable_dir: None,
        }
    }
}

impl CaseConfig {
    /// Resolves the program to launch for `tool`.
    pub(super) fn program(&self, tool: &str) -> PathBuf {
        match &self.executable_dir {
            Some(dir) => dir.join(tool),
            None => PathBuf::from(tool),
        }
    }
}
