//! External editor used to write entry text

use crate::error::{DiaryError, Result};
use std::fs;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Session for editing text in an external editor
pub struct EditorSession {
    command: String,
}

impl EditorSession {
    /// Create a new editor session with the given command
    pub fn new(editor_command: String) -> Self {
        EditorSession {
            command: editor_command,
        }
    }

    /// Seed `scratch` with `initial`, let the user edit it, and return the
    /// edited text. The scratch file is removed afterwards.
    pub fn edit_text(&self, scratch: &Path, initial: &str) -> Result<String> {
        fs::write(scratch, initial)?;
        let outcome = self
            .edit(scratch)
            .and_then(|()| fs::read_to_string(scratch).map_err(DiaryError::Io));
        if let Err(e) = fs::remove_file(scratch) {
            debug!(path = %scratch.display(), error = %e, "could not remove scratch file");
        }
        outcome
    }

    /// Open a file in the editor and wait for it to exit
    pub fn edit(&self, file_path: &Path) -> Result<()> {
        let (program, mut args) = self.parse_command();
        args.push(file_path.to_string_lossy().to_string());
        debug!(%program, ?args, "launching editor");

        // On Windows, use cmd /c so .bat and .cmd editors are found
        let mut cmd = if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(&program);
            cmd
        } else {
            Command::new(&program)
        };

        let status = cmd.args(&args).status().map_err(|e| {
            DiaryError::Editor(format!("Failed to launch editor '{}': {}", program, e))
        })?;

        if !status.success() {
            return Err(DiaryError::Editor(format!(
                "Editor '{}' exited with {}",
                program, status
            )));
        }
        Ok(())
    }

    /// Parse command into program and arguments
    fn parse_command(&self) -> (String, Vec<String>) {
        let mut parts = self.command.split_whitespace().map(str::to_string);

        match parts.next() {
            Some(program) => (program, parts.collect()),
            None if cfg!(windows) => ("notepad".to_string(), Vec::new()),
            None => ("nano".to_string(), Vec::new()),
        }
    }
}
