//! External process launching

use std::process::{Command, Stdio};

use crate::{Error, Result};

/// Starts application launch commands
pub trait Launcher: Send + Sync {
    /// Start `command` without waiting for it to finish
    ///
    /// # Errors
    ///
    /// Returns error if the process cannot be spawned
    fn launch(&self, command: &str) -> Result<()>;
}

/// Runs commands through the platform shell
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellLauncher;

impl Launcher for ShellLauncher {
    fn launch(&self, command: &str) -> Result<()> {
        let child = shell_command(command)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::Launch(format!("{command}: {e}")))?;

        tracing::info!(command, pid = child.id(), "application launched");
        Ok(())
    }
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}
