//! Command runner trait and its dnf implementation

use std::path::{Path, PathBuf};
use std::process::ExitStatus;

#[cfg(test)]
use mockall::automock;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::UpgradeConfig;
use crate::version::error::UpgradeError;

/// Trait for running a package manager command interactively
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs the package manager with `args` and waits for it to finish
    ///
    /// The child shares our stdin/stdout/stderr so the user can answer prompts.
    ///
    /// # Returns
    /// * `Ok(code)` - Exit code of the child
    /// * `Err(UpgradeError::Io)` - If the child could not be started
    async fn run(&self, args: Vec<String>) -> Result<i32, UpgradeError>;
}

/// Runs dnf with a fixed list of global options in front of every command
pub struct DnfRunner {
    dnf_path: PathBuf,
    global_opts: Vec<String>,
}

impl DnfRunner {
    pub fn new(dnf_path: &Path, global_opts: Vec<String>) -> Self {
        Self {
            dnf_path: dnf_path.to_path_buf(),
            global_opts,
        }
    }

    pub fn from_config(config: &UpgradeConfig) -> Self {
        Self::new(&config.dnf_path, config.dnf_opts.clone())
    }

    /// Full argument list: global options first, then the command's own
    fn command_args(&self, args: Vec<String>) -> Vec<String> {
        self.global_opts.iter().cloned().chain(args).collect()
    }
}

#[async_trait::async_trait]
impl CommandRunner for DnfRunner {
    async fn run(&self, args: Vec<String>) -> Result<i32, UpgradeError> {
        let args = self.command_args(args);
        debug!("Executing command {} {:?} ...", self.dnf_path.display(), args);

        let status = Command::new(&self.dnf_path).args(&args).status().await?;
        let code = exit_code(status);

        debug!(
            "Finished command {} {:?}, rc={}",
            self.dnf_path.display(),
            args,
            code
        );
        Ok(code)
    }
}

/// Map an exit status to a shell-style exit code
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            warn!("Command terminated by signal {}", signal);
            return 128 + signal;
        }
    }

    warn!("Command finished without an exit code: {}", status);
    1
}
