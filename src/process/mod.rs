//! yutu child-process execution: spawn, bounded wait, outcome mapping.

use std::{io, process::Stdio, time::Duration};

use thiserror::Error;
use tokio::{process::Command, time::timeout};
use tracing::{debug, warn};

use crate::{
    command::{build_args, Invocation},
    config::Config,
    execution::{Payload, YutuResult},
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Ways a single invocation can fail before a usable result exists.
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("yutu CLI not found: {0}")]
    NotFound(String),
    #[error("command timed out (exceeded {} seconds)", .0.as_secs())]
    Timeout(Duration),
    #[error("{0}")]
    NonZeroExit(String),
    #[error("JSON parse error: {0}")]
    Malformed(String),
    #[error("execution error: {0}")]
    Unexpected(#[from] io::Error),
}

/// Runs argument vectors built by [`build_args`] against the configured yutu.
#[derive(Debug, Clone)]
pub struct Executor {
    env: Vec<(&'static str, String)>,
    timeout: Duration,
}

impl Executor {
    pub fn new(cfg: &Config) -> Self {
        Self {
            env: cfg.child_env(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.timeout = dur;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Execute `argv` and fold every outcome into a [`YutuResult`].
    pub async fn execute(&self, argv: &[String], expect_json: bool) -> YutuResult {
        let Some((program, args)) = argv.split_first() else {
            return YutuResult::failure("execution error: empty command", "");
        };
        debug!(?argv, "running yutu");

        let out = match self.spawn_and_wait(program, args).await {
            Ok(out) => out,
            Err(e) => {
                warn!(program = %program, error = %e, "yutu invocation failed");
                return YutuResult::failure(e.to_string(), "");
            }
        };

        let stdout = String::from_utf8_lossy(&out.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&out.stderr).into_owned();
        debug!(status = ?out.status.code(), stdout_len = stdout.len(), "yutu exited");

        if !out.status.success() {
            let stderr = stderr.trim();
            let msg = if stderr.is_empty() {
                match out.status.code() {
                    Some(code) => format!("command failed (exit code {})", code),
                    None => "command failed (terminated by signal)".to_string(),
                }
            } else {
                stderr.to_string()
            };
            let err = InvocationError::NonZeroExit(msg);
            warn!(error = %err, "yutu reported failure");
            return YutuResult::failure(err.to_string(), stdout);
        }

        if !expect_json || stdout.trim().is_empty() {
            return YutuResult::success(stdout);
        }

        match parse_payload(&stdout) {
            Ok(payload) => YutuResult::success_with(payload, stdout),
            Err(err) => {
                warn!(error = %err, "yutu output is not valid JSON");
                YutuResult::failure(err.to_string(), stdout)
            }
        }
    }

    /// Build and execute one invocation.
    pub async fn run(&self, cfg: &Config, inv: &Invocation) -> YutuResult {
        let argv = build_args(cfg, inv);
        self.execute(&argv, inv.expects_json()).await
    }

    async fn spawn_and_wait(
        &self,
        program: &str,
        args: &[String],
    ) -> Result<std::process::Output, InvocationError> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .envs(self.env.iter().map(|(k, v)| (*k, v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => InvocationError::NotFound(program.to_string()),
            _ => InvocationError::Unexpected(e),
        })?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let out = timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| InvocationError::Timeout(self.timeout))??;
        Ok(out)
    }
}

fn parse_payload(stdout: &str) -> Result<Payload, InvocationError> {
    let value: serde_json::Value =
        serde_json::from_str(stdout).map_err(|e| InvocationError::Malformed(e.to_string()))?;
    Payload::from_value(value)
        .ok_or_else(|| InvocationError::Malformed("expected a JSON object or array".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_cause() {
        assert_eq!(
            InvocationError::NotFound("/x/yutu".into()).to_string(),
            "yutu CLI not found: /x/yutu"
        );
        assert_eq!(
            InvocationError::Timeout(DEFAULT_TIMEOUT).to_string(),
            "command timed out (exceeded 120 seconds)"
        );
        assert_eq!(
            InvocationError::NonZeroExit("quota exceeded".into()).to_string(),
            "quota exceeded"
        );
    }

    #[test]
    fn payload_parsing() {
        assert!(matches!(parse_payload("[]"), Ok(Payload::ItemList(_))));
        assert!(matches!(parse_payload(r#"{"items": []}"#), Ok(Payload::ItemPage(_))));
        assert!(matches!(parse_payload("42"), Err(InvocationError::Malformed(_))));
        assert!(matches!(parse_payload("{oops"), Err(InvocationError::Malformed(_))));
    }

    #[tokio::test]
    async fn empty_argv_is_a_failure() {
        let exec = Executor { env: Vec::new(), timeout: DEFAULT_TIMEOUT };
        let result = exec.execute(&[], true).await;
        assert!(!result.success);
    }
}
