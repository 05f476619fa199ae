//! HandBrakeCLI-based engine implementation.

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use super::config::EngineConfig;
use super::error::EngineError;
use super::traits::Engine;
use super::types::ConversionJob;

/// Title number that makes HandBrakeCLI scan every title instead of encoding.
const SCAN_ALL_TITLES: &str = "0";

/// HandBrakeCLI-based engine implementation.
pub struct HandbrakeEngine {
    config: EngineConfig,
}

impl HandbrakeEngine {
    /// Creates a new engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Creates an engine with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Builds arguments for a title scan.
    fn build_scan_args(&self, source: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = self
            .config
            .launcher_args
            .iter()
            .map(OsString::from)
            .collect();

        args.extend([
            OsString::from("-i"),
            source.as_os_str().to_owned(),
            OsString::from("-t"),
            OsString::from(SCAN_ALL_TITLES),
        ]);

        args.extend(self.config.extra_args.iter().map(OsString::from));
        args
    }

    /// Builds arguments for converting one title.
    fn build_convert_args(&self, job: &ConversionJob) -> Vec<OsString> {
        let mut args: Vec<OsString> = self
            .config
            .launcher_args
            .iter()
            .map(OsString::from)
            .collect();

        args.extend([
            OsString::from("-t"),
            OsString::from(job.track_id()),
            OsString::from("-i"),
            job.input_dir.as_os_str().to_owned(),
            OsString::from("--preset"),
            OsString::from(&job.profile),
            OsString::from("-o"),
            job.output_path.as_os_str().to_owned(),
        ]);

        args.extend(self.config.extra_args.iter().map(OsString::from));
        args
    }

    fn command_line(&self, args: &[OsString]) -> String {
        std::iter::once(self.config.path.as_os_str())
            .chain(args.iter().map(|a| a.as_os_str()))
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl Engine for HandbrakeEngine {
    fn name(&self) -> &str {
        "handbrake"
    }

    async fn scan(&self, source: &Path) -> Result<String, EngineError> {
        let args = self.build_scan_args(source);
        debug!("Command line: {}", self.command_line(&args));

        let output = Command::new(&self.config.path)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| EngineError::from_spawn(e, &self.config.path))?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(EngineError::exited(output.status, Some(stderr)));
        }

        // HandBrakeCLI prints the title list on stderr; keep both streams.
        let mut report = String::from_utf8_lossy(&output.stdout).into_owned();
        if !report.is_empty() && !report.ends_with('\n') {
            report.push('\n');
        }
        report.push_str(&stderr);

        Ok(report)
    }

    async fn convert(&self, job: &ConversionJob) -> Result<(), EngineError> {
        let args = self.build_convert_args(job);
        debug!("Command line: {}", self.command_line(&args));

        let status = Command::new(&self.config.path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| EngineError::from_spawn(e, &self.config.path))?;

        if !status.success() {
            return Err(EngineError::exited(status, None));
        }

        Ok(())
    }

    async fn validate(&self) -> Result<(), EngineError> {
        let mut args: Vec<OsString> = self
            .config
            .launcher_args
            .iter()
            .map(OsString::from)
            .collect();
        args.push(OsString::from("--version"));

        Command::new(&self.config.path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| EngineError::from_spawn(e, &self.config.path))?;

        Ok(())
    }
}
