//! PackageInstaller backed by WP-CLI
//!
//! Runs `wp <plugin|theme> install <url>` and `wp plugin activate <slug> --network`.
//! WP-CLI prints failures as `Error: ...` lines on stderr.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Output;
use tokio::process::Command;

use crate::config::InstallerSettings;
use crate::types::ItemKind;

use super::package_installer::{InstallReport, InstallResult, PackageInstaller};

pub struct WpCliInstaller {
    binary: String,
    site_path: Option<PathBuf>,
}

impl WpCliInstaller {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            site_path: None,
        }
    }

    pub fn from_settings(settings: &InstallerSettings) -> Self {
        Self {
            binary: settings.wp_binary.clone(),
            site_path: settings.wp_path.clone(),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        if let Some(path) = &self.site_path {
            cmd.arg(format!("--path={}", path.display()));
        }
        cmd
    }

    /// `install` arguments for an item kind
    pub fn install_args(kind: ItemKind, download_url: &str) -> Vec<String> {
        vec![
            kind.as_str().to_string(),
            "install".to_string(),
            download_url.to_string(),
        ]
    }

    /// Map a finished `wp ... install` run onto the report channels
    pub fn report_from_output(output: &Output) -> InstallReport {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let errors: Vec<String> = stderr
            .lines()
            .filter_map(|line| line.trim().strip_prefix("Error:"))
            .map(|msg| msg.trim().to_string())
            .collect();

        for warning in stderr.lines().filter_map(|l| l.trim().strip_prefix("Warning:")) {
            tracing::warn!(warning = warning.trim(), "wp-cli warning");
        }

        InstallReport {
            success: output.status.success(),
            error: None,
            skin_error: None,
            skin_errors: errors,
        }
    }
}

impl Default for WpCliInstaller {
    fn default() -> Self {
        Self::from_settings(&InstallerSettings::default())
    }
}

#[async_trait]
impl PackageInstaller for WpCliInstaller {
    async fn install(&self, kind: ItemKind, download_url: &str) -> InstallResult {
        tracing::info!(%kind, binary = %self.binary, "running wp-cli install");

        let report = match self
            .command()
            .args(Self::install_args(kind, download_url))
            .output()
            .await
        {
            Ok(output) => Self::report_from_output(&output),
            Err(e) => InstallReport::failed()
                .with_error(format!("Failed to run {}: {}", self.binary, e)),
        };

        report.into_result()
    }

    async fn activate_network_wide(&self, slug: &str) -> Result<(), String> {
        let output = self
            .command()
            .args(["plugin", "activate", slug, "--network"])
            .output()
            .await
            .map_err(|e| format!("Failed to run {}: {}", self.binary, e))?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if stderr.is_empty() {
                Err(format!("Network activation of {slug} failed"))
            } else {
                Err(stderr)
            }
        }
    }
}
