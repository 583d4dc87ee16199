// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Configuration for kanoah-report
//!
//! Every option can be given as a flag or through its environment variable.
//! The project key, Jira credentials and report path are required; they are
//! checked by [`Config::validate`] before any work starts.

use std::fmt;
use std::path::PathBuf;

use clap::Parser;

/// Kanoah REST API used when `--jira-api-url` is not given
pub const DEFAULT_JIRA_API_URL: &str = "https://jit.ozon.ru/rest/atm/1.0/";

/// Kanoah Report - publish go test results to Kanoah test management
#[derive(Parser, Clone)]
#[command(name = "kanoah-report")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Path to the `go test -json` report file
    #[arg(long, env = "KANOAH_JSON_REPORT")]
    pub json_report: Option<PathBuf>,

    /// Base URL of the Kanoah REST API
    #[arg(long, env = "KANOAH_JIRA_API_URL", default_value = DEFAULT_JIRA_API_URL)]
    pub jira_api_url: String,

    /// Kanoah project key, e.g. COR
    #[arg(long, env = "KANOAH_PROJECT")]
    pub kanoah_project: Option<String>,

    /// Name of the test run to replace
    #[arg(long, env = "KANOAH_TESTRUN", default_value = "")]
    pub kanoah_testrun: String,

    /// Jira user name
    #[arg(long, env = "KANOAH_JIRA_USER")]
    pub jira_user: Option<String>,

    /// Jira password
    #[arg(long, env = "KANOAH_JIRA_PASSWD", hide_env_values = true)]
    pub jira_passwd: Option<String>,

    /// Logging level (trace, debug, info, warn, error)
    ///
    /// `RUST_LOG` directives still take precedence for individual targets.
    #[arg(long, env = "KANOAH_LOG_LEVEL", default_value = "info")]
    pub log_level: tracing::Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            json_report: None,
            jira_api_url: DEFAULT_JIRA_API_URL.to_string(),
            kanoah_project: None,
            kanoah_testrun: String::new(),
            jira_user: None,
            jira_passwd: None,
            log_level: tracing::Level::INFO,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("json_report", &self.json_report)
            .field("jira_api_url", &self.jira_api_url)
            .field("kanoah_project", &self.kanoah_project)
            .field("kanoah_testrun", &self.kanoah_testrun)
            .field("jira_user", &self.jira_user)
            .field("jira_passwd", &self.jira_passwd.as_ref().map(|_| "<redacted>"))
            .field("log_level", &self.log_level)
            .finish()
    }
}

/// Validated settings for one reporting run
#[derive(Clone)]
pub struct Settings {
    /// Report to read
    pub report_path: PathBuf,
    /// Kanoah REST API base URL
    pub api_url: String,
    /// Project key
    pub project: String,
    /// Test run name
    pub run_name: String,
    /// Jira user
    pub user: String,
    /// Jira password
    pub password: String,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("report_path", &self.report_path)
            .field("api_url", &self.api_url)
            .field("project", &self.project)
            .field("run_name", &self.run_name)
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

/// A present, non-blank value
fn required(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl Config {
    /// Get the log level
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        self.log_level
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The project key is missing or blank
    /// - The Jira user or password is missing or blank
    /// - The report path is missing
    pub fn validate(&self) -> Result<Settings, ConfigError> {
        let project = required(self.kanoah_project.as_ref()).ok_or(ConfigError::MissingProject)?;
        let (Some(user), Some(password)) = (
            required(self.jira_user.as_ref()),
            required(self.jira_passwd.as_ref()),
        ) else {
            return Err(ConfigError::MissingCredentials);
        };
        let report_path = self
            .json_report
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(ConfigError::MissingReport)?;

        Ok(Settings {
            report_path,
            api_url: self.jira_api_url.clone(),
            project,
            run_name: self.kanoah_testrun.clone(),
            user,
            password,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No project key given
    #[error("provide your kanoah project name, ex. --kanoah-project COR")]
    MissingProject,

    /// User or password missing
    #[error("provide your jira user and password, ex. --jira-user abc --jira-passwd 123")]
    MissingCredentials,

    /// No report file given
    #[error("provide the go test json report path, ex. --json-report report.json")]
    MissingReport,
}
