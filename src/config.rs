use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use pmdgate_core::ReportKind;

use crate::check::CheckOptions;
use crate::cli::args::Args;

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct PmdgateConfig {
    #[serde(default)]
    pub check: CheckConfig,
}

/// Settings of the violation check.
///
/// Every field is optional so a layer only overrides what it sets;
/// defaults are resolved in [`PmdgateConfig::to_options`].
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct CheckConfig {
    /// Report kind: "pmd" (default) or "cpd"
    pub report: Option<ReportKind>,

    /// Directory the analysis tool writes its report into
    pub target_dir: Option<PathBuf>,

    /// Explicit report path, overriding target_dir
    pub report_file: Option<PathBuf>,

    /// Element representing one finding (defaults per report kind)
    pub element: Option<String>,

    /// Noun used in the summary message (defaults per report kind)
    pub noun: Option<String>,

    /// Highest priority counted as a failure (defaults per report kind)
    pub failure_priority: Option<i32>,

    /// Fail the build when failures are found
    pub fail_on_violation: Option<bool>,

    /// Print every finding
    pub verbose: Option<bool>,

    /// Project language; the check only applies to java projects
    pub language: Option<String>,

    /// Project source directory; the check is skipped when it does not exist
    pub source_dir: Option<PathBuf>,
}

fn default_target_dir() -> PathBuf {
    PathBuf::from("target")
}

impl CheckConfig {
    pub fn report(&self) -> ReportKind {
        self.report.unwrap_or_default()
    }

    pub fn target_dir(&self) -> PathBuf {
        self.target_dir.clone().unwrap_or_else(default_target_dir)
    }

    pub fn fail_on_violation(&self) -> bool {
        self.fail_on_violation.unwrap_or(true)
    }

    pub fn verbose(&self) -> bool {
        self.verbose.unwrap_or(false)
    }
}

impl PmdgateConfig {
    /// Merge another config into this one (other takes precedence for set values)
    pub fn merge(&mut self, other: &PmdgateConfig) {
        let (base, other) = (&mut self.check, &other.check);
        if other.report.is_some() {
            base.report = other.report;
        }
        if other.target_dir.is_some() {
            base.target_dir = other.target_dir.clone();
        }
        if other.report_file.is_some() {
            base.report_file = other.report_file.clone();
        }
        if other.element.is_some() {
            base.element = other.element.clone();
        }
        if other.noun.is_some() {
            base.noun = other.noun.clone();
        }
        if other.failure_priority.is_some() {
            base.failure_priority = other.failure_priority;
        }
        if other.fail_on_violation.is_some() {
            base.fail_on_violation = other.fail_on_violation;
        }
        if other.verbose.is_some() {
            base.verbose = other.verbose;
        }
        if other.language.is_some() {
            base.language = other.language.clone();
        }
        if other.source_dir.is_some() {
            base.source_dir = other.source_dir.clone();
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value in {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PmdgateConfig {
    pub fn generate_default_config() -> String {
        let template = PmdgateConfig {
            check: CheckConfig {
                report: Some(ReportKind::default()),
                target_dir: Some(default_target_dir()),
                fail_on_violation: Some(true),
                verbose: Some(false),
                ..CheckConfig::default()
            },
        };
        toml::to_string_pretty(&template).unwrap_or_else(|_| {
            r#"# pmdgate configuration file

[check]
report = "pmd"
target_dir = "target"
# report_file = "target/pmd.xml"
# element = "violation"
# noun = "violation"
# failure_priority = 5
fail_on_violation = true
verbose = false
# language = "java"
# source_dir = "src/main/java"
"#
            .to_string()
        })
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: PmdgateConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the user config file path (~/.config/pmdgate/config.toml)
    pub fn get_user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config/pmdgate/config.toml"))
    }

    /// Get the current directory config file path (./pmdgate.toml)
    pub fn get_current_config_path() -> PathBuf {
        PathBuf::from("./pmdgate.toml")
    }

    /// Load and merge configs from all sources with priority:
    /// 1. User config (~/.config/pmdgate/config.toml) - lowest priority (base)
    /// 2. Current directory (./pmdgate.toml)
    pub fn load_with_merged_configs() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(user_path) = Self::get_user_config_path() {
            if user_path.exists() {
                config.merge(&Self::load_from_file(&user_path)?);
                log::debug!("Loaded user config from: {}", user_path.display());
            }
        }

        let current_path = Self::get_current_config_path();
        if current_path.exists() {
            config.merge(&Self::load_from_file(&current_path)?);
            log::debug!("Loaded current directory config from: {}", current_path.display());
        }

        Ok(config)
    }

    pub fn apply_env_vars(&mut self, env_vars: &HashMap<String, String>) -> Result<()> {
        for (key, value) in env_vars {
            if let Some(config_key) = key.strip_prefix("PMDGATE_") {
                match config_key {
                    "REPORT" => {
                        self.check.report = Some(value.parse().map_err(|e: String| anyhow!(e))?);
                    }
                    "TARGET_DIR" => self.check.target_dir = Some(PathBuf::from(value)),
                    "REPORT_FILE" => self.check.report_file = Some(PathBuf::from(value)),
                    "ELEMENT" => self.check.element = Some(value.clone()),
                    "NOUN" => self.check.noun = Some(value.clone()),
                    "FAILURE_PRIORITY" => {
                        self.check.failure_priority = Some(value.parse()
                            .map_err(|_| anyhow!("Invalid failure_priority value: {}", value))?);
                    }
                    "FAIL_ON_VIOLATION" => {
                        self.check.fail_on_violation = Some(value.parse()
                            .map_err(|_| anyhow!("Invalid fail_on_violation value: {}", value))?);
                    }
                    "VERBOSE" => {
                        self.check.verbose = Some(value.parse()
                            .map_err(|_| anyhow!("Invalid verbose value: {}", value))?);
                    }
                    "LANGUAGE" => self.check.language = Some(value.clone()),
                    "SOURCE_DIR" => self.check.source_dir = Some(PathBuf::from(value)),
                    _ => {} // Ignore unknown environment variables
                }
            }
        }
        Ok(())
    }

    pub fn apply_args(&mut self, args: &Args) {
        if args.report.is_some() {
            self.check.report = args.report;
        }
        if args.target_dir.is_some() {
            self.check.target_dir = args.target_dir.clone();
        }
        if let Some(ref report_file) = args.report_file {
            self.check.report_file = Some(report_file.clone());
        }
        if let Some(ref element) = args.element {
            self.check.element = Some(element.clone());
        }
        if let Some(ref noun) = args.noun {
            self.check.noun = Some(noun.clone());
        }
        if let Some(priority) = args.failure_priority {
            self.check.failure_priority = Some(priority);
        }
        if args.no_fail {
            self.check.fail_on_violation = Some(false);
        } else if args.fail_on_violation {
            self.check.fail_on_violation = Some(true);
        }
        if args.verbose {
            self.check.verbose = Some(true);
        } else if args.no_verbose {
            self.check.verbose = Some(false);
        }
        if let Some(ref language) = args.language {
            self.check.language = Some(language.clone());
        }
        if let Some(ref source_dir) = args.source_dir {
            self.check.source_dir = Some(source_dir.clone());
        }
    }

    /// Load configuration with full precedence chain:
    /// 1. Default values (lowest)
    /// 2. User config (~/.config/pmdgate/config.toml)
    /// 3. Current directory (./pmdgate.toml)
    /// 4. Explicit config file (--config)
    /// 5. Environment variables (PMDGATE_*)
    /// 6. CLI arguments (highest)
    pub fn load_with_precedence(
        config_path: Option<&Path>,
        args: &Args,
        env_vars: &HashMap<String, String>,
    ) -> Result<Self> {
        let mut config = Self::load_with_merged_configs()?;

        if let Some(path) = config_path {
            let explicit_config = Self::load_from_file(path)
                .map_err(|e| anyhow!("Failed to load config file {}: {}", path.display(), e))?;
            config.merge(&explicit_config);
        }

        config.apply_env_vars(env_vars)?;
        config.apply_args(args);
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.check.element.as_deref().is_some_and(|e| e.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "check.element".to_string(),
                reason: "element name must not be empty".to_string(),
            });
        }

        if self.check.noun.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "check.noun".to_string(),
                reason: "noun must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Resolve per-kind defaults into the options of one check run.
    pub fn to_options(&self) -> CheckOptions {
        let kind = self.check.report();
        CheckOptions {
            report: kind,
            report_path: self
                .check
                .report_file
                .clone()
                .unwrap_or_else(|| self.check.target_dir().join(kind.default_file_name())),
            element: self
                .check
                .element
                .clone()
                .unwrap_or_else(|| kind.element_name().to_string()),
            noun: self
                .check
                .noun
                .clone()
                .unwrap_or_else(|| kind.noun().to_string()),
            failure_priority: self
                .check
                .failure_priority
                .unwrap_or_else(|| kind.default_failure_priority()),
            gating_enabled: self.check.fail_on_violation(),
            verbose: self.check.verbose(),
            language: self.check.language.clone(),
            source_dir: self.check.source_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn args(argv: &[&str]) -> Args {
        let mut full = vec!["pmdgate"];
        full.extend_from_slice(argv);
        Args::parse_from(full)
    }

    #[test]
    fn test_default_config() {
        let config = PmdgateConfig::default();
        assert_eq!(config.check.report(), ReportKind::Pmd);
        assert_eq!(config.check.target_dir(), PathBuf::from("target"));
        assert!(config.check.fail_on_violation());
        assert!(!config.check.verbose());
        assert!(config.check.failure_priority.is_none());
    }

    #[test]
    fn test_toml_parsing() {
        let toml_content = r#"
[check]
report = "cpd"
target_dir = "build"
failure_priority = 2
fail_on_violation = false
verbose = true
language = "java"
"#;

        let config: PmdgateConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.check.report, Some(ReportKind::Cpd));
        assert_eq!(config.check.target_dir, Some(PathBuf::from("build")));
        assert_eq!(config.check.failure_priority, Some(2));
        assert_eq!(config.check.fail_on_violation, Some(false));
        assert_eq!(config.check.verbose, Some(true));
        assert_eq!(config.check.language.as_deref(), Some("java"));
    }

    #[test]
    fn test_config_file_loading() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[check]\nelement = \"issue\"\nnoun = \"issue\"").unwrap();

        let config = PmdgateConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.check.element.as_deref(), Some("issue"));
        assert_eq!(config.check.noun.as_deref(), Some("issue"));
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[check\nreport = ").unwrap();

        let err = PmdgateConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::TomlError(_)));
    }

    #[test]
    fn test_generate_default_config() {
        let generated = PmdgateConfig::generate_default_config();
        let parsed: PmdgateConfig = toml::from_str(&generated).unwrap();
        assert_eq!(parsed.check.report, Some(ReportKind::Pmd));
        assert_eq!(parsed.check.target_dir, Some(PathBuf::from("target")));
        assert_eq!(parsed.check.fail_on_violation, Some(true));
    }

    #[test]
    fn test_env_var_application() {
        let mut config = PmdgateConfig::default();
        let env_vars = HashMap::from([
            ("PMDGATE_REPORT".to_string(), "cpd".to_string()),
            ("PMDGATE_FAILURE_PRIORITY".to_string(), "3".to_string()),
            ("PMDGATE_FAIL_ON_VIOLATION".to_string(), "false".to_string()),
            ("PMDGATE_SOURCE_DIR".to_string(), "src/main/java".to_string()),
            ("OTHER_VAR".to_string(), "ignored".to_string()),
        ]);

        config.apply_env_vars(&env_vars).unwrap();
        assert_eq!(config.check.report, Some(ReportKind::Cpd));
        assert_eq!(config.check.failure_priority, Some(3));
        assert_eq!(config.check.fail_on_violation, Some(false));
        assert_eq!(config.check.source_dir, Some(PathBuf::from("src/main/java")));
    }

    #[test]
    fn test_invalid_env_var_is_rejected() {
        let mut config = PmdgateConfig::default();
        let env_vars =
            HashMap::from([("PMDGATE_FAILURE_PRIORITY".to_string(), "high".to_string())]);
        assert!(config.apply_env_vars(&env_vars).is_err());

        let env_vars = HashMap::from([("PMDGATE_REPORT".to_string(), "spotbugs".to_string())]);
        assert!(config.apply_env_vars(&env_vars).is_err());
    }

    #[test]
    fn test_config_merge() {
        let mut base = PmdgateConfig::default();
        let override_config: PmdgateConfig = toml::from_str(
            r#"
[check]
report = "cpd"
verbose = true
"#,
        )
        .unwrap();

        base.merge(&override_config);
        assert_eq!(base.check.report(), ReportKind::Cpd);
        assert!(base.check.verbose());
        // Defaults are preserved where not overridden
        assert!(base.check.fail_on_violation());
        assert_eq!(base.check.target_dir(), PathBuf::from("target"));
    }

    #[test]
    fn test_later_layer_restores_default_values() {
        let mut config: PmdgateConfig = toml::from_str(
            r#"
[check]
report = "cpd"
target_dir = "build"
fail_on_violation = false
verbose = true
"#,
        )
        .unwrap();
        let project: PmdgateConfig = toml::from_str(
            r#"
[check]
report = "pmd"
target_dir = "target"
fail_on_violation = true
verbose = false
"#,
        )
        .unwrap();

        config.merge(&project);
        assert_eq!(config.check.report(), ReportKind::Pmd);
        assert_eq!(config.check.target_dir(), PathBuf::from("target"));
        assert!(config.check.fail_on_violation());
        assert!(!config.check.verbose());

        let options = config.to_options();
        assert_eq!(options.report_path, PathBuf::from("target/pmd.xml"));
        assert!(options.gating_enabled);
        assert!(!options.verbose);
    }

    #[test]
    fn test_unset_fields_do_not_override() {
        let mut config: PmdgateConfig = toml::from_str(
            "[check]\nreport = \"cpd\"\nfail_on_violation = false\n",
        )
        .unwrap();
        config.merge(&toml::from_str("[check]\nnoun = \"clone\"\n").unwrap());

        assert_eq!(config.check.report(), ReportKind::Cpd);
        assert!(!config.check.fail_on_violation());
        assert_eq!(config.check.noun.as_deref(), Some("clone"));
    }

    #[test]
    fn test_args_take_precedence_over_env() {
        let mut config = PmdgateConfig::default();
        let env_vars = HashMap::from([("PMDGATE_FAILURE_PRIORITY".to_string(), "1".to_string())]);
        config.apply_env_vars(&env_vars).unwrap();
        config.apply_args(&args(&["--failure-priority", "4", "--no-fail", "-v"]));

        assert_eq!(config.check.failure_priority, Some(4));
        assert!(!config.check.fail_on_violation());
        assert!(config.check.verbose());
    }

    #[test]
    fn test_args_switch_settings_back_on_and_off() {
        let mut config = PmdgateConfig::default();
        let env_vars = HashMap::from([
            ("PMDGATE_FAIL_ON_VIOLATION".to_string(), "false".to_string()),
            ("PMDGATE_VERBOSE".to_string(), "true".to_string()),
        ]);
        config.apply_env_vars(&env_vars).unwrap();
        config.apply_args(&args(&["--fail-on-violation", "--no-verbose"]));

        assert!(config.check.fail_on_violation());
        assert!(!config.check.verbose());

        // The last of a flag pair wins
        config.apply_args(&args(&["--fail-on-violation", "--no-fail", "--no-verbose", "-v"]));
        assert!(!config.check.fail_on_violation());
        assert!(config.check.verbose());

        // Without either flag the layer below is kept
        config.apply_args(&args(&[]));
        assert!(!config.check.fail_on_violation());
        assert!(config.check.verbose());
    }

    #[test]
    fn test_validation() {
        let mut config = PmdgateConfig::default();
        assert!(config.validate().is_ok());

        config.check.element = Some("  ".to_string());
        assert!(config.validate().is_err());

        config.check.element = None;
        config.check.noun = Some(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_to_options_uses_kind_defaults() {
        let mut config = PmdgateConfig::default();
        config.check.report = Some(ReportKind::Cpd);

        let options = config.to_options();
        assert_eq!(options.report_path, PathBuf::from("target/cpd.xml"));
        assert_eq!(options.element, "duplication");
        assert_eq!(options.noun, "duplication");
        assert_eq!(options.failure_priority, 10);
        assert!(options.gating_enabled);
    }

    #[test]
    fn test_to_options_explicit_values_win() {
        let mut config = PmdgateConfig::default();
        config.check.report_file = Some(PathBuf::from("/reports/custom.xml"));
        config.check.element = Some("error".to_string());
        config.check.failure_priority = Some(1);

        let options = config.to_options();
        assert_eq!(options.report_path, PathBuf::from("/reports/custom.xml"));
        assert_eq!(options.element, "error");
        assert_eq!(options.noun, "violation");
        assert_eq!(options.failure_priority, 1);
    }

    #[test]
    fn test_get_user_config_path() {
        if let Some(path) = PmdgateConfig::get_user_config_path() {
            assert!(path.ends_with(".config/pmdgate/config.toml"));
        }
    }
}
