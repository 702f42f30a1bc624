use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tally_core::BudgetError;

use crate::state::{ensure_tally_home, tally_home};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub budget: BudgetSection,
    pub llm: LlmSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetSection {
    /// Monthly income used when --income is not given
    pub income: f64,
    pub benchmarks_path: PathBuf,
    /// Starting point of the Wants cut simulator (percent)
    pub default_cut: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSection {
    /// "gemini" or "openai"
    pub provider: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl Default for BudgetSection {
    fn default() -> Self {
        Self {
            income: 6000.0,
            benchmarks_path: PathBuf::from("benchmarks.csv"),
            default_cut: tally_finance::simulate::DEFAULT_CUT_PERCENT,
        }
    }
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: "gemini-2.0-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            temperature: 0.4,
            api_key_env: "GOOGLE_API_KEY".to_string(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(tally_home()?.join("config.toml"))
}

/// Load `~/.tally/config.toml`, falling back to defaults when absent.
pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    let cfg: Config = toml::from_str(&s).with_context(|| format!("parse {}", p.display()))?;
    check_income(cfg.budget.income).with_context(|| format!("[budget].income in {}", p.display()))?;
    Ok(cfg)
}

/// Monthly income must be a finite, non-negative number.
pub fn check_income(income: f64) -> tally_core::Result<f64> {
    if income.is_finite() && income >= 0.0 {
        Ok(income)
    } else {
        Err(BudgetError::InvalidInput(format!(
            "income must be a finite number >= 0, got {income}"
        )))
    }
}

pub fn save_config(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    ensure_tally_home()?;
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.budget.income, 6000.0);
        assert_eq!(cfg.llm.api_key_env, "GOOGLE_API_KEY");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[budget]\nincome = 4200.0\n\n[llm]\nprovider = \"openai\"\n").unwrap();
        let cfg = load_config_from(&p).unwrap();
        assert_eq!(cfg.budget.income, 4200.0);
        assert_eq!(cfg.budget.default_cut, 10);
        assert_eq!(cfg.llm.provider, "openai");
        assert_eq!(cfg.llm.model, "gemini-2.0-flash");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.budget.default_cut = 25;
        save_config(&cfg, &p).unwrap();
        assert_eq!(load_config_from(&p).unwrap(), cfg);
    }

    #[test]
    fn test_non_finite_income_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[budget]\nincome = nan\n").unwrap();
        let err = load_config_from(&p).unwrap_err();
        assert!(format!("{err:#}").contains("income must be a finite number"));

        assert!(check_income(f64::INFINITY).is_err());
        assert!(check_income(-1.0).is_err());
        assert_eq!(check_income(4200.0).unwrap(), 4200.0);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[budget\nincome = ").unwrap();
        assert!(load_config_from(&p).is_err());
    }
}
