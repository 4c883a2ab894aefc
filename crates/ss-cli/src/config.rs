//! Run configuration (YAML).
//!
//! ```yaml
//! data:
//!   input_dir: data/inputs
//!   scc_dir: data
//!   scc_filename: SCCDownload.csv
//!   save_dir: plots
//! analysis_categories:
//!   electricity:
//!     keywords: [electric]
//!     scc_level: 1
//!     pollutant: PM25-PRI
//! ```
//!
//! Relative paths resolve against the directory holding the config file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StackstatConfig {
    pub data: DataConfig,
    #[serde(default)]
    pub analysis_categories: BTreeMap<String, CategoryConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    pub input_dir: PathBuf,
    pub scc_dir: PathBuf,
    pub scc_filename: String,
    #[serde(default = "default_save_dir")]
    pub save_dir: PathBuf,
    /// Plot file extension (`svg` or `png`).
    #[serde(default = "default_plot_format")]
    pub plot_format: String,
    /// Optional visualization config YAML.
    #[serde(default)]
    pub viz_config: Option<PathBuf>,
}

fn default_save_dir() -> PathBuf {
    PathBuf::from("plots")
}

fn default_plot_format() -> String {
    "svg".to_string()
}

/// A string or a list of strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::One(s) => vec![s.clone()],
            Self::Many(v) => v.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryConfig {
    #[serde(default)]
    pub keywords: Option<OneOrMany>,
    #[serde(default)]
    pub scc_level: Option<u8>,
    pub pollutant: OneOrMany,
    #[serde(default = "default_target_unit")]
    pub target_unit: String,
    #[serde(default)]
    pub capacity_bins: Option<Vec<f64>>,
}

fn default_target_unit() -> String {
    "MW".to_string()
}

impl CategoryConfig {
    pub fn keywords(&self) -> Vec<String> {
        self.keywords.as_ref().map(OneOrMany::to_vec).unwrap_or_default()
    }

    pub fn pollutants(&self) -> Vec<String> {
        self.pollutant.to_vec()
    }
}

impl StackstatConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut cfg: StackstatConfig = serde_yaml_ng::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        cfg.data.input_dir = resolve(base, &cfg.data.input_dir);
        cfg.data.scc_dir = resolve(base, &cfg.data.scc_dir);
        cfg.data.save_dir = resolve(base, &cfg.data.save_dir);
        cfg.data.viz_config = cfg.data.viz_config.as_deref().map(|p| resolve(base, p));
        Ok(cfg)
    }

    pub fn scc_path(&self) -> PathBuf {
        self.data.scc_dir.join(&self.data.scc_filename)
    }

    /// Categories to run: all of them when `only` is empty.
    pub fn select<'a>(&'a self, only: &[String]) -> Result<Vec<(&'a str, &'a CategoryConfig)>> {
        if only.is_empty() {
            return Ok(self.analysis_categories.iter().map(|(k, v)| (k.as_str(), v)).collect());
        }
        only.iter()
            .map(|name| {
                self.analysis_categories
                    .get_key_value(name)
                    .map(|(k, v)| (k.as_str(), v))
                    .ok_or_else(|| anyhow::anyhow!("unknown analysis category '{name}'"))
            })
            .collect()
    }
}

fn resolve(base: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() { p.to_path_buf() } else { base.join(p) }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
data:
  input_dir: inputs
  scc_dir: /abs/scc
  scc_filename: SCCDownload.csv
analysis_categories:
  iron-and-steel:
    keywords: [iron, steel]
    scc_level: 3
    pollutant: PM25-PRI
  electricity:
    keywords: electric
    scc_level: 1
    pollutant: [PM25-PRI, PM10-PRI]
    target_unit: E6BTU/HR
    capacity_bins: [0, 10, 100]
"#;

    fn write_tmp(contents: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("ss-cli-config-{}-{}", std::process::id(), nanos));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sources.yaml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn parses_and_resolves_paths() {
        let path = write_tmp(YAML);
        let cfg = StackstatConfig::load(&path).unwrap();
        let base = path.parent().unwrap();
        assert_eq!(cfg.data.input_dir, base.join("inputs"));
        assert_eq!(cfg.scc_path(), PathBuf::from("/abs/scc/SCCDownload.csv"));
        assert_eq!(cfg.data.save_dir, base.join("plots"));
        assert_eq!(cfg.data.plot_format, "svg");

        let elec = &cfg.analysis_categories["electricity"];
        assert_eq!(elec.keywords(), vec!["electric"]);
        assert_eq!(elec.pollutants(), vec!["PM25-PRI", "PM10-PRI"]);
        assert_eq!(elec.target_unit, "E6BTU/HR");
        assert_eq!(elec.capacity_bins.as_deref(), Some(&[0.0, 10.0, 100.0][..]));

        let steel = &cfg.analysis_categories["iron-and-steel"];
        assert_eq!(steel.target_unit, "MW");
        assert!(steel.capacity_bins.is_none());
        let _ = std::fs::remove_dir_all(base);
    }

    #[test]
    fn select_by_name() {
        let path = write_tmp(YAML);
        let cfg = StackstatConfig::load(&path).unwrap();
        assert_eq!(cfg.select(&[]).unwrap().len(), 2);
        let one = cfg.select(&["electricity".to_string()]).unwrap();
        assert_eq!(one[0].0, "electricity");
        assert!(cfg.select(&["aluminum".to_string()]).is_err());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let path = write_tmp("data:\n  input_dir: a\n  scc_dir: b\n  scc_filename: c\n  colour: red\n");
        assert!(StackstatConfig::load(&path).is_err());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
