//! YAML configuration surface for the pipeline.
//!
//! Every field carries a default suited to the Canadian TAFL extract
//! (fixed service 2, P2P subservice 200, P2MP subservice 201), so an
//! absent or partial config file still produces a working run.

use crate::style::StyleTable;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Row filtering applied by the record loader.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Regulatory service code to retain.
    pub service: u32,
    /// Subservice codes to retain.
    pub subservices: Vec<u32>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            service: 2,
            subservices: vec![200, 201],
        }
    }
}

impl LoaderConfig {
    /// Whether a row with the given service/subservice codes is in scope.
    pub fn retains(&self, service: u32, subservice: u32) -> bool {
        service == self.service && self.subservices.contains(&subservice)
    }
}

/// Disambiguation policy for the link matcher.
///
/// Point-to-multipoint grants legitimately pair one TX with many RX rows,
/// but rendering every large P2MP system drowns the overlay, so multipoint
/// resolution is restricted to an explicit licensee allow-list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Subservice codes that designate point-to-multipoint grants.
    pub multipoint_subservices: Vec<u32>,
    /// Licensees whose multipoint systems should be resolved and rendered.
    pub multipoint_licensees: Vec<String>,
    /// Compare allow-list entries case-insensitively instead of exactly.
    pub case_insensitive_licensees: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            multipoint_subservices: vec![201],
            multipoint_licensees: vec![
                "Bell Canada".to_string(),
                "Northwestel Inc.".to_string(),
                "Telus Communications Inc.".to_string(),
                "Sasktel".to_string(),
                "Hydro-Québec".to_string(),
            ],
            case_insensitive_licensees: false,
        }
    }
}

impl MatchConfig {
    /// Whether a TX record with the given subservice and licensee qualifies
    /// for multipoint resolution.
    pub fn allows_multipoint(&self, subservice: u32, licensee: &str) -> bool {
        if !self.multipoint_subservices.contains(&subservice) {
            return false;
        }
        if self.case_insensitive_licensees {
            self.multipoint_licensees
                .iter()
                .any(|name| name.eq_ignore_ascii_case(licensee))
        } else {
            self.multipoint_licensees.iter().any(|name| name == licensee)
        }
    }
}

/// Combined configuration for a full pipeline run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PtpMapConfig {
    /// Record loader filtering.
    pub loader: LoaderConfig,
    /// Link matcher policy.
    pub matcher: MatchConfig,
    /// Licensee-name -> line-style table for the KML output.
    pub styles: StyleTable,
}

impl PtpMapConfig {
    /// Parse a configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a configuration from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }
}
