//! Licensee-name -> line-style classification for the KML output.
//!
//! Style selection is a pure function of the licensee name: the table is an
//! ordered list of substring patterns, matched case-insensitively, first
//! match wins, with an explicit default for everything else. The default
//! table covers the major Canadian carriers.

use serde::{Deserialize, Serialize};

/// One entry of the style table.
///
/// `color` uses the KML `aabbggrr` hex convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleRule {
    /// Case-insensitive substring matched against the licensee name.
    pub pattern: String,
    /// KML style id referenced from placemarks.
    pub style_id: String,
    /// Line color in aabbggrr hex.
    pub color: String,
    /// Line width in pixels.
    pub width: f32,
}

/// Ordered licensee-name -> style table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleTable {
    rules: Vec<StyleRule>,
    default_rule: StyleRule,
}

impl Default for StyleTable {
    fn default() -> Self {
        let rule = |pattern: &str, style_id: &str, color: &str| StyleRule {
            pattern: pattern.to_string(),
            style_id: style_id.to_string(),
            color: color.to_string(),
            width: 2.0,
        };
        StyleTable {
            rules: vec![
                rule("bell", "bell", "ffff0000"),            // Blue
                rule("rogers", "rogers", "ff0000ff"),        // Red
                rule("telus", "telus", "ff3cff14"),          // Green
                rule("xplornet", "xplornet", "ff1478a0"),    // Brown
                rule("freedom mobile", "freedom", "ff14b4ff"), // Orange
            ],
            default_rule: rule("", "other", "ffff78f0"), // Magenta
        }
    }
}

impl StyleTable {
    /// Create a table from an ordered rule list and a default.
    pub fn new(rules: Vec<StyleRule>, default_rule: StyleRule) -> Self {
        StyleTable {
            rules,
            default_rule,
        }
    }

    /// The ordered rules, default excluded.
    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    /// The fallback rule applied when nothing matches.
    pub fn default_rule(&self) -> &StyleRule {
        &self.default_rule
    }

    /// All rules in declaration order, default last. The KML writer emits
    /// one shared `<Style>` element per entry.
    pub fn iter_all(&self) -> impl Iterator<Item = &StyleRule> {
        self.rules.iter().chain(std::iter::once(&self.default_rule))
    }

    /// Select the style for a licensee name: case-insensitive substring
    /// match, first rule wins, default otherwise.
    pub fn classify(&self, licensee_name: &str) -> &StyleRule {
        let name = licensee_name.to_lowercase();
        self.rules
            .iter()
            .find(|rule| name.contains(&rule.pattern.to_lowercase()))
            .unwrap_or(&self.default_rule)
    }
}
