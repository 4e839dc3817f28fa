use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Relative location of the config file under a project root
pub const CONFIG_PATH: &str = "canon/config.toml";

// =============================================================================
// Scoring Rules
// =============================================================================

/// Constants driving the markdown structure heuristic
///
/// The exact values are a loose contract. Only monotonicity is promised:
/// adding structure never lowers the score, raw tabs always lower it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    /// Points per heading
    pub heading_points: u32,
    /// Maximum points from headings
    pub heading_cap: u32,
    /// Maximum points from list items (one point each)
    pub list_cap: u32,
    /// Maximum points from fenced code blocks (one point each)
    pub code_block_cap: u32,
    /// Points for any link, emphasis or table
    pub inline_points: u32,
    /// Deducted once when any raw tab character is present
    pub tab_penalty: u32,
    /// Scores at or below this are WARN
    pub warn_threshold: u32,
    /// Raw tabs force at least WARN regardless of score
    pub tabs_force_warn: bool,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            heading_points: 2,
            heading_cap: 4,
            list_cap: 3,
            code_block_cap: 2,
            inline_points: 1,
            tab_penalty: 3,
            warn_threshold: 2,
            tabs_force_warn: true,
        }
    }
}

impl ScoringRules {
    /// Highest score reachable with these rules
    pub fn max_score(&self) -> u32 {
        self.heading_cap + self.list_cap + self.code_block_cap + self.inline_points
    }
}

// =============================================================================
// Canon Manifest
// =============================================================================

/// Required canonical documents plus the optional scaffold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonManifest {
    /// Keys that must exist, be governed and be RAG-ready (ordered)
    pub required: Vec<String>,
    /// Optional key that must stay un-governed when present
    pub scaffold: Option<String>,
}

impl Default for CanonManifest {
    fn default() -> Self {
        Self {
            required: vec![
                "CANON.md".to_string(),
                "GOVERNANCE.md".to_string(),
                "ARCHITECTURE.md".to_string(),
                "GLOSSARY.md".to_string(),
            ],
            scaffold: Some("SCAFFOLD.md".to_string()),
        }
    }
}

// =============================================================================
// Apply Policy
// =============================================================================

/// Policy for the APPROVED -> APPLIED transition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplyPolicy {
    /// Refuse to apply onto a WARN target instead of only cautioning
    pub block_on_warn: bool,
}

// =============================================================================
// Canon Configuration
// =============================================================================

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonConfig {
    /// JSON snapshot store, relative to the project root
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    #[serde(default)]
    pub manifest: CanonManifest,

    #[serde(default)]
    pub scoring: ScoringRules,

    #[serde(default)]
    pub apply: ApplyPolicy,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("canon/store.json")
}

impl Default for CanonConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            manifest: CanonManifest::default(),
            scoring: ScoringRules::default(),
            apply: ApplyPolicy::default(),
        }
    }
}

impl CanonConfig {
    /// Load config from canon/config.toml
    pub fn load(project_root: &Path) -> anyhow::Result<Self> {
        let config_path = project_root.join(CONFIG_PATH);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: CanonConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to canon/config.toml
    pub fn save(&self, project_root: &Path) -> anyhow::Result<()> {
        let config_path = project_root.join(CONFIG_PATH);
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Absolute store path for a project root
    pub fn resolve_store_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.store_path)
    }
}
