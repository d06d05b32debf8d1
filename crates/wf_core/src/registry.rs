//! Subdivision registry
//!
//! Fixed parameter records for the circumscriptions of Wallis-et-Futuna.
//! Unknown names resolve to the `default` record; lookups never fail.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;
use tracing::warn;

/// Registry key of the fallback record.
pub const DEFAULT_KEY: &str = "default";

/// Subdivision used when an interactive selection is invalid.
pub const FALLBACK_SUBDIVISION: &str = "Mata-Utu";

/// Subdivision category, selects category-dependent growth rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Administrative capital (Mata-Utu)
    ChiefTown,
    /// Wallis district
    #[default]
    District,
    /// Futuna district
    DistrictRemote,
}

impl Category {
    /// Exact-match tag parsing. Anything unrecognized is treated as a district.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "chief_town" => Category::ChiefTown,
            "district_remote" => Category::DistrictRemote,
            _ => Category::District,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            Category::ChiefTown => "chief_town",
            Category::District => "district",
            Category::DistrictRemote => "district_remote",
        }
    }

    /// Label for reports
    pub fn display_text(&self) -> &'static str {
        match self {
            Category::ChiefTown => "Chief town",
            Category::District => "District (Wallis)",
            Category::DistrictRemote => "District (Futuna)",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Declared economic focus of a subdivision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Specialty {
    Administration,
    Commerce,
    Port,
    Tourism,
    Services,
    LocalServices,
    Agriculture,
    Livestock,
    Crafts,
    Culture,
    Heritage,
    Fishing,
    Transport,
    Education,
    Health,
}

impl Specialty {
    pub fn as_tag(&self) -> &'static str {
        match self {
            Specialty::Administration => "administration",
            Specialty::Commerce => "commerce",
            Specialty::Port => "port",
            Specialty::Tourism => "tourism",
            Specialty::Services => "services",
            Specialty::LocalServices => "local_services",
            Specialty::Agriculture => "agriculture",
            Specialty::Livestock => "livestock",
            Specialty::Crafts => "crafts",
            Specialty::Culture => "culture",
            Specialty::Heritage => "heritage",
            Specialty::Fishing => "fishing",
            Specialty::Transport => "transport",
            Specialty::Education => "education",
            Specialty::Health => "health",
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Immutable parameter record for one subdivision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubdivisionConfig {
    /// Population in the first modelled year
    pub population_base: f64,
    /// Annual budget baseline (M€)
    pub budget_base: f64,
    pub category: Category,
    pub specialties: BTreeSet<Specialty>,
}

impl SubdivisionConfig {
    pub fn new(
        population_base: f64,
        budget_base: f64,
        category: Category,
        specialties: &[Specialty],
    ) -> Self {
        Self {
            population_base,
            budget_base,
            category,
            specialties: specialties.iter().copied().collect(),
        }
    }

    pub fn has_specialty(&self, specialty: Specialty) -> bool {
        self.specialties.contains(&specialty)
    }

    /// Comma-separated specialty tags, in stable order.
    pub fn specialty_list(&self) -> String {
        self.specialties
            .iter()
            .map(Specialty::as_tag)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Name → config mapping plus the fallback record.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: Vec<(&'static str, SubdivisionConfig)>,
    default: SubdivisionConfig,
}

impl Registry {
    /// The six circumscriptions of Wallis-et-Futuna.
    pub fn builtin() -> Self {
        use Specialty::*;

        let entries = vec![
            (
                "Mata-Utu",
                SubdivisionConfig::new(
                    1200.0,
                    35.0,
                    Category::ChiefTown,
                    &[Administration, Commerce, Port, Tourism, Services],
                ),
            ),
            (
                "Hahake",
                SubdivisionConfig::new(
                    2500.0,
                    30.0,
                    Category::District,
                    &[Agriculture, Livestock, Crafts, Culture],
                ),
            ),
            (
                "Hihifo",
                SubdivisionConfig::new(
                    1800.0,
                    28.0,
                    Category::District,
                    &[Fishing, Agriculture, Tourism, Heritage],
                ),
            ),
            (
                "Mua",
                SubdivisionConfig::new(
                    2200.0,
                    32.0,
                    Category::District,
                    &[Agriculture, Livestock, Crafts, Services],
                ),
            ),
            (
                "Sigave",
                SubdivisionConfig::new(
                    1500.0,
                    28.0,
                    Category::DistrictRemote,
                    &[Fishing, Agriculture, Culture, Crafts],
                ),
            ),
            (
                "Alo",
                SubdivisionConfig::new(
                    2000.0,
                    30.0,
                    Category::DistrictRemote,
                    &[Agriculture, Livestock, Fishing, Tourism],
                ),
            ),
        ];

        let default = SubdivisionConfig::new(
            2000.0,
            30.0,
            Category::District,
            &[Agriculture, Fishing, Crafts, LocalServices],
        );

        Self { entries, default }
    }

    /// Known subdivision names in registry order (the default key excluded).
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(name, _)| *name).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        name == DEFAULT_KEY || self.entries.iter().any(|(n, _)| *n == name)
    }

    /// Borrowing lookup. Unknown names yield the default record.
    pub fn lookup(&self, name: &str) -> &SubdivisionConfig {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, config)| config)
            .unwrap_or(&self.default)
    }

    pub fn resolve(&self, name: &str) -> SubdivisionConfig {
        if !self.contains(name) {
            warn!(subdivision = name, "unknown subdivision, using default configuration");
        }
        self.lookup(name).clone()
    }
}

static BUILTIN_REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Shared built-in registry.
pub fn builtin_registry() -> &'static Registry {
    BUILTIN_REGISTRY.get_or_init(Registry::builtin)
}

/// Resolve a subdivision name against the built-in registry.
pub fn resolve_config(name: &str) -> SubdivisionConfig {
    builtin_registry().resolve(name)
}
