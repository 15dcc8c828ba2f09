use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{SimError, SimResult};
use crate::model::ProfessionRule;

fn default_max_apprentices() -> u32 {
    2
}

fn default_apprenticeship_duration() -> u32 {
    7
}

fn default_base_units() -> f64 {
    100.0
}

/// Raw shape of one entry in the configuration's `professions` object
/// (`spec.md` §6). Deserialized, then validated into a [`ProfessionRule`].
#[derive(Debug, Deserialize)]
struct RawProfession {
    skill_name: String,
    good_produced: String,
    #[serde(default = "default_max_apprentices")]
    max_apprentices_per_master: u32,
    #[serde(default = "default_apprenticeship_duration")]
    apprenticeship_duration_years: u32,
    #[serde(default)]
    building_required: Option<String>,
    #[serde(default = "default_base_units")]
    base_units_per_year: f64,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    professions: HashMap<String, RawProfession>,
    consumption: HashMap<String, f64>,
}

/// A fully-parsed, validated economy configuration (`spec.md` §6).
///
/// This is the "fully-parsed configuration object" the core consumes —
/// reading JSON *text* from a file is an external collaborator's job
/// (`spec.md` §1), so the only entry point here takes an already-parsed
/// [`serde_json::Value`].
#[derive(Debug, Clone)]
pub struct EconomyConfig {
    pub professions: HashMap<String, ProfessionRule>,
    /// good -> units consumed per capita per year.
    pub consumption: HashMap<String, f64>,
}

impl EconomyConfig {
    pub fn from_value(value: serde_json::Value) -> SimResult<EconomyConfig> {
        let raw: RawConfig = serde_json::from_value(value)
            .map_err(|e| SimError::ConfigInvalid(format!("malformed config: {e}")))?;

        if raw.professions.is_empty() {
            return Err(SimError::ConfigInvalid(
                "professions must not be empty".to_string(),
            ));
        }

        let mut professions = HashMap::with_capacity(raw.professions.len());
        for (name, rp) in raw.professions {
            if rp.skill_name.is_empty() {
                return Err(SimError::ConfigInvalid(format!(
                    "profession {name}: skill_name must not be empty"
                )));
            }
            if rp.good_produced.is_empty() {
                return Err(SimError::ConfigInvalid(format!(
                    "profession {name}: good_produced must not be empty"
                )));
            }
            if rp.max_apprentices_per_master == 0 {
                return Err(SimError::ConfigInvalid(format!(
                    "profession {name}: max_apprentices_per_master must be positive"
                )));
            }
            if rp.apprenticeship_duration_years == 0 {
                return Err(SimError::ConfigInvalid(format!(
                    "profession {name}: apprenticeship_duration_years must be positive"
                )));
            }
            if rp.base_units_per_year < 0.0 {
                return Err(SimError::ConfigInvalid(format!(
                    "profession {name}: base_units_per_year must not be negative"
                )));
            }
            professions.insert(
                name.clone(),
                ProfessionRule {
                    name,
                    skill_name: rp.skill_name,
                    good_produced: rp.good_produced,
                    max_apprentices_per_master: rp.max_apprentices_per_master,
                    apprenticeship_duration_years: rp.apprenticeship_duration_years,
                    building_required: rp.building_required,
                    base_units_per_year: rp.base_units_per_year,
                },
            );
        }

        for (good, units) in &raw.consumption {
            if *units < 0.0 {
                return Err(SimError::ConfigInvalid(format!(
                    "consumption need for {good} must not be negative"
                )));
            }
        }

        Ok(EconomyConfig {
            professions,
            consumption: raw.consumption,
        })
    }

    /// The set of goods the economy tracks: every good produced by a
    /// profession plus every good with a consumption need.
    pub fn all_goods(&self) -> Vec<String> {
        let mut goods: Vec<String> = self
            .professions
            .values()
            .map(|p| p.good_produced.clone())
            .collect();
        for good in self.consumption.keys() {
            if !goods.contains(good) {
                goods.push(good.clone());
            }
        }
        goods
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> serde_json::Value {
        serde_json::json!({
            "professions": {
                "blacksmith": {
                    "skill_name": "smithing",
                    "good_produced": "tools",
                    "building_required": "forge",
                },
                "farmer": {
                    "skill_name": "farming",
                    "good_produced": "grain",
                    "max_apprentices_per_master": 3,
                    "apprenticeship_duration_years": 4,
                    "base_units_per_year": 200.0,
                },
            },
            "consumption": {
                "grain": 5.0,
                "tools": 0.2,
            },
        })
    }

    #[test]
    fn parses_valid_config() {
        let cfg = EconomyConfig::from_value(sample_config()).unwrap();
        assert_eq!(cfg.professions.len(), 2);
        assert_eq!(cfg.professions["farmer"].max_apprentices_per_master, 3);
        // Defaults applied where omitted.
        assert_eq!(
            cfg.professions["blacksmith"].max_apprentices_per_master,
            2
        );
        assert_eq!(
            cfg.professions["blacksmith"].apprenticeship_duration_years,
            7
        );
        assert_eq!(cfg.professions["blacksmith"].base_units_per_year, 100.0);
        assert_eq!(
            cfg.professions["blacksmith"].building_required,
            Some("forge".to_string())
        );
        assert_eq!(cfg.professions["farmer"].building_required, None);
    }

    #[test]
    fn rejects_empty_professions() {
        let value = serde_json::json!({"professions": {}, "consumption": {}});
        let err = EconomyConfig::from_value(value).unwrap_err();
        assert!(matches!(err, SimError::ConfigInvalid(_)));
    }

    #[test]
    fn rejects_missing_skill_name() {
        let value = serde_json::json!({
            "professions": {"farmer": {"good_produced": "grain"}},
            "consumption": {},
        });
        let err = EconomyConfig::from_value(value);
        assert!(err.is_err());
    }

    #[test]
    fn rejects_negative_base_units() {
        let value = serde_json::json!({
            "professions": {
                "farmer": {
                    "skill_name": "farming",
                    "good_produced": "grain",
                    "base_units_per_year": -5.0,
                }
            },
            "consumption": {},
        });
        let err = EconomyConfig::from_value(value).unwrap_err();
        assert!(matches!(err, SimError::ConfigInvalid(_)));
    }

    #[test]
    fn rejects_negative_consumption() {
        let value = serde_json::json!({
            "professions": {
                "farmer": {"skill_name": "farming", "good_produced": "grain"}
            },
            "consumption": {"grain": -1.0},
        });
        let err = EconomyConfig::from_value(value).unwrap_err();
        assert!(matches!(err, SimError::ConfigInvalid(_)));
    }

    #[test]
    fn all_goods_deduplicates() {
        let cfg = EconomyConfig::from_value(sample_config()).unwrap();
        let goods = cfg.all_goods();
        assert_eq!(goods.iter().filter(|g| g.as_str() == "grain").count(), 1);
        assert_eq!(goods.iter().filter(|g| g.as_str() == "tools").count(), 1);
    }
}
