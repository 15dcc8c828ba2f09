use std::collections::HashMap;

use crate::config::EconomyConfig;
use crate::model::{market_gap, ConsumptionNeed, MarketGap, PersonId, ProductionCapacity};
use crate::store::AgentStore;

/// Tracks production capacity, consumption demand, and the resulting
/// market gap for every good the economy configuration names (`spec.md`
/// §4.4). Recomputed only when `UpdateCommunityEconomyEvent` fires —
/// never read stale, never recomputed per-tick.
#[derive(Debug, Clone)]
pub struct EconomyAggregator {
    config: EconomyConfig,
    production: HashMap<String, ProductionCapacity>,
    consumption: HashMap<String, ConsumptionNeed>,
    gaps: HashMap<String, MarketGap>,
}

impl EconomyAggregator {
    pub fn new(config: EconomyConfig) -> Self {
        Self {
            config,
            production: HashMap::new(),
            consumption: HashMap::new(),
            gaps: HashMap::new(),
        }
    }

    pub fn config(&self) -> &EconomyConfig {
        &self.config
    }

    // -- Phase A: production ------------------------------------------------

    /// `spec.md` §4.4: collect live practitioners, drop those lacking a
    /// required building, then derive `avg_skill_multiplier` from the
    /// filtered cohort's accumulated practice hours (not aptitude — hours
    /// reflect learned skill, aptitude is innate potential).
    fn recompute_production(&mut self, store: &AgentStore) {
        self.production.clear();
        for rule in self.config.professions.values() {
            // `practitioners_by_profession` already excludes the dead —
            // `AgentStore::mark_dead` removes a person from it transactionally.
            let qualified: Vec<PersonId> = store
                .practitioners_of(&rule.name)
                .into_iter()
                .filter(|&id| match &rule.building_required {
                    Some(building_type) => store.owns_building_of_type(id, building_type),
                    None => true,
                })
                .collect();
            let count = qualified.len() as u32;

            let avg_skill_multiplier = if qualified.is_empty() {
                1.0
            } else {
                let total_hours: f64 = qualified
                    .iter()
                    .filter_map(|id| store.get(*id))
                    .map(|p| p.skill_hours_for(&rule.skill_name))
                    .sum();
                let avg_hours = total_hours / count as f64;
                1.0 + (avg_hours / 20_000.0).min(1.0)
            };

            self.production.insert(
                rule.good_produced.clone(),
                ProductionCapacity {
                    profession: rule.name.clone(),
                    current_practitioners: count,
                    avg_skill_multiplier,
                    base_units_per_year: rule.base_units_per_year,
                },
            );
        }
    }

    // -- Phase B: consumption -----------------------------------------------

    fn recompute_consumption(&mut self, store: &AgentStore) {
        self.consumption.clear();
        let population = store.alive_population_count();
        for (good, units_per_capita_year) in &self.config.consumption {
            self.consumption.insert(
                good.clone(),
                ConsumptionNeed {
                    units_per_capita_year: *units_per_capita_year,
                    current_population: population,
                },
            );
        }
    }

    // -- Phase C: market gap -------------------------------------------------

    fn recompute_gaps(&mut self) {
        self.gaps.clear();
        for good in self.config.all_goods() {
            let demand = self
                .consumption
                .get(&good)
                .map(|need| need.annual_demand())
                .unwrap_or(0.0);
            let supply = self
                .production
                .get(&good)
                .map(|cap| cap.annual_output())
                .unwrap_or(0.0);
            self.gaps.insert(good, market_gap(demand, supply));
        }
    }

    /// Recompute production, consumption, and market gaps against the
    /// current state of `store`. The only entry point that mutates this
    /// aggregator — called once per `UpdateCommunityEconomyEvent`.
    pub fn recompute(&mut self, store: &AgentStore) {
        self.recompute_production(store);
        self.recompute_consumption(store);
        self.recompute_gaps();
    }

    pub fn production_of(&self, good: &str) -> Option<&ProductionCapacity> {
        self.production.get(good)
    }

    pub fn consumption_of(&self, good: &str) -> Option<&ConsumptionNeed> {
        self.consumption.get(good)
    }

    pub fn market_gap_of(&self, good: &str) -> MarketGap {
        self.gaps.get(good).copied().unwrap_or(0.0)
    }

    /// Goods whose market gap exceeds `threshold`, most-stressed first.
    /// Used by `ResourceStressCheckEvent` to pick which shortages to react
    /// to.
    pub fn goods_above_gap(&self, threshold: f64) -> Vec<(String, MarketGap)> {
        let mut stressed: Vec<(String, MarketGap)> = self
            .gaps
            .iter()
            .filter(|(_, gap)| **gap > threshold)
            .map(|(good, gap)| (good.clone(), *gap))
            .collect();
        stressed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        stressed
    }
}
