/// A profession rule loaded from the economy configuration (`spec.md` §3,
/// "Profession rule").
#[derive(Debug, Clone)]
pub struct ProfessionRule {
    pub name: String,
    pub skill_name: String,
    pub good_produced: String,
    pub max_apprentices_per_master: u32,
    pub apprenticeship_duration_years: u32,
    pub building_required: Option<String>,
    pub base_units_per_year: f64,
}

/// Production capacity for one good, recomputed annually by
/// `UpdateCommunityEconomyEvent` (`spec.md` §4.4).
#[derive(Debug, Clone)]
pub struct ProductionCapacity {
    pub profession: String,
    pub current_practitioners: u32,
    pub avg_skill_multiplier: f64,
    pub base_units_per_year: f64,
}

impl ProductionCapacity {
    pub fn annual_output(&self) -> f64 {
        self.base_units_per_year * self.current_practitioners as f64 * self.avg_skill_multiplier
    }
}

/// Consumption need for one good (`spec.md` §3).
#[derive(Debug, Clone)]
pub struct ConsumptionNeed {
    pub units_per_capita_year: f64,
    pub current_population: u32,
}

impl ConsumptionNeed {
    pub fn annual_demand(&self) -> f64 {
        self.units_per_capita_year * self.current_population as f64
    }
}

/// `demand / supply`, with the GLOSSARY's edge cases: `0` for zero demand,
/// `+inf` for positive demand over zero supply.
pub type MarketGap = f64;

pub fn market_gap(demand: f64, supply: f64) -> MarketGap {
    if demand <= 0.0 {
        0.0
    } else if supply <= 0.0 {
        f64::INFINITY
    } else {
        demand / supply
    }
}
