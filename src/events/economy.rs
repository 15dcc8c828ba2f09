use crate::error::SimResult;
use crate::model::PersonId;
use crate::scheduler::SimEvent;
use crate::simulation::Simulation;

/// `spec.md` §4.6: annual, self-rescheduling. Delegates entirely to
/// [`crate::economy::EconomyAggregator::recompute`] — production,
/// consumption, and every market gap are recomputed together.
#[derive(Debug, Default)]
pub struct UpdateCommunityEconomyEvent;

impl SimEvent for UpdateCommunityEconomyEvent {
    fn name(&self) -> &'static str {
        "UpdateCommunityEconomyEvent"
    }

    fn execute(&self, sim: &mut Simulation) -> SimResult<()> {
        let t = sim.current_time;
        sim.economy.recompute(&sim.store);
        sim.schedule(t + super::YEAR_DAYS, Box::new(UpdateCommunityEconomyEvent));
        Ok(())
    }
}

/// `spec.md` §4.6: annual, self-rescheduling. Reacts to the worst shortage
/// among `critical_goods` by culling a weighted sample of the population.
#[derive(Debug)]
pub struct ResourceStressCheckEvent {
    pub critical_goods: Vec<String>,
}

impl SimEvent for ResourceStressCheckEvent {
    fn name(&self) -> &'static str {
        "ResourceStressCheckEvent"
    }

    fn execute(&self, sim: &mut Simulation) -> SimResult<()> {
        let t = sim.current_time;
        let g = self
            .critical_goods
            .iter()
            .map(|good| sim.economy.market_gap_of(good))
            .fold(0.0_f64, f64::max);

        let shortfall = if g.is_infinite() {
            1.0
        } else if g <= 1.0 {
            0.0
        } else {
            1.0 - 1.0 / g
        };

        let n = (sim.store.alive_population_count() as f64 * shortfall * 0.2).floor() as usize;
        if n == 0 {
            sim.schedule(t + super::YEAR_DAYS, Box::new(ResourceStressCheckEvent { critical_goods: self.critical_goods.clone() }));
            return Ok(());
        }

        let mut weighted: Vec<(f64, PersonId)> = sim
            .store
            .iter()
            .filter(|p| p.is_alive_at(t))
            .map(|p| {
                let mut weight = 1.0;
                let age = p.age_years(t);
                if age < 5.0 || age > 60.0 {
                    weight *= 3.0;
                }
                if p.profession.is_none() {
                    weight *= 2.0;
                }
                (weight, p.id)
            })
            .collect();
        for entry in weighted.iter_mut() {
            entry.0 *= sim.prng.uniform();
        }
        weighted.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        for &(_, victim) in weighted.iter().take(n) {
            let offset = sim.prng.uniform_range(0.0, 0.1);
            sim.schedule(t + offset, Box::new(crate::events::DeathEvent { person_id: victim }));
        }

        sim.schedule(t + super::YEAR_DAYS, Box::new(ResourceStressCheckEvent { critical_goods: self.critical_goods.clone() }));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EconomyConfig;
    use crate::economy::EconomyAggregator;
    use crate::model::{Person, Sex};
    use crate::time::SimTime;

    fn sim() -> Simulation {
        let config = EconomyConfig::from_value(serde_json::json!({
            "professions": {"farmer": {"skill_name": "farming", "good_produced": "grain"}},
            "consumption": {"grain": 2.0},
        }))
        .unwrap();
        Simulation::new(EconomyAggregator::new(config), 5)
    }

    #[test]
    fn update_economy_recomputes_and_reschedules() {
        let mut sim = sim();
        sim.store.add_person(Person::new(1, Sex::Male, SimTime::ZERO));
        UpdateCommunityEconomyEvent.execute(&mut sim).unwrap();
        assert!(sim.economy.market_gap_of("grain").is_infinite());
        assert_eq!(sim.scheduler.len(), 1);
    }

    #[test]
    fn stress_check_culls_nobody_below_gap_threshold() {
        let mut sim = sim();
        for id in 1..=10u64 {
            sim.store.add_person(Person::new(id, Sex::Male, SimTime::ZERO));
            sim.store.set_profession(id, Some("farmer".to_string()));
        }
        sim.economy.recompute(&sim.store);
        let event = ResourceStressCheckEvent { critical_goods: vec!["grain".to_string()] };
        event.execute(&mut sim).unwrap();
        // Reschedule only, no deaths, when supply comfortably meets demand.
        assert_eq!(sim.scheduler.len(), 1);
    }
}
