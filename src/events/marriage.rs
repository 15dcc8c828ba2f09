use crate::error::SimResult;
use crate::model::{PersonId, RelationshipKind};
use crate::scheduler::SimEvent;
use crate::simulation::Simulation;
use crate::time::SimTime;

/// `spec.md` §4.6.
#[derive(Debug)]
pub struct MarriageEvent {
    pub male_id: PersonId,
    pub female_id: PersonId,
}

impl SimEvent for MarriageEvent {
    fn name(&self) -> &'static str {
        "MarriageEvent"
    }

    fn execute(&self, sim: &mut Simulation) -> SimResult<()> {
        let t = sim.current_time;
        let male_alive = sim.store.get(self.male_id).is_some_and(|p| p.is_alive_at(t));
        let female_alive = sim.store.get(self.female_id).is_some_and(|p| p.is_alive_at(t));
        if !male_alive || !female_alive {
            return Ok(());
        }

        sim.graph.add_relationship(self.male_id, self.female_id, RelationshipKind::Spouse, Some(t), None)?;
        sim.graph.add_relationship(self.female_id, self.male_id, RelationshipKind::Spouse, Some(t), None)?;
        sim.store.mark_married(self.male_id, self.female_id);
        Ok(())
    }
}

/// `spec.md` §4.6: annual, self-rescheduling. Relatedness test rejects a
/// shared parent, an immediate parent/child pair, and an aunt/uncle to
/// niece/nephew pair — anything closer is left to the family itself.
#[derive(Debug, Default)]
pub struct MarriageMarketEvent;

impl MarriageMarketEvent {
    fn is_related(sim: &Simulation, a: PersonId, b: PersonId) -> bool {
        let a_parents = sim.graph.get_parents(a);
        let b_parents = sim.graph.get_parents(b);
        if a_parents.iter().any(|p| b_parents.contains(p)) {
            return true;
        }
        if a_parents.contains(&b) || b_parents.contains(&a) {
            return true;
        }
        let a_grandparents = sim.graph.get_grandparents(a);
        let b_grandparents = sim.graph.get_grandparents(b);
        if b_parents.iter().any(|p| a_grandparents.contains(p)) {
            return true;
        }
        if a_parents.iter().any(|p| b_grandparents.contains(p)) {
            return true;
        }
        false
    }
}

impl SimEvent for MarriageMarketEvent {
    fn name(&self) -> &'static str {
        "MarriageMarketEvent"
    }

    fn execute(&self, sim: &mut Simulation) -> SimResult<()> {
        let t = sim.current_time;
        let eligible = |id: &PersonId, sim: &Simulation| -> bool {
            sim.store.get(*id).is_some_and(|p| p.is_alive_at(t) && p.age_years(t) >= 20.0)
        };

        let mut males: Vec<PersonId> = sim.store.unmarried_males().iter().copied().filter(|id| eligible(id, sim)).collect();
        let mut females: Vec<PersonId> = sim.store.unmarried_females().iter().copied().filter(|id| eligible(id, sim)).collect();
        sim.prng.shuffle(&mut males);
        sim.prng.shuffle(&mut females);

        let mut used = std::collections::HashSet::new();
        for &male in &males {
            let Some(&bride) = females
                .iter()
                .find(|&&f| !used.contains(&f) && !Self::is_related(sim, male, f))
            else {
                continue;
            };
            used.insert(bride);
            sim.schedule(t, Box::new(MarriageEvent { male_id: male, female_id: bride }));
        }

        sim.schedule(t + super::YEAR_DAYS, Box::new(MarriageMarketEvent));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EconomyConfig;
    use crate::economy::EconomyAggregator;
    use crate::model::{Person, Sex};

    fn sim() -> Simulation {
        let config = EconomyConfig::from_value(serde_json::json!({
            "professions": {"farmer": {"skill_name": "farming", "good_produced": "grain"}},
            "consumption": {},
        }))
        .unwrap();
        Simulation::new(EconomyAggregator::new(config), 1)
    }

    #[test]
    fn marriage_adds_symmetric_spouse_edges() {
        let mut sim = sim();
        sim.store.add_person(Person::new(1, Sex::Male, SimTime::ZERO));
        sim.store.add_person(Person::new(2, Sex::Female, SimTime::ZERO));
        MarriageEvent { male_id: 1, female_id: 2 }.execute(&mut sim).unwrap();

        assert!(sim.store.is_married(1));
        assert!(sim.store.is_married(2));
        assert_eq!(sim.graph.get_outbound(1, Some(RelationshipKind::Spouse), None).len(), 1);
        assert_eq!(sim.graph.get_outbound(2, Some(RelationshipKind::Spouse), None).len(), 1);
    }

    #[test]
    fn marriage_skips_when_either_party_dead() {
        let mut sim = sim();
        sim.store.add_person(Person::new(1, Sex::Male, SimTime::ZERO));
        sim.store.add_person(Person::new(2, Sex::Female, SimTime::ZERO));
        sim.store.mark_dead(1, SimTime::new(1.0));
        sim.current_time = SimTime::new(5.0);
        MarriageEvent { male_id: 1, female_id: 2 }.execute(&mut sim).unwrap();
        assert!(!sim.store.is_married(2));
    }

    #[test]
    fn siblings_are_rejected_by_relatedness_test() {
        let mut sim = sim();
        for id in 1..=4u64 {
            sim.store.add_person(Person::new(id, Sex::Male, SimTime::ZERO));
        }
        sim.graph.add_relationship(1, 3, RelationshipKind::Parent, Some(SimTime::ZERO), None).unwrap();
        sim.graph.add_relationship(1, 4, RelationshipKind::Parent, Some(SimTime::ZERO), None).unwrap();
        assert!(MarriageMarketEvent::is_related(&sim, 3, 4));
        assert!(!MarriageMarketEvent::is_related(&sim, 3, 2));
    }

    #[test]
    fn market_event_reschedules_itself_annually() {
        let mut sim = sim();
        MarriageMarketEvent.execute(&mut sim).unwrap();
        assert_eq!(sim.scheduler.len(), 1);
    }
}
