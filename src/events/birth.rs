use crate::error::SimResult;
use crate::model::{Person, PersonId, RelationshipKind, Sex};
use crate::scheduler::SimEvent;
use crate::simulation::Simulation;
use crate::time::SimTime;

/// `spec.md` §4.6: fires when a married couple conceives. Guarded on both
/// parents being alive with an active SPOUSE edge between them — a
/// widowed mother never reaches this point because `ReproductionCheckEvent`
/// already checks for a living spouse before scheduling it, but the guard
/// is repeated here since events must not trust their own preconditions.
#[derive(Debug)]
pub struct BirthEvent {
    pub mother_id: PersonId,
    pub father_id: PersonId,
}

impl SimEvent for BirthEvent {
    fn name(&self) -> &'static str {
        "BirthEvent"
    }

    fn execute(&self, sim: &mut Simulation) -> SimResult<()> {
        let t = sim.current_time;
        let Some(mother) = sim.store.get(self.mother_id) else { return Ok(()) };
        let Some(father) = sim.store.get(self.father_id) else { return Ok(()) };
        if !mother.is_alive_at(t) || !father.is_alive_at(t) {
            return Ok(());
        }
        let spouse_active = sim
            .graph
            .get_outbound(self.mother_id, Some(RelationshipKind::Spouse), Some(t))
            .iter()
            .any(|rel| rel.target == self.father_id);
        if !spouse_active {
            return Ok(());
        }

        let male_ratio = if sim.store.alive_population_count() > 0 {
            sim.store.alive_male_count() as f64 / sim.store.alive_population_count() as f64
        } else {
            0.5
        };
        let prob_male = 0.5 + (0.5 - male_ratio) * 0.2;
        let sex = if sim.prng.bernoulli(prob_male) { Sex::Male } else { Sex::Female };

        let child_id = sim.person_ids.next_id();
        let mut child = Person::new(child_id, sex, t);

        let skill_names: Vec<String> = sim
            .economy
            .config()
            .professions
            .values()
            .map(|rule| rule.skill_name.clone())
            .collect();
        let mother = sim.store.get(self.mother_id).expect("checked above");
        let father = sim.store.get(self.father_id).expect("checked above");
        for skill in &skill_names {
            let mean = (mother.aptitude(skill) + father.aptitude(skill)) / 2.0;
            let drawn = sim.prng.gauss(mean, 0.15).clamp(0.5, 1.5);
            child.aptitudes.insert(skill.clone(), drawn);
        }

        sim.store.add_person(child);
        sim.graph
            .add_relationship(self.mother_id, child_id, RelationshipKind::Parent, Some(t), None)?;
        sim.graph
            .add_relationship(self.father_id, child_id, RelationshipKind::Parent, Some(t), None)?;

        sim.schedule(
            t + super::YEAR_DAYS,
            Box::new(InfantMortalityCheckEvent { child_id, p: 0.25 }),
        );
        let lifespan_days = sim.prng.gauss(65.0, 10.0) * super::YEAR_DAYS;
        sim.schedule(t + lifespan_days, Box::new(crate::events::DeathEvent { person_id: child_id }));

        Ok(())
    }
}

/// `spec.md` §4.6: one-shot check scheduled a year after birth, carrying
/// the mortality probability it was created with.
#[derive(Debug)]
pub struct InfantMortalityCheckEvent {
    pub child_id: PersonId,
    pub p: f64,
}

impl SimEvent for InfantMortalityCheckEvent {
    fn name(&self) -> &'static str {
        "InfantMortalityCheckEvent"
    }

    fn execute(&self, sim: &mut Simulation) -> SimResult<()> {
        let t = sim.current_time;
        let Some(child) = sim.store.get(self.child_id) else { return Ok(()) };
        if !child.is_alive_at(t) {
            return Ok(());
        }
        if sim.prng.bernoulli(self.p) {
            sim.schedule(t, Box::new(crate::events::DeathEvent { person_id: self.child_id }));
        }
        Ok(())
    }
}
