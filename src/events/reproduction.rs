use crate::error::SimResult;
use crate::model::{PersonId, RelationshipKind};
use crate::scheduler::SimEvent;
use crate::simulation::Simulation;

/// `spec.md` §4.6: annual, self-rescheduling. Fertility odds taper as a
/// mother accumulates more living-or-dead children (`k`), and stop
/// entirely at a hard cap of eight.
#[derive(Debug, Default)]
pub struct ReproductionCheckEvent;

impl SimEvent for ReproductionCheckEvent {
    fn name(&self) -> &'static str {
        "ReproductionCheckEvent"
    }

    fn execute(&self, sim: &mut Simulation) -> SimResult<()> {
        let t = sim.current_time;
        let candidates: Vec<PersonId> = sim.store.married_females().iter().copied().collect();

        for mother in candidates {
            let Some(person) = sim.store.get(mother) else { continue };
            if !person.is_alive_at(t) {
                continue;
            }
            let age = person.age_years(t);
            if !(age > 20.0 && age < 50.0) {
                continue;
            }
            let spouse_edges = sim.graph.get_outbound(mother, Some(RelationshipKind::Spouse), Some(t));
            let Some(father) = spouse_edges.first().map(|rel| rel.target) else { continue };
            if !sim.store.get(father).is_some_and(|p| p.is_alive_at(t)) {
                continue;
            }

            let k = sim.graph.get_outbound(mother, Some(RelationshipKind::Parent), None).len() as u32;
            if k >= 8 {
                continue;
            }
            let probability = 0.32 / (1.0 + 2.0 * k as f64);
            if sim.prng.bernoulli(probability) {
                sim.schedule(t, Box::new(crate::events::BirthEvent { mother_id: mother, father_id: father }));
            }
        }

        sim.schedule(t + super::YEAR_DAYS, Box::new(ReproductionCheckEvent));
        Ok(())
    }
}
