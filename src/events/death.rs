use crate::error::SimResult;
use crate::model::{PersonId, RelationshipKind};
use crate::scheduler::SimEvent;
use crate::simulation::Simulation;

/// `spec.md` §4.6. PARENT edges are immutable and survive the decedent;
/// everything else incident on them closes here.
#[derive(Debug)]
pub struct DeathEvent {
    pub person_id: PersonId,
}

impl SimEvent for DeathEvent {
    fn name(&self) -> &'static str {
        "DeathEvent"
    }

    fn execute(&self, sim: &mut Simulation) -> SimResult<()> {
        let t = sim.current_time;
        let Some(person) = sim.store.get(self.person_id) else { return Ok(()) };
        if !person.is_alive_at(t) {
            return Ok(());
        }

        sim.store.mark_dead(self.person_id, t);

        let heir = sim
            .graph
            .get_children(self.person_id)
            .into_iter()
            .filter(|&child| sim.store.get(child).is_some_and(|p| p.is_alive_at(t)))
            .min_by(|&a, &b| {
                let birth_a = sim.store.get(a).unwrap().birth_time;
                let birth_b = sim.store.get(b).unwrap().birth_time;
                birth_a.partial_cmp(&birth_b).unwrap_or(std::cmp::Ordering::Equal)
            });
        sim.schedule(
            t + 0.1,
            Box::new(InheritanceEvent { deceased_id: self.person_id, heir_id: heir }),
        );

        let spouse_edges = sim.graph.get_outbound(self.person_id, Some(RelationshipKind::Spouse), Some(t));
        for rel in spouse_edges {
            sim.graph.end_relationship(rel.source, rel.target, RelationshipKind::Spouse, t);
            sim.graph.end_relationship(rel.target, rel.source, RelationshipKind::Spouse, t);
            sim.store.mark_widowed(rel.target);
        }

        let as_master = sim.graph.get_outbound(self.person_id, Some(RelationshipKind::Apprentice), Some(t));
        let as_apprentice = sim.graph.get_inbound(self.person_id, Some(RelationshipKind::Apprentice), Some(t));
        for rel in as_master.into_iter().chain(as_apprentice) {
            sim.graph.end_relationship(rel.source, rel.target, RelationshipKind::Apprentice, t);
        }

        Ok(())
    }
}

/// `spec.md` §4.6: one-shot, scheduled 0.1 days after a `DeathEvent`.
#[derive(Debug)]
pub struct InheritanceEvent {
    pub deceased_id: PersonId,
    pub heir_id: Option<PersonId>,
}

impl SimEvent for InheritanceEvent {
    fn name(&self) -> &'static str {
        "InheritanceEvent"
    }

    fn execute(&self, sim: &mut Simulation) -> SimResult<()> {
        let t = sim.current_time;
        let heir_alive = self.heir_id.is_some_and(|heir| sim.store.get(heir).is_some_and(|p| p.is_alive_at(t)));
        let new_owner = if heir_alive { self.heir_id } else { None };

        for building_id in sim.store.buildings_owned_by(self.deceased_id) {
            sim.store.transfer_building_owner(building_id, new_owner);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EconomyConfig;
    use crate::economy::EconomyAggregator;
    use crate::model::{Building, Person, Sex};
    use crate::time::SimTime;

    fn sim() -> Simulation {
        let config = EconomyConfig::from_value(serde_json::json!({
            "professions": {"farmer": {"skill_name": "farming", "good_produced": "grain"}},
            "consumption": {},
        }))
        .unwrap();
        Simulation::new(EconomyAggregator::new(config), 1)
    }

    #[test]
    fn death_closes_spouse_edges_both_directions_and_widows_survivor() {
        let mut sim = sim();
        sim.store.add_person(Person::new(1, Sex::Male, SimTime::ZERO));
        sim.store.add_person(Person::new(2, Sex::Female, SimTime::ZERO));
        sim.graph.add_relationship(1, 2, RelationshipKind::Spouse, Some(SimTime::ZERO), None).unwrap();
        sim.graph.add_relationship(2, 1, RelationshipKind::Spouse, Some(SimTime::ZERO), None).unwrap();
        sim.store.mark_married(1, 2);
        sim.current_time = SimTime::new(100.0);

        DeathEvent { person_id: 1 }.execute(&mut sim).unwrap();

        assert!(!sim.store.get(1).unwrap().is_alive_at(SimTime::new(100.0)));
        assert!(sim.graph.get_outbound(1, Some(RelationshipKind::Spouse), Some(SimTime::new(200.0))).is_empty());
        assert!(sim.graph.get_outbound(2, Some(RelationshipKind::Spouse), Some(SimTime::new(200.0))).is_empty());
        assert!(!sim.store.is_married(2));
        assert!(sim.store.unmarried_females().contains(&2));
    }

    #[test]
    fn death_schedules_inheritance_to_eldest_living_child() {
        let mut sim = sim();
        sim.store.add_person(Person::new(1, Sex::Male, SimTime::ZERO));
        sim.store.add_person(Person::new(2, Sex::Male, SimTime::new(10.0)));
        sim.store.add_person(Person::new(3, Sex::Male, SimTime::new(20.0)));
        sim.graph.add_relationship(1, 2, RelationshipKind::Parent, Some(SimTime::new(10.0)), None).unwrap();
        sim.graph.add_relationship(1, 3, RelationshipKind::Parent, Some(SimTime::new(20.0)), None).unwrap();
        sim.current_time = SimTime::new(100.0);

        DeathEvent { person_id: 1 }.execute(&mut sim).unwrap();
        assert_eq!(sim.scheduler.len(), 1);
    }

    #[test]
    fn inheritance_transfers_to_living_heir() {
        let mut sim = sim();
        sim.store.add_person(Person::new(1, Sex::Male, SimTime::ZERO));
        sim.store.add_person(Person::new(2, Sex::Male, SimTime::ZERO));
        sim.store.add_building(Building::new(1, "forge", SimTime::ZERO));
        sim.store.transfer_building_owner(1, Some(1));

        InheritanceEvent { deceased_id: 1, heir_id: Some(2) }.execute(&mut sim).unwrap();
        assert!(sim.store.buildings_owned_by(2).contains(&1));
    }

    #[test]
    fn inheritance_orphans_building_when_heir_is_dead() {
        let mut sim = sim();
        sim.store.add_person(Person::new(1, Sex::Male, SimTime::ZERO));
        sim.store.add_person(Person::new(2, Sex::Male, SimTime::ZERO));
        sim.store.mark_dead(2, SimTime::new(5.0));
        sim.store.add_building(Building::new(1, "forge", SimTime::ZERO));
        sim.store.transfer_building_owner(1, Some(1));
        sim.current_time = SimTime::new(10.0);

        InheritanceEvent { deceased_id: 1, heir_id: Some(2) }.execute(&mut sim).unwrap();
        assert!(!sim.store.buildings_owned_by(2).contains(&1));
        assert!(sim.store.get_building(1).unwrap().owner.is_none());
    }
}
