use crate::events::{CareerMarketEvent, MarriageMarketEvent, ReproductionCheckEvent, ResourceStressCheckEvent, UpdateCommunityEconomyEvent};
use crate::model::{Building, Person, PersonId, RelationshipKind, Sex};
use crate::simulation::Simulation;
use crate::time::SimTime;

const FOUNDER_MIN_AGE_YEARS: f64 = 20.0;
const FOUNDER_MAX_AGE_YEARS: f64 = 30.0;

/// Seed the eight-founder population and the initial event schedule
/// (`spec.md` §6). Meant to run once, immediately after `Simulation::new`,
/// before the first call to `Simulation::run`.
pub fn bootstrap(sim: &mut Simulation) {
    seed_founders(sim);
    seed_initial_schedule(sim);
}

fn seed_founders(sim: &mut Simulation) {
    // Odd ids male, even ids female; (1, 2) and (5, 6) start married, as
    // `spec.md` §6 names them explicitly.
    let sexes = [
        (1u64, Sex::Male),
        (2u64, Sex::Female),
        (3u64, Sex::Male),
        (4u64, Sex::Female),
        (5u64, Sex::Male),
        (6u64, Sex::Female),
        (7u64, Sex::Male),
        (8u64, Sex::Female),
    ];
    let skill_names: Vec<String> = sim
        .economy
        .config()
        .professions
        .values()
        .map(|rule| rule.skill_name.clone())
        .collect();

    for (id, sex) in sexes {
        let age_years = sim.prng.uniform_range(FOUNDER_MIN_AGE_YEARS, FOUNDER_MAX_AGE_YEARS);
        let birth_time = SimTime::ZERO + (-age_years * 365.0);
        let mut person = Person::new(id, sex, birth_time);
        for skill in &skill_names {
            person.aptitudes.insert(skill.clone(), sim.prng.uniform_range(0.7, 1.3));
        }
        sim.store.add_person(person);

        let lifespan_days = sim.prng.gauss(65.0, 10.0) * 365.0;
        sim.schedule(birth_time + lifespan_days, Box::new(crate::events::DeathEvent { person_id: id }));
    }
    // Keep the id generator past every id we hand-assigned above.
    sim.person_ids = crate::id::IdGenerator::starting_from(9);

    for &(male, female) in &[(1u64, 2u64), (5u64, 6u64)] {
        sim.graph
            .add_relationship(male, female, RelationshipKind::Spouse, Some(SimTime::ZERO), None)
            .expect("start_time is always supplied here");
        sim.graph
            .add_relationship(female, male, RelationshipKind::Spouse, Some(SimTime::ZERO), None)
            .expect("start_time is always supplied here");
        sim.store.mark_married(male, female);
    }

    seed_founding_tradesperson(sim, 1, "blacksmith", "forge");
    seed_founding_tradesperson(sim, 5, "carpenter", "workshop");
}

fn seed_founding_tradesperson(sim: &mut Simulation, person_id: PersonId, profession: &str, building_type: &str) {
    if !sim.economy.config().professions.contains_key(profession) {
        tracing::debug!(profession, "founding profession absent from config, skipping seed");
        return;
    }
    sim.store.set_profession(person_id, Some(profession.to_string()));
    let building_id = sim.building_ids.next_id();
    let mut building = Building::new(building_id, building_type, SimTime::ZERO);
    building.owner = Some(person_id);
    sim.store.add_building(building);
}

fn seed_initial_schedule(sim: &mut Simulation) {
    let critical_goods = sim.economy.config().all_goods();
    sim.schedule(SimTime::new(0.1), Box::new(UpdateCommunityEconomyEvent));
    sim.schedule(SimTime::new(0.2), Box::new(ResourceStressCheckEvent { critical_goods }));
    sim.schedule(SimTime::new(0.5), Box::new(CareerMarketEvent));
    sim.schedule(SimTime::new(1.0), Box::new(ReproductionCheckEvent));
    sim.schedule(SimTime::new(1.5), Box::new(MarriageMarketEvent));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EconomyConfig;
    use crate::economy::EconomyAggregator;

    fn config() -> EconomyConfig {
        EconomyConfig::from_value(serde_json::json!({
            "professions": {
                "blacksmith": {"skill_name": "smithing", "good_produced": "tools", "building_required": "forge"},
                "carpenter": {"skill_name": "carpentry", "good_produced": "furniture", "building_required": "workshop"},
                "farmer": {"skill_name": "farming", "good_produced": "grain"},
            },
            "consumption": {"tools": 0.2, "furniture": 0.1, "grain": 2.0},
        }))
        .unwrap()
    }

    #[test]
    fn bootstrap_seeds_eight_founders_with_two_marriages() {
        let mut sim = Simulation::new(EconomyAggregator::new(config()), 42);
        bootstrap(&mut sim);

        assert_eq!(sim.store.alive_population_count(), 8);
        assert_eq!(sim.store.alive_male_count(), 4);
        assert_eq!(sim.store.alive_female_count(), 4);
        assert!(sim.store.is_married(1));
        assert!(sim.store.is_married(2));
        assert!(sim.store.is_married(5));
        assert!(sim.store.is_married(6));
        assert!(!sim.store.is_married(3));
    }

    #[test]
    fn bootstrap_seeds_blacksmith_and_carpenter_with_buildings() {
        let mut sim = Simulation::new(EconomyAggregator::new(config()), 42);
        bootstrap(&mut sim);

        assert_eq!(sim.store.get(1).unwrap().profession.as_deref(), Some("blacksmith"));
        assert!(sim.store.owns_building_of_type(1, "forge"));
        assert_eq!(sim.store.get(5).unwrap().profession.as_deref(), Some("carpenter"));
        assert!(sim.store.owns_building_of_type(5, "workshop"));
    }

    #[test]
    fn bootstrap_schedules_initial_events_and_founder_deaths() {
        let mut sim = Simulation::new(EconomyAggregator::new(config()), 42);
        bootstrap(&mut sim);
        // 5 initial schedule entries + 8 founder DeathEvents.
        assert_eq!(sim.scheduler.len(), 13);
    }

    #[test]
    fn next_person_id_after_bootstrap_is_nine() {
        let mut sim = Simulation::new(EconomyAggregator::new(config()), 42);
        bootstrap(&mut sim);
        assert_eq!(sim.person_ids.next_id(), 9);
    }
}
