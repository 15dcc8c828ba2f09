use std::collections::HashMap;

use crate::error::SimResult;
use crate::matchmaking::FamilyPreferenceMatching;
use crate::model::{Building, PersonId, RelationshipKind};
use crate::scheduler::SimEvent;
use crate::simulation::Simulation;
use crate::time::SimTime;

const QUARTER_DAYS: f64 = 91.25;

/// `spec.md` §4.6: annual, self-rescheduling. Opens apprenticeship slots
/// where the market is stressed, matches youths to masters via the
/// pluggable [`crate::matchmaking::MatchmakingStrategy`], and defaults any
/// unmatched eligible youth to farming.
#[derive(Debug, Default)]
pub struct CareerMarketEvent;

impl SimEvent for CareerMarketEvent {
    fn name(&self) -> &'static str {
        "CareerMarketEvent"
    }

    fn execute(&self, sim: &mut Simulation) -> SimResult<()> {
        let t = sim.current_time;

        let mut slots_by_profession: HashMap<String, u32> = HashMap::new();
        let goods: Vec<String> = sim.economy.config().all_goods();
        for good in &goods {
            let gap = sim.economy.market_gap_of(good);
            let open_probability = if gap.is_infinite() {
                1.0
            } else if gap <= 1.3 {
                0.0
            } else {
                (gap - 1.3).min(1.0)
            };
            if !sim.prng.bernoulli(open_probability) {
                continue;
            }
            let Some(profession) = sim
                .economy
                .config()
                .professions
                .values()
                .find(|rule| &rule.good_produced == good)
                .map(|rule| rule.name.clone())
            else {
                continue;
            };
            *slots_by_profession.entry(profession).or_insert(0) += 1;
        }

        let candidates: Vec<PersonId> = sim
            .store
            .iter()
            .filter(|p| {
                p.is_alive_at(t) && p.profession.is_none() && {
                    let age = p.age_years(t);
                    (16.0..=20.0).contains(&age)
                }
            })
            .map(|p| p.id)
            .collect();

        let mut masters_by_profession: HashMap<String, Vec<PersonId>> = HashMap::new();
        let mut remaining_capacity: HashMap<PersonId, u32> = HashMap::new();
        for profession in slots_by_profession.keys() {
            let Some(rule) = sim.economy.config().professions.get(profession) else { continue };
            let max_apprentices = rule.max_apprentices_per_master;
            let masters: Vec<PersonId> = sim
                .store
                .practitioners_of(profession)
                .into_iter()
                .filter(|&master| {
                    let active = sim.graph.get_outbound(master, Some(RelationshipKind::Apprentice), Some(t)).len() as u32;
                    if active < max_apprentices {
                        remaining_capacity.insert(master, max_apprentices - active);
                        true
                    } else {
                        false
                    }
                })
                .collect();
            masters_by_profession.insert(profession.clone(), masters);
        }

        let strategy = std::mem::replace(&mut sim.matchmaking, Box::new(FamilyPreferenceMatching));
        let assignments = strategy.match_apprentices(sim, &candidates, &masters_by_profession, &remaining_capacity, &slots_by_profession);
        sim.matchmaking = strategy;

        let mut matched = std::collections::HashSet::new();
        for (youth, master, profession) in assignments {
            matched.insert(youth);
            let Some(duration_years) = sim
                .economy
                .config()
                .professions
                .get(&profession)
                .map(|rule| rule.apprenticeship_duration_years)
            else {
                continue;
            };

            sim.graph.add_relationship(
                master,
                youth,
                RelationshipKind::Apprentice,
                Some(t),
                Some(duration_years as f64),
            )?;
            sim.schedule(
                t + duration_years as f64 * super::YEAR_DAYS,
                Box::new(GraduateApprenticeshipEvent { apprentice_id: youth, master_id: master, profession: profession.clone() }),
            );
            let transfers = 4 * duration_years;
            for q in 0..transfers {
                sim.schedule(
                    t + q as f64 * QUARTER_DAYS,
                    Box::new(SkillTransferEvent { apprentice_id: youth, master_id: master, profession: profession.clone() }),
                );
            }
        }

        for youth in candidates {
            if !matched.contains(&youth) {
                sim.store.set_profession(youth, Some("farmer".to_string()));
            }
        }

        sim.schedule(t + super::YEAR_DAYS, Box::new(CareerMarketEvent));
        Ok(())
    }
}

/// `spec.md` §4.6: scheduled quarterly for the life of an apprenticeship.
#[derive(Debug)]
pub struct SkillTransferEvent {
    pub apprentice_id: PersonId,
    pub master_id: PersonId,
    pub profession: String,
}

impl SimEvent for SkillTransferEvent {
    fn name(&self) -> &'static str {
        "SkillTransferEvent"
    }

    fn execute(&self, sim: &mut Simulation) -> SimResult<()> {
        let t = sim.current_time;
        let apprentice_alive = sim.store.get(self.apprentice_id).is_some_and(|p| p.is_alive_at(t));
        let master_alive = sim.store.get(self.master_id).is_some_and(|p| p.is_alive_at(t));
        if !apprentice_alive || !master_alive {
            return Ok(());
        }
        let edge_active = sim
            .graph
            .get_outbound(self.master_id, Some(RelationshipKind::Apprentice), Some(t))
            .iter()
            .any(|rel| rel.target == self.apprentice_id);
        if !edge_active {
            return Ok(());
        }

        let Some(rule) = sim.economy.config().professions.get(&self.profession) else { return Ok(()) };
        let skill = rule.skill_name.clone();

        let apprentice_aptitude = sim.store.get(self.apprentice_id).unwrap().aptitude(&skill);
        let master_hours = sim.store.get(self.master_id).unwrap().skill_hours_for(&skill);
        let hours_gained = 520.0 * apprentice_aptitude * (1.0 + (master_hours / 10_000.0).min(1.0));

        sim.store.get_mut(self.apprentice_id).unwrap().add_skill_hours(&skill, hours_gained);
        Ok(())
    }
}

/// `spec.md` §4.6: unconditionally closes the APPRENTICE edge; only sets
/// the apprentice's profession and builds their workplace if they are
/// still alive to graduate.
#[derive(Debug)]
pub struct GraduateApprenticeshipEvent {
    pub apprentice_id: PersonId,
    pub master_id: PersonId,
    pub profession: String,
}

impl SimEvent for GraduateApprenticeshipEvent {
    fn name(&self) -> &'static str {
        "GraduateApprenticeshipEvent"
    }

    fn execute(&self, sim: &mut Simulation) -> SimResult<()> {
        let t = sim.current_time;
        sim.graph.end_relationship(self.master_id, self.apprentice_id, RelationshipKind::Apprentice, t);

        let Some(person) = sim.store.get(self.apprentice_id) else { return Ok(()) };
        if !person.is_alive_at(t) {
            return Ok(());
        }

        sim.store.set_profession(self.apprentice_id, Some(self.profession.clone()));
        let Some(rule) = sim.economy.config().professions.get(&self.profession) else { return Ok(()) };
        if let Some(building_type) = rule.building_required.clone() {
            if !sim.store.owns_building_of_type(self.apprentice_id, &building_type) {
                let building_id = sim.building_ids.next_id();
                let mut building = Building::new(building_id, building_type, t);
                building.owner = Some(self.apprentice_id);
                sim.store.add_building(building);
            }
        }
        Ok(())
    }
}
