use std::collections::HashMap;
use std::fmt;

use crate::model::PersonId;
use crate::simulation::Simulation;

/// Pairs eligible youths with masters across every profession with an
/// open slot this year (`spec.md` §4.7, invoked from `CareerMarketEvent`).
pub trait MatchmakingStrategy: fmt::Debug {
    /// Desirability of assigning `youth` to `master` in `profession`.
    /// Higher is more desirable. May draw from `sim.prng` for jitter.
    fn score(&self, sim: &mut Simulation, youth: PersonId, master: PersonId, profession: &str) -> f64;

    /// Return `(youth, master, profession)` triples. The default scores
    /// every candidate/master/profession combination, sorts descending,
    /// and greedily assigns — a deterministic O(Y·M·P log) approximation
    /// of optimal bipartite matching, not an exact solver.
    fn match_apprentices(
        &self,
        sim: &mut Simulation,
        candidates: &[PersonId],
        masters_by_profession: &HashMap<String, Vec<PersonId>>,
        remaining_capacity: &HashMap<PersonId, u32>,
        slots_by_profession: &HashMap<String, u32>,
    ) -> Vec<(PersonId, PersonId, String)> {
        let mut scored: Vec<(f64, PersonId, PersonId, String)> = Vec::new();
        for (profession, masters) in masters_by_profession {
            for &master in masters {
                for &youth in candidates {
                    let score = self.score(sim, youth, master, profession);
                    scored.push((score, youth, master, profession.clone()));
                }
            }
        }
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        let mut slots_left = slots_by_profession.clone();
        let mut capacity_left = remaining_capacity.clone();
        let mut matched_youths: std::collections::HashSet<PersonId> = std::collections::HashSet::new();
        let mut assignments = Vec::new();

        for (_, youth, master, profession) in scored {
            if matched_youths.contains(&youth) {
                continue;
            }
            let Some(slots) = slots_left.get_mut(&profession) else {
                continue;
            };
            if *slots == 0 {
                continue;
            }
            let Some(capacity) = capacity_left.get_mut(&master) else {
                continue;
            };
            if *capacity == 0 {
                continue;
            }
            *slots -= 1;
            *capacity -= 1;
            matched_youths.insert(youth);
            assignments.push((youth, master, profession));
        }

        assignments
    }
}

/// Default strategy (`spec.md` §4.7): prefers a youth's own parent as
/// master, then anyone sharing a parent with the youth, then weighs
/// master experience and youth aptitude, with a small jitter term to
/// break exact ties deterministically under a fixed seed.
#[derive(Debug, Default)]
pub struct FamilyPreferenceMatching;

impl MatchmakingStrategy for FamilyPreferenceMatching {
    fn score(&self, sim: &mut Simulation, youth: PersonId, master: PersonId, profession: &str) -> f64 {
        let Some(rule) = sim.economy.config().professions.get(profession) else {
            return f64::NEG_INFINITY;
        };
        let skill_name = rule.skill_name.clone();

        let youth_parents = sim.graph.get_parents(youth);
        let master_is_parent = youth_parents.contains(&master);
        let shares_a_parent = !master_is_parent && {
            let master_parents = sim.graph.get_parents(master);
            master_parents.iter().any(|p| youth_parents.contains(p))
        };
        let kinship = if master_is_parent {
            100.0
        } else if shares_a_parent {
            50.0
        } else {
            0.0
        };

        let master_skill_hours = sim
            .store
            .get(master)
            .map(|p| p.skill_hours_for(&skill_name))
            .unwrap_or(0.0);
        let youth_aptitude = sim
            .store
            .get(youth)
            .map(|p| p.aptitude(&skill_name))
            .unwrap_or(1.0);
        let jitter = sim.prng.uniform_range(0.0, 0.1);

        kinship + master_skill_hours / 1000.0 + youth_aptitude * 10.0 + jitter
    }
}
