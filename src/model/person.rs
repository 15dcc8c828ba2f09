use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::time::SimTime;

pub type PersonId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn opposite(self) -> Sex {
        match self {
            Sex::Male => Sex::Female,
            Sex::Female => Sex::Male,
        }
    }
}

/// A simulated individual (`spec.md` §3, "Person").
///
/// Aptitude is in `[0.5, 1.5]` per skill; skill hours accumulate without
/// bound. Both maps are sparse — a skill absent from either map is read as
/// its default (1.0 aptitude, 0.0 hours) by [`Person::aptitude`] and
/// [`Person::skill_hours`].
#[derive(Debug, Clone)]
pub struct Person {
    pub id: PersonId,
    pub sex: Sex,
    pub birth_time: SimTime,
    pub death_time: Option<SimTime>,
    pub aptitudes: HashMap<String, f64>,
    pub skill_hours: HashMap<String, f64>,
    /// Current profession name, if any (mirrored in the store's
    /// `practitioners_by_profession` index).
    pub profession: Option<String>,
}

impl Person {
    pub fn new(id: PersonId, sex: Sex, birth_time: SimTime) -> Self {
        Self {
            id,
            sex,
            birth_time,
            death_time: None,
            aptitudes: HashMap::new(),
            skill_hours: HashMap::new(),
            profession: None,
        }
    }

    /// Alive at `t` iff `death_time` is absent or `death_time > t`
    /// (`spec.md` §3).
    pub fn is_alive_at(&self, t: SimTime) -> bool {
        match self.death_time {
            None => true,
            Some(death) => death > t,
        }
    }

    pub fn age_years(&self, t: SimTime) -> f64 {
        t.years_since(self.birth_time)
    }

    pub fn aptitude(&self, skill: &str) -> f64 {
        self.aptitudes.get(skill).copied().unwrap_or(1.0)
    }

    pub fn skill_hours_for(&self, skill: &str) -> f64 {
        self.skill_hours.get(skill).copied().unwrap_or(0.0)
    }

    pub fn add_skill_hours(&mut self, skill: &str, hours: f64) {
        *self.skill_hours.entry(skill.to_string()).or_insert(0.0) += hours;
    }
}
