mod birth;
mod career;
mod death;
mod economy;
mod marriage;
mod reproduction;

pub use birth::{BirthEvent, InfantMortalityCheckEvent};
pub use career::{CareerMarketEvent, GraduateApprenticeshipEvent, SkillTransferEvent};
pub use death::{DeathEvent, InheritanceEvent};
pub use economy::{ResourceStressCheckEvent, UpdateCommunityEconomyEvent};
pub use marriage::{MarriageEvent, MarriageMarketEvent};
pub use reproduction::ReproductionCheckEvent;

/// Annual cadence every self-rescheduling event reuses (`spec.md` §4.6).
pub(crate) const YEAR_DAYS: f64 = 365.0;
