mod building;
mod person;
mod profession;
mod relationship;

pub use building::{Building, BuildingId};
pub use person::{Person, PersonId, Sex};
pub use profession::{market_gap, ConsumptionNeed, MarketGap, ProductionCapacity, ProfessionRule};
pub use relationship::{EdgeMeta, Relationship, RelationshipKind};
