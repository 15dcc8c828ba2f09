use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::time::SimTime;

use super::person::PersonId;

/// `spec.md` §3: "Type ∈ {PARENT, SPOUSE, APPRENTICE}."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    Parent,
    Spouse,
    Apprentice,
}

impl Serialize for RelationshipKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let s = match self {
            RelationshipKind::Parent => "parent",
            RelationshipKind::Spouse => "spouse",
            RelationshipKind::Apprentice => "apprentice",
        };
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for RelationshipKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "parent" => Ok(RelationshipKind::Parent),
            "spouse" => Ok(RelationshipKind::Spouse),
            "apprentice" => Ok(RelationshipKind::Apprentice),
            other => Err(de::Error::custom(format!(
                "unknown relationship kind: {other}"
            ))),
        }
    }
}

/// Metadata carried by an edge, shared between the graph's forward and
/// reverse adjacency entries (`spec.md` §4.2).
///
/// `duration_years` is only ever set on APPRENTICE edges; it is `None` for
/// PARENT and SPOUSE. This is the "small, closed schema per relationship
/// type" `spec.md` §9 asks for, flattened into one struct rather than a
/// per-kind enum since there is exactly one type-specific field today.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EdgeMeta {
    pub start_time: SimTime,
    pub end_time: Option<SimTime>,
    pub duration_years: Option<f64>,
}

impl EdgeMeta {
    pub fn new(start_time: SimTime) -> Self {
        Self {
            start_time,
            end_time: None,
            duration_years: None,
        }
    }

    pub fn with_duration(mut self, duration_years: f64) -> Self {
        self.duration_years = Some(duration_years);
        self
    }

    /// Active at `t` iff `start_time <= t` and (`end_time` absent or `> t`).
    pub fn is_active_at(&self, t: SimTime) -> bool {
        self.start_time <= t && self.end_time.is_none_or(|end| end > t)
    }
}

/// A read-only view of one edge, returned by the graph's query methods.
#[derive(Debug, Clone, Copy)]
pub struct Relationship {
    pub source: PersonId,
    pub target: PersonId,
    pub kind: RelationshipKind,
    pub meta: EdgeMeta,
}
