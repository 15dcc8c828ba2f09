use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{SimError, SimResult};
use crate::model::{EdgeMeta, PersonId, Relationship, RelationshipKind};
use crate::time::SimTime;

type SharedMeta = Rc<RefCell<EdgeMeta>>;

/// Directed, typed, non-destructive edge store (`spec.md` §4.2).
///
/// `forward[source]` and `reverse[target]` hold `(other_end, kind, meta)`
/// triples; the same `Rc<RefCell<EdgeMeta>>` is shared between a forward
/// entry and its mirrored reverse entry, so `end_relationship` called from
/// either direction is visible from the other immediately. Edges are never
/// removed — closing one sets `end_time` on the shared metadata record.
#[derive(Debug, Default)]
pub struct TemporalGraph {
    forward: HashMap<PersonId, Vec<(PersonId, RelationshipKind, SharedMeta)>>,
    reverse: HashMap<PersonId, Vec<(PersonId, RelationshipKind, SharedMeta)>>,
}

impl TemporalGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an edge `source -> target` of `kind`. Requires `start_time`
    /// (`spec.md` §4.2: "fails with MISSING_START_TIME if start_time is not
    /// supplied"). Overwrites any existing `(source, target, kind)` entry —
    /// callers must guard against unwanted overwrites themselves.
    pub fn add_relationship(
        &mut self,
        source: PersonId,
        target: PersonId,
        kind: RelationshipKind,
        start_time: Option<SimTime>,
        duration_years: Option<f64>,
    ) -> SimResult<()> {
        let start_time = start_time.ok_or(SimError::MissingStartTime)?;
        let mut meta = EdgeMeta::new(start_time);
        if let Some(duration) = duration_years {
            meta = meta.with_duration(duration);
        }
        let shared = Rc::new(RefCell::new(meta));

        let fwd = self.forward.entry(source).or_default();
        fwd.retain(|(t, k, _)| !(*t == target && *k == kind));
        fwd.push((target, kind, shared.clone()));

        let rev = self.reverse.entry(target).or_default();
        rev.retain(|(s, k, _)| !(*s == source && *k == kind));
        rev.push((source, kind, shared));

        Ok(())
    }

    /// Set `end_time` on the `(source, target, kind)` edge. Silent no-op if
    /// the edge is absent (duplicate-close tolerance, `spec.md` §4.2).
    pub fn end_relationship(
        &mut self,
        source: PersonId,
        target: PersonId,
        kind: RelationshipKind,
        end_time: SimTime,
    ) {
        if let Some(entries) = self.forward.get(&source) {
            for (t, k, meta) in entries {
                if *t == target && *k == kind {
                    meta.borrow_mut().end_time = Some(end_time);
                    return;
                }
            }
        }
    }

    fn to_relationship(source: PersonId, target: PersonId, kind: RelationshipKind, meta: &SharedMeta) -> Relationship {
        Relationship {
            source,
            target,
            kind,
            meta: *meta.borrow(),
        }
    }

    fn query(
        index: &HashMap<PersonId, Vec<(PersonId, RelationshipKind, SharedMeta)>>,
        anchor_is_source: bool,
        anchor: PersonId,
        kind: Option<RelationshipKind>,
        active_at_time: Option<SimTime>,
    ) -> Vec<Relationship> {
        let Some(entries) = index.get(&anchor) else {
            return Vec::new();
        };
        entries
            .iter()
            .filter(|(_, k, _)| kind.is_none_or(|want| *k == want))
            .filter(|(_, _, meta)| {
                active_at_time.is_none_or(|t| meta.borrow().is_active_at(t))
            })
            .map(|(other, k, meta)| {
                if anchor_is_source {
                    Self::to_relationship(anchor, *other, *k, meta)
                } else {
                    Self::to_relationship(*other, anchor, *k, meta)
                }
            })
            .collect()
    }

    /// Edges outbound from `source`, optionally filtered by `kind` and/or
    /// restricted to those active at `active_at_time`.
    pub fn get_outbound(
        &self,
        source: PersonId,
        kind: Option<RelationshipKind>,
        active_at_time: Option<SimTime>,
    ) -> Vec<Relationship> {
        Self::query(&self.forward, true, source, kind, active_at_time)
    }

    /// Edges inbound to `target`, symmetric to [`Self::get_outbound`].
    pub fn get_inbound(
        &self,
        target: PersonId,
        kind: Option<RelationshipKind>,
        active_at_time: Option<SimTime>,
    ) -> Vec<Relationship> {
        Self::query(&self.reverse, false, target, kind, active_at_time)
    }

    /// Parents of `person`: inbound PARENT edges. Historical (no active
    /// filter) since PARENT edges are immutable and never close.
    pub fn get_parents(&self, person: PersonId) -> Vec<PersonId> {
        self.get_inbound(person, Some(RelationshipKind::Parent), None)
            .into_iter()
            .map(|r| r.source)
            .collect()
    }

    /// Children of `person`: outbound PARENT edges.
    pub fn get_children(&self, person: PersonId) -> Vec<PersonId> {
        self.get_outbound(person, Some(RelationshipKind::Parent), None)
            .into_iter()
            .map(|r| r.target)
            .collect()
    }

    /// Grandparents of `person`: parents of `person`'s parents.
    pub fn get_grandparents(&self, person: PersonId) -> Vec<PersonId> {
        self.get_parents(person)
            .into_iter()
            .flat_map(|parent| self.get_parents(parent))
            .collect()
    }
}
