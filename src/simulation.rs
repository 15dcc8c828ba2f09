use crate::economy::EconomyAggregator;
use crate::graph::TemporalGraph;
use crate::id::IdGenerator;
use crate::matchmaking::{FamilyPreferenceMatching, MatchmakingStrategy};
use crate::prng::Prng;
use crate::scheduler::Scheduler;
use crate::store::AgentStore;
use crate::time::SimTime;

/// The top-level simulation: agent store, relationship graph, economy
/// aggregator, event scheduler, shared PRNG, and id generator bundled
/// together (`spec.md` §5).
///
/// Events receive `&mut Simulation` and read or mutate any of these
/// fields directly — there is no further indirection layer between an
/// event and the state it acts on.
pub struct Simulation {
    pub store: AgentStore,
    pub graph: TemporalGraph,
    pub economy: EconomyAggregator,
    pub scheduler: Scheduler,
    pub prng: Prng,
    pub person_ids: IdGenerator,
    pub building_ids: IdGenerator,
    pub current_time: SimTime,
    pub matchmaking: Box<dyn MatchmakingStrategy>,
}

impl Simulation {
    pub fn new(economy: EconomyAggregator, seed: u64) -> Self {
        Self {
            store: AgentStore::new(),
            graph: TemporalGraph::new(),
            economy,
            scheduler: Scheduler::new(),
            prng: Prng::new(seed),
            person_ids: IdGenerator::new(),
            building_ids: IdGenerator::new(),
            current_time: SimTime::ZERO,
            matchmaking: Box::new(FamilyPreferenceMatching::default()),
        }
    }

    pub fn with_matchmaking(mut self, strategy: Box<dyn MatchmakingStrategy>) -> Self {
        self.matchmaking = strategy;
        self
    }
}
