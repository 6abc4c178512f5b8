// Move selection: crowdedness map, apple search, then fallbacks
//
// A decision is made in three tiers:
// 1. First step of the search path toward the nearest reachable apple
// 2. First empty neighbour of the head (Right, Left, Up, Down)
// 3. The configured default direction

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::crowd::CrowdMap;
use crate::grid::Snapshot;
use crate::search::{find_path_to_apple, SearchStrategy};
use crate::types::{Cell, Direction};

/// Why a direction was chosen
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecisionReason {
    /// Stepping onto the first cell of a path to an apple
    PathToApple { apple: Cell, moves: usize, cost: u64 },
    /// No apple reachable; moving into an empty neighbour
    OpenNeighbour { cell: Cell },
    /// Head surrounded on every side
    Trapped,
    /// Snapshot has no cell with our head code
    NoHead,
    /// Input could not be parsed
    InvalidInput { error: String },
}

/// Direction plus its justification
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub direction: Direction,
    pub reason: DecisionReason,
}

impl Decision {
    pub fn code(&self) -> u8 {
        self.direction.code()
    }
}

/// Stateless move selector parameterised by a Config
pub struct MoveSelector {
    config: Config,
}

impl MoveSelector {
    /// Creates a new selector with the given configuration
    pub fn new(config: Config) -> Self {
        MoveSelector { config }
    }

    pub fn strategy(&self) -> SearchStrategy {
        self.config.search.strategy
    }

    /// Parses stdin text and selects a move. Malformed input falls back to
    /// the default direction.
    pub fn select_from_input(&self, input: &str) -> (Option<Snapshot>, Decision) {
        match Snapshot::parse(input) {
            Ok(snapshot) => {
                let decision = self.select(&snapshot);
                (Some(snapshot), decision)
            }
            Err(e) => {
                warn!("Malformed snapshot: {}", e);
                let decision = self.default_decision(DecisionReason::InvalidInput {
                    error: e.to_string(),
                });
                (None, decision)
            }
        }
    }

    /// Computes the move for `snapshot`
    pub fn select(&self, snapshot: &Snapshot) -> Decision {
        let head = match snapshot.head() {
            Some(head) => head,
            None => {
                warn!(
                    "No cell carries head code {}, using default direction",
                    snapshot.head_code
                );
                return self.default_decision(DecisionReason::NoHead);
            }
        };

        debug!(
            "Snapshot {}x{}, head at {}, {} apples",
            snapshot.height,
            snapshot.width,
            head,
            snapshot.apple_count()
        );

        let decision = self
            .path_decision(snapshot, head)
            .or_else(|| Self::open_neighbour_decision(snapshot, head))
            .unwrap_or_else(|| self.default_decision(DecisionReason::Trapped));

        info!(
            "Chose {} ({}) via {:?}",
            decision.direction,
            decision.code(),
            decision.reason
        );

        decision
    }

    fn path_decision(&self, snapshot: &Snapshot, head: Cell) -> Option<Decision> {
        let search = &self.config.search;
        let crowd = CrowdMap::build(snapshot, search.crowd_window, search.crowd_radius);
        debug!(
            "Crowdedness {} window size {}: head {}, busiest cell {}",
            search.crowd_window,
            search.crowd_radius,
            crowd.at(head),
            crowd.max()
        );

        let found = find_path_to_apple(
            snapshot,
            head,
            search.strategy,
            &crowd,
            search.crowd_weight,
        )?;

        let direction = found.first_direction()?;
        Some(Decision {
            direction,
            reason: DecisionReason::PathToApple {
                apple: found.path[found.path.len() - 1],
                moves: found.moves(),
                cost: found.cost,
            },
        })
    }

    fn open_neighbour_decision(snapshot: &Snapshot, head: Cell) -> Option<Decision> {
        Direction::neighbour_order().into_iter().find_map(|dir| {
            let cell = head.step(dir, snapshot.height, snapshot.width)?;
            if snapshot.is_empty(cell) {
                Some(Decision {
                    direction: dir,
                    reason: DecisionReason::OpenNeighbour { cell },
                })
            } else {
                None
            }
        })
    }

    fn default_decision(&self, reason: DecisionReason) -> Decision {
        Decision {
            direction: self.config.fallback.default_direction,
            reason,
        }
    }
}
