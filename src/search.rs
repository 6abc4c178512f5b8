// Path search from our head to the nearest apple
//
// Two strategies share one entry point:
//   Bfs      - unit step cost, FIFO frontier
//   Crowded  - best-first on (path length + weight * crowdedness of entered cells)
//
// Both mark a cell as visited the first time it is enqueued, so the weighted
// search is greedy rather than strictly cost-optimal.

use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};
use std::fmt;

use crate::crowd::CrowdMap;
use crate::grid::Snapshot;
use crate::types::{Cell, Direction};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    Bfs,
    Crowded,
}

impl SearchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchStrategy::Bfs => "bfs",
            SearchStrategy::Crowded => "crowded",
        }
    }

    pub fn parse(s: &str) -> Result<SearchStrategy, String> {
        match s.trim().to_lowercase().as_str() {
            "bfs" => Ok(SearchStrategy::Bfs),
            "crowded" => Ok(SearchStrategy::Crowded),
            _ => Err(format!("Invalid strategy: {}", s)),
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Route found to an apple
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathToApple {
    /// Head first, apple last; always at least two cells
    pub path: Vec<Cell>,
    /// Accumulated cost as ordered by the strategy
    pub cost: u64,
    /// Cells popped from the frontier before the apple
    pub expanded: usize,
}

impl PathToApple {
    /// Direction from the head onto the first step
    pub fn first_direction(&self) -> Option<Direction> {
        self.path[0].direction_to(&self.path[1])
    }

    /// Number of moves, not cells
    pub fn moves(&self) -> usize {
        self.path.len() - 1
    }
}

/// Parent links recorded as cells are enqueued
struct Visited {
    width: usize,
    parent: Vec<Option<Cell>>,
    seen: Vec<bool>,
}

impl Visited {
    fn new(snapshot: &Snapshot, start: Cell) -> Self {
        let mut visited = Visited {
            width: snapshot.width,
            parent: vec![None; snapshot.height * snapshot.width],
            seen: vec![false; snapshot.height * snapshot.width],
        };
        let idx = visited.index(start);
        visited.seen[idx] = true;
        visited
    }

    fn index(&self, cell: Cell) -> usize {
        cell.row * self.width + cell.col
    }

    /// Marks `cell` as reached from `from`; false if it was already seen
    fn visit(&mut self, cell: Cell, from: Cell) -> bool {
        let idx = self.index(cell);
        if self.seen[idx] {
            return false;
        }
        self.seen[idx] = true;
        self.parent[idx] = Some(from);
        true
    }

    fn path_to(&self, goal: Cell) -> Vec<Cell> {
        let mut path = vec![goal];
        let mut cur = goal;
        while let Some(prev) = self.parent[self.index(cur)] {
            path.push(prev);
            cur = prev;
        }
        path.reverse();
        path
    }
}

/// Passable neighbours of `cell` in expansion order
fn open_neighbours(snapshot: &Snapshot, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
    Direction::neighbour_order()
        .into_iter()
        .filter_map(move |dir| cell.step(dir, snapshot.height, snapshot.width))
        .filter(move |next| snapshot.is_passable(*next))
}

/// Runs the chosen strategy from `head`. Returns None when no apple is
/// reachable. The head itself never counts as the goal.
pub fn find_path_to_apple(
    snapshot: &Snapshot,
    head: Cell,
    strategy: SearchStrategy,
    crowd: &CrowdMap,
    crowd_weight: u32,
) -> Option<PathToApple> {
    let found = match strategy {
        SearchStrategy::Bfs => bfs(snapshot, head),
        SearchStrategy::Crowded => best_first(snapshot, head, crowd, crowd_weight),
    };

    match &found {
        Some(p) => debug!(
            "{} search reached apple at {} in {} moves (cost {}, expanded {})",
            strategy,
            p.path[p.path.len() - 1],
            p.moves(),
            p.cost,
            p.expanded
        ),
        None => debug!("{} search found no reachable apple from {}", strategy, head),
    }

    found
}

fn bfs(snapshot: &Snapshot, head: Cell) -> Option<PathToApple> {
    let mut visited = Visited::new(snapshot, head);
    let mut queue = VecDeque::from([(head, 0u64)]);
    let mut expanded = 0;

    while let Some((cell, dist)) = queue.pop_front() {
        expanded += 1;
        if cell != head && snapshot.is_apple(cell) {
            return Some(PathToApple {
                path: visited.path_to(cell),
                cost: dist,
                expanded,
            });
        }

        for next in open_neighbours(snapshot, cell) {
            if visited.visit(next, cell) {
                queue.push_back((next, dist + 1));
            }
        }
    }

    None
}

fn best_first(
    snapshot: &Snapshot,
    head: Cell,
    crowd: &CrowdMap,
    crowd_weight: u32,
) -> Option<PathToApple> {
    let weight = u64::from(crowd_weight);
    let mut visited = Visited::new(snapshot, head);

    // (cost, insertion sequence, cell); the sequence keeps ties in FIFO order
    let mut frontier = BinaryHeap::new();
    let mut seq: u64 = 0;
    frontier.push(Reverse((weight * u64::from(crowd.at(head)), seq, head)));
    let mut expanded = 0;

    while let Some(Reverse((cost, _, cell))) = frontier.pop() {
        expanded += 1;
        if cell != head && snapshot.is_apple(cell) {
            return Some(PathToApple {
                path: visited.path_to(cell),
                cost,
                expanded,
            });
        }

        for next in open_neighbours(snapshot, cell) {
            if visited.visit(next, cell) {
                seq += 1;
                let next_cost = cost + 1 + weight * u64::from(crowd.at(next));
                frontier.push(Reverse((next_cost, seq, next)));
            }
        }
    }

    None
}
