// Bounded depth-first space estimation
//
// The estimate is the deepest depth reached along any branch, not the number
// of distinct cells visited. As soon as one branch reaches `max_depth` every
// other branch of the same search stops expanding, so an area that is "big
// enough" is reported as exactly `max_depth` without exploring the rest of it.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::grid::{self, Grid};
use crate::types::{Coord, Direction};

/// Soft wall-clock limit for one tick
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    pub fn after(start: Instant, budget: Duration) -> Self {
        Deadline { at: start + budget }
    }

    /// A deadline far enough away to never trigger in practice
    pub fn unbounded() -> Self {
        Deadline {
            at: Instant::now() + Duration::from_secs(60 * 60 * 24),
        }
    }

    pub fn expired(&self) -> bool {
        Instant::now() >= self.at
    }
}

/// A set of cells treated as blocked once the search is deeper than `beyond_depth`
#[derive(Debug, Clone)]
pub struct ExclusionLayer {
    pub beyond_depth: u32,
    pub cells: HashSet<Coord>,
}

/// Parameters for one `estimate_reachable` call
#[derive(Debug, Clone)]
pub struct SearchOptions<'a> {
    pub max_depth: u32,
    pub exclusions: &'a [ExclusionLayer],
    /// Cell allowed as a start even though it is occupied (an opponent's own head)
    pub origin_exception: Option<Coord>,
    /// Cell treated as blocked, used to simulate occupying it
    pub dead_spot: Option<Coord>,
    pub deadline: Deadline,
}

impl<'a> SearchOptions<'a> {
    pub fn new(max_depth: u32, deadline: Deadline) -> Self {
        SearchOptions {
            max_depth,
            exclusions: &[],
            origin_exception: None,
            dead_spot: None,
            deadline,
        }
    }

    pub fn with_exclusions(mut self, exclusions: &'a [ExclusionLayer]) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn with_origin_exception(mut self, origin: Coord) -> Self {
        self.origin_exception = Some(origin);
        self
    }

    pub fn with_dead_spot(mut self, dead_spot: Coord) -> Self {
        self.dead_spot = Some(dead_spot);
        self
    }
}

/// State owned by a single search: visited cells and the abort signal
struct Search<'g, 'o> {
    grid: &'g Grid,
    options: &'o SearchOptions<'o>,
    visited: Vec<bool>,
    aborted: bool,
}

impl<'g, 'o> Search<'g, 'o> {
    fn is_excluded(&self, coord: Coord, depth: u32) -> bool {
        self.options
            .exclusions
            .iter()
            .any(|layer| depth > layer.beyond_depth && layer.cells.contains(&coord))
    }

    fn visit(&mut self, coord: Coord, depth: u32) -> u32 {
        if depth == self.options.max_depth {
            self.aborted = true;
            return depth;
        }

        let index = match self.grid.index_of(coord) {
            Some(index) => index,
            None => return depth,
        };

        if !self.grid.is_safe(coord) && self.options.origin_exception != Some(coord) {
            return depth;
        }
        if self.visited[index] || self.aborted {
            return depth;
        }
        if self.is_excluded(coord, depth) || self.options.dead_spot == Some(coord) {
            return depth;
        }
        if self.options.deadline.expired() {
            return depth;
        }

        self.visited[index] = true;

        let mut deepest = 0;
        for dir in Direction::all() {
            let next = grid::step(dir, coord);
            if self.grid.is_safe(next) {
                deepest = deepest.max(self.visit(next, depth + 1));
            }
        }
        deepest
    }
}

/// Estimates how much room there is around `start` as the depth reached by a
/// bounded depth-first search
pub fn estimate_reachable(grid: &Grid, start: Coord, options: &SearchOptions) -> u32 {
    let mut search = Search {
        grid,
        options,
        visited: vec![false; grid.cell_count()],
        aborted: false,
    };
    search.visit(start, 0)
}
