// Move scoring
//
// Every tick each of the four directions becomes a `CandidateMove`. Threshold
// checks attach tags, the tags are weighted through an exhaustive match, and
// continuous bonuses for our own space and the space taken from the nearest
// opponent are added on top. Nothing is cached between ticks.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::config::Config;
use crate::grid::{self, Grid};
use crate::projection::OpponentProjection;
use crate::reachability::{estimate_reachable, Deadline, ExclusionLayer, SearchOptions};
use crate::types::{Coord, Direction, TickState};

/// Qualitative label attached to a candidate move
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Tag {
    Death,
    DeathInTwo,
    TakenSoon,
    Trap,
    NarrowCorridor,
}

impl Tag {
    /// Weight of this tag given last tick's state
    pub fn weight(&self, config: &Config, state: TickState) -> i64 {
        let w = &config.weights;
        match self {
            Tag::Death => w.death,
            Tag::TakenSoon => w.taken_soon,
            Tag::Trap => w.trap,
            Tag::DeathInTwo => {
                if state.trapped {
                    w.death_in_two_when_trapped
                } else {
                    w.death_in_two
                }
            }
            Tag::NarrowCorridor => {
                if state.trapped {
                    w.narrow_corridor_when_trapped
                } else if state.in_corridor {
                    w.narrow_corridor_in_corridor
                } else {
                    w.narrow_corridor
                }
            }
        }
    }
}

/// One direction's features, tags and score for the current tick
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CandidateMove {
    pub direction: Direction,
    pub first: Coord,
    pub second: Coord,
    pub reachable_space: u32,
    pub corridor_width: u32,
    pub taken_soon: bool,
    pub nemesis_space_removed: i64,
    pub nemesis_space_removed_second: i64,
    pub tags: BTreeSet<Tag>,
    pub score: i64,
}

impl CandidateMove {
    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }
}

/// The opponent head closest to us and how much room it has this tick
#[derive(Debug, Clone, Copy)]
pub struct Nemesis {
    pub head: Coord,
    pub baseline_room: u32,
}

impl Nemesis {
    /// Stand-in when no opponents are left; it sits off the map so every
    /// search from it reports no room
    pub const SENTINEL: Coord = Coord { x: -1, y: -1 };

    /// Closest head by Manhattan distance, the earliest one on ties
    pub fn nearest(from: Coord, heads: &[Coord]) -> Option<Coord> {
        let mut best: Option<(i32, Coord)> = None;
        for &head in heads {
            let distance = grid::manhattan_distance(from, head);
            if best.map_or(true, |(d, _)| distance < d) {
                best = Some((distance, head));
            }
        }
        best.map(|(_, head)| head)
    }

    pub fn is_present(&self) -> bool {
        self.head != Self::SENTINEL
    }
}

/// Free cells directly beside `cell`, at right angles to the move
fn safe_sides(grid: &Grid, direction: Direction, cell: Coord) -> u32 {
    direction
        .perpendicular()
        .iter()
        .filter(|&&side| grid.is_safe(grid::step(side, cell)))
        .count() as u32
}

/// Safe cells beside the first and second cells of a move, up to four
pub fn corridor_width(grid: &Grid, direction: Direction, first: Coord, second: Coord) -> u32 {
    safe_sides(grid, direction, first) + safe_sides(grid, direction, second)
}

/// Scores candidate moves for one tick; projections and the nemesis baseline
/// are computed once at construction
pub struct MoveScorer<'a> {
    grid: &'a Grid,
    config: &'a Config,
    state: TickState,
    head: Coord,
    projection: OpponentProjection,
    exclusions: Vec<ExclusionLayer>,
    nemesis: Nemesis,
    deadline: Deadline,
}

impl<'a> MoveScorer<'a> {
    pub fn new(
        grid: &'a Grid,
        config: &'a Config,
        state: TickState,
        head: Coord,
        opponent_heads: &[Coord],
        deadline: Deadline,
    ) -> Self {
        let projection = OpponentProjection::compute(grid, opponent_heads);
        let exclusions = projection.exclusion_layers();

        let nemesis_head = Nemesis::nearest(head, opponent_heads).unwrap_or(Nemesis::SENTINEL);
        let mut scorer = MoveScorer {
            grid,
            config,
            state,
            head,
            projection,
            exclusions,
            nemesis: Nemesis {
                head: nemesis_head,
                baseline_room: 0,
            },
            deadline,
        };
        scorer.nemesis.baseline_room = scorer.nemesis_room(None);
        scorer
    }

    pub fn nemesis(&self) -> Nemesis {
        self.nemesis
    }

    /// Room around the nemesis head, optionally with one cell blocked off
    fn nemesis_room(&self, dead_spot: Option<Coord>) -> u32 {
        if !self.nemesis.is_present() {
            return 0;
        }

        let max_depth = self.config.search.nemesis_space_max_depth;
        let mut options =
            SearchOptions::new(max_depth, self.deadline).with_origin_exception(self.nemesis.head);
        if let Some(cell) = dead_spot {
            options = options.with_dead_spot(cell);
        }
        estimate_reachable(self.grid, self.nemesis.head, &options)
    }

    /// Zero once the tick budget is gone, since a cut-off search would count
    /// the whole baseline as removed
    fn nemesis_space_removed(&self, cell: Coord) -> i64 {
        if self.deadline.expired() {
            return 0;
        }
        self.nemesis.baseline_room as i64 - self.nemesis_room(Some(cell)) as i64
    }

    fn own_space(&self, start: Coord) -> u32 {
        let options = SearchOptions::new(self.config.search.own_space_max_depth, self.deadline)
            .with_exclusions(&self.exclusions);
        estimate_reachable(self.grid, start, &options)
    }

    /// Builds the candidate for one direction
    pub fn evaluate(&self, direction: Direction) -> CandidateMove {
        let first = grid::step(direction, self.head);
        let second = grid::step(direction, first);

        let reachable_space = self.own_space(first);
        let taken_soon = self.projection.taken_soon(first);
        let corridor_width = corridor_width(self.grid, direction, first, second);
        let nemesis_space_removed = self.nemesis_space_removed(first);
        let nemesis_space_removed_second = self.nemesis_space_removed(second);

        let thresholds = &self.config.thresholds;
        let mut tags = BTreeSet::new();
        if !self.grid.is_safe(first) {
            tags.insert(Tag::Death);
        }
        if !self.grid.is_safe(second) {
            tags.insert(Tag::DeathInTwo);
        }
        if taken_soon {
            tags.insert(Tag::TakenSoon);
        }
        if reachable_space < thresholds.trap_space {
            tags.insert(Tag::Trap);
        }
        if corridor_width < thresholds.narrow_corridor_width {
            tags.insert(Tag::NarrowCorridor);
        }

        let weights = &self.config.weights;
        let tag_score: i64 = tags
            .iter()
            .map(|tag| tag.weight(self.config, self.state))
            .sum();
        let score = tag_score
            + reachable_space as i64 * weights.space
            + nemesis_space_removed * weights.nemesis_space_removed
            + (nemesis_space_removed_second * weights.nemesis_space_removed) / 2;

        CandidateMove {
            direction,
            first,
            second,
            reachable_space,
            corridor_width,
            taken_soon,
            nemesis_space_removed,
            nemesis_space_removed_second,
            tags,
            score,
        }
    }

    /// Candidates for all four directions in evaluation order
    pub fn evaluate_all(&self) -> Vec<CandidateMove> {
        Direction::all()
            .into_iter()
            .map(|dir| self.evaluate(dir))
            .collect()
    }
}

/// Highest scoring candidate; the earliest one wins ties
pub fn pick_best(candidates: &[CandidateMove]) -> Option<&CandidateMove> {
    let mut best: Option<&CandidateMove> = None;
    for candidate in candidates {
        if best.map_or(true, |b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }
    best
}

/// Tick state to carry into the next tick after choosing `chosen`
pub fn next_tick_state(chosen: &CandidateMove) -> TickState {
    TickState {
        in_corridor: chosen.has_tag(Tag::NarrowCorridor),
        trapped: chosen.has_tag(Tag::Trap),
    }
}
