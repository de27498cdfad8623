// Opponent head projection
//
// Where can the other snakes' heads be after one, two or three more ticks?
// Each step expands every cell of the previous step into its safe neighbours.
// Duplicates are kept; membership is all the callers need.

use std::collections::HashSet;

use crate::grid::Grid;
use crate::reachability::ExclusionLayer;
use crate::types::Coord;

/// Cells reachable by the given heads after exactly `steps` safe moves
pub fn project_opponent_reach(grid: &Grid, heads: &[Coord], steps: u32) -> Vec<Coord> {
    let mut frontier = heads.to_vec();
    for _ in 0..steps {
        frontier = expand(grid, &frontier);
    }
    frontier
}

fn expand(grid: &Grid, cells: &[Coord]) -> Vec<Coord> {
    cells
        .iter()
        .flat_map(|&cell| grid.safe_neighbors(cell))
        .collect()
}

/// One, two and three step projections computed once per tick
#[derive(Debug, Clone, Default)]
pub struct OpponentProjection {
    pub one_step: HashSet<Coord>,
    pub two_step: HashSet<Coord>,
    pub three_step: HashSet<Coord>,
}

impl OpponentProjection {
    pub fn compute(grid: &Grid, heads: &[Coord]) -> Self {
        let one = expand(grid, heads);
        let two = expand(grid, &one);
        let three = expand(grid, &two);

        OpponentProjection {
            one_step: one.into_iter().collect(),
            two_step: two.into_iter().collect(),
            three_step: three.into_iter().collect(),
        }
    }

    /// True if an opponent head could move onto `coord` next tick
    pub fn taken_soon(&self, coord: Coord) -> bool {
        self.one_step.contains(&coord)
    }

    /// Exclusion layers for our own space search: the n-step projection blocks
    /// cells once the search is deeper than n
    pub fn exclusion_layers(&self) -> Vec<ExclusionLayer> {
        vec![
            ExclusionLayer {
                beyond_depth: 1,
                cells: self.one_step.clone(),
            },
            ExclusionLayer {
                beyond_depth: 2,
                cells: self.two_step.clone(),
            },
            ExclusionLayer {
                beyond_depth: 3,
                cells: self.three_step.clone(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MapSnapshot, SnakeInfo};

    fn grid_with_head(width: i32, height: i32, head: Coord) -> Grid {
        Grid::from_map(&MapSnapshot {
            width,
            height,
            world_tick: 0,
            snake_infos: vec![SnakeInfo {
                id: "other".to_string(),
                name: String::new(),
                points: 0,
                positions: vec![crate::grid::to_index(head, width) as i32],
            }],
            food_positions: vec![],
            obstacle_positions: vec![],
        })
    }

    #[test]
    fn test_zero_steps_is_the_heads_themselves() {
        let head = Coord::new(2, 2);
        let grid = grid_with_head(5, 5, head);
        assert_eq!(project_opponent_reach(&grid, &[head], 0), vec![head]);
    }

    #[test]
    fn test_one_step_from_corner_head() {
        let head = Coord::new(0, 0);
        let grid = grid_with_head(5, 5, head);
        let reach = project_opponent_reach(&grid, &[head], 1);
        assert_eq!(reach, vec![Coord::new(0, 1), Coord::new(1, 0)]);
    }

    #[test]
    fn test_two_steps_keeps_duplicates_and_skips_unsafe_cells() {
        let head = Coord::new(2, 2);
        let grid = grid_with_head(5, 5, head);
        let reach = project_opponent_reach(&grid, &[head], 2);

        // Each of the four first-step cells has three safe neighbours (the head is occupied)
        assert_eq!(reach.len(), 12);
        assert!(!reach.contains(&head));
        assert_eq!(reach.iter().filter(|&&c| c == Coord::new(1, 1)).count(), 2);
        assert!(reach.contains(&Coord::new(2, 0)));
    }

    #[test]
    fn test_projection_sets_and_layers() {
        let head = Coord::new(2, 2);
        let grid = grid_with_head(5, 5, head);
        let projection = OpponentProjection::compute(&grid, &[head]);

        assert!(projection.taken_soon(Coord::new(2, 1)));
        assert!(!projection.taken_soon(Coord::new(1, 1)));
        assert!(projection.two_step.contains(&Coord::new(1, 1)));
        assert!(projection.three_step.contains(&Coord::new(0, 1)));

        let layers = projection.exclusion_layers();
        assert_eq!(
            layers.iter().map(|l| l.beyond_depth).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_no_heads_projects_nothing() {
        let grid = grid_with_head(3, 3, Coord::new(1, 1));
        let projection = OpponentProjection::compute(&grid, &[]);
        assert!(projection.one_step.is_empty());
        assert!(projection.three_step.is_empty());
    }
}
