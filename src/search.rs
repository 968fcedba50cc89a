use itertools::Itertools;

use crate::{error::MapError, pathfind, Coord, Cost, Map, SearchOptions, Tile, UNREACHABLE};

const PLANAR: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];
const DIAGONAL: [(i32, i32); 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];

/// A* over a [`Map`], with the movement rules fixed at construction.
///
/// The heuristic is the 3D Manhattan distance. It only underestimates while every step costs at
/// least one unit per axis moved. Teleporters, speed modifiers above 1.0 and move costs below 1.0
/// can all break that, in which case the search still returns a valid path but not necessarily
/// the cheapest one.
#[derive(Copy, Clone, Debug)]
pub struct PathSearch<'a> {
    map: &'a Map,
    options: SearchOptions,
}

impl<'a> PathSearch<'a> {
    /// Unit orthogonal cost, `√2` diagonal cost, no expansion cap.
    pub fn new(map: &'a Map, allow_diagonal: bool) -> PathSearch<'a> {
        PathSearch { map, options: SearchOptions::default().with_diagonal(allow_diagonal) }
    }

    /// Fails with [`MapError::InvalidMoveCost`] if a move cost is negative or NaN.
    pub fn with_options(map: &'a Map, options: SearchOptions) -> Result<PathSearch<'a>, MapError> {
        options.validate()?;
        Ok(PathSearch { map, options })
    }

    pub fn map(&self) -> &'a Map {
        self.map
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Cheapest known route from `start` to `goal`, both included.
    ///
    /// `None` when no route exists, or when either end is outside the map or not walkable.
    pub fn find_path(&self, start: Coord, goal: Coord) -> Option<Vec<Coord>> {
        self.find_path_with_cost(start, goal).map(|(path, _)| path)
    }

    pub fn find_path_with_cost(&self, start: Coord, goal: Coord) -> Option<(Vec<Coord>, Cost)> {
        if !self.map.is_walkable(start) || !self.map.is_walkable(goal) {
            log::debug!("no path {} -> {}: an endpoint is out of range or blocked", start, goal);
            return None;
        }

        if start == goal {
            return Some((vec![start], Cost::from(0.0)));
        }

        log::debug!("searching {} -> {}", start, goal);
        pathfind::find(
            start,
            |&pos| self.successors(pos),
            |pos| pos.manhattan_distance(&goal),
            |&pos| pos == goal,
            self.options.max_expansions,
        )
    }

    /// Every cell reachable from `pos` in one step, with the cost of that step.
    pub fn successors(&self, pos: Coord) -> Vec<(Coord, Cost)> {
        let map = self.map;
        let mut out = Vec::with_capacity(8);

        let diagonals: &[(i32, i32)] = if self.options.allow_diagonal { &DIAGONAL } else { &[] };
        let offsets = PLANAR.iter().map(|&d| (d, false)).chain(diagonals.iter().map(|&d| (d, true)));

        for ((dx, dy), diagonal) in offsets {
            let next = match pos.offset(dx, dy) {
                Some(next) => next,
                None => continue,
            };

            match map.get_tile(next) {
                Ok(tile) if tile.walkable => out.push((next, self.planar_cost(diagonal, tile))),
                _ => {}
            }
        }

        for teleporter in map.teleporters_at(pos) {
            match teleporter.exit_from(pos) {
                Some(exit) if map.is_walkable(exit) => out.push((exit, teleporter.cost)),
                _ => {}
            }
        }

        out
    }

    /// Cost of a single step from `from` to `to`, using `tile` as the destination tile.
    ///
    /// A teleporter between the two cells wins over planar movement. Any step that is neither a
    /// teleporter nor a permitted planar move costs [`UNREACHABLE`]. Walkability is not checked.
    pub fn calculate_move_cost(&self, from: Coord, to: Coord, map: &Map, tile: &Tile) -> Cost {
        let teleport = map.teleporters_at(from).filter(|t| t.connects(from, to)).map(|t| t.cost).min();
        if let Some(cost) = teleport {
            return cost;
        }

        if !from.is_planar_neighbor(&to) {
            return UNREACHABLE;
        }

        let diagonal = from.is_diagonal_to(&to);
        if diagonal && !self.options.allow_diagonal {
            return UNREACHABLE;
        }

        self.planar_cost(diagonal, tile)
    }

    /// Sum of [`calculate_move_cost`](Self::calculate_move_cost) over consecutive cells of `path`
    /// on the bound map.
    pub fn path_cost(&self, path: &[Coord]) -> Result<Cost, MapError> {
        if let Some(&first) = path.first() {
            self.map.get_tile(first)?;
        }

        path.iter().tuple_windows::<(_, _)>().try_fold(Cost::from(0.0), |total, (&from, &to)| -> Result<Cost, MapError> {
            let tile = self.map.get_tile(to)?;
            Ok(total + self.calculate_move_cost(from, to, self.map, tile))
        })
    }

    #[inline]
    fn planar_cost(&self, diagonal: bool, tile: &Tile) -> Cost {
        Cost::from(tile.scale_cost(self.options.base_cost(diagonal)))
    }
}

#[cfg(test)]
fn open_map(width: u32, height: u32, depth: u32) -> Map {
    Map::filled(width, height, depth, Tile::open()).unwrap()
}

#[test]
fn successors_respect_diagonal_flag() {
    let map = open_map(3, 3, 1);
    let centre = Coord::new(1, 1, 0);

    assert_eq!(PathSearch::new(&map, false).successors(centre).len(), 4);
    assert_eq!(PathSearch::new(&map, true).successors(centre).len(), 8);
}

#[test]
fn successors_skip_blocked_and_out_of_range_cells() {
    let mut map = open_map(3, 3, 2);
    map.set_tile(Coord::new(1, 0, 0), Tile::blocked()).unwrap();

    let search = PathSearch::new(&map, true);
    let mut next = search.successors(Coord::new(0, 0, 0)).into_iter().map(|(c, _)| c).collect::<Vec<_>>();
    next.sort();

    assert_eq!(next, vec![Coord::new(0, 1, 0), Coord::new(1, 1, 0)]);
}

#[test]
fn successors_scale_planar_cost_by_destination_speed() {
    let mut map = open_map(3, 1, 1);
    map.set_tile(Coord::new(1, 0, 0), Tile::with_speed(2.0)).unwrap();
    map.set_tile(Coord::new(2, 0, 0), Tile::with_speed(0.5)).unwrap();

    let search = PathSearch::new(&map, false);

    assert_eq!(search.successors(Coord::new(0, 0, 0)), vec![(Coord::new(1, 0, 0), Cost::from(0.5))]);
    assert_eq!(
        search.successors(Coord::new(1, 0, 0)),
        vec![(Coord::new(2, 0, 0), Cost::from(2.0)), (Coord::new(0, 0, 0), Cost::from(1.0))]
    );
}

#[test]
fn successors_follow_teleporters_to_walkable_exits() {
    let mut map = open_map(4, 4, 2);
    let here = Coord::new(0, 0, 0);
    let up = Coord::new(3, 3, 1);
    let blocked = Coord::new(2, 2, 1);
    let outside = Coord::new(9, 9, 9);

    map.set_tile(up, Tile::with_speed(4.0)).unwrap();
    map.set_tile(blocked, Tile::blocked()).unwrap();
    map.add_teleporter(crate::Teleporter::new(here, up, 3.0).unwrap());
    map.add_teleporter(crate::Teleporter::new(blocked, here, 1.0).unwrap());
    map.add_teleporter(crate::Teleporter::new(here, outside, 1.0).unwrap());

    let search = PathSearch::new(&map, false);
    let teleports = search.successors(here).into_iter().filter(|(c, _)| c.z == 1).collect::<Vec<_>>();

    // Teleporter cost isn't scaled by the exit tile's speed
    assert_eq!(teleports, vec![(up, Cost::from(3.0))]);
}

#[test]
fn move_cost_prefers_cheapest_teleporter() {
    let mut map = open_map(3, 1, 1);
    let a = Coord::new(0, 0, 0);
    let b = Coord::new(1, 0, 0);
    map.add_teleporter(crate::Teleporter::new(a, b, 0.75).unwrap());
    map.add_teleporter(crate::Teleporter::new(b, a, 0.25).unwrap());

    let search = PathSearch::new(&map, false);
    let tile = *map.get_tile(b).unwrap();

    assert_eq!(search.calculate_move_cost(a, b, &map, &tile), Cost::from(0.25));
}

#[test]
fn move_cost_rejects_steps_no_rule_covers() {
    let map = open_map(4, 4, 2);
    let search = PathSearch::new(&map, false);
    let tile = Tile::open();
    let a = Coord::new(1, 1, 0);

    assert_eq!(search.calculate_move_cost(a, Coord::new(2, 1, 0), &map, &tile), Cost::from(1.0));
    assert_eq!(search.calculate_move_cost(a, Coord::new(2, 2, 0), &map, &tile), UNREACHABLE);
    assert_eq!(search.calculate_move_cost(a, Coord::new(3, 1, 0), &map, &tile), UNREACHABLE);
    assert_eq!(search.calculate_move_cost(a, Coord::new(1, 1, 1), &map, &tile), UNREACHABLE);
    assert_eq!(search.calculate_move_cost(a, a, &map, &tile), UNREACHABLE);

    let diagonal = PathSearch::new(&map, true);
    let slow = Tile::with_speed(0.5);
    assert_eq!(
        diagonal.calculate_move_cost(a, Coord::new(2, 2, 0), &map, &slow),
        Cost::from(std::f32::consts::SQRT_2 / 0.5)
    );
}

#[test]
fn path_cost_sums_steps() {
    let mut map = open_map(5, 1, 2);
    map.set_tile(Coord::new(2, 0, 0), Tile::with_speed(2.0)).unwrap();
    map.add_teleporter(crate::Teleporter::new(Coord::new(3, 0, 0), Coord::new(0, 0, 1), 0.5).unwrap());

    let search = PathSearch::new(&map, false);
    let path = [Coord::new(1, 0, 0), Coord::new(2, 0, 0), Coord::new(3, 0, 0), Coord::new(0, 0, 1)];

    assert_eq!(search.path_cost(&path), Ok(Cost::from(2.0)));
    assert_eq!(search.path_cost(&path[..1]), Ok(Cost::from(0.0)));
    assert_eq!(search.path_cost(&[]), Ok(Cost::from(0.0)));
    assert!(search.path_cost(&[Coord::new(5, 0, 0)]).is_err());
    assert_eq!(search.path_cost(&[Coord::new(0, 0, 0), Coord::new(4, 0, 0)]), Ok(UNREACHABLE));
}

#[test]
fn negative_move_costs_are_rejected_before_searching() {
    let map = open_map(3, 1, 1);
    let options = SearchOptions::default().with_move_costs(-1.0, -1.0).with_max_expansions(50);

    assert_eq!(PathSearch::with_options(&map, options).unwrap_err(), MapError::InvalidMoveCost(-1.0));

    let free = PathSearch::with_options(&map, SearchOptions::default().with_move_costs(0.0, 0.0)).unwrap();
    let (path, cost) = free.find_path_with_cost(Coord::new(0, 0, 0), Coord::new(2, 0, 0)).unwrap();
    assert_eq!(path, vec![Coord::new(0, 0, 0), Coord::new(1, 0, 0), Coord::new(2, 0, 0)]);
    assert_eq!(cost, Cost::from(0.0));
}

#[test]
fn find_path_reports_cost() {
    let map = open_map(5, 5, 1);
    let search = PathSearch::new(&map, true);

    let (path, cost) = search.find_path_with_cost(Coord::new(0, 0, 0), Coord::new(3, 3, 0)).unwrap();

    assert_eq!(path.len(), 4);
    assert!((cost.0 - 3.0 * std::f32::consts::SQRT_2).abs() < 1e-5);
    assert_eq!(search.path_cost(&path), Ok(cost));
}
