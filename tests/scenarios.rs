//! End-to-end routing scenarios on small hand-built maps.

use warpgrid::{Coord, Cost, Map, PathSearch, SearchOptions, Teleporter, Tile};

fn c(x: u32, y: u32, z: u32) -> Coord {
    Coord::new(x, y, z)
}

fn open_map(width: u32, height: u32, depth: u32) -> Map {
    Map::filled(width, height, depth, Tile::open()).unwrap()
}

fn assert_cost(actual: Cost, expected: f32) {
    assert!((actual.0 - expected).abs() < 1e-5, "expected cost {}, got {}", expected, actual);
}

/// Straight line across an open 5x5 grid with unit costs and no diagonals.
#[test]
fn straight_path_on_open_grid() {
    let map = open_map(5, 5, 1);
    let search = PathSearch::new(&map, false);

    let (path, cost) = search.find_path_with_cost(c(0, 0, 0), c(4, 0, 0)).unwrap();

    assert_eq!(path, vec![c(0, 0, 0), c(1, 0, 0), c(2, 0, 0), c(3, 0, 0), c(4, 0, 0)]);
    assert_cost(cost, 4.0);
}

/// A fast tile on the straight line only makes that one step cheaper.
#[test]
fn fast_tile_halves_its_step() {
    let mut map = open_map(5, 5, 1);
    map.set_tile(c(2, 0, 0), Tile::with_speed(2.0)).unwrap();
    let search = PathSearch::new(&map, false);

    let (path, cost) = search.find_path_with_cost(c(0, 0, 0), c(4, 0, 0)).unwrap();

    assert_eq!(path, vec![c(0, 0, 0), c(1, 0, 0), c(2, 0, 0), c(3, 0, 0), c(4, 0, 0)]);
    assert_cost(cost, 3.5);
    assert_eq!(search.calculate_move_cost(c(1, 0, 0), c(2, 0, 0), &map, map.get_tile(c(2, 0, 0)).unwrap()), Cost::from(0.5));
}

/// A slow tile is only avoided when the detour is strictly cheaper.
#[test]
fn slow_tile_detour_only_when_cheaper() {
    // Crossing a 0.5 tile costs 2: direct total 5, detour through y=1 costs 6
    let mut map = open_map(5, 5, 1);
    map.set_tile(c(2, 0, 0), Tile::with_speed(0.5)).unwrap();
    let search = PathSearch::new(&map, false);

    let (path, cost) = search.find_path_with_cost(c(0, 0, 0), c(4, 0, 0)).unwrap();
    assert!(path.contains(&c(2, 0, 0)));
    assert_cost(cost, 5.0);

    // Crossing a 0.25 tile costs 4: direct total 7, the detour wins
    map.set_tile(c(2, 0, 0), Tile::with_speed(0.25)).unwrap();
    let search = PathSearch::new(&map, false);

    let (path, cost) = search.find_path_with_cost(c(0, 0, 0), c(4, 0, 0)).unwrap();
    assert!(!path.contains(&c(2, 0, 0)));
    assert_cost(cost, 6.0);
}

/// A cheap teleporter jumps straight over a wall.
#[test]
fn teleporter_over_wall() {
    let mut map = open_map(5, 5, 1);
    map.set_tile(c(1, 0, 0), Tile::blocked()).unwrap();
    map.add_teleporter(Teleporter::new(c(0, 0, 0), c(2, 0, 0), 0.1).unwrap());
    let search = PathSearch::new(&map, false);

    let (path, cost) = search.find_path_with_cost(c(0, 0, 0), c(2, 0, 0)).unwrap();

    assert_eq!(path, vec![c(0, 0, 0), c(2, 0, 0)]);
    assert_cost(cost, 0.1);
}

/// Teleporters connect otherwise disconnected islands, in both directions.
#[test]
fn teleporter_bridges_islands() {
    let mut map = open_map(5, 1, 1);
    map.set_tile(c(2, 0, 0), Tile::blocked()).unwrap();

    assert_eq!(PathSearch::new(&map, true).find_path(c(0, 0, 0), c(4, 0, 0)), None);

    map.add_teleporter(Teleporter::new(c(1, 0, 0), c(3, 0, 0), 7.0).unwrap());
    let search = PathSearch::new(&map, true);

    let (path, cost) = search.find_path_with_cost(c(0, 0, 0), c(4, 0, 0)).unwrap();
    assert_eq!(path, vec![c(0, 0, 0), c(1, 0, 0), c(3, 0, 0), c(4, 0, 0)]);
    assert_cost(cost, 9.0);

    let (back, _) = search.find_path_with_cost(c(4, 0, 0), c(0, 0, 0)).unwrap();
    assert_eq!(back, vec![c(4, 0, 0), c(3, 0, 0), c(1, 0, 0), c(0, 0, 0)]);
}

/// Changing level is only possible through a teleporter.
#[test]
fn levels_connect_only_through_teleporters() {
    let mut map = open_map(3, 3, 2);
    let search = PathSearch::new(&map, true);
    assert_eq!(search.find_path(c(0, 0, 0), c(0, 0, 1)), None);

    map.add_teleporter(Teleporter::new(c(2, 2, 0), c(2, 0, 1), 1.0).unwrap());
    let search = PathSearch::new(&map, false);

    let path = search.find_path(c(0, 0, 0), c(0, 0, 1)).unwrap();
    assert_eq!(path.len(), 8);
    assert_eq!(path.iter().filter(|p| p.z == 1).count(), 3);
    assert_eq!(path[4], c(2, 2, 0));
    assert_eq!(path[5], c(2, 0, 1));
}

/// A goal whose every neighbour and teleporter exit is blocked can't be reached.
#[test]
fn walled_in_goal_is_not_found() {
    let goal = c(2, 2, 0);
    let mut map = open_map(5, 5, 1);
    for (dx, dy) in [(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (-1, 1), (0, 1), (1, 1)] {
        map.set_tile(goal.offset(dx, dy).unwrap(), Tile::blocked()).unwrap();
    }
    map.add_teleporter(Teleporter::new(goal, c(1, 1, 0), 0.0).unwrap());

    let search = PathSearch::new(&map, true);
    assert_eq!(search.find_path(c(0, 0, 0), goal), None);
    assert_eq!(search.find_path(goal, c(4, 4, 0)), None);
}

/// Invalid endpoints are a normal "no path" answer.
#[test]
fn invalid_endpoints_are_not_found() {
    let mut map = open_map(4, 4, 1);
    map.set_tile(c(3, 3, 0), Tile::blocked()).unwrap();
    let search = PathSearch::new(&map, true);

    assert_eq!(search.find_path(c(0, 0, 0), c(3, 3, 0)), None);
    assert_eq!(search.find_path(c(3, 3, 0), c(0, 0, 0)), None);
    assert_eq!(search.find_path(c(0, 0, 0), c(4, 0, 0)), None);
    assert_eq!(search.find_path(c(0, 0, 1), c(0, 0, 0)), None);
    assert_eq!(search.find_path(c(3, 3, 0), c(3, 3, 0)), None);
}

#[test]
fn start_equals_goal() {
    let map = open_map(4, 4, 1);
    let search = PathSearch::new(&map, false);

    assert_eq!(search.find_path(c(1, 2, 0), c(1, 2, 0)), Some(vec![c(1, 2, 0)]));
    assert_eq!(search.find_path_with_cost(c(1, 2, 0), c(1, 2, 0)).map(|(_, cost)| cost), Some(Cost::from(0.0)));
}

/// Duplicate teleporters behave exactly like a single one.
#[test]
fn duplicate_teleporters_are_harmless() {
    let mut map = open_map(6, 1, 1);
    map.set_tile(c(2, 0, 0), Tile::blocked()).unwrap();
    let t = Teleporter::new(c(1, 0, 0), c(5, 0, 0), 0.5).unwrap();
    map.add_teleporter(t);
    map.add_teleporter(t);

    let (path, cost) = PathSearch::new(&map, false).find_path_with_cost(c(0, 0, 0), c(5, 0, 0)).unwrap();

    assert_eq!(path, vec![c(0, 0, 0), c(1, 0, 0), c(5, 0, 0)]);
    assert_cost(cost, 1.5);
}

/// Custom move costs apply to every planar step before speed scaling.
#[test]
fn custom_move_costs() {
    let map = open_map(4, 4, 1);
    let options = SearchOptions::default().with_move_costs(2.0, 2.5);
    let search = PathSearch::with_options(&map, options).unwrap();

    let (path, cost) = search.find_path_with_cost(c(0, 0, 0), c(3, 3, 0)).unwrap();

    assert_eq!(path.len(), 4);
    assert_cost(cost, 7.5);
    assert_eq!(search.options(), &options);
}

/// The expansion cap turns a long search into "no path".
#[test]
fn expansion_cap_gives_up() {
    let map = open_map(64, 64, 1);
    let far = c(63, 63, 0);

    let capped = PathSearch::with_options(&map, SearchOptions::default().with_max_expansions(10)).unwrap();
    assert_eq!(capped.find_path(c(0, 0, 0), far), None);
    assert!(capped.find_path(c(0, 0, 0), c(2, 0, 0)).is_some());

    let uncapped = PathSearch::new(&map, true);
    assert!(uncapped.find_path(c(0, 0, 0), far).is_some());
}
