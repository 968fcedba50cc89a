//! A* pathfinding over a 3D tile grid with per-tile speed modifiers and fixed-cost teleporters.
//!
//! Build a [`Map`], register [`Teleporter`]s on it, then route with a [`PathSearch`]:
//!
//! ```
//! use warpgrid::{Coord, Map, PathSearch, Teleporter, Tile};
//!
//! let mut map = Map::filled(5, 5, 2, Tile::open()).unwrap();
//! map.add_teleporter(Teleporter::new(Coord::new(4, 4, 0), Coord::new(0, 0, 1), 1.0).unwrap());
//!
//! let search = PathSearch::new(&map, true);
//! let path = search.find_path(Coord::new(0, 0, 0), Coord::new(1, 0, 1)).unwrap();
//!
//! assert_eq!(path.first(), Some(&Coord::new(0, 0, 0)));
//! assert_eq!(path.last(), Some(&Coord::new(1, 0, 1)));
//! ```

mod common;

pub mod coord;
pub mod error;
pub mod map;
pub mod options;
pub mod pathfind;
pub mod search;
pub mod teleporter;
pub mod tile;

pub use coord::Coord;
pub use error::MapError;
pub use map::Map;
pub use options::SearchOptions;
pub use search::PathSearch;
pub use teleporter::Teleporter;
pub use tile::Tile;

pub type FxIndexMap<K, V> = indexmap::IndexMap<K, V, std::hash::BuildHasherDefault<rustc_hash::FxHasher>>;
pub type Cost = ordered_float::OrderedFloat<f32>;

/// Cost reported for a single step that no move rule covers.
pub const UNREACHABLE: Cost = ordered_float::OrderedFloat(f32::INFINITY);
