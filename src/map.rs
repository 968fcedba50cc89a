use crate::{error::MapError, Coord, FxIndexMap, Teleporter, Tile};

/// Dense 3D tile storage plus the teleporters connecting its cells.
///
/// Tiles are laid out x fastest, then y, then z. Teleporters live in one master list; the
/// per-coordinate index only stores positions into that list, so the two can't drift apart.
#[derive(Clone, Debug)]
pub struct Map {
    width: u32,
    height: u32,
    depth: u32,

    tiles: Vec<Tile>,

    teleporters: Vec<Teleporter>,
    incident: FxIndexMap<Coord, Vec<usize>>,
}

impl Map {
    pub fn new(width: u32, height: u32, depth: u32, tiles: Vec<Tile>) -> Result<Map, MapError> {
        if tile_count(width, height, depth).map_or(true, |n| n == 0 || n != tiles.len()) {
            return Err(MapError::InvalidDimensions { width, height, depth, tiles: tiles.len() });
        }

        let map = Map { width, height, depth, tiles, teleporters: Vec::new(), incident: FxIndexMap::default() };

        if let Some(i) = map.tiles.iter().position(|tile| !tile.has_valid_speed()) {
            return Err(MapError::InvalidSpeedModifier { coord: map.coord(i), modifier: map.tiles[i].speed_modifier });
        }

        Ok(map)
    }

    pub fn filled(width: u32, height: u32, depth: u32, tile: Tile) -> Result<Map, MapError> {
        let len = tile_count(width, height, depth).ok_or(MapError::InvalidDimensions { width, height, depth, tiles: 0 })?;
        Map::new(width, height, depth, vec![tile; len])
    }

    pub fn from_fn(width: u32, height: u32, depth: u32, mut f: impl FnMut(Coord) -> Tile) -> Result<Map, MapError> {
        let len = tile_count(width, height, depth).ok_or(MapError::InvalidDimensions { width, height, depth, tiles: 0 })?;

        let mut tiles = Vec::with_capacity(len);
        for z in 0..depth {
            for y in 0..height {
                for x in 0..width {
                    tiles.push(f(Coord::new(x, y, z)));
                }
            }
        }

        Map::new(width, height, depth, tiles)
    }

    /// Generates a map for benchmarks and stress tests. Roughly `blocked_ratio` of the tiles are
    /// unwalkable; the rest get a speed modifier drawn from `speed`.
    #[cfg(feature = "rand")]
    pub fn random(
        rand: &mut impl rand::Rng,
        width: u32,
        height: u32,
        depth: u32,
        blocked_ratio: f64,
        speed: std::ops::Range<f32>,
    ) -> Result<Map, MapError> {
        Map::from_fn(width, height, depth, |_| {
            if rand.gen_bool(blocked_ratio) {
                Tile::blocked()
            } else {
                Tile::with_speed(rand.gen_range(speed.clone()))
            }
        })
    }

    #[inline(always)]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[inline(always)]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[inline(always)]
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height && coord.z < self.depth
    }

    pub fn get_tile(&self, coord: Coord) -> Result<&Tile, MapError> {
        self.index(coord).map(|i| &self.tiles[i])
    }

    pub fn set_tile(&mut self, coord: Coord, tile: Tile) -> Result<(), MapError> {
        let i = self.index(coord)?;
        if !tile.has_valid_speed() {
            return Err(MapError::InvalidSpeedModifier { coord, modifier: tile.speed_modifier });
        }

        self.tiles[i] = tile;
        Ok(())
    }

    /// In bounds and walkable.
    #[inline]
    pub fn is_walkable(&self, coord: Coord) -> bool {
        self.get_tile(coord).map_or(false, |tile| tile.walkable)
    }

    /// Registers `teleporter` under both of its endpoints. Adding the same teleporter twice
    /// registers it twice.
    pub fn add_teleporter(&mut self, teleporter: Teleporter) {
        let index = self.teleporters.len();
        self.teleporters.push(teleporter);

        self.incident.entry(teleporter.point_a).or_default().push(index);
        if teleporter.point_b != teleporter.point_a {
            self.incident.entry(teleporter.point_b).or_default().push(index);
        }

        log::trace!("teleporter {} {:?} <-> {:?} cost {}", index, teleporter.point_a, teleporter.point_b, teleporter.cost);
    }

    pub fn teleporters_at(&self, coord: Coord) -> impl Iterator<Item = &Teleporter> + '_ {
        self.incident.get(&coord).into_iter().flatten().map(move |&i| &self.teleporters[i])
    }

    pub fn teleporters(&self) -> &[Teleporter] {
        &self.teleporters
    }

    fn index(&self, coord: Coord) -> Result<usize, MapError> {
        if !self.contains(coord) {
            return Err(MapError::OutOfRange { coord, width: self.width, height: self.height, depth: self.depth });
        }

        let (w, h) = (self.width as usize, self.height as usize);
        Ok(coord.x as usize + coord.y as usize * w + coord.z as usize * w * h)
    }

    fn coord(&self, index: usize) -> Coord {
        let (w, h) = (self.width as usize, self.height as usize);
        Coord::new((index % w) as u32, (index / w % h) as u32, (index / (w * h)) as u32)
    }
}

fn tile_count(width: u32, height: u32, depth: u32) -> Option<usize> {
    (width as usize).checked_mul(height as usize)?.checked_mul(depth as usize)
}

#[test]
fn rejects_overflowing_dimensions() {
    let overflow = MapError::InvalidDimensions { width: u32::MAX, height: u32::MAX, depth: 2, tiles: 0 };

    assert_eq!(Map::filled(u32::MAX, u32::MAX, 2, Tile::open()).unwrap_err(), overflow);
    assert_eq!(Map::from_fn(u32::MAX, u32::MAX, 2, |_| Tile::open()).unwrap_err(), overflow);
    assert_eq!(Map::new(u32::MAX, u32::MAX, 2, Vec::new()).unwrap_err(), overflow);
}

#[test]
fn rejects_mismatched_tile_count() {
    let err = Map::new(2, 2, 2, vec![Tile::open(); 7]).unwrap_err();
    assert_eq!(err, MapError::InvalidDimensions { width: 2, height: 2, depth: 2, tiles: 7 });

    assert!(Map::new(0, 3, 1, Vec::new()).is_err());
    assert!(Map::filled(3, 3, 0, Tile::open()).is_err());
}

#[test]
fn rejects_invalid_speed_modifiers() {
    let err = Map::from_fn(3, 2, 2, |c| if c == Coord::new(1, 1, 1) { Tile::with_speed(0.0) } else { Tile::open() })
        .unwrap_err();
    assert_eq!(err, MapError::InvalidSpeedModifier { coord: Coord::new(1, 1, 1), modifier: 0.0 });

    let mut map = Map::filled(2, 2, 1, Tile::open()).unwrap();
    assert!(map.set_tile(Coord::new(0, 0, 0), Tile::with_speed(-2.0)).is_err());
    assert_eq!(map.get_tile(Coord::new(0, 0, 0)), Ok(&Tile::open()));
}

#[test]
fn get_tile_fails_out_of_range() {
    let map = Map::filled(3, 4, 2, Tile::open()).unwrap();

    assert!(map.get_tile(Coord::new(2, 3, 1)).is_ok());
    assert_eq!(
        map.get_tile(Coord::new(3, 0, 0)),
        Err(MapError::OutOfRange { coord: Coord::new(3, 0, 0), width: 3, height: 4, depth: 2 })
    );
    assert!(map.get_tile(Coord::new(0, 4, 0)).is_err());
    assert!(map.get_tile(Coord::new(0, 0, 2)).is_err());
    assert!(!map.is_walkable(Coord::new(0, 0, 2)));
}

#[test]
fn from_fn_lays_out_tiles_by_coordinate() {
    let map = Map::from_fn(4, 3, 2, |c| Tile::with_speed((1 + c.x + 10 * c.y + 100 * c.z) as f32)).unwrap();

    for z in 0..2 {
        for y in 0..3 {
            for x in 0..4 {
                let expected = (1 + x + 10 * y + 100 * z) as f32;
                assert_eq!(map.get_tile(Coord::new(x, y, z)).unwrap().speed_modifier, expected);
            }
        }
    }
}

#[test]
fn set_tile_changes_walkability() {
    let mut map = Map::filled(2, 2, 1, Tile::open()).unwrap();
    let c = Coord::new(1, 0, 0);

    assert!(map.is_walkable(c));
    map.set_tile(c, Tile::blocked()).unwrap();
    assert!(!map.is_walkable(c));
    assert!(map.set_tile(Coord::new(2, 0, 0), Tile::blocked()).is_err());
}

#[test]
fn teleporters_register_at_both_endpoints() {
    let mut map = Map::filled(4, 4, 2, Tile::open()).unwrap();
    let a = Coord::new(0, 0, 0);
    let b = Coord::new(3, 3, 1);
    let c = Coord::new(2, 0, 0);

    let ab = Teleporter::new(a, b, 1.0).unwrap();
    let ac = Teleporter::new(a, c, 2.0).unwrap();
    map.add_teleporter(ab);
    map.add_teleporter(ac);

    assert_eq!(map.teleporters_at(a).copied().collect::<Vec<_>>(), vec![ab, ac]);
    assert_eq!(map.teleporters_at(b).copied().collect::<Vec<_>>(), vec![ab]);
    assert_eq!(map.teleporters_at(c).copied().collect::<Vec<_>>(), vec![ac]);
    assert_eq!(map.teleporters_at(Coord::new(1, 1, 1)).count(), 0);
    assert_eq!(map.teleporters(), &[ab, ac]);
}

#[test]
fn duplicate_teleporters_are_kept() {
    let mut map = Map::filled(4, 1, 1, Tile::open()).unwrap();
    let t = Teleporter::new(Coord::new(0, 0, 0), Coord::new(3, 0, 0), 1.0).unwrap();

    map.add_teleporter(t);
    map.add_teleporter(t);

    assert_eq!(map.teleporters().len(), 2);
    assert_eq!(map.teleporters_at(Coord::new(0, 0, 0)).count(), 2);
    assert_eq!(map.teleporters_at(Coord::new(3, 0, 0)).count(), 2);
}

#[test]
fn self_loop_registers_once() {
    let mut map = Map::filled(2, 1, 1, Tile::open()).unwrap();
    let c = Coord::new(1, 0, 0);

    map.add_teleporter(Teleporter::new(c, c, 0.0).unwrap());
    assert_eq!(map.teleporters_at(c).count(), 1);
}
