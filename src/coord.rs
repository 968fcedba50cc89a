use std::fmt;

use crate::Cost;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl From<(u32, u32, u32)> for Coord {
    #[inline(always)]
    fn from((x, y, z): (u32, u32, u32)) -> Coord {
        Coord::new(x, y, z)
    }
}

impl Coord {
    #[inline(always)]
    pub const fn new(x: u32, y: u32, z: u32) -> Coord {
        Coord { x, y, z }
    }

    /// Moves on the same z-level. Returns `None` if an axis would drop below zero.
    #[inline]
    pub fn offset(&self, dx: i32, dy: i32) -> Option<Coord> {
        Some(Coord { x: self.x.checked_add_signed(dx)?, y: self.y.checked_add_signed(dy)?, z: self.z })
    }

    pub fn manhattan_distance(&self, other: &Coord) -> Cost {
        let d = self.x.abs_diff(other.x) as u64 + self.y.abs_diff(other.y) as u64 + self.z.abs_diff(other.z) as u64;
        Cost::from(d as f32)
    }

    /// True for the eight cells around `self` on its own z-level.
    pub fn is_planar_neighbor(&self, other: &Coord) -> bool {
        self.z == other.z && self.x.abs_diff(other.x) <= 1 && self.y.abs_diff(other.y) <= 1 && self != other
    }

    pub fn is_diagonal_to(&self, other: &Coord) -> bool {
        self.x != other.x && self.y != other.y
    }
}

#[test]
fn offset_stops_at_zero() {
    let c = Coord::new(0, 3, 1);

    assert_eq!(c.offset(-1, 0), None);
    assert_eq!(c.offset(1, -1), Some(Coord::new(1, 2, 1)));
    assert_eq!(c.offset(0, -4), None);
}

#[test]
fn manhattan_distance_counts_all_three_axes() {
    let a = Coord::new(1, 5, 0);
    let b = Coord::new(4, 2, 2);

    assert_eq!(a.manhattan_distance(&b), Cost::from(8.0));
    assert_eq!(b.manhattan_distance(&a), Cost::from(8.0));
    assert_eq!(a.manhattan_distance(&a), Cost::from(0.0));
}

#[test]
fn planar_neighbors_exclude_self_and_other_levels() {
    let c = Coord::new(2, 2, 0);

    assert!(c.is_planar_neighbor(&Coord::new(3, 3, 0)));
    assert!(c.is_planar_neighbor(&Coord::new(2, 1, 0)));
    assert!(!c.is_planar_neighbor(&c));
    assert!(!c.is_planar_neighbor(&Coord::new(2, 2, 1)));
    assert!(!c.is_planar_neighbor(&Coord::new(4, 2, 0)));
}

#[test]
fn formats_as_tuple() {
    assert_eq!(format!("{}", Coord::new(1, 2, 3)), "(1, 2, 3)");
    assert_eq!(format!("{:?}", Coord::from((0, 0, 7))), "(0, 0, 7)");
}
