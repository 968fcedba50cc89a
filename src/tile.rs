#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub walkable: bool,

    // Move costs into this tile are divided by this value
    pub speed_modifier: f32,
}

impl Default for Tile {
    fn default() -> Self {
        Tile::open()
    }
}

impl Tile {
    #[inline(always)]
    pub const fn open() -> Tile {
        Tile { walkable: true, speed_modifier: 1.0 }
    }

    #[inline(always)]
    pub const fn blocked() -> Tile {
        Tile { walkable: false, speed_modifier: 1.0 }
    }

    #[inline(always)]
    pub const fn with_speed(speed_modifier: f32) -> Tile {
        Tile { walkable: true, speed_modifier }
    }

    pub fn has_valid_speed(&self) -> bool {
        self.speed_modifier.is_finite() && self.speed_modifier > 0.0
    }

    /// Scales a base move cost by this tile's speed modifier.
    #[inline]
    pub fn scale_cost(&self, base: f32) -> f32 {
        base / self.speed_modifier
    }
}

#[test]
fn faster_tiles_are_cheaper() {
    assert_eq!(Tile::with_speed(2.0).scale_cost(1.0), 0.5);
    assert_eq!(Tile::with_speed(0.5).scale_cost(1.0), 2.0);
    assert_eq!(Tile::open().scale_cost(std::f32::consts::SQRT_2), std::f32::consts::SQRT_2);
}

#[test]
fn speed_must_be_positive_and_finite() {
    assert!(Tile::open().has_valid_speed());
    assert!(!Tile::with_speed(0.0).has_valid_speed());
    assert!(!Tile::with_speed(-1.0).has_valid_speed());
    assert!(!Tile::with_speed(f32::NAN).has_valid_speed());
    assert!(!Tile::with_speed(f32::INFINITY).has_valid_speed());
}
