use crate::{error::MapError, Coord, Cost};

/// A bidirectional edge between two cells. Taking it costs `cost` regardless of how far apart the
/// endpoints are, and it is the only way to change z-level.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Teleporter {
    pub point_a: Coord,
    pub point_b: Coord,
    pub cost: Cost,
}

impl Teleporter {
    pub fn new(point_a: Coord, point_b: Coord, cost: f32) -> Result<Teleporter, MapError> {
        // `!(cost >= 0.0)` also rejects NaN
        if !(cost >= 0.0) {
            return Err(MapError::InvalidTeleporterCost(cost));
        }

        Ok(Teleporter { point_a, point_b, cost: Cost::from(cost) })
    }

    /// Where the teleporter leads when entered from `from`.
    pub fn exit_from(&self, from: Coord) -> Option<Coord> {
        if from == self.point_a {
            Some(self.point_b)
        } else if from == self.point_b {
            Some(self.point_a)
        } else {
            None
        }
    }

    pub fn connects(&self, a: Coord, b: Coord) -> bool {
        self.exit_from(a) == Some(b)
    }
}

#[test]
fn exits_from_either_endpoint() {
    let a = Coord::new(0, 0, 0);
    let b = Coord::new(9, 9, 3);
    let t = Teleporter::new(a, b, 2.5).unwrap();

    assert_eq!(t.exit_from(a), Some(b));
    assert_eq!(t.exit_from(b), Some(a));
    assert_eq!(t.exit_from(Coord::new(1, 0, 0)), None);

    assert!(t.connects(a, b));
    assert!(t.connects(b, a));
    assert!(!t.connects(a, a));
}

#[test]
fn rejects_negative_and_nan_costs() {
    let a = Coord::new(0, 0, 0);

    assert_eq!(Teleporter::new(a, a, -0.5), Err(MapError::InvalidTeleporterCost(-0.5)));
    assert!(Teleporter::new(a, a, f32::NAN).is_err());
    assert!(Teleporter::new(a, a, 0.0).is_ok());
}
