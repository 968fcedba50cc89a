use crate::error::MapError;

/// Movement rules a [`PathSearch`](crate::PathSearch) is built with.
///
/// Move costs are the base cost of one planar step before the destination tile's speed modifier
/// is applied.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchOptions {
    pub allow_diagonal: bool,
    pub default_move_cost: f32,
    pub diagonal_move_cost: f32,

    /// Upper bound on expanded nodes per search. `None` searches until the frontier is empty.
    pub max_expansions: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            allow_diagonal: true,
            default_move_cost: 1.0,
            diagonal_move_cost: std::f32::consts::SQRT_2,
            max_expansions: None,
        }
    }
}

impl SearchOptions {
    #[must_use]
    pub fn with_diagonal(mut self, allow_diagonal: bool) -> Self {
        self.allow_diagonal = allow_diagonal;
        self
    }

    #[must_use]
    pub fn with_move_costs(mut self, default_move_cost: f32, diagonal_move_cost: f32) -> Self {
        self.default_move_cost = default_move_cost;
        self.diagonal_move_cost = diagonal_move_cost;
        self
    }

    #[must_use]
    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    /// Negative move costs would let the search loop forever on ever-cheaper cycles.
    pub fn validate(&self) -> Result<(), MapError> {
        for cost in [self.default_move_cost, self.diagonal_move_cost] {
            if !(cost >= 0.0) {
                return Err(MapError::InvalidMoveCost(cost));
            }
        }

        Ok(())
    }

    #[inline]
    pub(crate) fn base_cost(&self, diagonal: bool) -> f32 {
        if diagonal {
            self.diagonal_move_cost
        } else {
            self.default_move_cost
        }
    }
}

#[test]
fn builder_overrides_defaults() {
    let opts = SearchOptions::default().with_diagonal(false).with_move_costs(2.0, 3.0).with_max_expansions(10);

    assert!(!opts.allow_diagonal);
    assert_eq!(opts.base_cost(false), 2.0);
    assert_eq!(opts.base_cost(true), 3.0);
    assert_eq!(opts.max_expansions, Some(10));

    assert_eq!(SearchOptions::default().base_cost(true), std::f32::consts::SQRT_2);
}

#[test]
fn rejects_negative_and_nan_move_costs() {
    assert_eq!(SearchOptions::default().validate(), Ok(()));
    assert_eq!(SearchOptions::default().with_move_costs(0.0, 0.0).validate(), Ok(()));

    assert_eq!(SearchOptions::default().with_move_costs(-1.0, 1.5).validate(), Err(MapError::InvalidMoveCost(-1.0)));
    assert_eq!(SearchOptions::default().with_move_costs(1.0, -0.5).validate(), Err(MapError::InvalidMoveCost(-0.5)));
    assert!(SearchOptions::default().with_move_costs(f32::NAN, 1.0).validate().is_err());
}
