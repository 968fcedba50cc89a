use crate::Coord;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum MapError {
    #[error("coordinate {coord} is outside the {width}x{height}x{depth} map")]
    OutOfRange { coord: Coord, width: u32, height: u32, depth: u32 },

    #[error("invalid map dimensions {width}x{height}x{depth} for {tiles} tiles")]
    InvalidDimensions { width: u32, height: u32, depth: u32, tiles: usize },

    /// Speed modifiers divide move costs, so they have to be positive and finite.
    #[error("tile at {coord} has invalid speed modifier {modifier}")]
    InvalidSpeedModifier { coord: Coord, modifier: f32 },

    #[error("teleporter cost must be a non-negative number, got {0}")]
    InvalidTeleporterCost(f32),

    #[error("move cost must be a non-negative number, got {0}")]
    InvalidMoveCost(f32),
}
