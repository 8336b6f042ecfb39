use thiserror::Error;

use crate::geometry::Point;

/// Why `construct` refused a set of sites or a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConstructError {
    /// Two sites share both coordinates. Use `dedup_sites` first.
    #[error("site {0} was given more than once")]
    DuplicateSite(Point),

    /// The site at `index` has a NaN or infinite coordinate.
    #[error("site #{index} has a coordinate that is NaN or infinite")]
    NonFiniteCoordinate { index: usize },

    /// `FortuneConfig::boundary_margin` is negative, NaN or infinite.
    #[error("boundary margin {0} is not a finite, non-negative distance")]
    InvalidBoundaryMargin(f64)
}
