//! Parabolas of the beachline.
//!
//! Every arc is a piece of the parabola whose focus is the arc's site and
//! whose directrix is the sweepline `x = directrix`. The sweepline moves
//! towards positive `x`, so every parabola opens towards negative `x`.

use std::f64::NEG_INFINITY;

use crate::geometry::{nearly_equal, Point};

/// A parabola described as a focus and a directrix.
///
/// The parabola is the set of points where the distance to the focus and
/// the distance to the directrix are the same.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusDirectrixParabola {
    pub focus: Point,
    /// x = directrix
    pub directrix: f64
}

impl FocusDirectrixParabola {
    pub fn new(focus: Point, directrix: f64) -> FocusDirectrixParabola {
        FocusDirectrixParabola { focus, directrix }
    }

    /// Whether the focus lies on the directrix, in which case the parabola
    /// is a ray going off towards negative `x`.
    pub fn is_degenerate(&self) -> bool {
        self.focus.x == self.directrix
    }

    /// The point of the parabola at the given height.
    pub fn point_at_y(&self, y: f64) -> Point {
        // (x - fx)^2 + (y - fy)^2 = (x - d)^2
        // x^2 - 2*x*fx + fx^2 + (y - fy)^2 = x^2 - 2*x*d + d^2
        // x * (2*fx - 2*d) = fx^2 + (y - fy)^2 - d^2
        let Point { x: fx, y: fy } = self.focus;
        let d = self.directrix;

        if self.is_degenerate() {
            return Point { x: NEG_INFINITY, y };
        }

        Point {
            x: (fx * fx + (fy - y).powi(2) - d * d) / (2f64 * fx - 2f64 * d),
            y
        }
    }
}

/// Where the parabolas of `lower` and `upper` meet with the given directrix.
///
/// `lower` is the focus of the arc directly below the breakpoint and `upper`
/// the one directly above it. Swapping them gives the other intersection.
pub fn intersection(lower: Point, upper: Point, directrix: f64) -> Point {
    let mut on = lower;

    let y = if nearly_equal(lower.x, upper.x) {
        // Same distance to the sweepline means the breakpoint travels along
        // the horizontal bisector.
        (lower.y + upper.y) / 2f64
    } else if upper.x == directrix {
        upper.y
    } else if lower.x == directrix {
        on = upper;
        lower.y
    } else {
        // Equate both parabolas solved for `x` and find the root in `y`.
        let z0 = 2f64 * (lower.x - directrix);
        let z1 = 2f64 * (upper.x - directrix);

        let a = 1f64 / z0 - 1f64 / z1;
        let b = -2f64 * (lower.y / z0 - upper.y / z1);
        let c = (lower.y.powi(2) + lower.x.powi(2) - directrix.powi(2)) / z0
            - (upper.y.powi(2) + upper.x.powi(2) - directrix.powi(2)) / z1;

        // Rounding can push a tangent intersection slightly negative.
        let discriminant = (b * b - 4f64 * a * c).max(0f64);

        (-b - discriminant.sqrt()) / (2f64 * a)
    };

    FocusDirectrixParabola::new(on, directrix).point_at_y(y)
}
