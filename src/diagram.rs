use std::fmt;

use ordered_float::OrderedFloat;

use crate::geometry::{Circle, LineSegment, Point};

/// The output of Fortune's Algorithm.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Diagram {
    /// Every Voronoi edge. Unbounded edges are cut off far away from the sites.
    pub edges: Vec<LineSegment>,

    /// Circumcircles found along the way, filtered by the `CircleRetention`.
    pub circles: Vec<Circle>,

    /// Points where three or more Voronoi cells meet.
    pub vertices: Vec<Point>
}

impl Diagram {
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty() && self.circles.is_empty() && self.vertices.is_empty()
    }

    /// The circle with the largest radius.
    ///
    /// With `CircleRetention::Empty` this is the largest circle centered on a
    /// Voronoi vertex with no site inside.
    pub fn largest_circle(&self) -> Option<&Circle> {
        self.circles.iter().max_by_key(|circle| OrderedFloat(circle.radius))
    }
}

impl fmt::Display for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Diagram{{\n    {}\n}}\nCircles{{\n    {}\n}}",
            itertools::join(&self.edges, ",\n    "),
            itertools::join(&self.circles, ",\n    ")
        )
    }
}
