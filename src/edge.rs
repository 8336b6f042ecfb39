use crate::geometry::{Bounds, LineSegment, Point};

/// Handle to an edge owned by `Edges`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct EdgeId(usize);

/// Voronoi edge being traced out by a breakpoint of the beachline.
///
/// Open until the breakpoint disappears or the sweep ends, then finished
/// exactly once.
#[derive(Clone, Copy, Debug, PartialEq)]
struct HalfEdge {
    start: Point,
    end: Option<Point>,

    /// The mirror half started at the same point when an arc was split.
    twin: Option<EdgeId>,

    /// Started infinitely far behind the sweepline. The start point is only
    /// a placeholder until the far boundary is known.
    rooted_at_boundary: bool
}

/// Every edge created during the sweep.
#[derive(Debug, Default)]
pub(crate) struct Edges {
    half_edges: Vec<HalfEdge>,

    /// Box around every known edge start and end.
    bounds: Bounds
}

impl Edges {
    pub(crate) fn new() -> Edges {
        Edges::default()
    }

    fn push(&mut self, start: Point, twin: Option<EdgeId>, rooted_at_boundary: bool) -> EdgeId {
        let id = EdgeId(self.half_edges.len());
        self.half_edges.push(HalfEdge { start, end: None, twin, rooted_at_boundary });
        id
    }

    /// Start an edge at a Voronoi vertex.
    pub(crate) fn open(&mut self, start: Point) -> EdgeId {
        self.bounds.include(start);
        self.push(start, None, false)
    }

    /// Start the two halves of an edge growing in opposite directions from
    /// the point where an arc was split.
    pub(crate) fn open_twins(&mut self, start: Point) -> (EdgeId, EdgeId) {
        self.bounds.include(start);

        let lower = EdgeId(self.half_edges.len());
        let upper = EdgeId(self.half_edges.len() + 1);
        self.push(start, Some(upper), false);
        self.push(start, Some(lower), false);

        (lower, upper)
    }

    /// Start the horizontal bisector between two sites sharing the same `x`.
    ///
    /// Such an edge comes in from infinitely far behind the sweepline at
    /// height `y`.
    pub(crate) fn open_from_boundary(&mut self, y: f64) -> EdgeId {
        self.push(Point { x: 0f64, y }, None, true)
    }

    /// Finish the edge at `end`. Finishing an edge twice keeps the first end.
    ///
    /// Returns whether the edge was still open.
    pub(crate) fn finish(&mut self, id: EdgeId, end: Point) -> bool {
        let edge = &mut self.half_edges[id.0];

        if edge.end.is_some() {
            return false;
        }

        edge.end = Some(end);
        self.bounds.include(end);
        true
    }

    pub(crate) fn is_finished(&self, id: EdgeId) -> bool {
        self.half_edges[id.0].end.is_some()
    }

    pub(crate) fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Move the start of every boundary rooted edge to the given `x`.
    pub(crate) fn reroot_boundary_edges(&mut self, x: f64) {
        for edge in self.half_edges.iter_mut().filter(|edge| edge.rooted_at_boundary) {
            edge.start.x = x;
        }
    }

    /// The finished edges as segments, with twin halves joined together.
    ///
    /// Edges that are still open are left out.
    pub(crate) fn into_segments(self) -> Vec<LineSegment> {
        let half_edges = &self.half_edges;

        half_edges.iter().enumerate().filter_map(|(ix, edge)| {
            match (edge.twin, edge.end) {
                (Some(EdgeId(twin)), _) if twin < ix => None,
                (Some(EdgeId(twin)), Some(end)) => {
                    match half_edges[twin].end {
                        Some(twin_end) => Some(LineSegment { from: end, to: twin_end }),
                        None => Some(LineSegment { from: edge.start, to: end })
                    }
                },
                (Some(EdgeId(twin)), None) => {
                    half_edges[twin].end.map(|twin_end| LineSegment { from: edge.start, to: twin_end })
                },
                (None, Some(end)) => Some(LineSegment { from: edge.start, to: end }),
                (None, None) => None
            }
        }).collect()
    }
}
