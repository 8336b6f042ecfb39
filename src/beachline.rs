//! The beachline of Fortune's Algorithm.
//!
//! The sweepline moves towards positive `x`. The beachline is the envelope of
//! the parabolas of every site the sweepline has passed, read from the lowest
//! `y` to the highest. Each piece of it is an `Arc`, and between every two
//! neighboring arcs sits a breakpoint tracing out a Voronoi edge.
//!
//! Arcs live in an arena and point to their neighbors by `ArcId`. Removed arcs
//! are only unlinked, so ids handed out stay meaningful for the whole sweep.

use crate::edge::{EdgeId, Edges};
use crate::event::{CircleQueue, EventId};
use crate::geometry::{Circle, Point, Triangle};
use crate::parabola::{intersection, FocusDirectrixParabola};

/// Relative distance behind the sweepline a circle event may be due at and
/// still fire.
const SWEEP_TOLERANCE: f64 = 1e-9;

/// Handle to an arc of a `Beachline`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct ArcId(pub(crate) usize);

/// An arc on the beachline.
///
/// A parabola with the specified focus and a directrix of the sweepline.
/// Since the sweepline moves as the algorithm runs, this represents an entire
/// class of parabolas, though only one parabola at any point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Arc {
    /// The site whose parabola this arc is a piece of.
    focus: Point,

    /// The arc below this one.
    prev: Option<ArcId>,
    /// The arc above this one.
    next: Option<ArcId>,

    /// Edge traced by the breakpoint with `prev`.
    left_edge: Option<EdgeId>,
    /// Edge traced by the breakpoint with `next`.
    right_edge: Option<EdgeId>,

    /// The pending event that would remove this arc.
    circle_event: Option<EventId>
}

impl Arc {
    fn new(focus: Point) -> Arc {
        Arc {
            focus,
            prev: None,
            next: None,
            left_edge: None,
            right_edge: None,
            circle_event: None
        }
    }
}

/// What a change to the beachline produced, for the sweep to record.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Changes {
    /// Circumcircles accepted while rechecking circle events.
    pub(crate) circles: Vec<Circle>,

    /// The Voronoi vertex the change happened at, if any.
    pub(crate) vertex: Option<Point>
}

impl Changes {
    fn at_vertex(vertex: Point) -> Changes {
        Changes { circles: vec![], vertex: Some(vertex) }
    }
}

#[derive(Debug, Default)]
pub(crate) struct Beachline {
    arcs: Vec<Arc>,
    head: Option<ArcId>
}

impl Beachline {
    pub(crate) fn new() -> Beachline {
        Beachline::default()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// The arcs from the lowest to the highest.
    pub(crate) fn iter(&self) -> Arcs<'_> {
        Arcs { beachline: self, cursor: self.head }
    }

    pub(crate) fn focus(&self, arc: ArcId) -> Point {
        self.arcs[arc.0].focus
    }

    fn push(&mut self, arc: Arc) -> ArcId {
        self.arcs.push(arc);
        ArcId(self.arcs.len() - 1)
    }

    /// Whether `arc` lies directly over `site` when the sweepline is at
    /// `sweep_x`.
    ///
    /// Returns the point of the arc level with the site, where the new arc
    /// will break into the beachline. Bounds are inclusive, so a site right on
    /// a breakpoint is over both of the arcs meeting there.
    pub(crate) fn is_above(&self, site: Point, arc: ArcId, sweep_x: f64) -> Option<Point> {
        let current = &self.arcs[arc.0];
        let parabola = FocusDirectrixParabola::new(current.focus, sweep_x);

        if parabola.is_degenerate() {
            return None;
        }

        if let Some(prev) = current.prev {
            if intersection(self.focus(prev), current.focus, sweep_x).y > site.y {
                return None;
            }
        }

        if let Some(next) = current.next {
            if site.y > intersection(current.focus, self.focus(next), sweep_x).y {
                return None;
            }
        }

        Some(parabola.point_at_y(site.y))
    }

    /// Add the arc of a site the sweepline just reached.
    pub(crate) fn insert(&mut self, site: Point, edges: &mut Edges, queue: &mut CircleQueue) -> Changes {
        let sweep_x = site.x;

        let mut cursor = match self.head {
            Some(head) => Some(head),
            None => {
                let first = self.push(Arc::new(site));
                self.head = Some(first);
                return Changes::default();
            }
        };

        while let Some(arc) = cursor {
            if let Some(breakpoint) = self.is_above(site, arc, sweep_x) {
                let next = self.arcs[arc.0].next;
                return match next {
                    Some(next) if self.is_above(site, next, sweep_x).is_some() => {
                        self.insert_at_breakpoint(site, arc, next, breakpoint, edges, queue)
                    },
                    _ => self.split(site, arc, breakpoint, edges, queue)
                };
            }

            cursor = self.arcs[arc.0].next;
        }

        // Every arc so far has its focus on the sweepline.
        self.append(site, edges);
        Changes::default()
    }

    /// Replace `arc` with itself, the new site's arc, and a copy of itself.
    fn split(&mut self, site: Point, arc: ArcId, breakpoint: Point, edges: &mut Edges, queue: &mut CircleQueue) -> Changes {
        let Arc { focus, next, right_edge, .. } = self.arcs[arc.0];
        let (lower, upper) = edges.open_twins(breakpoint);

        let middle = ArcId(self.arcs.len());
        let copy = ArcId(self.arcs.len() + 1);

        self.push(Arc {
            prev: Some(arc),
            next: Some(copy),
            left_edge: Some(lower),
            right_edge: Some(upper),
            ..Arc::new(site)
        });
        self.push(Arc {
            prev: Some(middle),
            next,
            left_edge: Some(upper),
            right_edge,
            ..Arc::new(focus)
        });

        if let Some(next) = next {
            self.arcs[next.0].prev = Some(copy);
        }

        self.arcs[arc.0].next = Some(middle);
        self.arcs[arc.0].right_edge = Some(lower);

        trace!("Split arc of {} at {} for {}.", focus, breakpoint, site);

        Changes {
            circles: self.check_circle_events(&[middle, arc, copy], site.x, queue),
            vertex: None
        }
    }

    /// Put the new site's arc between two arcs whose breakpoint it is on.
    ///
    /// The edge between them ends there, making the point a Voronoi vertex.
    fn insert_at_breakpoint(&mut self, site: Point, below: ArcId, above: ArcId, vertex: Point, edges: &mut Edges, queue: &mut CircleQueue) -> Changes {
        if let Some(edge) = self.arcs[below.0].right_edge {
            edges.finish(edge, vertex);
        }

        let lower = edges.open(vertex);
        let upper = edges.open(vertex);

        let middle = self.push(Arc {
            prev: Some(below),
            next: Some(above),
            left_edge: Some(lower),
            right_edge: Some(upper),
            ..Arc::new(site)
        });

        self.arcs[below.0].next = Some(middle);
        self.arcs[below.0].right_edge = Some(lower);
        self.arcs[above.0].prev = Some(middle);
        self.arcs[above.0].left_edge = Some(upper);

        trace!("Site {} landed on a breakpoint at {}.", site, vertex);

        Changes {
            circles: self.check_circle_events(&[middle, below, above], site.x, queue),
            vertex: Some(vertex)
        }
    }

    /// Add the site's arc above every other arc.
    ///
    /// Only happens while every arc has its focus on the sweepline. The edge
    /// between the two topmost arcs is their horizontal bisector, coming in
    /// from behind the sweepline.
    fn append(&mut self, site: Point, edges: &mut Edges) {
        let tail = match self.iter().last() {
            Some(tail) => tail,
            None => return
        };

        let edge = edges.open_from_boundary((self.focus(tail).y + site.y) / 2f64);
        let arc = self.push(Arc {
            prev: Some(tail),
            left_edge: Some(edge),
            ..Arc::new(site)
        });

        self.arcs[tail.0].next = Some(arc);
        self.arcs[tail.0].right_edge = Some(edge);

        trace!("Appended arc of {} to the beachline.", site);
    }

    /// Take `arc` out of the beachline because it shrank to `vertex`.
    pub(crate) fn remove(&mut self, arc: ArcId, vertex: Point, sweep_x: f64, edges: &mut Edges, queue: &mut CircleQueue) -> Changes {
        let Arc { focus, prev, next, left_edge, right_edge, .. } = self.arcs[arc.0];
        self.arcs[arc.0] = Arc::new(focus);

        for &edge in [left_edge, right_edge].iter().flatten() {
            edges.finish(edge, vertex);
        }

        match prev {
            Some(prev) => self.arcs[prev.0].next = next,
            None => self.head = next
        };

        if let Some(next) = next {
            self.arcs[next.0].prev = prev;
        }

        let mut changes = Changes::at_vertex(vertex);

        match (prev, next) {
            (Some(prev), Some(next)) => {
                let edge = edges.open(vertex);
                self.arcs[prev.0].right_edge = Some(edge);
                self.arcs[next.0].left_edge = Some(edge);

                changes.circles = self.check_circle_events(&[prev, next], sweep_x, queue);
            },
            (Some(prev), None) => self.arcs[prev.0].right_edge = None,
            (None, Some(next)) => self.arcs[next.0].left_edge = None,
            (None, None) => {}
        };

        changes
    }

    fn check_circle_events(&mut self, arcs: &[ArcId], sweep_x: f64, queue: &mut CircleQueue) -> Vec<Circle> {
        arcs.iter().filter_map(|&arc| self.check_circle_event(arc, sweep_x, queue)).collect()
    }

    /// Replace the pending circle event of `arc` with one for its current
    /// neighbors, if they make it shrink.
    ///
    /// Events due at the sweepline itself are queued too, within a relative
    /// tolerance. Returns the circumcircle whenever the neighbors' sites make
    /// a clockwise turn, even if the circle is already behind the sweepline.
    pub(crate) fn check_circle_event(&mut self, arc: ArcId, sweep_x: f64, queue: &mut CircleQueue) -> Option<Circle> {
        if let Some(event) = self.arcs[arc.0].circle_event.take() {
            queue.invalidate(event);
        }

        let (prev, next) = match self.arcs[arc.0] {
            Arc { prev: Some(prev), next: Some(next), .. } => (prev, next),
            _ => return None
        };

        let (left, right) = (self.focus(prev), self.focus(next));
        if left == right {
            return None;
        }

        let circle = Triangle(left, self.focus(arc), right).converging_circle()?;

        // Four or more sites on one circle give the next triple the same
        // circle, due right at the sweepline.
        if circle.rightmost_x() >= sweep_x - SWEEP_TOLERANCE * sweep_x.abs().max(1f64) {
            self.arcs[arc.0].circle_event = queue.push(circle.rightmost_x(), circle.center, arc);
        }

        Some(circle)
    }

    /// Finish every edge still being traced, at the breakpoints the beachline
    /// has when the sweepline is at `directrix`.
    pub(crate) fn finish(&self, directrix: f64, edges: &mut Edges) {
        for arc in self.iter() {
            let Arc { focus, next, right_edge, .. } = self.arcs[arc.0];

            match (right_edge, next) {
                (Some(edge), Some(next)) if !edges.is_finished(edge) => {
                    edges.finish(edge, intersection(focus, self.focus(next), directrix));
                },
                _ => {}
            }
        }
    }
}

/// Iterator over the arcs of a beachline from the lowest to the highest.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Arcs<'b> {
    beachline: &'b Beachline,
    cursor: Option<ArcId>
}

impl<'b> Iterator for Arcs<'b> {
    type Item = ArcId;

    fn next(&mut self) -> Option<ArcId> {
        let current = self.cursor?;
        self.cursor = self.beachline.arcs[current.0].next;
        Some(current)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn foci(beachline: &Beachline) -> Vec<Point> {
        beachline.iter().map(|arc| beachline.focus(arc)).collect()
    }

    fn build(sites: &[Point]) -> (Beachline, Edges, CircleQueue) {
        let mut beachline = Beachline::new();
        let mut edges = Edges::new();
        let mut queue = CircleQueue::new();

        for &site in sites {
            beachline.insert(site, &mut edges, &mut queue);
        }

        (beachline, edges, queue)
    }

    #[test]
    fn first_site_is_the_only_arc() {
        let (beachline, edges, _) = build(&[p(0.0, 0.0)]);

        assert!(!beachline.is_empty());
        assert_eq!(foci(&beachline), vec![p(0.0, 0.0)]);
        assert!(edges.into_segments().is_empty());
    }

    #[test]
    fn second_site_splits_the_first_arc() {
        let (beachline, _, mut queue) = build(&[p(0.0, 0.0), p(10.0, 0.0)]);

        assert_eq!(foci(&beachline), vec![p(0.0, 0.0), p(10.0, 0.0), p(0.0, 0.0)]);
        assert_eq!(queue.pop_next_valid(), None);
    }

    #[test]
    fn site_on_the_sweepline_is_never_below_an_arc() {
        let (beachline, _, _) = build(&[p(0.0, 0.0)]);
        let head = beachline.iter().next().unwrap();

        assert_eq!(beachline.is_above(p(0.0, 5.0), head, 0.0), None);
        assert!(beachline.is_above(p(3.0, 5.0), head, 3.0).is_some());
    }

    #[test]
    fn vertically_aligned_sites_are_appended() {
        let (beachline, mut edges, _) = build(&[p(0.0, 0.0), p(0.0, 10.0), p(0.0, 20.0)]);

        assert_eq!(foci(&beachline), vec![p(0.0, 0.0), p(0.0, 10.0), p(0.0, 20.0)]);

        beachline.finish(100.0, &mut edges);
        edges.reroot_boundary_edges(-100.0);

        let segments = edges.into_segments();
        assert_eq!(segments.len(), 2);
        assert!(segments.iter().all(|segment| segment.from.x == -100.0 && segment.dy() == 0.0));
    }

    #[test]
    fn site_on_a_breakpoint_is_a_vertex() {
        let mut beachline = Beachline::new();
        let mut edges = Edges::new();
        let mut queue = CircleQueue::new();

        beachline.insert(p(0.0, 0.0), &mut edges, &mut queue);
        beachline.insert(p(0.0, 10.0), &mut edges, &mut queue);
        let changes = beachline.insert(p(5.0, 5.0), &mut edges, &mut queue);

        assert_eq!(foci(&beachline), vec![p(0.0, 0.0), p(5.0, 5.0), p(0.0, 10.0)]);

        let vertex = changes.vertex.unwrap();
        assert!(vertex.distance(p(0.0, 5.0)) < 1e-9);
    }

    #[test]
    fn circle_event_for_shrinking_arc() {
        let (beachline, _, mut queue) = build(&[p(0.0, 0.0), p(5.0, 10.0), p(10.0, 0.0)]);

        assert_eq!(
            foci(&beachline),
            vec![p(0.0, 0.0), p(10.0, 0.0), p(0.0, 0.0), p(5.0, 10.0), p(0.0, 0.0)]
        );

        let event = queue.pop_next_valid().unwrap();
        assert!((event.x - 11.25).abs() < 1e-9);
        assert!(event.vertex.distance(p(5.0, 3.75)) < 1e-9);
        assert_eq!(beachline.focus(event.arc), p(0.0, 0.0));
        assert_eq!(queue.pop_next_valid(), None);
    }

    #[test]
    fn removing_an_arc_joins_its_neighbors() {
        let (mut beachline, mut edges, mut queue) = build(&[p(0.0, 0.0), p(5.0, 10.0), p(10.0, 0.0)]);
        let event = queue.pop_next_valid().unwrap();

        let changes = beachline.remove(event.arc, event.vertex, event.x, &mut edges, &mut queue);

        assert_eq!(changes.vertex, Some(event.vertex));
        assert!(changes.circles.is_empty());
        assert_eq!(foci(&beachline), vec![p(0.0, 0.0), p(10.0, 0.0), p(5.0, 10.0), p(0.0, 0.0)]);
        assert!(queue.is_empty());
    }

    #[test]
    fn cocircular_sites_queue_the_second_event() {
        // Square corners: removing the first arc leaves a triple on the same
        // circle, due exactly where the sweepline already is.
        let (mut beachline, mut edges, mut queue) = build(&[p(0.0, 0.0), p(0.0, 10.0), p(10.0, 0.0), p(10.0, 10.0)]);

        let first = queue.pop_next_valid().unwrap();
        beachline.remove(first.arc, first.vertex, first.x, &mut edges, &mut queue);

        let second = queue.pop_next_valid().unwrap();
        assert!((second.x - first.x).abs() < 1e-9);
        assert!(second.vertex.distance(p(5.0, 5.0)) < 1e-9);

        beachline.remove(second.arc, second.vertex, second.x, &mut edges, &mut queue);
        assert_eq!(foci(&beachline), vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)]);
        assert!(queue.is_empty());
    }

    #[test]
    fn rechecking_invalidates_the_pending_event() {
        let (mut beachline, _, mut queue) = build(&[p(0.0, 0.0), p(5.0, 10.0), p(10.0, 0.0)]);
        let shrinking = beachline.iter().nth(2).unwrap();

        let circle = beachline.check_circle_event(shrinking, 10.0, &mut queue);

        assert!(circle.is_some());
        assert!(queue.pop_next_valid().is_some());
        assert_eq!(queue.pop_next_valid(), None);
    }
}
