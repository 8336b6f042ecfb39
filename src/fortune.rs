//! The sweep of Fortune's Algorithm.
//!
//! https://en.wikipedia.org/wiki/Fortune%27s_algorithm
//!
//! The sweepline starts left of every site and moves towards positive `x`,
//! stopping at every site event and every circle event. When both queues are
//! exhausted, every edge still being traced is unbounded and gets cut off at a
//! boundary far beyond everything the sweep has seen.

use std::collections::HashSet;

use ordered_float::NotNan;

use crate::beachline::{Beachline, Changes};
use crate::config::{CircleRetention, FortuneConfig};
use crate::diagram::Diagram;
use crate::edge::Edges;
use crate::event::{CircleEvent, CircleQueue, SiteQueue};
use crate::geometry::{Bounds, Circle, Point, PointKey};

/// Where the sweep is at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Phase {
    /// Sites are left, interleaved with circle events.
    Running,
    /// Every site is in the beachline. Only circle events are left.
    Draining,
    /// Cutting off the edges that are still open.
    Finalizing,
    Done
}

/// Circumcircles kept for the diagram.
#[derive(Debug)]
struct CircleLog {
    retention: CircleRetention,
    circles: Vec<Circle>,
    seen: HashSet<[NotNan<f64>; 3]>
}

impl CircleLog {
    fn new(retention: CircleRetention) -> CircleLog {
        CircleLog { retention, circles: vec![], seen: HashSet::new() }
    }

    fn record(&mut self, circle: Circle, sites: &[Point]) {
        if self.retention == CircleRetention::Empty && sites.iter().any(|&site| circle.contains_point(site)) {
            return;
        }

        let key = match (NotNan::new(circle.center.x), NotNan::new(circle.center.y), NotNan::new(circle.radius)) {
            (Ok(x), Ok(y), Ok(radius)) => [x, y, radius],
            _ => return
        };

        if self.seen.insert(key) {
            self.circles.push(circle);
        }
    }
}

/// The state of one run of Fortune's Algorithm.
#[derive(Debug)]
pub(crate) struct Sweep {
    phase: Phase,
    boundary_margin: f64,

    sites: Vec<Point>,
    site_queue: SiteQueue,
    circle_queue: CircleQueue,
    beachline: Beachline,

    edges: Edges,
    circles: CircleLog,
    vertices: Vec<Point>,

    /// Box around every site and vertex.
    bounds: Bounds
}

impl Sweep {
    /// Set up a sweep over distinct sites.
    pub(crate) fn new(sites: Vec<PointKey>, config: &FortuneConfig) -> Sweep {
        let points: Vec<Point> = sites.iter().map(PointKey::point).collect();

        let mut bounds = Bounds::empty();
        for &point in &points {
            bounds.include(point);
        }

        Sweep {
            phase: Phase::Running,
            boundary_margin: config.boundary_margin,

            sites: points,
            site_queue: SiteQueue::new(sites),
            circle_queue: CircleQueue::new(),
            beachline: Beachline::new(),

            edges: Edges::new(),
            circles: CircleLog::new(config.circle_retention),
            vertices: vec![],

            bounds
        }
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    /// Handle a single event, or move on to the next phase.
    pub(crate) fn step(&mut self) {
        match self.phase {
            Phase::Running => {
                if self.site_queue.is_empty() {
                    self.enter(Phase::Draining);
                    return;
                }

                // Circle events win ties so no site lands on an arc that has
                // already shrunk away.
                if self.circle_queue.peek_min_x() <= self.site_queue.peek_min_x() {
                    let event = self.circle_queue.pop_next_valid().expect("Circle queue reported a valid event.");
                    self.handle_circle(event);
                } else {
                    let site = self.site_queue.pop().expect("Site queue reported a site.");
                    self.handle_site(site);
                }
            },
            Phase::Draining => {
                match self.circle_queue.pop_next_valid() {
                    Some(event) => self.handle_circle(event),
                    None => self.enter(Phase::Finalizing)
                }
            },
            Phase::Finalizing => {
                self.finalize();
                self.enter(Phase::Done);
            },
            Phase::Done => {}
        }
    }

    /// Run the sweep to completion.
    pub(crate) fn run(mut self) -> Diagram {
        while self.phase() != Phase::Done {
            self.step();
        }

        self.into_diagram()
    }

    fn enter(&mut self, phase: Phase) {
        debug!("Sweep {:?} -> {:?}.", self.phase, phase);
        self.phase = phase;
    }

    fn handle_site(&mut self, site: Point) {
        trace!("Site event at {}.", site);

        let changes = self.beachline.insert(site, &mut self.edges, &mut self.circle_queue);
        self.apply(changes);
    }

    fn handle_circle(&mut self, event: CircleEvent) {
        trace!("Circle event at x = {} collapsing {:?} into {}.", event.x, event.arc, event.vertex);

        let changes = self.beachline.remove(event.arc, event.vertex, event.x, &mut self.edges, &mut self.circle_queue);
        self.apply(changes);
    }

    fn apply(&mut self, changes: Changes) {
        if let Some(vertex) = changes.vertex {
            self.bounds.include(vertex);
            self.vertices.push(vertex);
        }

        for circle in changes.circles {
            self.circles.record(circle, &self.sites);
        }
    }

    /// Cut off every open edge at a directrix far enough out that each
    /// breakpoint is past the last vertex of its edge.
    fn finalize(&mut self) {
        let mut bounds = self.bounds;
        let edge_bounds = self.edges.bounds();
        bounds.include(edge_bounds.min);
        bounds.include(edge_bounds.max);

        if bounds.is_empty() || self.beachline.is_empty() {
            return;
        }

        let reach = 2f64 * (bounds.width() + bounds.height()) + self.boundary_margin;
        let directrix = bounds.max.x + reach;

        debug!("Finishing open edges with the directrix at x = {}.", directrix);

        self.beachline.finish(directrix, &mut self.edges);
        self.edges.reroot_boundary_edges(bounds.min.x - reach);
    }

    fn into_diagram(self) -> Diagram {
        let diagram = Diagram {
            edges: self.edges.into_segments(),
            circles: self.circles.circles,
            vertices: self.vertices
        };

        debug!(
            "Voronoi diagram of {} sites: {} edges, {} vertices, {} circles.",
            self.sites.len(),
            diagram.edges.len(),
            diagram.vertices.len(),
            diagram.circles.len()
        );

        diagram
    }
}
