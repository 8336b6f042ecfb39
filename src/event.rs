use std::cmp::Reverse;
use std::collections::binary_heap::BinaryHeap;
use std::f64::INFINITY;

use ordered_float::NotNan;

use crate::beachline::ArcId;
use crate::geometry::{Point, PointKey};

/// Sites the sweepline has not reached yet.
///
/// Built once from every site. Sites are popped ordered by `x` and then `y`.
#[derive(Debug)]
pub(crate) struct SiteQueue(BinaryHeap<Reverse<PointKey>>);

impl SiteQueue {
    pub(crate) fn new<I>(sites: I) -> SiteQueue where I: IntoIterator<Item=PointKey> {
        SiteQueue(sites.into_iter().map(Reverse).collect())
    }

    pub(crate) fn pop(&mut self) -> Option<Point> {
        self.0.pop().map(|Reverse(key)| key.point())
    }

    /// Sweep location of the next site, or positive infinity.
    pub(crate) fn peek_min_x(&self) -> f64 {
        match self.0.peek() {
            Some(&Reverse(ref key)) => key.x(),
            None => INFINITY
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Handle to a circle event, valid for the lifetime of its `CircleQueue`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct EventId(usize);

/// The sweep location at which an arc shrinks down to a point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct CircleEvent {
    /// Sweep location of the right side of the circle.
    pub(crate) x: f64,

    /// The center of the circle, and the Voronoi vertex the arc collapses at.
    pub(crate) vertex: Point,

    /// The arc that disappears.
    pub(crate) arc: ArcId,

    /// Cleared when the arc's neighborhood changes before the event fires.
    pub(crate) valid: bool
}

/// Event Queue for circle events that allows removing events.
///
/// Removing only flips the event's `valid` flag. Stale entries stay in the
/// heap and get discarded once they reach its top.
#[derive(Debug, Default)]
pub(crate) struct CircleQueue {
    events: Vec<CircleEvent>,
    queue: BinaryHeap<Reverse<(NotNan<f64>, EventId)>>
}

impl CircleQueue {
    pub(crate) fn new() -> CircleQueue {
        CircleQueue::default()
    }

    /// Queue a new circle event. Returns `None` if `x` is NaN.
    pub(crate) fn push(&mut self, x: f64, vertex: Point, arc: ArcId) -> Option<EventId> {
        let key = NotNan::new(x).ok()?;
        let id = EventId(self.events.len());

        self.events.push(CircleEvent { x, vertex, arc, valid: true });
        self.queue.push(Reverse((key, id)));

        Some(id)
    }

    pub(crate) fn invalidate(&mut self, id: EventId) {
        if let Some(event) = self.events.get_mut(id.0) {
            event.valid = false;
        }
    }

    #[cfg(test)]
    pub(crate) fn is_valid(&self, id: EventId) -> bool {
        self.events.get(id.0).map_or(false, |event| event.valid)
    }

    /// Sweep location of the next valid event, or positive infinity.
    pub(crate) fn peek_min_x(&mut self) -> f64 {
        self.discard_invalid();

        match self.queue.peek() {
            Some(&Reverse((x, _))) => x.into_inner(),
            None => INFINITY
        }
    }

    /// Pop events until a valid one is found.
    ///
    /// The returned event is consumed, so it no longer counts as valid.
    pub(crate) fn pop_next_valid(&mut self) -> Option<CircleEvent> {
        self.discard_invalid();

        let Reverse((_, id)) = self.queue.pop()?;
        let event = self.events[id.0];
        self.events[id.0].valid = false;

        Some(event)
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&mut self) -> bool {
        self.discard_invalid();
        self.queue.is_empty()
    }

    fn discard_invalid(&mut self) {
        while let Some(&Reverse((_, id))) = self.queue.peek() {
            if self.events[id.0].valid {
                break;
            }

            trace!("Discarding stale circle event {:?}.", self.events[id.0]);
            self.queue.pop();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn key(x: f64, y: f64) -> PointKey {
        PointKey::new(Point::new(x, y)).unwrap()
    }

    #[test]
    fn sites_pop_in_sweep_order() {
        let mut sites = SiteQueue::new(vec![key(5.0, 1.0), key(0.0, 9.0), key(5.0, -1.0)]);

        assert_eq!(sites.peek_min_x(), 0.0);
        assert_eq!(sites.pop(), Some(Point::new(0.0, 9.0)));
        assert_eq!(sites.pop(), Some(Point::new(5.0, -1.0)));
        assert_eq!(sites.pop(), Some(Point::new(5.0, 1.0)));
        assert_eq!(sites.pop(), None);
        assert_eq!(sites.peek_min_x(), INFINITY);
        assert!(sites.is_empty());
    }

    #[test]
    fn circle_events_pop_in_sweep_order() {
        let mut events = CircleQueue::new();
        events.push(3.0, Point::new(1.0, 1.0), ArcId(0));
        events.push(1.0, Point::new(0.0, 0.0), ArcId(1));

        assert_eq!(events.peek_min_x(), 1.0);
        assert_eq!(events.pop_next_valid().map(|event| event.arc), Some(ArcId(1)));
        assert_eq!(events.pop_next_valid().map(|event| event.arc), Some(ArcId(0)));
        assert_eq!(events.pop_next_valid(), None);
        assert_eq!(events.peek_min_x(), INFINITY);
    }

    #[test]
    fn invalidated_events_are_skipped() {
        let mut events = CircleQueue::new();
        let stale = events.push(1.0, Point::new(0.0, 0.0), ArcId(0)).unwrap();
        let live = events.push(2.0, Point::new(0.0, 0.0), ArcId(1)).unwrap();

        events.invalidate(stale);

        assert!(!events.is_valid(stale));
        assert!(events.is_valid(live));
        assert_eq!(events.peek_min_x(), 2.0);
        assert_eq!(events.pop_next_valid().map(|event| event.arc), Some(ArcId(1)));
        assert!(!events.is_valid(live));
        assert!(events.is_empty());
    }

    #[test]
    fn nan_events_are_not_queued() {
        let mut events = CircleQueue::new();

        assert_eq!(events.push(std::f64::NAN, Point::new(0.0, 0.0), ArcId(0)), None);
        assert!(events.is_empty());
    }
}
