//! Voronoi diagrams of points in the plane via Fortune's Algorithm.
//!
//!    function Fortune (siteList)
//!       // the sweepline moves towards positive x, the beachline is ordered by y
//!       siteQueue := every site, ordered by (x, y)
//!       circleQueue := empty
//!       while siteQueue is not empty do
//!          if the next circle event is not after the next site
//!             RemoveParabola(arc of the circle event)
//!          else
//!             AddParabola(next site)
//!       while circleQueue is not empty do
//!          RemoveParabola(arc of the next circle event)
//!       finish every open edge far away from the sites
//!
//!    function AddParabola (point u)
//!       par := arc above u
//!       replace par by the sequence a, xl, b, xr, c where b.site = u
//!       CheckCircleEvent(a), CheckCircleEvent(b), CheckCircleEvent(c)
//!
//!    function RemoveParabola (arc p)
//!       s := the circumcenter of l.site, p.site and r.site
//!       finish the edges xl and xr at s
//!       replace xl, p, xr by a new edge starting at s
//!       CheckCircleEvent(l), CheckCircleEvent(r)
//!
//! Besides the edges, the circumcircles found while checking for circle
//! events are kept. The largest of the empty ones is the largest circle that
//! can be placed among the sites without containing any of them.

#[macro_use]
extern crate log;

mod beachline;
mod config;
mod diagram;
mod edge;
mod error;
mod event;
mod fortune;
mod geometry;
mod parabola;

use std::collections::HashSet;

pub use ordered_float::{FloatIsNan, NotNan};

pub use crate::config::{CircleRetention, FortuneConfig};
pub use crate::diagram::Diagram;
pub use crate::error::ConstructError;
pub use crate::geometry::{Bounds, Circle, LineSegment, Point, Triangle, TriangleOrientation};
pub use crate::parabola::{intersection, FocusDirectrixParabola};

use crate::fortune::Sweep;
use crate::geometry::PointKey;

/// Returns the sites with every repeated coordinate pair removed, keeping
/// the first occurrence.
///
/// Sites with a NaN coordinate are kept as they are for `construct` to
/// reject.
pub fn dedup_sites(sites: Vec<Point>) -> Vec<Point> {
    let mut scanned = HashSet::new();

    sites.into_iter().filter(|&site| {
        match PointKey::new(site) {
            Ok(key) => scanned.insert(key),
            Err(_) => true
        }
    }).collect()
}

/// Compute the Voronoi diagram of distinct sites.
///
/// https://en.wikipedia.org/wiki/Voronoi_diagram
/// https://en.wikipedia.org/wiki/Fortune%27s_algorithm
pub fn construct(sites: &[Point]) -> Result<Diagram, ConstructError> {
    construct_with_config(sites, &FortuneConfig::default())
}

/// Compute the Voronoi diagram of distinct sites, choosing which circles are
/// kept and how far out unbounded edges are cut off.
pub fn construct_with_config(sites: &[Point], config: &FortuneConfig) -> Result<Diagram, ConstructError> {
    if !(config.boundary_margin.is_finite() && config.boundary_margin >= 0f64) {
        return Err(ConstructError::InvalidBoundaryMargin(config.boundary_margin));
    }

    let mut keys = HashSet::with_capacity(sites.len());

    for (index, &site) in sites.iter().enumerate() {
        let key = PointKey::finite(site).ok_or(ConstructError::NonFiniteCoordinate { index })?;

        if !keys.insert(key) {
            return Err(ConstructError::DuplicateSite(site));
        }
    }

    Ok(Sweep::new(keys.into_iter().collect(), config).run())
}
