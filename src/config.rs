/// Which circumcircles found while checking for circle events end up in the
/// `Diagram`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CircleRetention {
    /// Every circle accepted by the circumcircle test.
    All,
    /// Only circles without any site strictly inside of them.
    Empty
}

impl Default for CircleRetention {
    fn default() -> CircleRetention {
        CircleRetention::Empty
    }
}

/// Knobs for `construct_with_config`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FortuneConfig {
    pub circle_retention: CircleRetention,

    /// Extra distance put between the sites and the far boundary that
    /// unbounded edges get cut off at. Must be finite and non-negative.
    pub boundary_margin: f64
}

impl FortuneConfig {
    pub fn circle_retention(mut self, circle_retention: CircleRetention) -> FortuneConfig {
        self.circle_retention = circle_retention;
        self
    }

    pub fn boundary_margin(mut self, boundary_margin: f64) -> FortuneConfig {
        self.boundary_margin = boundary_margin;
        self
    }
}

impl Default for FortuneConfig {
    fn default() -> FortuneConfig {
        FortuneConfig {
            circle_retention: CircleRetention::default(),
            boundary_margin: 10f64
        }
    }
}
