/// A closed range of scalars, used for ray distances and color channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Distances strictly in front of a ray origin, up to and including `max`.
    ///
    /// An infinite `max` leaves the far end unbounded.
    pub fn ahead(max: f32) -> Self {
        Self::new(0.0, max)
    }

    /// Returns true if x is within (min, max]: past the start, not beyond the end.
    pub fn reaches(&self, x: f32) -> bool {
        self.min < x && x <= self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// The unit interval [0, 1], the legal range of a color channel.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };
}
