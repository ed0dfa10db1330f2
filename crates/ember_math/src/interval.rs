/// A range of ray parameters or coordinates along one axis.
///
/// Surfaces receive the live `[t_min, t_max]` window of a ray query as an
/// `Interval`; accepting a hit means `surrounds(t)`, and a list narrows the
/// window with `up_to` as closer hits come in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Contains nothing. Identity for `surrounding`.
    pub const EMPTY: Interval = Interval {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Every parameter from `t_min` onward, the window of a fresh ray query.
    pub const fn from_t_min(t_min: f32) -> Self {
        Self::new(t_min, f32::INFINITY)
    }

    /// Same start, window closed at `max`.
    pub fn up_to(&self, max: f32) -> Interval {
        Interval::new(self.min, max)
    }

    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// True when the interval has no positive width.
    pub fn is_empty(&self) -> bool {
        self.max <= self.min
    }

    /// Closed test, `min <= x <= max`.
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Open test, `min < x < max`. Used to accept hit distances.
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Where `x` falls between `min` (0) and `max` (1).
    pub fn fraction(&self, x: f32) -> f32 {
        (x - self.min) / self.size()
    }

    /// Overlap of two intervals.
    pub fn intersect(&self, other: &Interval) -> Interval {
        Interval::new(self.min.max(other.min), self.max.min(other.max))
    }

    /// Smallest interval covering both.
    pub fn surrounding(a: &Interval, b: &Interval) -> Interval {
        Interval::new(a.min.min(b.min), a.max.max(b.max))
    }

    /// Grow by `delta / 2` on each side.
    pub fn expand(&self, delta: f32) -> Interval {
        let padding = delta / 2.0;
        Interval::new(self.min - padding, self.max + padding)
    }

    /// Grow symmetrically until at least `min_size` wide.
    pub fn pad_to(&self, min_size: f32) -> Interval {
        if self.size() < min_size {
            self.expand(min_size)
        } else {
            *self
        }
    }

    /// Move both ends by `offset`.
    pub fn shifted(&self, offset: f32) -> Interval {
        Interval::new(self.min + offset, self.max + offset)
    }
}
