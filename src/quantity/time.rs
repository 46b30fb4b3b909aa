use std::fmt::{Debug, Display, Formatter};

use chrono::TimeDelta;

use crate::quantity::Quantity;

pub type Hours = Quantity<f64, 0, 1, 0>;

impl Hours {
    /// One-second resolution is enough for wall-clock tariff boundaries.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_delta(delta: TimeDelta) -> Self {
        Self(delta.num_seconds() as f64 / 3600.0)
    }
}

impl Display for Hours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} h", self.0)
    }
}

impl Debug for Hours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}h", self.0)
    }
}
