use std::fmt::{Display, Formatter};

/// Time-of-use pricing tier.
///
/// The declaration order is the allocation priority: cheapest tier first,
/// and anything unrecognized deterministically last. The derived [`Ord`] is
/// the single source of truth for the greedy sort.
#[derive(Copy, Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Tier {
    SuperOffPeak,
    OffPeak,
    Peak,
    Unknown,
}

impl From<&str> for Tier {
    fn from(name: &str) -> Self {
        match name.trim() {
            "Super Off-Peak" => Self::SuperOffPeak,
            "Off-Peak" => Self::OffPeak,
            "Peak" => Self::Peak,
            _ => Self::Unknown,
        }
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SuperOffPeak => write!(f, "Super Off-Peak"),
            Self::OffPeak => write!(f, "Off-Peak"),
            Self::Peak => write!(f, "Peak"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}
