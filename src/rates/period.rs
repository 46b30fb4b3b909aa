use crate::{core::window::ClockSpan, quantity::rate::KilowattHourRate, rates::tier::Tier};

/// One row of a rate plan: a tier active during a wall-clock span at a
/// fixed rate. Loaded once per run and immutable thereafter.
#[derive(Copy, Clone, Debug)]
pub struct RatePeriod {
    pub tier: Tier,
    pub span: ClockSpan,
    pub rate: KilowattHourRate,
}

impl RatePeriod {
    /// Display label, for example `"11:00 PM - 06:00 AM"`.
    #[must_use]
    pub fn label(&self) -> String {
        self.span.to_string()
    }
}
