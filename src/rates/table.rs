use std::{collections::BTreeMap, io, path::Path};

use serde::Deserialize;

use crate::{
    core::window::ClockSpan,
    prelude::*,
    quantity::rate::KilowattHourRate,
    rates::{period::RatePeriod, tier::Tier},
};

/// The `Day Type` wildcard: these periods apply on top of any exact
/// day-type match.
pub const ALL_DAY_TYPES: &str = "All";

/// One record of the rate table CSV, verbatim.
#[derive(Debug, Deserialize)]
pub struct RateRow {
    #[serde(rename = "LSE Name")]
    pub lse_name: String,

    #[serde(rename = "Plan Name")]
    pub plan_name: String,

    #[serde(rename = "Season")]
    pub season: String,

    #[serde(rename = "Day Type")]
    pub day_type: String,

    #[serde(rename = "TOU Name")]
    pub tou_name: String,

    #[serde(rename = "Start Time")]
    pub start_time: String,

    #[serde(rename = "Stop Time")]
    pub stop_time: String,

    #[serde(rename = "Rate")]
    pub rate: String,
}

type DayTypes = BTreeMap<String, Vec<RatePeriod>>;
type Seasons = BTreeMap<String, DayTypes>;

/// Read-only rate plan index: `"{LSE Name} {Plan Name}"` → season →
/// day type → periods.
///
/// Validation happens entirely here, on load: a malformed time or rate, a
/// negative rate, or a degenerate period fails construction and no
/// computation proceeds on the table.
#[must_use]
pub struct RatePlans(BTreeMap<String, Seasons>);

impl RatePlans {
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let reader = csv::Reader::from_path(path)
            .with_context(|| format!("failed to open the rate table at `{}`", path.display()))?;
        Self::from_csv(reader)
    }

    pub fn from_csv<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let rows = reader
            .deserialize()
            .collect::<Result<Vec<RateRow>, _>>()
            .context("failed to read the rate table")?;
        Self::from_rows(rows)
    }

    pub fn from_rows(rows: Vec<RateRow>) -> Result<Self> {
        let mut plans: BTreeMap<String, Seasons> = BTreeMap::new();
        for row in rows {
            let period = RatePeriod {
                tier: Tier::from(row.tou_name.as_str()),
                span: ClockSpan::parse(&row.start_time, &row.stop_time).with_context(|| {
                    format!("invalid period in plan `{} {}`", row.lse_name, row.plan_name)
                })?,
                rate: KilowattHourRate::parse_dollars(&row.rate).with_context(|| {
                    format!("invalid rate in plan `{} {}`", row.lse_name, row.plan_name)
                })?,
            };
            plans
                .entry(format!("{} {}", row.lse_name, row.plan_name))
                .or_default()
                .entry(row.season)
                .or_default()
                .entry(row.day_type)
                .or_default()
                .push(period);
        }
        Ok(Self(plans))
    }

    pub fn plan_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// All periods active for the given selection: the exact day-type list
    /// unioned with the `"All"` wildcard list.
    pub fn periods(&self, plan_name: &str, season: &str, day_type: &str) -> Result<Vec<&RatePeriod>> {
        let day_types = self
            .0
            .get(plan_name)
            .and_then(|seasons| seasons.get(season));
        // Asking for `All` directly must not pick the wildcard list up twice.
        let keys: &[&str] = if day_type == ALL_DAY_TYPES {
            &[ALL_DAY_TYPES]
        } else {
            &[day_type, ALL_DAY_TYPES]
        };
        let periods: Vec<&RatePeriod> = keys
            .iter()
            .filter_map(|key| day_types.and_then(|day_types| day_types.get(*key)))
            .flatten()
            .collect();
        ensure!(
            !periods.is_empty(),
            "no rate periods for plan `{plan_name}`, season `{season}`, day type `{day_type}`",
        );
        Ok(periods)
    }

    /// Every `(plan, season, day type, period)` row, in index order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &str, &str, &RatePeriod)> {
        self.0.iter().flat_map(|(plan, seasons)| {
            seasons.iter().flat_map(move |(season, day_types)| {
                day_types.iter().flat_map(move |(day_type, periods)| {
                    periods.iter().map(move |period| {
                        (plan.as_str(), season.as_str(), day_type.as_str(), period)
                    })
                })
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
LSE Name,Plan Name,Season,Day Type,TOU Name,Start Time,Stop Time,Rate
Acme,EV-TOU,Summer,Weekdays,Super Off-Peak,12:00 AM,06:00 AM,$0.08
Acme,EV-TOU,Summer,Weekdays,Peak,04:00 PM,09:00 PM,$0.45
Acme,EV-TOU,Summer,All,Off-Peak,09:00 PM,04:00 PM,$0.20
";

    fn table() -> Result<RatePlans> {
        RatePlans::from_csv(csv::Reader::from_reader(CSV.as_bytes()))
    }

    #[test]
    fn test_lookup_unions_wildcard() -> Result {
        let plans = table()?;
        let periods = plans.periods("Acme EV-TOU", "Summer", "Weekdays")?;
        assert_eq!(periods.len(), 3);
        Ok(())
    }

    /// A day type with no exact match still picks up the wildcard periods.
    #[test]
    fn test_lookup_wildcard_only() -> Result {
        let plans = table()?;
        let periods = plans.periods("Acme EV-TOU", "Summer", "Weekends")?;
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].tier, Tier::OffPeak);
        Ok(())
    }

    #[test]
    fn test_lookup_empty_selection_fails() -> Result {
        let plans = table()?;
        assert!(plans.periods("Acme EV-TOU", "Winter", "Weekdays").is_err());
        assert!(plans.periods("Nowhere Power", "Summer", "Weekdays").is_err());
        Ok(())
    }

    #[test]
    fn test_degenerate_period_rejected() {
        let csv = "\
LSE Name,Plan Name,Season,Day Type,TOU Name,Start Time,Stop Time,Rate
Acme,EV-TOU,Summer,Weekdays,Peak,04:00 PM,04:00 PM,$0.45
";
        assert!(RatePlans::from_csv(csv::Reader::from_reader(csv.as_bytes())).is_err());
    }

    #[test]
    fn test_malformed_rate_rejected() {
        let csv = "\
LSE Name,Plan Name,Season,Day Type,TOU Name,Start Time,Stop Time,Rate
Acme,EV-TOU,Summer,Weekdays,Peak,04:00 PM,09:00 PM,twenty cents
";
        assert!(RatePlans::from_csv(csv::Reader::from_reader(csv.as_bytes())).is_err());
    }

    #[test]
    fn test_plan_names_sorted() -> Result {
        let csv = "\
LSE Name,Plan Name,Season,Day Type,TOU Name,Start Time,Stop Time,Rate
Zeta,Plan-B,Summer,All,Off-Peak,09:00 PM,04:00 PM,$0.20
Acme,Plan-A,Summer,All,Off-Peak,09:00 PM,04:00 PM,$0.20
";
        let plans = RatePlans::from_csv(csv::Reader::from_reader(csv.as_bytes()))?;
        let names: Vec<_> = plans.plan_names().collect();
        assert_eq!(names, ["Acme Plan-A", "Zeta Plan-B"]);
        Ok(())
    }
}
