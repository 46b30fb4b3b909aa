use std::{collections::BTreeMap, fs, path::Path};

use serde::Deserialize;

use crate::{
    core::window::ChargingWindow,
    prelude::*,
    quantity::{Quantity, energy::KilowattHours, power::Kilowatts},
};

/// Household assumptions, read once from a JSON file.
#[derive(Deserialize)]
pub struct Assumptions {
    pub average_commute_distance_miles: f64,
    pub super_commute_distance_miles: f64,
    pub kwh_per_mile: f64,
    pub charger_kw_level_1: Kilowatts,
    pub charger_kw_level_2: Kilowatts,
    pub driver_profiles: BTreeMap<String, DriverProfile>,
}

#[derive(Deserialize)]
pub struct DriverProfile {
    #[serde(rename = "Charging Hours Start")]
    pub charging_hours_start: String,

    #[serde(rename = "Charging Hours End")]
    pub charging_hours_end: String,
}

impl DriverProfile {
    pub fn window(&self) -> Result<ChargingWindow> {
        ChargingWindow::parse(&self.charging_hours_start, &self.charging_hours_end)
            .context("invalid charging hours")
    }
}

impl Assumptions {
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read the assumptions at `{}`", path.display()))?;
        serde_json::from_str(&contents).context("failed to parse the assumptions")
    }

    pub const fn commutes(&self) -> [Commute; 2] {
        [
            Commute { name: "average_commute", distance_miles: self.average_commute_distance_miles },
            Commute { name: "super_commute", distance_miles: self.super_commute_distance_miles },
        ]
    }

    /// Daily charging need for a round trip of the given one-way distance.
    #[must_use]
    pub fn daily_energy(&self, commute: &Commute) -> KilowattHours {
        Quantity(commute.distance_miles * self.kwh_per_mile * 2.0)
    }
}

/// One commute scenario to estimate costs for.
pub struct Commute {
    pub name: &'static str,
    pub distance_miles: f64,
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    const JSON: &str = r#"{
        "average_commute_distance_miles": 15.0,
        "super_commute_distance_miles": 50.0,
        "kwh_per_mile": 0.3,
        "charger_kw_level_1": 1.4,
        "charger_kw_level_2": 7.2,
        "driver_profiles": {
            "Night owl": {
                "Charging Hours Start": "11:00 PM",
                "Charging Hours End": "07:00 AM"
            }
        }
    }"#;

    #[test]
    fn test_parse() -> Result {
        let assumptions: Assumptions = serde_json::from_str(JSON)?;
        assert_abs_diff_eq!(assumptions.charger_kw_level_2.0, 7.2);
        let window = assumptions.driver_profiles["Night owl"].window()?;
        assert!(window.is_wrapping());
        Ok(())
    }

    #[test]
    fn test_daily_energy_is_round_trip() -> Result {
        let assumptions: Assumptions = serde_json::from_str(JSON)?;
        let [average, _] = assumptions.commutes();
        assert_abs_diff_eq!(assumptions.daily_energy(&average).0, 15.0 * 0.3 * 2.0);
        Ok(())
    }
}
