use geo::Point;

use crate::config::PhaseWeights;

/// One primary school as it appears in the source table.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SchoolRecord {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// External quality ranking, 1 is best.
    #[serde(rename = "Ranking 2022")]
    pub ranking: u32,
    #[serde(rename = "1_Registered_Vacancy_Percentage")]
    pub phase1: Option<f64>,
    #[serde(rename = "2B_Registered_Vacancy_Percentage")]
    pub phase2b: Option<f64>,
    #[serde(rename = "2C_Registered_Vacancy_Percentage")]
    pub phase2c: Option<f64>,
}

impl SchoolRecord {
    pub fn location(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }

    /// Weighted registered/vacancy percentage across the admission phases.
    /// A missing phase makes the whole value NaN.
    pub fn weighted_percentage(&self, weights: &PhaseWeights) -> f64 {
        let pct = |v: Option<f64>| v.unwrap_or(f64::NAN);
        pct(self.phase1) * weights.phase1
            + pct(self.phase2b) * weights.phase2b
            + pct(self.phase2c) * weights.phase2c
    }

    pub fn has_vacancy_data(&self) -> bool {
        self.phase1.is_some() && self.phase2b.is_some() && self.phase2c.is_some()
    }
}

/// Inverse-rank point value: the best ranking earns `n` points, ranking `n` earns 1.
pub fn school_points(ranking: u32, school_count: usize) -> i64 {
    school_count as i64 - i64::from(ranking) + 1
}

#[cfg(test)]
pub(crate) fn school(name: &str, latitude: f64, longitude: f64, ranking: u32) -> SchoolRecord {
    SchoolRecord {
        name: name.to_owned(),
        latitude,
        longitude,
        ranking,
        phase1: Some(0.0),
        phase2b: Some(0.0),
        phase2c: Some(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn weights_each_phase_once() {
        let record = SchoolRecord {
            phase1: Some(100.0),
            phase2b: Some(50.0),
            phase2c: Some(10.0),
            ..school("A", 0.0, 0.0, 1)
        };
        let w = record.weighted_percentage(&PhaseWeights::default());
        assert!((w - 51.0).abs() < 1e-12);
    }

    #[test]
    fn missing_phase_is_nan() {
        let record = SchoolRecord {
            phase2c: None,
            ..school("A", 0.0, 0.0, 1)
        };
        assert!(record
            .weighted_percentage(&PhaseWeights::default())
            .is_nan());
        assert!(!record.has_vacancy_data());
    }

    #[test]
    fn location_is_lon_lat() {
        let p = school("A", 51.5, -0.12, 1).location();
        assert_eq!(p.x(), -0.12);
        assert_eq!(p.y(), 51.5);
    }

    proptest! {
        #[test]
        fn points_plus_ranking_is_n_plus_one(n in 1usize..10_000, seed in 0usize..10_000) {
            let ranking = (seed % n) as u32 + 1;
            prop_assert_eq!(school_points(ranking, n) + i64::from(ranking), n as i64 + 1);
        }
    }
}
