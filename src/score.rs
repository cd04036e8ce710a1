//! Proximity scoring of houses against the school table.

use geo::Point;
use itertools::Itertools;
use nalgebra::DVector;
use rayon::prelude::*;

use crate::config::ScoringParams;
use crate::distance::distances_km;
use crate::error::ScoreError;
use crate::school::{school_points, SchoolRecord};

/// A school within the catchment radius of a house.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbySchool {
    /// Position in the school table.
    pub index: usize,
    pub distance_km: f64,
    pub location_points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HouseScore {
    pub school_score: f64,
    /// Schools within the catchment radius, not capped at `top_k`.
    pub school_count: usize,
}

/// Schools prepared for scoring: coordinates as column vectors and the
/// per-school points, computed once and shared read-only by every house.
#[derive(Debug, Clone)]
pub struct SchoolTable {
    latitudes: DVector<f64>,
    longitudes: DVector<f64>,
    rankings: Vec<u32>,
    points: Vec<i64>,
    params: ScoringParams,
}

impl SchoolTable {
    /// Fails with [`ScoreError::InvalidConfig`] when `params` does not validate.
    pub fn new(schools: &[SchoolRecord], params: ScoringParams) -> Result<Self, ScoreError> {
        params.validate()?;
        let n = schools.len();
        Ok(Self {
            latitudes: DVector::from_iterator(n, schools.iter().map(|s| s.latitude)),
            longitudes: DVector::from_iterator(n, schools.iter().map(|s| s.longitude)),
            rankings: schools.iter().map(|s| s.ranking).collect(),
            points: schools.iter().map(|s| school_points(s.ranking, n)).collect(),
            params,
        })
    }

    pub fn len(&self) -> usize {
        self.rankings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rankings.is_empty()
    }

    pub fn school_points(&self) -> &[i64] {
        &self.points
    }

    /// Distance in km from `house` to every school, in table order.
    pub fn distances(&self, house: Point<f64>) -> DVector<f64> {
        distances_km(
            house,
            &self.latitudes,
            &self.longitudes,
            self.params.earth_radius_km,
        )
    }

    /// Schools within the catchment radius of `house`, in table order.
    pub fn nearby(&self, house: Point<f64>) -> Vec<NearbySchool> {
        let p = &self.params;
        self.distances(house)
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d <= p.catchment_km)
            .map(|(index, &distance_km)| NearbySchool {
                index,
                distance_km,
                location_points: if distance_km <= p.near_km {
                    p.near_points
                } else {
                    p.far_points
                },
            })
            .collect()
    }

    pub fn score_house(&self, house: Point<f64>) -> HouseScore {
        let nearby = self.nearby(house);
        if nearby.is_empty() {
            return HouseScore::default();
        }

        // Stable sort: equal rankings keep table order.
        let (school_total, location_total) = nearby
            .iter()
            .sorted_by_key(|s| self.rankings[s.index])
            .take(self.params.top_k)
            .fold((0i64, 0u64), |(sp, lp), s| {
                (sp + self.points[s.index], lp + u64::from(s.location_points))
            });

        HouseScore {
            school_score: self.params.school_weight * school_total as f64
                + self.params.location_weight * location_total as f64,
            school_count: nearby.len(),
        }
    }

    /// Score every house independently, returning results in input order.
    pub fn score_houses(&self, houses: &[Point<f64>]) -> Vec<HouseScore> {
        let scores: Vec<HouseScore> = houses.par_iter().map(|&h| self.score_house(h)).collect();

        let isolated = scores.iter().filter(|s| s.school_count == 0).count();
        log::debug!(
            "scored {} houses against {} schools, {} with no school within {} km",
            houses.len(),
            self.len(),
            isolated,
            self.params.catchment_km
        );
        scores
    }
}

/// Compute school points once and score every house against them.
pub fn score_houses(
    schools: &[SchoolRecord],
    houses: &[Point<f64>],
    params: ScoringParams,
) -> Result<Vec<HouseScore>, ScoreError> {
    Ok(SchoolTable::new(schools, params)?.score_houses(houses))
}
