//! Ranking of schools by weighted registered/vacancy percentage.

use std::cmp::Ordering;

use itertools::Itertools;

use crate::config::PhaseWeights;
use crate::school::SchoolRecord;

/// Derived ranking values for one school.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchoolRank {
    pub weighted_percentage: f64,
    /// 1 is the highest weighted percentage.
    pub rank: u32,
}

/// Row of the ranked view written by `rank`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RankedSchool {
    pub name: String,
    #[serde(rename = "weighted_Percentage")]
    pub weighted_percentage: f64,
    #[serde(rename = "Rank")]
    pub rank: u32,
}

// Descending, NaN after every number, NaNs equal to each other.
fn descending_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Rank every school, returning one entry per input school in input order.
///
/// Ties share the minimum rank of their group, so two schools tied for the
/// top both get 1 and the next value gets 3. Schools without complete vacancy
/// data rank after all others.
pub fn rank_schools(schools: &[SchoolRecord], weights: &PhaseWeights) -> Vec<SchoolRank> {
    let weighted: Vec<f64> = schools
        .iter()
        .map(|s| s.weighted_percentage(weights))
        .collect();

    let order = (0..weighted.len())
        .sorted_by(|&a, &b| descending_nan_last(weighted[a], weighted[b]))
        .collect::<Vec<_>>();

    let mut ranks = vec![0u32; weighted.len()];
    for (pos, &idx) in order.iter().enumerate() {
        let rank = match pos.checked_sub(1).map(|p| order[p]) {
            Some(prev) if descending_nan_last(weighted[prev], weighted[idx]) == Ordering::Equal => {
                ranks[prev]
            }
            _ => pos as u32 + 1,
        };
        ranks[idx] = rank;
    }

    weighted
        .into_iter()
        .zip(ranks)
        .map(|(weighted_percentage, rank)| SchoolRank {
            weighted_percentage,
            rank,
        })
        .collect()
}

/// The `{name, weighted_Percentage, Rank}` projection sorted by rank; tied
/// schools keep their input order.
pub fn ranked_view(schools: &[SchoolRecord], weights: &PhaseWeights) -> Vec<RankedSchool> {
    let missing = schools.iter().filter(|s| !s.has_vacancy_data()).count();
    if missing > 0 {
        log::warn!("{} of {} schools lack vacancy data and rank last", missing, schools.len());
    }

    schools
        .iter()
        .zip(rank_schools(schools, weights))
        .map(|(school, r)| RankedSchool {
            name: school.name.clone(),
            weighted_percentage: r.weighted_percentage,
            rank: r.rank,
        })
        .sorted_by_key(|r| r.rank)
        .collect()
}
