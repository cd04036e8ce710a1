//! Scores houses by the primary schools around them.
//!
//! Schools are ranked by a weighted registered/vacancy percentage, and each
//! house is scored from the best externally ranked schools within a 2 km
//! catchment: 70% from the schools' inverse-rank points, 30% from how close
//! they are.
//!
//! ```
//! use geo::Point;
//! use school_proximity::{score_houses, SchoolRecord, ScoringParams};
//!
//! let schools = vec![SchoolRecord {
//!     name: "St Mary's".to_owned(),
//!     latitude: 53.48,
//!     longitude: -2.24,
//!     ranking: 1,
//!     phase1: Some(95.0),
//!     phase2b: Some(80.0),
//!     phase2c: None,
//! }];
//! let houses = [Point::new(-2.241, 53.481)];
//!
//! let scores = score_houses(&schools, &houses, ScoringParams::default()).unwrap();
//! assert_eq!(scores[0].school_count, 1);
//! ```

pub mod config;
pub mod distance;
pub mod error;
pub mod rank;
pub mod school;
pub mod score;
pub mod table;

pub use config::{PhaseWeights, ScoringParams};
pub use distance::{distances_km, haversine_km};
pub use error::ScoreError;
pub use rank::{rank_schools, ranked_view, RankedSchool, SchoolRank};
pub use school::SchoolRecord;
pub use score::{score_houses, HouseScore, NearbySchool, SchoolTable};
