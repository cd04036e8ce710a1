//! CSV loading and writing of the school and house tables.

use std::io::Write;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim, Writer};
use geo::Point;

use crate::error::ScoreError;
use crate::rank::RankedSchool;
use crate::school::SchoolRecord;
use crate::score::HouseScore;

pub const SCHOOL_COLUMNS: [&str; 7] = [
    "name",
    "latitude",
    "longitude",
    "Ranking 2022",
    "1_Registered_Vacancy_Percentage",
    "2B_Registered_Vacancy_Percentage",
    "2C_Registered_Vacancy_Percentage",
];

const LATITUDE: &str = "latitude";
const LONGITUDE: &str = "longitude";

fn open<P: AsRef<Path>>(path: P) -> Result<csv::Reader<std::fs::File>, ScoreError> {
    let path = path.as_ref();
    ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(path)
        .map_err(|source| ScoreError::Csv {
            path: path.to_path_buf(),
            source,
        })
}

fn column(headers: &StringRecord, name: &'static str) -> Result<usize, ScoreError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or(ScoreError::MissingColumn { column: name })
}

pub fn load_schools<P: AsRef<Path>>(path: P) -> Result<Vec<SchoolRecord>, ScoreError> {
    let path = path.as_ref();
    let csv_err = |source| ScoreError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut rdr = open(path)?;
    let headers = rdr.headers().map_err(csv_err)?.clone();
    for name in SCHOOL_COLUMNS {
        column(&headers, name)?;
    }

    let schools = rdr
        .deserialize::<SchoolRecord>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_err)?;
    log::info!("loaded {} schools from {}", schools.len(), path.display());
    Ok(schools)
}

/// House rows kept verbatim so that scoring only appends columns.
#[derive(Debug, Clone)]
pub struct HouseTable {
    pub headers: StringRecord,
    pub rows: Vec<StringRecord>,
    pub positions: Vec<Point<f64>>,
}

impl HouseTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn load_houses<P: AsRef<Path>>(path: P) -> Result<HouseTable, ScoreError> {
    let path = path.as_ref();
    let csv_err = |source| ScoreError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut rdr = open(path)?;
    let headers = rdr.headers().map_err(csv_err)?.clone();
    let lat_idx = column(&headers, LATITUDE)?;
    let lon_idx = column(&headers, LONGITUDE)?;

    let mut rows = Vec::new();
    let mut positions = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result.map_err(csv_err)?;
        let coord = |idx: usize, name: &'static str| {
            let value = record.get(idx).unwrap_or_default();
            value.parse::<f64>().map_err(|_| ScoreError::InvalidNumber {
                row: i + 1,
                column: name,
                value: value.to_owned(),
            })
        };
        let lat = coord(lat_idx, LATITUDE)?;
        let lon = coord(lon_idx, LONGITUDE)?;
        positions.push(Point::new(lon, lat));
        rows.push(record);
    }

    log::info!("loaded {} houses from {}", rows.len(), path.display());
    Ok(HouseTable {
        headers,
        rows,
        positions,
    })
}

pub fn write_ranked<W: Write>(out: W, ranked: &[RankedSchool]) -> Result<(), ScoreError> {
    let mut writer = Writer::from_writer(out);
    for row in ranked {
        writer
            .serialize(row)
            .map_err(|source| ScoreError::Write { source })?;
    }
    writer
        .flush()
        .map_err(|e| ScoreError::Write { source: e.into() })
}

/// Write `houses` with `school_score` and `school_count` appended to every row.
pub fn write_scored_houses<W: Write>(
    out: W,
    houses: &HouseTable,
    scores: &[HouseScore],
) -> Result<(), ScoreError> {
    let write_err = |source| ScoreError::Write { source };
    let mut writer = Writer::from_writer(out);

    let mut headers = houses.headers.clone();
    headers.push_field("school_score");
    headers.push_field("school_count");
    writer.write_record(&headers).map_err(write_err)?;

    for (row, score) in houses.rows.iter().zip(scores) {
        let mut row = row.clone();
        row.push_field(&score.school_score.to_string());
        row.push_field(&score.school_count.to_string());
        writer.write_record(&row).map_err(write_err)?;
    }
    writer
        .flush()
        .map_err(|e| ScoreError::Write { source: e.into() })
}
