use std::io::Write;

use geo::Point;
use proptest::prelude::*;
use school_proximity::{
    ranked_view,
    table::{load_houses, load_schools, write_ranked, write_scored_houses},
    SchoolRecord, SchoolTable, ScoringParams,
};
use tempfile::NamedTempFile;

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write csv");
    file
}

const SCHOOLS: &str = "\
name,latitude,longitude,Ranking 2022,1_Registered_Vacancy_Percentage,2B_Registered_Vacancy_Percentage,2C_Registered_Vacancy_Percentage
Alpha,0.0,0.0,1,50,50,50
Beta,0.0,0.01,2,100,100,100
Gamma,40.0,40.0,3,,20,20
";

#[test]
fn scores_house_csv_end_to_end() {
    let schools = load_schools(csv_file(SCHOOLS).path()).expect("schools");
    let houses = load_houses(
        csv_file("id,latitude,longitude\nnear,0.0,0.0\nremote,10.0,10.0\n").path(),
    )
    .expect("houses");

    let table = SchoolTable::new(&schools, ScoringParams::default()).expect("valid params");
    assert_eq!(table.school_points(), &[3, 2, 1]);

    let scores = table.score_houses(&houses.positions);
    let mut out = Vec::new();
    write_scored_houses(&mut out, &houses, &scores).expect("write");
    let text = String::from_utf8(out).expect("utf8");

    let mut rdr = csv::Reader::from_reader(text.as_bytes());
    let headers = rdr.headers().expect("headers").clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["id", "latitude", "longitude", "school_score", "school_count"]
    );
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.expect("row")).collect();

    // 0.7 * (3 + 2) + 0.3 * (20 + 10)
    let near: f64 = rows[0][3].parse().expect("score");
    assert!((near - 12.5).abs() < 1e-9, "got {near}");
    assert_eq!(&rows[0][4], "2");
    assert_eq!(&rows[1][3], "0");
    assert_eq!(&rows[1][4], "0");
}

#[test]
fn ranks_school_csv() {
    let schools = load_schools(csv_file(SCHOOLS).path()).expect("schools");
    let mut out = Vec::new();
    write_ranked(&mut out, &ranked_view(&schools, &ScoringParams::default().weights))
        .expect("write");

    let text = String::from_utf8(out).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "name,weighted_Percentage,Rank");
    assert!(lines[1].starts_with("Beta,"));
    assert!(lines[2].starts_with("Alpha,"));
    assert!(lines[3].starts_with("Gamma,NaN,3"));
}

fn arb_school() -> impl Strategy<Value = (f64, f64)> {
    (-0.05f64..0.05, -0.05f64..0.05)
}

proptest! {
    #[test]
    fn zero_score_iff_no_school_nearby(
        positions in prop::collection::vec(arb_school(), 0..12),
        house in arb_school(),
    ) {
        let schools: Vec<SchoolRecord> = positions
            .iter()
            .enumerate()
            .map(|(i, &(lat, lon))| SchoolRecord {
                name: format!("s{i}"),
                latitude: lat,
                longitude: lon,
                ranking: i as u32 + 1,
                phase1: None,
                phase2b: None,
                phase2c: None,
            })
            .collect();
        let table = SchoolTable::new(&schools, ScoringParams::default()).expect("valid params");

        let score = table.score_house(Point::new(house.1, house.0));

        prop_assert_eq!(score.school_count == 0, score.school_score == 0.0);
        prop_assert!(score.school_score >= 0.0);
        prop_assert_eq!(score.school_count, table.nearby(Point::new(house.1, house.0)).len());
    }
}
