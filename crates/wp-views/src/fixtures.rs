//! Small population tables shared by the unit tests

use wp_data::{PopulationFrames, PopulationRecord, PopulationTable};

pub fn records() -> Vec<PopulationRecord> {
    let rows: [(&str, Option<&str>, i64, f64); 17] = [
        ("Afghanistan", Some("AFG"), 2000, 19_542_982.0),
        ("Afghanistan", Some("AFG"), 2020, 38_972_230.0),
        ("Brazil", Some("BRA"), 2000, 175_873_720.0),
        ("Brazil", Some("BRA"), 2019, 211_049_519.0),
        ("Brazil", Some("BRA"), 2020, 212_559_409.0),
        ("China", Some("CHN"), 2000, 1_262_645_000.0),
        ("China", Some("CHN"), 2020, 1_411_100_000.0),
        ("India", Some("IND"), 2000, 1_056_575_549.0),
        ("India", Some("IND"), 2020, 1_380_004_385.0),
        ("Indonesia", Some("IDN"), 2020, 273_523_621.0),
        ("Pakistan", Some("PAK"), 2020, 220_892_331.0),
        ("United States", Some("USA"), 2000, 282_162_411.0),
        ("United States", Some("USA"), 2020, 331_501_080.0),
        ("World", Some("WLD"), 2000, 6_148_898_975.0),
        ("World", Some("WLD"), 2020, 7_794_798_729.0),
        ("Sub-Saharan Africa (excluding high income)", Some("SSA1"), 2020, 1_136_000_000.0),
        ("Not classified", None, 2020, 0.0),
    ];

    rows.iter()
        .map(|(country, iso, year, population)| PopulationRecord::new(country, *iso, *year, *population))
        .collect()
}

pub fn frames() -> PopulationFrames {
    let table = PopulationTable::from_records(records()).unwrap();
    PopulationFrames::prepare(table).unwrap()
}
