use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wp_data::metrics::{headline_metrics, latest_country_population};
use wp_data::{compare_years, CsvSource, LoadedDataset};

fn write_csv(path: &Path, rows: &[&str]) {
    let mut out = String::from("Country Name,Country Code,Year,Value\n");
    for row in rows {
        out.push_str(row);
        out.push('\n');
    }
    fs::write(path, out).unwrap();
}

#[tokio::test]
async fn loads_and_prepares_frames() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("population.csv");
    write_csv(
        &path,
        &[
            "Brazil,BRA,1960,72179226",
            "Brazil,BRA,2020,212559409",
            "World,WLD,1960,3032160395",
            "World,WLD,2020,7794798729",
            "Euro area,EMU,2020,342000000",
            "Latin America & Caribbean (excluding high income),LAC1,2020,600000000",
            "Tuvalu,TUV,2020,11792",
        ],
    );

    let source = CsvSource::new(path);
    let dataset = LoadedDataset::load(&source).await.unwrap();
    assert_eq!(dataset.source_name, "population.csv");

    let frames = &dataset.frames;
    assert_eq!(frames.all().num_rows(), 7);
    assert_eq!(frames.countries_only().num_rows(), 6);
    assert_eq!(frames.countries_no_world().num_rows(), 4);

    let metrics = headline_metrics(frames.countries_only()).unwrap();
    assert_eq!(metrics.earliest_year, 1960);
    assert_eq!(metrics.latest_year, 2020);
    assert_eq!(metrics.least_populous_country.as_deref(), Some("Tuvalu"));

    let brazil = latest_country_population(frames.countries_only(), "Brazil");
    assert_eq!(brazil.population(), Some(212_559_409.0));

    let comparison = compare_years(frames.countries_only(), 1960, 2020).unwrap().unwrap();
    let countries: Vec<_> = comparison.rows.iter().map(|r| r.country.as_str()).collect();
    assert_eq!(countries, vec!["Brazil", "World"]);
}

#[tokio::test]
async fn missing_file_fails_the_load() {
    let dir = TempDir::new().unwrap();
    let source = CsvSource::new(dir.path().join("absent.csv"));
    assert!(LoadedDataset::load(&source).await.is_err());
}

#[tokio::test]
async fn missing_column_fails_the_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.csv");
    fs::write(&path, "Country Name,Year,Value\nBrazil,2020,1\n").unwrap();

    let err = LoadedDataset::load(&CsvSource::new(path)).await.unwrap_err();
    assert!(err.to_string().contains("Country Code"));
}
