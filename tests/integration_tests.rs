use anyhow::Result;
use guitar_analyzer::config::toml_config::TomlConfig;
use guitar_analyzer::core::ConfigProvider;
use guitar_analyzer::utils::validation::Validate;
use guitar_analyzer::{
    build_engine, AnalysisEngine, AnalysisPlan, CsvListingSource, CsvOptions, FileReportSink,
    LocalStorage, ReportFormat,
};
use tempfile::TempDir;

const LISTINGS_CSV: &str = "\
title,price,url,condition,year,search_term,scraped_at
\"Gibson Les Paul Standard '50s, Heritage Cherry\",2499.00,https://www.guitarcenter.com/Gibson/1,New,,gibson+les+paul+standard,2025-01-04T09:00:00
Fender American Professional II Stratocaster,1699.99,https://www.guitarcenter.com/Fender/2,New,,fender+stratocaster+american,2025-01-04T09:00:00
Gibson Custom 1959 Les Paul Standard Reissue VOS,6999.00,https://www.guitarcenter.com/Gibson/3,Used,,gibson+les+paul+r9,2025-01-04T09:00:00
Fender American Ultra Telecaster,\"$2,149.99\",https://www.guitarcenter.com/Fender/4,New,,fender+telecaster+american,2025-01-04T09:00:00
PRS Custom 24 10-Top,call for price,https://www.guitarcenter.com/PRS/5,Used,,prs+custom+24,2025-01-04T09:00:00
,999.00,https://www.guitarcenter.com/untitled,New,,prs+custom+24,2025-01-04T09:00:00
Gibson Les Paul Standard '60s,2399.00,https://www.guitarcenter.com/Gibson/6,New,,gibson+les+paul+standard,2025-01-11T09:00:00
Fender Player Stratocaster,849.99,https://www.guitarcenter.com/Fender/7,Used,,fender+stratocaster+american,2025-01-11T09:00:00
";

fn write_listings(dir: &TempDir, name: &str, content: &str) -> Result<String> {
    let path = dir.path().join(name);
    std::fs::write(&path, content)?;
    Ok(path.to_str().unwrap().to_string())
}

#[tokio::test]
async fn test_end_to_end_analysis_with_file_outputs() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input_path = write_listings(&temp_dir, "all_guitars.csv", LISTINGS_CSV)?;
    let output_dir = temp_dir.path().join("reports");
    let output_path = output_dir.to_str().unwrap().to_string();

    let source = CsvListingSource::new(LocalStorage::new(""), input_path.clone(), CsvOptions::default());
    let plan = AnalysisPlan {
        top_n: 3,
        title_searches: vec!["les paul".to_string(), "Jazzmaster".to_string()],
        price_targets: vec![2149.99, 1000.0],
        market_breakdown: true,
    };
    let engine = AnalysisEngine::new(source, plan).with_sink(FileReportSink::new(
        LocalStorage::new(output_path.clone()),
        output_path.clone(),
        vec![ReportFormat::Json, ReportFormat::Csv, ReportFormat::Text],
    ));

    let (report, destinations) = engine.run().await?;

    // One untitled row dropped, PRS kept with the sentinel price
    assert_eq!(report.load.rows_read, 8);
    assert_eq!(report.load.discarded_untitled, 1);
    assert_eq!(report.total_records, 7);
    assert_eq!(report.average.as_ref().unwrap().count, 6);

    let extremes = report.extremes.as_ref().unwrap();
    assert_eq!(extremes.cheapest.title, "Fender Player Stratocaster");
    assert_eq!(extremes.most_expensive.price, 6999.0);

    let counts: Vec<usize> = report.buckets.iter().map(|b| b.count).collect();
    assert_eq!(counts, vec![1, 1, 3, 0, 1]);

    assert_eq!(report.title_searches[0].matches.len(), 3);
    assert!(report.title_searches[1].matches.is_empty());

    let sorted = &report.overview.as_ref().unwrap().sorted_prices;
    let found = report.price_lookups[0].index.unwrap();
    assert_eq!(sorted[found], 2149.99);
    assert!(report.price_lookups[1].index.is_none());

    let strat_trend = report
        .trends
        .iter()
        .find(|t| t.search_term == "fender+stratocaster+american")
        .unwrap();
    assert_eq!(
        serde_json::to_value(strat_trend.direction)?,
        serde_json::json!("falling")
    );

    assert_eq!(destinations.len(), 1);
    assert!(output_dir.join("analysis_report.json").exists());
    assert!(output_dir.join("analysis_report.txt").exists());

    let json: serde_json::Value =
        serde_json::from_slice(&std::fs::read(output_dir.join("analysis_report.json"))?)?;
    assert_eq!(json["total_records"], 7);
    assert_eq!(json["ranked"].as_array().unwrap().len(), 3);
    assert_eq!(json["ranked"][0]["title"], "Fender Player Stratocaster");

    // Ranked CSV uses the input column layout, so it can be analyzed again
    let ranked_path = output_dir.join("ranked_listings.csv");
    let source = CsvListingSource::new(
        LocalStorage::new(""),
        ranked_path.to_str().unwrap(),
        CsvOptions::default(),
    );
    let (again, _) = AnalysisEngine::new(source, AnalysisPlan::default()).run().await?;
    assert_eq!(again.total_records, 3);
    assert_eq!(again.ranked[0].price, 849.99);

    Ok(())
}

#[tokio::test]
async fn test_end_to_end_with_toml_config() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input_path = write_listings(&temp_dir, "listings.tsv", &LISTINGS_CSV.replace(',', "\t"))?;
    let output_path = temp_dir.path().join("out");

    let config_content = format!(
        r#"
[analysis]
name = "tsv-run"

[input]
path = "{}"
delimiter = "tab"
infer_missing_year = true

[report]
output_path = "{}"
output_formats = ["json"]
top_n = 2
title_searches = ["1959"]
console = false
market_breakdown = false
"#,
        input_path.replace('\\', "/"),
        output_path.to_str().unwrap().replace('\\', "/")
    );
    let config = TomlConfig::from_toml_str(&config_content)?;
    config.validate()?;
    assert_eq!(config.delimiter(), '\t');

    let engine = build_engine(&config, config.console_enabled(), false)?;
    let (report, destinations) = engine.run().await?;

    assert_eq!(destinations.len(), 1);
    assert_eq!(report.total_records, 7);
    assert_eq!(report.ranked.len(), 2);
    assert!(report.search_terms.is_empty());
    assert!(report.trends.is_empty());

    let r9 = &report.title_searches[0].matches;
    assert_eq!(r9.len(), 1);
    assert_eq!(r9[0].year, "1959");
    assert!(output_path.join("analysis_report.json").exists());

    Ok(())
}

#[tokio::test]
async fn test_missing_input_file_fails_with_io_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let missing = temp_dir.path().join("nope.csv");

    let source = CsvListingSource::new(
        LocalStorage::new(""),
        missing.to_str().unwrap(),
        CsvOptions::default(),
    );
    let result = AnalysisEngine::new(source, AnalysisPlan::default()).run().await;

    let err = result.unwrap_err();
    assert!(matches!(err, guitar_analyzer::AnalyzerError::IoError(_)));
    assert_eq!(err.exit_code(), 3);
    Ok(())
}

#[tokio::test]
async fn test_header_only_file_reports_no_data() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input_path = write_listings(
        &temp_dir,
        "empty.csv",
        "title,price,url,condition,year,search_term,scraped_at\n",
    )?;

    let source = CsvListingSource::new(LocalStorage::new(""), input_path, CsvOptions::default());
    let (report, _) = AnalysisEngine::new(source, AnalysisPlan::default()).run().await?;

    assert_eq!(report.total_records, 0);
    assert!(report.overview.is_none());
    assert!(report.extremes.is_none());
    assert!(report.average.is_none());
    assert_eq!(report.buckets.iter().map(|b| b.count).sum::<usize>(), 0);
    Ok(())
}
