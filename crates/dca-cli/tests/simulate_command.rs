//! End-to-end tests for the `simulate` command.
//!
//! Prices come from a temporary CSV file or a mock Binance server and the
//! rendered output is written to a temporary file.

use mockito::Matcher;
use rust_decimal_macros::dec;
use std::path::PathBuf;

use dca_cli::commands::simulate::{run_simulate, SimulateArgs, SimulateCliConfig};
use dca_core::AppConfig;

const PRICES_CSV: &str = "timestamp,open,high,low,close,volume
1717200000000,100,100,100,100,1
1717286400000,110,110,110,110,1
1717372800000,90,90,90,90,1
1717459200000,95,95,95,95,1
1717545600000,120,120,120,120,1
";

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("dca_cli_{}_{}", std::process::id(), name))
}

fn write_prices(name: &str) -> PathBuf {
    let path = temp_path(name);
    std::fs::write(&path, PRICES_CSV).unwrap();
    path
}

#[tokio::test]
async fn simulate_from_csv_to_json_file() {
    let input = write_prices("json_prices.csv");
    let output = temp_path("result.json");

    let args = SimulateArgs {
        amount: Some(dec!(10)),
        frequency: Some(1),
        duration: Some(5),
        input: Some(input.clone()),
        format: "json".into(),
        output: Some(output.clone()),
        ..SimulateArgs::default()
    };
    let config = SimulateCliConfig::resolve(args, &AppConfig::default()).unwrap();

    let report = run_simulate(config).await.unwrap();
    let content = std::fs::read_to_string(&output).unwrap();
    std::fs::remove_file(&input).ok();
    std::fs::remove_file(&output).ok();

    assert_eq!(report.summary.total_invested, dec!(50));
    assert_eq!(report.summary.current_value.round_dp(2), dec!(58.87));

    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["summary"]["roi"], "17.75%");
    assert_eq!(json["labels"][0], "2024-06-01");
    assert_eq!(json["labels"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn simulate_from_csv_to_csv_file_uses_latest_rows() {
    let input = write_prices("csv_prices.csv");
    let output = temp_path("result.csv");

    let args = SimulateArgs {
        amount: Some(dec!(10)),
        frequency: Some(2),
        duration: Some(3),
        input: Some(input.clone()),
        format: "csv".into(),
        output: Some(output.clone()),
        ..SimulateArgs::default()
    };
    let config = SimulateCliConfig::resolve(args, &AppConfig::default()).unwrap();

    let report = run_simulate(config).await.unwrap();
    let content = std::fs::read_to_string(&output).unwrap();
    std::fs::remove_file(&input).ok();
    std::fs::remove_file(&output).ok();

    // 마지막 3개 캔들 (90, 95, 120)에서 index 0, 2 매수
    assert_eq!(report.summary.total_invested, dec!(20));
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "label,invested,portfolio_value");
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("2024-06-03,10.00,"));
}

#[tokio::test]
async fn simulate_against_mock_binance() {
    let mut server = mockito::Server::new_async().await;
    let body = serde_json::json!([
        [1717200000000i64, "100", "100", "100", "100", "1", 1717286399999i64, "0", 0, "0", "0", "0"],
        [1717286400000i64, "110", "110", "110", "110", "1", 1717372799999i64, "0", 0, "0", "0", "0"]
    ]);
    let mock = server
        .mock("GET", "/api/v3/klines")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("symbol".into(), "ETHUSDT".into()),
            Matcher::UrlEncoded("interval".into(), "1d".into()),
            Matcher::UrlEncoded("limit".into(), "2".into()),
        ]))
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await;

    let mut app = AppConfig::default();
    app.exchange.rest_base_url = server.url();

    let output = temp_path("binance_table.txt");
    let args = SimulateArgs {
        symbol: Some("ETH/USDT".into()),
        amount: Some(dec!(10)),
        frequency: Some(1),
        duration: Some(2),
        format: "table".into(),
        output: Some(output.clone()),
        ..SimulateArgs::default()
    };
    let config = SimulateCliConfig::resolve(args, &app).unwrap();

    let report = run_simulate(config).await.unwrap();
    let content = std::fs::read_to_string(&output).unwrap();
    std::fs::remove_file(&output).ok();

    mock.assert_async().await;
    // 10/110은 28자리에서 잘리므로 표시 자릿수로 비교
    assert_eq!(report.summary.current_value.round_dp(2), dec!(21));
    assert!(content.starts_with("ETH/USDT"));
    assert!(content.contains("$21.00"));
    assert!(content.contains("10.00%"));
    assert!(content.contains("Average Cost"));
}

#[tokio::test]
async fn empty_price_history_is_an_error() {
    let input = temp_path("empty_prices.csv");
    std::fs::write(&input, "timestamp,open,high,low,close,volume\n").unwrap();

    let args = SimulateArgs {
        input: Some(input.clone()),
        format: "table".into(),
        output: Some(temp_path("unused.txt")),
        ..SimulateArgs::default()
    };
    let config = SimulateCliConfig::resolve(args, &AppConfig::default()).unwrap();

    let result = run_simulate(config).await;
    std::fs::remove_file(&input).ok();

    assert!(result.is_err());
}
