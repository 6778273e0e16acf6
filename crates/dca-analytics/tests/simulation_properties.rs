//! Property tests for the simulation engine.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use dca_analytics::simulate;
use dca_core::{Candle, StrategyParams};

fn candles_from_cents(cents: &[u32]) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    cents
        .iter()
        .enumerate()
        .map(|(i, c)| Candle {
            timestamp: start + Duration::days(i as i64),
            close_price: Decimal::new(i64::from(*c), 2),
        })
        .collect()
}

fn price_series() -> impl Strategy<Value = Vec<u32>> {
    // 0.01 ~ 100,000.00
    prop::collection::vec(1u32..10_000_000, 1..200)
}

proptest! {
    #[test]
    fn history_matches_input_length(cents in price_series(), amount in 1i64..100_000, freq in 1usize..30) {
        let candles = candles_from_cents(&cents);
        let params = StrategyParams::new(Decimal::new(amount, 2), freq).unwrap();
        let report = simulate(&candles, &params).unwrap();

        prop_assert_eq!(report.history.len(), candles.len());
        for (point, candle) in report.history.iter().zip(&candles) {
            prop_assert_eq!(point.timestamp, candle.timestamp);
        }
    }

    #[test]
    fn invested_is_monotonic_and_exact(cents in price_series(), amount in 1i64..100_000, freq in 1usize..30) {
        let candles = candles_from_cents(&cents);
        let amount = Decimal::new(amount, 2);
        let params = StrategyParams::new(amount, freq).unwrap();
        let report = simulate(&candles, &params).unwrap();

        prop_assert!(report
            .history
            .windows(2)
            .all(|w| w[0].total_invested <= w[1].total_invested));

        let buys = candles.len().div_ceil(freq);
        prop_assert_eq!(report.contribution_count(), buys);
        prop_assert_eq!(report.summary.total_invested, amount * Decimal::from(buys));

        // 매수 인덱스에서만 정확히 amount만큼 증가
        let mut previous = Decimal::ZERO;
        for (i, point) in report.history.iter().enumerate() {
            let expected = if i % freq == 0 { previous + amount } else { previous };
            prop_assert_eq!(point.total_invested, expected);
            previous = point.total_invested;
        }
    }

    #[test]
    fn summary_identities_hold(cents in price_series(), amount in 1i64..100_000, freq in 1usize..30) {
        let candles = candles_from_cents(&cents);
        let params = StrategyParams::new(Decimal::new(amount, 2), freq).unwrap();
        let report = simulate(&candles, &params).unwrap();
        let summary = report.summary;

        prop_assert_eq!(summary.profit_loss, summary.current_value - summary.total_invested);
        prop_assert!(summary.roi.is_some());
        prop_assert!(summary.current_value > Decimal::ZERO);

        let last = report.history.last().unwrap();
        prop_assert_eq!(summary.current_value, last.portfolio_value);
    }

    #[test]
    fn simulation_is_idempotent(cents in price_series(), freq in 1usize..30) {
        let candles = candles_from_cents(&cents);
        let params = StrategyParams::new(Decimal::new(10_000, 2), freq).unwrap();

        let first = simulate(&candles, &params).unwrap();
        let second = simulate(&candles, &params).unwrap();

        prop_assert_eq!(first, second);
    }
}
