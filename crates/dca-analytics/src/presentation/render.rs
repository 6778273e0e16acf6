//! 출력 렌더러.
//!
//! 각 렌더러는 자신의 출력 대상을 소유합니다. 렌더링 사이에 공유되는 전역 상태는 없으며,
//! 같은 렌더러로 여러 번 렌더링하면 출력이 이어서 기록됩니다.

use super::series::RenderableSeries;
use dca_core::{DcaError, DcaResult};
use std::io::Write;

/// 시리즈를 특정 형식으로 출력하는 렌더러.
pub trait Renderer {
    /// 시리즈를 렌더링합니다.
    fn render(&mut self, series: &RenderableSeries) -> DcaResult<()>;
}

/// 요약 블록 + 캔들별 표 렌더러.
#[derive(Debug)]
pub struct TableRenderer<W: Write> {
    out: W,
    max_rows: usize,
}

impl<W: Write> TableRenderer<W> {
    /// 새로운 표 렌더러를 생성합니다.
    ///
    /// `max_rows`가 0이면 모든 행을 출력합니다.
    pub fn new(out: W, max_rows: usize) -> Self {
        Self { out, max_rows }
    }

    /// 출력 대상을 반환합니다.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TableRenderer<W> {
    fn render(&mut self, series: &RenderableSeries) -> DcaResult<()> {
        let summary = &series.summary;
        let out = &mut self.out;

        if let Some(title) = &series.title {
            writeln!(out, "{}", title)?;
            writeln!(out, "{}", "=".repeat(title.chars().count().max(20)))?;
        }

        writeln!(out, "{:<16} {}", "Total Invested", summary.total_invested)?;
        writeln!(out, "{:<16} {}", "Current Value", summary.current_value)?;
        writeln!(out, "{:<16} {}", "Profit/Loss", summary.profit_loss)?;
        writeln!(out, "{:<16} {}", "ROI", summary.roi)?;
        if let Some(average_cost) = &series.average_cost {
            writeln!(out, "{:<16} {}", "Average Cost", average_cost)?;
        }
        writeln!(out)?;

        writeln!(
            out,
            "{:<18} {:>16} {:>16}",
            "DATE", "INVESTED", "PORTFOLIO VALUE"
        )?;
        writeln!(out, "{}", "-".repeat(52))?;

        let rows = sample_indices(series.len(), self.max_rows);
        for &i in &rows {
            writeln!(
                out,
                "{:<18} {:>16} {:>16}",
                series.labels[i], series.invested[i], series.portfolio_value[i]
            )?;
        }

        if rows.len() < series.len() {
            writeln!(out)?;
            writeln!(out, "Showing {} of {} rows", rows.len(), series.len())?;
        }

        out.flush()?;
        Ok(())
    }
}

/// JSON 렌더러 (요약 + 시리즈 + 차트 데이터셋).
#[derive(Debug)]
pub struct JsonRenderer<W: Write> {
    out: W,
    pretty: bool,
}

impl<W: Write> JsonRenderer<W> {
    /// 들여쓰기된 JSON을 출력하는 렌더러를 생성합니다.
    pub fn new(out: W) -> Self {
        Self { out, pretty: true }
    }

    /// 한 줄 JSON을 출력하는 렌더러를 생성합니다.
    pub fn compact(out: W) -> Self {
        Self { out, pretty: false }
    }

    /// 출력 대상을 반환합니다.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, series: &RenderableSeries) -> DcaResult<()> {
        let document = serde_json::json!({
            "title": series.title,
            "summary": series.summary,
            "raw_summary": series.raw_summary,
            "average_cost": series.average_cost,
            "labels": series.labels,
            "invested": series.invested,
            "portfolio_value": series.portfolio_value,
            "datasets": series.datasets(),
        });

        if self.pretty {
            serde_json::to_writer_pretty(&mut self.out, &document)?;
        } else {
            serde_json::to_writer(&mut self.out, &document)?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

/// CSV 렌더러 (`label,invested,portfolio_value`).
#[derive(Debug)]
pub struct CsvRenderer<W: Write> {
    out: W,
}

impl<W: Write> CsvRenderer<W> {
    /// 새로운 CSV 렌더러를 생성합니다.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// 출력 대상을 반환합니다.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for CsvRenderer<W> {
    fn render(&mut self, series: &RenderableSeries) -> DcaResult<()> {
        if series.invested.len() != series.len() || series.portfolio_value.len() != series.len() {
            return Err(DcaError::Render(
                "시리즈 길이가 일치하지 않습니다".to_string(),
            ));
        }

        writeln!(self.out, "label,invested,portfolio_value")?;
        for i in 0..series.len() {
            writeln!(
                self.out,
                "{},{},{}",
                escape_csv(&series.labels[i]),
                series.invested[i],
                series.portfolio_value[i]
            )?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// 표에 출력할 행 인덱스를 고릅니다.
///
/// 첫 행과 마지막 행은 항상 포함하고 나머지는 균등 간격으로 선택합니다.
pub(crate) fn sample_indices(len: usize, max_rows: usize) -> Vec<usize> {
    if max_rows == 0 || len <= max_rows {
        return (0..len).collect();
    }
    if max_rows == 1 {
        return vec![len - 1];
    }

    let span = len - 1;
    let steps = max_rows - 1;
    (0..max_rows).map(|i| i * span / steps).collect()
}

/// CSV 이스케이프 (콤마나 따옴표 포함 시 따옴표로 감싸기).
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::to_presentation;
    use chrono::{Duration, TimeZone, Utc};
    use dca_core::{HistoryPoint, PresentationConfig, SimulationSummary};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn sample_series(len: usize) -> RenderableSeries {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let history: Vec<HistoryPoint> = (0..len)
            .map(|i| HistoryPoint {
                timestamp: base + Duration::days(i as i64),
                total_invested: Decimal::from(10 * (i + 1)),
                portfolio_value: Decimal::from(11 * (i + 1)),
            })
            .collect();
        let last = history.last().copied();
        let summary = match last {
            Some(p) => SimulationSummary::new(p.total_invested, p.portfolio_value),
            None => SimulationSummary::new(dec!(0), dec!(0)),
        };
        to_presentation(&summary, &history, &PresentationConfig::default())
    }

    #[test]
    fn test_sample_indices() {
        assert_eq!(sample_indices(5, 0), vec![0, 1, 2, 3, 4]);
        assert_eq!(sample_indices(5, 10), vec![0, 1, 2, 3, 4]);
        assert_eq!(sample_indices(10, 1), vec![9]);
        assert_eq!(sample_indices(10, 4), vec![0, 3, 6, 9]);

        let rows = sample_indices(365, 30);
        assert_eq!(rows.len(), 30);
        assert_eq!(rows.first(), Some(&0));
        assert_eq!(rows.last(), Some(&364));
        assert!(rows.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_table_renderer() {
        let series = sample_series(3).with_title("BTC/USDT");
        let mut renderer = TableRenderer::new(Vec::new(), 0);
        renderer.render(&series).unwrap();

        let output = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(output.starts_with("BTC/USDT\n"));
        assert!(output.contains("Total Invested   $30.00"));
        assert!(output.contains("ROI              10.00%"));
        assert!(output.contains("2024-01-03"));
        assert!(!output.contains("Showing"));
    }

    #[test]
    fn test_table_renderer_sampling() {
        let series = sample_series(100);
        let mut renderer = TableRenderer::new(Vec::new(), 10);
        renderer.render(&series).unwrap();

        let output = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(output.contains("Showing 10 of 100 rows"));
        // 마지막 행은 항상 포함
        assert!(output.contains("2024-04-09"));
    }

    #[test]
    fn test_csv_renderer() {
        let series = sample_series(2);
        let mut renderer = CsvRenderer::new(Vec::new());
        renderer.render(&series).unwrap();

        let output = String::from_utf8(renderer.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "label,invested,portfolio_value");
        assert_eq!(lines[1], "2024-01-01,10.00,11.00");
        assert_eq!(lines[2], "2024-01-02,20.00,22.00");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_json_renderer() {
        let series = sample_series(2);
        let mut renderer = JsonRenderer::compact(Vec::new());
        renderer.render(&series).unwrap();

        let output = renderer.into_inner();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["summary"]["roi"], "10.00%");
        assert_eq!(value["labels"].as_array().unwrap().len(), 2);
        assert_eq!(value["datasets"][0]["label"], "Portfolio Value");
        assert!(value["title"].is_null());
    }

    #[test]
    fn test_renderers_are_independent() {
        let series = sample_series(2);
        let mut first = CsvRenderer::new(Vec::new());
        let mut second = CsvRenderer::new(Vec::new());

        first.render(&series).unwrap();
        first.render(&series).unwrap();
        second.render(&series).unwrap();

        let first = String::from_utf8(first.into_inner()).unwrap();
        let second = String::from_utf8(second.into_inner()).unwrap();
        assert_eq!(first.lines().count(), 6);
        assert_eq!(second.lines().count(), 3);
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("2024-01-01"), "2024-01-01");
        assert_eq!(escape_csv("Jan 1, 2024"), "\"Jan 1, 2024\"");
    }
}
