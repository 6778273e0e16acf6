//! CSV 파일 가격 소스.
//!
//! 오프라인 실행과 테스트를 위해 로컬 CSV 파일에서 캔들을 읽습니다.
//!
//! # 형식
//!
//! ```text
//! timestamp,open,high,low,close,volume
//! 1704067200000,42283.58,44184.10,42180.77,44179.55,27174.29
//! ```
//!
//! - `timestamp`는 캔들 시작 시각 (epoch 밀리초)
//! - 헤더 행은 선택 사항
//! - 행은 시간순이어야 하며, 순서 검증은 [`crate::validation::to_candles`]에서 수행

use crate::traits::{ExchangeResult, KlineSource};
use crate::ExchangeError;
use async_trait::async_trait;
use chrono::DateTime;
use dca_core::{Kline, Symbol, Timeframe};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// CSV 파일 기반 캔들 소스.
#[derive(Debug, Clone)]
pub struct CsvKlineSource {
    path: PathBuf,
}

impl CsvKlineSource {
    /// 새로운 CSV 소스를 생성합니다.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 파일 경로 반환.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl KlineSource for CsvKlineSource {
    fn name(&self) -> &str {
        "CSV"
    }

    async fn fetch_klines(
        &self,
        symbol: &Symbol,
        timeframe: Timeframe,
        limit: usize,
    ) -> ExchangeResult<Vec<Kline>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ExchangeError::Io(format!(
                "Failed to read CSV file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let mut klines = parse_csv(&content, &symbol.to_exchange_symbol(), timeframe)?;

        // 최근 limit개만 사용 (0이면 전체)
        if limit > 0 && klines.len() > limit {
            let skip = klines.len() - limit;
            klines.drain(..skip);
        }

        info!(
            path = %self.path.display(),
            rows = klines.len(),
            "Loaded klines from CSV"
        );

        Ok(klines)
    }
}

/// CSV 문자열을 Kline 목록으로 파싱합니다.
pub fn parse_csv(content: &str, ticker: &str, timeframe: Timeframe) -> ExchangeResult<Vec<Kline>> {
    let mut klines = Vec::new();
    let mut seen_data = false;

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // 헤더는 주석/빈 줄 다음의 첫 행에서만 허용
        let is_first = !seen_data;
        seen_data = true;
        if is_first && line.to_lowercase().contains("timestamp") {
            continue;
        }

        let parts: Vec<&str> = line.split(',').map(str::trim).collect();
        if parts.len() < 6 {
            return Err(ExchangeError::ParseError(format!(
                "Expected 6 columns at line {}, found {}",
                line_no + 1,
                parts.len()
            )));
        }

        let open_time = parts[0]
            .parse::<i64>()
            .ok()
            .and_then(DateTime::from_timestamp_millis)
            .ok_or_else(|| {
                ExchangeError::ParseError(format!(
                    "Invalid timestamp at line {}: {}",
                    line_no + 1,
                    parts[0]
                ))
            })?;

        let field = |idx: usize, name: &str| -> ExchangeResult<Decimal> {
            parts[idx].parse().map_err(|_| {
                ExchangeError::ParseError(format!(
                    "Invalid {} at line {}: {}",
                    name,
                    line_no + 1,
                    parts[idx]
                ))
            })
        };

        klines.push(Kline {
            ticker: ticker.to_string(),
            timeframe,
            open_time,
            open: field(1, "open")?,
            high: field(2, "high")?,
            low: field(3, "low")?,
            close: field(4, "close")?,
            volume: field(5, "volume")?,
            close_time: timeframe.close_time(open_time),
        });
    }

    debug!(rows = klines.len(), "Parsed CSV klines");
    Ok(klines)
}
