//! Binance 공개 시세 커넥터.
//!
//! 인증이 필요 없는 `GET /api/v3/klines` 엔드포인트로 과거 캔들을 조회합니다.
//! 한 번에 최대 1000개까지 조회할 수 있으므로, 더 많은 캔들은 `endTime`을
//! 과거 방향으로 옮겨가며 여러 페이지로 나누어 조회한 뒤 시간순으로 이어 붙입니다.

#![allow(dead_code)] // API 응답 필드 전체 매핑 (일부만 사용)

use crate::traits::{ExchangeResult, KlineSource};
use crate::ExchangeError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dca_core::{ExchangeSettings, Kline, Symbol, Timeframe};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, error, info};

/// 요청당 최대 캔들 수 (Binance 제한).
pub const MAX_KLINES_PER_REQUEST: usize = 1000;

/// 기본 REST API URL.
pub const DEFAULT_REST_BASE_URL: &str = "https://api.binance.com";

// ============================================================================
// 설정
// ============================================================================

/// Binance 클라이언트 설정.
#[derive(Debug, Clone)]
pub struct BinanceConfig {
    /// REST API 기본 URL
    pub rest_base_url: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
    /// 페이지당 캔들 수 (1 ~ 1000)
    pub page_size: usize,
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self {
            rest_base_url: DEFAULT_REST_BASE_URL.to_string(),
            timeout_secs: 30,
            page_size: MAX_KLINES_PER_REQUEST,
        }
    }
}

impl BinanceConfig {
    /// 애플리케이션 설정에서 생성.
    pub fn from_settings(settings: &ExchangeSettings) -> Self {
        Self {
            rest_base_url: settings.rest_base_url.trim_end_matches('/').to_string(),
            timeout_secs: settings.timeout_secs,
            page_size: MAX_KLINES_PER_REQUEST,
        }
    }

    /// 기본 URL 변경.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.rest_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// 페이지 크기 변경 (1 ~ 1000으로 제한).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.clamp(1, MAX_KLINES_PER_REQUEST);
        self
    }
}

// ============================================================================
// API 응답 타입
// ============================================================================

#[derive(Debug, Deserialize)]
struct BinanceKline(
    i64,    // 0: Open time
    String, // 1: Open
    String, // 2: High
    String, // 3: Low
    String, // 4: Close
    String, // 5: Volume
    i64,    // 6: Close time
    String, // 7: Quote asset volume
    i64,    // 8: Number of trades
    String, // 9: Taker buy base asset volume
    String, // 10: Taker buy quote asset volume
    String, // 11: Ignore
);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BinanceError {
    code: i32,
    msg: String,
}

// ============================================================================
// Binance 클라이언트
// ============================================================================

/// Binance 공개 시세 클라이언트.
#[derive(Debug, Clone)]
pub struct BinanceClient {
    config: BinanceConfig,
    client: Client,
}

impl BinanceClient {
    /// 새 Binance 클라이언트 생성.
    ///
    /// # Errors
    /// HTTP 클라이언트 생성에 실패하면 `ExchangeError::NetworkError`를 반환합니다.
    pub fn new(config: BinanceConfig) -> Result<Self, ExchangeError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                ExchangeError::NetworkError(format!("HTTP 클라이언트 생성 실패: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// 설정 반환.
    pub fn config(&self) -> &BinanceConfig {
        &self.config
    }

    /// 파라미터에서 쿼리 문자열 생성.
    fn build_query(params: &[(&str, String)]) -> String {
        params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// 공개 API 요청 (인증 불필요).
    async fn public_get<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> ExchangeResult<T> {
        let url = format!("{}{}", self.config.rest_base_url, endpoint);
        let query = Self::build_query(params);

        let full_url = if query.is_empty() {
            url
        } else {
            format!("{}?{}", url, query)
        };

        debug!("GET {}", full_url);

        let response = self.client.get(&full_url).send().await.map_err(|e| {
            if e.is_timeout() {
                ExchangeError::Timeout(e.to_string())
            } else {
                ExchangeError::NetworkError(e.to_string())
            }
        })?;

        self.handle_response(response).await
    }

    /// API 응답 처리.
    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> ExchangeResult<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExchangeError::NetworkError(e.to_string()))?;

        if status.is_success() {
            serde_json::from_str(&body).map_err(|e| {
                error!("Failed to parse response: {} - Body: {}", e, body);
                ExchangeError::ParseError(e.to_string())
            })
        } else if let Ok(error) = serde_json::from_str::<BinanceError>(&body) {
            Err(Self::map_error_code(error.code, &error.msg))
        } else {
            Err(Self::map_status(status.as_u16(), body))
        }
    }

    /// Binance 에러 코드를 ExchangeError로 매핑.
    fn map_error_code(code: i32, msg: &str) -> ExchangeError {
        match code {
            -1000 => ExchangeError::Unknown(msg.to_string()),
            -1001 => ExchangeError::Disconnected(msg.to_string()),
            -1003 => ExchangeError::RateLimited,
            -1100 | -1101 | -1102 | -1104 | -1120 => {
                ExchangeError::InvalidRequest(msg.to_string())
            }
            -1121 => ExchangeError::SymbolNotFound(msg.to_string()),
            _ => ExchangeError::ApiError {
                code,
                message: msg.to_string(),
            },
        }
    }

    /// 본문 없는 HTTP 에러 상태를 ExchangeError로 매핑.
    fn map_status(status: u16, body: String) -> ExchangeError {
        match status {
            418 | 429 => ExchangeError::RateLimited,
            500..=599 => ExchangeError::NetworkError(format!("HTTP {}: {}", status, body)),
            _ => ExchangeError::ApiError {
                code: status as i32,
                message: body,
            },
        }
    }

    /// 문자열에서 Decimal 파싱.
    fn parse_decimal(field: &str, s: &str) -> ExchangeResult<Decimal> {
        s.parse()
            .map_err(|_| ExchangeError::ParseError(format!("{} 값이 올바르지 않습니다: {}", field, s)))
    }

    /// 밀리초 타임스탬프 파싱.
    fn parse_timestamp(millis: i64) -> ExchangeResult<DateTime<Utc>> {
        DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| ExchangeError::ParseError(format!("타임스탬프 범위 초과: {}", millis)))
    }

    /// 응답 캔들을 내부 Kline으로 변환.
    fn convert_kline(ticker: &str, timeframe: Timeframe, k: BinanceKline) -> ExchangeResult<Kline> {
        Ok(Kline {
            ticker: ticker.to_string(),
            timeframe,
            open_time: Self::parse_timestamp(k.0)?,
            open: Self::parse_decimal("open", &k.1)?,
            high: Self::parse_decimal("high", &k.2)?,
            low: Self::parse_decimal("low", &k.3)?,
            close: Self::parse_decimal("close", &k.4)?,
            volume: Self::parse_decimal("volume", &k.5)?,
            close_time: Self::parse_timestamp(k.6)?,
        })
    }

    /// 단일 페이지 조회.
    async fn fetch_page(
        &self,
        ticker: &str,
        timeframe: Timeframe,
        limit: usize,
        end_time: Option<i64>,
    ) -> ExchangeResult<Vec<Kline>> {
        let mut params = vec![
            ("symbol", ticker.to_string()),
            ("interval", timeframe.to_binance_interval().to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(end_time) = end_time {
            params.push(("endTime", end_time.to_string()));
        }

        let resp: Vec<BinanceKline> = self.public_get("/api/v3/klines", &params).await?;

        resp.into_iter()
            .map(|k| Self::convert_kline(ticker, timeframe, k))
            .collect()
    }
}

#[async_trait]
impl KlineSource for BinanceClient {
    fn name(&self) -> &str {
        "Binance"
    }

    async fn fetch_klines(
        &self,
        symbol: &Symbol,
        timeframe: Timeframe,
        limit: usize,
    ) -> ExchangeResult<Vec<Kline>> {
        if limit == 0 {
            return Err(ExchangeError::InvalidRequest(
                "조회할 캔들 수는 1 이상이어야 합니다".to_string(),
            ));
        }

        let ticker = symbol.to_exchange_symbol();
        let mut pages: Vec<Vec<Kline>> = Vec::new();
        let mut remaining = limit;
        let mut end_time: Option<i64> = None;

        while remaining > 0 {
            let page_limit = remaining.min(self.config.page_size);
            let mut page = self
                .fetch_page(&ticker, timeframe, page_limit, end_time)
                .await?;

            // 이전 페이지와 겹치는 캔들 제거
            if let Some(bound) = end_time {
                page.retain(|k| k.open_time.timestamp_millis() <= bound);
            }

            let Some(oldest) = page.first() else {
                break;
            };

            let fetched = page.len();
            end_time = Some(oldest.open_time.timestamp_millis() - 1);
            remaining = remaining.saturating_sub(fetched);
            pages.push(page);

            if fetched < page_limit {
                // 상장 이전 구간
                break;
            }
        }

        let klines: Vec<Kline> = pages.into_iter().rev().flatten().collect();

        info!(
            symbol = %symbol,
            interval = timeframe.to_binance_interval(),
            requested = limit,
            received = klines.len(),
            "Fetched klines from Binance"
        );

        Ok(klines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query() {
        let query = BinanceClient::build_query(&[
            ("symbol", "BTCUSDT".to_string()),
            ("interval", "1d".to_string()),
            ("limit", "365".to_string()),
        ]);
        assert_eq!(query, "symbol=BTCUSDT&interval=1d&limit=365");
    }

    #[test]
    fn test_map_error_code() {
        assert!(matches!(
            BinanceClient::map_error_code(-1121, "Invalid symbol."),
            ExchangeError::SymbolNotFound(_)
        ));
        assert!(matches!(
            BinanceClient::map_error_code(-1003, "Too many requests"),
            ExchangeError::RateLimited
        ));
        assert!(matches!(
            BinanceClient::map_error_code(-1120, "Invalid interval."),
            ExchangeError::InvalidRequest(_)
        ));
        assert!(matches!(
            BinanceClient::map_error_code(-9999, "?"),
            ExchangeError::ApiError { code: -9999, .. }
        ));
    }

    #[test]
    fn test_map_status() {
        assert!(matches!(
            BinanceClient::map_status(429, String::new()),
            ExchangeError::RateLimited
        ));
        assert!(BinanceClient::map_status(503, "unavailable".into()).is_retryable());
        assert!(!BinanceClient::map_status(404, "not found".into()).is_retryable());
    }

    #[test]
    fn test_convert_kline() {
        let raw: BinanceKline = serde_json::from_str(
            r#"[1704067200000,"42283.58","44184.10","42180.77","44179.55","27174.29",1704153599999,"0",0,"0","0","0"]"#,
        )
        .unwrap();

        let kline = BinanceClient::convert_kline("BTCUSDT", Timeframe::D1, raw).unwrap();

        assert_eq!(kline.ticker, "BTCUSDT");
        assert_eq!(kline.close.to_string(), "44179.55");
        assert_eq!(kline.open_time.timestamp_millis(), 1_704_067_200_000);
        assert_eq!(kline.close_time.timestamp_millis(), 1_704_153_599_999);
    }

    #[test]
    fn test_convert_kline_rejects_bad_price() {
        let raw: BinanceKline = serde_json::from_str(
            r#"[1704067200000,"1","1","1","abc","1",1704153599999,"0",0,"0","0","0"]"#,
        )
        .unwrap();

        let result = BinanceClient::convert_kline("BTCUSDT", Timeframe::D1, raw);
        assert!(matches!(result, Err(ExchangeError::ParseError(_))));
    }

    #[test]
    fn test_config_page_size_clamped() {
        let config = BinanceConfig::default().with_page_size(5000);
        assert_eq!(config.page_size, MAX_KLINES_PER_REQUEST);

        let config = BinanceConfig::default()
            .with_page_size(0)
            .with_base_url("http://localhost:1234/");
        assert_eq!(config.page_size, 1);
        assert_eq!(config.rest_base_url, "http://localhost:1234");
    }
}
