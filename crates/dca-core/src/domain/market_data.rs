//! 시장 데이터 타입.
//!
//! - `Kline` - 가격 소스가 제공하는 OHLCV 캔들스틱
//! - `Candle` - 시뮬레이션 엔진이 소비하는 (시각, 종가) 쌍

use crate::error::{DcaError, DcaResult};
use crate::types::{DecimalExt, Price, Quantity, Timeframe};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// OHLCV 캔들스틱 데이터.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kline {
    /// 거래 심볼 (예: "BTCUSDT")
    pub ticker: String,
    /// 타임프레임
    pub timeframe: Timeframe,
    /// 캔들 시작 시간
    pub open_time: DateTime<Utc>,
    /// 시가
    pub open: Price,
    /// 고가
    pub high: Price,
    /// 저가
    pub low: Price,
    /// 종가
    pub close: Price,
    /// 거래량 (기준 자산 단위)
    pub volume: Quantity,
    /// 캔들 종료 시간
    pub close_time: DateTime<Utc>,
}

impl Kline {
    /// 종가만 알고 있는 캔들을 생성합니다 (OHLC 모두 종가로 채움).
    pub fn from_close(
        ticker: impl Into<String>,
        timeframe: Timeframe,
        open_time: DateTime<Utc>,
        close: Price,
    ) -> Self {
        let close_time = timeframe.close_time(open_time);
        Self {
            ticker: ticker.into(),
            timeframe,
            open_time,
            open: close,
            high: close,
            low: close,
            close,
            volume: Decimal::ZERO,
            close_time,
        }
    }
}

/// 시뮬레이션 입력 캔들.
///
/// 엔진은 시각과 종가만 사용합니다. 종가는 항상 0보다 큽니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
    /// 캔들 시작 시각
    pub timestamp: DateTime<Utc>,
    /// 종가
    pub close_price: Price,
}

impl Candle {
    /// 종가를 검증하여 캔들을 생성합니다.
    pub fn try_new(timestamp: DateTime<Utc>, close_price: Price) -> DcaResult<Self> {
        if !close_price.is_strictly_positive() {
            return Err(DcaError::InvalidInput(format!(
                "종가는 0보다 커야 합니다: {} @ {}",
                close_price, timestamp
            )));
        }
        Ok(Self {
            timestamp,
            close_price,
        })
    }

    /// Kline에서 캔들을 생성합니다 (시작 시각 + 종가).
    pub fn from_kline(kline: &Kline) -> DcaResult<Self> {
        Self::try_new(kline.open_time, kline.close)
    }
}
