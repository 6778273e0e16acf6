//! 가격 데이터 경계 검증.
//!
//! 외부 소스에서 받은 캔들을 엔진 입력으로 변환하기 전에 검증합니다.
//! 엔진은 재정렬하지 않으므로 순서가 어긋난 데이터는 여기서 거부합니다.

use dca_core::{Candle, DcaError, DcaResult, Kline};
use tracing::{debug, warn};

/// Kline 목록을 검증하여 시뮬레이션용 캔들로 변환합니다.
///
/// # 에러
///
/// - 빈 목록
/// - 종가가 0 이하인 캔들
/// - 시작 시각이 엄격하게 증가하지 않는 캔들 (중복 포함)
///
/// 위 경우 모두 `DcaError::InvalidInput`을 반환합니다.
pub fn to_candles(klines: &[Kline]) -> DcaResult<Vec<Candle>> {
    if klines.is_empty() {
        return Err(DcaError::InvalidInput(
            "가격 데이터가 비어있습니다".to_string(),
        ));
    }

    let mut candles = Vec::with_capacity(klines.len());

    for (index, kline) in klines.iter().enumerate() {
        let candle = Candle::from_kline(kline)?;

        if let Some(prev) = candles.last().map(|c: &Candle| c.timestamp) {
            if candle.timestamp <= prev {
                return Err(DcaError::InvalidInput(format!(
                    "캔들 시각이 시간순이 아닙니다: index={}, {} <= {}",
                    index, candle.timestamp, prev
                )));
            }
        }

        candles.push(candle);
    }

    let gaps = count_gaps(klines);
    if gaps > 0 {
        warn!(gaps, "Price series has missing candles");
    }
    debug!(candles = candles.len(), "Validated price series");

    Ok(candles)
}

/// 이전 캔들과의 간격이 한 캔들보다 긴 지점의 수.
///
/// 월봉은 길이가 달마다 달라 검사하지 않습니다.
fn count_gaps(klines: &[Kline]) -> usize {
    klines
        .windows(2)
        .filter(|pair| {
            let timeframe = pair[1].timeframe;
            let step = (pair[1].open_time - pair[0].open_time).num_milliseconds();
            timeframe.is_fixed_length() && step > timeframe.as_millis()
        })
        .count()
}
