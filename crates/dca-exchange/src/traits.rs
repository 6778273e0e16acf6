//! 가격 소스 트레이트 정의.

use crate::ExchangeError;
use async_trait::async_trait;
use dca_core::{Kline, Symbol, Timeframe};

/// 가격 소스 작업을 위한 Result 타입.
pub type ExchangeResult<T> = Result<T, ExchangeError>;

/// 과거 캔들 데이터를 제공하는 소스.
///
/// 반환되는 캔들은 시간순(과거 → 최신)으로 정렬되어야 합니다.
#[async_trait]
pub trait KlineSource: Send + Sync {
    /// 소스 이름 반환.
    fn name(&self) -> &str;

    /// 최근 `limit`개의 캔들을 조회합니다.
    ///
    /// 소스가 가진 데이터가 `limit`보다 적으면 가능한 만큼만 반환합니다.
    async fn fetch_klines(
        &self,
        symbol: &Symbol,
        timeframe: Timeframe,
        limit: usize,
    ) -> ExchangeResult<Vec<Kline>>;
}
