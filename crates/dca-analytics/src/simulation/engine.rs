//! DCA 시뮬레이션 엔진
//!
//! 시간순으로 정렬된 캔들과 전략 매개변수를 받아 캔들별 투자 이력과
//! 요약 통계를 계산합니다.
//!
//! # 알고리즘
//!
//! - 인덱스 `i`가 `i % frequency == 0`이면 `amount`만큼 매수합니다
//!   (`units += amount / close`).
//! - 매수 여부와 관계없이 매 캔들 종가로 평가 금액을 계산합니다.
//! - 매수 주기는 달력이 아닌 캔들 인덱스 기준입니다.
//!
//! 엔진은 I/O가 없고 공유 상태도 없습니다. 동일한 입력에 항상 동일한 결과를 반환합니다.
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! use dca_analytics::simulation::DcaEngine;
//! use dca_core::StrategyParams;
//! use rust_decimal_macros::dec;
//!
//! let engine = DcaEngine::new(StrategyParams::new(dec!(10), 1)?)?;
//! let report = engine.run(&candles)?;
//!
//! println!("총 투자: {}", report.summary.total_invested);
//! println!("평가 금액: {}", report.summary.current_value);
//! ```

use dca_core::{
    Candle, DcaError, DcaResult, DecimalExt, HistoryPoint, SimulationReport, SimulationSummary,
    StrategyParams,
};
use rust_decimal::Decimal;
use tracing::debug;

/// DCA 시뮬레이션 엔진
///
/// 검증된 전략 매개변수를 보관하며, 여러 캔들 시계열에 재사용할 수 있습니다.
#[derive(Debug, Clone, Copy)]
pub struct DcaEngine {
    params: StrategyParams,
}

impl DcaEngine {
    /// 새로운 엔진을 생성합니다.
    ///
    /// 매개변수가 잘못되었으면 `DcaError::InvalidInput`을 반환합니다.
    pub fn new(params: StrategyParams) -> DcaResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// 전략 매개변수를 반환합니다.
    pub fn params(&self) -> &StrategyParams {
        &self.params
    }

    /// 캔들 시계열로 시뮬레이션을 실행합니다.
    pub fn run(&self, candles: &[Candle]) -> DcaResult<SimulationReport> {
        simulate(candles, &self.params)
    }
}

/// 캔들 시계열로 DCA 시뮬레이션을 실행합니다.
///
/// # 매개변수
///
/// * `candles` - 시간순(과거 → 최신) 캔들. 재정렬하지 않습니다.
/// * `params` - 투자 금액과 매수 주기
///
/// # 에러
///
/// 캔들이 비어 있거나, 종가가 0 이하이거나, 매개변수가 잘못되었으면
/// `DcaError::InvalidInput`을 반환합니다. 부분 결과는 반환하지 않습니다.
pub fn simulate(candles: &[Candle], params: &StrategyParams) -> DcaResult<SimulationReport> {
    params.validate()?;

    let last = candles
        .last()
        .ok_or_else(|| DcaError::InvalidInput("캔들 데이터가 비어있습니다".to_string()))?;

    debug!(
        candles = candles.len(),
        amount = %params.contribution_amount,
        frequency = params.contribution_frequency,
        "Running DCA simulation"
    );

    let amount = params.contribution_amount;
    let mut total_invested = Decimal::ZERO;
    let mut total_units = Decimal::ZERO;
    let mut contributions = 0usize;
    let mut history = Vec::with_capacity(candles.len());

    for (index, candle) in candles.iter().enumerate() {
        let price = candle.close_price;
        if !price.is_strictly_positive() {
            return Err(DcaError::InvalidInput(format!(
                "종가는 0보다 커야 합니다: index={}, close={}",
                index, price
            )));
        }

        if params.is_contribution_step(index) {
            total_invested = checked(total_invested.checked_add(amount), index)?;
            let units = checked(amount.checked_div(price), index)?;
            total_units = checked(total_units.checked_add(units), index)?;
            contributions += 1;
        }

        // 매수 여부와 관계없이 현재 종가로 평가
        let portfolio_value = checked(total_units.checked_mul(price), index)?;

        history.push(HistoryPoint {
            timestamp: candle.timestamp,
            total_invested,
            portfolio_value,
        });
    }

    let current_value = checked(total_units.checked_mul(last.close_price), candles.len() - 1)?;
    let summary = SimulationSummary::new(total_invested, current_value);

    debug!(
        total_invested = %summary.total_invested,
        current_value = %summary.current_value,
        contributions,
        "DCA simulation finished"
    );

    Ok(SimulationReport {
        summary,
        history,
        total_units,
        contributions,
    })
}

/// Decimal 범위를 벗어난 연산을 입력 에러로 변환합니다.
fn checked(value: Option<Decimal>, index: usize) -> DcaResult<Decimal> {
    value.ok_or_else(|| {
        DcaError::InvalidInput(format!("수치 범위를 벗어났습니다: index={}", index))
    })
}
