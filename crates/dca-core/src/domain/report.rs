//! 시뮬레이션 결과 타입.
//!
//! 모든 값은 반올림되지 않은 원본 값입니다. 표시용 반올림은 표현 계층이 담당합니다.

use crate::types::{Percentage, Price};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// 캔들별 투자 이력.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// 캔들 시각
    pub timestamp: DateTime<Utc>,
    /// 누적 투자 금액 (단조 증가)
    pub total_invested: Price,
    /// 해당 캔들 종가 기준 평가 금액
    pub portfolio_value: Price,
}

/// 시뮬레이션 요약 통계.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// 총 투자 금액
    pub total_invested: Price,
    /// 현재 평가 금액
    pub current_value: Price,
    /// 손익 (current_value - total_invested)
    pub profit_loss: Price,
    /// 수익률 (%). 투자 금액이 0이면 정의되지 않음 (`None`)
    pub roi: Option<Percentage>,
}

impl SimulationSummary {
    /// 투자 금액과 평가 금액으로 요약을 계산합니다.
    pub fn new(total_invested: Price, current_value: Price) -> Self {
        let profit_loss = current_value - total_invested;
        let roi = if total_invested.is_zero() {
            None
        } else {
            Some(profit_loss / total_invested * dec!(100))
        };

        Self {
            total_invested,
            current_value,
            profit_loss,
            roi,
        }
    }

    /// 수익 구간인지 확인합니다 (손익 0 포함).
    pub fn is_profitable(&self) -> bool {
        self.profit_loss >= Decimal::ZERO
    }
}

/// 시뮬레이션 결과 (요약 + 이력).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// 요약 통계
    pub summary: SimulationSummary,
    /// 캔들별 이력 (입력 순서와 동일)
    pub history: Vec<HistoryPoint>,
    /// 보유 수량 합계
    pub total_units: Decimal,
    /// 매수 횟수
    pub contributions: usize,
}

impl SimulationReport {
    /// 최종 보유 수량을 반환합니다.
    pub fn final_units(&self) -> Decimal {
        self.total_units
    }

    /// 매수 횟수를 반환합니다.
    pub fn contribution_count(&self) -> usize {
        self.contributions
    }

    /// 평균 매입 단가를 반환합니다.
    pub fn average_cost(&self) -> Option<Price> {
        if self.total_units.is_zero() {
            None
        } else {
            Some(self.summary.total_invested / self.total_units)
        }
    }

    /// 시뮬레이션 기간 (첫 캔들 ~ 마지막 캔들).
    pub fn period(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match (self.history.first(), self.history.last()) {
            (Some(first), Some(last)) => Some((first.timestamp, last.timestamp)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_calculation() {
        let summary = SimulationSummary::new(dec!(50), dec!(60));
        assert_eq!(summary.profit_loss, dec!(10));
        assert_eq!(summary.roi, Some(dec!(20)));
        assert!(summary.is_profitable());
    }

    #[test]
    fn test_summary_zero_invested_has_undefined_roi() {
        let summary = SimulationSummary::new(Decimal::ZERO, Decimal::ZERO);
        assert_eq!(summary.profit_loss, Decimal::ZERO);
        assert!(summary.roi.is_none());
    }

    #[test]
    fn test_summary_serializes_null_roi() {
        let summary = SimulationSummary::new(Decimal::ZERO, Decimal::ZERO);
        let json = serde_json::to_value(summary).unwrap();
        assert!(json["roi"].is_null());
    }

    #[test]
    fn test_average_cost() {
        let report = SimulationReport {
            summary: SimulationSummary::new(dec!(30), dec!(36)),
            history: Vec::new(),
            total_units: dec!(0.3),
            contributions: 3,
        };
        assert_eq!(report.average_cost(), Some(dec!(100)));
        assert!(report.period().is_none());
    }
}
