//! DCA 전략 매개변수.

use crate::error::{DcaError, DcaResult};
use crate::types::{DecimalExt, Price};
use serde::{Deserialize, Serialize};

/// 적립식 매수 전략 매개변수.
///
/// `contribution_frequency`는 캔들 인덱스 단위입니다. 일봉에서 주 1회 매수하려면 7을 사용합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyParams {
    /// 회차당 투자 금액 (> 0)
    pub contribution_amount: Price,
    /// 매수 주기 (>= 1)
    pub contribution_frequency: usize,
}

impl StrategyParams {
    /// 매개변수를 검증하여 생성합니다.
    pub fn new(contribution_amount: Price, contribution_frequency: usize) -> DcaResult<Self> {
        let params = Self {
            contribution_amount,
            contribution_frequency,
        };
        params.validate()?;
        Ok(params)
    }

    /// 매개변수 검증
    pub fn validate(&self) -> DcaResult<()> {
        if !self.contribution_amount.is_strictly_positive() {
            return Err(DcaError::InvalidInput(format!(
                "투자 금액은 0보다 커야 합니다: {}",
                self.contribution_amount
            )));
        }
        if self.contribution_frequency < 1 {
            return Err(DcaError::InvalidInput(
                "매수 주기는 1 이상이어야 합니다".to_string(),
            ));
        }
        Ok(())
    }

    /// 주어진 인덱스가 매수 회차인지 확인합니다.
    pub fn is_contribution_step(&self, index: usize) -> bool {
        index % self.contribution_frequency == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_params_validation() {
        assert!(StrategyParams::new(dec!(10), 1).is_ok());
        assert!(StrategyParams::new(dec!(0), 1).is_err());
        assert!(StrategyParams::new(dec!(-5), 1).is_err());
        assert!(StrategyParams::new(dec!(10), 0).is_err());
    }

    #[test]
    fn test_contribution_steps() {
        let params = StrategyParams::new(dec!(10), 3).unwrap();
        let steps: Vec<usize> = (0..8).filter(|i| params.is_contribution_step(*i)).collect();
        assert_eq!(steps, vec![0, 3, 6]);
    }
}
