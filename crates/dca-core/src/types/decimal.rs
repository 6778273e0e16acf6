//! 정밀한 금융 계산을 위한 Decimal 유틸리티.
//!
//! 엔진 내부에서는 반올림하지 않습니다. 반올림은 표시 단계에서만 사용합니다.

use rust_decimal::{Decimal, RoundingStrategy};

/// 금융 정밀도를 위한 가격 타입.
pub type Price = Decimal;

/// 보유 수량을 위한 타입.
pub type Quantity = Decimal;

/// 퍼센트 타입 (11.36 = 11.36%).
pub type Percentage = Decimal;

/// Decimal 연산을 위한 확장 트레이트.
pub trait DecimalExt {
    /// 0보다 큰지 확인합니다.
    fn is_strictly_positive(&self) -> bool;

    /// 지정된 소수점 자릿수로 반올림합니다 (0.5는 0에서 먼 쪽으로).
    fn round_half_up(&self, dp: u32) -> Decimal;
}

impl DecimalExt for Decimal {
    fn is_strictly_positive(&self) -> bool {
        *self > Decimal::ZERO
    }

    fn round_half_up(&self, dp: u32) -> Decimal {
        self.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
    }
}
