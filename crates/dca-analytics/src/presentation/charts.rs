//! 차트 데이터 구조
//!
//! 두 개의 라인 시리즈(평가 금액, 누적 투자 금액)가 같은 X축을 공유합니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 평가 금액 시리즈 이름
pub const PORTFOLIO_VALUE_LABEL: &str = "Portfolio Value";

/// 누적 투자 금액 시리즈 이름
pub const TOTAL_INVESTED_LABEL: &str = "Total Invested";

/// 평가 금액 선 색상
pub const PORTFOLIO_VALUE_COLOR: &str = "#0ecb81";

/// 누적 투자 금액 선 색상
pub const TOTAL_INVESTED_COLOR: &str = "#F3BA2F";

/// 차트 데이터 포인트
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// X축 값 (타임스탬프, 밀리초)
    pub x: i64,

    /// Y축 값
    pub y: Decimal,

    /// 레이블 (선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ChartPoint {
    /// 레이블이 있는 차트 포인트를 생성합니다.
    pub fn with_label(timestamp_millis: i64, value: Decimal, label: impl Into<String>) -> Self {
        Self {
            x: timestamp_millis,
            y: value,
            label: Some(label.into()),
        }
    }
}

/// 이름이 붙은 라인 시리즈
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDataset {
    /// 시리즈 이름
    pub label: String,

    /// 선 색상
    pub border_color: String,

    /// 선 아래 영역 채우기
    pub fill: bool,

    /// 점선 여부
    pub dashed: bool,

    /// 데이터 포인트
    pub data: Vec<ChartPoint>,
}

impl ChartDataset {
    /// 평가 금액 시리즈 (채움, 실선)
    pub fn portfolio_value(data: Vec<ChartPoint>) -> Self {
        Self {
            label: PORTFOLIO_VALUE_LABEL.to_string(),
            border_color: PORTFOLIO_VALUE_COLOR.to_string(),
            fill: true,
            dashed: false,
            data,
        }
    }

    /// 누적 투자 금액 시리즈 (점선)
    pub fn total_invested(data: Vec<ChartPoint>) -> Self {
        Self {
            label: TOTAL_INVESTED_LABEL.to_string(),
            border_color: TOTAL_INVESTED_COLOR.to_string(),
            fill: false,
            dashed: true,
            data,
        }
    }

    /// 포인트 수
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// 비어 있는지 확인
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_chart_point_serialization() {
        let labeled = ChartPoint::with_label(1_704_067_200_000, dec!(10.5), "2024-01-01");
        let json = serde_json::to_value(&labeled).unwrap();

        assert_eq!(json["x"], 1_704_067_200_000i64);
        assert_eq!(json["label"], "2024-01-01");

        let unlabeled = ChartPoint {
            label: None,
            ..labeled
        };
        let json = serde_json::to_value(&unlabeled).unwrap();
        assert!(json.get("label").is_none());
    }

    #[test]
    fn test_dataset_styles() {
        let value = ChartDataset::portfolio_value(Vec::new());
        let invested = ChartDataset::total_invested(Vec::new());

        assert_eq!(value.label, "Portfolio Value");
        assert!(value.fill && !value.dashed);
        assert_eq!(invested.label, "Total Invested");
        assert!(invested.dashed && !invested.fill);
        assert!(value.is_empty());
    }
}
