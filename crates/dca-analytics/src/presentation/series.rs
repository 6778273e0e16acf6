//! 시뮬레이션 결과 → 표시용 시리즈 변환.
//!
//! 라벨, 누적 투자 금액, 평가 금액 세 시퀀스는 항상 길이가 같습니다.
//! 숫자 시퀀스는 표시 자릿수로 반올림한 사본이며 원본 이력은 변경하지 않습니다.

use super::charts::{ChartDataset, ChartPoint};
use super::format::{
    display_round, format_currency, format_label, format_percent, Tone, DEFAULT_LABEL_FORMAT,
    NOT_AVAILABLE,
};
use dca_core::{HistoryPoint, PresentationConfig, SimulationReport, SimulationSummary};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 포맷팅된 요약 문자열.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedSummary {
    /// 총 투자 금액 (예: `$1,234.50`)
    pub total_invested: String,
    /// 현재 평가 금액
    pub current_value: String,
    /// 손익
    pub profit_loss: String,
    /// 수익률 (예: `17.75%`, 미정의 시 `N/A`)
    pub roi: String,
    /// 손익 톤
    pub profit_tone: Tone,
    /// 수익률 톤
    pub roi_tone: Tone,
}

impl FormattedSummary {
    /// 요약 통계를 포맷팅합니다.
    ///
    /// 톤은 표시되는 반올림 값 기준입니다 (`$0.00`은 항상 `Positive`).
    pub fn from_summary(summary: &SimulationSummary, config: &PresentationConfig) -> Self {
        let symbol = config.currency_symbol.as_str();
        let decimals = config.decimals;
        let profit_loss = display_round(summary.profit_loss, decimals);
        let roi = summary.roi.map(|roi| display_round(roi, decimals));

        Self {
            total_invested: format_currency(summary.total_invested, symbol, decimals),
            current_value: format_currency(summary.current_value, symbol, decimals),
            profit_loss: format_currency(summary.profit_loss, symbol, decimals),
            roi: format_percent(summary.roi, decimals),
            profit_tone: Tone::of(profit_loss),
            roi_tone: Tone::of_optional(roi),
        }
    }
}

/// 차트/표 출력에 바로 사용할 수 있는 시리즈.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderableSeries {
    /// 제목 (예: `BTC/USDT`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// 포맷팅된 타임스탬프 라벨
    pub labels: Vec<String>,
    /// 타임스탬프 (밀리초)
    pub timestamps: Vec<i64>,
    /// 누적 투자 금액 (표시 자릿수로 반올림)
    pub invested: Vec<Decimal>,
    /// 평가 금액 (표시 자릿수로 반올림)
    pub portfolio_value: Vec<Decimal>,
    /// 포맷팅된 요약
    pub summary: FormattedSummary,
    /// 평균 매입 단가 (보유 수량을 알 때만)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_cost: Option<String>,
    /// 반올림하지 않은 요약 통계
    pub raw_summary: SimulationSummary,
}

impl RenderableSeries {
    /// 시뮬레이션 결과로부터 시리즈를 생성합니다.
    pub fn from_report(report: &SimulationReport, config: &PresentationConfig) -> Self {
        let mut series = to_presentation(&report.summary, &report.history, config);
        series.average_cost = Some(match report.average_cost() {
            Some(cost) => format_currency(cost, &config.currency_symbol, config.decimals),
            None => NOT_AVAILABLE.to_string(),
        });
        series
    }

    /// 제목을 설정합니다.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// 포인트 수
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// 비어 있는지 확인
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// 차트용 데이터셋 (평가 금액, 누적 투자 금액 순).
    pub fn datasets(&self) -> Vec<ChartDataset> {
        let points = |values: &[Decimal]| -> Vec<ChartPoint> {
            self.timestamps
                .iter()
                .zip(values)
                .zip(&self.labels)
                .map(|((x, y), label)| ChartPoint::with_label(*x, *y, label.clone()))
                .collect()
        };

        vec![
            ChartDataset::portfolio_value(points(&self.portfolio_value)),
            ChartDataset::total_invested(points(&self.invested)),
        ]
    }
}

/// 요약과 이력을 표시용 시리즈로 변환합니다.
pub fn to_presentation(
    summary: &SimulationSummary,
    history: &[HistoryPoint],
    config: &PresentationConfig,
) -> RenderableSeries {
    let label_format = config
        .label_format
        .as_deref()
        .unwrap_or(DEFAULT_LABEL_FORMAT);
    let decimals = config.decimals;

    let mut labels = Vec::with_capacity(history.len());
    let mut timestamps = Vec::with_capacity(history.len());
    let mut invested = Vec::with_capacity(history.len());
    let mut portfolio_value = Vec::with_capacity(history.len());

    for point in history {
        labels.push(format_label(point.timestamp, label_format));
        timestamps.push(point.timestamp.timestamp_millis());
        invested.push(display_value(point.total_invested, decimals));
        portfolio_value.push(display_value(point.portfolio_value, decimals));
    }

    RenderableSeries {
        title: None,
        labels,
        timestamps,
        invested,
        portfolio_value,
        summary: FormattedSummary::from_summary(summary, config),
        average_cost: None,
        raw_summary: *summary,
    }
}

/// 표시 자릿수로 반올림하고 소수점 자릿수를 고정합니다 (10 -> 10.00).
fn display_value(value: Decimal, decimals: u32) -> Decimal {
    let mut rounded = display_round(value, decimals);
    rounded.rescale(decimals);
    rounded
}
