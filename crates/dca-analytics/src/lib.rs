//! DCA 시뮬레이션 및 표시 어댑터.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - [`simulation`]: 가격 시계열 + 전략 → 이력 + 요약 (순수 함수)
//! - [`presentation`]: 시뮬레이션 결과를 차트/표/JSON 출력 형태로 변환
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! use dca_analytics::{simulate, RenderableSeries};
//! use dca_core::{PresentationConfig, StrategyParams};
//! use rust_decimal_macros::dec;
//!
//! let params = StrategyParams::new(dec!(100), 7)?;
//! let report = simulate(&candles, &params)?;
//! let series = RenderableSeries::from_report(&report, &PresentationConfig::default());
//! println!("ROI: {}", series.summary.roi);
//! ```

pub mod presentation;
pub mod simulation;

// Simulation 모듈 re-exports
pub use simulation::{simulate, DcaEngine};

// Presentation 모듈 re-exports
pub use presentation::{
    format_currency, format_percent, to_presentation, ChartDataset, ChartPoint, CsvRenderer,
    FormattedSummary, JsonRenderer, RenderableSeries, Renderer, TableRenderer, Tone,
};
