//! 표시 어댑터
//!
//! 시뮬레이션 결과를 차트, 표, JSON, CSV 출력 형태로 변환합니다.
//! 통화/퍼센트/날짜 포맷팅과 반올림은 모두 이 모듈에서 처리합니다.

pub mod charts;
pub mod format;
pub mod render;
pub mod series;

pub use charts::{ChartDataset, ChartPoint};
pub use format::{format_currency, format_label, format_percent, Tone};
pub use render::{CsvRenderer, JsonRenderer, Renderer, TableRenderer};
pub use series::{to_presentation, FormattedSummary, RenderableSeries};
