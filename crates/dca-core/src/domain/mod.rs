//! DCA 시뮬레이션을 위한 도메인 모델.

mod market_data;
mod report;
mod strategy;

pub use market_data::*;
pub use report::*;
pub use strategy::*;
