//! DCA 시뮬레이션 모듈
//!
//! 정해진 캔들 주기마다 고정 금액을 매수하고, 매 캔들 종가로 평가합니다.
//!
//! # 주요 구성요소
//!
//! - [`simulate`]: 시뮬레이션 함수
//! - [`DcaEngine`]: 검증된 매개변수를 보관하는 엔진

pub mod engine;

pub use engine::{simulate, DcaEngine};
