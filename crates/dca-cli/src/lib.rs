//! DCA 시뮬레이터 CLI.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - `simulate`: 과거 가격으로 적립식 투자 시뮬레이션
//! - `intervals`: 지원 캔들 간격 목록

pub mod commands;
