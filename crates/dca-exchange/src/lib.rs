//! 과거 가격 데이터 소스.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - KlineSource trait: 통합 캔들 조회 인터페이스
//! - Binance 공개 시세 커넥터 (페이지 단위 조회)
//! - CSV 파일 소스 (오프라인 실행용)
//! - 경계 검증: Kline → 시뮬레이션 캔들
//! - 재시도: 지수 백오프

pub mod connector;
pub mod csv;
pub mod error;
pub mod retry;
pub mod traits;
pub mod validation;

pub use connector::{BinanceClient, BinanceConfig, MAX_KLINES_PER_REQUEST};
pub use csv::{parse_csv, CsvKlineSource};
pub use error::*;
pub use retry::{with_retry, RetryConfig};
pub use traits::*;
pub use validation::to_candles;
