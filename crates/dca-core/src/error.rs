//! DCA 시뮬레이터의 에러 타입.
//!
//! 시뮬레이션 엔진이 반환하는 유일한 에러는 [`DcaError::InvalidInput`]입니다.
//! 나머지 변형은 데이터 소스, 설정, 출력 등 주변 구성요소에서 사용합니다.

use thiserror::Error;

/// 핵심 DCA 에러.
#[derive(Debug, Error)]
pub enum DcaError {
    /// 잘못된 입력 (빈 캔들, 잘못된 전략 매개변수 등)
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 데이터 에러
    #[error("데이터 에러: {0}")]
    Data(String),

    /// 네트워크 에러
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 출력 에러
    #[error("출력 에러: {0}")]
    Render(String),
}

/// DCA 작업을 위한 Result 타입.
pub type DcaResult<T> = Result<T, DcaError>;

impl DcaError {
    /// 재시도 가능한 에러인지 확인합니다.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DcaError::Network(_))
    }

    /// 입력 검증 실패인지 확인합니다.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, DcaError::InvalidInput(_))
    }
}

impl From<serde_json::Error> for DcaError {
    fn from(err: serde_json::Error) -> Self {
        DcaError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for DcaError {
    fn from(err: std::io::Error) -> Self {
        DcaError::Render(err.to_string())
    }
}

impl From<config::ConfigError> for DcaError {
    fn from(err: config::ConfigError) -> Self {
        DcaError::Config(err.to_string())
    }
}
