//! 설정 관리.
//!
//! 기본값 → TOML 파일(선택) → `DCA__` 접두사 환경 변수 순서로 병합합니다.
//! CLI 플래그는 이 위에 덮어씁니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 가격 소스(거래소) 설정
    #[serde(default)]
    pub exchange: ExchangeSettings,
    /// 시뮬레이션 기본값
    #[serde(default)]
    pub simulation: SimulationDefaults,
    /// 표시 설정
    #[serde(default)]
    pub presentation: PresentationConfig,
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    #[serde(default = "default_log_level")]
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}
fn default_log_format() -> String {
    "compact".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// 가격 소스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExchangeSettings {
    /// REST API 기본 URL
    #[serde(default = "default_rest_base_url")]
    pub rest_base_url: String,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// 최대 재시도 횟수
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// 첫 재시도 대기 시간 (밀리초)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_rest_base_url() -> String {
    "https://api.binance.com".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_max_retries() -> u32 {
    3
}
fn default_retry_delay_ms() -> u64 {
    500
}

impl Default for ExchangeSettings {
    fn default() -> Self {
        Self {
            rest_base_url: default_rest_base_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

/// 시뮬레이션 기본값 (CLI 플래그가 없을 때 사용).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationDefaults {
    /// 자산 심볼 (바이낸스 형식)
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// 회차당 투자 금액
    #[serde(default = "default_amount")]
    pub amount: Decimal,
    /// 매수 주기 (캔들 수)
    #[serde(default = "default_frequency")]
    pub frequency: usize,
    /// 요청할 캔들 수
    #[serde(default = "default_duration")]
    pub duration: u32,
    /// 캔들 간격
    #[serde(default = "default_interval")]
    pub interval: String,
}

fn default_symbol() -> String {
    "BTCUSDT".to_string()
}
fn default_amount() -> Decimal {
    Decimal::from(100)
}
fn default_frequency() -> usize {
    7
}
fn default_duration() -> u32 {
    365
}
fn default_interval() -> String {
    "1d".to_string()
}

impl Default for SimulationDefaults {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            amount: default_amount(),
            frequency: default_frequency(),
            duration: default_duration(),
            interval: default_interval(),
        }
    }
}

/// 표시 설정.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PresentationConfig {
    /// 통화 기호
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// 라벨 날짜 형식 (chrono strftime). 비어 있으면 타임프레임 기본값 사용
    #[serde(default)]
    pub label_format: Option<String>,
    /// 표시 소수점 자릿수
    #[serde(default = "default_decimals")]
    pub decimals: u32,
    /// 표 출력 시 최대 행 수 (0 = 전체)
    #[serde(default = "default_max_table_rows")]
    pub max_table_rows: usize,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}
fn default_decimals() -> u32 {
    2
}
fn default_max_table_rows() -> usize {
    30
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            label_format: None,
            decimals: default_decimals(),
            max_table_rows: default_max_table_rows(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// `required`가 false이면 파일이 없어도 기본값과 환경 변수로 진행합니다.
    pub fn load<P: AsRef<Path>>(path: P, required: bool) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(required))
            .add_source(
                config::Environment::with_prefix("DCA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 기본 경로에서 설정을 로드합니다 (파일은 선택).
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load(DEFAULT_CONFIG_PATH, false)
    }
}
