//! 지수 백오프 재시도.
//!
//! 재시도 가능한 [`ExchangeError`]에 한해 작업을 다시 실행합니다.
//! 대기 시간은 `initial_delay_ms * multiplier^attempt`이며 `max_delay_ms`를 넘지 않습니다.
//! 에러가 권장 대기 시간을 제공하면 (예: 요청 한도 초과) 둘 중 큰 값을 사용합니다.

use crate::traits::ExchangeResult;
use dca_core::ExchangeSettings;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// 재시도 설정.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// 최대 재시도 횟수 (최초 시도 제외)
    pub max_retries: u32,
    /// 첫 재시도 대기 시간 (밀리초)
    pub initial_delay_ms: u64,
    /// 최대 대기 시간 (밀리초)
    pub max_delay_ms: u64,
    /// 백오프 배수
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 500,
            max_delay_ms: 30_000,
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// 애플리케이션 설정에서 생성.
    pub fn from_settings(settings: &ExchangeSettings) -> Self {
        Self {
            max_retries: settings.max_retries,
            initial_delay_ms: settings.retry_delay_ms,
            ..Self::default()
        }
    }

    /// 재시도하지 않는 설정.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// n번째 재시도(0부터) 전 대기 시간.
    pub fn delay_for_attempt(&self, attempt: u32, hint_ms: Option<u64>) -> Duration {
        let backoff =
            self.initial_delay_ms as f64 * self.backoff_multiplier.powi(attempt as i32);
        let backoff = if backoff.is_finite() {
            backoff.min(self.max_delay_ms as f64) as u64
        } else {
            self.max_delay_ms
        };
        let delay = hint_ms.map_or(backoff, |hint| hint.max(backoff));
        Duration::from_millis(delay.min(self.max_delay_ms))
    }
}

/// 재시도 가능한 에러가 나면 백오프하며 작업을 반복합니다.
///
/// 재시도할 수 없는 에러이거나 재시도 횟수를 모두 사용하면 마지막 에러를 반환합니다.
pub async fn with_retry<T, F, Fut>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
) -> ExchangeResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ExchangeResult<T>>,
{
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    debug!(operation = operation_name, attempt, "Operation succeeded after retry");
                }
                return Ok(value);
            }
            Err(err) if err.is_retryable() && attempt < config.max_retries => {
                let delay = config.delay_for_attempt(attempt, err.retry_delay_ms());
                attempt += 1;
                warn!(
                    operation = operation_name,
                    attempt,
                    max_retries = config.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Retrying after error"
                );
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}
