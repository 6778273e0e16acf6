//! 표시용 숫자/날짜 포맷팅.
//!
//! 모든 반올림은 0.5를 0에서 먼 쪽으로 올립니다. 원본 값은 변경하지 않습니다.

use chrono::{DateTime, Utc};
use dca_core::DecimalExt;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use tracing::warn;

/// 라벨 형식이 지정되지 않았을 때 사용하는 기본 형식.
pub const DEFAULT_LABEL_FORMAT: &str = "%Y-%m-%d";

/// 미정의 값 표시 문자열.
pub const NOT_AVAILABLE: &str = "N/A";

/// 값의 부호에 따른 표시 톤 (수익/손실 색상).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// 0 이상
    Positive,
    /// 0 미만
    Negative,
    /// 정의되지 않음
    Neutral,
}

impl Tone {
    /// 값의 부호로 톤을 결정합니다.
    pub fn of(value: Decimal) -> Self {
        if value >= Decimal::ZERO {
            Tone::Positive
        } else {
            Tone::Negative
        }
    }

    /// 선택적 값의 톤. `None`이면 `Neutral`.
    pub fn of_optional(value: Option<Decimal>) -> Self {
        value.map(Self::of).unwrap_or(Tone::Neutral)
    }
}

/// 통화 형식으로 변환합니다.
///
/// 천 단위 구분자를 넣고, 음수는 부호를 통화 기호 앞에 붙입니다 (`-$1,234.50`).
pub fn format_currency(value: Decimal, symbol: &str, decimals: u32) -> String {
    let rounded = display_round(value, decimals);
    let digits = format!("{:.*}", decimals as usize, rounded.abs());

    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut output = String::with_capacity(digits.len() + symbol.len() + 4);
    if rounded.is_sign_negative() {
        output.push('-');
    }
    output.push_str(symbol);
    output.push_str(&group_thousands(integer));
    if let Some(fraction) = fraction {
        output.push('.');
        output.push_str(fraction);
    }
    output
}

/// 퍼센트 형식으로 변환합니다 (`17.75%`). `None`은 `N/A`.
pub fn format_percent(value: Option<Decimal>, decimals: u32) -> String {
    match value {
        Some(value) => format!("{:.*}%", decimals as usize, display_round(value, decimals)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// 타임스탬프를 라벨 문자열로 변환합니다.
///
/// 형식 문자열이 잘못되었으면 RFC 3339로 대체합니다.
pub fn format_label(timestamp: DateTime<Utc>, format: &str) -> String {
    let mut label = String::new();
    if write!(label, "{}", timestamp.format(format)).is_err() {
        warn!(format, "Invalid label format, falling back to RFC 3339");
        return timestamp.to_rfc3339();
    }
    label
}

/// 표시용 반올림. 반올림 결과가 0이면 부호를 제거합니다.
pub(crate) fn display_round(value: Decimal, decimals: u32) -> Decimal {
    let rounded = value.round_half_up(decimals);
    if rounded.is_zero() {
        rounded.abs()
    } else {
        rounded
    }
}

fn group_thousands(integer: &str) -> String {
    let len = integer.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
