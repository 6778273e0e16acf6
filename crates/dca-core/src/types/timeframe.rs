//! 캔들스틱 데이터를 위한 타임프레임 정의.
//!
//! DCA 주기는 캔들 인덱스 단위이므로, 타임프레임은 데이터 요청과
//! 라벨 표시 형식에만 영향을 줍니다.

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// 캔들스틱 타임프레임.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    /// 1분봉
    M1,
    /// 5분봉
    M5,
    /// 15분봉
    M15,
    /// 30분봉
    M30,
    /// 1시간봉
    H1,
    /// 4시간봉
    H4,
    /// 12시간봉
    H12,
    /// 일봉
    D1,
    /// 3일봉
    D3,
    /// 주봉
    W1,
    /// 월봉
    MN1,
}

impl Timeframe {
    /// 지원하는 모든 타임프레임.
    pub const ALL: [Timeframe; 11] = [
        Timeframe::M1,
        Timeframe::M5,
        Timeframe::M15,
        Timeframe::M30,
        Timeframe::H1,
        Timeframe::H4,
        Timeframe::H12,
        Timeframe::D1,
        Timeframe::D3,
        Timeframe::W1,
        Timeframe::MN1,
    ];

    /// 이 타임프레임의 기간을 반환합니다.
    pub fn duration(&self) -> Duration {
        match self {
            Timeframe::M1 => Duration::from_secs(60),
            Timeframe::M5 => Duration::from_secs(5 * 60),
            Timeframe::M15 => Duration::from_secs(15 * 60),
            Timeframe::M30 => Duration::from_secs(30 * 60),
            Timeframe::H1 => Duration::from_secs(60 * 60),
            Timeframe::H4 => Duration::from_secs(4 * 60 * 60),
            Timeframe::H12 => Duration::from_secs(12 * 60 * 60),
            Timeframe::D1 => Duration::from_secs(24 * 60 * 60),
            Timeframe::D3 => Duration::from_secs(3 * 24 * 60 * 60),
            Timeframe::W1 => Duration::from_secs(7 * 24 * 60 * 60),
            Timeframe::MN1 => Duration::from_secs(30 * 24 * 60 * 60), // 근사값
        }
    }

    /// 이 타임프레임의 밀리초 단위 값을 반환합니다.
    pub fn as_millis(&self) -> i64 {
        self.duration().as_millis() as i64
    }

    /// 캔들 길이가 고정인지 확인합니다. 월봉은 달마다 길이가 다릅니다.
    pub fn is_fixed_length(&self) -> bool {
        !matches!(self, Timeframe::MN1)
    }

    /// 시작 시각으로부터 캔들 종료 시각(다음 캔들 시작 1ms 전)을 계산합니다.
    pub fn close_time(&self, open_time: DateTime<Utc>) -> DateTime<Utc> {
        let next = match self {
            Timeframe::MN1 => open_time.checked_add_months(Months::new(1)),
            _ => None,
        };
        next.unwrap_or_else(|| open_time + chrono::Duration::milliseconds(self.as_millis()))
            - chrono::Duration::milliseconds(1)
    }

    /// 일봉 미만인지 확인합니다 (라벨에 시각 표시 필요).
    pub fn is_intraday(&self) -> bool {
        self.duration() < Duration::from_secs(24 * 60 * 60)
    }

    /// 차트 라벨의 기본 날짜 형식을 반환합니다.
    pub fn default_label_format(&self) -> &'static str {
        if self.is_intraday() {
            "%Y-%m-%d %H:%M"
        } else {
            "%Y-%m-%d"
        }
    }

    /// 바이낸스 간격 문자열로 변환합니다.
    pub fn to_binance_interval(&self) -> &'static str {
        match self {
            Timeframe::M1 => "1m",
            Timeframe::M5 => "5m",
            Timeframe::M15 => "15m",
            Timeframe::M30 => "30m",
            Timeframe::H1 => "1h",
            Timeframe::H4 => "4h",
            Timeframe::H12 => "12h",
            Timeframe::D1 => "1d",
            Timeframe::D3 => "3d",
            Timeframe::W1 => "1w",
            Timeframe::MN1 => "1M",
        }
    }

    /// 바이낸스 간격 문자열에서 파싱합니다.
    pub fn from_binance_interval(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|tf| tf.to_binance_interval() == s)
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_binance_interval())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_binance_interval(s).ok_or_else(|| format!("Invalid timeframe: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe_duration() {
        assert_eq!(Timeframe::M1.duration().as_secs(), 60);
        assert_eq!(Timeframe::H1.as_millis(), 3_600_000);
        assert_eq!(Timeframe::D1.duration().as_secs(), 86400);
    }

    #[test]
    fn test_timeframe_binance() {
        assert_eq!(Timeframe::M15.to_binance_interval(), "15m");
        assert_eq!(Timeframe::from_binance_interval("4h"), Some(Timeframe::H4));
        assert_eq!(Timeframe::from_binance_interval("1M"), Some(Timeframe::MN1));
        assert!("2d".parse::<Timeframe>().is_err());
    }

    #[test]
    fn test_close_time() {
        use chrono::TimeZone;

        let jan = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let feb = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let mar = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let one_ms = chrono::Duration::milliseconds(1);

        assert_eq!(Timeframe::MN1.close_time(jan), feb - one_ms);
        assert_eq!(Timeframe::MN1.close_time(feb), mar - one_ms);
        assert_eq!(
            Timeframe::D1.close_time(jan),
            jan + chrono::Duration::days(1) - one_ms
        );
        assert!(!Timeframe::MN1.is_fixed_length());
        assert!(Timeframe::W1.is_fixed_length());
    }

    #[test]
    fn test_label_format() {
        assert_eq!(Timeframe::D1.default_label_format(), "%Y-%m-%d");
        assert_eq!(Timeframe::H4.default_label_format(), "%Y-%m-%d %H:%M");
        assert!(!Timeframe::W1.is_intraday());
    }
}
