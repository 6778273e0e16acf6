//! 거래 심볼 정의.
//!
//! 바이낸스 형식(`BTCUSDT`)과 표준 형식(`BTC/USDT`) 사이를 변환합니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 바이낸스 심볼 분리에 사용하는 호가 자산 목록 (긴 것부터 검사).
const KNOWN_QUOTES: [&str; 8] = ["FDUSD", "USDT", "USDC", "BUSD", "TUSD", "BTC", "ETH", "BNB"];

/// 기준 자산과 호가 자산으로 구성된 거래 심볼.
///
/// 예: BTC/USDT 는 USDT로 BTC를 매수하는 현물 시장입니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    /// 기준 자산 (예: BTC)
    pub base: String,
    /// 호가 자산 (예: USDT)
    pub quote: String,
}

impl Symbol {
    /// 새 심볼을 생성합니다.
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into().to_uppercase(),
            quote: quote.into().to_uppercase(),
        }
    }

    /// 바이낸스 심볼 문자열(`BTCUSDT`)에서 파싱합니다.
    ///
    /// 알려진 호가 자산으로 끝나지 않으면 `None`을 반환합니다.
    pub fn from_exchange_symbol(s: &str) -> Option<Self> {
        let upper = s.trim().to_uppercase();
        KNOWN_QUOTES.iter().find_map(|quote| {
            upper
                .strip_suffix(quote)
                .filter(|base| !base.is_empty())
                .map(|base| Self::new(base, *quote))
        })
    }

    /// 바이낸스 심볼 문자열을 반환합니다 (예: "BTCUSDT").
    pub fn to_exchange_symbol(&self) -> String {
        format!("{}{}", self.base, self.quote)
    }

    /// 호가 자산이 달러 연동 스테이블코인인지 확인합니다.
    pub fn is_usd_quoted(&self) -> bool {
        matches!(
            self.quote.as_str(),
            "USDT" | "USDC" | "BUSD" | "TUSD" | "FDUSD" | "USD"
        )
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl FromStr for Symbol {
    type Err = String;

    /// "BTC/USDT" 또는 "BTCUSDT" 형식을 모두 받습니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((base, quote)) = s.split_once('/') {
            if base.is_empty() || quote.is_empty() {
                return Err(format!("Invalid symbol: {}", s));
            }
            return Ok(Self::new(base.trim(), quote.trim()));
        }
        Self::from_exchange_symbol(s).ok_or_else(|| format!("Invalid symbol: {}", s))
    }
}
