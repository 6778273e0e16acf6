//! 지원 캔들 간격 목록.

use dca_core::Timeframe;

/// 지원하는 캔들 간격을 표 형식 문자열로 반환합니다.
pub fn format_intervals() -> String {
    let mut output = String::new();

    output.push_str(&format!("{:<10} {:<10} {}\n", "INTERVAL", "INTRADAY", "LABEL FORMAT"));
    output.push_str(&"-".repeat(40));
    output.push('\n');

    for tf in Timeframe::ALL {
        output.push_str(&format!(
            "{:<10} {:<10} {}\n",
            tf.to_binance_interval(),
            if tf.is_intraday() { "yes" } else { "no" },
            tf.default_label_format()
        ));
    }

    output
}
