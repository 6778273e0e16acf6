//! DCA 시뮬레이션 명령어.
//!
//! 과거 가격 데이터를 가져와 적립식 투자 결과를 계산하고 출력합니다.
//!
//! # 사용 예시
//!
//! ```bash
//! # BTC 1년간 매주 100 USDT 매수
//! dca simulate -s BTCUSDT -a 100 -f 7 -d 365
//!
//! # 4시간봉, 하루 한 번 매수, JSON 출력
//! dca simulate -s ETHUSDT -a 50 -f 6 -d 720 -i 4h --format json
//!
//! # 로컬 CSV 파일로 오프라인 실행
//! dca simulate --input data/btcusdt_1d.csv -a 100 -f 1 --format csv -o result.csv
//! ```

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use dca_analytics::{
    simulate, CsvRenderer, JsonRenderer, RenderableSeries, Renderer, TableRenderer,
};
use dca_core::{
    AppConfig, Candle, PresentationConfig, SimulationReport, StrategyParams, Symbol, Timeframe,
};
use dca_exchange::{
    to_candles, with_retry, BinanceClient, BinanceConfig, CsvKlineSource, KlineSource,
    RetryConfig,
};

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(anyhow!("Invalid format: {}. Use: table, csv, json", s)),
        }
    }
}

/// `simulate` 명령 인자.
///
/// 지정하지 않은 값은 설정 파일의 `[simulation]` 기본값을 사용합니다.
#[derive(Debug, Clone, Default, Args)]
pub struct SimulateArgs {
    /// 자산 심볼 (예: BTCUSDT, ETH/USDT)
    #[arg(short, long)]
    pub symbol: Option<String>,

    /// 회차당 투자 금액 (호가 자산 단위)
    #[arg(short, long)]
    pub amount: Option<Decimal>,

    /// 매수 주기 (캔들 수, 1 = 매 캔들)
    #[arg(short, long)]
    pub frequency: Option<usize>,

    /// 조회할 캔들 수
    #[arg(short, long)]
    pub duration: Option<u32>,

    /// 캔들 간격 (1m, 5m, 15m, 30m, 1h, 4h, 12h, 1d, 3d, 1w, 1M)
    #[arg(short, long)]
    pub interval: Option<String>,

    /// 가격 CSV 파일 (지정 시 Binance 대신 사용)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// 출력 형식 (table, csv, json)
    #[arg(long, default_value = "table")]
    pub format: String,

    /// 출력 파일 경로 (지정하지 않으면 stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 표 출력 최대 행 수 (0 = 전체)
    #[arg(long)]
    pub max_rows: Option<usize>,
}

/// 시뮬레이션 CLI 설정 (인자 + 설정 파일 병합 결과).
#[derive(Debug, Clone)]
pub struct SimulateCliConfig {
    /// 자산 심볼
    pub symbol: Symbol,
    /// 전략 매개변수
    pub params: StrategyParams,
    /// 조회할 캔들 수
    pub duration: usize,
    /// 캔들 간격
    pub timeframe: Timeframe,
    /// CSV 입력 파일
    pub input: Option<PathBuf>,
    /// 출력 형식
    pub format: OutputFormat,
    /// 출력 파일
    pub output: Option<PathBuf>,
    /// 표시 설정
    pub presentation: PresentationConfig,
    /// Binance 설정
    pub binance: BinanceConfig,
    /// 재시도 설정
    pub retry: RetryConfig,
}

impl SimulateCliConfig {
    /// 명령 인자와 애플리케이션 설정을 병합합니다.
    pub fn resolve(args: SimulateArgs, app: &AppConfig) -> Result<Self> {
        let defaults = &app.simulation;

        let symbol_str = args.symbol.unwrap_or_else(|| defaults.symbol.clone());
        let symbol: Symbol = symbol_str.parse().map_err(|e: String| anyhow!(e))?;

        let interval = args.interval.unwrap_or_else(|| defaults.interval.clone());
        let timeframe: Timeframe = interval.parse().map_err(|e: String| {
            anyhow!("{}. Run `dca intervals` to list supported intervals", e)
        })?;

        let amount = args.amount.unwrap_or(defaults.amount);
        let frequency = args.frequency.unwrap_or(defaults.frequency);
        let params = StrategyParams::new(amount, frequency)?;

        let duration = args.duration.unwrap_or(defaults.duration) as usize;
        if duration == 0 {
            bail!("Duration must be at least 1 candle");
        }

        let mut presentation = app.presentation.clone();
        if presentation.label_format.is_none() {
            presentation.label_format = Some(timeframe.default_label_format().to_string());
        }
        if let Some(max_rows) = args.max_rows {
            presentation.max_table_rows = max_rows;
        }

        Ok(Self {
            symbol,
            params,
            duration,
            timeframe,
            input: args.input,
            format: OutputFormat::parse(&args.format)?,
            output: args.output,
            presentation,
            binance: BinanceConfig::from_settings(&app.exchange),
            retry: RetryConfig::from_settings(&app.exchange),
        })
    }
}

/// 시뮬레이션을 실행하고 결과를 출력합니다.
pub async fn run_simulate(config: SimulateCliConfig) -> Result<SimulationReport> {
    let source: Box<dyn KlineSource> = match &config.input {
        Some(path) => Box::new(CsvKlineSource::new(path.clone())),
        None => Box::new(BinanceClient::new(config.binance.clone())?),
    };

    let candles = load_candles(source.as_ref(), &config).await?;

    let report = simulate(&candles, &config.params)?;
    info!(
        symbol = %config.symbol,
        candles = candles.len(),
        contributions = report.contribution_count(),
        "Simulation completed"
    );
    if let Some((start, end)) = report.period() {
        debug!(start = %start, end = %end, "Simulated period");
    }

    let series = RenderableSeries::from_report(&report, &config.presentation)
        .with_title(title_for(&config));

    let writer = open_output(config.output.as_ref())?;
    render(&series, config.format, config.presentation.max_table_rows, writer)?;

    if let Some(path) = &config.output {
        info!("Output written to: {}", path.display());
    }

    Ok(report)
}

/// 가격 소스에서 캔들을 조회하고 검증합니다.
pub async fn load_candles(
    source: &dyn KlineSource,
    config: &SimulateCliConfig,
) -> Result<Vec<Candle>> {
    info!(
        source = source.name(),
        symbol = %config.symbol,
        interval = %config.timeframe,
        limit = config.duration,
        "Fetching price history"
    );

    let klines = with_retry(&config.retry, "fetch_klines", || {
        source.fetch_klines(&config.symbol, config.timeframe, config.duration)
    })
    .await
    .with_context(|| format!("Failed to fetch price history from {}", source.name()))?;

    debug!(klines = klines.len(), "Received klines");

    let candles = to_candles(&klines)?;
    Ok(candles)
}

/// 지정한 형식으로 시리즈를 출력합니다.
pub fn render<W: Write>(
    series: &RenderableSeries,
    format: OutputFormat,
    max_rows: usize,
    writer: W,
) -> Result<()> {
    match format {
        OutputFormat::Table => TableRenderer::new(writer, max_rows).render(series)?,
        OutputFormat::Csv => CsvRenderer::new(writer).render(series)?,
        OutputFormat::Json => JsonRenderer::new(writer).render(series)?,
    }
    Ok(())
}

/// 출력 대상 (파일 또는 stdout).
fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// 출력 제목 (예: "BTC/USDT · 1d · 100 every 7 candles").
fn title_for(config: &SimulateCliConfig) -> String {
    format!(
        "{} · {} · {} every {} candle{}",
        config.symbol,
        config.timeframe,
        config.params.contribution_amount,
        config.params.contribution_frequency,
        if config.params.contribution_frequency == 1 { "" } else { "s" }
    )
}
