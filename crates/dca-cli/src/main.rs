//! DCA 시뮬레이터 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 기본값 (BTCUSDT, 100 USDT, 7일마다, 365일)
//! dca simulate
//!
//! # ETH 2년간 매일 10 USDT
//! dca simulate -s ETHUSDT -a 10 -f 1 -d 730
//!
//! # 결과를 JSON 파일로 저장
//! dca simulate -s SOLUSDT --format json -o sol.json
//!
//! # 지원 간격 보기
//! dca intervals
//! ```

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use dca_cli::commands::intervals::format_intervals;
use dca_cli::commands::simulate::{run_simulate, SimulateArgs, SimulateCliConfig};
use dca_core::{init_logging, AppConfig, LogConfig, DEFAULT_CONFIG_PATH};

#[derive(Parser)]
#[command(name = "dca")]
#[command(about = "DCA simulator - 과거 시세 기반 적립식 투자 시뮬레이션", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 로그 레벨 (예: info, debug, dca_exchange=trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 적립식 투자 시뮬레이션 실행
    Simulate(SimulateArgs),

    /// 지원하는 캔들 간격 목록
    Intervals,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // 설정 파일을 명시하면 반드시 존재해야 함
    let app_config = match &cli.config {
        Some(path) => AppConfig::load(path, true)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => AppConfig::load_default()
            .with_context(|| format!("Failed to load config: {}", DEFAULT_CONFIG_PATH))?,
    };

    let mut log_config = LogConfig::from_settings(&app_config.logging).with_env_overrides();
    if let Some(level) = cli.log_level {
        log_config.level = level;
    }
    init_logging(log_config).map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    match cli.command {
        Commands::Simulate(args) => {
            let config = SimulateCliConfig::resolve(args, &app_config)?;

            match run_simulate(config).await {
                Ok(report) => {
                    info!(
                        total_invested = %report.summary.total_invested,
                        current_value = %report.summary.current_value,
                        "✅ Simulation finished"
                    );
                }
                Err(e) => {
                    error!("Simulation failed: {:#}", e);
                    return Err(e);
                }
            }
        }

        Commands::Intervals => {
            print!("{}", format_intervals());
        }
    }

    Ok(())
}
