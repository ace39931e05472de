#![warn(rust_2018_idioms)]
// 構造的な意味合いや一貫性を保つために以下の警告は無効化
#![allow(clippy::needless_range_loop)]

mod app;

use clap::{Parser, Subcommand};
use log::{Level, LevelFilter, Metadata, Record};

#[derive(Debug, Parser)]
#[command(name = "sanma", about = "三人麻雀のルールエンジン")]
struct Cli {
    /// ログを詳細に出力 (-vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// 警告以外のログを抑制
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// bot対戦シミュレーション
    #[command(alias = "E")]
    Engine(app::EngineArgs),
    /// 役,点数計算
    #[command(alias = "C")]
    Calc(app::CalculatorArgs),
}

// [LEVEL](file:line) message
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = match record.level() {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        };
        eprintln!(
            "[{}]({}:{}) {}",
            level,
            record.file().unwrap_or("?"),
            record.line().unwrap_or(0),
            record.args()
        );
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match (cli.quiet, cli.verbose) {
        (true, _) => LevelFilter::Warn,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    log::set_logger(&LOGGER).map_err(|e| anyhow::anyhow!("{}", e))?;
    log::set_max_level(level);

    match cli.mode {
        Mode::Engine(args) => app::EngineApp::new(args)?.run(),
        Mode::Calc(args) => app::CalculatorApp::new(args).run(),
    }
}
