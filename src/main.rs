use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use replacement_analysis::app::{self, Command, RunOptions};
use replacement_analysis::case_file::CaseOverrides;
use replacement_analysis::{config, logging};

/// 방어안/도전안 교체 분석기
#[derive(Parser)]
#[command(name = "replacement_analysis", version)]
#[command(about = "사용 기간을 정확히 채우는 최소 현가 교체 조합을 찾는다")]
struct Cli {
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = config::DEFAULT_PATH)]
    config: PathBuf,

    /// 로그 수준 (trace, debug, info, warn, error). 없으면 설정값 사용
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// TOML 케이스 파일을 분석한다
    Analyze {
        /// 케이스 파일 경로
        case: PathBuf,
        #[command(flatten)]
        common: CommonArgs,
        /// 방어안/도전안 샤드를 병렬로 탐색
        #[arg(long)]
        parallel: bool,
        /// 제한 시간 [초]
        #[arg(long)]
        time_limit_secs: Option<u64>,
    },
    /// 내장 예제(방어안 6년, 도전안 8년)를 분석한다
    Demo {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// 현금흐름을 대화형으로 입력받아 분석한다
    Interactive {
        /// 모든 조합을 나열
        #[arg(long)]
        list: bool,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// 사용 기간 [년]
    #[arg(long)]
    service_life: Option<u32>,
    /// 이자율 [%]
    #[arg(long)]
    rate_percent: Option<f64>,
    /// 모든 조합을 나열
    #[arg(long)]
    list: bool,
}

impl CommonArgs {
    fn into_options(self) -> RunOptions {
        RunOptions {
            overrides: CaseOverrides {
                service_life: self.service_life,
                rate_percent: self.rate_percent,
            },
            list_combinations: self.list.then_some(true),
            ..RunOptions::default()
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match try_run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("오류: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: Cli) -> Result<(), app::AppError> {
    let cfg = config::load_or_default(&cli.config)?;
    logging::init_tracing(cli.log_level.as_deref().unwrap_or(&cfg.log_level));

    let (command, options) = match cli.command {
        CliCommand::Analyze {
            case,
            common,
            parallel,
            time_limit_secs,
        } => {
            let mut options = common.into_options();
            options.parallel = parallel.then_some(true);
            options.time_limit_secs = time_limit_secs;
            (Command::Analyze { case }, options)
        }
        CliCommand::Demo { common } => (Command::Demo, common.into_options()),
        CliCommand::Interactive { list } => (
            Command::Interactive,
            RunOptions {
                list_combinations: list.then_some(true),
                ..RunOptions::default()
            },
        ),
    };
    app::run(&cfg, command, &options)
}
