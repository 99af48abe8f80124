use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

use crate::case_file::{self, CaseFile, CaseFileError, CaseOverrides};
use crate::config::{Config, ConfigError};
use crate::replacement::AnalysisError;
use crate::ui_cli;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    CaseFile(#[from] CaseFileError),
    #[error("분석 오류: {0}")]
    Analysis(#[from] AnalysisError),
    #[error("입력이 끝났습니다")]
    InputClosed,
}

/// 실행할 작업.
#[derive(Debug, Clone)]
pub enum Command {
    /// 케이스 파일을 분석한다.
    Analyze { case: PathBuf },
    /// 내장 예제를 분석한다.
    Demo,
    /// 대화형으로 입력받아 분석한다.
    Interactive,
}

/// 명령줄에서 받은 실행 옵션. `None`이면 설정값을 따른다.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub overrides: CaseOverrides,
    pub list_combinations: Option<bool>,
    pub parallel: Option<bool>,
    pub time_limit_secs: Option<u64>,
}

/// 명령을 실행하고 결과를 표준 출력으로 보낸다.
pub fn run(config: &Config, command: Command, options: &RunOptions) -> Result<(), AppError> {
    let case_file = match command {
        Command::Analyze { case } => {
            debug!(path = %case.display(), "케이스 파일 로드");
            CaseFile::load(&case)?
        }
        Command::Demo => {
            let mut demo = case_file::demo_case();
            demo.service_life = Some(6);
            demo
        }
        Command::Interactive => ui_cli::prompt_case(config.default_rate_percent)?,
    };
    let case = case_file.resolve(options.overrides, config.default_rate_percent)?;

    let mut report_settings = config.report.clone();
    if let Some(list) = options.list_combinations {
        report_settings.list_combinations = list;
    }
    let mut search = config.search.clone();
    if let Some(parallel) = options.parallel {
        search.parallel = parallel;
    }
    if options.time_limit_secs.is_some() {
        search.time_limit_secs = options.time_limit_secs;
    }

    let search_options = search.to_options();
    let report = case.analyze(&search_options)?;
    if report_settings.list_combinations {
        print!(
            "{}",
            ui_cli::render_combinations(&case, &report_settings, &search_options)?
        );
    }
    print!("{}", ui_cli::render_report(&case, &report, &report_settings));
    Ok(())
}
