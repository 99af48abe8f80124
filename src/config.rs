use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::replacement::SearchOptions;

/// 결과 출력 방식 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// 금액 소수점 자릿수
    pub decimals: usize,
    /// 평가한 모든 조합을 나열할지 여부
    pub list_combinations: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            decimals: 2,
            list_combinations: false,
        }
    }
}

/// 탐색 설정.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub parallel: bool,
    /// 제한 시간 [초]. 없으면 끝까지 탐색한다.
    pub time_limit_secs: Option<u64>,
}

impl SearchSettings {
    pub fn to_options(&self) -> SearchOptions {
        SearchOptions {
            parallel: self.parallel,
            deadline: self.time_limit_secs.map(Duration::from_secs),
            interrupt: None,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 케이스 파일에 이자율이 없을 때 쓰는 값 [%]
    pub default_rate_percent: f64,
    /// tracing 필터 수준(trace/debug/info/warn/error)
    pub log_level: String,
    pub report: ReportSettings,
    pub search: SearchSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_rate_percent: 10.0,
            log_level: "warn".to_string(),
            report: ReportSettings::default(),
            search: SearchSettings::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub const DEFAULT_PATH: &str = "config.toml";

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 지정한 경로에 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
