//! TOML로 기술한 교체 분석 케이스를 읽어 엔진 입력으로 바꾼다.
//!
//! 이자율은 파일과 명령줄 모두 퍼센트로 받으며, 소수로의 변환은 이 모듈에서 한 번만 한다.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::economics::{CashFlowError, CashFlowSchedule};
use crate::replacement::{
    self, AnalysisError, AnalysisReport, Item, Pool, SearchContext, SearchOptions,
};

/// 한 풀의 입력. 항목을 직접 주거나 현금흐름 스케줄로 준다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoolInput {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<CashFlowSchedule>,
}

/// 케이스 파일 전체.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseFile {
    /// 총 사용 기간 [년]
    pub service_life: Option<u32>,
    /// 이자율 [%]
    pub rate_percent: Option<f64>,
    #[serde(default)]
    pub defender: PoolInput,
    #[serde(default)]
    pub challenger: PoolInput,
}

/// 명령줄에서 덮어쓰는 값.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseOverrides {
    pub service_life: Option<u32>,
    pub rate_percent: Option<f64>,
}

/// 케이스 파일 처리 중 발생 가능한 오류.
#[derive(Debug, Error)]
pub enum CaseFileError {
    #[error("케이스 파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("케이스 파일 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("케이스 파일 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("{0} 풀에 items와 schedule이 함께 지정되었습니다")]
    AmbiguousPool(Pool),
    #[error("{pool} 현금흐름 오류: {source}")]
    CashFlow {
        pool: Pool,
        #[source]
        source: CashFlowError,
    },
    #[error("사용 기간(service_life)이 지정되지 않았습니다")]
    MissingServiceLife,
}

/// 분석 직전 상태로 풀과 스칼라가 확정된 케이스.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    pub defenders: Vec<Item>,
    pub challengers: Vec<Item>,
    pub service_life: u32,
    /// 소수 이자율
    pub rate: f64,
}

impl PoolInput {
    fn resolve(&self, pool: Pool, rate: f64) -> Result<Vec<Item>, CaseFileError> {
        match (&self.schedule, self.items.is_empty()) {
            (Some(_), false) => Err(CaseFileError::AmbiguousPool(pool)),
            (Some(schedule), true) => schedule
                .to_pool(rate)
                .map_err(|source| CaseFileError::CashFlow { pool, source }),
            (None, _) => Ok(self.items.clone()),
        }
    }
}

impl CaseFile {
    pub fn from_toml(src: &str) -> Result<Self, CaseFileError> {
        Ok(toml::from_str(src)?)
    }

    pub fn load(path: &Path) -> Result<Self, CaseFileError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn to_toml(&self) -> Result<String, CaseFileError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// 덮어쓰기 값과 기본 이자율을 반영해 풀을 확정한다.
    pub fn resolve(
        &self,
        overrides: CaseOverrides,
        default_rate_percent: f64,
    ) -> Result<Case, CaseFileError> {
        let service_life = overrides
            .service_life
            .or(self.service_life)
            .ok_or(CaseFileError::MissingServiceLife)?;
        let rate_percent = overrides
            .rate_percent
            .or(self.rate_percent)
            .unwrap_or(default_rate_percent);
        let rate = rate_percent / 100.0;
        Ok(Case {
            defenders: self.defender.resolve(Pool::Defender, rate)?,
            challengers: self.challenger.resolve(Pool::Challenger, rate)?,
            service_life,
            rate,
        })
    }
}

impl Case {
    pub fn context(&self) -> SearchContext<'_> {
        SearchContext::new(&self.defenders, &self.challengers, self.service_life, self.rate)
    }

    pub fn analyze(&self, options: &SearchOptions) -> Result<AnalysisReport, AnalysisError> {
        replacement::analyze_with(
            &self.defenders,
            &self.challengers,
            self.service_life,
            self.rate,
            options,
        )
    }
}

/// 내장 예제: 방어안 1~6년, 도전안 1~8년의 연간 등가 비용.
pub fn demo_case() -> CaseFile {
    const DEFENDER_AEC: [f64; 6] = [53800.0, 52032.0, 54686.0, 58441.0, 62578.0, 66832.0];
    const CHALLENGER_AEC: [f64; 8] = [
        77000.0, 61836.0, 57557.0, 56249.0, 56312.0, 57205.0, 58694.0, 60665.0,
    ];
    let by_year = |costs: &[f64]| -> Vec<Item> {
        costs
            .iter()
            .enumerate()
            .map(|(i, &cost)| Item::new(i as u32 + 1, cost))
            .collect()
    };
    CaseFile {
        service_life: None,
        rate_percent: None,
        defender: PoolInput {
            items: by_year(&DEFENDER_AEC[..]),
            schedule: None,
        },
        challenger: PoolInput {
            items: by_year(&CHALLENGER_AEC[..]),
            schedule: None,
        },
    }
}
