use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::discount::{capital_recovery_factor, present_factor};
use crate::replacement::Item;

/// 한 자산의 연도별 현금흐름 입력.
///
/// `salvage[k]`는 k년 말 잔존가치(0년 포함), `operating[k - 1]`은 k년차 운전비다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSchedule {
    /// 초기 투자비
    pub initial_investment: f64,
    /// 0..=N년 잔존가치
    pub salvage: Vec<f64>,
    /// 1..=N년 운전비
    pub operating: Vec<f64>,
}

/// 현금흐름 입력 검증 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CashFlowError {
    #[error("운전비가 한 해도 입력되지 않았습니다")]
    Empty,
    #[error("잔존가치는 {expected}개(0년 포함)여야 하지만 {actual}개가 입력되었습니다")]
    SalvageLength { expected: usize, actual: usize },
    #[error("{field} 값이 유한한 숫자가 아닙니다")]
    NonFinite { field: &'static str },
    #[error("이자율 {0}는 -1보다 커야 합니다")]
    InvalidRate(f64),
}

impl CashFlowSchedule {
    /// 분석 가능한 최대 사용 연수 N.
    pub fn years(&self) -> u32 {
        self.operating.len() as u32
    }

    /// 입력 길이와 값의 유효성을 확인한다.
    pub fn validate(&self) -> Result<(), CashFlowError> {
        if self.operating.is_empty() {
            return Err(CashFlowError::Empty);
        }
        let expected = self.operating.len() + 1;
        if self.salvage.len() != expected {
            return Err(CashFlowError::SalvageLength {
                expected,
                actual: self.salvage.len(),
            });
        }
        if !self.initial_investment.is_finite() {
            return Err(CashFlowError::NonFinite {
                field: "initial_investment",
            });
        }
        if self.salvage.iter().any(|v| !v.is_finite()) {
            return Err(CashFlowError::NonFinite { field: "salvage" });
        }
        if self.operating.iter().any(|v| !v.is_finite()) {
            return Err(CashFlowError::NonFinite { field: "operating" });
        }
        Ok(())
    }

    /// `n`년 사용 시 연간 등가 비용(AEC)을 계산한다.
    ///
    /// 자본 회수분(초기 투자비 + 0년 잔존가치, n년 잔존가치 차감)과
    /// 운전비 현가를 각각 연 등가로 환산해 더한다.
    fn aec_unchecked(&self, rate: f64, n: u32) -> f64 {
        let crf = capital_recovery_factor(rate, n);
        let investment = self.initial_investment + self.salvage[0];
        let salvage_n = self.salvage[n as usize];
        let capital = investment * crf - salvage_n * crf * present_factor(rate, n);

        let pv_operating: f64 = self.operating[..n as usize]
            .iter()
            .enumerate()
            .map(|(k, cost)| cost * present_factor(rate, k as u32 + 1))
            .sum();
        capital + pv_operating * crf
    }

    /// `n`년(1..=N) 사용 시 AEC. 범위를 벗어나면 `None`.
    pub fn annual_equivalent_cost(&self, rate: f64, n: u32) -> Result<Option<f64>, CashFlowError> {
        check_rate(rate)?;
        self.validate()?;
        if n == 0 || n > self.years() {
            return Ok(None);
        }
        Ok(Some(self.aec_unchecked(rate, n)))
    }

    /// 1..=N년 각각을 후보 기간으로 하는 풀을 만든다.
    pub fn to_pool(&self, rate: f64) -> Result<Vec<Item>, CashFlowError> {
        check_rate(rate)?;
        self.validate()?;
        Ok((1..=self.years())
            .map(|n| Item::new(n, self.aec_unchecked(rate, n)))
            .collect())
    }
}

fn check_rate(rate: f64) -> Result<(), CashFlowError> {
    if !rate.is_finite() || rate <= -1.0 {
        return Err(CashFlowError::InvalidRate(rate));
    }
    Ok(())
}
