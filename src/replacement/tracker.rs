use tracing::trace;

use super::item::{ItemRef, Selection};

/// 최소 현가를 달성한 조합.
#[derive(Debug, Clone, PartialEq)]
pub struct BestCombination {
    pub selection: Selection,
    pub present_worth: f64,
}

/// 탐색 중 지금까지의 최소 현가 조합을 기록한다.
///
/// 초기 상태는 "조합 없음, 최소값 = +∞"이며 값은 단조 감소만 한다.
/// 비교가 엄격한 `<`라서 동률이면 먼저 발견된 조합이 남는다.
#[derive(Debug, Clone)]
pub struct BestTracker {
    best: Option<Selection>,
    minimum: f64,
    considered: u64,
}

impl Default for BestTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl BestTracker {
    pub fn new() -> Self {
        Self {
            best: None,
            minimum: f64::INFINITY,
            considered: 0,
        }
    }

    /// 새 분석을 시작하기 전에 초기 상태로 되돌린다.
    pub fn reset(&mut self) {
        self.best = None;
        self.minimum = f64::INFINITY;
        self.considered = 0;
    }

    /// 후보 조합을 제출한다. 기록이 갱신되면 true.
    pub fn consider(&mut self, selection: &[ItemRef], present_worth: f64) -> bool {
        self.considered += 1;
        if present_worth < self.minimum {
            trace!(present_worth, len = selection.len(), "최소 현가 갱신");
            self.minimum = present_worth;
            self.best = Some(selection.to_vec());
            return true;
        }
        false
    }

    /// 현재까지의 최소 현가. 조합이 없으면 `f64::INFINITY`.
    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    /// 제출된 완성 조합의 수.
    pub fn considered(&self) -> u64 {
        self.considered
    }

    /// 현재 최적 조합. 사용 기간을 정확히 채우는 조합이 없었다면 `None`.
    pub fn result(&self) -> Option<BestCombination> {
        self.best.as_ref().map(|selection| BestCombination {
            selection: selection.clone(),
            present_worth: self.minimum,
        })
    }

    /// 뒤에 탐색된 샤드의 기록을 합친다. 동률이면 `self` 쪽이 남는다.
    pub fn absorb(&mut self, later: BestTracker) {
        self.considered += later.considered;
        if let Some(selection) = later.best {
            if later.minimum < self.minimum {
                self.minimum = later.minimum;
                self.best = Some(selection);
            }
        }
    }
}
