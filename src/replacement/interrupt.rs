use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 탐색 중단 조건. 마감 시각과 외부 중단 플래그를 함께 본다.
///
/// 여러 샤드가 같은 조건을 공유하며, 한 번 멈추면 모든 샤드가 멈춘다.
#[derive(Debug, Default)]
pub struct StopCondition {
    deadline: Option<Instant>,
    flag: Option<Arc<AtomicBool>>,
    tripped: AtomicBool,
}

impl StopCondition {
    /// 시계는 2^12 스텝마다 한 번만 확인한다.
    const CLOCK_CHECK_MASK: u64 = 0x0FFF;

    /// 중단 조건이 전혀 없는 상태.
    pub fn never() -> Self {
        Self::default()
    }

    pub fn new(time_limit: Option<Duration>, flag: Option<Arc<AtomicBool>>) -> Self {
        Self {
            deadline: time_limit.map(|limit| Instant::now() + limit),
            flag,
            tripped: AtomicBool::new(false),
        }
    }

    /// 조건이 하나도 설정되지 않았으면 true.
    pub fn is_unbounded(&self) -> bool {
        self.deadline.is_none() && self.flag.is_none()
    }

    /// 이미 중단 상태가 되었는지.
    pub fn is_tripped(&self) -> bool {
        self.tripped.load(Ordering::Relaxed)
    }

    /// `step`번째 탐색 노드에서 중단해야 하는지 판단한다.
    #[inline]
    pub fn should_stop(&self, step: u64) -> bool {
        if self.is_unbounded() {
            return false;
        }
        if self.is_tripped() {
            return true;
        }
        let interrupted = self
            .flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed));
        let expired = (step & Self::CLOCK_CHECK_MASK) == 0
            && self.deadline.is_some_and(|deadline| Instant::now() >= deadline);
        if interrupted || expired {
            self.tripped.store(true, Ordering::Relaxed);
            return true;
        }
        false
    }
}
