use rayon::prelude::*;
use std::ops::ControlFlow;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

use super::enumerator::{Enumerator, SearchContext, Shard};
use super::interrupt::StopCondition;
use super::item::{Item, ItemRef};
use super::tracker::{BestCombination, BestTracker};

/// 분석을 시작하기 전에 거부되는 입력 오류와 탐색 중단.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("이자율 {0}는 -1보다 큰 유한한 값이어야 합니다")]
    InvalidRate(f64),
    #[error("{}", describe_period(.item))]
    InvalidPeriod {
        /// `None`이면 사용 기간 자체가 잘못된 경우
        item: Option<ItemRef>,
    },
    #[error("{item}의 비용 {cost}가 유한한 숫자가 아닙니다")]
    InvalidCost { item: ItemRef, cost: f64 },
    #[error("제한 시간 초과 또는 중단 요청으로 탐색을 끝내지 못했습니다")]
    Interrupted,
}

fn describe_period(item: &Option<ItemRef>) -> String {
    match item {
        Some(item) => format!("{item}의 기간은 1년 이상이어야 합니다"),
        None => "사용 기간은 1년 이상이어야 합니다".to_string(),
    }
}

/// 탐색 방식 옵션.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// 바깥 루프를 샤드로 나눠 병렬 탐색한다. 결과는 순차 탐색과 같다.
    pub parallel: bool,
    /// 이 시간이 지나면 `AnalysisError::Interrupted`로 끝낸다.
    pub deadline: Option<Duration>,
    /// 외부에서 true로 바꾸면 탐색을 멈춘다.
    pub interrupt: Option<Arc<AtomicBool>>,
}

/// 분석 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    /// 최소 현가 조합. 사용 기간을 정확히 채울 수 없으면 `None`.
    pub best: Option<BestCombination>,
    /// 평가한 완성 조합 수
    pub combinations_evaluated: u64,
}

impl AnalysisReport {
    pub fn is_feasible(&self) -> bool {
        self.best.is_some()
    }

    /// 최소 현가. 가능한 조합이 없으면 `f64::INFINITY`.
    pub fn minimum_present_worth(&self) -> f64 {
        self.best
            .as_ref()
            .map_or(f64::INFINITY, |best| best.present_worth)
    }

    pub fn best_selection(&self) -> Option<&[ItemRef]> {
        self.best.as_ref().map(|best| best.selection.as_slice())
    }
}

/// 입력 전제 조건을 검사한다. 탐색 전에 한 번만 호출된다.
pub fn validate(
    defenders: &[Item],
    challengers: &[Item],
    service_life: u32,
    rate: f64,
) -> Result<(), AnalysisError> {
    if !rate.is_finite() || rate <= -1.0 {
        return Err(AnalysisError::InvalidRate(rate));
    }
    if service_life < 1 {
        return Err(AnalysisError::InvalidPeriod { item: None });
    }
    let tagged = defenders
        .iter()
        .enumerate()
        .map(|(i, item)| (ItemRef::defender(i), item))
        .chain(
            challengers
                .iter()
                .enumerate()
                .map(|(i, item)| (ItemRef::challenger(i), item)),
        );
    for (item_ref, item) in tagged {
        if item.period < 1 {
            return Err(AnalysisError::InvalidPeriod {
                item: Some(item_ref),
            });
        }
        if !item.cost.is_finite() {
            return Err(AnalysisError::InvalidCost {
                item: item_ref,
                cost: item.cost,
            });
        }
    }
    Ok(())
}

/// 방어안/도전안 풀에서 사용 기간을 정확히 채우는 최소 현가 조합을 찾는다.
///
/// `rate`는 소수(0.08 = 8%)다.
pub fn analyze(
    defenders: &[Item],
    challengers: &[Item],
    service_life: u32,
    rate: f64,
) -> Result<AnalysisReport, AnalysisError> {
    analyze_with(
        defenders,
        challengers,
        service_life,
        rate,
        &SearchOptions::default(),
    )
}

/// 옵션을 지정해 분석한다.
pub fn analyze_with(
    defenders: &[Item],
    challengers: &[Item],
    service_life: u32,
    rate: f64,
    options: &SearchOptions,
) -> Result<AnalysisReport, AnalysisError> {
    let mut tracker = BestTracker::new();
    analyze_into(
        defenders,
        challengers,
        service_life,
        rate,
        options,
        &mut tracker,
    )?;
    Ok(AnalysisReport {
        best: tracker.result(),
        combinations_evaluated: tracker.considered(),
    })
}

/// 호출자가 가진 트래커에 결과를 기록한다. 트래커는 시작 시 초기화된다.
pub fn analyze_into(
    defenders: &[Item],
    challengers: &[Item],
    service_life: u32,
    rate: f64,
    options: &SearchOptions,
    tracker: &mut BestTracker,
) -> Result<(), AnalysisError> {
    validate(defenders, challengers, service_life, rate)?;
    tracker.reset();

    let ctx = SearchContext::new(defenders, challengers, service_life, rate);
    let stop = StopCondition::new(options.deadline, options.interrupt.clone());
    debug!(
        defenders = defenders.len(),
        challengers = challengers.len(),
        service_life,
        rate,
        parallel = options.parallel,
        "교체 분석 시작"
    );
    let started = Instant::now();

    let flow = if options.parallel {
        search_parallel(&ctx, &stop, tracker)
    } else {
        search_sequential(&ctx, &stop, tracker)
    };
    if flow.is_break() || stop.is_tripped() {
        return Err(AnalysisError::Interrupted);
    }

    info!(
        evaluated = tracker.considered(),
        minimum = tracker.minimum(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "교체 분석 완료"
    );
    Ok(())
}

fn search_sequential(
    ctx: &SearchContext<'_>,
    stop: &StopCondition,
    tracker: &mut BestTracker,
) -> ControlFlow<()> {
    let mut enumerator = Enumerator::new(ctx, stop);
    enumerator.run(&mut |selection: &[ItemRef]| {
        tracker.consider(selection, ctx.present_worth(selection));
        ControlFlow::Continue(())
    })
}

/// 샤드마다 별도 트래커로 탐색한 뒤 순차 탐색 순서대로 합친다.
fn search_parallel(
    ctx: &SearchContext<'_>,
    stop: &StopCondition,
    tracker: &mut BestTracker,
) -> ControlFlow<()> {
    let shards: Vec<Shard> = ctx.shards();
    let outcomes: Vec<(BestTracker, ControlFlow<()>)> = shards
        .par_iter()
        .map(|&shard| {
            let mut local = BestTracker::new();
            let mut enumerator = Enumerator::new(ctx, stop);
            let flow = enumerator.run_shard(shard, &mut |selection: &[ItemRef]| {
                local.consider(selection, ctx.present_worth(selection));
                ControlFlow::Continue(())
            });
            (local, flow)
        })
        .collect();

    let mut flow = ControlFlow::Continue(());
    for (local, shard_flow) in outcomes {
        if shard_flow.is_break() {
            flow = ControlFlow::Break(());
        }
        tracker.absorb(local);
    }
    flow
}
