use std::ops::ControlFlow;

use super::evaluator;
use super::interrupt::StopCondition;
use super::item::{Item, ItemRef, Pool};

/// 한 번의 분석 동안 변하지 않는 탐색 입력.
#[derive(Debug, Clone, Copy)]
pub struct SearchContext<'a> {
    pub defenders: &'a [Item],
    pub challengers: &'a [Item],
    /// 조합이 정확히 채워야 하는 총 연수
    pub service_life: u32,
    /// 소수 이자율
    pub rate: f64,
}

/// 바깥 루프를 나눈 독립 탐색 단위.
///
/// 방어안 인덱스 하나마다 샤드가 하나씩 있고, 마지막에 도전안만 쓰는 샤드가 온다.
/// 이 순서가 곧 순차 탐색의 발견 순서다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shard {
    Defender(usize),
    ChallengerOnly,
}

impl<'a> SearchContext<'a> {
    pub fn new(defenders: &'a [Item], challengers: &'a [Item], service_life: u32, rate: f64) -> Self {
        Self {
            defenders,
            challengers,
            service_life,
            rate,
        }
    }

    pub fn item(&self, item_ref: ItemRef) -> Item {
        match item_ref.pool {
            Pool::Defender => self.defenders[item_ref.index],
            Pool::Challenger => self.challengers[item_ref.index],
        }
    }

    pub fn items<'s>(&'s self, selection: &'s [ItemRef]) -> impl Iterator<Item = Item> + 's {
        selection.iter().map(move |r| self.item(*r))
    }

    /// 선택 조합의 현가.
    pub fn present_worth(&self, selection: &[ItemRef]) -> f64 {
        evaluator::present_worth(self.items(selection), self.rate)
    }

    pub fn total_years(&self, selection: &[ItemRef]) -> u64 {
        self.items(selection).map(|item| u64::from(item.period)).sum()
    }

    pub fn shards(&self) -> Vec<Shard> {
        (0..self.defenders.len())
            .map(Shard::Defender)
            .chain(std::iter::once(Shard::ChallengerOnly))
            .collect()
    }
}

/// 연수 합이 정확히 사용 기간과 같은 모든 조합을 깊이 우선으로 나열한다.
///
/// 방어안은 조합당 최대 하나, 맨 앞에만 온다. 도전안은 반복 가능하지만
/// 인덱스가 감소하지 않는 순서로만 붙는다.
pub struct Enumerator<'c, 'a> {
    ctx: &'c SearchContext<'a>,
    stop: &'c StopCondition,
    steps: u64,
}

impl<'c, 'a> Enumerator<'c, 'a> {
    pub fn new(ctx: &'c SearchContext<'a>, stop: &'c StopCondition) -> Self {
        Self { ctx, stop, steps: 0 }
    }

    /// 방문한 탐색 노드 수.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// 모든 샤드를 순서대로 탐색한다.
    pub fn run<F>(&mut self, visit: &mut F) -> ControlFlow<()>
    where
        F: FnMut(&[ItemRef]) -> ControlFlow<()>,
    {
        for shard in self.ctx.shards() {
            self.run_shard(shard, visit)?;
        }
        ControlFlow::Continue(())
    }

    /// 샤드 하나를 탐색한다. 완성된 조합마다 `visit`를 즉시 호출한다.
    pub fn run_shard<F>(&mut self, shard: Shard, visit: &mut F) -> ControlFlow<()>
    where
        F: FnMut(&[ItemRef]) -> ControlFlow<()>,
    {
        let target = i64::from(self.ctx.service_life);
        let mut path = Vec::new();
        match shard {
            Shard::Defender(d) => {
                let remaining = target - i64::from(self.ctx.defenders[d].period);
                if remaining < 0 {
                    return ControlFlow::Continue(());
                }
                path.push(ItemRef::defender(d));
                self.fill_challengers(remaining, &mut path, visit)
            }
            Shard::ChallengerOnly => self.fill_challengers(target, &mut path, visit),
        }
    }

    /// 노드 하나를 방문한다. `Continue(true)`면 자식을 더 펼쳐야 한다.
    fn enter<F>(
        &mut self,
        remaining: i64,
        path: &[ItemRef],
        visit: &mut F,
    ) -> ControlFlow<(), bool>
    where
        F: FnMut(&[ItemRef]) -> ControlFlow<()>,
    {
        self.steps = self.steps.wrapping_add(1);
        if self.stop.should_stop(self.steps) {
            return ControlFlow::Break(());
        }
        if remaining == 0 {
            visit(path)?;
            return ControlFlow::Continue(false);
        }
        ControlFlow::Continue(remaining > 0)
    }

    /// 도전안을 비감소 인덱스 순으로 붙여 나간다.
    ///
    /// 조합 길이가 사용 기간만큼 길어질 수 있으므로 재귀 대신 명시적 스택을 쓴다.
    /// 방문 순서는 깊이 우선 전위 순회와 같다.
    fn fill_challengers<F>(
        &mut self,
        remaining: i64,
        path: &mut Vec<ItemRef>,
        visit: &mut F,
    ) -> ControlFlow<()>
    where
        F: FnMut(&[ItemRef]) -> ControlFlow<()>,
    {
        let base = path.len();
        if !self.enter(remaining, path, visit)? {
            return ControlFlow::Continue(());
        }
        let challengers = self.ctx.challengers;
        let mut stack = vec![Frame { remaining, next: 0 }];
        while let Some(frame) = stack.last_mut() {
            let i = frame.next;
            if i >= challengers.len() {
                stack.pop();
                // 루트 프레임은 경로에 항목을 추가하지 않았다.
                if !stack.is_empty() {
                    path.pop();
                }
                continue;
            }
            frame.next += 1;
            let child = frame.remaining - i64::from(challengers[i].period);
            path.push(ItemRef::challenger(i));
            match self.enter(child, path, visit) {
                ControlFlow::Break(()) => {
                    path.truncate(base);
                    return ControlFlow::Break(());
                }
                ControlFlow::Continue(true) => stack.push(Frame {
                    remaining: child,
                    next: i,
                }),
                ControlFlow::Continue(false) => {
                    path.pop();
                }
            }
        }
        ControlFlow::Continue(())
    }
}

/// 탐색 스택의 한 층. `next`는 다음에 시도할 도전안 인덱스.
struct Frame {
    remaining: i64,
    next: usize,
}

/// 모든 완성 조합을 발견 순서대로 `visit`에 넘긴다. 중단 조건은 없다.
pub fn for_each_selection<F>(ctx: &SearchContext<'_>, visit: F)
where
    F: FnMut(&[ItemRef]),
{
    let _ = for_each_selection_until(ctx, &StopCondition::never(), visit);
}

/// `stop`이 걸리면 `Break`를 돌려주는 `for_each_selection`.
pub fn for_each_selection_until<F>(
    ctx: &SearchContext<'_>,
    stop: &StopCondition,
    mut visit: F,
) -> ControlFlow<()>
where
    F: FnMut(&[ItemRef]),
{
    let mut enumerator = Enumerator::new(ctx, stop);
    enumerator.run(&mut |selection: &[ItemRef]| {
        visit(selection);
        ControlFlow::Continue(())
    })
}
