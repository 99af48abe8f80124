use crate::economics::{annuity_factor, present_factor};

use super::item::Item;

/// 현가 계산의 항목별 내역.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresentWorthTerm {
    pub item: Item,
    /// 이 항목이 시작되는 연도(0부터)
    pub start_year: u32,
    /// 항목 자체 기간에 대한 P/A
    pub annuity_factor: f64,
    /// 시작 연도에서 0년으로 할인하는 P/F
    pub present_factor: f64,
    /// 항목이 기여하는 현가
    pub present_worth: f64,
}

/// 순서대로 이어 붙인 항목들의 시점 0 현가를 계산한다.
///
/// 각 항목의 연간 비용을 자기 기간의 P/A로 구간 시작 시점 일시금으로 바꾼 뒤,
/// 그 이전까지 누적된 연수만큼 P/F로 할인한다. 누적 연수는 항목을 더한 뒤에 늘어난다.
pub fn present_worth<I>(items: I, rate: f64) -> f64
where
    I: IntoIterator<Item = Item>,
{
    let mut elapsed = 0u32;
    let mut worth = 0.0;
    for item in items {
        worth += item.cost * annuity_factor(rate, item.period) * present_factor(rate, elapsed);
        elapsed = elapsed.saturating_add(item.period);
    }
    worth
}

/// `present_worth`와 같은 계산을 항목별 내역과 함께 돌려준다.
pub fn present_worth_terms<I>(items: I, rate: f64) -> Vec<PresentWorthTerm>
where
    I: IntoIterator<Item = Item>,
{
    let mut elapsed = 0u32;
    items
        .into_iter()
        .map(|item| {
            let pa = annuity_factor(rate, item.period);
            let pf = present_factor(rate, elapsed);
            let term = PresentWorthTerm {
                item,
                start_year: elapsed,
                annuity_factor: pa,
                present_factor: pf,
                present_worth: item.cost * pa * pf,
            };
            elapsed = elapsed.saturating_add(item.period);
            term
        })
        .collect()
}
