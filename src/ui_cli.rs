use std::fmt::Write as _;
use std::io::{self, Write};

use crate::app::AppError;
use crate::case_file::{Case, CaseFile, PoolInput};
use crate::config::ReportSettings;
use crate::economics::CashFlowSchedule;
use crate::replacement::{
    for_each_selection_until, present_worth_terms, AnalysisError, AnalysisReport, ItemRef, Pool,
    SearchOptions, StopCondition,
};

/// 분석 결과 보고서를 문자열로 만든다.
pub fn render_report(case: &Case, report: &AnalysisReport, settings: &ReportSettings) -> String {
    let d = settings.decimals;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "사용 기간: {}년, 이자율: {:.4}%",
        case.service_life,
        case.rate * 100.0
    );
    let _ = writeln!(out, "평가한 조합 수: {}", report.combinations_evaluated);

    let Some(best) = &report.best else {
        let _ = writeln!(
            out,
            "사용 기간 {}년을 정확히 채우는 조합이 없습니다.",
            case.service_life
        );
        return out;
    };

    let _ = writeln!(out, "\n최적 조합 (최소 현가 = {:.d$}):", best.present_worth);
    let ctx = case.context();
    let terms = present_worth_terms(ctx.items(&best.selection), case.rate);
    for (item_ref, term) in best.selection.iter().zip(&terms) {
        let _ = writeln!(
            out,
            "  {:<10} {:>2}년차부터 {:>2}년  연간 비용 {:>12.d$}  현가 {:>12.d$}",
            pool_label(item_ref.pool),
            term.start_year + 1,
            term.item.period,
            term.item.cost,
            term.present_worth,
        );
    }
    let _ = writeln!(out, "  합계 {}년", ctx.total_years(&best.selection));
    out
}

/// 사용 기간을 정확히 채우는 모든 조합과 각 현가를 나열한다.
///
/// 분석과 같은 제한 시간과 중단 플래그를 따른다. `parallel`은 무시한다.
pub fn render_combinations(
    case: &Case,
    settings: &ReportSettings,
    options: &SearchOptions,
) -> Result<String, AnalysisError> {
    let d = settings.decimals;
    let ctx = case.context();
    let stop = StopCondition::new(options.deadline, options.interrupt.clone());
    let mut out = String::new();
    let mut count = 0usize;
    let flow = for_each_selection_until(&ctx, &stop, |selection: &[ItemRef]| {
        count += 1;
        let _ = writeln!(out, "조합 #{count}:");
        for item_ref in selection {
            let item = ctx.item(*item_ref);
            let _ = writeln!(
                out,
                "  {:<10} 기간 {:>2}년  비용 {:.d$}",
                pool_label(item_ref.pool),
                item.period,
                item.cost
            );
        }
        let _ = writeln!(
            out,
            "  합계 {}년, 현가 {:.d$}",
            ctx.total_years(selection),
            ctx.present_worth(selection)
        );
    });
    if flow.is_break() {
        return Err(AnalysisError::Interrupted);
    }
    Ok(out)
}

fn pool_label(pool: Pool) -> &'static str {
    match pool {
        Pool::Defender => "방어안",
        Pool::Challenger => "도전안",
    }
}

/// 대화형으로 케이스를 입력받는다.
pub fn prompt_case(default_rate_percent: f64) -> Result<CaseFile, AppError> {
    println!("\n=== 교체 분석 입력 ===");
    let service_life = read_u32("사용 기간 [년]: ", 1)?;
    let rate_percent = loop {
        let input = read_line(&format!("이자율 [%] (엔터 시 {default_rate_percent}): "))?;
        match parse_rate_percent(&input, default_rate_percent) {
            Some(rate) => break rate,
            None => println!("-100보다 큰 숫자를 입력하세요."),
        }
    };

    let defender = prompt_pool(Pool::Defender)?;
    let challenger = prompt_pool(Pool::Challenger)?;
    Ok(CaseFile {
        service_life: Some(service_life),
        rate_percent: Some(rate_percent),
        defender,
        challenger,
    })
}

/// 이자율 입력을 해석한다. 빈 입력은 기본값이고, 숫자가 아니거나
/// -100% 이하이면 `None`.
fn parse_rate_percent(input: &str, default_rate_percent: f64) -> Option<f64> {
    let rate = match input.trim() {
        "" => default_rate_percent,
        s => s.parse::<f64>().ok()?,
    };
    (rate.is_finite() && rate > -100.0).then_some(rate)
}

fn prompt_pool(pool: Pool) -> Result<PoolInput, AppError> {
    println!("\n-- {} 현금흐름 --", pool_label(pool));
    let years = read_u32("분석 연수 (0이면 이 풀을 비워 둠): ", 0)?;
    if years == 0 {
        return Ok(PoolInput::default());
    }
    let initial_investment = read_f64("0년차 초기 투자비: ")?;
    let mut salvage = vec![read_f64("0년차 잔존가치: ")?];
    let mut operating = Vec::with_capacity(years as usize);
    for year in 1..=years {
        salvage.push(read_f64(&format!("{year}년차 잔존가치: "))?);
        operating.push(read_f64(&format!("{year}년차 운전비: "))?);
    }
    Ok(PoolInput {
        items: Vec::new(),
        schedule: Some(CashFlowSchedule {
            initial_investment,
            salvage,
            operating,
        }),
    })
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Err(AppError::InputClosed);
    }
    Ok(buf)
}

fn read_f64(prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => return Ok(v),
            _ => println!("숫자를 입력하세요."),
        }
    }
}

fn read_u32(prompt: &str, min: u32) -> Result<u32, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<u32>() {
            Ok(v) if v >= min => return Ok(v),
            _ => println!("{min} 이상의 정수를 입력하세요."),
        }
    }
}
