//! 할인 계수 계산. 이자율은 항상 소수(0.08 = 8%)로 받는다.

/// `(1 + rate)^n`. `n`이 i32 범위를 넘으면 `powf`로 계산한다.
fn growth(rate: f64, n: u32) -> f64 {
    match i32::try_from(n) {
        Ok(exp) => (1.0 + rate).powi(exp),
        Err(_) => (1.0 + rate).powf(f64::from(n)),
    }
}

/// 현가 계수 P/F: `1 / (1 + rate)^n`.
///
/// `n`은 시점 0부터 경과한 연수이며 `n = 0`이면 1을 돌려준다.
pub fn present_factor(rate: f64, n: u32) -> f64 {
    if n == 0 {
        return 1.0;
    }
    1.0 / growth(rate, n)
}

/// 연금 현가 계수 P/A.
///
/// 매년 같은 금액을 `n`년 동안 지불할 때 그 구간 시작 시점의 일시금으로
/// 환산하는 계수다. 이자율이 0이면 할인이 없으므로 `n`을 그대로 돌려준다.
pub fn annuity_factor(rate: f64, n: u32) -> f64 {
    if rate == 0.0 {
        return f64::from(n);
    }
    let g = growth(rate, n);
    (g - 1.0) / (rate * g)
}

/// 자본 회수 계수 A/P. `annuity_factor`의 역수.
///
/// 이자율 0에서는 극한값 `1/n`을 사용한다. `n`은 1 이상이어야 한다.
pub fn capital_recovery_factor(rate: f64, n: u32) -> f64 {
    if rate == 0.0 {
        return 1.0 / f64::from(n);
    }
    let g = growth(rate, n);
    rate * g / (g - 1.0)
}
