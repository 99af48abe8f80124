//! tracing 구독자 초기화.

use tracing_subscriber::{fmt, EnvFilter};

/// 표준 오류로 로그를 내보내는 구독자를 설치한다.
///
/// `RUST_LOG`가 있으면 그것을 우선하고, 없으면 `level`을 이 크레이트에만 적용한다.
/// 이미 설치되어 있으면 아무 일도 하지 않는다.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("replacement_analysis={level}")));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
