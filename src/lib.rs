//! 교체 분석 핵심 로직을 라이브러리로 분리하여 CLI 외의 호출자도 엔진을 직접 쓸 수 있게 한다.

pub mod app;
pub mod case_file;
pub mod config;
pub mod economics;
pub mod logging;
pub mod replacement;
pub mod ui_cli;
