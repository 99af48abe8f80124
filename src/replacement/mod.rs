//! 방어안/도전안 교체 분석 엔진.

pub mod analysis;
pub mod enumerator;
pub mod evaluator;
pub mod interrupt;
pub mod item;
pub mod tracker;

pub use analysis::{
    analyze, analyze_into, analyze_with, validate, AnalysisError, AnalysisReport, SearchOptions,
};
pub use enumerator::{for_each_selection, for_each_selection_until, Enumerator, SearchContext, Shard};
pub use evaluator::{present_worth, present_worth_terms, PresentWorthTerm};
pub use interrupt::StopCondition;
pub use item::{Item, ItemRef, Pool, Selection};
pub use tracker::{BestCombination, BestTracker};
