use serde::{Deserialize, Serialize};
use std::fmt;

/// 후보 자산이 속한 풀.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pool {
    /// 현재 보유 중인 자산(방어안)
    Defender,
    /// 교체 후보 자산(도전안)
    Challenger,
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pool::Defender => write!(f, "Defender"),
            Pool::Challenger => write!(f, "Challenger"),
        }
    }
}

/// 풀의 한 항목: 사용 연수와 연간 등가 비용.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// 사용 기간 [년]
    pub period: u32,
    /// 연간 등가 비용
    pub cost: f64,
}

impl Item {
    pub const fn new(period: u32, cost: f64) -> Self {
        Self { period, cost }
    }
}

/// 풀 태그와 인덱스로 항목을 가리킨다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemRef {
    pub pool: Pool,
    pub index: usize,
}

impl ItemRef {
    pub const fn defender(index: usize) -> Self {
        Self {
            pool: Pool::Defender,
            index,
        }
    }

    pub const fn challenger(index: usize) -> Self {
        Self {
            pool: Pool::Challenger,
            index,
        }
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.pool, self.index)
    }
}

/// 시간 순서대로 나열된 항목 참조 목록.
pub type Selection = Vec<ItemRef>;
