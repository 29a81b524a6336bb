pub mod catalog;
pub mod pool;
pub mod selector;

use std::fmt;

/// Served for any category the selector does not recognise.
pub const DEFAULT_TEXT: &str = "默认打字练习文本。";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PracticeCategory {
    Chinese,
    English,
    Wubi,
}

impl PracticeCategory {
    pub const ALL: [PracticeCategory; 3] = [
        PracticeCategory::Chinese,
        PracticeCategory::English,
        PracticeCategory::Wubi,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PracticeCategory::Chinese => "chinese",
            PracticeCategory::English => "english",
            PracticeCategory::Wubi => "wubi",
        }
    }

    /// Exact, case-sensitive match on the mode tag. Anything else is `None`.
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == tag)
    }

    pub fn pool(self) -> PoolId {
        CATEGORY_POOLS
            .iter()
            .find(|(category, _)| *category == self)
            .map(|&(_, pool)| pool)
            .unwrap_or(PoolId::Chinese)
    }

    /// English is measured in words per minute, the Chinese modes in characters.
    pub fn measures_words(self) -> bool {
        matches!(self, PracticeCategory::English)
    }
}

impl fmt::Display for PracticeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PoolId {
    Chinese,
    English,
}

impl PoolId {
    pub fn as_str(self) -> &'static str {
        match self {
            PoolId::Chinese => "chinese",
            PoolId::English => "english",
        }
    }
}

/// Which pool each category draws from. Wubi practice uses Chinese text.
pub const CATEGORY_POOLS: &[(PracticeCategory, PoolId)] = &[
    (PracticeCategory::Chinese, PoolId::Chinese),
    (PracticeCategory::English, PoolId::English),
    (PracticeCategory::Wubi, PoolId::Chinese),
];
