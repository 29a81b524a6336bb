use rand::Rng;
use tracing::debug;

use crate::content::pool::{PoolTable, TextPool};
use crate::content::{DEFAULT_TEXT, PoolId, PracticeCategory};

/// Source of uniform indices for text selection.
pub trait RandomSource {
    /// Returns an index in `0..len`. Callers never pass `len == 0`.
    fn index(&mut self, len: usize) -> usize;
}

/// Adapts any `rand` generator.
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

/// Replays a fixed list of picks, wrapping around. Each pick is reduced modulo `len`.
#[derive(Clone, Debug)]
pub struct ScriptedSource {
    picks: Vec<usize>,
    next: usize,
}

impl ScriptedSource {
    pub fn new(picks: Vec<usize>) -> Self {
        Self { picks, next: 0 }
    }
}

impl RandomSource for ScriptedSource {
    fn index(&mut self, len: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let pick = self.picks[self.next % self.picks.len()];
        self.next += 1;
        pick % len
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ContentRequest<'a> {
    pub category: &'a str,
    pub custom_text: Option<&'a str>,
}

impl<'a> ContentRequest<'a> {
    pub fn new(category: &'a str) -> Self {
        Self {
            category,
            custom_text: None,
        }
    }

    pub fn with_custom_text(mut self, text: &'a str) -> Self {
        self.custom_text = Some(text);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionSource {
    Custom,
    Pool(PoolId),
    Placeholder,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub text: String,
    pub source: SelectionSource,
}

pub struct ContentSelector {
    pools: PoolTable,
}

impl ContentSelector {
    pub fn new(pools: PoolTable) -> Self {
        Self { pools }
    }

    pub fn pools(&self) -> &PoolTable {
        &self.pools
    }

    /// Picks the practice text for `request`.
    ///
    /// Non-blank custom text wins and is returned trimmed. Otherwise the
    /// category's pool is sampled uniformly, skipping `last_served` when any
    /// other entry exists. Unknown categories and empty pools yield
    /// [`DEFAULT_TEXT`]. Recording the result as last served is the caller's
    /// job (see `SessionState::load_practice_content`).
    pub fn select(
        &self,
        request: ContentRequest<'_>,
        last_served: Option<&str>,
        rng: &mut dyn RandomSource,
    ) -> Selection {
        if let Some(custom) = request.custom_text.map(str::trim).filter(|t| !t.is_empty()) {
            debug!(category = request.category, "using custom practice text");
            return Selection {
                text: custom.to_string(),
                source: SelectionSource::Custom,
            };
        }

        let Some(category) = PracticeCategory::parse(request.category) else {
            debug!(category = request.category, "unknown category, serving placeholder");
            return placeholder();
        };

        let pool_id = category.pool();
        match pick_avoiding(self.pools.get(pool_id), last_served, rng) {
            Some(text) => {
                debug!(%category, pool = pool_id.as_str(), "selected pool text");
                Selection {
                    text: text.to_string(),
                    source: SelectionSource::Pool(pool_id),
                }
            }
            None => {
                debug!(%category, pool = pool_id.as_str(), "empty pool, serving placeholder");
                placeholder()
            }
        }
    }
}

fn placeholder() -> Selection {
    Selection {
        text: DEFAULT_TEXT.to_string(),
        source: SelectionSource::Placeholder,
    }
}

/// Uniform pick from `pool` excluding entries equal to `last`, falling back
/// to the whole pool when nothing else is left. `None` only for an empty pool.
pub fn pick_avoiding<'a>(
    pool: &'a TextPool,
    last: Option<&str>,
    rng: &mut dyn RandomSource,
) -> Option<&'a str> {
    let mut candidates: Vec<&str> = pool.texts().filter(|t| Some(*t) != last).collect();
    if candidates.is_empty() {
        candidates = pool.texts().collect();
    }
    if candidates.is_empty() {
        return None;
    }
    let idx = rng.index(candidates.len()).min(candidates.len() - 1);
    Some(candidates[idx])
}
