//! Bounded search for a signed sum that reproduces a target value.
//!
//! The candidate pool is the nearest `max_depth` known values above the
//! target in its column. Candidates are tried in a fixed order, and the first
//! one within `tolerance` wins:
//!
//! 1. term count `r` ascending from 2,
//! 2. subsets of the pool in lexicographic index order (pool order kept),
//! 3. sign patterns in binary-counting order over the `r - 1` trailing terms,
//!    all `+` first and the last term toggling fastest.
//!
//! The order decides ties, so results are reproducible. The work is bounded
//! by `sum(C(K, r) * 2^(r-1))` for `r` in `2..=K`.

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use super::cell_ref::CellRef;
use super::expr::{Expression, Sign, signed_sum};
use super::table::ValueTable;

pub const DEFAULT_MAX_DEPTH: usize = 10;
pub const DEFAULT_TOLERANCE: f64 = 0.01;
/// Deepest window the searcher accepts; larger values are clamped.
pub const MAX_SEARCH_DEPTH: usize = 16;

/// Tuning for [`FormulaSearcher`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Window size K: how many preceding values are considered.
    pub max_depth: usize,
    /// Largest accepted absolute difference from the target.
    pub tolerance: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FormulaSearcher {
    config: SearchConfig,
}

impl FormulaSearcher {
    pub fn new(config: SearchConfig) -> FormulaSearcher {
        let mut config = config;
        if config.max_depth > MAX_SEARCH_DEPTH {
            warn!(
                requested = config.max_depth,
                limit = MAX_SEARCH_DEPTH,
                "search depth clamped"
            );
            config.max_depth = MAX_SEARCH_DEPTH;
        }
        FormulaSearcher { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The known cells above `target` that the search may use, top to bottom.
    pub fn pool(&self, table: &ValueTable, target: &CellRef) -> Vec<CellRef> {
        let mut pool = table.known_above(target);
        if pool.len() > self.config.max_depth {
            pool.drain(..pool.len() - self.config.max_depth);
        }
        pool
    }

    /// Find the first signed sum of cells above `target` within tolerance of `value`.
    pub fn find(&self, table: &ValueTable, target: &CellRef, value: f64) -> Option<Expression> {
        let pool = self.pool(table, target);
        let n = pool.len();
        if n < 2 {
            return None;
        }

        let values: Vec<f64> = pool.iter().map(|cell| table.resolve(cell)).collect();
        let mut tried = 0u64;

        for r in 2..=n.min(self.config.max_depth) {
            let mut indices: Vec<usize> = (0..r).collect();
            loop {
                for pattern in 0..(1u64 << (r - 1)) {
                    tried += 1;
                    let sum = signed_sum(
                        indices
                            .iter()
                            .enumerate()
                            .map(|(pos, &idx)| (values[idx], sign_at(pattern, pos, r))),
                    );
                    if (sum - value).abs() <= self.config.tolerance {
                        trace!(%target, tried, "match found");
                        return Some(build_expression(&pool, &indices, pattern));
                    }
                }
                if !next_combination(&mut indices, n) {
                    break;
                }
            }
        }

        trace!(%target, tried, "search exhausted");
        None
    }
}

impl Default for FormulaSearcher {
    fn default() -> Self {
        FormulaSearcher::new(SearchConfig::default())
    }
}

/// Sign of the term at `pos` in a size-`r` candidate. The first term is always `+`;
/// the remaining terms read `pattern` from its highest bit down, `1` meaning `-`.
fn sign_at(pattern: u64, pos: usize, r: usize) -> Sign {
    if pos == 0 {
        return Sign::Plus;
    }
    if (pattern >> (r - 1 - pos)) & 1 == 1 {
        Sign::Minus
    } else {
        Sign::Plus
    }
}

/// Advance `indices` to the next combination of `0..n` in lexicographic order.
/// Returns false once the last combination has been passed.
fn next_combination(indices: &mut [usize], n: usize) -> bool {
    let r = indices.len();
    let mut i = r;
    while i > 0 {
        i -= 1;
        if indices[i] != i + n - r {
            indices[i] += 1;
            for j in i + 1..r {
                indices[j] = indices[j - 1] + 1;
            }
            return true;
        }
    }
    false
}

fn build_expression(pool: &[CellRef], indices: &[usize], pattern: u64) -> Expression {
    let r = indices.len();
    let terms: Vec<(CellRef, Sign)> = indices
        .iter()
        .enumerate()
        .map(|(pos, &idx)| (pool[idx], sign_at(pattern, pos, r)))
        .collect();
    let cells: Vec<CellRef> = terms.iter().map(|(cell, _)| *cell).collect();
    let signs: Vec<Sign> = terms.iter().skip(1).map(|(_, sign)| *sign).collect();
    Expression::new(&cells, &signs).unwrap_or_else(|| unreachable!("sign count matches term count"))
}
