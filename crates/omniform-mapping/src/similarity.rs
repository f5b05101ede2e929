//! Token-set similarity used by auto-mapping.

use crate::tokenize::TokenSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

type ScoreFn = dyn Fn(&TokenSet, &TokenSet) -> f64 + Send + Sync;

/// A similarity function over two token sets, returning a value in `[0, 1]`.
#[derive(Clone)]
pub struct Scorer {
    name: &'static str,
    func: Arc<ScoreFn>,
}

impl Scorer {
    /// Jaccard index: `|a ∩ b| / |a ∪ b|`, 0 when both sets are empty.
    pub fn jaccard() -> Self {
        Self::custom("jaccard", jaccard)
    }

    /// Sørensen–Dice over the space-joined tokens of each side.
    pub fn dice() -> Self {
        Self::custom("dice", dice)
    }

    pub fn custom<F>(name: &'static str, func: F) -> Self
    where
        F: Fn(&TokenSet, &TokenSet) -> f64 + Send + Sync + 'static,
    {
        Self {
            name,
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn score(&self, a: &TokenSet, b: &TokenSet) -> f64 {
        (self.func)(a, b)
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::jaccard()
    }
}

impl fmt::Debug for Scorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scorer").field("name", &self.name).finish()
    }
}

/// Built-in scorers selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorerKind {
    #[default]
    Jaccard,
    Dice,
}

impl ScorerKind {
    pub fn scorer(self) -> Scorer {
        match self {
            ScorerKind::Jaccard => Scorer::jaccard(),
            ScorerKind::Dice => Scorer::dice(),
        }
    }
}

impl std::str::FromStr for ScorerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jaccard" => Ok(ScorerKind::Jaccard),
            "dice" => Ok(ScorerKind::Dice),
            other => Err(format!("Unknown scorer: {}", other)),
        }
    }
}

pub fn jaccard(a: &TokenSet, b: &TokenSet) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

pub fn dice(a: &TokenSet, b: &TokenSet) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let left = a.iter().map(String::as_str).collect::<Vec<_>>().join(" ");
    let right = b.iter().map(String::as_str).collect::<Vec<_>>().join(" ");
    strsim::sorensen_dice(&left, &right)
}
