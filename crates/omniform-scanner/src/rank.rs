//! Selector ranking and uniqueness resolution.
//!
//! Candidates arrive most-specific first. Each surviving candidate gets a base
//! weight that starts at the length of the attribute priority list and drops by
//! one per ranked candidate, plus a bonus when it matches exactly one element in
//! the scope. Invalid selectors and selectors that match nothing are dropped.

use crate::dom::{QueryError, Scope};
use crate::registry::SelectorInfo;
use tracing::debug;

/// Bonus for a selector that matches exactly one element in its scope.
pub const UNIQUENESS_BONUS: i32 = 2;

/// Score candidates against `scope`, returning them in descending score order.
///
/// The sort is stable, so equal scores keep candidate-generation order.
pub fn rank<S>(candidates: &[String], scope: &S, attribute_priority: &[String]) -> Vec<SelectorInfo<S::Node>>
where
    S: Scope + ?Sized,
{
    let mut ranked = Vec::with_capacity(candidates.len());
    let mut weight = i32::try_from(attribute_priority.len()).unwrap_or(i32::MAX);

    for selector in candidates {
        let count = match scope.count(selector) {
            Ok(count) => count,
            Err(QueryError::InvalidSelector(_)) => {
                debug!(selector = %selector, "Discarding invalid candidate");
                continue;
            }
            Err(e) => {
                debug!(selector = %selector, error = %e, "Candidate query failed");
                continue;
            }
        };

        let element = match scope.first_match(selector) {
            Ok(Some(element)) => element,
            Ok(None) | Err(_) => {
                debug!(selector = %selector, "Discarding candidate with no match");
                continue;
            }
        };

        let bonus = if count == 1 { UNIQUENESS_BONUS } else { 0 };
        ranked.push(SelectorInfo {
            selector: selector.clone(),
            score: weight + bonus,
            element,
        });
        weight -= 1;
    }

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}
