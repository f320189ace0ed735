//! Precedence-aware merging of outcome maps

use crate::foundation::OutcomeMap;

/// Combines two outcome maps.
///
/// - Every key of `a` and `b` appears exactly once.
/// - A message always beats a clear, whichever side it comes from; when both
///   sides carry a message, `b` wins.
/// - Invalid fields come first, then valid ones. Within each group keys keep
///   the order in which they were first seen (`a` before `b`).
///
/// The evaluator passes sibling results in order and the node's own results
/// last, so a later sibling or the owning node can replace an earlier message
/// but can never clear it.
///
/// # Examples
///
/// ```rust,ignore
/// let child = OutcomeMap::from_iter([("x".into(), Some(FieldMessage::text("bad")))]);
/// let own = OutcomeMap::all_clear(["x", "y"]);
/// let merged = merge(child, own);
/// assert_eq!(merged.message("x"), Some("bad"));
/// ```
pub fn merge(a: OutcomeMap, b: OutcomeMap) -> OutcomeMap {
    let mut combined = a.into_inner();
    for (field, verdict) in b {
        match combined.get_mut(&field) {
            Some(existing) => {
                if verdict.is_some() {
                    *existing = verdict;
                }
            }
            None => {
                combined.insert(field, verdict);
            }
        }
    }

    let (errors, clear): (Vec<_>, Vec<_>) = combined
        .into_iter()
        .partition(|(_, verdict)| verdict.is_some());
    errors.into_iter().chain(clear).collect()
}
