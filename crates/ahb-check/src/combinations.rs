//! Enumerates every content-evaluation result a [`CategorizedKeyExtract`]
//! admits: the Cartesian product of `{true,false}` over its format-constraint
//! keys and `{FULFILLED,UNFULFILLED,UNKNOWN}` over its requirement-constraint
//! keys. Hint texts are synthesized as fixed placeholders, since their exact
//! wording never affects whether a composition type-checks.

use ahb_common::Fulfillment;
use ahb_parser::CategorizedKeyExtract;
use ahb_providers::{ContentEvaluationResult, EvaluatedFormatConstraint};
use rustc_hash::FxHashMap;

const RC_OUTCOMES: [Fulfillment; 3] = [Fulfillment::Fulfilled, Fulfillment::Unfulfilled, Fulfillment::Unknown];

fn fc_outcome(satisfied: bool) -> EvaluatedFormatConstraint {
    if satisfied {
        EvaluatedFormatConstraint::fulfilled()
    } else {
        EvaluatedFormatConstraint { fulfilled: false, error_message: None }
    }
}

fn fc_assignments(keys: &[String]) -> Vec<FxHashMap<String, EvaluatedFormatConstraint>> {
    let mut combos = vec![FxHashMap::default()];
    for key in keys {
        let mut next = Vec::with_capacity(combos.len() * 2);
        for combo in &combos {
            for satisfied in [true, false] {
                let mut c = combo.clone();
                c.insert(key.clone(), fc_outcome(satisfied));
                next.push(c);
            }
        }
        combos = next;
    }
    combos
}

fn rc_assignments(keys: &[String]) -> Vec<FxHashMap<String, Fulfillment>> {
    let mut combos = vec![FxHashMap::default()];
    for key in keys {
        let mut next = Vec::with_capacity(combos.len() * RC_OUTCOMES.len());
        for combo in &combos {
            for outcome in RC_OUTCOMES {
                let mut c = combo.clone();
                c.insert(key.clone(), outcome);
                next.push(c);
            }
        }
        combos = next;
    }
    combos
}

/// Every admissible `ContentEvaluationResult` for `extract`. Returns an
/// empty vector if the expression references neither a format- nor a
/// requirement-constraint key (e.g. it is built only from hints) -- there
/// is then nothing content-dependent to vary, so the checker has nothing to
/// run and defaults to valid.
pub fn generate_possible_content_evaluation_results(extract: &CategorizedKeyExtract) -> Vec<ContentEvaluationResult> {
    if extract.fc_keys.is_empty() && extract.rc_keys.is_empty() {
        return Vec::new();
    }
    let hints: FxHashMap<String, Option<String>> =
        extract.hint_keys.iter().map(|k| (k.clone(), Some(format!("Hinweis {k}")))).collect();

    let mut results = Vec::new();
    for fc in fc_assignments(&extract.fc_keys) {
        for rc in rc_assignments(&extract.rc_keys) {
            results.push(ContentEvaluationResult {
                hints: hints.clone(),
                format_constraints: fc.clone(),
                requirement_constraints: rc,
                packages: FxHashMap::default(),
            });
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(rc: &[&str], fc: &[&str], hint: &[&str]) -> CategorizedKeyExtract {
        CategorizedKeyExtract {
            rc_keys: rc.iter().map(|s| s.to_string()).collect(),
            fc_keys: fc.iter().map(|s| s.to_string()).collect(),
            hint_keys: hint.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn no_rc_or_fc_keys_yields_no_combinations() {
        let results = generate_possible_content_evaluation_results(&extract(&[], &[], &["501"]));
        assert!(results.is_empty());
    }

    #[test]
    fn one_rc_key_yields_three_combinations() {
        let results = generate_possible_content_evaluation_results(&extract(&["1"], &[], &[]));
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn one_fc_key_yields_two_combinations() {
        let results = generate_possible_content_evaluation_results(&extract(&[], &["901"], &[]));
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn one_rc_and_one_fc_key_yields_six_combinations() {
        let results = generate_possible_content_evaluation_results(&extract(&["1"], &["901"], &[]));
        assert_eq!(results.len(), 6);
    }

    #[test]
    fn hints_are_synthesized_for_every_hint_key() {
        let results = generate_possible_content_evaluation_results(&extract(&["1"], &[], &["501"]));
        assert_eq!(results[0].hints.get("501").cloned().flatten(), Some("Hinweis 501".to_string()));
    }
}
