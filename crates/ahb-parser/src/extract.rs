//! Walks a condition-expression AST and buckets every leaf key by
//! [`Category`], for validity checking (enumerating every possible
//! content-evaluation result) and for package/time-condition resolution
//! (knowing up front which providers need to be called).

use std::ops::Add;

use ahb_common::{classify, Category, InvalidKeyRange, TimeCondition};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::ast::{Expr, Repeatability};

/// The keys referenced by a parsed expression, bucketed by category.
///
/// `package_repeatability` only records entries for packages that actually
/// carried an `n..m` annotation; a package referenced without one is still
/// present in `package_keys` but absent from this map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorizedKeyExtract {
    pub hint_keys: Vec<String>,
    pub fc_keys: Vec<String>,
    pub rc_keys: Vec<String>,
    pub package_keys: Vec<String>,
    pub time_condition_keys: Vec<TimeCondition>,
    pub package_repeatability: FxHashMap<String, Repeatability>,
}

impl CategorizedKeyExtract {
    /// Removes duplicates and sorts each bucket: numeric keys ascending by
    /// value, package/time keys lexicographically.
    pub fn sanitize(mut self) -> Self {
        sort_numeric(&mut self.hint_keys);
        sort_numeric(&mut self.fc_keys);
        sort_numeric(&mut self.rc_keys);
        self.package_keys.sort();
        self.package_keys.dedup();
        self.time_condition_keys.sort_by_key(|t| t.as_str());
        self.time_condition_keys.dedup();
        self
    }

    fn extend(&mut self, other: CategorizedKeyExtract) {
        self.hint_keys.extend(other.hint_keys);
        self.fc_keys.extend(other.fc_keys);
        self.rc_keys.extend(other.rc_keys);
        self.package_keys.extend(other.package_keys);
        self.time_condition_keys.extend(other.time_condition_keys);
        self.package_repeatability.extend(other.package_repeatability);
    }
}

impl Add for CategorizedKeyExtract {
    type Output = CategorizedKeyExtract;

    fn add(mut self, rhs: CategorizedKeyExtract) -> CategorizedKeyExtract {
        self.extend(rhs);
        self.sanitize()
    }
}

fn sort_numeric(keys: &mut Vec<String>) {
    keys.sort_by_key(|k| k.parse::<u32>().unwrap_or(u32::MAX));
    keys.dedup();
}

/// Walks `expr`, classifying every leaf key and bucketing it. Fails if any
/// leaf key is outside its category's valid number range -- which should
/// never happen for an AST produced by the parser, but a tree spliced
/// together by hand (e.g. in tests or by a resolver) is not exempt.
pub fn extract_keys(expr: &Expr) -> Result<CategorizedKeyExtract, InvalidKeyRange> {
    let mut out = CategorizedKeyExtract::default();
    walk(expr, &mut out)?;
    Ok(out.sanitize())
}

fn walk(expr: &Expr, out: &mut CategorizedKeyExtract) -> Result<(), InvalidKeyRange> {
    match expr {
        Expr::Condition { key, .. } => {
            match classify(key)? {
                Category::RequirementConstraint => out.rc_keys.push(key.clone()),
                Category::Hint => out.hint_keys.push(key.clone()),
                Category::FormatConstraint => out.fc_keys.push(key.clone()),
                other => unreachable!("condition leaf classified as {other}"),
            }
            Ok(())
        }
        Expr::Package { key, repeatability, .. } => {
            classify(key)?;
            out.package_keys.push(key.clone());
            if let Some(r) = repeatability {
                out.package_repeatability.insert(key.clone(), *r);
            }
            Ok(())
        }
        Expr::TimeCondition { condition, .. } => {
            out.time_condition_keys.push(*condition);
            Ok(())
        }
        Expr::Binary { left, right, .. } | Expr::ThenAlso { left, right, .. } => {
            walk(left, out)?;
            walk(right, out)
        }
    }
}
