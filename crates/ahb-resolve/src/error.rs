//! Errors the resolver can raise while expanding packages and time
//! conditions.

use std::fmt;

use ahb_parser::SyntaxError;

/// A package key for which `PackageResolver::resolve` returned no
/// expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageUnresolvable {
    pub key: String,
}

impl fmt::Display for PackageUnresolvable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "package '{}' could not be resolved to a condition expression", self.key)
    }
}

impl std::error::Error for PackageUnresolvable {}

/// Everything that can go wrong while resolving a parsed expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveError {
    PackageUnresolvable(PackageUnresolvable),
    /// The package resolver returned an expression that failed to parse.
    SyntaxError(SyntaxError),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::PackageUnresolvable(e) => e.fmt(f),
            ResolveError::SyntaxError(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for ResolveError {}

impl From<PackageUnresolvable> for ResolveError {
    fn from(e: PackageUnresolvable) -> Self {
        ResolveError::PackageUnresolvable(e)
    }
}

impl From<SyntaxError> for ResolveError {
    fn from(e: SyntaxError) -> Self {
        ResolveError::SyntaxError(e)
    }
}
