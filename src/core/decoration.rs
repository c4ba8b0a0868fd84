//! core::decoration
//!
//! Resolve a commit's raw decoration text into the local branches that
//! point at it.
//!
//! Decorations look like git's `%D` placeholder output, optionally wrapped
//! in parentheses:
//!
//! ```text
//! (HEAD -> main, origin/main, tag: v1.0, feature)
//! ```
//!
//! Only names present in the known [`BranchSet`] survive resolution, which
//! drops tags and remote-only refs. Resolution never fails: text it cannot
//! make sense of simply contributes no branches.

use std::collections::BTreeSet;

use super::types::{BranchName, BranchSet};

/// The token introducing HEAD's symbolic target.
const HEAD_ARROW: &str = "HEAD -> ";

/// Remote prefix used when none is configured.
pub const DEFAULT_REMOTE_PREFIX: &str = "origin/";

/// Resolves decoration text against a set of known local branches.
///
/// # Example
///
/// ```
/// use branchviz::core::decoration::Resolver;
/// use branchviz::core::types::{BranchName, BranchSet};
///
/// let known: BranchSet = ["main", "feature"]
///     .into_iter()
///     .map(|n| BranchName::new(n).unwrap())
///     .collect();
///
/// let resolver = Resolver::default();
/// let found = resolver.resolve("(HEAD -> main, origin/main, tag: v1)", &known);
/// assert_eq!(found.len(), 1);
/// assert!(found.contains("main"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolver {
    remote_prefixes: Vec<String>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self {
            remote_prefixes: vec![DEFAULT_REMOTE_PREFIX.to_string()],
        }
    }
}

impl Resolver {
    /// Create a resolver that strips the given remote prefixes (e.g. `"upstream/"`).
    ///
    /// An empty list disables remote prefix stripping entirely.
    pub fn with_remote_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut remote_prefixes: Vec<String> = Vec::new();
        for prefix in prefixes {
            let prefix = prefix.into();
            if !prefix.is_empty() && !remote_prefixes.contains(&prefix) {
                remote_prefixes.push(prefix);
            }
        }
        Self { remote_prefixes }
    }

    /// The remote prefixes this resolver strips, in match order.
    pub fn remote_prefixes(&self) -> &[String] {
        &self.remote_prefixes
    }

    /// Strip the first matching remote prefix from `refname`.
    ///
    /// Returns `None` when no configured prefix matches.
    pub fn strip_remote_prefix<'a>(&self, refname: &'a str) -> Option<&'a str> {
        self.remote_prefixes
            .iter()
            .find_map(|prefix| refname.strip_prefix(prefix.as_str()))
    }

    /// Resolve `decoration_raw` into the known local branches it names.
    pub fn resolve(&self, decoration_raw: &str, known: &BranchSet) -> BTreeSet<BranchName> {
        let mut found = BTreeSet::new();

        for token in tokens(decoration_raw) {
            let candidate = match token.strip_prefix(HEAD_ARROW) {
                Some(target) => {
                    let target = target.trim();
                    self.strip_remote_prefix(target).unwrap_or(target)
                }
                None => token,
            };
            if let Some(branch) = known.get(candidate) {
                found.insert(branch.clone());
            }
        }

        found
    }

    /// The local-looking name of HEAD's target in `decoration_raw`, with
    /// any remote prefix removed.
    ///
    /// Used to name the first line when the repository has no local branches.
    pub fn head_line_name<'a>(&self, decoration_raw: &'a str) -> Option<&'a str> {
        let target = head_target(decoration_raw)?;
        let name = self.strip_remote_prefix(target).unwrap_or(target);
        (!name.is_empty()).then_some(name)
    }
}

/// Resolve `decoration_raw` with the default remote prefix.
pub fn resolve(decoration_raw: &str, known: &BranchSet) -> BTreeSet<BranchName> {
    Resolver::default().resolve(decoration_raw, known)
}

/// The ref named by the first `HEAD -> <ref>` token, if any.
///
/// # Example
///
/// ```
/// use branchviz::core::decoration::head_target;
///
/// assert_eq!(head_target("(HEAD -> origin/main, tag: v1)"), Some("origin/main"));
/// assert_eq!(head_target("HEAD, main"), None);
/// ```
pub fn head_target(decoration_raw: &str) -> Option<&str> {
    tokens(decoration_raw)
        .find_map(|token| token.strip_prefix(HEAD_ARROW))
        .map(str::trim)
        .filter(|target| !target.is_empty())
}

/// Split decoration text into trimmed, non-empty ref tokens.
fn tokens(decoration_raw: &str) -> impl Iterator<Item = &str> {
    // Trimmed before the paren check, so ` (main) ` still unwraps.
    let trimmed = decoration_raw.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(trimmed);

    inner
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
