//! core::compiler
//!
//! The line compiler: turns an oldest-first commit list into a linear
//! sequence of diagram directives.
//!
//! # Algorithm
//!
//! One pass over the commits. Each commit is assigned to a [`Line`], chosen
//! from the local branches decorating it, and the compiler emits whatever
//! create/switch directives are needed before recording the commit on that
//! line. Merge commits look up which line their parents were drawn on to
//! name the merge source.
//!
//! # Invariants
//!
//! - Every commit produces exactly one commit-like directive, in input order
//! - A line is created at most once, immediately before its first switch
//! - The initial line is declared by the single [`Directive::Init`]
//! - A merge source is always a line some parent was drawn on, and never
//!   the line being merged into
//!
//! State lives in a private [`CompilerState`] built per run, so concurrent
//! compilations never share anything.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Serialize;

use super::decoration::Resolver;
use super::types::{BranchName, BranchSet, Commit, CommitId, Line};

/// Preferred initial lines, in priority order.
const PREFERRED_INITIAL_LINES: [&str; 2] = ["main", "master"];

/// Line name used when nothing better can be inferred.
pub const FALLBACK_LINE: &str = "start";

/// One instruction for the diagram grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Directive {
    /// Declare and activate the first line.
    Init { line: Line },
    /// Declare a new line without activating it.
    Create { line: Line },
    /// Activate a previously declared line.
    Switch { line: Line },
    /// Record a commit on the active line.
    Commit { id: CommitId },
    /// Record a merge from `from` into the active line.
    Merge { from: Line, id: CommitId },
    /// Record a merge whose source could not be told apart from the active line.
    CommitFallbackMerge { id: CommitId },
}

impl Directive {
    /// The commit id this directive records, if it records one.
    pub fn commit_id(&self) -> Option<&CommitId> {
        match self {
            Directive::Commit { id }
            | Directive::Merge { id, .. }
            | Directive::CommitFallbackMerge { id } => Some(id),
            Directive::Init { .. } | Directive::Create { .. } | Directive::Switch { .. } => None,
        }
    }
}

/// Result of a compilation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Compilation {
    /// The line declared by the init directive
    pub initial_line: Line,
    /// Lines created after the initial one, in creation order
    pub created_lines: Vec<Line>,
    /// The emitted directives
    pub directives: Vec<Directive>,
}

impl Compilation {
    /// Number of commit-like directives (one per input commit).
    pub fn commit_count(&self) -> usize {
        self.directives
            .iter()
            .filter(|d| d.commit_id().is_some())
            .count()
    }

    /// Number of merges whose source line was identified.
    pub fn merge_count(&self) -> usize {
        self.directives
            .iter()
            .filter(|d| matches!(d, Directive::Merge { .. }))
            .count()
    }

    /// Number of merges recorded through the fallback directive.
    pub fn fallback_merge_count(&self) -> usize {
        self.directives
            .iter()
            .filter(|d| matches!(d, Directive::CommitFallbackMerge { .. }))
            .count()
    }
}

/// Mutable state of one compilation run.
struct CompilerState {
    current_line: Line,
    known_lines: HashSet<Line>,
    commit_to_line: HashMap<CommitId, Line>,
    created_lines: Vec<Line>,
    directives: Vec<Directive>,
}

impl CompilerState {
    fn start(initial: Line, capacity: usize) -> Self {
        let mut known_lines = HashSet::new();
        known_lines.insert(initial.clone());

        let mut directives = Vec::with_capacity(capacity + 1);
        directives.push(Directive::Init {
            line: initial.clone(),
        });

        Self {
            current_line: initial,
            known_lines,
            commit_to_line: HashMap::with_capacity(capacity),
            created_lines: Vec::new(),
            directives,
        }
    }

    /// Make `target` the active line, declaring it first if needed.
    fn activate(&mut self, target: Line) {
        if target == self.current_line {
            return;
        }
        if self.known_lines.insert(target.clone()) {
            self.directives.push(Directive::Create {
                line: target.clone(),
            });
            self.created_lines.push(target.clone());
        }
        self.directives.push(Directive::Switch {
            line: target.clone(),
        });
        self.current_line = target;
    }

    fn record(&mut self, commit: &Commit) {
        let line = self.current_line.clone();
        self.commit_to_line.entry(commit.id.clone()).or_insert(line);

        let directive = if commit.is_merge() {
            match merge_source(&commit.parents, &self.commit_to_line, &self.current_line) {
                Some(from) => Directive::Merge {
                    from: from.clone(),
                    id: commit.id.clone(),
                },
                None => Directive::CommitFallbackMerge {
                    id: commit.id.clone(),
                },
            }
        } else {
            Directive::Commit {
                id: commit.id.clone(),
            }
        };
        self.directives.push(directive);
    }

    fn finish(self, initial_line: Line) -> Compilation {
        Compilation {
            initial_line,
            created_lines: self.created_lines,
            directives: self.directives,
        }
    }
}

/// Pick the line a merge commit's changes came from.
///
/// Scans `parents` in order and returns the line of the first parent that
/// was already drawn on a line other than `current`. Parents not seen yet
/// are skipped. `None` means the source cannot be told apart from the
/// current line (including octopus merges whose parents all share it).
pub fn merge_source<'a>(
    parents: &[CommitId],
    commit_to_line: &'a HashMap<CommitId, Line>,
    current: &Line,
) -> Option<&'a Line> {
    parents
        .iter()
        .filter_map(|parent| commit_to_line.get(parent))
        .find(|line| *line != current)
}

/// Choose the line a commit is drawn on.
///
/// Priority: stay on `current` when it decorates the commit, then the
/// initial line, then the smallest decorating branch; an undecorated
/// commit continues on `current`.
fn target_line(current: &Line, initial: &Line, decorating: &BTreeSet<BranchName>) -> Line {
    if decorating.contains(current.as_str()) {
        return current.clone();
    }
    if decorating.contains(initial.as_str()) {
        return initial.clone();
    }
    match decorating.first() {
        Some(branch) => Line::from(branch),
        None => current.clone(),
    }
}

/// Compiles commit histories against a fixed set of local branches.
///
/// # Example
///
/// ```
/// use branchviz::core::compiler::{Directive, LineCompiler};
/// use branchviz::core::types::{BranchName, BranchSet, Commit, CommitId, Line};
///
/// let known: BranchSet = [BranchName::new("main").unwrap()].into_iter().collect();
/// let c1 = CommitId::new("c1").unwrap();
/// let commits = vec![Commit::new(c1.clone(), vec![], "HEAD -> main")];
///
/// let out = LineCompiler::new(&known).run(&commits);
/// assert_eq!(
///     out.directives,
///     vec![
///         Directive::Init { line: Line::new("main") },
///         Directive::Commit { id: c1 },
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct LineCompiler<'a> {
    known: &'a BranchSet,
    resolver: Resolver,
}

impl<'a> LineCompiler<'a> {
    /// Create a compiler using the default decoration resolver.
    pub fn new(known: &'a BranchSet) -> Self {
        Self {
            known,
            resolver: Resolver::default(),
        }
    }

    /// Use `resolver` to interpret decorations.
    pub fn with_resolver(mut self, resolver: Resolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Select the first line of the diagram.
    ///
    /// `main`, then `master`, then the smallest local branch. Without any
    /// local branches, the first HEAD target found in the history (remote
    /// prefix removed), and finally [`FALLBACK_LINE`].
    pub fn initial_line(&self, commits: &[Commit]) -> Line {
        if let Some(preferred) = PREFERRED_INITIAL_LINES
            .iter()
            .find(|name| self.known.contains(**name))
        {
            return Line::new(*preferred);
        }
        if let Some(first) = self.known.first() {
            return Line::from(first);
        }
        commits
            .iter()
            .find_map(|commit| self.resolver.head_line_name(&commit.decoration_raw))
            .map(Line::new)
            .unwrap_or_else(|| Line::new(FALLBACK_LINE))
    }

    /// Compile `commits` (oldest first) into directives.
    ///
    /// Never fails. An empty history yields only the init directive; callers
    /// render their own placeholder for that case.
    pub fn run(&self, commits: &[Commit]) -> Compilation {
        let initial = self.initial_line(commits);
        let mut state = CompilerState::start(initial.clone(), commits.len());

        for commit in commits {
            let decorating = self.resolver.resolve(&commit.decoration_raw, self.known);
            let target = target_line(&state.current_line, &initial, &decorating);
            state.activate(target);
            state.record(commit);
        }

        state.finish(initial)
    }
}

/// Compile `commits` against `known` with the default resolver.
pub fn compile(commits: &[Commit], known: &BranchSet) -> Vec<Directive> {
    LineCompiler::new(known).run(commits).directives
}
