//! A single response rule: match predicate, canned payload, trigger state.

use crate::fault::{FaultHooks, StatementKind};
use crate::value::{Row, Value};
use std::fmt;
use std::sync::Arc;

/// Observation hook invoked with the matched `(query, args)` pair.
pub type MatchCallback = Arc<dyn Fn(&str, &[Value]) + Send + Sync>;

/// Argument expectation for a rule.
///
/// `Exact(vec![])` means "match only zero-argument calls"; `Any` means the
/// arguments are not checked at all.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ArgSpec {
    #[default]
    Any,
    Exact(Vec<Value>),
}

impl ArgSpec {
    /// Element-by-element, length-for-length deep equality, or always true
    /// for `Any`.
    pub fn matches(&self, supplied: &[Value]) -> bool {
        match self {
            ArgSpec::Any => true,
            ArgSpec::Exact(expected) => expected.as_slice() == supplied,
        }
    }
}

/// A registered rule: query/argument predicate plus the canned response to
/// serve when it matches.
#[derive(Clone, Default)]
pub struct ResponseRule {
    /// Literal substring to look for in the incoming query. Empty matches
    /// any query.
    pub pattern: String,
    pub args: ArgSpec,
    /// Result rows served for query-style calls.
    pub payload: Vec<Row>,
    /// Eligible for at most one successful match.
    pub once: bool,
    /// Set on first selection; cleared only by a registry reset.
    pub triggered: bool,
    pub rows_affected: i64,
    pub last_insert_id: i64,
    pub faults: FaultHooks,
    pub callback: Option<MatchCallback>,
}

impl ResponseRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Combined match predicate. An exhausted one-time rule never matches.
    pub fn is_match(&self, query: &str, args: &[Value]) -> bool {
        if self.once && self.triggered {
            return false;
        }
        self.is_query_match(query) && self.args.matches(args)
    }

    fn is_query_match(&self, query: &str) -> bool {
        self.pattern.is_empty() || query.contains(&self.pattern)
    }

    pub fn mark_triggered(&mut self) {
        self.triggered = true;
    }

    // ------------------------------------------------------------------
    // Builder methods. Each mutates in place and returns `&mut Self` for
    // chaining; none of them validate or fail.
    // ------------------------------------------------------------------

    /// Set the substring pattern the incoming query must contain.
    pub fn with_query(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.pattern = pattern.into();
        self
    }

    /// Set the expected bound arguments.
    ///
    /// Calling this with zero values is a no-op: the rule keeps its current
    /// argument expectation. Use [`expect_no_args`](Self::expect_no_args) to
    /// match only zero-argument calls.
    pub fn with_args<I, V>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = args.into_iter().map(Into::into).collect();
        if !values.is_empty() {
            self.args = ArgSpec::Exact(values);
        }
        self
    }

    /// Match only calls that bind no arguments at all.
    pub fn expect_no_args(&mut self) -> &mut Self {
        self.args = ArgSpec::Exact(Vec::new());
        self
    }

    /// Set the result rows served for query-style calls.
    pub fn with_reply(&mut self, rows: Vec<Row>) -> &mut Self {
        self.payload = rows;
        self
    }

    /// Make the rule eligible for a single match only.
    pub fn one_time(&mut self) -> &mut Self {
        self.once = true;
        self
    }

    /// Fail every matching execution call with a broken connection.
    pub fn with_exec_exception(&mut self) -> &mut Self {
        self.faults.on_exec = Some(FaultHooks::always());
        self
    }

    /// Fail every matching query call with a broken connection.
    pub fn with_query_exception(&mut self) -> &mut Self {
        self.faults.on_query = Some(FaultHooks::always());
        self
    }

    /// Install an arbitrary fault predicate for execution calls.
    pub fn with_exec_fault_hook<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.faults.on_exec = Some(Arc::new(hook));
        self
    }

    /// Install an arbitrary fault predicate for query calls.
    pub fn with_query_fault_hook<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.faults.on_query = Some(Arc::new(hook));
        self
    }

    /// Install an observation hook invoked with the matched query and
    /// argument values.
    pub fn with_callback<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&str, &[Value]) + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    /// Affected-row count reported for execution calls.
    pub fn with_rows_num(&mut self, rows: i64) -> &mut Self {
        self.rows_affected = rows;
        self
    }

    /// Last-insert id reported for execution calls.
    pub fn with_id(&mut self, id: i64) -> &mut Self {
        self.last_insert_id = id;
        self
    }

    /// Whether the fault hook for the given call kind fires.
    pub fn fault_active(&self, kind: StatementKind) -> bool {
        self.faults.active_for(kind)
    }
}

impl fmt::Debug for ResponseRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseRule")
            .field("pattern", &self.pattern)
            .field("args", &self.args)
            .field("payload_rows", &self.payload.len())
            .field("once", &self.once)
            .field("triggered", &self.triggered)
            .field("rows_affected", &self.rows_affected)
            .field("last_insert_id", &self.last_insert_id)
            .field("faults", &self.faults)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}
