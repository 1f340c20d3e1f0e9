//! Injected connection faults.
//!
//! A rule can carry one hook per statement kind. When the hook is present and
//! reports `true` at lookup time, the session layer surfaces a
//! broken-connection error instead of the rule's payload. The two hooks are
//! independent switches.

use std::fmt;
use std::sync::Arc;

/// Zero-argument fault predicate attached to a rule.
pub type FaultHook = Arc<dyn Fn() -> bool + Send + Sync>;

/// The two call kinds a fault can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Query,
    Exec,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatementKind::Query => write!(f, "query"),
            StatementKind::Exec => write!(f, "exec"),
        }
    }
}

/// Per-rule fault hooks, absent by default.
#[derive(Clone, Default)]
pub struct FaultHooks {
    pub on_query: Option<FaultHook>,
    pub on_exec: Option<FaultHook>,
}

impl FaultHooks {
    /// Hook that fires unconditionally.
    pub fn always() -> FaultHook {
        Arc::new(|| true)
    }

    /// Evaluate the hook for the given call kind. Absent hook means no fault.
    pub fn active_for(&self, kind: StatementKind) -> bool {
        let hook = match kind {
            StatementKind::Query => &self.on_query,
            StatementKind::Exec => &self.on_exec,
        };
        hook.as_ref().map(|h| h()).unwrap_or(false)
    }

    pub fn query_fault_active(&self) -> bool {
        self.active_for(StatementKind::Query)
    }

    pub fn exec_fault_active(&self) -> bool {
        self.active_for(StatementKind::Exec)
    }
}

impl fmt::Debug for FaultHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaultHooks")
            .field("on_query", &self.on_query.is_some())
            .field("on_exec", &self.on_exec.is_some())
            .finish()
    }
}
