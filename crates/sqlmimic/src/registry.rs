//! Ordered rule registry with first-match lookup.
//!
//! Rules are scanned linearly in registration order. Test suites hold tens of
//! rules, and the predicates (substring containment, deep argument equality,
//! once-state) need arbitrary evaluation anyway, so nothing is indexed.

use crate::rule::ResponseRule;
use crate::value::Value;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

/// A registry handle shareable between the configuring test and sessions.
pub type SharedRegistry = Arc<Mutex<ResponseRegistry>>;

static GLOBAL: Lazy<SharedRegistry> = Lazy::new(|| Arc::new(Mutex::new(ResponseRegistry::new())));

/// The process-wide default registry. Lives for the process lifetime; `reset`
/// clears its contents, never its identity. Prefer independent registries
/// (`ResponseRegistry::shared`) when tests run concurrently.
pub fn global() -> SharedRegistry {
    Arc::clone(&GLOBAL)
}

/// Ordered collection of response rules plus the two diagnostic flags.
#[derive(Debug, Default)]
pub struct ResponseRegistry {
    rules: Vec<ResponseRule>,
    logging: bool,
    panic_on_no_match: bool,
}

impl ResponseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh registry behind a shareable handle.
    pub fn shared() -> SharedRegistry {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Emit a diagnostic line for every lookup.
    pub fn set_logging(&mut self, enabled: bool) -> &mut Self {
        self.logging = enabled;
        self
    }

    /// Treat an unmatched lookup as a fatal failure instead of serving the
    /// empty default response.
    pub fn set_panic_on_no_match(&mut self, enabled: bool) -> &mut Self {
        self.panic_on_no_match = enabled;
        self
    }

    /// Append pre-built rules. No validation; overlapping patterns are fine,
    /// registration order is the tie-break.
    pub fn attach(&mut self, rules: impl IntoIterator<Item = ResponseRule>) {
        self.rules.extend(rules);
    }

    /// Append a default rule and hand it back for builder chaining.
    ///
    /// The rule is part of the registry from this moment on: a lookup racing
    /// the builder chain can select it half-configured. Documented contract,
    /// kept from the source system.
    pub fn new_rule(&mut self) -> &mut ResponseRule {
        self.rules.push(ResponseRule::new());
        self.rules.last_mut().expect("rule was just pushed")
    }

    /// First registered rule matching the query/argument pair, marked
    /// triggered. Falls back to a fresh empty rule when nothing matches,
    /// or panics in fail-loud mode.
    pub fn find_response(&mut self, query: &str, args: &[Value]) -> ResponseRule {
        if self.logging {
            debug!(
                "checking incoming query against {} rules: {}",
                self.rules.len(),
                query
            );
        }

        for rule in &mut self.rules {
            if rule.is_match(query, args) {
                rule.mark_triggered();
                return rule.clone();
            }
        }

        if self.panic_on_no_match {
            panic!("no registered response matches query: {query}");
        }

        ResponseRule::new()
    }

    /// Drop every rule; the logging and panic flags survive. Chainable so a
    /// test can reset and re-register in one expression.
    pub fn reset(&mut self) -> &mut Self {
        self.rules.clear();
        self
    }

    /// Registered rules in registration order.
    pub fn rules(&self) -> &[ResponseRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
