//! Session adapter over the registry.
//!
//! `MockConn` is what code under test talks to in place of a real database
//! session. It extracts nothing from the SQL text itself; it hands query and
//! bound values to the registry and translates the selected rule into either
//! result rows, an execution summary, or an injected connection failure.

use crate::error::ConnError;
use crate::fault::StatementKind;
use crate::registry::{self, SharedRegistry};
use crate::rule::ResponseRule;
use crate::value::{Row, Value};

/// A fake database session bound to a registry.
#[derive(Clone)]
pub struct MockConn {
    registry: SharedRegistry,
}

impl MockConn {
    /// Session over an independent registry handle.
    pub fn new(registry: SharedRegistry) -> Self {
        Self { registry }
    }

    /// Session over the process-wide default registry.
    pub fn global() -> Self {
        Self::new(registry::global())
    }

    /// The registry this session consults.
    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    /// Run a query-style statement: serve the matching rule's rows, or a
    /// broken-connection error when its query fault fires.
    pub fn query(&self, sql: &str, args: &[Value]) -> Result<Rows, ConnError> {
        let rule = self.find(sql, args);
        if rule.fault_active(StatementKind::Query) {
            return Err(ConnError::BadConn(StatementKind::Query));
        }
        self.observe(&rule, sql, args);
        Ok(Rows::new(rule.payload))
    }

    /// Run an execution-style statement: report the matching rule's affected
    /// rows and last-insert id, or a broken-connection error when its exec
    /// fault fires.
    pub fn execute(&self, sql: &str, args: &[Value]) -> Result<ExecResult, ConnError> {
        let rule = self.find(sql, args);
        if rule.fault_active(StatementKind::Exec) {
            return Err(ConnError::BadConn(StatementKind::Exec));
        }
        self.observe(&rule, sql, args);
        Ok(ExecResult {
            rows_affected: rule.rows_affected,
            last_insert_id: rule.last_insert_id,
        })
    }

    fn find(&self, sql: &str, args: &[Value]) -> ResponseRule {
        self.registry.lock().find_response(sql, args)
    }

    // The callback is an observation of a served response; a faulted call
    // never reaches it.
    fn observe(&self, rule: &ResponseRule, sql: &str, args: &[Value]) {
        if let Some(callback) = &rule.callback {
            callback(sql, args);
        }
    }
}

/// Execution summary for mutation-style statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecResult {
    pub rows_affected: i64,
    pub last_insert_id: i64,
}

/// Result-set iterator over a rule's payload, preserving row order.
#[derive(Debug, Clone)]
pub struct Rows {
    columns: Vec<String>,
    rows: Vec<Row>,
    pos: usize,
}

impl Rows {
    fn new(rows: Vec<Row>) -> Self {
        // Column order is not part of the contract; sort for determinism.
        let mut columns: Vec<String> = rows
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default();
        columns.sort();
        Self {
            columns,
            rows,
            pos: 0,
        }
    }

    /// Column names of the result set, sorted.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Total number of rows in the payload, regardless of iteration state.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl Iterator for Rows {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        let row = self.rows.get(self.pos).cloned();
        self.pos += 1;
        row
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.rows.len().saturating_sub(self.pos);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Rows {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ResponseRegistry;
    use crate::rows_from_json;
    use serde_json::json;

    #[test]
    fn test_query_serves_payload_in_row_order() {
        let registry = ResponseRegistry::shared();
        registry.lock().new_rule().with_reply(rows_from_json(json!([
            {"id": 1},
            {"id": 2},
            {"id": 3},
        ])));

        let conn = MockConn::new(registry);
        let rows = conn.query("SELECT id FROM t", &[]).unwrap();
        assert_eq!(rows.columns(), ["id".to_string()]);
        let ids: Vec<Value> = rows.map(|row| row["id"].clone()).collect();
        assert_eq!(ids, [Value::Int(1), Value::Int(2), Value::Int(3)]);
    }

    #[test]
    fn test_columns_empty_for_empty_payload() {
        let registry = ResponseRegistry::shared();
        let conn = MockConn::new(registry);
        let mut rows = conn.query("SELECT 1", &[]).unwrap();
        assert!(rows.columns().is_empty());
        assert_eq!(rows.row_count(), 0);
        assert!(rows.next().is_none());
    }

    #[test]
    fn test_execute_reports_mutation_counters() {
        let registry = ResponseRegistry::shared();
        registry
            .lock()
            .new_rule()
            .with_query("INSERT INTO t")
            .with_rows_num(1)
            .with_id(42);

        let conn = MockConn::new(registry);
        let result = conn.execute("INSERT INTO t (a) VALUES (1)", &[]).unwrap();
        assert_eq!(
            result,
            ExecResult {
                rows_affected: 1,
                last_insert_id: 42
            }
        );
    }

    #[test]
    fn test_query_fault_does_not_break_execute() {
        let registry = ResponseRegistry::shared();
        registry.lock().new_rule().with_query_exception();

        let conn = MockConn::new(registry);
        assert!(conn.query("SELECT 1", &[]).is_err());
        assert!(conn.execute("DELETE FROM t", &[]).is_ok());
    }

    #[test]
    fn test_independent_registries_are_isolated() {
        let first = ResponseRegistry::shared();
        first.lock().new_rule().with_query("SELECT").with_id(7);

        let second = MockConn::new(ResponseRegistry::shared());
        let rows = second.query("SELECT 1", &[]).unwrap();
        assert_eq!(rows.row_count(), 0);
        assert_eq!(first.lock().len(), 1);
    }
}
