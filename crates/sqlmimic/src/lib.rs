//! Canned-response test double for SQL client code.
//!
//! Register response rules against a [`ResponseRegistry`], point a
//! [`MockConn`] at it, and the code under test gets fixture rows, execution
//! summaries, or injected connection failures instead of a real database.
//! Rules are matched in registration order: the first rule whose substring
//! pattern and argument expectation both hold wins.
//!
//! # Example
//!
//! ```
//! use sqlmimic::{MockConn, ResponseRegistry, Value};
//!
//! let registry = ResponseRegistry::shared();
//! registry
//!     .lock()
//!     .new_rule()
//!     .with_query("SELECT name FROM users")
//!     .with_reply(sqlmimic::rows_from_json(serde_json::json!([
//!         {"id": 1, "name": "ada"}
//!     ])));
//!
//! let conn = MockConn::new(registry);
//! let mut rows = conn
//!     .query("SELECT name FROM users WHERE id = ?", &[Value::from(1_i64)])
//!     .expect("no fault installed");
//! let row = rows.next().expect("one fixture row");
//! assert_eq!(row["name"], Value::from("ada"));
//! ```
//!
//! Each test owns its registry (`ResponseRegistry::shared`), or shares the
//! process-wide default via [`global`] / [`MockConn::global`] and calls
//! `reset` between tests.

mod connection;
mod error;
mod fault;
mod registry;
mod rule;
mod value;

pub use connection::{ExecResult, MockConn, Rows};
pub use error::ConnError;
pub use fault::{FaultHook, FaultHooks, StatementKind};
pub use registry::{global, ResponseRegistry, SharedRegistry};
pub use rule::{ArgSpec, MatchCallback, ResponseRule};
pub use value::{rows_from_json, Row, Value};
