//! Session-boundary errors.
//!
//! The core registry never returns a recoverable error from its own API; the
//! only error type lives at the session boundary, where injected faults
//! surface as broken connections.

use crate::fault::StatementKind;

#[derive(Debug, thiserror::Error)]
pub enum ConnError {
    /// A matching rule's fault hook fired for this call kind.
    #[error("bad connection: injected {0} fault")]
    BadConn(StatementKind),
}
