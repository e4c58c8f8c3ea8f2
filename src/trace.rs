//! Observability seam of the solver.
//!
//! The derivation engine reports every node and edge it creates to a
//! [`TraceSink`]. Sinks may fail (e.g. on I/O); a failure aborts the run.

use std::error::Error as StdError;

use crate::reference::NodeId;

pub type TraceError = Box<dyn StdError + Send + Sync>;

pub trait TraceSink {
    fn start_description(&mut self) -> Result<(), TraceError>;
    fn end_description(&mut self) -> Result<(), TraceError>;
    fn write_node(&mut self, id: NodeId, label: &str) -> Result<(), TraceError>;
    fn write_edge(&mut self, from: NodeId, to: NodeId) -> Result<(), TraceError>;
    fn write_labeled_edge(&mut self, from: NodeId, to: NodeId, label: &str) -> Result<(), TraceError>;
    /// Back edge from a repeated node to the ancestor it repeats.
    fn write_dotted_edge(&mut self, from: NodeId, to: NodeId) -> Result<(), TraceError>;
}

/// Sink that discards everything.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoTrace;

impl TraceSink for NoTrace {
    fn start_description(&mut self) -> Result<(), TraceError> {
        Ok(())
    }

    fn end_description(&mut self) -> Result<(), TraceError> {
        Ok(())
    }

    fn write_node(&mut self, _id: NodeId, _label: &str) -> Result<(), TraceError> {
        Ok(())
    }

    fn write_edge(&mut self, _from: NodeId, _to: NodeId) -> Result<(), TraceError> {
        Ok(())
    }

    fn write_labeled_edge(&mut self, _from: NodeId, _to: NodeId, _label: &str) -> Result<(), TraceError> {
        Ok(())
    }

    fn write_dotted_edge(&mut self, _from: NodeId, _to: NodeId) -> Result<(), TraceError> {
        Ok(())
    }
}
