//! Derivation tree to DOT (Graphviz) conversion.
//!
//! [`DotWriter`] is a [`TraceSink`] that streams the derivation tree as a DOT
//! digraph while the solver runs. Render the result with Graphviz tools, e.g.
//! `dot -Tpng derivation.dot -o derivation.png`.
//!
//! # DOT Format
//!
//! - **Nodes** are boxes labeled with the node's equation (or system)
//! - **Edges** are labeled with the substitution that produced the child
//! - **Dotted edges** point from a repeated node back to the ancestor it repeats
//!
//! # Examples
//!
//! ```
//! use weq_rs::dot::DotWriter;
//! use weq_rs::options::{PrintOptions, SolveOptions};
//! use weq_rs::solver::Solver;
//!
//! let mut solver = Solver::new("{a}", "{u, v}", "u a v = v a u", PrintOptions::default(), SolveOptions::default()).unwrap();
//! let mut dot = DotWriter::new(Vec::new());
//! solver.solve(&mut dot).unwrap();
//!
//! let text = String::from_utf8(dot.into_inner()).unwrap();
//! assert!(text.starts_with("digraph derivation {"));
//! ```

use std::io::Write;

use crate::reference::NodeId;
use crate::trace::{TraceError, TraceSink};

/// Configuration options for DOT output generation.
///
/// # Examples
///
/// ```
/// use weq_rs::dot::{DotConfig, DotWriter};
///
/// let config = DotConfig {
///     node_shape: "ellipse",
///     ..DotConfig::default()
/// };
/// let writer = DotWriter::with_config(Vec::new(), config);
/// ```
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Name of the digraph (default: "derivation")
    pub graph_name: &'static str,
    /// Shape for nodes (default: "box")
    pub node_shape: &'static str,
    /// Style for back edges to repeated ancestors (default: "dotted")
    pub repeat_edge_style: &'static str,
    /// Whether to emit edge labels (default: true)
    pub edge_labels: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            graph_name: "derivation",
            node_shape: "box",
            repeat_edge_style: "dotted",
            edge_labels: true,
        }
    }
}

impl DotConfig {
    pub fn with_node_shape(mut self, shape: &'static str) -> Self {
        self.node_shape = shape;
        self
    }

    pub fn with_edge_labels(mut self, edge_labels: bool) -> Self {
        self.edge_labels = edge_labels;
        self
    }
}

/// Streaming DOT sink over any [`Write`].
#[derive(Debug)]
pub struct DotWriter<W: Write> {
    out: W,
    config: DotConfig,
}

impl<W: Write> DotWriter<W> {
    pub fn new(out: W) -> Self {
        Self::with_config(out, DotConfig::default())
    }

    pub fn with_config(out: W, config: DotConfig) -> Self {
        Self { out, config }
    }

    pub fn config(&self) -> &DotConfig {
        &self.config
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

impl<W: Write> TraceSink for DotWriter<W> {
    fn start_description(&mut self) -> Result<(), TraceError> {
        writeln!(self.out, "digraph {} {{", self.config.graph_name)?;
        writeln!(self.out, "node [shape={}];", self.config.node_shape)?;
        Ok(())
    }

    fn end_description(&mut self) -> Result<(), TraceError> {
        writeln!(self.out, "}}")?;
        self.out.flush()?;
        Ok(())
    }

    fn write_node(&mut self, id: NodeId, label: &str) -> Result<(), TraceError> {
        writeln!(self.out, "{} [label=\"{}\"];", id, escape(label))?;
        Ok(())
    }

    fn write_edge(&mut self, from: NodeId, to: NodeId) -> Result<(), TraceError> {
        writeln!(self.out, "{} -> {};", from, to)?;
        Ok(())
    }

    fn write_labeled_edge(&mut self, from: NodeId, to: NodeId, label: &str) -> Result<(), TraceError> {
        if self.config.edge_labels {
            writeln!(self.out, "{} -> {} [label=\"{}\"];", from, to, escape(label))?;
            Ok(())
        } else {
            self.write_edge(from, to)
        }
    }

    fn write_dotted_edge(&mut self, from: NodeId, to: NodeId) -> Result<(), TraceError> {
        writeln!(
            self.out,
            "{} -> {} [style={}, constraint=false];",
            from, to, self.config.repeat_edge_style
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut DotWriter<Vec<u8>>) -> Result<(), TraceError>) -> String {
        let mut dot = DotWriter::new(Vec::new());
        dot.start_description().unwrap();
        f(&mut dot).unwrap();
        dot.end_description().unwrap();
        String::from_utf8(dot.into_inner()).unwrap()
    }

    #[test]
    fn test_empty_graph() {
        let text = render(|_| Ok(()));
        assert_eq!(text, "digraph derivation {\nnode [shape=box];\n}\n");
    }

    #[test]
    fn test_nodes_and_edges() {
        let (a, b) = (NodeId::new(0), NodeId::new(1));
        let text = render(|dot| {
            dot.write_node(a, "u a = a u")?;
            dot.write_node(b, "say \"hi\"")?;
            dot.write_labeled_edge(a, b, "u -> $")?;
            dot.write_dotted_edge(b, a)
        });
        assert!(text.contains("n0 [label=\"u a = a u\"];\n"));
        assert!(text.contains("n1 [label=\"say \\\"hi\\\"\"];\n"));
        assert!(text.contains("n0 -> n1 [label=\"u -> $\"];\n"));
        assert!(text.contains("n1 -> n0 [style=dotted, constraint=false];\n"));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn test_without_edge_labels() {
        let mut dot = DotWriter::with_config(Vec::new(), DotConfig::default().with_edge_labels(false));
        dot.write_labeled_edge(NodeId::new(2), NodeId::new(3), "split").unwrap();
        assert_eq!(String::from_utf8(dot.into_inner()).unwrap(), "n2 -> n3;\n");
    }
}
