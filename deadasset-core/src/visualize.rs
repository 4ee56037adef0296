//! Graphviz DOT visualization of the reference graph.
//!
//! - used candidates are lightgreen
//! - unused candidates are lightcoral
//! - everything else (routes, controllers, route paths) is lightgray
//! - edges point from the referencing file to the referenced target

use std::fmt::Write;

use crate::graph::{build_reference_graph, UsageGraph};

/// Escape a string for use inside a double-quoted DOT identifier.
fn dot_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Generate a Graphviz DOT representation of the usage graph.
pub fn generate_dot(graph: &UsageGraph) -> String {
    // ~80 bytes/node + ~60 bytes/edge + header/footer
    let estimated_capacity =
        (graph.candidates().len() + graph.references().len()) * 80 + graph.edge_count() * 60 + 150;
    let mut dot = String::with_capacity(estimated_capacity);

    if let Err(e) = write_dot_content(&mut dot, graph) {
        tracing::error!(error = %e, "failed to generate DOT string");
        return "digraph deadasset {\n}\n".to_string();
    }

    dot
}

fn write_dot_content(dot: &mut String, graph: &UsageGraph) -> std::fmt::Result {
    let mut g = build_reference_graph(graph);
    for candidate in graph.candidates() {
        g.add_node(candidate.as_str());
    }

    writeln!(dot, "digraph deadasset {{")?;
    writeln!(dot, "  rankdir=LR;")?;
    writeln!(
        dot,
        "  node [shape=box, style=filled, fontname=\"JetBrains Mono\"];"
    )?;
    writeln!(dot)?;

    let mut nodes: Vec<&str> = g.nodes().collect();
    nodes.sort_unstable();
    for node in &nodes {
        let color = if !graph.is_candidate(node) {
            "lightgray"
        } else if graph.is_used(node) {
            "lightgreen"
        } else {
            "lightcoral"
        };
        writeln!(dot, "  \"{}\" [fillcolor={}];", dot_escape(node), color)?;
    }

    writeln!(dot)?;

    let mut edges: Vec<(&str, &str)> = g.all_edges().map(|(from, to, _)| (from, to)).collect();
    edges.sort_unstable();
    for (from, to) in edges {
        writeln!(dot, "  \"{}\" -> \"{}\";", dot_escape(from), dot_escape(to))?;
    }

    writeln!(dot, "}}")?;
    Ok(())
}
