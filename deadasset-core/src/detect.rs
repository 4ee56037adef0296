//! Unused file detection.

use crate::graph::UsageGraph;

/// Candidates never marked used, in sorted order.
pub fn find_unused(graph: &UsageGraph) -> Vec<&str> {
    graph
        .candidates()
        .difference(graph.used())
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_unused_is_set_difference() {
        let mut g = UsageGraph::new();
        g.add_candidate("public/css/old.css");
        g.add_candidate("public/css/app.css");
        g.add_candidate("resources/views/home.blade.php");
        g.mark_used("public/css/app.css");
        g.mark_used("resources/views/home.blade.php");
        // Used but not a candidate: irrelevant to the result.
        g.mark_used("app/Models/User.php");

        assert_eq!(find_unused(&g), vec!["public/css/old.css"]);
    }

    #[test]
    fn test_find_unused_sorted() {
        let mut g = UsageGraph::new();
        g.add_candidate("z.js");
        g.add_candidate("a.js");
        assert_eq!(find_unused(&g), vec!["a.js", "z.js"]);
    }
}
