use minipack_foundation::ModuleGraph;
use std::fmt::Write;

/// Human-readable listing: each module, then `specifier -> identity` for
/// each of its imports, then a totals line.
pub fn summary(graph: &ModuleGraph) -> String {
    let mut out = String::new();
    for (id, asset) in graph {
        let _ = writeln!(out, "{}", id);
        for (specifier, dep) in &asset.mapping {
            let _ = writeln!(out, "  {} -> {}", specifier, dep);
        }
    }
    let summary = graph.summary();
    let _ = write!(
        out,
        "{} modules, {} imports",
        summary.module_count, summary.edge_count
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use minipack_foundation::{Asset, ModuleId};

    #[test]
    fn test_summary_lists_modules_and_mappings() {
        let mut entry = Asset::new(ModuleId::from("/app/index.js"), "", vec!["./a".to_string()]);
        entry
            .mapping
            .insert("./a".to_string(), ModuleId::from("/app/a.js"));
        let mut graph = ModuleGraph::with_entry(entry);
        graph.insert_new(Asset::new(ModuleId::from("/app/a.js"), "", vec![]));

        let text = summary(&graph);
        assert_eq!(
            text,
            "/app/index.js\n  ./a -> /app/a.js\n/app/a.js\n2 modules, 1 imports"
        );
    }
}
