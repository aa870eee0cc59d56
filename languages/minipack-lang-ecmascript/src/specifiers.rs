//! Dependency specifier extraction.
//!
//! Collected, in source order:
//! - `import ... from "x"` and side-effect `import "x"`
//! - `export { ... } from "x"` and `export * from "x"`
//! - dynamic `import("x")`
//! - CommonJS `require("x")`
//!
//! Type-only imports and exports are erased at runtime and are skipped, as
//! are calls whose argument is not a single string literal.

use crate::EcmaModule;
use swc_ecma_ast::{
    CallExpr, Callee, ExportAll, Expr, ExprOrSpread, ImportDecl, Lit, NamedExport, Str,
};
use swc_ecma_visit::{Visit, VisitWith};

/// All dependency specifiers of a module, duplicates kept.
pub fn collect_specifiers(ast: &EcmaModule) -> Vec<String> {
    let mut collector = SpecifierCollector::default();
    ast.module.visit_with(&mut collector);
    collector.specifiers
}

#[derive(Default)]
struct SpecifierCollector {
    specifiers: Vec<String>,
}

impl SpecifierCollector {
    /// Record the literal's cooked value, with escapes decoded.
    fn push(&mut self, literal: &Str) {
        let value = literal.value.to_atom_lossy();
        let value: &str = value.as_ref();
        self.specifiers.push(value.to_string());
    }

    fn push_single_literal(&mut self, args: &[ExprOrSpread]) {
        if let [ExprOrSpread { spread: None, expr }] = args {
            if let Expr::Lit(Lit::Str(literal)) = &**expr {
                self.push(literal);
            }
        }
    }
}

impl Visit for SpecifierCollector {
    fn visit_import_decl(&mut self, node: &ImportDecl) {
        if !node.type_only {
            self.push(&node.src);
        }
    }

    fn visit_named_export(&mut self, node: &NamedExport) {
        if node.type_only {
            return;
        }
        if let Some(src) = &node.src {
            self.push(src);
        }
    }

    fn visit_export_all(&mut self, node: &ExportAll) {
        if !node.type_only {
            self.push(&node.src);
        }
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        match &node.callee {
            Callee::Import(_) => self.push_single_literal(&node.args),
            Callee::Expr(callee) if is_require(callee) => self.push_single_literal(&node.args),
            _ => {}
        }
        // Calls nested in arguments, e.g. `wrap(require("./x"))`
        node.visit_children_with(self);
    }
}

fn is_require(callee: &Expr) -> bool {
    matches!(callee, Expr::Ident(ident) if &*ident.sym == "require")
}
