//! Code emission.

use crate::EcmaModule;
use minipack_config::Target;
use minipack_foundation::{BuildError, BuildResult, ModuleId};
use swc_ecma_ast::EsVersion;
use swc_ecma_codegen::{text_writer::JsWriter, Config, Emitter};

/// SWC version for a configured target.
pub fn es_version(target: Target) -> EsVersion {
    match target {
        Target::Es5 => EsVersion::Es5,
        Target::Es2015 => EsVersion::Es2015,
        Target::Es2016 => EsVersion::Es2016,
        Target::Es2017 => EsVersion::Es2017,
        Target::Es2018 => EsVersion::Es2018,
        Target::Es2019 => EsVersion::Es2019,
        Target::Es2020 => EsVersion::Es2020,
        Target::Es2021 => EsVersion::Es2021,
        Target::Es2022 => EsVersion::Es2022,
        Target::EsNext => EsVersion::EsNext,
    }
}

/// Print a parsed module for `target`.
///
/// The printer only adapts syntax it emits itself; it does not rewrite
/// language features the target lacks.
pub fn emit_module(
    id: &ModuleId,
    ast: &EcmaModule,
    target: EsVersion,
    minify: bool,
) -> BuildResult<String> {
    let mut buf = vec![];
    {
        let mut emitter = Emitter {
            cfg: Config::default().with_target(target).with_minify(minify),
            cm: ast.source_map.clone(),
            comments: None,
            wr: JsWriter::new(ast.source_map.clone(), "\n", &mut buf, None),
        };

        emitter
            .emit_module(&ast.module)
            .map_err(|e| BuildError::transform(id.clone(), format!("Failed to emit code: {}", e)))?;
    }

    String::from_utf8(buf).map_err(|e| {
        BuildError::transform(
            id.clone(),
            format!("Emitted code is not valid UTF-8: {}", e),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_module;

    #[test]
    fn test_emits_imports_and_body() {
        let id = ModuleId::from("/app/index.js");
        let ast = parse_module(&id, "import { a } from './a';\nexport default a + 1;\n").unwrap();

        let code = emit_module(&id, &ast, EsVersion::Es5, false).unwrap();
        assert!(code.contains("./a"));
        assert!(code.contains("export default a + 1"));
    }

    #[test]
    fn test_minify_drops_whitespace() {
        let id = ModuleId::from("/app/index.js");
        let ast = parse_module(&id, "const value = 1 + 2;\nconsole.log(value);\n").unwrap();

        let pretty = emit_module(&id, &ast, EsVersion::Es2020, false).unwrap();
        let minified = emit_module(&id, &ast, EsVersion::Es2020, true).unwrap();
        assert!(minified.len() < pretty.len());
    }

    #[test]
    fn test_target_mapping() {
        assert_eq!(es_version(Target::Es5), EsVersion::Es5);
        assert_eq!(es_version(Target::EsNext), EsVersion::EsNext);
    }
}
