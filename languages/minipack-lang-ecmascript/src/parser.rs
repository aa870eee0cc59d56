//! Source parsing.

use crate::EcmaModule;
use minipack_foundation::{BuildError, BuildResult, ModuleId};
use swc_common::{sync::Lrc, FileName, FilePathMapping, SourceMap, Spanned};
use swc_ecma_ast::EsVersion;
use swc_ecma_parser::{lexer::Lexer, EsSyntax, Parser, StringInput, Syntax, TsSyntax};

/// Syntax for a module, chosen by its extension.
///
/// `.ts`, `.mts` and `.cts` parse as TypeScript, `.tsx` as TSX, and anything
/// else as ECMAScript with JSX enabled.
pub fn syntax_for(id: &ModuleId) -> Syntax {
    match id.extension() {
        Some("ts") | Some("mts") | Some("cts") => Syntax::Typescript(TsSyntax {
            decorators: true,
            ..Default::default()
        }),
        Some("tsx") => Syntax::Typescript(TsSyntax {
            tsx: true,
            decorators: true,
            ..Default::default()
        }),
        _ => Syntax::Es(EsSyntax {
            jsx: true,
            ..Default::default()
        }),
    }
}

/// Parse `source` as an ES module.
///
/// Errors the parser recovered from are still reported; the first problem
/// in source order is named with its line and column.
pub fn parse_module(id: &ModuleId, source: &str) -> BuildResult<EcmaModule> {
    let source_map = Lrc::new(SourceMap::new(FilePathMapping::empty()));
    let file_name = Lrc::new(FileName::Real(id.as_path().to_path_buf()));
    let source_file = source_map.new_source_file(file_name, source.to_string());

    let lexer = Lexer::new(
        syntax_for(id),
        EsVersion::EsNext,
        StringInput::from(&*source_file),
        None,
    );
    let mut parser = Parser::new_from(lexer);

    let parsed = parser.parse_module();
    let mut recovered = parser.take_errors();

    let module = match parsed {
        Ok(module) => module,
        Err(err) => {
            recovered.push(err);
            recovered.sort_by_key(|err| err.span().lo);
            let first = &recovered[0];
            return Err(describe(id, &source_map, first));
        }
    };

    if let Some(first) = recovered.iter().min_by_key(|err| err.span().lo) {
        return Err(describe(id, &source_map, first));
    }

    Ok(EcmaModule { source_map, module })
}

fn describe(
    id: &ModuleId,
    source_map: &SourceMap,
    err: &swc_ecma_parser::error::Error,
) -> BuildError {
    let loc = source_map.lookup_char_pos(err.span().lo);
    BuildError::parse(
        id.clone(),
        format!(
            "{} at {}:{}",
            err.kind().msg(),
            loc.line,
            loc.col_display + 1
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use minipack_foundation::BuildErrorKind;

    #[test]
    fn test_syntax_selection() {
        assert!(matches!(
            syntax_for(&ModuleId::from("/a/b.ts")),
            Syntax::Typescript(TsSyntax { tsx: false, .. })
        ));
        assert!(matches!(
            syntax_for(&ModuleId::from("/a/b.tsx")),
            Syntax::Typescript(TsSyntax { tsx: true, .. })
        ));
        assert!(matches!(
            syntax_for(&ModuleId::from("/a/b")),
            Syntax::Es(EsSyntax { jsx: true, .. })
        ));
    }

    #[test]
    fn test_parses_typescript() {
        let id = ModuleId::from("/app/main.ts");
        let module = parse_module(&id, "import type { T } from './t';\nlet x: number = 1;\n").unwrap();
        assert_eq!(module.module.body.len(), 2);
    }

    #[test]
    fn test_syntax_error_is_parse_error_with_location() {
        let id = ModuleId::from("/app/broken.js");
        let err = parse_module(&id, "const ok = 1;\nconst = 2;\n")
            .err()
            .unwrap();

        assert_eq!(err.kind(), BuildErrorKind::Parse);
        assert_eq!(err.module(), Some(&id));
        assert!(err.to_string().contains(" at 2:"), "{}", err);
    }
}
