//! Identity → [`Asset`].

use minipack_foundation::{Asset, BuildError, BuildResult, ModuleId};
use minipack_plugin_api::{AssetLoad, FileReader, LanguageFrontend};
use tracing::debug;

/// Reads, parses, extracts and transforms one module.
///
/// The returned asset's mapping is always empty; only the graph builder
/// knows which module is importing it.
pub struct AssetLoader<R, F> {
    reader: R,
    frontend: F,
}

impl<R: FileReader, F: LanguageFrontend> AssetLoader<R, F> {
    pub fn new(reader: R, frontend: F) -> Self {
        Self { reader, frontend }
    }
}

impl<R: FileReader, F: LanguageFrontend> AssetLoad for AssetLoader<R, F> {
    fn load(&self, id: &ModuleId) -> BuildResult<Asset> {
        let source = self
            .reader
            .read(id)
            .map_err(|e| BuildError::read(id.clone(), e))?;

        let ast = self.frontend.parse(id, &source)?;
        let dependencies = self.frontend.extract_specifiers(&ast);
        let code = self.frontend.transform(id, &ast)?;

        debug!(
            module = %id,
            dependencies = dependencies.len(),
            "Loaded module"
        );

        Ok(Asset::new(id.clone(), code, dependencies))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minipack_foundation::BuildErrorKind;
    use minipack_lang_ecmascript::EcmaFrontend;
    use minipack_test_support::mocks::MockReader;
    use minipack_test_support::{DirectResolver, MemoryReader};
    use pretty_assertions::assert_eq;
    use std::io;

    /// One specifier per source line; refuses to emit `*.broken` modules.
    struct LineFrontend;

    impl LanguageFrontend for LineFrontend {
        type Ast = Vec<String>;

        fn parse(&self, _id: &ModuleId, source: &str) -> BuildResult<Vec<String>> {
            Ok(source.lines().map(str::to_string).collect())
        }

        fn extract_specifiers(&self, ast: &Vec<String>) -> Vec<String> {
            ast.clone()
        }

        fn transform(&self, id: &ModuleId, ast: &Vec<String>) -> BuildResult<String> {
            if id.extension() == Some("broken") {
                return Err(BuildError::transform(id.clone(), "cannot lower module"));
            }
            Ok(ast.join("\n"))
        }
    }

    #[test]
    fn test_load_populates_dependencies_in_order() {
        let reader = MemoryReader::new().with_file(
            "/app/index.js",
            "import b from './b';\nimport a from './a';\nimport again from './b';\n",
        );
        let loader = AssetLoader::new(reader, EcmaFrontend::default());

        let asset = loader.load(&ModuleId::from("/app/index.js")).unwrap();
        assert_eq!(asset.id(), &ModuleId::from("/app/index.js"));
        assert_eq!(asset.dependencies, vec!["./b", "./a", "./b"]);
        assert!(asset.mapping.is_empty());
        assert!(!asset.code.is_empty());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let loader = AssetLoader::new(MemoryReader::new(), EcmaFrontend::default());

        let err = loader.load(&ModuleId::from("/app/missing")).unwrap_err();
        assert_eq!(err.kind(), BuildErrorKind::Read);
        assert_eq!(err.module(), Some(&ModuleId::from("/app/missing")));
    }

    #[test]
    fn test_permission_denied_is_read_error() {
        let mut reader = MockReader::new();
        reader
            .expect_read()
            .returning(|_| Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")));
        let loader = AssetLoader::new(reader, EcmaFrontend::default());

        let err = loader.load(&ModuleId::from("/app/secret.js")).unwrap_err();
        assert_eq!(err.kind(), BuildErrorKind::Read);
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_malformed_source_is_parse_error() {
        let reader = MemoryReader::new().with_file("/app/broken.js", "import { from './x';");
        let loader = AssetLoader::new(reader, EcmaFrontend::default());

        let err = loader.load(&ModuleId::from("/app/broken.js")).unwrap_err();
        assert_eq!(err.kind(), BuildErrorKind::Parse);
    }

    #[test]
    fn test_load_is_idempotent() {
        let reader = MemoryReader::new().with_file("/app/a.js", "export * from './b';");
        let loader = AssetLoader::new(reader, EcmaFrontend::default());
        let id = ModuleId::from("/app/a.js");

        assert_eq!(loader.load(&id).unwrap(), loader.load(&id).unwrap());
    }

    #[test]
    fn test_transform_failure_is_transform_error() {
        let reader = MemoryReader::new().with_file("/app/a.broken", "");
        let loader = AssetLoader::new(reader, LineFrontend);

        let err = loader.load(&ModuleId::from("/app/a.broken")).unwrap_err();
        assert_eq!(err.kind(), BuildErrorKind::Transform);
        assert_eq!(err.module(), Some(&ModuleId::from("/app/a.broken")));
        assert!(err.importer().is_none());
    }

    #[test]
    fn test_transform_failure_aborts_build_with_importer() {
        let reader = MemoryReader::new()
            .with_file("/app/index", "/app/ok\n/app/dep.broken")
            .with_file("/app/ok", "")
            .with_file("/app/dep.broken", "");
        let loader = AssetLoader::new(reader, LineFrontend);

        let err = crate::build(&ModuleId::from("/app/index"), &loader, DirectResolver)
            .unwrap_err();
        assert_eq!(err.kind(), BuildErrorKind::Transform);
        assert_eq!(err.module(), Some(&ModuleId::from("/app/dep.broken")));
        let importer = err.importer().unwrap();
        assert_eq!(importer.module, ModuleId::from("/app/index"));
        assert_eq!(importer.specifier, "/app/dep.broken");
    }
}
