//! ECMAScript Language Front End
//!
//! Implements [`LanguageFrontend`] for JavaScript and TypeScript modules on
//! top of SWC:
//!
//! - [`parser`]: picks a syntax from the file extension and parses a module
//! - [`specifiers`]: collects dependency specifiers in source order
//! - [`codegen`]: re-emits the module for the configured target

pub mod codegen;
pub mod parser;
pub mod specifiers;

use minipack_config::TransformConfig;
use minipack_foundation::{BuildResult, ModuleId};
use minipack_plugin_api::LanguageFrontend;
use swc_common::{sync::Lrc, SourceMap};
use swc_ecma_ast::{EsVersion, Module};
use tracing::debug;

pub use codegen::es_version;

/// A parsed module together with the source map its spans point into.
pub struct EcmaModule {
    pub source_map: Lrc<SourceMap>,
    pub module: Module,
}

/// SWC-backed parser, specifier extractor and transformer.
#[derive(Debug, Clone, Copy)]
pub struct EcmaFrontend {
    target: EsVersion,
    minify: bool,
}

impl EcmaFrontend {
    pub fn new(target: EsVersion, minify: bool) -> Self {
        Self { target, minify }
    }

    pub fn from_config(config: &TransformConfig) -> Self {
        Self::new(es_version(config.target), config.minify)
    }
}

impl Default for EcmaFrontend {
    fn default() -> Self {
        Self::from_config(&TransformConfig::default())
    }
}

impl LanguageFrontend for EcmaFrontend {
    type Ast = EcmaModule;

    fn parse(&self, id: &ModuleId, source: &str) -> BuildResult<EcmaModule> {
        parser::parse_module(id, source)
    }

    fn extract_specifiers(&self, ast: &EcmaModule) -> Vec<String> {
        let specifiers = specifiers::collect_specifiers(ast);
        debug!(count = specifiers.len(), "Collected dependency specifiers");
        specifiers
    }

    fn transform(&self, id: &ModuleId, ast: &EcmaModule) -> BuildResult<String> {
        codegen::emit_module(id, ast, self.target, self.minify)
    }
}
