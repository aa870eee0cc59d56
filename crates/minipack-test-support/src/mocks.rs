//! Mock implementations for testing

use minipack_foundation::{Asset, BuildResult, ModuleId};
use minipack_plugin_api::{AssetLoad, FileReader, IdentityResolver};
use mockall::mock;
use std::io;
use std::path::Path;

mock! {
    pub Loader {}

    impl AssetLoad for Loader {
        fn load(&self, id: &ModuleId) -> BuildResult<Asset>;
    }
}

mock! {
    pub Reader {}

    impl FileReader for Reader {
        fn read(&self, id: &ModuleId) -> io::Result<String>;
        fn is_file(&self, path: &Path) -> bool;
    }
}

mock! {
    pub Resolver {}

    impl IdentityResolver for Resolver {
        fn resolve(&self, specifier: &str, importer: &ModuleId) -> BuildResult<ModuleId>;
    }
}
