//! A loaded module.

use crate::ModuleId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One loaded, transformed module.
///
/// `dependencies` is filled in at load time. `mapping` starts empty and is
/// written once by the graph builder, because resolving a specifier needs the
/// importing module's location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Canonical identity of this module.
    id: ModuleId,
    /// Transformed code. Opaque to the graph.
    pub code: String,
    /// Raw specifiers in source order, duplicates included.
    pub dependencies: Vec<String>,
    /// Raw specifier → resolved identity.
    pub mapping: IndexMap<String, ModuleId>,
}

impl Asset {
    pub fn new(id: ModuleId, code: impl Into<String>, dependencies: Vec<String>) -> Self {
        Self {
            id,
            code: code.into(),
            dependencies,
            mapping: IndexMap::new(),
        }
    }

    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.is_empty()
    }

    /// Identity a raw specifier was resolved to, if the builder has seen it.
    pub fn resolved(&self, specifier: &str) -> Option<&ModuleId> {
        self.mapping.get(specifier)
    }

    /// Whether every specifier has a mapping entry and nothing else does.
    pub fn is_fully_mapped(&self) -> bool {
        self.dependencies
            .iter()
            .all(|spec| self.mapping.contains_key(spec))
            && self
                .mapping
                .keys()
                .all(|spec| self.dependencies.contains(spec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_asset_is_unmapped() {
        let asset = Asset::new(
            ModuleId::from("/app/index"),
            "",
            vec!["./a".to_string(), "./a".to_string()],
        );
        assert!(asset.has_dependencies());
        assert!(asset.mapping.is_empty());
        assert!(!asset.is_fully_mapped());
    }

    #[test]
    fn test_duplicate_specifiers_need_one_entry() {
        let mut asset = Asset::new(
            ModuleId::from("/app/index"),
            "",
            vec!["./a".to_string(), "./a".to_string()],
        );
        asset
            .mapping
            .insert("./a".to_string(), ModuleId::from("/app/a"));
        assert!(asset.is_fully_mapped());
        assert_eq!(asset.resolved("./a"), Some(&ModuleId::from("/app/a")));
    }
}
