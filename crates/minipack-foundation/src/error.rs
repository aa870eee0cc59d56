//! Error handling for module graph builds

use crate::ModuleId;
use std::fmt;
use thiserror::Error;

/// The module and specifier that caused a module to be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Importer {
    pub module: ModuleId,
    pub specifier: String,
}

impl fmt::Display for Importer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' in {}", self.specifier, self.module)
    }
}

/// Renders the optional " (imported as ...)" suffix of load errors.
struct ImportedBy<'a>(&'a Option<Importer>);

impl fmt::Display for ImportedBy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(importer) => write!(f, " (imported as {})", importer),
            None => Ok(()),
        }
    }
}

/// Every way a build can fail.
///
/// None of these are recovered from: the first one aborts the build.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BuildError {
    #[error("Failed to read module {id}{}: {source}", ImportedBy(.importer))]
    Read {
        id: ModuleId,
        importer: Option<Importer>,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse module {id}{}: {message}", ImportedBy(.importer))]
    Parse {
        id: ModuleId,
        importer: Option<Importer>,
        message: String,
    },

    #[error("Failed to transform module {id}{}: {message}", ImportedBy(.importer))]
    Transform {
        id: ModuleId,
        importer: Option<Importer>,
        message: String,
    },

    #[error("Cannot resolve '{specifier}' from {importer}: {reason}")]
    Resolution {
        specifier: String,
        importer: ModuleId,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Discriminant of [`BuildError`] for callers that only care about the class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildErrorKind {
    Read,
    Parse,
    Transform,
    Resolution,
    Config,
}

impl BuildError {
    pub fn read(id: ModuleId, source: std::io::Error) -> Self {
        Self::Read {
            id,
            importer: None,
            source,
        }
    }

    pub fn parse(id: ModuleId, message: impl Into<String>) -> Self {
        Self::Parse {
            id,
            importer: None,
            message: message.into(),
        }
    }

    pub fn transform(id: ModuleId, message: impl Into<String>) -> Self {
        Self::Transform {
            id,
            importer: None,
            message: message.into(),
        }
    }

    pub fn resolution(
        specifier: impl Into<String>,
        importer: ModuleId,
        reason: impl Into<String>,
    ) -> Self {
        Self::Resolution {
            specifier: specifier.into(),
            importer,
            reason: reason.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> BuildErrorKind {
        match self {
            Self::Read { .. } => BuildErrorKind::Read,
            Self::Parse { .. } => BuildErrorKind::Parse,
            Self::Transform { .. } => BuildErrorKind::Transform,
            Self::Resolution { .. } => BuildErrorKind::Resolution,
            Self::Config { .. } => BuildErrorKind::Config,
        }
    }

    /// Identity of the module whose load failed, for load-time errors.
    pub fn module(&self) -> Option<&ModuleId> {
        match self {
            Self::Read { id, .. } | Self::Parse { id, .. } | Self::Transform { id, .. } => {
                Some(id)
            }
            Self::Resolution { .. } | Self::Config { .. } => None,
        }
    }

    /// The importer recorded on a load-time error.
    pub fn importer(&self) -> Option<&Importer> {
        match self {
            Self::Read { importer, .. }
            | Self::Parse { importer, .. }
            | Self::Transform { importer, .. } => importer.as_ref(),
            Self::Resolution { .. } | Self::Config { .. } => None,
        }
    }

    /// Attach the importing module and specifier to a load-time error.
    ///
    /// An importer that is already recorded is kept.
    pub fn with_importer(mut self, module: &ModuleId, specifier: &str) -> Self {
        if let Self::Read { importer, .. }
        | Self::Parse { importer, .. }
        | Self::Transform { importer, .. } = &mut self
        {
            importer.get_or_insert_with(|| Importer {
                module: module.clone(),
                specifier: specifier.to_string(),
            });
        }
        self
    }
}

/// Result type alias for convenience
pub type BuildResult<T> = Result<T, BuildError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_read_error_names_importer() {
        let err = BuildError::read(
            ModuleId::from("/app/missing"),
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        )
        .with_importer(&ModuleId::from("/app/index"), "./missing");

        assert_eq!(err.kind(), BuildErrorKind::Read);
        assert_eq!(err.module(), Some(&ModuleId::from("/app/missing")));
        assert_eq!(
            err.to_string(),
            "Failed to read module /app/missing (imported as './missing' in /app/index): not found"
        );
    }

    #[test]
    fn test_first_importer_wins() {
        let err = BuildError::parse(ModuleId::from("/app/b"), "unexpected token")
            .with_importer(&ModuleId::from("/app/a"), "./b")
            .with_importer(&ModuleId::from("/app/c"), "../app/b");

        let importer = err.importer().unwrap();
        assert_eq!(importer.module, ModuleId::from("/app/a"));
        assert_eq!(importer.specifier, "./b");
    }

    #[test]
    fn test_resolution_error_ignores_importer_attachment() {
        let err = BuildError::resolution("react", ModuleId::from("/app/index"), "bare specifier")
            .with_importer(&ModuleId::from("/app/other"), "react");

        assert_eq!(err.kind(), BuildErrorKind::Resolution);
        assert!(err.importer().is_none());
        assert_eq!(
            err.to_string(),
            "Cannot resolve 'react' from /app/index: bare specifier"
        );
    }
}
