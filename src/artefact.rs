//! Feast dataset references and their resolution
//!
//! An artefact names one sanctorale source: a dataset packaged with the
//! liturgy library, or a file on disk. References are parsed once from
//! the configuration and never inspected as strings afterwards.

use std::fmt;
use std::path::{Path, PathBuf};

use ordo_liturgy::{packaged, LoadError, Sanctorale, SanctoraleLoader};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Reference to a sanctorale dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ArtefactRef {
    /// Dataset bundled with the liturgy library
    Packaged {
        #[serde(rename = "ref")]
        key: String,
    },
    /// Dataset file on disk
    File { path: PathBuf },
}

impl ArtefactRef {
    pub fn packaged(key: impl Into<String>) -> Self {
        Self::Packaged { key: key.into() }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into() }
    }
}

impl fmt::Display for ArtefactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Packaged { key } => write!(f, "packaged:{}", key),
            Self::File { path } => write!(f, "file:{}", path.display()),
        }
    }
}

/// A reference together with the digest of the bytes it resolved to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtefactDigest {
    #[serde(flatten)]
    pub reference: ArtefactRef,
    /// SHA-256 of the raw dataset text
    pub sha256: String,
}

/// A loaded artefact
#[derive(Debug, Clone)]
pub struct ResolvedArtefact {
    pub digest: ArtefactDigest,
    pub sanctorale: Sanctorale,
}

/// Resolves artefact references into sanctorale datasets
#[derive(Default)]
pub struct ArtefactResolver {
    loader: SanctoraleLoader,
}

impl ArtefactResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the dataset an artefact refers to
    pub fn resolve(&self, reference: &ArtefactRef) -> Result<ResolvedArtefact, LoadError> {
        let source = match reference {
            ArtefactRef::Packaged { key } => packaged::source(key)
                .ok_or_else(|| LoadError::UnknownPackagedReference(key.clone()))?
                .to_string(),
            ArtefactRef::File { path } => SanctoraleLoader::read_file(path)?,
        };
        debug!(artefact = %reference, "resolving artefact");

        let sanctorale = self.loader.load_from_str(&source)?;
        Ok(ResolvedArtefact {
            digest: ArtefactDigest {
                reference: reference.clone(),
                sha256: sha256_hex(source.as_bytes()),
            },
            sanctorale,
        })
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Resolve a file artefact path relative to the directory of the config file
pub fn resolve_relative(path: &Path, base_dir: Option<&Path>) -> PathBuf {
    match base_dir {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolve_packaged() {
        let resolved = ArtefactResolver::new()
            .resolve(&ArtefactRef::packaged("universal-en"))
            .unwrap();
        assert!(!resolved.sanctorale.is_empty());
        assert_eq!(resolved.digest.sha256.len(), 64);
    }

    #[test]
    fn test_resolve_unknown_packaged() {
        let err = ArtefactResolver::new()
            .resolve(&ArtefactRef::packaged("unknown-ref"))
            .unwrap_err();
        assert!(matches!(err, LoadError::UnknownPackagedReference(_)));
    }

    #[test]
    fn test_resolve_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "7/16 : Our Lady of Mount Carmel").unwrap();

        let resolved = ArtefactResolver::new()
            .resolve(&ArtefactRef::file(file.path()))
            .unwrap();
        assert_eq!(resolved.sanctorale.get(7, 16).len(), 1);
    }

    #[test]
    fn test_resolve_missing_file() {
        let err = ArtefactResolver::new()
            .resolve(&ArtefactRef::file("data/unknown/file.txt"))
            .unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound(_)));
        assert!(err.to_string().contains("doesn't exist"));
    }

    #[test]
    fn test_digest_is_stable() {
        let r = ArtefactResolver::new();
        let a = r.resolve(&ArtefactRef::packaged("czech-cs")).unwrap();
        let b = r.resolve(&ArtefactRef::packaged("czech-cs")).unwrap();
        assert_eq!(a.digest, b.digest);
    }

    #[test]
    fn test_resolve_relative() {
        let base = Path::new("/etc/ordo");
        assert_eq!(
            resolve_relative(Path::new("data/local.txt"), Some(base)),
            PathBuf::from("/etc/ordo/data/local.txt")
        );
        assert_eq!(
            resolve_relative(Path::new("/abs.txt"), Some(base)),
            PathBuf::from("/abs.txt")
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(ArtefactRef::packaged("czech-cs").to_string(), "packaged:czech-cs");
    }
}
