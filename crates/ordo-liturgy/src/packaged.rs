//! Sanctorale datasets bundled with the crate

use crate::error::LoadError;
use crate::loader::SanctoraleLoader;
use crate::sanctorale::Sanctorale;

const PACKAGED: &[(&str, &str)] = &[
    ("universal-en", include_str!("../data/universal-en.txt")),
    ("czech-cs", include_str!("../data/czech-cs.txt")),
    ("czech-cechy-cs", include_str!("../data/czech-cechy-cs.txt")),
    ("czech-morava-cs", include_str!("../data/czech-morava-cs.txt")),
];

/// Keys of all packaged datasets
pub fn keys() -> impl Iterator<Item = &'static str> {
    PACKAGED.iter().map(|(key, _)| *key)
}

/// Raw text of a packaged dataset
pub fn source(key: &str) -> Option<&'static str> {
    PACKAGED
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, source)| *source)
}

/// Load and parse a packaged dataset
pub fn load(key: &str) -> Result<Sanctorale, LoadError> {
    let source = source(key).ok_or_else(|| LoadError::UnknownPackagedReference(key.to_string()))?;
    SanctoraleLoader::new().load_from_str(source)
}
