//! Where definitions come from.
//!
//! The cache in [`super::cache`] never reads files itself; it asks a
//! `DefinitionSource`. The simulator ships two: a JSON directory tree and an
//! in-memory table for tests and embedding.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;

use super::card::{CardDefinition, CardRecord};
use super::expansion::{ExpansionDefinition, ExpansionRecord};
use super::id::record_path;
use super::pack::{PackDefinition, PackRecord};
use crate::core::{DefinitionKind, LoadError};

/// Loader for definition records.
///
/// Implementations must be shareable across trial threads.
pub trait DefinitionSource: Send + Sync {
    fn load_card(&self, id: &str) -> Result<CardDefinition, LoadError>;

    fn load_expansion(&self, id: &str) -> Result<ExpansionDefinition, LoadError>;

    fn load_pack(&self, id: &str) -> Result<PackDefinition, LoadError>;
}

/// Definitions stored as JSON files under a data root.
#[derive(Clone, Debug)]
pub struct JsonDirectory {
    root: PathBuf,
}

impl JsonDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of a definition record.
    pub fn path_of(&self, kind: DefinitionKind, id: &str) -> Result<PathBuf, LoadError> {
        Ok(self.root.join(record_path(kind, id)?))
    }

    fn read<T: DeserializeOwned>(&self, kind: DefinitionKind, id: &str) -> Result<T, LoadError> {
        let path = self.path_of(kind, id)?;
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(LoadError::NotFound {
                    kind,
                    id: id.to_string(),
                });
            }
            Err(source) => return Err(LoadError::Read { kind, path, source }),
        };
        serde_json::from_str(&contents).map_err(|source| LoadError::Parse { kind, path, source })
    }
}

impl DefinitionSource for JsonDirectory {
    fn load_card(&self, id: &str) -> Result<CardDefinition, LoadError> {
        let record: CardRecord = self.read(DefinitionKind::Card, id)?;
        Ok(CardDefinition::from_record(id, record))
    }

    fn load_expansion(&self, id: &str) -> Result<ExpansionDefinition, LoadError> {
        let record: ExpansionRecord = self.read(DefinitionKind::Expansion, id)?;
        Ok(ExpansionDefinition::from_record(id, record))
    }

    fn load_pack(&self, id: &str) -> Result<PackDefinition, LoadError> {
        let record: PackRecord = self.read(DefinitionKind::Pack, id)?;
        Ok(PackDefinition::from_record(id, record))
    }
}

/// Definitions held in memory.
///
/// ```
/// use tcg_sim::defs::{CardDefinition, DefinitionSource, MemorySource};
///
/// let source = MemorySource::new()
///     .with_card(CardDefinition::new("ghost", "ghost").with_border("base", 100.0));
///
/// assert!(source.load_card("ghost").is_ok());
/// assert!(source.load_card("missing").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    cards: FxHashMap<String, CardDefinition>,
    expansions: FxHashMap<String, ExpansionDefinition>,
    packs: FxHashMap<String, PackDefinition>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_card(mut self, card: CardDefinition) -> Self {
        self.cards.insert(card.name.clone(), card);
        self
    }

    #[must_use]
    pub fn with_expansion(mut self, expansion: ExpansionDefinition) -> Self {
        self.expansions.insert(expansion.name().to_string(), expansion);
        self
    }

    #[must_use]
    pub fn with_pack(mut self, pack: PackDefinition) -> Self {
        self.packs.insert(pack.name.clone(), pack);
        self
    }
}

fn lookup<T: Clone>(
    map: &FxHashMap<String, T>,
    kind: DefinitionKind,
    id: &str,
) -> Result<T, LoadError> {
    map.get(id).cloned().ok_or_else(|| LoadError::NotFound {
        kind,
        id: id.to_string(),
    })
}

impl DefinitionSource for MemorySource {
    fn load_card(&self, id: &str) -> Result<CardDefinition, LoadError> {
        lookup(&self.cards, DefinitionKind::Card, id)
    }

    fn load_expansion(&self, id: &str) -> Result<ExpansionDefinition, LoadError> {
        lookup(&self.expansions, DefinitionKind::Expansion, id)
    }

    fn load_pack(&self, id: &str) -> Result<PackDefinition, LoadError> {
        lookup(&self.packs, DefinitionKind::Pack, id)
    }
}
