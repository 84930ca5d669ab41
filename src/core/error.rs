//! Error types for the simulator.
//!
//! Nothing in the draw engine swallows an error: every failure propagates to
//! the driver, which decides whether a failed trial aborts the run.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = SimError> = std::result::Result<T, E>;

/// Errors raised by the draw engine, the collection, and the drivers.
#[derive(Debug, Error)]
pub enum SimError {
    /// A collection path was queried or mutated before its expansion was
    /// registered.
    #[error("collection path {expansion}/{}/{} is not registered", .border.as_deref().unwrap_or("*"), .card.as_deref().unwrap_or("*"))]
    NotRegistered {
        expansion: String,
        border: Option<String>,
        card: Option<String>,
    },

    /// No entry of a card's border table succeeded.
    #[error("undefined border: no border roll succeeded for card type '{card_type}'")]
    UndefinedBorder { card_type: String },

    /// A card type points at an expansion that defines no cards.
    #[error("expansion '{expansion}' defines no cards")]
    EmptyExpansion { expansion: String },

    /// An expansion lists more cards than a uniform index can address.
    #[error("expansion '{expansion}' defines {count} cards, more than can be drawn from")]
    TooManyCards { expansion: String, count: usize },

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("I/O error at {path:?}: {source}")]
    Io {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// A statistics file does not end with a `name;packs_opened;...` line.
    #[error("malformed statistics file {path:?}: {reason}")]
    MalformedStats { path: PathBuf, reason: String },

    #[error("checkpoint error: {0}")]
    Checkpoint(#[from] bincode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SimError {
    pub(crate) fn not_registered(
        expansion: &str,
        border: Option<&str>,
        card: Option<&str>,
    ) -> Self {
        SimError::NotRegistered {
            expansion: expansion.to_owned(),
            border: border.map(str::to_owned),
            card: card.map(str::to_owned),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SimError::Io {
            source,
            path: path.into(),
        }
    }
}

/// Kind of definition record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    Card,
    Expansion,
    Pack,
}

impl DefinitionKind {
    /// Directory name under the data root.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            DefinitionKind::Card => "cards",
            DefinitionKind::Expansion => "expansions",
            DefinitionKind::Pack => "packs",
        }
    }
}

impl std::fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DefinitionKind::Card => "card",
            DefinitionKind::Expansion => "expansion",
            DefinitionKind::Pack => "pack",
        };
        f.write_str(name)
    }
}

/// Errors surfaced while loading definition records.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid {kind} identifier '{id}'")]
    InvalidIdentifier { kind: DefinitionKind, id: String },

    #[error("no {kind} definition named '{id}'")]
    NotFound { kind: DefinitionKind, id: String },

    #[error("failed to read {kind} definition {path:?}: {source}")]
    Read {
        kind: DefinitionKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {kind} definition {path:?}: {source}")]
    Parse {
        kind: DefinitionKind,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors surfaced when loading the simulation configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
        path: PathBuf,
    },
    #[error("invalid configuration: {field}: {message}")]
    Invalid { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_registered_message() {
        let err = SimError::not_registered("base_common", Some("gold_foil"), None);
        assert_eq!(
            err.to_string(),
            "collection path base_common/gold_foil/* is not registered"
        );
    }

    #[test]
    fn test_load_error_is_transparent() {
        let err: SimError = LoadError::NotFound {
            kind: DefinitionKind::Pack,
            id: "ghost".into(),
        }
        .into();
        assert_eq!(err.to_string(), "no pack definition named 'ghost'");
    }

    #[test]
    fn test_kind_dir_names() {
        assert_eq!(DefinitionKind::Card.dir_name(), "cards");
        assert_eq!(DefinitionKind::Expansion.dir_name(), "expansions");
        assert_eq!(DefinitionKind::Pack.dir_name(), "packs");
    }
}
