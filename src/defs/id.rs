//! Hierarchical definition identifiers.
//!
//! Identifiers use `_` to delimit nesting levels: the card type `base_common`
//! lives at `cards/base/common.json`, the pack `destiny_legendary` at
//! `packs/destiny/legendary.json`.

use std::path::PathBuf;

use crate::core::{DefinitionKind, LoadError};

/// File extension of definition records.
pub const RECORD_EXTENSION: &str = "json";

/// Path of a definition record relative to the data root.
///
/// Rejects identifiers with empty segments or characters that would escape
/// the data directory.
///
/// ```
/// use std::path::PathBuf;
/// use tcg_sim::core::DefinitionKind;
/// use tcg_sim::defs::record_path;
///
/// let path = record_path(DefinitionKind::Card, "base_common").unwrap();
/// assert_eq!(path, PathBuf::from("cards/base/common.json"));
/// ```
pub fn record_path(kind: DefinitionKind, id: &str) -> Result<PathBuf, LoadError> {
    let segments: Vec<&str> = id.split('_').collect();
    if segments.iter().any(|s| !is_valid_segment(s)) {
        return Err(LoadError::InvalidIdentifier {
            kind,
            id: id.to_string(),
        });
    }

    let mut path = PathBuf::from(kind.dir_name());
    if let Some((last, parents)) = segments.split_last() {
        for parent in parents {
            path.push(parent);
        }
        path.push(format!("{last}.{RECORD_EXTENSION}"));
    }
    Ok(path)
}

/// Group an identifier belongs to: everything before the first `_`.
#[must_use]
pub fn group_of(id: &str) -> &str {
    id.split_once('_').map_or(id, |(group, _)| group)
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_path() {
        let path = record_path(DefinitionKind::Pack, "destiny_legendary").unwrap();
        assert_eq!(path, PathBuf::from("packs/destiny/legendary.json"));
    }

    #[test]
    fn test_single_segment() {
        let path = record_path(DefinitionKind::Expansion, "ghost").unwrap();
        assert_eq!(path, PathBuf::from("expansions/ghost.json"));
    }

    #[test]
    fn test_deep_path() {
        let path = record_path(DefinitionKind::Card, "a_b_c").unwrap();
        assert_eq!(path, PathBuf::from("cards/a/b/c.json"));
    }

    #[test]
    fn test_rejects_bad_identifiers() {
        for id in ["", "base_", "_base", "base__common", "../etc", "a_.._b"] {
            assert!(
                record_path(DefinitionKind::Card, id).is_err(),
                "{id:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_group_of() {
        assert_eq!(group_of("base_common"), "base");
        assert_eq!(group_of("destiny_legendary_extra"), "destiny");
        assert_eq!(group_of("ghost"), "ghost");
    }
}
