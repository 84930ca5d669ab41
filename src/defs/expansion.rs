//! Expansion definitions.

use serde::Deserialize;

/// Suffix that turns a plain border name into its foil counterpart.
pub const FOIL_SUFFIX: &str = "_foil";

/// Foil counterpart of a plain border name.
#[must_use]
pub fn foil_name(border: &str) -> String {
    format!("{border}{FOIL_SUFFIX}")
}

/// Immutable expansion definition.
///
/// Only plain borders are listed; every plain border has a derived foil
/// border, so an expansion has `cards × borders × 2` collectible variants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpansionDefinition {
    name: String,
    cards: Vec<String>,
    borders: Vec<String>,
    foil_borders: Vec<String>,
}

impl ExpansionDefinition {
    #[must_use]
    pub fn new<C, B>(name: impl Into<String>, cards: C, borders: B) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        B: IntoIterator,
        B::Item: Into<String>,
    {
        let borders: Vec<String> = borders.into_iter().map(Into::into).collect();
        let foil_borders = borders.iter().map(|b| foil_name(b)).collect();
        Self {
            name: name.into(),
            cards: cards.into_iter().map(Into::into).collect(),
            borders,
            foil_borders,
        }
    }

    /// Build from a loaded record.
    #[must_use]
    pub fn from_record(name: impl Into<String>, record: ExpansionRecord) -> Self {
        Self::new(name, record.cards, record.borders)
    }

    /// Expansion identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Card names, in definition order.
    #[must_use]
    pub fn cards(&self) -> &[String] {
        &self.cards
    }

    /// Plain border names, in definition order.
    #[must_use]
    pub fn borders(&self) -> &[String] {
        &self.borders
    }

    /// Number of collectible variants: cards × borders × 2 foil states.
    #[must_use]
    pub fn total_variants(&self) -> usize {
        self.cards.len() * self.borders.len() * 2
    }

    /// Each plain border paired with its foil counterpart, in order.
    pub fn border_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.borders
            .iter()
            .zip(&self.foil_borders)
            .map(|(plain, foil)| (plain.as_str(), foil.as_str()))
    }

    /// Every border key the expansion owns: plain, then foil, per border.
    pub fn variant_borders(&self) -> impl Iterator<Item = &str> {
        self.border_pairs().flat_map(|(plain, foil)| [plain, foil])
    }
}

/// On-disk shape of an expansion.
#[derive(Clone, Debug, Deserialize)]
pub struct ExpansionRecord {
    pub cards: Vec<String>,
    pub borders: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_variants() {
        let exp = ExpansionDefinition::new("base_common", ["a", "b", "c"], ["base", "gold"]);
        assert_eq!(exp.total_variants(), 12);
    }

    #[test]
    fn test_empty_expansion_has_no_variants() {
        let exp = ExpansionDefinition::new("empty", Vec::<String>::new(), ["base"]);
        assert_eq!(exp.total_variants(), 0);
    }

    #[test]
    fn test_variant_borders_interleave_foil() {
        let exp = ExpansionDefinition::new("x", ["a"], ["base", "gold"]);
        let borders: Vec<_> = exp.variant_borders().collect();
        assert_eq!(borders, vec!["base", "base_foil", "gold", "gold_foil"]);
    }

    #[test]
    fn test_from_record() {
        let record: ExpansionRecord =
            serde_json::from_str(r#"{"cards": ["Piggy", "Burpig"], "borders": ["base"]}"#).unwrap();
        let exp = ExpansionDefinition::from_record("base_common", record);

        assert_eq!(exp.cards(), ["Piggy", "Burpig"]);
        assert_eq!(exp.border_pairs().collect::<Vec<_>>(), vec![("base", "base_foil")]);
    }
}
