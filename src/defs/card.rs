//! Card type definitions.
//!
//! A card type is a draw source, not a concrete card: `base_common` says
//! "some common card from the base expansion", with a foil chance and an
//! ordered border table. The draw resolver turns it into a concrete
//! (expansion, border, card name) outcome.

use serde::Deserialize;
use smallvec::SmallVec;

use super::expansion::foil_name;
use super::ordered::OrderedChances;
use crate::core::Chance;

/// One entry of a border table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BorderChance {
    /// Plain border name.
    pub name: String,
    /// Border name used when the draw is foil.
    pub foil_name: String,
    /// Chance this entry succeeds when it is reached.
    pub chance: Chance,
}

impl BorderChance {
    pub fn new(name: impl Into<String>, chance: Chance) -> Self {
        let name = name.into();
        Self {
            foil_name: foil_name(&name),
            name,
            chance,
        }
    }

    /// Border name for a plain or foil draw.
    #[must_use]
    pub fn variant_name(&self, foil: bool) -> &str {
        if foil {
            &self.foil_name
        } else {
            &self.name
        }
    }
}

/// Immutable card type definition.
///
/// ## Example
///
/// ```
/// use tcg_sim::defs::CardDefinition;
///
/// let card = CardDefinition::new("base_common", "base_common")
///     .with_foil_chance(5.0)
///     .with_border("gold", 1.0)
///     .with_border("base", 100.0);
///
/// assert_eq!(card.borders[0].name, "gold");
/// assert_eq!(card.borders[1].foil_name, "base_foil");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardDefinition {
    /// Card type identifier.
    pub name: String,

    /// Expansion the drawn card belongs to.
    pub expansion: String,

    /// Chance a draw is foil.
    pub foil_chance: Chance,

    /// Border table, evaluated in order; the first success wins.
    pub borders: SmallVec<[BorderChance; 6]>,
}

impl CardDefinition {
    /// Create a card type with no foil chance and an empty border table.
    #[must_use]
    pub fn new(name: impl Into<String>, expansion: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expansion: expansion.into(),
            foil_chance: Chance::NEVER,
            borders: SmallVec::new(),
        }
    }

    /// Build from a loaded record.
    #[must_use]
    pub fn from_record(name: impl Into<String>, record: CardRecord) -> Self {
        Self {
            name: name.into(),
            expansion: record.expansion,
            foil_chance: record.foil_chance,
            borders: record
                .border_chances
                .into_table()
                .into_iter()
                .map(|(border, chance)| BorderChance::new(border, chance))
                .collect(),
        }
    }

    /// Set the foil chance as a percentage.
    #[must_use]
    pub fn with_foil_chance(mut self, percent: f64) -> Self {
        self.foil_chance = Chance::from_percent(percent);
        self
    }

    /// Append a border table entry (percentage).
    #[must_use]
    pub fn with_border(mut self, name: impl Into<String>, percent: f64) -> Self {
        self.borders
            .push(BorderChance::new(name, Chance::from_percent(percent)));
        self
    }

    /// True if some border entry always succeeds, so the border roll can
    /// never come up empty.
    #[must_use]
    pub fn has_guaranteed_border(&self) -> bool {
        self.borders.iter().any(|b| b.chance.is_certain())
    }
}

/// On-disk shape of a card type.
#[derive(Clone, Debug, Deserialize)]
pub struct CardRecord {
    pub expansion: String,
    #[serde(default)]
    pub foil_chance: Chance,
    pub border_chances: OrderedChances,
}
