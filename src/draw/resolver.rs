//! Single-card resolution.
//!
//! Resolving a card type consumes the random source in a fixed order:
//!
//! 1. one foil roll,
//! 2. one roll per border table entry until the first success,
//! 3. one uniform index into the expansion's card names.
//!
//! Any implementation sharing that order and the integer-domain roll in
//! [`Chance::roll`](crate::core::Chance::roll) produces the same draws from
//! the same stream.

use serde::{Deserialize, Serialize};

use crate::core::{RandomSource, Result, SimError};
use crate::defs::{CardDefinition, Definitions, ExpansionDefinition};

/// Concrete outcome of one card draw.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Draw {
    /// Expansion the card belongs to.
    pub expansion: String,
    /// Border key, with the `_foil` suffix for foil draws.
    pub border: String,
    /// Card name.
    pub card: String,
    /// True if the foil roll succeeded.
    pub foil: bool,
}

impl std::fmt::Display for Draw {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.expansion, self.border, self.card)
    }
}

/// Resolves card types into draws using a shared definition cache.
#[derive(Clone, Copy, Debug)]
pub struct DrawResolver<'d> {
    defs: &'d Definitions,
}

impl<'d> DrawResolver<'d> {
    #[must_use]
    pub fn new(defs: &'d Definitions) -> Self {
        Self { defs }
    }

    /// Definition cache this resolver reads from.
    #[must_use]
    pub fn definitions(&self) -> &'d Definitions {
        self.defs
    }

    /// Resolve one draw of `card_type`.
    ///
    /// Definitions are loaded before any roll, so a load failure never
    /// consumes randomness.
    pub fn resolve<R: RandomSource + ?Sized>(&self, card_type: &str, rng: &mut R) -> Result<Draw> {
        let card = self.defs.card(card_type)?;
        let expansion = self.defs.expansion(&card.expansion)?;
        resolve_card(&card, &expansion, rng)
    }
}

/// Resolve one draw from already loaded definitions.
pub fn resolve_card<R: RandomSource + ?Sized>(
    card: &CardDefinition,
    expansion: &ExpansionDefinition,
    rng: &mut R,
) -> Result<Draw> {
    let foil = card.foil_chance.roll(rng);

    let border = card
        .borders
        .iter()
        .find(|border| border.chance.roll(&mut *rng))
        .ok_or_else(|| SimError::UndefinedBorder {
            card_type: card.name.clone(),
        })?;

    let names = expansion.cards();
    let bound = card_bound(expansion.name(), names.len())?;
    let index = rng.below(bound) as usize;

    Ok(Draw {
        expansion: card.expansion.clone(),
        border: border.variant_name(foil).to_string(),
        card: names[index].clone(),
        foil,
    })
}

/// Upper bound of the uniform card index for an expansion of `len` cards.
fn card_bound(expansion: &str, len: usize) -> Result<u32> {
    if len == 0 {
        return Err(SimError::EmptyExpansion {
            expansion: expansion.to_string(),
        });
    }
    u32::try_from(len).map_err(|_| SimError::TooManyCards {
        expansion: expansion.to_string(),
        count: len,
    })
}
