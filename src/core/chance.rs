//! Integer-domain probability rolls.
//!
//! Every probability in the data files is a percentage with hundredths
//! precision (`0.01` means 0.01%). A roll draws a uniform integer in
//! `[0, 9999]` and succeeds iff the draw is strictly below
//! `round(percent × 100)`. Staying in the integer domain keeps results
//! bit-compatible across implementations that share a random stream.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::rng::RandomSource;

/// Number of distinct outcomes of a single roll.
pub const ROLL_DOMAIN: u32 = 10_000;

/// A success probability expressed in hundredths of a percent.
///
/// `Chance::from_percent(100.0)` always succeeds, `Chance::NEVER` never does.
///
/// ```
/// use tcg_sim::core::Chance;
///
/// let chance = Chance::from_percent(0.25);
/// assert_eq!(chance.threshold(), 25);
/// assert!(Chance::ALWAYS.is_certain());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Chance(u32);

impl Chance {
    /// Never succeeds.
    pub const NEVER: Chance = Chance(0);

    /// Always succeeds.
    pub const ALWAYS: Chance = Chance(ROLL_DOMAIN);

    /// Convert a percentage (e.g. `12.5`) into a chance.
    ///
    /// Negative or NaN percentages clamp to `NEVER`. Percentages above 100
    /// keep their threshold and still always succeed.
    #[must_use]
    pub fn from_percent(percent: f64) -> Self {
        let scaled = (percent * 100.0).round();
        if scaled.is_nan() || scaled <= 0.0 {
            Self::NEVER
        } else if scaled >= f64::from(u32::MAX) {
            Self(u32::MAX)
        } else {
            Self(scaled as u32)
        }
    }

    /// Create a chance from a raw threshold in hundredths of a percent.
    #[must_use]
    pub const fn from_threshold(threshold: u32) -> Self {
        Self(threshold)
    }

    /// Raw threshold a roll must stay below.
    #[must_use]
    pub const fn threshold(self) -> u32 {
        self.0
    }

    /// The chance as a percentage.
    #[must_use]
    pub fn percent(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// True if no roll can succeed.
    #[must_use]
    pub const fn is_impossible(self) -> bool {
        self.0 == 0
    }

    /// True if every roll succeeds.
    #[must_use]
    pub const fn is_certain(self) -> bool {
        self.0 >= ROLL_DOMAIN
    }

    /// Perform one Bernoulli trial, consuming exactly one value from `rng`.
    pub fn roll<R: RandomSource + ?Sized>(self, rng: &mut R) -> bool {
        rng.below(ROLL_DOMAIN) < self.0
    }
}

impl std::fmt::Display for Chance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

impl Serialize for Chance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.percent())
    }
}

impl<'de> Deserialize<'de> for Chance {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Chance::from_percent)
    }
}
