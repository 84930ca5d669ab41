//! Card, expansion and pack definitions.
//!
//! ## Key Types
//!
//! - `CardDefinition`: A draw source with foil chance and ordered border table
//! - `ExpansionDefinition`: Card names and plain borders of an expansion
//! - `PackDefinition`: Ordered fixed and chance slots
//! - `DefinitionSource`: Loader trait (`JsonDirectory`, `MemorySource`)
//! - `Definitions`: Owned cache shared read-only across trials
//!
//! Identifiers are hierarchical: `base_common` names `base/common.json`
//! under the matching `cards/`, `expansions/` or `packs/` directory.

pub mod cache;
pub mod card;
pub mod expansion;
pub mod id;
pub mod ordered;
pub mod pack;
pub mod source;

pub use cache::Definitions;
pub use card::{BorderChance, CardDefinition, CardRecord};
pub use expansion::{foil_name, ExpansionDefinition, ExpansionRecord, FOIL_SUFFIX};
pub use id::{group_of, record_path};
pub use ordered::{ChanceTable, OrderedChances};
pub use pack::{PackDefinition, PackRecord, Slot, CHANCE_SLOT_PREFIX};
pub use source::{DefinitionSource, JsonDirectory, MemorySource};
