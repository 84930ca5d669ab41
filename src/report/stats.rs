//! Statistics renderings of a player's state.
//!
//! All line formats are `;`-separated: a header line and a value line.
//! Everything iterates the collection in registration order.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::CompressLevel;
use crate::collection::{Collection, Player, Tally};
use crate::core::Result;
use crate::defs::{group_of, Definitions};
use crate::draw::Expansion;

const SEPARATOR: &str = ";";

/// Every count in the collection, one column per (expansion, border, card).
#[must_use]
pub fn raw_data(player: &Player) -> String {
    let mut header = vec!["name".to_string(), "packs_opened".to_string()];
    let mut values = vec![player.name.clone(), player.packs_opened.to_string()];

    for (_, borders) in player.collection.iter() {
        for (_, cards) in borders.iter() {
            for (card, count) in cards.iter() {
                header.push(card.to_string());
                values.push(count.to_string());
            }
        }
    }

    format!("{}\n{}", header.join(SEPARATOR), values.join(SEPARATOR))
}

/// Collected counts aggregated at `level`.
///
/// - `Expansion`: distinct variants owned per group (`base_common` and
///   `base_rare` both count towards `base`)
/// - `Pack`: distinct variants owned per registered expansion
/// - `Border`: total cards per border key, duplicates included
pub fn raw_data_compressed(player: &Player, defs: &Definitions, level: CompressLevel) -> Result<String> {
    let mut header = vec!["name".to_string(), "packs_opened".to_string()];
    let mut values = vec![player.name.clone(), player.packs_opened.to_string()];

    match level {
        CompressLevel::Expansion => {
            for (group, (collected, _)) in group_totals(&player.collection, defs)?.iter() {
                header.push(group.to_string());
                values.push(collected.to_string());
            }
        }
        CompressLevel::Pack => {
            for name in player.collection.expansion_names() {
                let expansion = Expansion::load(defs, name)?;
                header.push(name.to_string());
                values.push(expansion.collected_count(&player.collection)?.to_string());
            }
        }
        CompressLevel::Border => {
            for (_, borders) in player.collection.iter() {
                for (border, cards) in borders.iter() {
                    header.push(border.to_string());
                    values.push(cards.values().sum::<u64>().to_string());
                }
            }
        }
    }

    Ok(format!("{}\n{}", header.join(SEPARATOR), values.join(SEPARATOR)))
}

/// Collected and total variants per group, in first-seen order.
fn group_totals(collection: &Collection, defs: &Definitions) -> Result<Tally<(usize, usize)>> {
    let mut totals: Tally<(usize, usize)> = Tally::new();
    for name in collection.expansion_names() {
        let expansion = Expansion::load(defs, name)?;
        let collected = expansion.collected_count(collection)?;
        let entry = totals.get_or_insert_with(group_of(name), || (0, 0));
        entry.0 += collected;
        entry.1 += expansion.total_variants();
    }
    Ok(totals)
}

/// `group: [collected/total]` for every group, joined with `; `.
pub fn collected_summary(player: &Player, defs: &Definitions) -> Result<String> {
    let parts: Vec<String> = group_totals(&player.collection, defs)?
        .iter()
        .map(|(group, (collected, total))| format!("{group}: [{collected}/{total}]"))
        .collect();
    Ok(parts.join("; "))
}

/// One table per expansion: border rows by card columns.
#[must_use]
pub fn table_data(player: &Player) -> String {
    let collection = &player.collection;

    let longest_name = collection.expansion_names().map(str::len).max().unwrap_or(0);
    let mut longest_border = 0;
    let mut longest_card = 0;
    let mut largest_count = 0u64;
    for (_, borders) in collection.iter() {
        for (border, cards) in borders.iter() {
            longest_border = longest_border.max(border.len());
            for (card, count) in cards.iter() {
                longest_card = longest_card.max(card.len());
                largest_count = largest_count.max(*count);
            }
        }
    }

    let c1 = longest_name.max(longest_border) + 2;
    let c2 = longest_card.max(largest_count.to_string().len()) + 2;

    let mut out = format!("name: {}\npacks_opened: {}\n\n", player.name, player.packs_opened);
    for (name, borders) in collection.iter() {
        let cards: Vec<&str> = borders
            .values()
            .next()
            .map(|cards| cards.keys().collect())
            .unwrap_or_default();

        out.push_str(&format!("{name:<c1$}|"));
        for card in &cards {
            out.push_str(&format!("{card:>c2$}"));
        }
        out.push('\n');

        out.push_str(&"-".repeat(c1));
        out.push('|');
        out.push_str(&"-".repeat(c2 * cards.len()));
        out.push('\n');

        for (border, counts) in borders.iter() {
            out.push_str(&format!("{border:<c1$}|"));
            for count in counts.values() {
                out.push_str(&format!("{count:>c2$}"));
            }
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

#[derive(Serialize)]
struct PlayerJson<'a> {
    name: &'a str,
    packs_opened: u64,
    #[serde(flatten)]
    collection: &'a Collection,
}

/// The player as a JSON object: `name`, `packs_opened`, then one key per
/// expansion. Indented with four spaces.
pub fn to_json(player: &Player) -> Result<String> {
    let doc = PlayerJson {
        name: &player.name,
        packs_opened: player.packs_opened,
        collection: &player.collection,
    };

    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    doc.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
