//! Lineup and substitute lists
//!
//! Each player row looks like
//! `<li><span class="count">10.</span><p>Name <small>(K)</small></p></li>`.
//! Header rows (`li.title`) and spacer rows (`li.large`) are skipped.

use scraper::ElementRef;

use super::dom;
use super::text_normalizer::{clean_number, collapse_whitespace};
use crate::error::{ProtocolError, Result};
use crate::model::Player;

const KEEPER_MARKER: &str = "(VV)";
const CAPTAIN_MARKER: &str = "(K)";

/// Row classes that never describe a player
const SKIPPED_ROW_CLASSES: [&str; 2] = ["title", "large"];

/// Players of one list in document order; a missing list is an empty roster.
///
/// Names are not verbatim: role markers are cut out and runs of whitespace,
/// including the gap a marker leaves mid-name, collapse to single spaces.
pub fn parse_roster(list: Option<ElementRef<'_>>) -> Result<Vec<Player>> {
    let Some(list) = list else {
        return Ok(Vec::new());
    };

    let row_selector = dom::selector("li")?;
    let mut players = Vec::new();

    for row in list.select(&row_selector) {
        if SKIPPED_ROW_CLASSES.iter().any(|class| dom::has_class(row, class)) {
            continue;
        }
        if let Some(player) = parse_player(row)? {
            players.push(player);
        }
    }

    Ok(players)
}

/// `None` for decorative rows without a jersey number
fn parse_player(row: ElementRef<'_>) -> Result<Option<Player>> {
    let Some(number_node) = dom::find(row, ".count")? else {
        return Ok(None);
    };

    let number_text = clean_number(&dom::raw_text(number_node));
    let number = number_text
        .parse::<u32>()
        .map_err(|_| ProtocolError::InvalidNumber {
            context: "jersey number",
            value: number_text.clone(),
        })?;

    let name_node = dom::find(row, "p")?.ok_or(ProtocolError::MissingElement {
        context: "player name",
    })?;
    let mut name = dom::raw_text(name_node);
    let mut is_keeper = false;
    let mut is_captain = false;

    let marker_selector = dom::selector("small")?;
    for marker in name_node.select(&marker_selector) {
        let marker_text = dom::text(marker);
        if marker_text.is_empty() {
            continue;
        }

        match marker_text.as_str() {
            KEEPER_MARKER => is_keeper = true,
            CAPTAIN_MARKER => is_captain = true,
            _ => {}
        }
        name = name.replace(&marker_text, "");
    }

    Ok(Some(Player {
        number,
        name: collapse_whitespace(&name),
        is_keeper,
        is_captain,
    }))
}
