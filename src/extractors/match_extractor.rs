//! Whole-protocol assembly
//!
//! Resolves teams, rosters, scores and page markers of one protocol page and
//! hands the timeline to the event extractor.

use scraper::{ElementRef, Html};

use super::dom;
use super::event_extractor::parse_events;
use super::roster_extractor::parse_roster;
use super::score_extractor::{final_score, halftime_score};
use super::text_normalizer::{normalize_text, SUBSTITUTES_HEADING, UNOFFICIAL_LABEL};
use crate::error::{ProtocolError, Result};
use crate::model::{MatchInfo, Player, Team};

/// Levels between the substitutes heading text and the container of both lists
const SUBSTITUTES_HEADING_DEPTH: usize = 3;

/// Name and id read from a `.team` node
#[derive(Debug, Clone, PartialEq)]
struct TeamHeader {
    name: String,
    team_id: String,
}

/// Home and away entries of a two-column section
#[derive(Debug, Default)]
struct Sides<T> {
    home: T,
    away: T,
}

/// Parse raw markup and assemble the protocol
pub fn parse_match(html: &str) -> Result<MatchInfo> {
    let document = Html::parse_document(html);
    assemble(&document)
}

/// Build the full match record from a parsed protocol page.
///
/// Only the full-time score and the team headers are mandatory; every other
/// section falls back to an empty or absent value.
pub fn assemble(document: &Html) -> Result<MatchInfo> {
    let (home_score, away_score) = final_score(document)?;
    let halftime = halftime_score(document)?;

    let [home, away] = team_headers(document)?;
    log::debug!("Protocol for {} vs {}", home.name, away.name);

    let lineup = match dom::find_in(document, "div.lineup")? {
        Some(container) => rosters(container)?,
        None => Sides::default(),
    };
    let substitutes = match dom::heading_ancestor(
        document.root_element(),
        SUBSTITUTES_HEADING,
        SUBSTITUTES_HEADING_DEPTH,
    ) {
        Some(container) => rosters(container)?,
        None => Sides::default(),
    };
    log::debug!(
        "Lineups {}/{}, substitutes {}/{}",
        lineup.home.len(),
        lineup.away.len(),
        substitutes.home.len(),
        substitutes.away.len()
    );

    let events = parse_events(document, &home.name)?;

    Ok(MatchInfo {
        home_team: Team {
            name: home.name,
            team_id: home.team_id,
            lineup: lineup.home,
            substitutes: substitutes.home,
        },
        away_team: Team {
            name: away.name,
            team_id: away.team_id,
            lineup: lineup.away,
            substitutes: substitutes.away,
        },
        official: !dom::contains_text(document, UNOFFICIAL_LABEL),
        home_score,
        away_score,
        home_halftime_score: halftime.map(|(home, _)| home),
        away_halftime_score: halftime.map(|(_, away)| away),
        location: location(document)?,
        attendance: attendance(document)?,
        events,
    })
}

/// The two `.team` nodes in document order: home first, away second
fn team_headers(document: &Html) -> Result<[TeamHeader; 2]> {
    let sel = dom::selector(".team")?;
    let nodes: Vec<ElementRef<'_>> = document.select(&sel).collect();

    if nodes.len() > 2 {
        return Err(ProtocolError::TooManyTeams(nodes.len()));
    }
    let [home, away] = nodes.as_slice() else {
        return Err(ProtocolError::MissingTeams(nodes.len()));
    };

    Ok([team_header(*home)?, team_header(*away)?])
}

fn team_header(node: ElementRef<'_>) -> Result<TeamHeader> {
    let href = dom::find(node, "a")?
        .and_then(|link| link.value().attr("href"))
        .ok_or(ProtocolError::MissingElement { context: "team link" })?;

    Ok(TeamHeader {
        name: dom::text(node),
        team_id: href.rsplit('/').next().unwrap_or_default().to_string(),
    })
}

/// Left list is the home side, right list the away side.
///
/// The page lays both teams out in two columns; nothing in the lists names
/// the team, so this positional convention is the only link.
fn side_lists(container: ElementRef<'_>) -> Result<Sides<Option<ElementRef<'_>>>> {
    Ok(Sides {
        home: dom::find(container, "ul.left")?,
        away: dom::find(container, "ul.right")?,
    })
}

fn rosters(container: ElementRef<'_>) -> Result<Sides<Vec<Player>>> {
    let lists = side_lists(container)?;
    Ok(Sides {
        home: parse_roster(lists.home)?,
        away: parse_roster(lists.away)?,
    })
}

fn location(document: &Html) -> Result<String> {
    Ok(dom::find_in(document, "li.location")?
        .map(dom::text)
        .unwrap_or_default())
}

/// Attendance figure; absent or unreadable figures are `None`
fn attendance(document: &Html) -> Result<Option<u32>> {
    let Some(node) = dom::find_in(document, "li.group")? else {
        return Ok(None);
    };

    let text = normalize_text(&dom::raw_text(node));
    match text.parse() {
        Ok(count) => Ok(Some(count)),
        Err(_) => {
            log::warn!("Ignoring unreadable attendance {:?}", text);
            Ok(None)
        }
    }
}
