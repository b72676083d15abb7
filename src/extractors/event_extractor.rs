//! Event timeline
//!
//! The timeline lives three levels above the "Mängu sündmused" heading text,
//! inside an element with class `timeline`. Each `li` is one event:
//!
//! ```html
//! <li>
//!   <span class="order">70+1′</span>
//!   <span class="status"><span class="card yellow" title="Reason"></span></span>
//!   <span class="player"><span>11.</span> Name</span>
//!   <span class="country">Away team</span>
//! </li>
//! ```

use scraper::{ElementRef, Html};

use super::dom;
use super::text_normalizer::{clean_minute, clean_number, EVENTS_HEADING};
use crate::error::{ProtocolError, Result};
use crate::model::{CardData, Event, EventKind, GoalData, Side, SwitchData};

/// Levels between the heading text node and the timeline's ancestor
const EVENTS_HEADING_DEPTH: usize = 3;

/// Timeline events in document order; no timeline means no events
pub fn parse_events(document: &Html, home_name: &str) -> Result<Vec<Event>> {
    let Some(section) =
        dom::heading_ancestor(document.root_element(), EVENTS_HEADING, EVENTS_HEADING_DEPTH)
    else {
        log::debug!("No events heading, treating timeline as empty");
        return Ok(Vec::new());
    };
    let Some(timeline) = dom::find(section, ".timeline")? else {
        log::debug!("No timeline under events heading");
        return Ok(Vec::new());
    };

    let item_selector = dom::selector("li")?;
    let mut events = Vec::new();

    for item in timeline.select(&item_selector) {
        let event = parse_event(item, home_name)?;
        if event.kind == EventKind::Unclassified {
            log::warn!(
                "Unclassified timeline entry at minute {} (player {})",
                event.time,
                event.player_number
            );
        }
        events.push(event);
    }

    log::debug!("Parsed {} timeline events", events.len());
    Ok(events)
}

fn parse_event(item: ElementRef<'_>, home_name: &str) -> Result<Event> {
    let order = required(item, ".order", "event minute")?;
    let (time, overtime_offset) = parse_minute(&dom::raw_text(order))?;

    let status = required(item, ".status", "event status")?;
    let markers = StatusMarkers::read(status)?;

    let player = required(item, ".player", "event player")?;
    let span_selector = dom::selector("span")?;
    let mut numbers = player.select(&span_selector);
    let first = numbers.next().ok_or(ProtocolError::MissingElement {
        context: "event player number",
    })?;
    let player_number = parse_player_number(first)?;

    let kind = match markers.classify() {
        Classification::Goal { penalty } => EventKind::Goal(GoalData { penalty }),
        Classification::OwnGoal => EventKind::OwnGoal,
        Classification::PenaltyMiss => EventKind::PenaltyMiss,
        Classification::Switch => {
            let off = numbers.last().unwrap_or(first);
            EventKind::Switch(SwitchData {
                off_player_number: parse_player_number(off)?,
            })
        }
        Classification::Card(card) => EventKind::Card(card),
        Classification::Unclassified => EventKind::Unclassified,
    };

    let country = required(item, ".country", "event team")?;

    Ok(Event {
        time,
        overtime_offset,
        team: side_for(&dom::text(country), home_name),
        player_number,
        kind,
    })
}

fn required<'a>(item: ElementRef<'a>, css: &str, context: &'static str) -> Result<ElementRef<'a>> {
    dom::find(item, css)?.ok_or(ProtocolError::MissingElement { context })
}

/// `"45′"` -> `(45, None)`, `"45+2′"` -> `(45, Some(2))`
pub fn parse_minute(text: &str) -> Result<(u32, Option<u32>)> {
    let minute = clean_minute(text);
    let invalid = || ProtocolError::InvalidNumber {
        context: "event minute",
        value: minute.clone(),
    };

    match minute.split_once('+') {
        Some((base, offset)) => {
            let base = base.trim().parse().map_err(|_| invalid())?;
            let offset = offset.trim().parse().map_err(|_| invalid())?;
            Ok((base, Some(offset)))
        }
        None => Ok((minute.parse().map_err(|_| invalid())?, None)),
    }
}

fn parse_player_number(node: ElementRef<'_>) -> Result<u32> {
    let text = clean_number(&dom::raw_text(node));
    text.parse().map_err(|_| ProtocolError::InvalidNumber {
        context: "event player number",
        value: text,
    })
}

/// Home when the event's team text equals the home team name exactly.
///
/// Any other text, including whitespace or punctuation variants of the home
/// name, is attributed to the away side.
pub fn side_for(team_text: &str, home_name: &str) -> Side {
    if team_text == home_name {
        Side::Home
    } else {
        Side::Away
    }
}

/// Marker nodes found under an event's status element
#[derive(Debug)]
struct StatusMarkers {
    /// Classes of `span.football`
    goal: Option<Vec<String>>,
    switch: bool,
    /// Classes and title of `span.card`
    card: Option<(Vec<String>, String)>,
    /// Any `.penalty` element below the status node
    penalty: bool,
}

/// Outcome of classification, before the player numbers are attached
#[derive(Debug, Clone, PartialEq)]
enum Classification {
    Goal { penalty: bool },
    OwnGoal,
    PenaltyMiss,
    Switch,
    Card(CardData),
    Unclassified,
}

impl StatusMarkers {
    fn read(status: ElementRef<'_>) -> Result<Self> {
        let goal = dom::find(status, "span.football")?.map(class_list);
        let switch = dom::find(status, "span.switch")?.is_some();
        let card = dom::find(status, "span.card")?.map(|el| {
            let title = el.value().attr("title").unwrap_or("").trim().to_string();
            (class_list(el), title)
        });
        let penalty = dom::find(status, ".penalty")?.is_some();

        Ok(StatusMarkers {
            goal,
            switch,
            card,
            penalty,
        })
    }

    /// Precedence: goal, own goal, missed penalty, substitution, card.
    ///
    /// A red football is an own goal; a missed penalty is a `.penalty` marker
    /// without any football.
    fn classify(&self) -> Classification {
        if let Some(goal) = &self.goal {
            if has(goal, "red") {
                return Classification::OwnGoal;
            }
            return Classification::Goal {
                penalty: has(goal, "penalty"),
            };
        }
        if self.penalty {
            return Classification::PenaltyMiss;
        }
        if self.switch {
            return Classification::Switch;
        }
        if let Some((classes, reason)) = &self.card {
            return Classification::Card(CardData {
                is_yellow: has(classes, "yellow"),
                is_red: has(classes, "red"),
                reason: reason.clone(),
            });
        }
        Classification::Unclassified
    }
}

fn class_list(element: ElementRef<'_>) -> Vec<String> {
    element.value().classes().map(String::from).collect()
}

fn has(classes: &[String], class: &str) -> bool {
    classes.iter().any(|c| c == class)
}
