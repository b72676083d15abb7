//! Match protocol data model
//!
//! Every value here is produced once per extraction and never mutated
//! afterwards. Serialization follows the shape consumers of the protocol
//! JSON expect: scores are numbers or their verbatim symbol, events carry
//! an `event_type` string next to an optional `data` payload.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder results written instead of a goal count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolicScore {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "")]
    Blank,
}

impl SymbolicScore {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(SymbolicScore::Plus),
            "-" => Some(SymbolicScore::Minus),
            "" => Some(SymbolicScore::Blank),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolicScore::Plus => "+",
            SymbolicScore::Minus => "-",
            SymbolicScore::Blank => "",
        }
    }
}

/// One side of a score line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Score {
    Goals(u32),
    Symbolic(SymbolicScore),
}

impl Score {
    /// Parse one already-trimmed half of a score line.
    ///
    /// Symbols are checked first so that `""` never reaches the integer parser.
    pub fn parse(part: &str) -> Option<Self> {
        if let Some(symbol) = SymbolicScore::from_symbol(part) {
            return Some(Score::Symbolic(symbol));
        }
        part.parse().ok().map(Score::Goals)
    }

    pub fn goals(&self) -> Option<u32> {
        match self {
            Score::Goals(n) => Some(*n),
            Score::Symbolic(_) => None,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Goals(n) => write!(f, "{}", n),
            Score::Symbolic(symbol) => f.write_str(symbol.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub number: u32,
    pub name: String,
    pub is_keeper: bool,
    pub is_captain: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub team_id: String,
    /// Starting eleven in document order
    pub lineup: Vec<Player>,
    pub substitutes: Vec<Player>,
}

impl Team {
    /// Look a jersey number up in the lineup first, then among substitutes
    pub fn player(&self, number: u32) -> Option<&Player> {
        self.lineup
            .iter()
            .chain(self.substitutes.iter())
            .find(|p| p.number == number)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalData {
    pub penalty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchData {
    pub off_player_number: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardData {
    pub is_yellow: bool,
    pub is_red: bool,
    pub reason: String,
}

/// Classification of a timeline entry together with its payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", content = "data", rename_all = "snake_case")]
pub enum EventKind {
    Goal(GoalData),
    OwnGoal,
    PenaltyMiss,
    Switch(SwitchData),
    Card(CardData),
    /// Timeline entry that carried none of the known markers
    #[serde(rename = "")]
    Unclassified,
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Goal(_) => "goal",
            EventKind::OwnGoal => "own_goal",
            EventKind::PenaltyMiss => "penalty_miss",
            EventKind::Switch(_) => "switch",
            EventKind::Card(_) => "card",
            EventKind::Unclassified => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Minute mark
    pub time: u32,
    /// Stoppage minutes for `45+2` style marks
    pub overtime_offset: Option<u32>,
    pub team: Side,
    pub player_number: u32,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl Event {
    pub fn event_type(&self) -> &'static str {
        self.kind.name()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchInfo {
    pub home_team: Team,
    pub away_team: Team,
    pub official: bool,
    pub home_score: Score,
    pub away_score: Score,
    pub home_halftime_score: Option<Score>,
    pub away_halftime_score: Option<Score>,
    pub location: String,
    pub attendance: Option<u32>,
    /// Timeline order, not sorted by minute
    pub events: Vec<Event>,
}

impl MatchInfo {
    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::Home => &self.home_team,
            Side::Away => &self.away_team,
        }
    }

    /// Number of timeline entries that matched no known event marker
    pub fn unclassified_events(&self) -> usize {
        self.events
            .iter()
            .filter(|e| e.kind == EventKind::Unclassified)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_score_parse() {
        assert_eq!(Score::parse("3"), Some(Score::Goals(3)));
        assert_eq!(Score::parse("+"), Some(Score::Symbolic(SymbolicScore::Plus)));
        assert_eq!(Score::parse(""), Some(Score::Symbolic(SymbolicScore::Blank)));
        assert_eq!(Score::parse("x"), None);
        assert_eq!(Score::parse("-1"), None);
    }

    #[test]
    fn test_score_serialization() {
        assert_eq!(serde_json::to_value(Score::Goals(2)).unwrap(), json!(2));
        assert_eq!(
            serde_json::to_value(Score::Symbolic(SymbolicScore::Minus)).unwrap(),
            json!("-")
        );
        let back: Score = serde_json::from_value(json!("+")).unwrap();
        assert_eq!(back, Score::Symbolic(SymbolicScore::Plus));
    }

    #[test]
    fn test_event_serialization() {
        let goal = Event {
            time: 45,
            overtime_offset: Some(2),
            team: Side::Home,
            player_number: 9,
            kind: EventKind::Goal(GoalData { penalty: true }),
        };
        assert_eq!(
            serde_json::to_value(&goal).unwrap(),
            json!({
                "time": 45,
                "overtime_offset": 2,
                "team": "home",
                "player_number": 9,
                "event_type": "goal",
                "data": { "penalty": true }
            })
        );

        let own_goal = Event {
            time: 12,
            overtime_offset: None,
            team: Side::Away,
            player_number: 4,
            kind: EventKind::OwnGoal,
        };
        let value = serde_json::to_value(&own_goal).unwrap();
        assert_eq!(value["event_type"], "own_goal");
        assert!(value.get("data").is_none());
        assert_eq!(own_goal.event_type(), "own_goal");
    }

    #[test]
    fn test_team_player_lookup() {
        let team = Team {
            name: "Home".to_string(),
            team_id: "1".to_string(),
            lineup: vec![Player {
                number: 1,
                name: "Keeper".to_string(),
                is_keeper: true,
                is_captain: false,
            }],
            substitutes: vec![Player {
                number: 12,
                name: "Bench".to_string(),
                is_keeper: false,
                is_captain: false,
            }],
        };

        assert_eq!(team.player(12).map(|p| p.name.as_str()), Some("Bench"));
        assert!(team.player(1).unwrap().is_keeper);
        assert!(team.player(7).is_none());
    }
}
