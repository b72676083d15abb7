//! Football match protocol parser
//!
//! Turns a match protocol page (teams, rosters, score lines, event
//! timeline) into a typed `MatchInfo`:
//! - score lines, including symbolic walkover results
//! - lineups and substitutes with keeper/captain markers
//! - goals, own goals, missed penalties, substitutions and cards
//!
//! Also exposes a C interface returning the record as JSON.

pub mod config;
pub mod error;
pub mod extractors;
pub mod fetch;
pub mod ffi;
pub mod model;

pub use config::FetchConfig;
pub use error::{ProtocolError, Result};
pub use extractors::{assemble, parse_match};
pub use fetch::fetch_match;
pub use model::*;
