//! Protocol page extraction modules
//!
//! Each module handles one section of the page; `match_extractor` ties them
//! together.

pub mod dom;
mod event_extractor;
mod match_extractor;
mod roster_extractor;
mod score_extractor;
pub mod text_normalizer;

pub use event_extractor::*;
pub use match_extractor::*;
pub use roster_extractor::*;
pub use score_extractor::*;
