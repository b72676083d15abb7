//! Protocol page retrieval (blocking, via ureq)
//!
//! The only I/O in the crate. Extraction itself works on an already parsed
//! document.

use std::time::Duration;

use scraper::Html;
use url::Url;

use crate::config::FetchConfig;
use crate::error::{ProtocolError, Result};
use crate::extractors::assemble;
use crate::model::MatchInfo;

/// Status the site answers with for unknown match ids
const NOT_FOUND_STATUS: u16 = 500;

pub fn build_agent(config: &FetchConfig) -> ureq::Agent {
    ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
        .build()
        .into()
}

/// Page URL for a match id
pub fn protocol_url(config: &FetchConfig, match_id: u32) -> Result<Url> {
    let base = Url::parse(&config.base_url)?;
    Ok(base.join(&match_id.to_string())?)
}

/// Raw protocol page bytes
pub fn fetch_document(agent: &ureq::Agent, config: &FetchConfig, match_id: u32) -> Result<Vec<u8>> {
    let url = protocol_url(config, match_id)?;
    log::debug!("Fetching protocol {}", url);

    let response = agent
        .get(url.as_str())
        .header("User-Agent", config.user_agent.as_str())
        .call();

    match response {
        Ok(resp) => Ok(resp.into_body().read_to_vec()?),
        Err(ureq::Error::StatusCode(NOT_FOUND_STATUS)) => Err(ProtocolError::GameNotFound(match_id)),
        Err(e) => Err(e.into()),
    }
}

/// Fetch, parse and assemble one protocol
pub fn fetch_match(config: &FetchConfig, match_id: u32) -> Result<MatchInfo> {
    let agent = build_agent(config);
    let bytes = fetch_document(&agent, config, match_id)?;
    let html = String::from_utf8(bytes).map_err(|_| ProtocolError::InvalidUtf8)?;

    let document = Html::parse_document(&html);
    assemble(&document)
}
