//! Text cleanup for locale labels, minute marks and jersey numbers
//!
//! All functions are total: empty input gives an empty string.

/// Label next to the full-time score
pub const FINAL_SCORE_LABEL: &str = "Lõppseis";
/// Label next to the half-time score
pub const HALFTIME_SCORE_LABEL: &str = "Vaheajaseis";
/// Label in front of the attendance figure
pub const ATTENDANCE_LABEL: &str = "Pealtvaatajaid";
/// Heading above the event timeline
pub const EVENTS_HEADING: &str = "Mängu sündmused";
/// Heading above the substitute lists
pub const SUBSTITUTES_HEADING: &str = "Vahetusmängijad";
/// Marker text on protocols that are not official
pub const UNOFFICIAL_LABEL: &str = "Mitteametlik";

/// Prime sign appended to minute marks (`45′`)
pub const MINUTE_GLYPH: char = '\u{2032}';

const STRIPPED_LABELS: [&str; 3] = [FINAL_SCORE_LABEL, HALFTIME_SCORE_LABEL, ATTENDANCE_LABEL];

/// Remove the score and attendance labels and trim what is left
pub fn normalize_text(text: &str) -> String {
    let mut out = text.to_string();
    for label in STRIPPED_LABELS {
        if out.contains(label) {
            out = out.replace(label, "");
        }
    }
    out.trim().to_string()
}

/// `"45+2′"` -> `"45+2"`
pub fn clean_minute(text: &str) -> String {
    text.replace(MINUTE_GLYPH, "").trim().to_string()
}

/// `"10."` -> `"10"`
pub fn clean_number(text: &str) -> String {
    text.replace('.', "").trim().to_string()
}

/// Collapse runs of whitespace into single spaces
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
