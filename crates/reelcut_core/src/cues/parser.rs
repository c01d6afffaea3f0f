//! Cue sheet parser.
//!
//! Parses the loosely formatted timestamp text produced by the analysis
//! step into reels of cues.
//!
//! # Format Overview
//!
//! A cue sheet is a sequence of reel blocks separated by blank lines:
//! ```text
//! 00:15:30    00:15:35    (HOOK: "Money is actually a trap.")
//! 00:01:00    00:01:10    (CONTEXT: "We spend our whole lives chasing it...")
//! 00:15:35    00:16:00    (PAYOFF: "...but real wealth is time.")
//!
//! 00:20:00    00:20:05    (HOOK: "I failed 17 times before...")
//! 00:20:05    00:20:30
//! ```
//!
//! Each line is `<start> <end> <optional label/comment>`. Timecodes accept
//! `HH:MM:SS` and `MM:SS`, both with an optional fractional-second suffix.
//! Lines starting with `#` or a markdown code fence are ignored, as are
//! leading and trailing blank lines.

use crate::models::{Cue, CueLabel, Reel, TimeSpan};

use super::error::{CueSheetError, CueSheetResult};

/// Parse a timecode string to microseconds.
///
/// Accepts `HH:MM:SS` and `MM:SS`, each with an optional `.frac` suffix.
/// Fractional digits beyond microsecond precision are truncated.
pub fn parse_timecode_us(s: &str) -> Option<u64> {
    let s = s.trim();
    let parts: Vec<&str> = s.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [h, m, sec] => (parse_field(h)?, parse_field(m)?, *sec),
        [m, sec] => (0, parse_field(m)?, *sec),
        _ => return None,
    };

    let (whole_secs, frac_us) = parse_seconds(seconds)?;
    Some(((hours * 60 + minutes) * 60 + whole_secs) * 1_000_000 + frac_us)
}

/// Format a microsecond offset as `HH:MM:SS` or `HH:MM:SS.frac`.
///
/// Trailing zeros of the fraction are trimmed, so the output reparses to
/// the same microsecond value.
pub fn format_timecode_us(us: u64) -> String {
    let total_secs = us / 1_000_000;
    let frac = us % 1_000_000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if frac == 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        let frac_str = format!("{:06}", frac);
        format!(
            "{:02}:{:02}:{:02}.{}",
            hours,
            minutes,
            secs,
            frac_str.trim_end_matches('0')
        )
    }
}

/// Parse a whole cue sheet into reels.
///
/// Blank lines delimit reels; cue order and count within each block are
/// preserved exactly. Empty input produces an empty result, not an error.
pub fn parse_cue_sheet(text: &str) -> CueSheetResult<Vec<Reel>> {
    let mut reels: Vec<Reel> = Vec::new();
    let mut current: Vec<Cue> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        // Blank lines separate reels
        if line.is_empty() {
            if !current.is_empty() {
                reels.push(Reel::new(std::mem::take(&mut current)));
            }
            continue;
        }

        // Tolerate commentary the upstream formats emit: "# Reel N" headers
        // and markdown code fences around AI responses.
        if line.starts_with('#') || line.starts_with("```") {
            continue;
        }

        let block = reels.len() + 1;
        current.push(parse_cue_line(line, line_no, block)?);
    }

    if !current.is_empty() {
        reels.push(Reel::new(current));
    }

    Ok(reels)
}

/// Parse one `<start> <end> <trailing>` cue line.
fn parse_cue_line(line: &str, line_no: usize, block: usize) -> CueSheetResult<Cue> {
    let (start_str, rest) = next_token(line);
    let (end_str, trailing) = next_token(rest);

    if end_str.is_empty() {
        return Err(CueSheetError::malformed(line_no, block, line));
    }

    let start_us = parse_timecode_us(start_str)
        .ok_or_else(|| CueSheetError::malformed(line_no, block, start_str))?;
    let end_us = parse_timecode_us(end_str)
        .ok_or_else(|| CueSheetError::malformed(line_no, block, end_str))?;

    let span = TimeSpan::new(start_us, end_us)
        .ok_or_else(|| CueSheetError::inverted(line_no, block, start_str, end_str))?;

    let (label, comment) = split_label_comment(trailing);
    Ok(Cue::new(span).with_label(label).with_comment(comment))
}

/// Split off the next whitespace-delimited token.
fn next_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], &s[i..]),
        None => (s, ""),
    }
}

/// Extract the cue label and comment from the trailing free text.
///
/// A label token anywhere in the text tags the cue; a leading `LABEL:`
/// prefix is removed from the comment, and outer parentheses and quotes
/// are stripped.
fn split_label_comment(trailing: &str) -> (CueLabel, String) {
    let mut text = trailing.trim();
    if text.len() >= 2 && text.starts_with('(') && text.ends_with(')') {
        text = text[1..text.len() - 1].trim();
    }

    let lower = text.to_ascii_lowercase();
    let mut found: Option<(usize, CueLabel, usize)> = None;
    for (token, label) in [
        ("hook", CueLabel::Hook),
        ("context", CueLabel::Context),
        ("payoff", CueLabel::Payoff),
    ] {
        if let Some(pos) = lower.find(token) {
            if found.map_or(true, |(prev, _, _)| pos < prev) {
                found = Some((pos, label, token.len()));
            }
        }
    }

    match found {
        None => (CueLabel::Other, strip_quotes(text).to_string()),
        Some((0, label, token_len)) => {
            let rest = text[token_len..].trim_start();
            let rest = rest.strip_prefix(':').map(str::trim_start).unwrap_or(rest);
            (label, strip_quotes(rest).to_string())
        }
        Some((_, label, _)) => (label, strip_quotes(text).to_string()),
    }
}

/// Strip one pair of surrounding quotes, if present.
fn strip_quotes(s: &str) -> &str {
    let s = s.trim();
    if s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"'))
            || (s.starts_with('\'') && s.ends_with('\'')))
    {
        s[1..s.len() - 1].trim()
    } else {
        s
    }
}

/// Parse an unsigned decimal field.
fn parse_field(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Parse the seconds field, returning whole seconds and fractional microseconds.
fn parse_seconds(s: &str) -> Option<(u64, u64)> {
    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (s, None),
    };

    let whole = parse_field(whole)?;

    let frac_us = match frac {
        None => 0,
        Some(digits) => {
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let mut us = 0u64;
            for (i, b) in digits.bytes().take(6).enumerate() {
                us += u64::from(b - b'0') * 10u64.pow(5 - i as u32);
            }
            us
        }
    };

    Some((whole, frac_us))
}
