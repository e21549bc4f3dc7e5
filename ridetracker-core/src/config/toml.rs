//! Minimal TOML parser for `ride.toml`
//!
//! Handles only the subset the configuration uses:
//! - `[section]` headers
//! - `key = value` pairs with string or integer values
//! - Comments (`# ...`), whole-line or trailing
//!
//! NOT supported: arrays, inline tables, dotted keys, multi-line strings.
//! Keys left out keep their default values.

use super::types::{ConfigViolation, DistanceDisplay, RideConfig};
use crate::input::Button;

/// Parse error, with the 1-based line it occurred on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Line is neither a header, a key/value pair, nor a comment
    InvalidLine { line: usize },
    /// Section header not recognised
    UnknownSection { line: usize },
    /// Key not recognised in its section
    UnknownKey { line: usize },
    /// Value has the wrong type or is out of range
    InvalidValue { line: usize },
    /// Parsed configuration failed validation
    Invalid(ConfigViolation),
}

impl From<ConfigViolation> for ConfigError {
    fn from(v: ConfigViolation) -> Self {
        ConfigError::Invalid(v)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Session,
    Buttons,
    Link,
}

/// A parsed right-hand side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Value<'a> {
    Str(&'a str),
    Int(i64),
}

/// Parse `ride.toml` contents into a validated configuration
pub fn parse_config(input: &str) -> Result<RideConfig, ConfigError> {
    let mut config = RideConfig::default();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let name = strip_comment(header)
                .strip_suffix(']')
                .ok_or(ConfigError::InvalidLine { line: line_no })?
                .trim();
            section = match name {
                "session" => Section::Session,
                "buttons" => Section::Buttons,
                "link" => Section::Link,
                _ => return Err(ConfigError::UnknownSection { line: line_no }),
            };
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .ok_or(ConfigError::InvalidLine { line: line_no })?;
        let key = key.trim();
        let value = parse_value(value.trim()).ok_or(ConfigError::InvalidValue { line: line_no })?;

        apply(&mut config, section, key, value, line_no)?;
    }

    config.validate()?;
    Ok(config)
}

/// Drop a trailing `# comment` from an unquoted fragment
fn strip_comment(text: &str) -> &str {
    match text.find('#') {
        Some(pos) => text[..pos].trim_end(),
        None => text,
    }
}

fn parse_value(text: &str) -> Option<Value<'_>> {
    if let Some(rest) = text.strip_prefix('"') {
        let end = rest.find('"')?;
        let trailing = rest[end + 1..].trim();
        if !trailing.is_empty() && !trailing.starts_with('#') {
            return None;
        }
        return Some(Value::Str(&rest[..end]));
    }

    parse_int(strip_comment(text)).map(Value::Int)
}

/// Integer literal, tolerating TOML digit separators (`3_000`)
fn parse_int(text: &str) -> Option<i64> {
    if text.starts_with('_') || text.ends_with('_') {
        return None;
    }
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for ch in digits.chars() {
        if ch == '_' {
            continue;
        }
        let digit = ch.to_digit(10)? as i64;
        value = value.checked_mul(10)?.checked_add(digit)?;
        seen_digit = true;
    }

    if !seen_digit {
        return None;
    }
    Some(if negative { -value } else { value })
}

fn apply(
    config: &mut RideConfig,
    section: Section,
    key: &str,
    value: Value<'_>,
    line: usize,
) -> Result<(), ConfigError> {
    let invalid = ConfigError::InvalidValue { line };

    match (section, key, value) {
        (Section::Session, "distance_display", Value::Str(name)) => {
            config.session.distance_display = DistanceDisplay::from_name(name).ok_or(invalid)?;
        }

        (Section::Buttons, "start_stop", Value::Str(name)) => {
            config.buttons.start_stop = Button::from_name(name).ok_or(invalid)?;
        }
        (Section::Buttons, "reset", Value::Str(name)) => {
            config.buttons.reset = Button::from_name(name).ok_or(invalid)?;
        }
        (Section::Buttons, "debounce_ms", Value::Int(ms)) => {
            config.buttons.debounce_ms = u16::try_from(ms).map_err(|_| invalid)?;
        }

        (Section::Link, "inbox_size", Value::Int(size)) => {
            config.link.inbox_size = u16::try_from(size).map_err(|_| invalid)?;
        }
        (Section::Link, "outbox_size", Value::Int(size)) => {
            config.link.outbox_size = u16::try_from(size).map_err(|_| invalid)?;
        }
        (Section::Link, "ack_timeout_ms", Value::Int(ms)) => {
            config.link.ack_timeout_ms = u32::try_from(ms).map_err(|_| invalid)?;
        }

        // Known key, wrong value type
        (Section::Session, "distance_display", _)
        | (Section::Buttons, "start_stop" | "reset" | "debounce_ms", _)
        | (Section::Link, "inbox_size" | "outbox_size" | "ack_timeout_ms", _) => {
            return Err(invalid);
        }

        _ => return Err(ConfigError::UnknownKey { line }),
    }

    Ok(())
}
