//! TOML subset parser
//!
//! Reads the glove configuration without an allocator. Supported syntax:
//! `[section]` headers, `key = value` pairs, `#` comments, and integer,
//! float, boolean and double-quoted string values (no escapes). Every key
//! is optional; keys that are present overwrite the defaults passed in.

use grabbity_hal::ColorOrder;

use super::types::*;
use crate::heartbeat::HeartbeatPolicy;
use crate::scroller::ScrollAdvance;

/// Configuration parse error, with the 1-based line it occurred on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Malformed or unknown `[section]` header
    InvalidSection { line: u16 },
    /// Key not valid in its section, or a key before any section
    UnknownKey { line: u16 },
    /// Value malformed, of the wrong type, or out of range
    InvalidValue { line: u16 },
    /// String value longer than its field allows
    TooLong { line: u16 },
}

impl ParseError {
    /// Line the error occurred on
    pub fn line(&self) -> u16 {
        match *self {
            ParseError::InvalidSection { line }
            | ParseError::UnknownKey { line }
            | ParseError::InvalidValue { line }
            | ParseError::TooLong { line } => line,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Glove,
    Display,
    Heartbeat,
    Filter,
    Resin,
    Pulse,
    Pixels,
    Fan,
}

impl Section {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "glove" => Section::Glove,
            "display" => Section::Display,
            "heartbeat" => Section::Heartbeat,
            "filter" => Section::Filter,
            "resin" => Section::Resin,
            "pulse" => Section::Pulse,
            "pixels" => Section::Pixels,
            "fan" => Section::Fan,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Value<'a> {
    Int(u32),
    Float(f32),
    Bool(bool),
    Str(&'a str),
}

impl<'a> Value<'a> {
    fn parse(raw: &'a str) -> Option<Self> {
        if let Some(inner) = raw.strip_prefix('"') {
            let inner = inner.strip_suffix('"')?;
            return (!inner.contains('"')).then_some(Value::Str(inner));
        }
        match raw {
            "true" => return Some(Value::Bool(true)),
            "false" => return Some(Value::Bool(false)),
            _ => {}
        }
        if let Ok(n) = raw.parse::<u32>() {
            return Some(Value::Int(n));
        }
        raw.parse::<f32>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Value::Float)
    }

    fn as_u32(self) -> Option<u32> {
        match self {
            Value::Int(n) => Some(n),
            _ => None,
        }
    }

    fn as_u8(self) -> Option<u8> {
        self.as_u32().and_then(|n| u8::try_from(n).ok())
    }

    fn as_f32(self) -> Option<f32> {
        match self {
            Value::Float(f) => Some(f),
            Value::Int(n) => Some(n as f32),
            _ => None,
        }
    }

    fn as_bool(self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    fn as_str(self) -> Option<&'a str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Cut a trailing `#` comment, ignoring `#` inside a quoted string
fn strip_comment(line: &str) -> &str {
    let mut quoted = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => quoted = !quoted,
            '#' if !quoted => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Parse `text` on top of `defaults`
pub fn parse_config(text: &str, defaults: GloveConfig) -> Result<GloveConfig, ParseError> {
    let mut config = defaults;
    let mut section = None;

    for (idx, raw) in text.lines().enumerate() {
        let line = u16::try_from(idx + 1).unwrap_or(u16::MAX);
        let content = strip_comment(raw).trim();
        if content.is_empty() {
            continue;
        }

        if let Some(rest) = content.strip_prefix('[') {
            let name = rest
                .strip_suffix(']')
                .ok_or(ParseError::InvalidSection { line })?;
            section = Some(
                Section::from_name(name.trim()).ok_or(ParseError::InvalidSection { line })?,
            );
            continue;
        }

        let (key, raw_value) = content
            .split_once('=')
            .ok_or(ParseError::InvalidValue { line })?;
        let section = section.ok_or(ParseError::UnknownKey { line })?;
        let value = Value::parse(raw_value.trim()).ok_or(ParseError::InvalidValue { line })?;

        apply(&mut config, section, key.trim(), value, line)?;
    }

    Ok(config)
}

fn apply(
    config: &mut GloveConfig,
    section: Section,
    key: &str,
    value: Value<'_>,
    line: u16,
) -> Result<(), ParseError> {
    let invalid = ParseError::InvalidValue { line };

    // Typed accessors with range checks
    let uint = |min: u32| value.as_u32().filter(|&n| n >= min).ok_or(invalid);
    let byte_in = |min: u8, max: u8| {
        value
            .as_u8()
            .filter(|n| (min..=max).contains(n))
            .ok_or(invalid)
    };
    let float_in = |min: f32, max: f32| {
        value
            .as_f32()
            .filter(|f| (min..=max).contains(f))
            .ok_or(invalid)
    };
    let flag = || value.as_bool().ok_or(invalid);
    let word = || value.as_str().ok_or(invalid);

    match (section, key) {
        (Section::Glove, "kind") => {
            config.kind = match word()? {
                "left" => GloveKind::Left,
                "right" => GloveKind::Right,
                _ => return Err(invalid),
            }
        }
        (Section::Glove, "tick_ms") => config.tick_ms = uint(1)?,

        (Section::Display, "header") => {
            config.display.header.clear();
            config
                .display
                .header
                .push_str(word()?)
                .map_err(|_| ParseError::TooLong { line })?;
        }
        (Section::Display, "refresh_ms") => config.display.refresh_ms = uint(0)?,
        (Section::Display, "width_chars") => {
            config.display.width_chars = byte_in(2, MAX_HEADER_LEN as u8)?
        }
        (Section::Display, "lines_per_tick") => config.display.lines_per_tick = byte_in(1, 2)?,
        (Section::Display, "advance") => {
            config.display.advance = match word()? {
                "line" => ScrollAdvance::OneLine,
                "window" => ScrollAdvance::Window,
                _ => return Err(invalid),
            }
        }
        (Section::Display, "resin_icon") => config.display.resin_icon = flag()?,

        (Section::Heartbeat, "enabled") => config.heartbeat.enabled = flag()?,
        (Section::Heartbeat, "policy") => {
            config.heartbeat.policy = match word()? {
                "free_running" => HeartbeatPolicy::FreeRunning,
                "wall_clock" => HeartbeatPolicy::WallClock,
                _ => return Err(invalid),
            }
        }
        (Section::Heartbeat, "interval_ms") => config.heartbeat.interval_ms = uint(0)?,

        (Section::Filter, "enabled") => config.filter.enabled = flag()?,
        (Section::Filter, "time_constant_s") => {
            config.filter.time_constant_s = float_in(0.0, 3600.0)?
        }
        (Section::Filter, "max_level") => config.filter.max_level = byte_in(0, u8::MAX)?,
        (Section::Filter, "half_period_s") => config.filter.half_period_s = byte_in(1, 30)?,

        (Section::Resin, "enabled") => config.resin.enabled = flag()?,
        (Section::Resin, "interval_ms") => config.resin.interval_ms = uint(0)?,
        (Section::Resin, "rate_per_second") => config.resin.rate_per_second = float_in(0.0, 1000.0)?,

        (Section::Pulse, "hue") => config.pulse.base.hue = float_in(0.0, 1.0)?,
        (Section::Pulse, "saturation") => config.pulse.base.saturation = float_in(0.0, 1.0)?,
        (Section::Pulse, "value") => config.pulse.base.value = float_in(0.0, 1.0)?,
        (Section::Pulse, "gamma") => config.pulse.gamma = flag()?,

        (Section::Pixels, "source") => {
            config.pixels.source = match word()? {
                "off" => PixelSource::Off,
                "heartbeat" => PixelSource::Heartbeat,
                "pulse" => PixelSource::Pulse,
                _ => return Err(invalid),
            }
        }
        (Section::Pixels, "order") => {
            config.pixels.order = match word()? {
                "grbw" => ColorOrder::Grbw,
                "rgbw" => ColorOrder::Rgbw,
                _ => return Err(invalid),
            }
        }

        (Section::Fan, "enabled") => config.fan.enabled = flag()?,
        (Section::Fan, "toggle_ms") => config.fan.toggle_ms = uint(1)?,

        _ => return Err(ParseError::UnknownKey { line }),
    }

    Ok(())
}
