use std::time::Duration;

use crate::{
    cli::{CliError, formatting::format_track},
    services::mpris::{MetadataRecord, MprisError, utils::format_duration},
};

/// Parses a target position for the current track.
///
/// Accepts seconds (`30`), `mm:ss` (`1:30`), a percentage of the track
/// length (`50%`) or an offset from the current position (`+10`, `-10`).
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` for malformed input, or when the
/// form needs a length or position the player did not report
pub fn parse_position(
    position_str: &str,
    current_position: Option<Duration>,
    track_length: Option<Duration>,
) -> Result<Duration, CliError> {
    if let Some(percentage_str) = position_str.strip_suffix('%') {
        let percentage = percentage_str
            .parse::<f64>()
            .map_err(|_| CliError::invalid("position", "Invalid percentage format"))?;

        if !(0.0..=100.0).contains(&percentage) {
            return Err(CliError::invalid(
                "position",
                "Percentage must be between 0 and 100",
            ));
        }

        let track_length = track_length.ok_or_else(|| {
            CliError::invalid("position", "Cannot use percentage - track length unknown")
        })?;

        return Ok(Duration::from_secs_f64(
            track_length.as_secs_f64() * (percentage / 100.0),
        ));
    }

    if let Some(sign) = position_str.chars().next().filter(|c| *c == '+' || *c == '-') {
        let current = current_position.ok_or_else(|| {
            CliError::invalid(
                "position",
                "Cannot use relative seeking - current position unknown",
            )
        })?;

        let delta = position_str[1..]
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| CliError::invalid("position", "Invalid relative seek format"))?;

        return Ok(if sign == '+' {
            current.saturating_add(delta)
        } else {
            current.saturating_sub(delta)
        });
    }

    if let Some((minutes, seconds)) = position_str.split_once(':') {
        let minutes = minutes
            .parse::<u64>()
            .map_err(|_| CliError::invalid("position", "Invalid minutes value"))?;
        let seconds = seconds
            .parse::<u64>()
            .map_err(|_| CliError::invalid("position", "Invalid time format. Use mm:ss"))?;

        if seconds >= 60 {
            return Err(CliError::invalid("position", "Seconds must be less than 60"));
        }

        return minutes
            .checked_mul(60)
            .and_then(|minutes| minutes.checked_add(seconds))
            .map(Duration::from_secs)
            .ok_or_else(|| CliError::invalid("position", "Position is too large"));
    }

    position_str.parse::<u64>().map(Duration::from_secs).map_err(|_| {
        CliError::invalid(
            "position",
            "Invalid position format. Use seconds, mm:ss, percentage (50%), or relative (+10, -10)",
        )
    })
}

/// Parses an on/off switch. `toggle` flips `current`.
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` for anything else
pub fn parse_switch(arg: &str, value: &str, current: bool) -> Result<bool, CliError> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        "toggle" => Ok(!current),
        _ => Err(CliError::invalid(arg, "Expected on, off or toggle")),
    }
}

/// Parses a level given as a fraction (`0.5`) or a percentage (`50%`).
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` if the value is not a finite number
pub fn parse_level(arg: &str, value: &str) -> Result<f64, CliError> {
    let parsed = match value.strip_suffix('%') {
        Some(percentage) => percentage.parse::<f64>().map(|p| p / 100.0),
        None => value.parse::<f64>(),
    };

    parsed
        .ok()
        .filter(|level| level.is_finite())
        .ok_or_else(|| CliError::invalid(arg, format!("'{value}' is not a number")))
}

/// One-line description of a record, or `no track` for an idle player.
///
/// # Errors
///
/// Returns error if a field the line uses has the wrong type
pub fn describe_track(record: &MetadataRecord) -> Result<String, MprisError> {
    if record.is_empty() {
        return Ok("no track".to_string());
    }

    let mut line = format_track(
        record.title()?.as_deref(),
        record.album()?.as_deref(),
        &record.artist()?.unwrap_or_default(),
    );
    if let Some(length) = record.length()? {
        line.push_str(&format!(" [{}]", format_duration(length)));
    }
    Ok(line)
}
