// SPDX-License-Identifier: MPL-2.0
//! Time display and clamping helpers for video playback.

/// Formats a playback position as `MM:SS`, or `H:MM:SS` from one hour on.
///
/// Negative and non-finite values display as `00:00`.
///
/// # Examples
///
/// ```
/// use manga_lens::video_player::time_units::format_time;
///
/// assert_eq!(format_time(75.9), "01:15");
/// assert_eq!(format_time(3725.0), "1:02:05");
/// ```
#[must_use]
pub fn format_time(secs: f64) -> String {
    if !secs.is_finite() || secs <= 0.0 {
        return "00:00".to_string();
    }
    let total = secs.floor() as u64;
    let hours = total / 3600;
    let minutes = (total / 60) % 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Clamps a seek target to `[0, duration]`. An unknown duration only allows 0.
#[must_use]
pub fn clamp_position(target: f64, duration: Option<f64>) -> f64 {
    let end = duration.filter(|d| d.is_finite() && *d > 0.0).unwrap_or(0.0);
    if target.is_finite() {
        target.clamp(0.0, end)
    } else {
        0.0
    }
}
