//! Timecode value object (`mm:ss`)

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::error::TimecodeParseError;

/// Whole-second position rendered as `mm:ss`.
///
/// Sub-second remainders are truncated, never rounded. There is no hour
/// field: minutes keep counting past 59, so one hour renders as `60:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Timecode {
    seconds: u64,
}

impl Timecode {
    /// Create a Timecode from whole seconds
    pub const fn from_secs(seconds: u64) -> Self {
        Self { seconds }
    }

    /// Create a Timecode from fractional seconds.
    /// Negative, NaN and infinite inputs collapse to zero.
    pub fn from_secs_f64(seconds: f64) -> Self {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Self::default();
        }
        Self {
            seconds: seconds.trunc() as u64,
        }
    }

    /// Create a Timecode from a std Duration
    pub const fn from_duration(duration: Duration) -> Self {
        Self::from_secs(duration.as_secs())
    }

    /// Total whole seconds
    pub const fn as_secs(&self) -> u64 {
        self.seconds
    }

    /// Minutes field
    pub const fn minutes(&self) -> u64 {
        self.seconds / 60
    }

    /// Seconds field (0-59)
    pub const fn seconds(&self) -> u64 {
        self.seconds % 60
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes(), self.seconds())
    }
}

impl FromStr for Timecode {
    type Err = TimecodeParseError;

    /// Parse `mm:ss` where the seconds field is exactly two digits below 60.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || TimecodeParseError {
            input: s.to_string(),
        };

        let (minutes, seconds) = s.trim().split_once(':').ok_or_else(err)?;

        if minutes.len() < 2
            || seconds.len() != 2
            || !minutes.chars().all(|c| c.is_ascii_digit())
            || !seconds.chars().all(|c| c.is_ascii_digit())
        {
            return Err(err());
        }

        let minutes: u64 = minutes.parse().map_err(|_| err())?;
        let seconds: u64 = seconds.parse().map_err(|_| err())?;
        if seconds >= 60 {
            return Err(err());
        }

        Ok(Self::from_secs(minutes * 60 + seconds))
    }
}

/// Format fractional seconds as `mm:ss`
pub fn format_timecode(seconds: f64) -> String {
    Timecode::from_secs_f64(seconds).to_string()
}

/// Format a std Duration as `mm:ss`
pub fn format_duration(duration: Duration) -> String {
    Timecode::from_duration(duration).to_string()
}

/// Parse `mm:ss` back to whole seconds
pub fn parse_timecode(s: &str) -> Result<u64, TimecodeParseError> {
    s.parse::<Timecode>().map(|t| t.as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_timecode_to_seconds() {
        assert_eq!(parse_timecode("02:05"), Ok(125));
        assert_eq!(parse_timecode("60:00"), Ok(3600));
        assert!(parse_timecode("1:05").is_err());
        assert!(parse_timecode("00:60").is_err());
    }

    #[test]
    fn formats_zero() {
        assert_eq!(format_timecode(0.0), "00:00");
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_timecode(125.0), "02:05");
        assert_eq!(format_timecode(59.0), "00:59");
        assert_eq!(format_timecode(60.0), "01:00");
    }

    #[test]
    fn truncates_fraction() {
        assert_eq!(format_timecode(2.999), "00:02");
        assert_eq!(format_timecode(59.9999), "00:59");
    }

    #[test]
    fn invalid_input_is_zero() {
        assert_eq!(format_timecode(-3.5), "00:00");
        assert_eq!(format_timecode(f64::NAN), "00:00");
        assert_eq!(format_timecode(f64::INFINITY), "00:00");
    }

    #[test]
    fn minutes_continue_past_an_hour() {
        assert_eq!(format_timecode(3600.0), "60:00");
        assert_eq!(format_timecode(4535.0), "75:35");
    }

    #[test]
    fn formats_std_duration() {
        assert_eq!(format_duration(Duration::from_millis(7_900)), "00:07");
    }

    #[test]
    fn fixed_width_and_truncation_below_an_hour() {
        // 0.0 .. 3599.9 in tenth-of-a-second steps
        for tenths in 0..36_000u64 {
            let d = tenths as f64 / 10.0;
            let text = format_timecode(d);
            assert_eq!(text.len(), 5, "{} formatted as {}", d, text);

            let parsed = text.parse::<Timecode>().unwrap().as_secs() as f64;
            assert!(parsed <= d && d < parsed + 1.0, "{} -> {}", d, text);
        }
    }

    #[test]
    fn parse_valid() {
        let t: Timecode = "02:05".parse().unwrap();
        assert_eq!(t.as_secs(), 125);
        assert_eq!(t.minutes(), 2);
        assert_eq!(t.seconds(), 5);
    }

    #[test]
    fn parse_long_minutes() {
        let t: Timecode = "120:00".parse().unwrap();
        assert_eq!(t.as_secs(), 7200);
    }

    #[test]
    fn parse_invalid() {
        assert!("".parse::<Timecode>().is_err());
        assert!("5".parse::<Timecode>().is_err());
        assert!("1:05".parse::<Timecode>().is_err());
        assert!("01:5".parse::<Timecode>().is_err());
        assert!("01:60".parse::<Timecode>().is_err());
        assert!("ab:cd".parse::<Timecode>().is_err());
        assert!("-1:00".parse::<Timecode>().is_err());
    }
}
