use serde::Serialize;
use ts_rs::TS;

/// Elapsed and total playback time as shown next to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct ClockDisplay {
    pub elapsed: String,
    pub duration: Option<String>,
}

impl ClockDisplay {
    /// `duration` stays hidden until the player reports a usable value.
    pub fn new(elapsed_secs: f64, duration_secs: Option<f64>) -> Self {
        Self {
            elapsed: format_clock(elapsed_secs),
            duration: duration_secs
                .filter(|d| d.is_finite() && *d > 0.0)
                .map(format_clock),
        }
    }
}

impl std::fmt::Display for ClockDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.duration {
            Some(duration) => write!(f, "{} / {}", self.elapsed, duration),
            None => f.write_str(&self.elapsed),
        }
    }
}

/// `m:ss`, minutes unbounded, fractional seconds truncated.
pub fn format_clock(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let whole = seconds.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}
