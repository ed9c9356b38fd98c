// PiezoWatch - Monitor States & Data Types

// ---------------------------------------------------------------------------
// Loop state
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Idle,
    Alarm,
}

impl MonitorState {
    /// Classify a reading against the threshold. The boundary value is idle.
    pub fn classify(value: u16, threshold: u16) -> Self {
        if value > threshold {
            Self::Alarm
        } else {
            Self::Idle
        }
    }
}

// ---------------------------------------------------------------------------
// Indicator outputs
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Led {
    One,
    Two,
}

// ---------------------------------------------------------------------------
// Excursion results
// ---------------------------------------------------------------------------

/// What happened to the alarm value once the excursion ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The endpoint accepted the report; carries the response body.
    Sent(String),
    /// Same value as the last successful report.
    Suppressed,
    /// Transport or HTTP failure; the value stays eligible for a retry.
    Failed(String),
}

/// One maximal run of readings above the threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excursion {
    /// First reading of the run; the value that gets reported.
    pub alarm_value: u16,
    /// Full blink cycles completed before the reading dropped.
    pub blink_cycles: u32,
    /// Reading that ended the run (or the last one seen if the cycle bound hit).
    pub exit_value: u16,
    pub report: ReportOutcome,
}

/// Result of one top-level loop iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Idle { value: u16 },
    Alarm(Excursion),
}

impl Step {
    pub fn state(&self) -> MonitorState {
        match self {
            Self::Idle { .. } => MonitorState::Idle,
            Self::Alarm(_) => MonitorState::Alarm,
        }
    }
}

/// Counters kept across the life of the loop (logging only).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub iterations: u64,
    pub excursions: u64,
    pub reports_sent: u64,
    pub reports_failed: u64,
}
