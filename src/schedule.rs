//! Coalescing rescan requests.
//!
//! Rebuilding the outline on every keystroke or file write is wasteful, so requests are
//! debounced: a change schedules a rebuild after the configured quiet period, and a newer change
//! replaces the pending one. A save is always honoured immediately.

use crate::error::{Error, Result};
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// How eagerly changes trigger a rebuild.
pub enum UpdateFrequency {
    /// Rebuild as soon as anything changes.
    High,
    /// Rebuild after half a second without changes.
    Medium,
    /// Rebuild after two seconds without changes.
    Low,
    /// Ignore changes; rebuild only on save.
    OnSaveOnly,
}

impl UpdateFrequency {
    /// Parses a label as written in settings, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFrequency`] for anything but High, Medium, Low and On Save Only.
    pub fn from_label(label: &str) -> Result<Self> {
        let normalized: String = label
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            "onsaveonly" => Ok(Self::OnSaveOnly),
            _ => Err(Error::UnknownFrequency(label.to_string())),
        }
    }

    #[must_use]
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::OnSaveOnly => "On Save Only",
        }
    }

    #[must_use]
    /// Quiet period before a change is acted on; `None` when changes are ignored.
    pub fn delay(self) -> Option<Duration> {
        match self {
            Self::High => Some(Duration::ZERO),
            Self::Medium => Some(Duration::from_millis(500)),
            Self::Low => Some(Duration::from_millis(2000)),
            Self::OnSaveOnly => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Why a rebuild is being requested.
pub enum Trigger {
    /// Content changed; subject to debouncing.
    Changed,
    /// Content was saved or a refresh was asked for explicitly.
    Saved,
}

#[derive(Clone, Debug)]
/// Holds at most one pending rebuild deadline.
pub struct RescanScheduler {
    frequency: UpdateFrequency,
    deadline: Option<Instant>,
}

impl RescanScheduler {
    #[must_use]
    /// Scheduler with nothing pending.
    pub fn new(frequency: UpdateFrequency) -> Self {
        Self {
            frequency,
            deadline: None,
        }
    }

    #[must_use]
    /// Frequency this scheduler debounces with.
    pub fn frequency(&self) -> UpdateFrequency {
        self.frequency
    }

    /// Records a request, replacing any pending one.
    pub fn request(&mut self, trigger: Trigger, now: Instant) {
        match (trigger, self.frequency.delay()) {
            (Trigger::Saved, _) => self.deadline = Some(now),
            (Trigger::Changed, Some(delay)) => self.deadline = Some(now + delay),
            (Trigger::Changed, None) => {}
        }
    }

    /// Records that a watched file was written on disk.
    ///
    /// A new modification time is a save as far as the files are concerned, so under
    /// [`UpdateFrequency::OnSaveOnly`] it is due at once; otherwise it is debounced as a change.
    pub fn file_changed(&mut self, now: Instant) {
        let trigger = match self.frequency {
            UpdateFrequency::OnSaveOnly => Trigger::Saved,
            _ => Trigger::Changed,
        };
        self.request(trigger, now);
    }

    #[must_use]
    /// Whether a rebuild is waiting.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consumes the pending request if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    /// Time left until the pending request is due, `None` if nothing is pending.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
#[path = "tests/schedule.rs"]
mod tests;
