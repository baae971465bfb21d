use std::fmt;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Focus,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Focus => "focus",
            Phase::ShortBreak => "short_break",
            Phase::LongBreak => "long_break",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::Idle => "Idle",
            Phase::Focus => "Focus",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }

}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Error)]
pub enum TimerError {
    #[error("timer state io: {0}")]
    Io(#[from] std::io::Error),

    #[error("timer state is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    pub focus_minutes: u32,
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
    pub sessions_before_long_break: u32,
    /// Start the next phase automatically when one completes.
    pub auto_advance: bool,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            focus_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            sessions_before_long_break: 4,
            auto_advance: false,
        }
    }
}

/// Countdown over focus and break phases.
///
/// All transitions take an explicit `now` so callers (and tests) control the
/// clock. Wall time is applied lazily by `tick`, which is also how a restored
/// timer catches up with time spent while nothing was running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroTimer {
    pub settings: TimerSettings,
    pub phase: Phase,
    pub remaining_secs: u64,
    pub running: bool,
    pub completed_sessions: u32,
    pub last_tick_at: Option<DateTime<Utc>>,
}

impl PomodoroTimer {
    pub fn new(settings: TimerSettings) -> Self {
        Self {
            settings,
            phase: Phase::Idle,
            remaining_secs: 0,
            running: false,
            completed_sessions: 0,
            last_tick_at: None,
        }
    }

    /// Length of a phase in seconds. Non-idle phases last at least a minute.
    pub fn phase_secs(&self, phase: Phase) -> u64 {
        let minutes = match phase {
            Phase::Idle => return 0,
            Phase::Focus => self.settings.focus_minutes,
            Phase::ShortBreak => self.settings.short_break_minutes,
            Phase::LongBreak => self.settings.long_break_minutes,
        };
        u64::from(minutes.max(1)) * 60
    }

    /// Start a focus session from idle, or resume a paused phase.
    pub fn start(&mut self, now: DateTime<Utc>) {
        if self.running {
            return;
        }
        if self.phase == Phase::Idle {
            self.enter(Phase::Focus);
        }
        self.running = true;
        self.last_tick_at = Some(now);
    }

    pub fn pause(&mut self, now: DateTime<Utc>) {
        if !self.running {
            return;
        }
        self.tick(now);
        self.running = false;
        self.last_tick_at = None;
    }

    /// Back to a fresh idle timer. Settings return to their defaults too, so
    /// overrides given to an earlier `start` do not outlive a reset.
    pub fn reset(&mut self) {
        *self = Self::new(TimerSettings::default());
    }

    /// Abandon the current phase and move to the next one.
    /// A skipped focus session does not count as completed.
    pub fn skip(&mut self, now: DateTime<Utc>) {
        let next = match self.phase {
            Phase::Idle => return,
            Phase::Focus => self.break_after(self.completed_sessions.saturating_add(1)),
            Phase::ShortBreak | Phase::LongBreak => Phase::Focus,
        };
        self.enter(next);
        if self.running {
            self.last_tick_at = Some(now);
        }
    }

    /// Apply wall time elapsed since the last tick. Returns the phases that
    /// completed, oldest first.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Vec<Phase> {
        let mut completed = Vec::new();
        if !self.running {
            return completed;
        }
        if self.phase == Phase::Idle {
            // idle has no countdown; a running idle timer is stale state
            self.running = false;
            self.last_tick_at = None;
            return completed;
        }
        let last = self.last_tick_at.unwrap_or(now);
        let mut elapsed = u64::try_from((now - last).num_seconds()).unwrap_or(0);
        let mut consumed: u64 = 0;

        while elapsed >= self.remaining_secs {
            elapsed -= self.remaining_secs;
            consumed += self.remaining_secs;
            completed.push(self.phase);
            self.complete_phase();
            if !self.settings.auto_advance {
                self.running = false;
                self.last_tick_at = None;
                return completed;
            }
        }

        self.remaining_secs -= elapsed;
        consumed += elapsed;
        let consumed = i64::try_from(consumed).unwrap_or(i64::MAX);
        self.last_tick_at = Some(last + Duration::seconds(consumed));
        completed
    }

    pub fn save(&self, path: &Path) -> Result<(), TimerError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Read a saved timer, normalizing state a live timer can never reach.
    pub fn load(path: &Path) -> Result<Self, TimerError> {
        let raw = std::fs::read_to_string(path)?;
        let mut timer: Self = serde_json::from_str(&raw)?;
        timer.normalize();
        Ok(timer)
    }

    /// Load persisted state, or start fresh when no state file exists yet,
    /// then catch up with elapsed wall time.
    pub fn restore(
        path: &Path,
        settings: TimerSettings,
        now: DateTime<Utc>,
    ) -> Result<Self, TimerError> {
        let mut timer = match Self::load(path) {
            Ok(t) => t,
            Err(TimerError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Self::new(settings)
            }
            Err(e) => return Err(e),
        };
        timer.tick(now);
        Ok(timer)
    }

    /// Idle never runs and has nothing left; other phases keep between one
    /// second and their full length.
    fn normalize(&mut self) {
        if self.phase == Phase::Idle {
            self.running = false;
            self.remaining_secs = 0;
        } else {
            self.remaining_secs = self.remaining_secs.clamp(1, self.phase_secs(self.phase));
        }
        if !self.running {
            self.last_tick_at = None;
        }
    }

    fn enter(&mut self, phase: Phase) {
        self.phase = phase;
        self.remaining_secs = self.phase_secs(phase);
    }

    fn complete_phase(&mut self) {
        let next = match self.phase {
            Phase::Idle => Phase::Idle,
            Phase::Focus => {
                self.completed_sessions = self.completed_sessions.saturating_add(1);
                self.break_after(self.completed_sessions)
            }
            Phase::ShortBreak | Phase::LongBreak => Phase::Focus,
        };
        self.enter(next);
    }

    fn break_after(&self, session: u32) -> Phase {
        let every = self.settings.sessions_before_long_break.max(1);
        if session % every == 0 {
            Phase::LongBreak
        } else {
            Phase::ShortBreak
        }
    }
}

impl fmt::Display for PomodoroTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.running { "running" } else { "paused" };
        if self.phase == Phase::Idle {
            return write!(f, "Idle ({} sessions completed)", self.completed_sessions);
        }
        write!(
            f,
            "{} {:02}:{:02} {state} ({} sessions completed)",
            self.phase,
            self.remaining_secs / 60,
            self.remaining_secs % 60,
            self.completed_sessions
        )
    }
}
