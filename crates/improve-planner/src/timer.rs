use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use improve_core::{Phase, PomodoroTimer};
use tracing::info;

#[derive(Debug, Clone, Subcommand)]
pub enum TimerAction {
    /// Show the current phase and time left
    Status,
    /// Start a focus session, or resume a paused phase
    Start(StartOptions),
    /// Pause the running phase
    Pause,
    /// Skip to the next phase
    Skip,
    /// Stop, clear all progress and restore default settings
    Reset,
}

#[derive(Debug, Clone, Default, Args)]
pub struct StartOptions {
    /// Roll into the next phase automatically
    #[arg(long, overrides_with = "no_auto_advance")]
    pub auto_advance: bool,
    /// Stop after each phase (the default)
    #[arg(long, overrides_with = "auto_advance")]
    pub no_auto_advance: bool,
    /// Focus length in minutes (applies from idle)
    #[arg(long)]
    pub focus_minutes: Option<u32>,
    /// Short break length in minutes (applies from idle)
    #[arg(long)]
    pub short_break_minutes: Option<u32>,
    /// Long break length in minutes (applies from idle)
    #[arg(long)]
    pub long_break_minutes: Option<u32>,
}

impl StartOptions {
    /// `Some` only when one of the auto-advance flags was given.
    pub fn auto_advance(&self) -> Option<bool> {
        if self.auto_advance {
            Some(true)
        } else if self.no_auto_advance {
            Some(false)
        } else {
            None
        }
    }
}

impl TimerAction {
    /// Apply the action to a restored timer. Persisting the result is up to
    /// the caller.
    pub fn apply(&self, timer: &mut PomodoroTimer, now: DateTime<Utc>) {
        match self {
            TimerAction::Status => {}
            TimerAction::Start(opts) => {
                if let Some(on) = opts.auto_advance() {
                    timer.settings.auto_advance = on;
                }
                if timer.phase == Phase::Idle {
                    if let Some(m) = opts.focus_minutes {
                        timer.settings.focus_minutes = m;
                    }
                    if let Some(m) = opts.short_break_minutes {
                        timer.settings.short_break_minutes = m;
                    }
                    if let Some(m) = opts.long_break_minutes {
                        timer.settings.long_break_minutes = m;
                    }
                }
                timer.start(now);
            }
            TimerAction::Pause => timer.pause(now),
            TimerAction::Skip => timer.skip(now),
            TimerAction::Reset => timer.reset(),
        }
        info!(
            phase = timer.phase.as_str(),
            running = timer.running,
            remaining_secs = timer.remaining_secs,
            "timer updated"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use clap::Parser;
    use improve_core::TimerSettings;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(subcommand)]
        action: TimerAction,
    }

    fn action(args: &[&str]) -> TimerAction {
        Harness::parse_from(std::iter::once("timer").chain(args.iter().copied())).action
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn auto_advance_flags_are_tri_state() {
        let opts = |args: &[&str]| match action(args) {
            TimerAction::Start(opts) => opts.auto_advance(),
            other => panic!("expected start, got {other:?}"),
        };
        assert_eq!(opts(&["start"]), None);
        assert_eq!(opts(&["start", "--auto-advance"]), Some(true));
        assert_eq!(opts(&["start", "--no-auto-advance"]), Some(false));
        assert_eq!(
            opts(&["start", "--auto-advance", "--no-auto-advance"]),
            Some(false)
        );
    }

    #[test]
    fn start_reset_start_drops_overrides() {
        let mut timer = PomodoroTimer::new(TimerSettings::default());
        action(&["start", "--auto-advance", "--focus-minutes", "50"]).apply(&mut timer, now());
        assert!(timer.settings.auto_advance);
        assert_eq!(timer.remaining_secs, 50 * 60);

        action(&["reset"]).apply(&mut timer, now());
        action(&["start"]).apply(&mut timer, now());
        assert_eq!(timer.settings, TimerSettings::default());
        assert_eq!(timer.phase, Phase::Focus);
        assert_eq!(timer.remaining_secs, 25 * 60);
    }

    #[test]
    fn no_auto_advance_turns_it_off_without_reset() {
        let mut timer = PomodoroTimer::new(TimerSettings::default());
        action(&["start", "--auto-advance"]).apply(&mut timer, now());
        action(&["pause"]).apply(&mut timer, now());
        action(&["start"]).apply(&mut timer, now());
        assert!(timer.settings.auto_advance);

        action(&["pause"]).apply(&mut timer, now());
        action(&["start", "--no-auto-advance"]).apply(&mut timer, now());
        assert!(!timer.settings.auto_advance);
        assert!(timer.running);
    }

    #[test]
    fn minute_overrides_ignored_mid_phase() {
        let mut timer = PomodoroTimer::new(TimerSettings::default());
        action(&["start"]).apply(&mut timer, now());
        action(&["pause"]).apply(&mut timer, now());
        action(&["start", "--focus-minutes", "90"]).apply(&mut timer, now());
        assert_eq!(timer.settings.focus_minutes, 25);
        assert_eq!(timer.remaining_secs, 25 * 60);
    }

    #[test]
    fn skip_and_status() {
        let mut timer = PomodoroTimer::new(TimerSettings::default());
        action(&["start"]).apply(&mut timer, now());
        action(&["skip"]).apply(&mut timer, now());
        assert_eq!(timer.phase, Phase::ShortBreak);
        let before = timer.clone();
        action(&["status"]).apply(&mut timer, now());
        assert_eq!(timer, before);
    }
}
