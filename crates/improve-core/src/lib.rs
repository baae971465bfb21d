pub mod error;
pub mod habit;
pub mod plan;
pub mod pomodoro;

pub use error::ImproveError;
pub use habit::{HabitEntry, HabitSnapshot};
pub use plan::{HabitChangePlan, HabitModification, NewHabit, PlanError, PlanReport};
pub use pomodoro::{Phase, PomodoroTimer, TimerError, TimerSettings};
