//! Best-effort daily reminder sweep.
//!
//! The sweep is safe to re-enter: each user is marked reminded for the day
//! before the send is attempted, so a crashed or overlapping run cannot
//! produce a second reminder on the same calendar day.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use tracing::{info, warn};

use crate::tracking::assessments::domain::UserId;
use crate::tracking::repository::RepositoryError;

/// A user due for a nudge, with the streak to mention in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderTarget {
    pub user_id: UserId,
    pub streak: u32,
}

/// Query surface over users with reminders enabled.
pub trait ReminderQueue: Send + Sync {
    /// Users whose reminder hour equals `hour`, who have not been reminded
    /// on `date`, and who have no check-in on `date`.
    fn due(&self, hour: u32, date: NaiveDate) -> Result<Vec<ReminderTarget>, RepositoryError>;

    fn mark_reminded(&self, user_id: &UserId, date: NaiveDate) -> Result<(), RepositoryError>;
}

/// Outbound notification hook (push channel, bot adapter).
pub trait ReminderNotifier: Send + Sync {
    fn send(&self, target: &ReminderTarget) -> Result<(), NotifyError>;
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Error raised by the sweep itself; failed sends are logged, not raised.
#[derive(Debug, thiserror::Error)]
pub enum ReminderError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub struct ReminderSweep<Q, N> {
    queue: Arc<Q>,
    notifier: Arc<N>,
}

impl<Q, N> ReminderSweep<Q, N>
where
    Q: ReminderQueue + 'static,
    N: ReminderNotifier + 'static,
{
    pub fn new(queue: Arc<Q>, notifier: Arc<N>) -> Self {
        Self { queue, notifier }
    }

    /// Run one pass for the given moment; returns how many sends succeeded.
    pub fn sweep(&self, now: NaiveDateTime) -> Result<usize, ReminderError> {
        let targets = self.queue.due(now.hour(), now.date())?;
        if targets.is_empty() {
            return Ok(0);
        }

        let mut sent = 0;
        for target in targets {
            // Mark first: a re-entered sweep must not double-send.
            self.queue.mark_reminded(&target.user_id, now.date())?;

            match self.notifier.send(&target) {
                Ok(()) => sent += 1,
                Err(error) => {
                    warn!(user = %target.user_id.0, %error, "reminder send failed");
                }
            }
        }

        info!(sent, "reminder sweep finished");
        Ok(sent)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use chrono::NaiveDate;

    use super::*;

    struct MemoryQueue {
        targets: Vec<ReminderTarget>,
        hour: u32,
        reminded: Mutex<HashSet<(UserId, NaiveDate)>>,
    }

    impl MemoryQueue {
        fn new(targets: Vec<ReminderTarget>, hour: u32) -> Self {
            Self {
                targets,
                hour,
                reminded: Mutex::new(HashSet::new()),
            }
        }
    }

    impl ReminderQueue for MemoryQueue {
        fn due(&self, hour: u32, date: NaiveDate) -> Result<Vec<ReminderTarget>, RepositoryError> {
            if hour != self.hour {
                return Ok(Vec::new());
            }
            let reminded = self.reminded.lock().expect("reminder mutex poisoned");
            Ok(self
                .targets
                .iter()
                .filter(|target| !reminded.contains(&(target.user_id.clone(), date)))
                .cloned()
                .collect())
        }

        fn mark_reminded(&self, user_id: &UserId, date: NaiveDate) -> Result<(), RepositoryError> {
            let mut reminded = self.reminded.lock().expect("reminder mutex poisoned");
            reminded.insert((user_id.clone(), date));
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingNotifier {
        sent: Mutex<Vec<UserId>>,
    }

    impl ReminderNotifier for CountingNotifier {
        fn send(&self, target: &ReminderTarget) -> Result<(), NotifyError> {
            self.sent
                .lock()
                .expect("notifier mutex poisoned")
                .push(target.user_id.clone());
            Ok(())
        }
    }

    fn at_hour(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 3)
            .expect("valid date")
            .and_hms_opt(hour, 2, 0)
            .expect("valid time")
    }

    fn target(name: &str) -> ReminderTarget {
        ReminderTarget {
            user_id: UserId(name.to_string()),
            streak: 4,
        }
    }

    #[test]
    fn sweep_sends_to_due_users() {
        let queue = Arc::new(MemoryQueue::new(vec![target("a"), target("b")], 20));
        let notifier = Arc::new(CountingNotifier::default());
        let sweep = ReminderSweep::new(queue, notifier.clone());

        let sent = sweep.sweep(at_hour(20)).expect("sweep runs");
        assert_eq!(sent, 2);
        assert_eq!(notifier.sent.lock().expect("lock").len(), 2);
    }

    #[test]
    fn sweep_outside_the_hour_sends_nothing() {
        let queue = Arc::new(MemoryQueue::new(vec![target("a")], 20));
        let notifier = Arc::new(CountingNotifier::default());
        let sweep = ReminderSweep::new(queue, notifier.clone());

        let sent = sweep.sweep(at_hour(9)).expect("sweep runs");
        assert_eq!(sent, 0);
        assert!(notifier.sent.lock().expect("lock").is_empty());
    }

    #[test]
    fn reentered_sweep_never_double_sends() {
        let queue = Arc::new(MemoryQueue::new(vec![target("a")], 20));
        let notifier = Arc::new(CountingNotifier::default());
        let sweep = ReminderSweep::new(queue.clone(), notifier.clone());

        sweep.sweep(at_hour(20)).expect("first pass");
        let second = sweep.sweep(at_hour(20)).expect("second pass");

        assert_eq!(second, 0);
        assert_eq!(notifier.sent.lock().expect("lock").len(), 1);
    }
}
