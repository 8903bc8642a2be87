//! Keeps a session open so armed reminders can fire.
//!
//! Every second the store is checked for commits made by another process, so
//! a task added from another terminal is armed right away, including one due
//! in the current minute. On each minute boundary the list is rebuilt to
//! evict what expired meanwhile, and again whenever a reminder removes its
//! task.

use super::{close_session, open_session};
use crate::{
    libs::{messages::Message, scheduler::ReminderEvent, session::Session, task::Task, view::View},
    msg_error, msg_info, msg_warning,
};
use anyhow::Result;
use chrono::{Local, NaiveDateTime, Timelike};
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tokio::time::{interval, interval_at, Instant, MissedTickBehavior};

const POLL_INTERVAL: Duration = Duration::from_secs(1);
const REBUILD_INTERVAL: Duration = Duration::from_secs(60);

pub async fn cmd() -> Result<()> {
    let session = open_session()?;
    let mut events = session.scheduler().subscribe();

    let (shutdown_tx, mut shutdown_rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            msg_error!(Message::WatchCtrlCFailed(e.to_string()));
        }
        let _ = shutdown_tx.send(());
    });

    render(&session.rebuild_if_changed().await?.unwrap_or_default());
    msg_info!(Message::WatchStarted(session.scheduler().armed_count()));

    let mut poll = interval(POLL_INTERVAL);
    poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
    poll.tick().await;

    let first_boundary = Instant::now() + until_next_minute(Local::now().naive_local());
    let mut minutes = interval_at(first_boundary, REBUILD_INTERVAL);
    minutes.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = &mut shutdown_rx => {
                msg_info!(Message::WatchStopping);
                break;
            }
            _ = poll.tick() => {
                if let Ok(Some(tasks)) = session.rebuild_if_changed().await {
                    render(&tasks);
                }
            }
            _ = minutes.tick() => {
                rebuild(&session).await;
            }
            event = events.recv() => match event {
                Ok(ReminderEvent::CleanedUp(_)) => {
                    if let Ok(tasks) = session.build_list().await {
                        render(&tasks);
                    }
                }
                Ok(ReminderEvent::Fired(_)) | Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            },
        }
    }

    close_session(&session)
}

/// Failures are already in the activity log; watching goes on.
async fn rebuild(session: &Session) {
    let _ = session.build_list().await;
}

fn render(tasks: &[Task]) {
    if let Err(e) = View::tasks(tasks) {
        msg_warning!(Message::WatchRenderFailed(e.to_string()));
    }
}

/// Time left until the next whole minute. Never zero.
fn until_next_minute(now: NaiveDateTime) -> Duration {
    let elapsed_ms = u64::from(now.second()) * 1000 + u64::from(now.nanosecond() / 1_000_000);
    Duration::from_millis(60_000 - elapsed_ms.min(59_999))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn minute_ticks_land_on_the_boundary() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();

        let now = day.and_hms_milli_opt(10, 5, 10, 250).unwrap();
        assert_eq!(until_next_minute(now), Duration::from_millis(49_750));

        let on_boundary = day.and_hms_opt(10, 6, 0).unwrap();
        assert_eq!(until_next_minute(on_boundary), Duration::from_secs(60));
    }
}
