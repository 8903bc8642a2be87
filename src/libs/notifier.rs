//! Host notification and haptics emitters.
//!
//! The scheduler does not know how a reminder reaches the user; it hands a
//! [`Notification`] to a [`NotificationEmitter`] and a vibration pattern to a
//! [`HapticsEmitter`]. Hosts without either capability use the silent
//! implementations and nothing happens.

use crate::msg_print;
use tokio::sync::{mpsc, oneshot};

include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

pub const NOTIFICATION_BODY: &str = "It's time to start your task!";
pub const NOTIFICATION_ICON: &str = "images/bell.png";

/// On/off durations in milliseconds played when a reminder fires.
pub const VIBRATION_PATTERN: [u64; 17] = [50, 100, 50, 100, 50, 100, 400, 100, 300, 100, 350, 50, 200, 100, 100, 50, 600];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    /// The host cannot show notifications at all.
    Unsupported,
}

/// Resolves when the user dismisses a shown notification.
#[derive(Debug)]
pub struct Dismissal {
    rx: Option<oneshot::Receiver<()>>,
}

/// The emitter's half of a [`Dismissal`].
#[derive(Debug)]
pub struct Dismisser(oneshot::Sender<()>);

impl Dismisser {
    pub fn dismiss(self) {
        let _ = self.0.send(());
    }
}

impl Dismissal {
    pub fn channel() -> (Dismisser, Dismissal) {
        let (tx, rx) = oneshot::channel();
        (Dismisser(tx), Dismissal { rx: Some(rx) })
    }

    /// Already dismissed, for emitters that do not wait on the user.
    pub fn immediate() -> Dismissal {
        let (dismisser, dismissal) = Self::channel();
        dismisser.dismiss();
        dismissal
    }

    /// Never dismissed, for notifications that were not shown.
    pub fn never() -> Dismissal {
        Dismissal { rx: None }
    }

    /// `true` once dismissed; `false` if the notification was never shown or
    /// the emitter dropped its [`Dismisser`].
    pub async fn dismissed(self) -> bool {
        match self.rx {
            Some(rx) => rx.await.is_ok(),
            None => false,
        }
    }
}

pub trait NotificationEmitter: Send + Sync {
    fn request_permission(&self) -> Permission;

    fn notify(&self, notification: &Notification) -> Dismissal;
}

pub trait HapticsEmitter: Send + Sync {
    fn vibrate(&self, pattern: &[u64]);
}

/// Prints reminders to the terminal and rings its bell.
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier;

impl NotificationEmitter for ConsoleNotifier {
    fn request_permission(&self) -> Permission {
        Permission::Granted
    }

    fn notify(&self, notification: &Notification) -> Dismissal {
        msg_print!(format!("\x07🔔 [{}] {}: {}", APP_METADATA_TITLE, notification.title, notification.body), true);
        Dismissal::immediate()
    }
}

/// For hosts without notifications: every call is a no-op.
#[derive(Debug, Clone, Default)]
pub struct SilentNotifier;

impl NotificationEmitter for SilentNotifier {
    fn request_permission(&self) -> Permission {
        Permission::Unsupported
    }

    fn notify(&self, _notification: &Notification) -> Dismissal {
        Dismissal::never()
    }
}

/// Forwards every notification over a channel to an embedding host.
///
/// Each notification counts as dismissed as soon as it is delivered to the
/// channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NotificationEmitter for ChannelNotifier {
    fn request_permission(&self) -> Permission {
        if self.tx.is_closed() {
            Permission::Denied
        } else {
            Permission::Granted
        }
    }

    fn notify(&self, notification: &Notification) -> Dismissal {
        match self.tx.send(notification.clone()) {
            Ok(()) => Dismissal::immediate(),
            Err(_) => Dismissal::never(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NoHaptics;

impl HapticsEmitter for NoHaptics {
    fn vibrate(&self, _pattern: &[u64]) {}
}
