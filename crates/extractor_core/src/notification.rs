use std::time::Duration;

/// How long a notification stays on screen.
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(5000);

pub type NotificationId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub text: String,
    pub kind: NotificationKind,
}

/// Holds the single live notification.
///
/// Every `show` hands out a fresh id; an expiry only clears the display when
/// it carries the id of the message currently shown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationCenter {
    current: Option<Notification>,
    next_id: NotificationId,
}

impl NotificationCenter {
    pub fn show(&mut self, text: impl Into<String>, kind: NotificationKind) -> NotificationId {
        self.next_id += 1;
        let id = self.next_id;
        self.current = Some(Notification {
            id,
            text: text.into(),
            kind,
        });
        id
    }

    pub fn expire(&mut self, id: NotificationId) -> bool {
        match &self.current {
            Some(current) if current.id == id => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}
