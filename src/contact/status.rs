//! Contact form request lifecycle, as shown by the notification banner
//!
//! The banner itself runs in the browser; the copy and timing live here and
//! are embedded into the contact page at build time.

use serde::Serialize;
use std::time::Duration;

/// Success and error banners disappear after this long
pub const NOTIFICATION_DISMISS_AFTER: Duration = Duration::from_secs(3);

/// Fallback text when the server gives no message
pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    None,
    Pending,
    Success,
    Error,
}

/// What the banner displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub status: RequestStatus,
    pub title: String,
    pub message: String,
}

impl RequestStatus {
    /// Banner for this status; `error` is the server's message, if any
    pub fn notification(self, error: Option<&str>) -> Option<Notification> {
        let (title, message) = match self {
            RequestStatus::None => return None,
            RequestStatus::Pending => ("Sending message...", "Your message is on its way!"),
            RequestStatus::Success => ("Success!", "Message sent successfully!"),
            RequestStatus::Error => (
                "Error!",
                error
                    .filter(|e| !e.is_empty())
                    .unwrap_or(DEFAULT_ERROR_MESSAGE),
            ),
        };

        Some(Notification {
            status: self,
            title: title.to_string(),
            message: message.to_string(),
        })
    }

    /// Settled statuses clear themselves; pending stays until replaced
    pub fn auto_dismiss(self) -> Option<Duration> {
        match self {
            RequestStatus::Success | RequestStatus::Error => Some(NOTIFICATION_DISMISS_AFTER),
            RequestStatus::None | RequestStatus::Pending => None,
        }
    }
}

/// Banner copy and timing handed to the contact page script
#[derive(Debug, Clone, Serialize)]
pub struct NotificationCopy {
    pub pending: Notification,
    pub success: Notification,
    pub error: Notification,
    pub dismiss_after_ms: u64,
}

impl NotificationCopy {
    pub fn new() -> Self {
        let dismiss_after_ms = RequestStatus::Success
            .auto_dismiss()
            .unwrap_or(NOTIFICATION_DISMISS_AFTER)
            .as_millis() as u64;

        Self {
            pending: settled(RequestStatus::Pending),
            success: settled(RequestStatus::Success),
            error: settled(RequestStatus::Error),
            dismiss_after_ms,
        }
    }
}

impl Default for NotificationCopy {
    fn default() -> Self {
        Self::new()
    }
}

fn settled(status: RequestStatus) -> Notification {
    status.notification(None).unwrap_or(Notification {
        status,
        title: String::new(),
        message: String::new(),
    })
}
