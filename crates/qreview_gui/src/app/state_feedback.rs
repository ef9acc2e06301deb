//! Status line, toast queue, and blocking alerts.

use super::{Dialog, QReviewApp, StatusMessage, ToastMessage, STATUS_TTL, TOAST_LIMIT, TOAST_TTL};
use std::time::Instant;

impl QReviewApp {
    /// Show `text` in the status bar and as a toast. Repeating the newest toast
    /// extends it instead of stacking a duplicate.
    pub(super) fn set_status(&mut self, text: impl Into<String>) {
        let text = text.into();
        let now = Instant::now();
        self.status = Some(StatusMessage {
            text: text.clone(),
            expires_at: now + STATUS_TTL,
        });

        match self.toasts.back_mut() {
            Some(newest) if newest.text == text => newest.expires_at = now + TOAST_TTL,
            _ => {
                if self.toasts.len() == TOAST_LIMIT {
                    self.toasts.pop_front();
                }
                self.toasts.push_back(ToastMessage {
                    text,
                    expires_at: now + TOAST_TTL,
                });
            }
        }
    }

    /// Drop the status line and toasts whose time is up.
    pub(super) fn expire_feedback(&mut self, now: Instant) {
        if self.status.as_ref().is_some_and(|status| now >= status.expires_at) {
            self.status = None;
        }
        self.toasts.retain(|toast| toast.expires_at > now);
    }

    /// Open a blocking alert, replacing any alert already shown.
    pub(super) fn show_alert(&mut self, message: impl Into<String>) {
        self.dialog = Some(Dialog::Alert {
            message: message.into(),
        });
    }
}
