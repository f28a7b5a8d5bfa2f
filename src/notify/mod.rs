//! Best-effort notification delivery.

/// When a notification should fire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schedule {
    Now,
    /// Recurring reminder every N days; `EveryDays(0)` disables it.
    EveryDays(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
    pub schedule: Schedule,
}

impl NotificationRequest {
    pub fn now(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            schedule: Schedule::Now,
        }
    }

    /// The recurring "did you log today's expenses?" reminder.
    pub fn spending_reminder(every_days: u32) -> Self {
        Self {
            title: "Did you spend today?".into(),
            body: "Don't forget to log your daily expenses.".into(),
            schedule: Schedule::EveryDays(every_days),
        }
    }
}

/// Delivery is fire-and-forget; implementations must not fail the caller.
pub trait Notifier {
    fn deliver(&self, request: &NotificationRequest);
}

/// Emits notifications to the tracing log.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn deliver(&self, request: &NotificationRequest) {
        match request.schedule {
            Schedule::Now => {
                tracing::warn!(title = %request.title, "{}", request.body);
            }
            Schedule::EveryDays(0) => {
                tracing::info!(title = %request.title, "reminder disabled");
            }
            Schedule::EveryDays(days) => {
                tracing::info!(
                    title = %request.title,
                    every_days = days,
                    "{}",
                    request.body
                );
            }
        }
    }
}
