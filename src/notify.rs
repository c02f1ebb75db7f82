use std::time::{Duration, Instant};

pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

/// One user-facing message.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    shown_at: Instant,
}

/// Single-slot message surface.
///
/// At most one notice is live at a time: showing a new one replaces the old
/// immediately and restarts the expiry clock. Nothing is queued and no
/// history is kept.
pub struct Notifications {
    current: Option<Notice>,
    ttl: Duration,
}

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    pub fn show(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.current = Some(Notice {
            kind,
            text: text.into(),
            shown_at: Instant::now(),
        });
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.show(NoticeKind::Info, text);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.show(NoticeKind::Success, text);
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.show(NoticeKind::Warning, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.show(NoticeKind::Error, text);
    }

    /// The live notice, if it has not yet expired.
    pub fn current(&mut self) -> Option<&Notice> {
        if let Some(ref notice) = self.current {
            if notice.shown_at.elapsed() >= self.ttl {
                self.current = None;
            }
        }
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_TTL)
    }
}
