use derive_more::Display;

/// How long the rendering layer should keep a notice on screen.
pub const AUTO_DISMISS_MS: u64 = 3_000;

///
/// NoticeKind
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
}

///
/// Notice
///
/// Transient user-facing message emitted when an operation completes. The
/// engine only produces these; display and dismissal belong to the
/// rendering layer.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub dismiss_after_ms: u64,
}

impl Notice {
    #[must_use]
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            dismiss_after_ms: AUTO_DISMISS_MS,
        }
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, message)
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, message)
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Warning, message)
    }
}
