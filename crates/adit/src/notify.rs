//! Module: notify
//! Responsibility: the notification-preferences model — toggles, frequency,
//! quiet hours, recipients.
//! Does not own: delivery, scheduling, or persistence of saved settings.
//! Boundary: one immutable settings value plus pure update-by-action
//! functions, so the whole toggle surface is testable as data.

use adit_core::types::TimeOfDay;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Category
///
/// The event classes the back office can be notified about.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Category {
    DeadlineDue,
    InquiryReceived,
    RequestReceived,
    WeeklySummary,
}

impl Category {
    pub const ALL: [Self; 4] = [
        Self::DeadlineDue,
        Self::InquiryReceived,
        Self::RequestReceived,
        Self::WeeklySummary,
    ];

    const fn index(self) -> usize {
        match self {
            Self::DeadlineDue => 0,
            Self::InquiryReceived => 1,
            Self::RequestReceived => 2,
            Self::WeeklySummary => 3,
        }
    }
}

///
/// Frequency
///
/// Mutually exclusive delivery cadence; setting one replaces the previous.
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq, Serialize, Deserialize)]
pub enum Frequency {
    #[default]
    Instant,
    Hourly,
    Daily,
}

///
/// QuietHours
///
/// Half-open `[start, end)` time-of-day window during which delivery is
/// suppressed. A window whose end precedes its start wraps past midnight;
/// `start == end` suppresses nothing.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct QuietHours {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl QuietHours {
    #[must_use]
    pub const fn contains(self, at: TimeOfDay) -> bool {
        let at = at.minutes();
        let start = self.start.minutes();
        let end = self.end.minutes();

        if start <= end {
            start <= at && at < end
        } else {
            at >= start || at < end
        }
    }
}

///
/// Recipient
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    pub name: String,
    pub email: String,
    pub enabled: bool,
}

///
/// PrefsAction
///
/// Every way the settings value can change. Applying an action either
/// produces the next settings value or reports why it was a no-op.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PrefsAction {
    AddRecipient { name: String, email: String },
    RemoveRecipient { index: usize },
    SetCategory { category: Category, enabled: bool },
    SetFrequency(Frequency),
    SetMaster(bool),
    SetQuietHours(Option<QuietHours>),
    SetRecipientEnabled { index: usize, enabled: bool },
}

///
/// PrefsIssue
///
/// Why an action was a no-op. These are user-input problems, not failures;
/// the previous settings value is returned unchanged alongside them.
///

#[remain::sorted]
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PrefsIssue {
    #[error("'{email}' is already on the recipient list")]
    DuplicateEmail { email: String },

    #[error("'{email}' is not a valid email address")]
    InvalidEmail { email: String },

    #[error("recipient name must not be blank")]
    MissingName,

    #[error("no recipient at position {index}")]
    NoSuchRecipient { index: usize },
}

///
/// NotificationSettings
///
/// The master toggle gates whether category toggles have any effect; turning
/// it off preserves their state, it never resets them.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettings {
    master: bool,
    categories: [bool; Category::ALL.len()],
    frequency: Frequency,
    quiet_hours: Option<QuietHours>,
    recipients: Vec<Recipient>,
}

impl NotificationSettings {
    #[must_use]
    pub const fn master(&self) -> bool {
        self.master
    }

    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    #[must_use]
    pub const fn quiet_hours(&self) -> Option<QuietHours> {
        self.quiet_hours
    }

    #[must_use]
    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    /// The stored toggle state, independent of the master switch.
    #[must_use]
    pub const fn category_enabled(&self, category: Category) -> bool {
        self.categories[category.index()]
    }

    /// Whether an event of `category` would be delivered at `at`.
    ///
    /// Pass `None` to ignore quiet hours (cadence digests check at their own
    /// send time).
    #[must_use]
    pub fn delivers(&self, category: Category, at: Option<TimeOfDay>) -> bool {
        if !self.master || !self.category_enabled(category) {
            return false;
        }

        match (self.quiet_hours, at) {
            (Some(window), Some(at)) => !window.contains(at),
            _ => true,
        }
    }

    /// Apply one action, returning the next settings value and the issue
    /// that made it a no-op, if any.
    #[must_use]
    pub fn apply(mut self, action: PrefsAction) -> (Self, Option<PrefsIssue>) {
        let issue = match action {
            PrefsAction::SetMaster(enabled) => {
                self.master = enabled;
                None
            }
            PrefsAction::SetCategory { category, enabled } => {
                self.categories[category.index()] = enabled;
                None
            }
            PrefsAction::SetFrequency(frequency) => {
                self.frequency = frequency;
                None
            }
            PrefsAction::SetQuietHours(window) => {
                self.quiet_hours = window;
                None
            }
            PrefsAction::AddRecipient { name, email } => self.add_recipient(name, email),
            PrefsAction::RemoveRecipient { index } => {
                if index < self.recipients.len() {
                    self.recipients.remove(index);
                    None
                } else {
                    Some(PrefsIssue::NoSuchRecipient { index })
                }
            }
            PrefsAction::SetRecipientEnabled { index, enabled } => {
                match self.recipients.get_mut(index) {
                    Some(recipient) => {
                        recipient.enabled = enabled;
                        None
                    }
                    None => Some(PrefsIssue::NoSuchRecipient { index }),
                }
            }
        };

        (self, issue)
    }

    fn add_recipient(&mut self, name: String, email: String) -> Option<PrefsIssue> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Some(PrefsIssue::MissingName);
        }

        let email = email.trim().to_string();
        if !email.contains('@') {
            return Some(PrefsIssue::InvalidEmail { email });
        }

        // Emails are unique on the list, case-insensitively.
        if self
            .recipients
            .iter()
            .any(|r| r.email.eq_ignore_ascii_case(&email))
        {
            return Some(PrefsIssue::DuplicateEmail { email });
        }

        self.recipients.push(Recipient {
            name,
            email,
            enabled: true,
        });

        None
    }
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            master: true,
            categories: [true; Category::ALL.len()],
            frequency: Frequency::default(),
            quiet_hours: None,
            recipients: Vec::new(),
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet(start: (u8, u8), end: (u8, u8)) -> QuietHours {
        QuietHours {
            start: TimeOfDay::from_hm(start.0, start.1).unwrap(),
            end: TimeOfDay::from_hm(end.0, end.1).unwrap(),
        }
    }

    fn at(hour: u8, minute: u8) -> TimeOfDay {
        TimeOfDay::from_hm(hour, minute).unwrap()
    }

    #[test]
    fn master_off_gates_without_resetting_toggles() {
        let settings = NotificationSettings::default();
        let (settings, _) = settings.apply(PrefsAction::SetCategory {
            category: Category::WeeklySummary,
            enabled: false,
        });
        let (settings, _) = settings.apply(PrefsAction::SetMaster(false));

        assert!(!settings.delivers(Category::InquiryReceived, None));
        // Per-category state is preserved, just inert.
        assert!(settings.category_enabled(Category::InquiryReceived));
        assert!(!settings.category_enabled(Category::WeeklySummary));

        let (settings, _) = settings.apply(PrefsAction::SetMaster(true));
        assert!(settings.delivers(Category::InquiryReceived, None));
        assert!(!settings.delivers(Category::WeeklySummary, None));
    }

    #[test]
    fn frequency_is_single_select() {
        let settings = NotificationSettings::default();
        let (settings, _) = settings.apply(PrefsAction::SetFrequency(Frequency::Daily));
        assert_eq!(settings.frequency(), Frequency::Daily);

        let (settings, _) = settings.apply(PrefsAction::SetFrequency(Frequency::Hourly));
        assert_eq!(settings.frequency(), Frequency::Hourly);
    }

    #[test]
    fn quiet_hours_suppress_inside_the_window() {
        let settings = NotificationSettings::default();
        let (settings, _) =
            settings.apply(PrefsAction::SetQuietHours(Some(quiet((22, 0), (6, 0)))));

        // Wrapping window: late evening and early morning are quiet.
        assert!(!settings.delivers(Category::InquiryReceived, Some(at(23, 30))));
        assert!(!settings.delivers(Category::InquiryReceived, Some(at(5, 59))));
        assert!(settings.delivers(Category::InquiryReceived, Some(at(6, 0))));
        assert!(settings.delivers(Category::InquiryReceived, Some(at(12, 0))));
    }

    #[test]
    fn quiet_hours_window_is_half_open() {
        let window = quiet((9, 0), (17, 0));

        assert!(window.contains(at(9, 0)));
        assert!(window.contains(at(16, 59)));
        assert!(!window.contains(at(17, 0)));
    }

    #[test]
    fn empty_quiet_window_suppresses_nothing() {
        let window = quiet((9, 0), (9, 0));

        assert!(!window.contains(at(9, 0)));
        assert!(!window.contains(at(21, 0)));
    }

    #[test]
    fn add_recipient_rejects_blank_name() {
        let settings = NotificationSettings::default();
        let (settings, issue) = settings.apply(PrefsAction::AddRecipient {
            name: "  ".to_string(),
            email: "a@b.com".to_string(),
        });

        assert_eq!(issue, Some(PrefsIssue::MissingName));
        assert!(settings.recipients().is_empty());
    }

    #[test]
    fn add_recipient_rejects_email_without_at() {
        let settings = NotificationSettings::default();
        let (settings, issue) = settings.apply(PrefsAction::AddRecipient {
            name: "Jane".to_string(),
            email: "jane.example.com".to_string(),
        });

        assert!(matches!(issue, Some(PrefsIssue::InvalidEmail { .. })));
        assert!(settings.recipients().is_empty());
    }

    #[test]
    fn add_recipient_appends_enabled_entry() {
        let settings = NotificationSettings::default();
        let (settings, issue) = settings.apply(PrefsAction::AddRecipient {
            name: "Jane".to_string(),
            email: "jane@x.com".to_string(),
        });

        assert_eq!(issue, None);
        assert_eq!(settings.recipients().len(), 1);

        let added = &settings.recipients()[0];
        assert_eq!(added.name, "Jane");
        assert_eq!(added.email, "jane@x.com");
        assert!(added.enabled);
    }

    #[test]
    fn add_recipient_rejects_duplicate_email_case_insensitively() {
        let settings = NotificationSettings::default();
        let (settings, _) = settings.apply(PrefsAction::AddRecipient {
            name: "Jane".to_string(),
            email: "jane@x.com".to_string(),
        });
        let (settings, issue) = settings.apply(PrefsAction::AddRecipient {
            name: "Janet".to_string(),
            email: "JANE@X.COM".to_string(),
        });

        assert!(matches!(issue, Some(PrefsIssue::DuplicateEmail { .. })));
        assert_eq!(settings.recipients().len(), 1);
    }

    #[test]
    fn remove_recipient_preserves_order_of_the_rest() {
        let mut settings = NotificationSettings::default();
        for email in ["a@x.com", "b@x.com", "c@x.com"] {
            let (next, issue) = settings.apply(PrefsAction::AddRecipient {
                name: email.to_string(),
                email: email.to_string(),
            });
            assert_eq!(issue, None);
            settings = next;
        }

        let (settings, issue) = settings.apply(PrefsAction::RemoveRecipient { index: 1 });
        assert_eq!(issue, None);

        let emails: Vec<&str> = settings
            .recipients()
            .iter()
            .map(|r| r.email.as_str())
            .collect();
        assert_eq!(emails, vec!["a@x.com", "c@x.com"]);
    }

    #[test]
    fn remove_out_of_range_is_a_no_op() {
        let settings = NotificationSettings::default();
        let (settings, issue) = settings.apply(PrefsAction::RemoveRecipient { index: 3 });

        assert_eq!(issue, Some(PrefsIssue::NoSuchRecipient { index: 3 }));
        assert!(settings.recipients().is_empty());
    }

    #[test]
    fn recipient_toggle_flips_only_that_entry() {
        let settings = NotificationSettings::default();
        let (settings, _) = settings.apply(PrefsAction::AddRecipient {
            name: "Jane".to_string(),
            email: "jane@x.com".to_string(),
        });
        let (settings, issue) = settings.apply(PrefsAction::SetRecipientEnabled {
            index: 0,
            enabled: false,
        });

        assert_eq!(issue, None);
        assert!(!settings.recipients()[0].enabled);
    }

    #[test]
    fn settings_serde_roundtrip() {
        let settings = NotificationSettings::default();
        let (settings, _) =
            settings.apply(PrefsAction::SetQuietHours(Some(quiet((22, 0), (6, 0)))));
        let (settings, _) = settings.apply(PrefsAction::AddRecipient {
            name: "Jane".to_string(),
            email: "jane@x.com".to_string(),
        });

        let json = serde_json::to_string(&settings).unwrap();
        let back: NotificationSettings = serde_json::from_str(&json).unwrap();

        assert_eq!(back, settings);
    }
}
