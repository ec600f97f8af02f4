//! Read/write diagnostics.
//!
//! Non-fatal anomalies encountered while reading a drawing (an unrecognized
//! entity tag, a skipped malformed record, a duplicate layer name) are
//! collected as [`Notification`] items on the [`Model`](crate::Model) rather
//! than being silently dropped or escalated to hard errors.
//!
//! In strict mode ([`ReadOptions::strict`](crate::model::ReadOptions)) the
//! same anomalies abort the read instead.

use std::fmt;

/// Category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// An entity/table-entry/section type tag was not recognized and was
    /// preserved as an Unknown variant.
    UnknownType,
    /// A malformed record was skipped during a lenient read.
    SkippedRecord,
    /// A table holds more than one entry with the same name.
    DuplicateName,
    /// Any other non-fatal irregularity.
    Warning,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownType => write!(f, "UnknownType"),
            Self::SkippedRecord => write!(f, "SkippedRecord"),
            Self::DuplicateName => write!(f, "DuplicateName"),
            Self::Warning => write!(f, "Warning"),
        }
    }
}

/// A single diagnostic produced during reading or writing.
#[derive(Debug, Clone)]
pub struct Notification {
    /// The category.
    pub kind: NotificationKind,
    /// A human-readable description of the issue.
    pub message: String,
}

impl Notification {
    /// Create a new notification.
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// Collects notifications during a read/write operation.
#[derive(Debug, Clone, Default)]
pub struct NotificationCollection {
    items: Vec<Notification>,
}

impl NotificationCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a notification.
    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.items.push(Notification::new(kind, message));
    }

    /// Absorb another collection's notifications, preserving order.
    pub fn merge(&mut self, other: NotificationCollection) {
        self.items.extend(other.items);
    }

    /// Check if there are any notifications.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of notifications.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate over all notifications.
    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.items.iter()
    }

    /// Check whether any notification of the given kind exists.
    pub fn has_kind(&self, kind: NotificationKind) -> bool {
        self.items.iter().any(|n| n.kind == kind)
    }

    /// All notifications of a specific kind.
    pub fn of_kind(&self, kind: NotificationKind) -> Vec<&Notification> {
        self.items.iter().filter(|n| n.kind == kind).collect()
    }
}

impl<'a> IntoIterator for &'a NotificationCollection {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
