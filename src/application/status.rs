use crate::domain::{Severity, StatusMessage};

/// Identifies one posted message so a late expiry cannot clear a newer one.
pub type Ticket = u64;

/// Holds at most one status message. Posting replaces the current message immediately.
#[derive(Debug, Default)]
pub struct StatusReporter {
    current: Option<StatusMessage>,
    ticket: Ticket,
}

impl StatusReporter {
    pub fn post(&mut self, text: impl Into<String>, severity: Severity) -> Ticket {
        self.ticket += 1;
        self.current = Some(StatusMessage::new(text, severity));
        self.ticket
    }

    pub fn clear(&mut self) {
        self.ticket += 1;
        self.current = None;
    }

    /// Clears the message if `ticket` still belongs to it. Returns whether it did.
    pub fn expire(&mut self, ticket: Ticket) -> bool {
        if ticket != self.ticket || self.current.is_none() {
            return false;
        }
        self.current = None;
        true
    }

    pub fn current(&self) -> Option<&StatusMessage> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_replaces_message() {
        let mut status = StatusReporter::default();
        status.post("first", Severity::Info);
        status.post("second", Severity::Error);

        let current = status.current().unwrap();
        assert_eq!(current.text, "second");
        assert_eq!(current.severity, Severity::Error);
    }

    #[test]
    fn test_expire_clears_current_message() {
        let mut status = StatusReporter::default();
        let ticket = status.post("done", Severity::Success);

        assert!(status.expire(ticket));
        assert!(status.current().is_none());
        assert!(!status.expire(ticket));
    }

    #[test]
    fn test_stale_expiry_keeps_newer_message() {
        let mut status = StatusReporter::default();
        let stale = status.post("old", Severity::Info);
        let fresh = status.post("new", Severity::Warning);

        assert!(!status.expire(stale));
        assert_eq!(status.current().unwrap().text, "new");
        assert!(status.expire(fresh));
    }

    #[test]
    fn test_clear_invalidates_pending_expiry() {
        let mut status = StatusReporter::default();
        let ticket = status.post("old", Severity::Info);
        status.clear();
        assert!(status.current().is_none());

        assert!(!status.expire(ticket));
    }
}
