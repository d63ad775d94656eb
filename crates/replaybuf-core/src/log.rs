//! The ordered action log and the queries answered from it.
//!
//! Queries are plain scans over the entries. The log is the only record
//! of what a response did; nothing is cached beside it.

use std::slice;

use crate::action::{Action, ActionKind};
use crate::error::ReplayResult;
use crate::replay;
use crate::sink::ResponseSink;

/// Append-only, insertion-ordered sequence of [`Action`]s.
///
/// Entries are never removed, reordered or deduplicated. The only
/// in-place change is extending the body accumulator at the end of the
/// log, which [`ResponseBuffer`](crate::ResponseBuffer) does through
/// [`last_mut`](ActionLog::last_mut).
///
/// A log collected from an iterator of actions is taken as given: it skips
/// the buffer's body-mode guard and write coalescing, and replays entry by
/// entry exactly as supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionLog {
    actions: Vec<Action>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            actions: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut Action> {
        self.actions.last_mut()
    }

    pub(crate) fn clear(&mut self) {
        self.actions.clear();
    }

    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }

    pub fn iter(&self) -> slice::Iter<'_, Action> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Replay every entry onto `sink`. See [`replay()`](crate::replay()).
    pub fn replay<S>(&self, sink: &mut S) -> ReplayResult<(), S::Error>
    where
        S: ResponseSink + ?Sized,
    {
        replay::replay(&self.actions, sink)
    }

    // ── Derived queries ─────────────────────────────────────────────

    /// Returns `true` if any entry is a `SendRedirect`.
    pub fn is_redirect(&self) -> bool {
        self.actions
            .iter()
            .any(|a| matches!(a, Action::SendRedirect(_)))
    }

    /// Target of the last recorded redirect, if any.
    pub fn redirect_location(&self) -> Option<&str> {
        self.actions.iter().rev().find_map(|a| match a {
            Action::SendRedirect(url) => Some(url.as_str()),
            _ => None,
        })
    }

    /// Returns `true` if any entry is a `SendError`.
    pub fn has_error(&self) -> bool {
        self.contains(ActionKind::SendError)
    }

    pub fn contains(&self, kind: ActionKind) -> bool {
        self.actions.iter().any(|a| a.kind() == kind)
    }

    pub fn count(&self, kind: ActionKind) -> usize {
        self.actions.iter().filter(|a| a.kind() == kind).count()
    }

    /// Entry tags in log order.
    pub fn kinds(&self) -> impl Iterator<Item = ActionKind> + '_ {
        self.actions.iter().map(Action::kind)
    }
}

impl<'a> IntoIterator for &'a ActionLog {
    type Item = &'a Action;
    type IntoIter = slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}

/// Builds a log verbatim. Adjacent writes stay separate entries and text
/// and byte writes may be mixed; use [`ResponseBuffer`](crate::ResponseBuffer)
/// to get those checks.
impl FromIterator<Action> for ActionLog {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self {
            actions: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookie::Cookie;
    use crate::header::Header;
    use crate::recording::{RecordingSink, SinkCall};

    #[test]
    fn empty_log_is_not_a_redirect() {
        let log = ActionLog::new();
        assert!(log.is_empty());
        assert!(!log.is_redirect());
        assert_eq!(log.redirect_location(), None);
    }

    #[test]
    fn header_and_cookie_log_is_not_a_redirect() {
        let log: ActionLog = vec![
            Action::SetHeader(Header::new("X-A", "1")),
            Action::AddCookie(Cookie::new("a", "b")),
            Action::ClearCookie(Cookie::new("c", "")),
        ]
        .into_iter()
        .collect();

        assert!(!log.is_redirect());
        assert!(!log.has_error());
    }

    #[test]
    fn redirect_found_at_any_position() {
        for position in 0..3 {
            let mut actions = vec![Action::SetStatus(200), Action::Flush];
            actions.insert(position, Action::SendRedirect("/login".into()));
            let log: ActionLog = actions.into_iter().collect();
            assert!(log.is_redirect(), "redirect at {position} not found");
        }
    }

    #[test]
    fn redirect_location_is_last_redirect() {
        let log: ActionLog = vec![
            Action::SendRedirect("/first".into()),
            Action::SetStatus(302),
            Action::SendRedirect("/second".into()),
        ]
        .into_iter()
        .collect();

        assert_eq!(log.redirect_location(), Some("/second"));
    }

    #[test]
    fn count_and_kinds_follow_log_order() {
        let log: ActionLog = vec![
            Action::SetHeader(Header::new("X-A", "1")),
            Action::SetHeader(Header::new("X-A", "2")),
            Action::SendError {
                status: 503,
                message: "down".into(),
            },
        ]
        .into_iter()
        .collect();

        assert_eq!(log.count(ActionKind::SetHeader), 2);
        assert!(log.has_error());
        assert!(log.contains(ActionKind::SendError));
        assert!(!log.contains(ActionKind::Close));
        assert_eq!(
            log.kinds().collect::<Vec<_>>(),
            vec![
                ActionKind::SetHeader,
                ActionKind::SetHeader,
                ActionKind::SendError
            ]
        );
    }

    #[test]
    fn collected_log_replays_entries_as_supplied() {
        let log: ActionLog = vec![
            Action::WriteText("a".into()),
            Action::WriteText("b".into()),
        ]
        .into_iter()
        .collect();

        let mut sink = RecordingSink::new();
        log.replay(&mut sink).unwrap();
        assert_eq!(
            sink.calls(),
            &[
                SinkCall::WriteText("a".into()),
                SinkCall::WriteText("b".into()),
            ]
        );
    }
}
