use crate::store::{CommentStore, StoreError};

/// Document key for a record title: lowercased, spaces replaced by dashes.
pub fn slug(title: &str) -> String {
    title.to_lowercase().replace(' ', "-")
}

/// Identifies which panel mount a store request belongs to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ticket {
    generation: u64,
    doc_id: String
}

impl Ticket {
    pub fn doc_id(&self) -> &str {
        &self.doc_id
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Request {
    Fetch(Ticket),
    Persist { ticket: Ticket, comments: Vec<String> }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Fetched { ticket: Ticket, result: Result<Vec<String>, StoreError> },
    Persisted { ticket: Ticket, comments: Vec<String>, result: Result<(), StoreError> }
}

impl Request {
    pub fn ticket(&self) -> &Ticket {
        match self {
            Request::Fetch(ticket) => ticket,
            Request::Persist { ticket, .. } => ticket
        }
    }

    /// Performs the store calls. Blocks.
    pub fn run(self, store: &dyn CommentStore) -> Outcome {
        match self {
            Request::Fetch(ticket) => {
                let result = store.get(&ticket.doc_id).map(|stored| stored.comments);
                Outcome::Fetched { ticket, result }
            }
            Request::Persist { ticket, comments } => {
                let result = store.put(&ticket.doc_id, &comments);
                Outcome::Persisted { ticket, comments, result }
            }
        }
    }
}

impl Outcome {
    pub fn ticket(&self) -> &Ticket {
        match self {
            Outcome::Fetched { ticket, .. } => ticket,
            Outcome::Persisted { ticket, .. } => ticket
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PanelStatus {
    Loading,
    Ready,
    Submitting,
    Failed(String)
}

impl PanelStatus {
    pub fn is_busy(&self) -> bool {
        matches!(self, PanelStatus::Loading | PanelStatus::Submitting)
    }
}

#[derive(Debug)]
struct Subject {
    title: String,
    doc_id: String,
    comments: Vec<String>,
    loaded: bool,
    input: String,
    pending: Option<String>,
    status: PanelStatus,
    failed: Option<Request>
}

/// Comment list of one record at a time.
///
/// Store access happens elsewhere: operations hand out [`Request`]s and the
/// caller feeds the resulting [`Outcome`]s back through [`CommentsPanel::finish`].
/// Outcomes from an earlier mount are discarded.
#[derive(Debug, Default)]
pub struct CommentsPanel {
    generation: u64,
    subject: Option<Subject>
}

impl CommentsPanel {
    pub fn new() -> CommentsPanel {
        CommentsPanel::default()
    }

    fn ticket(&self) -> Option<Ticket> {
        self.subject.as_ref().map(|subject| Ticket { generation: self.generation, doc_id: subject.doc_id.clone() })
    }

    pub fn open(&mut self, title: &str) -> Request {
        self.generation += 1;
        let doc_id = slug(title);
        log::debug!("opening comments for {doc_id:?}");

        self.subject = Some(Subject {
            title: title.to_string(),
            doc_id: doc_id.clone(),
            comments: vec![],
            loaded: false,
            input: String::new(),
            pending: None,
            status: PanelStatus::Loading,
            failed: None
        });
        Request::Fetch(Ticket { generation: self.generation, doc_id })
    }

    pub fn close(&mut self) {
        self.generation += 1;
        self.subject = None;
    }

    pub fn is_open(&self) -> bool {
        self.subject.is_some()
    }

    pub fn title(&self) -> Option<&str> {
        self.subject.as_ref().map(|subject| subject.title.as_str())
    }

    pub fn doc_id(&self) -> Option<&str> {
        self.subject.as_ref().map(|subject| subject.doc_id.as_str())
    }

    pub fn comments(&self) -> &[String] {
        self.subject.as_ref().map(|subject| subject.comments.as_slice()).unwrap_or_default()
    }

    /// Text being persisted, shown ahead of confirmation.
    pub fn pending(&self) -> Option<&str> {
        self.subject.as_ref().and_then(|subject| subject.pending.as_deref())
    }

    pub fn status(&self) -> Option<&PanelStatus> {
        self.subject.as_ref().map(|subject| &subject.status)
    }

    pub fn input(&self) -> Option<&str> {
        self.subject.as_ref().map(|subject| subject.input.as_str())
    }

    pub fn input_mut(&mut self) -> Option<&mut String> {
        self.subject.as_mut().map(|subject| &mut subject.input)
    }

    /// Whether the stored list has been fetched. Until then nothing may be persisted.
    pub fn is_loaded(&self) -> bool {
        self.subject.as_ref().is_some_and(|subject| subject.loaded)
    }

    pub fn can_submit(&self) -> bool {
        self.subject.as_ref().is_some_and(|subject| {
            subject.loaded && !subject.status.is_busy() && !subject.input.trim().is_empty()
        })
    }

    pub fn submit(&mut self) -> Option<Request> {
        if !self.can_submit() {
            return None;
        }
        let ticket = self.ticket()?;
        let subject = self.subject.as_mut()?;

        let text = subject.input.trim().to_string();
        let mut comments = subject.comments.clone();
        comments.push(text.clone());

        subject.pending = Some(text);
        subject.status = PanelStatus::Submitting;
        subject.failed = None;
        Some(Request::Persist { ticket, comments })
    }

    /// Applies a finished request. Returns false when the outcome was stale.
    pub fn finish(&mut self, outcome: Outcome) -> bool {
        let current = self.ticket();
        let Some(subject) = self.subject.as_mut().filter(|_| current.as_ref() == Some(outcome.ticket())) else {
            log::debug!("discarding stale result for {:?}", outcome.ticket().doc_id());
            return false;
        };

        match outcome {
            Outcome::Fetched { result: Ok(comments), .. } => {
                subject.comments = comments;
                subject.loaded = true;
                subject.status = PanelStatus::Ready;
            }
            Outcome::Fetched { ticket, result: Err(err) } => {
                log::warn!("could not load comments for {:?}: {err}", ticket.doc_id);
                subject.status = PanelStatus::Failed(err.to_string());
                subject.failed = Some(Request::Fetch(ticket));
            }
            Outcome::Persisted { comments, result: Ok(()), .. } => {
                subject.comments = comments;
                subject.input.clear();
                subject.pending = None;
                subject.status = PanelStatus::Ready;
            }
            Outcome::Persisted { ticket, comments, result: Err(err) } => {
                log::warn!("could not save comment for {:?}: {err}", ticket.doc_id);
                subject.pending = None;
                subject.status = PanelStatus::Failed(err.to_string());
                subject.failed = Some(Request::Persist { ticket, comments });
            }
        }
        true
    }

    /// Clears the error message. A failed fetch stays retryable.
    pub fn dismiss_error(&mut self) {
        if let Some(subject) = &mut self.subject {
            if let PanelStatus::Failed(_) = subject.status {
                subject.status = PanelStatus::Ready;
                if subject.loaded {
                    subject.failed = None;
                }
            }
        }
    }

    /// Re-issues the request that failed last, if any.
    pub fn retry(&mut self) -> Option<Request> {
        let subject = self.subject.as_mut()?;
        let request = subject.failed.take()?;
        match &request {
            Request::Fetch(_) => subject.status = PanelStatus::Loading,
            Request::Persist { comments, .. } => {
                subject.pending = comments.last().cloned();
                subject.status = PanelStatus::Submitting;
            }
        }
        Some(request)
    }

    pub fn can_retry(&self) -> bool {
        self.subject.as_ref().is_some_and(|subject| subject.failed.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn slug_lowercases_and_dashes() {
        assert_eq!(slug("Die Hard"), "die-hard");
        assert_eq!(slug("La La  Land"), "la-la--land");
        assert_eq!(slug("Split"), "split");
    }

    #[test]
    fn open_starts_loading() {
        let mut panel = CommentsPanel::new();
        let request = panel.open("Die Hard");
        assert_eq!(request.ticket().doc_id(), "die-hard");
        assert_eq!(panel.status(), Some(&PanelStatus::Loading));
        assert!(!panel.can_submit());
    }

    #[test]
    fn submit_appends_and_clears_input() {
        let store = MemoryStore::new();
        store.put("die-hard", &["Yippee".to_string()]).unwrap();

        let mut panel = CommentsPanel::new();
        let fetch = panel.open("Die Hard");
        assert!(panel.finish(fetch.run(&store)));
        assert_eq!(panel.comments(), ["Yippee"]);

        panel.input_mut().unwrap().push_str("  Classic ");
        let request = panel.submit().unwrap();
        assert_eq!(panel.pending(), Some("Classic"));
        assert!(panel.submit().is_none());

        assert!(panel.finish(request.run(&store)));
        assert_eq!(panel.comments(), ["Yippee", "Classic"]);
        assert_eq!(panel.input(), Some(""));
        assert_eq!(panel.pending(), None);
        assert_eq!(store.get("die-hard").unwrap().comments, panel.comments());
    }

    #[test]
    fn blank_input_is_not_submitted() {
        let store = MemoryStore::new();
        let mut panel = CommentsPanel::new();
        let fetch = panel.open("Heat");
        panel.finish(fetch.run(&store));
        panel.input_mut().unwrap().push_str("   ");
        assert!(panel.submit().is_none());
    }

    #[test]
    fn closed_panel_discards_results() {
        let store = MemoryStore::new();
        let mut panel = CommentsPanel::new();
        let request = panel.open("Heat");
        panel.close();
        assert!(!panel.finish(request.run(&store)));
        assert!(!panel.is_open());
    }

    #[test]
    fn reopened_panel_discards_earlier_mount() {
        let store = MemoryStore::new();
        store.put("heat", &["old".to_string()]).unwrap();

        let mut panel = CommentsPanel::new();
        let first = panel.open("Heat");
        let second = panel.open("Split");
        assert!(!panel.finish(first.run(&store)));
        assert_eq!(panel.status(), Some(&PanelStatus::Loading));
        assert!(panel.finish(second.run(&store)));
        assert!(panel.comments().is_empty());
    }

    #[test]
    fn failed_submit_keeps_list_and_input() {
        let store = MemoryStore::new();
        store.put("heat", &["one".to_string()]).unwrap();

        let mut panel = CommentsPanel::new();
        let fetch = panel.open("Heat");
        panel.finish(fetch.run(&store));
        panel.input_mut().unwrap().push_str("two");

        store.set_failing(true);
        let persist = panel.submit().unwrap();
        panel.finish(persist.run(&store));
        assert!(matches!(panel.status(), Some(PanelStatus::Failed(_))));
        assert_eq!(panel.comments(), ["one"]);
        assert_eq!(panel.input(), Some("two"));
        assert_eq!(panel.pending(), None);

        store.set_failing(false);
        let retry = panel.retry().unwrap();
        assert_eq!(panel.status(), Some(&PanelStatus::Submitting));
        panel.finish(retry.run(&store));
        assert_eq!(panel.comments(), ["one", "two"]);
        assert_eq!(store.get("heat").unwrap().comments, vec!["one", "two"]);
    }

    #[test]
    fn failed_fetch_blocks_submit_until_retried() {
        let store = MemoryStore::new();
        store.put("heat", &["first".to_string(), "second".to_string()]).unwrap();
        store.set_failing(true);

        let mut panel = CommentsPanel::new();
        let fetch = panel.open("Heat");
        panel.finish(fetch.run(&store));
        assert!(!panel.is_loaded());
        assert!(panel.can_retry());

        panel.input_mut().unwrap().push_str("third");
        assert!(!panel.can_submit());
        assert!(panel.submit().is_none());

        panel.dismiss_error();
        assert_eq!(panel.status(), Some(&PanelStatus::Ready));
        assert!(panel.submit().is_none());
        assert!(panel.can_retry());

        store.set_failing(false);
        assert_eq!(store.get("heat").unwrap().comments, vec!["first", "second"]);

        let retry = panel.retry().unwrap();
        panel.finish(retry.run(&store));
        assert!(panel.is_loaded());
        let persist = panel.submit().unwrap();
        panel.finish(persist.run(&store));
        assert_eq!(store.get("heat").unwrap().comments, vec!["first", "second", "third"]);
    }

    #[test]
    fn dismissed_submit_error_is_not_retryable() {
        let store = MemoryStore::new();
        let mut panel = CommentsPanel::new();
        let fetch = panel.open("Heat");
        panel.finish(fetch.run(&store));
        panel.input_mut().unwrap().push_str("one");

        store.set_failing(true);
        let persist = panel.submit().unwrap();
        panel.finish(persist.run(&store));
        assert!(panel.can_retry());
        panel.dismiss_error();
        assert!(!panel.can_retry());
        assert!(panel.can_submit());
    }
}
