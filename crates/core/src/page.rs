//! Page state machine
//!
//! Each page drives its asynchronous loads through a [`Page`]. Every load is
//! tagged with a [`Ticket`]; results carrying an outdated ticket are
//! discarded, so a response arriving after the customer navigated away or
//! retried never overwrites newer state.

/// Identifies one load attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Load state of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState<T> {
    /// Nothing requested yet.
    Idle,

    /// Waiting on the load identified by the ticket.
    Loading(Ticket),

    /// Data available.
    Loaded(T),

    /// The load failed; the message is shown inline.
    Failed(String),
}

/// Whether a completed load was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The result became the page state.
    Applied,

    /// A newer load superseded this one; the result was dropped.
    Stale,
}

/// A page and its load state.
#[derive(Debug, Clone)]
pub struct Page<T> {
    state: PageState<T>,
    next: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            state: PageState::Idle,
            next: 0,
        }
    }
}

impl<T> Page<T> {
    /// Create an idle page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load, superseding any outstanding one.
    pub fn begin(&mut self) -> Ticket {
        self.next = self.next.saturating_add(1);

        let ticket = Ticket(self.next);
        self.state = PageState::Loading(ticket);

        ticket
    }

    /// Apply the result of the load identified by `ticket`.
    pub fn resolve<E: ToString>(&mut self, ticket: Ticket, result: Result<T, E>) -> Resolution {
        if !matches!(self.state, PageState::Loading(current) if current == ticket) {
            return Resolution::Stale;
        }

        self.state = match result {
            Ok(value) => PageState::Loaded(value),
            Err(error) => PageState::Failed(error.to_string()),
        };

        Resolution::Applied
    }

    /// Replace loaded data without a round trip, e.g. after a refetch.
    pub fn set(&mut self, value: T) {
        self.state = PageState::Loaded(value);
    }

    /// Return to idle and invalidate outstanding loads.
    pub fn reset(&mut self) {
        self.state = PageState::Idle;
    }

    /// Current state.
    pub fn state(&self) -> &PageState<T> {
        &self.state
    }

    /// Loaded data, if any.
    pub fn data(&self) -> Option<&T> {
        match &self.state {
            PageState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// Whether a load is outstanding.
    pub fn is_loading(&self) -> bool {
        matches!(self.state, PageState::Loading(_))
    }
}

/// Inline feedback after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    /// The action succeeded.
    Success(String),

    /// The action failed.
    Error(String),
}

impl Banner {
    /// Banner for an action result.
    pub fn from_result<T, E: ToString>(result: &Result<T, E>, success: &str) -> Self {
        match result {
            Ok(_) => Banner::Success(success.to_string()),
            Err(error) => Banner::Error(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_applies_latest_ticket() {
        let mut page = Page::<u32>::new();
        let ticket = page.begin();

        assert!(page.is_loading());
        assert_eq!(page.resolve::<String>(ticket, Ok(7)), Resolution::Applied);
        assert_eq!(page.data(), Some(&7));
    }

    #[test]
    fn superseded_results_are_dropped() {
        let mut page = Page::<u32>::new();

        let first = page.begin();
        let second = page.begin();

        assert_eq!(page.resolve::<String>(first, Ok(1)), Resolution::Stale);
        assert!(page.is_loading());

        assert_eq!(page.resolve::<String>(second, Ok(2)), Resolution::Applied);
        assert_eq!(page.data(), Some(&2));
    }

    #[test]
    fn results_after_reset_are_dropped() {
        let mut page = Page::<u32>::new();
        let ticket = page.begin();

        page.reset();

        assert_eq!(page.resolve::<String>(ticket, Ok(1)), Resolution::Stale);
        assert_eq!(page.state(), &PageState::Idle);
    }

    #[test]
    fn failures_keep_the_message() {
        let mut page = Page::<u32>::new();
        let ticket = page.begin();

        page.resolve(ticket, Err("Request failed"));

        assert_eq!(page.state(), &PageState::Failed("Request failed".to_string()));
    }

    #[test]
    fn banner_reflects_result() {
        let ok: Result<(), String> = Ok(());
        let err: Result<(), String> = Err("nope".to_string());

        assert_eq!(Banner::from_result(&ok, "Saved"), Banner::Success("Saved".to_string()));
        assert_eq!(Banner::from_result(&err, "Saved"), Banner::Error("nope".to_string()));
    }
}
