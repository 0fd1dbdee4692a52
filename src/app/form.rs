use tracing::debug;

use crate::app::movie::Movie;
use crate::app::omd::LookupResult;

/// Static message shown for any failed lookup.
pub const NOT_FOUND_MESSAGE: &str = "Can't find a movie with such a title";

/// Sequence number of a submitted search.
pub type RequestId = u64;

/// A search the form wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub id: RequestId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    Idle,
    Loading { request: RequestId },
    Found(Movie),
    NotFound,
}

/// The search side pane: query text plus where the current search stands.
#[derive(Debug, Clone)]
pub struct SearchForm {
    query: String,
    state: SearchState,
    last_request: RequestId,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchForm {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            state: SearchState::Idle,
            last_request: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn preview(&self) -> Option<&Movie> {
        match &self.state {
            SearchState::Found(movie) => Some(movie),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SearchState::Loading { .. })
    }

    pub fn has_error(&self) -> bool {
        matches!(self.state, SearchState::NotFound)
    }

    /// Replaces the query. Any edit abandons the current search.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.reset();
    }

    /// Empties the query, abandoning the current search.
    pub fn clear_query(&mut self) {
        self.set_query(String::new());
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.reset();
    }

    pub fn pop_char(&mut self) {
        if self.query.pop().is_some() {
            self.reset();
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.query.trim().is_empty() && !self.is_loading()
    }

    /// Starts a search for the trimmed query, or does nothing when there is
    /// nothing to search for.
    pub fn submit(&mut self) -> Option<LookupRequest> {
        if !self.can_submit() {
            return None;
        }

        self.last_request += 1;
        let request = LookupRequest {
            id: self.last_request,
            title: self.query.trim().to_string(),
        };
        self.state = SearchState::Loading {
            request: request.id,
        };
        debug!(request = request.id, title = %request.title, "search submitted");

        Some(request)
    }

    /// Applies a lookup result if it belongs to the search in flight.
    /// Returns false for stale results, which are dropped.
    pub fn resolve(&mut self, request: RequestId, result: LookupResult) -> bool {
        match self.state {
            SearchState::Loading { request: current } if current == request => {}
            _ => {
                debug!(request, "dropping stale lookup result");
                return false;
            }
        }

        self.state = match result {
            LookupResult::Found(movie) => SearchState::Found(movie),
            LookupResult::NotFound { .. } => SearchState::NotFound,
        };
        true
    }

    /// Hands over the preview for adding and clears the form.
    pub fn take_preview(&mut self) -> Option<Movie> {
        match std::mem::replace(&mut self.state, SearchState::Idle) {
            SearchState::Found(movie) => {
                self.query.clear();
                Some(movie)
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    fn reset(&mut self) {
        if self.state != SearchState::Idle {
            debug!("query edited, search state reset");
        }
        self.state = SearchState::Idle;
    }
}
