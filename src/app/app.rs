use std::sync::{Arc, mpsc};
use std::thread;

use image::DynamicImage;
use ratatui::widgets::ListState;
use ratatui_image::{picker::Picker, protocol::StatefulProtocol};
use throbber_widgets_tui::ThrobberState;
use tracing::{debug, info, warn};

use crate::app::form::{LookupRequest, RequestId, SearchForm};
use crate::app::movie::MovieLinks;
use crate::app::movie_list::MovieList;
use crate::app::omd::{LookupResult, MovieLookup};

/// Results sent back from worker threads.
pub enum LookupMessage {
    Lookup {
        request: RequestId,
        result: LookupResult,
    },
    PosterReady {
        imdb_id: String,
        image: DynamicImage,
    },
    PosterFailed {
        imdb_id: String,
    },
}

/// Poster of the current preview, keyed by IMDb id.
pub enum PosterState {
    None,
    Loading {
        imdb_id: String,
    },
    Ready {
        imdb_id: String,
        protocol: Box<StatefulProtocol>,
    },
}

pub struct App {
    pub form: SearchForm,
    pub movies: MovieList,
    pub list_state: ListState,
    pub poster: PosterState,
    pub throbber_state: ThrobberState,
    pub links: MovieLinks,
    picker: Picker,
    lookup: Arc<dyn MovieLookup>,
    sender: mpsc::Sender<LookupMessage>,
    pub receiver: mpsc::Receiver<LookupMessage>,
}

impl App {
    pub fn new(lookup: Arc<dyn MovieLookup>, links: MovieLinks, picker: Picker) -> Self {
        let (sender, receiver) = mpsc::channel();

        Self {
            form: SearchForm::new(),
            movies: MovieList::new(),
            list_state: ListState::default(),
            poster: PosterState::None,
            throbber_state: ThrobberState::default(),
            links,
            picker,
            lookup,
            sender,
            receiver,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.form.push_char(c);
        self.poster = PosterState::None;
    }

    pub fn pop_char(&mut self) {
        self.form.pop_char();
        if self.form.preview().is_none() {
            self.poster = PosterState::None;
        }
    }

    pub fn clear_query(&mut self) {
        self.form.clear_query();
        self.poster = PosterState::None;
    }

    /// Starts a lookup on a worker thread. Blank queries issue nothing.
    pub fn submit_search(&mut self) {
        let Some(request) = self.form.submit() else {
            return;
        };

        self.poster = PosterState::None;
        self.spawn_lookup(request);
    }

    /// Moves the preview into the movie list and resets the form.
    pub fn add_preview(&mut self) {
        let Some(movie) = self.form.take_preview() else {
            return;
        };

        self.poster = PosterState::None;
        let title = movie.title().to_string();
        if self.movies.add(movie) {
            info!(title = %title, total = self.movies.len(), "movie added");
            self.list_state.select(Some(self.movies.len() - 1));
        }
    }

    /// Drains pending worker results without blocking.
    pub fn process_messages(&mut self) {
        while let Ok(message) = self.receiver.try_recv() {
            self.handle_message(message);
        }
    }

    pub fn handle_message(&mut self, message: LookupMessage) {
        match message {
            LookupMessage::Lookup { request, result } => {
                if self.form.resolve(request, result) {
                    self.request_poster();
                }
            }
            LookupMessage::PosterReady { imdb_id, image } => {
                if self.is_awaiting_poster(&imdb_id) {
                    let protocol = self.picker.new_resize_protocol(image);
                    self.poster = PosterState::Ready {
                        imdb_id,
                        protocol: Box::new(protocol),
                    };
                } else {
                    debug!(imdb_id = %imdb_id, "dropping poster for stale preview");
                }
            }
            LookupMessage::PosterFailed { imdb_id } => {
                if self.is_awaiting_poster(&imdb_id) {
                    self.poster = PosterState::None;
                }
            }
        }
    }

    /// Advances the loading animation.
    pub fn tick(&mut self) {
        if self.form.is_loading() || matches!(self.poster, PosterState::Loading { .. }) {
            self.throbber_state.calc_next();
        }
    }

    pub fn next_movie(&mut self) {
        let movie_count = self.movies.len();
        if movie_count == 0 {
            return;
        }

        let next = match self.list_state.selected() {
            Some(i) => (i + 1) % movie_count,
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    pub fn previous_movie(&mut self) {
        let movie_count = self.movies.len();
        if movie_count == 0 {
            return;
        }

        let previous = match self.list_state.selected() {
            Some(0) | None => movie_count - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(previous));
    }

    fn spawn_lookup(&self, request: LookupRequest) {
        let lookup = Arc::clone(&self.lookup);
        let sender = self.sender.clone();

        thread::spawn(move || {
            let result = lookup.find_by_title(&request.title);
            let _ = sender.send(LookupMessage::Lookup {
                request: request.id,
                result,
            });
        });
    }

    fn request_poster(&mut self) {
        let Some(movie) = self.form.preview() else {
            return;
        };
        if self.links.is_placeholder(movie.img_url()) {
            return;
        }

        let imdb_id = movie.imdb_id().to_string();
        let url = movie.img_url().to_string();
        let lookup = Arc::clone(&self.lookup);
        let sender = self.sender.clone();
        self.poster = PosterState::Loading {
            imdb_id: imdb_id.clone(),
        };

        thread::spawn(move || {
            let message = match lookup.fetch_poster(&url) {
                Ok(image) => LookupMessage::PosterReady { imdb_id, image },
                Err(e) => {
                    warn!(url = %url, error = %e, "failed to download poster");
                    LookupMessage::PosterFailed { imdb_id }
                }
            };
            let _ = sender.send(message);
        });
    }

    fn is_awaiting_poster(&self, imdb_id: &str) -> bool {
        matches!(&self.poster, PosterState::Loading { imdb_id: pending } if pending == imdb_id)
            && self.form.preview().is_some_and(|m| m.imdb_id() == imdb_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::form::{NOT_FOUND_MESSAGE, SearchState};
    use crate::app::omd::parse_lookup;
    use crate::error::{Error, Result};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    const RUSH: &str =
        r#"{"Response":"True","Title":"Rush","Plot":"F1 rivalry.","Poster":"N/A","imdbID":"tt1694470"}"#;
    const HEAT: &str = r#"{"Response":"True","Title":"Heat","Plot":"","Poster":"https://img.example/heat.jpg","imdbID":"tt0113277"}"#;
    const MISSING: &str = r#"{"Response":"False","Error":"Movie not found!"}"#;

    struct FakeLookup {
        body: &'static str,
        calls: AtomicUsize,
        poster_calls: AtomicUsize,
    }

    impl FakeLookup {
        fn new(body: &'static str) -> Arc<Self> {
            Arc::new(Self {
                body,
                calls: AtomicUsize::new(0),
                poster_calls: AtomicUsize::new(0),
            })
        }
    }

    impl MovieLookup for FakeLookup {
        fn find_by_title(&self, _title: &str) -> LookupResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            parse_lookup(self.body, &MovieLinks::default())
        }

        fn fetch_poster(&self, _url: &str) -> Result<DynamicImage> {
            self.poster_calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::Io(std::io::Error::other("offline")))
        }
    }

    fn app_with(lookup: Arc<FakeLookup>) -> App {
        App::new(lookup, MovieLinks::default(), Picker::halfblocks())
    }

    fn type_query(app: &mut App, query: &str) {
        for c in query.chars() {
            app.push_char(c);
        }
    }

    fn wait_for_message(app: &mut App) {
        let message = app
            .receiver
            .recv_timeout(Duration::from_secs(5))
            .expect("worker should report back");
        app.handle_message(message);
    }

    #[test]
    fn test_blank_search_issues_no_lookup() {
        let lookup = FakeLookup::new(RUSH);
        let mut app = app_with(lookup.clone());

        app.submit_search();
        type_query(&mut app, "   ");
        app.submit_search();

        assert_eq!(app.form.state(), &SearchState::Idle);
        assert!(app.receiver.recv_timeout(Duration::from_millis(100)).is_err());
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_rush_scenario_adds_one_movie_and_resets() {
        let lookup = FakeLookup::new(RUSH);
        let mut app = app_with(lookup.clone());

        type_query(&mut app, "Rush");
        app.submit_search();
        assert!(app.form.is_loading());
        wait_for_message(&mut app);

        let preview = app.form.preview().expect("preview after lookup");
        assert_eq!(preview.title(), "Rush");
        assert_eq!(preview.img_url(), app.links.placeholder_poster_url);
        // Placeholder posters are never downloaded
        assert!(matches!(app.poster, PosterState::None));

        app.add_preview();
        assert_eq!(app.movies.len(), 1);
        assert_eq!(app.movies.movies()[0].imdb_id(), "tt1694470");
        assert_eq!(app.form.query(), "");
        assert!(app.form.preview().is_none());
        assert_eq!(app.list_state.selected(), Some(0));
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
        assert_eq!(lookup.poster_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_adding_same_movie_twice_keeps_one_entry() {
        let lookup = FakeLookup::new(RUSH);
        let mut app = app_with(lookup.clone());

        for _ in 0..2 {
            type_query(&mut app, "Rush");
            app.submit_search();
            wait_for_message(&mut app);
            app.add_preview();
        }

        assert_eq!(app.movies.len(), 1);
        // Repeated queries are not cached
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_not_found_leaves_list_unchanged() {
        let lookup = FakeLookup::new(MISSING);
        let mut app = app_with(lookup);

        type_query(&mut app, "zzzzzz-does-not-exist");
        app.submit_search();
        wait_for_message(&mut app);

        assert!(app.form.has_error());
        assert!(app.form.preview().is_none());
        assert_eq!(app.form.query(), "zzzzzz-does-not-exist");
        assert!(app.movies.is_empty());
        assert_eq!(NOT_FOUND_MESSAGE, "Can't find a movie with such a title");

        app.add_preview();
        assert!(app.movies.is_empty());
    }

    #[test]
    fn test_edit_during_lookup_discards_result() {
        let lookup = FakeLookup::new(RUSH);
        let mut app = app_with(lookup);

        type_query(&mut app, "Rush");
        app.submit_search();
        app.push_char('!');
        wait_for_message(&mut app);

        assert_eq!(app.form.state(), &SearchState::Idle);
        assert_eq!(app.form.query(), "Rush!");
    }

    #[test]
    fn test_failed_poster_download_clears_loading() {
        let lookup = FakeLookup::new(HEAT);
        let mut app = app_with(lookup.clone());

        type_query(&mut app, "Heat");
        app.submit_search();
        wait_for_message(&mut app);
        assert!(matches!(&app.poster, PosterState::Loading { imdb_id } if imdb_id == "tt0113277"));

        wait_for_message(&mut app);
        assert!(matches!(app.poster, PosterState::None));
        assert_eq!(app.form.preview().map(|m| m.title()), Some("Heat"));
        assert_eq!(lookup.poster_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_poster_for_stale_preview_is_dropped() {
        let lookup = FakeLookup::new(RUSH);
        let mut app = app_with(lookup);

        app.handle_message(LookupMessage::PosterReady {
            imdb_id: "tt0113277".to_string(),
            image: DynamicImage::new_rgb8(1, 1),
        });
        assert!(matches!(app.poster, PosterState::None));
    }

    #[test]
    fn test_movie_selection_wraps() {
        let lookup = FakeLookup::new(RUSH);
        let mut app = app_with(lookup);
        app.next_movie();
        assert_eq!(app.list_state.selected(), None);

        type_query(&mut app, "Rush");
        app.submit_search();
        wait_for_message(&mut app);
        app.add_preview();

        app.next_movie();
        assert_eq!(app.list_state.selected(), Some(0));
        app.previous_movie();
        assert_eq!(app.list_state.selected(), Some(0));
    }
}
