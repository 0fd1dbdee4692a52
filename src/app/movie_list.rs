use tracing::debug;

use crate::app::movie::Movie;

/// Insertion-ordered movies, unique by IMDb id.
#[derive(Debug, Clone, Default)]
pub struct MovieList {
    movies: Vec<Movie>,
}

impl MovieList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the movie unless one with the same IMDb id is already listed.
    /// Returns whether the list changed.
    pub fn add(&mut self, movie: Movie) -> bool {
        if self.contains(movie.imdb_id()) {
            debug!(imdb_id = movie.imdb_id(), "movie already listed, skipping");
            return false;
        }

        debug!(imdb_id = movie.imdb_id(), title = movie.title(), "movie added to list");
        self.movies.push(movie);
        true
    }

    pub fn contains(&self, imdb_id: &str) -> bool {
        self.movies.iter().any(|m| m.imdb_id() == imdb_id)
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
