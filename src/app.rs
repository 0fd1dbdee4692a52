mod app;
pub mod form;
pub mod movie;
pub mod movie_list;
pub mod omd;

pub use app::{App, PosterState};
