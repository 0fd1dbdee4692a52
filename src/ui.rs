mod footer;
mod header;
mod loading;
mod movie_card;
mod movie_list;
mod search_form;
mod ui;

pub use ui::ui;
