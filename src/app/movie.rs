use serde::{Deserialize, Serialize};

/// Value OMDb uses when a field has no data.
pub const NOT_AVAILABLE: &str = "N/A";

/// Link settings used when turning lookup payloads into movies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieLinks {
    pub imdb_base_url: String,
    pub placeholder_poster_url: String,
}

impl Default for MovieLinks {
    fn default() -> Self {
        Self {
            imdb_base_url: "https://www.imdb.com".to_string(),
            placeholder_poster_url: "https://via.placeholder.com/360x270.png?text=no%20preview"
                .to_string(),
        }
    }
}

impl MovieLinks {
    pub fn imdb_url(&self, imdb_id: &str) -> String {
        format!("{}/title/{}", self.imdb_base_url.trim_end_matches('/'), imdb_id)
    }

    /// Maps a raw poster value to a displayable URL, falling back to the placeholder.
    pub fn poster_url(&self, poster: Option<&str>) -> String {
        match poster.map(str::trim) {
            Some(url) if !url.is_empty() && url != NOT_AVAILABLE => url.to_string(),
            _ => self.placeholder_poster_url.clone(),
        }
    }

    pub fn is_placeholder(&self, img_url: &str) -> bool {
        img_url == self.placeholder_poster_url
    }
}

/// A movie found on OMDb. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    title: String,
    description: String,
    img_url: String,
    imdb_url: String,
    imdb_id: String,
}

impl Movie {
    /// Returns `None` when the title or the IMDb id is blank.
    pub fn new(
        title: &str,
        description: Option<&str>,
        poster: Option<&str>,
        imdb_id: &str,
        links: &MovieLinks,
    ) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() || imdb_id.trim().is_empty() {
            return None;
        }

        Some(Self {
            title: title.to_string(),
            description: description.unwrap_or_default().to_string(),
            img_url: links.poster_url(poster),
            imdb_url: links.imdb_url(imdb_id),
            imdb_id: imdb_id.to_string(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn img_url(&self) -> &str {
        &self.img_url
    }

    pub fn imdb_url(&self) -> &str {
        &self.imdb_url
    }

    pub fn imdb_id(&self) -> &str {
        &self.imdb_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_imdb_url_is_derived_from_id() {
        let links = MovieLinks::default();
        let movie = Movie::new("Rush", None, None, "tt1694470", &links).unwrap();

        assert_eq!(movie.imdb_url(), "https://www.imdb.com/title/tt1694470");
        assert_eq!(movie.imdb_id(), "tt1694470");
    }

    #[test]
    fn test_poster_sentinel_maps_to_placeholder() {
        let links = MovieLinks::default();

        let missing = Movie::new("Rush", None, Some("N/A"), "tt1694470", &links).unwrap();
        assert_eq!(missing.img_url(), links.placeholder_poster_url);
        assert!(links.is_placeholder(missing.img_url()));

        let absent = Movie::new("Rush", None, None, "tt1694470", &links).unwrap();
        assert_eq!(absent.img_url(), links.placeholder_poster_url);

        let real = Movie::new(
            "Rush",
            None,
            Some("https://m.media-amazon.com/images/rush.jpg"),
            "tt1694470",
            &links,
        )
        .unwrap();
        assert_eq!(real.img_url(), "https://m.media-amazon.com/images/rush.jpg");
    }

    #[test]
    fn test_missing_plot_is_empty_description() {
        let links = MovieLinks::default();
        let movie = Movie::new("Rush", None, None, "tt1694470", &links).unwrap();
        assert_eq!(movie.description(), "");
    }

    #[test]
    fn test_blank_title_or_id_is_rejected() {
        let links = MovieLinks::default();
        assert!(Movie::new("  ", None, None, "tt1694470", &links).is_none());
        assert!(Movie::new("Rush", None, None, "", &links).is_none());
    }

    #[test]
    fn test_imdb_id_is_kept_verbatim() {
        let links = MovieLinks::default();
        let movie = Movie::new("Rush", None, None, " tt1694470 ", &links).unwrap();

        assert_eq!(movie.imdb_id(), " tt1694470 ");
        assert_eq!(movie.imdb_url(), "https://www.imdb.com/title/ tt1694470 ");
    }

    #[test]
    fn test_custom_imdb_base_trailing_slash() {
        let links = MovieLinks {
            imdb_base_url: "https://imdb.example/".to_string(),
            ..MovieLinks::default()
        };
        assert_eq!(links.imdb_url("tt0000001"), "https://imdb.example/title/tt0000001");
    }
}
