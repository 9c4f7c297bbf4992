use super::spotify::SpotifyClient;
use super::TrackSearch;
use crate::config::{Config, DEFAULT_SEARCH_HOST};

/// Deterministic search URL: `https://<host>/search/<percent-encoded "title artist">`.
pub fn fallback_url(host: &str, title: &str, artist: &str) -> String {
    let query = format!("{title} {artist}");
    format!("https://{host}/search/{}", urlencoding::encode(&query))
}

/// Maps a song to a URL, preferring a direct track link from the search
/// service. Never fails; anything but a non-empty `https://` URL from the
/// service is replaced by the fallback.
pub struct LinkResolver {
    search: Box<dyn TrackSearch>,
    host: String,
}

impl LinkResolver {
    pub fn new(search: Box<dyn TrackSearch>, host: impl Into<String>) -> Self {
        let host = host.into();
        let host = if host.trim().is_empty() {
            DEFAULT_SEARCH_HOST.to_string()
        } else {
            host.trim().to_string()
        };
        Self { search, host }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Box::new(SpotifyClient::new(config.credentials.clone())),
            config.search_host.clone(),
        )
    }

    pub fn resolve_link(&self, title: &str, artist: &str) -> String {
        match self.search.find_track_url(title, artist) {
            Ok(url) if url.starts_with("https://") && url.len() > "https://".len() => url,
            Ok(url) => {
                log::warn!("Unusable track URL {url:?} for '{title}'; using search page");
                fallback_url(&self.host, title, artist)
            }
            Err(e) => {
                log::warn!("Track lookup for '{title}' by {artist} failed: {e}; using search page");
                fallback_url(&self.host, title, artist)
            }
        }
    }
}
