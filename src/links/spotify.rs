use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use ureq::Agent;

use super::TrackSearch;
use crate::config::Credentials;
use crate::error::LookupError;

const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const SEARCH_URL: &str = "https://api.spotify.com/v1/search";

/// Tokens are refreshed this long before Spotify says they expire.
const EXPIRY_MARGIN: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: TrackPage,
}

#[derive(Debug, Deserialize)]
struct TrackPage {
    items: Vec<Track>,
}

#[derive(Debug, Deserialize)]
struct Track {
    external_urls: ExternalUrls,
}

#[derive(Debug, Deserialize)]
struct ExternalUrls {
    spotify: Option<String>,
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

impl CachedToken {
    /// A token issued at `now` that Spotify says lives `expires_in` seconds.
    fn issued(value: String, expires_in: u64, now: Instant) -> Self {
        let lifetime = Duration::from_secs(expires_in).saturating_sub(EXPIRY_MARGIN);
        CachedToken {
            value,
            expires_at: now + lifetime,
        }
    }

    fn is_fresh(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Whether a failed request means the bearer token was rejected.
fn is_rejected_token(err: &ureq::Error) -> bool {
    matches!(err, ureq::Error::Status(401, _))
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Spotify Web API track search using the client-credentials flow.
pub struct SpotifyClient {
    agent: Agent,
    credentials: Option<Credentials>,
    token: Mutex<Option<CachedToken>>,
}

impl SpotifyClient {
    pub fn new(credentials: Option<Credentials>) -> Self {
        SpotifyClient {
            agent: Agent::new(),
            credentials,
            token: Mutex::new(None),
        }
    }

    /// Return a valid access token, requesting a new one when the cached
    /// token is missing or about to expire.
    fn access_token(&self) -> Result<String, LookupError> {
        let creds = self
            .credentials
            .as_ref()
            .ok_or(LookupError::MissingCredentials)?;

        if let Some(token) = self.cached_token(Instant::now()) {
            return Ok(token);
        }

        let basic = general_purpose::STANDARD
            .encode(format!("{}:{}", creds.client_id, creds.client_secret));
        let response: TokenResponse = self
            .agent
            .post(TOKEN_URL)
            .set("Authorization", &format!("Basic {basic}"))
            .send_form(&[("grant_type", "client_credentials")])?
            .into_json()
            .map_err(|e| LookupError::Malformed(format!("token response: {e}")))?;

        log::debug!("Obtained search token valid for {}s", response.expires_in);
        self.store_token(CachedToken::issued(
            response.access_token.clone(),
            response.expires_in,
            Instant::now(),
        ));
        Ok(response.access_token)
    }

    fn cached_token(&self, now: Instant) -> Option<String> {
        let cached = self.token.lock().unwrap_or_else(PoisonError::into_inner);
        cached
            .as_ref()
            .filter(|token| token.is_fresh(now))
            .map(|token| token.value.clone())
    }

    fn store_token(&self, token: CachedToken) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    fn forget_token(&self) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl TrackSearch for SpotifyClient {
    fn find_track_url(&self, title: &str, artist: &str) -> Result<String, LookupError> {
        let token = self.access_token()?;
        let query = format!("track:{title} artist:{artist}");

        let response = self
            .agent
            .get(SEARCH_URL)
            .set("Authorization", &format!("Bearer {token}"))
            .query("q", &query)
            .query("type", "track")
            .query("limit", "1")
            .call();

        let body = match response {
            Ok(resp) => resp
                .into_string()
                .map_err(|e| LookupError::Http(e.to_string()))?,
            Err(e) => {
                // A rejected token is dropped so the next click re-authenticates.
                if is_rejected_token(&e) {
                    self.forget_token();
                }
                return Err(e.into());
            }
        };

        track_url_from_json(&body)
    }
}

/// Extract the first track's Spotify URL from a search response body.
pub fn track_url_from_json(body: &str) -> Result<String, LookupError> {
    let parsed: SearchResponse =
        serde_json::from_str(body).map_err(|e| LookupError::Malformed(e.to_string()))?;

    let track = parsed
        .tracks
        .items
        .into_iter()
        .next()
        .ok_or(LookupError::NoResults)?;

    track
        .external_urls
        .spotify
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| LookupError::Malformed("track has no spotify url".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_item_url_is_returned() {
        let body = r#"{"tracks":{"items":[
            {"name":"Imagine","external_urls":{"spotify":"https://open.spotify.com/track/abc"}},
            {"name":"Imagine (Live)","external_urls":{"spotify":"https://open.spotify.com/track/def"}}
        ]}}"#;
        assert_eq!(
            track_url_from_json(body).unwrap(),
            "https://open.spotify.com/track/abc"
        );
    }

    #[test]
    fn no_items_is_no_results() {
        let body = r#"{"tracks":{"items":[]}}"#;
        assert!(matches!(track_url_from_json(body), Err(LookupError::NoResults)));
    }

    #[test]
    fn missing_fields_are_malformed() {
        assert!(matches!(
            track_url_from_json(r#"{"error":{"status":400}}"#),
            Err(LookupError::Malformed(_))
        ));
        assert!(matches!(
            track_url_from_json(r#"{"tracks":{"items":[{"external_urls":{}}]}}"#),
            Err(LookupError::Malformed(_))
        ));
        assert!(matches!(
            track_url_from_json("<html>"),
            Err(LookupError::Malformed(_))
        ));
    }

    fn creds() -> Option<Credentials> {
        Some(Credentials {
            client_id: "id".into(),
            client_secret: "secret".into(),
        })
    }

    #[test]
    fn token_lifetime_keeps_a_safety_margin() {
        let now = Instant::now();

        let hour = CachedToken::issued("t".into(), 3600, now);
        assert!(hour.is_fresh(now));
        assert!(hour.is_fresh(now + Duration::from_secs(3569)));
        assert!(!hour.is_fresh(now + Duration::from_secs(3570)));

        // Lifetimes at or under the margin are stale immediately.
        assert!(!CachedToken::issued("t".into(), 30, now).is_fresh(now));
        assert!(!CachedToken::issued("t".into(), 10, now).is_fresh(now));
        assert!(!CachedToken::issued("t".into(), 0, now).is_fresh(now));
    }

    #[test]
    fn fresh_token_is_reused_and_stale_one_is_not() {
        let client = SpotifyClient::new(creds());
        let now = Instant::now();
        assert_eq!(client.cached_token(now), None);

        client.store_token(CachedToken::issued("abc".into(), 3600, now));
        assert_eq!(client.cached_token(now).as_deref(), Some("abc"));
        assert_eq!(client.access_token().unwrap(), "abc");
        assert_eq!(client.cached_token(now + Duration::from_secs(3600)), None);
    }

    #[test]
    fn forgetting_empties_the_cache() {
        let client = SpotifyClient::new(creds());
        let now = Instant::now();
        client.store_token(CachedToken::issued("abc".into(), 3600, now));

        client.forget_token();
        assert_eq!(client.cached_token(now), None);
    }

    #[test]
    fn only_unauthorized_status_rejects_the_token() {
        let status = |code| {
            ureq::Error::Status(code, ureq::Response::new(code, "status", "").unwrap())
        };
        assert!(is_rejected_token(&status(401)));
        assert!(!is_rejected_token(&status(429)));
        assert!(!is_rejected_token(&status(500)));
    }

    #[test]
    fn lookup_without_credentials_fails_before_any_request() {
        let client = SpotifyClient::new(None);
        assert!(matches!(
            client.find_track_url("Imagine", "Lennon"),
            Err(LookupError::MissingCredentials)
        ));
    }
}
