use serde::Deserialize;

/// Metadata OMDb knows about a title. Every field is best-effort; `title`
/// is OMDb's canonical spelling, kept so callers can prefer it over the
/// user's input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OmdbFacts {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub director: Option<String>,
    pub poster_url: Option<String>,
}

pub struct OmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String) -> Self {
        // Warn once on app load if enrichment is disabled
        if api_key.trim().is_empty() {
            tracing::warn!("no OMDB_API_KEY provided, movies will be stored without enrichment");
        }
        Self { client, api_key, base_url }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Look up a title. Returns `None` on any failure — missing key,
    /// network error, bad status, malformed body, or title unknown to
    /// OMDb — so an add can always proceed with the title alone.
    pub async fn lookup(&self, title: &str) -> Option<OmdbFacts> {
        if !self.is_configured() {
            return None;
        }

        let url = self.base_url.trim_end_matches('/').to_string();
        let resp = self
            .client
            .get(url)
            .query(&[("t", title), ("apikey", self.api_key.as_str())])
            .send()
            .await;

        let resp = match resp.and_then(|r| r.error_for_status()) {
            Ok(resp) => resp,
            Err(err) => {
                tracing::debug!(title, error = %err, "omdb request failed");
                return None;
            }
        };

        let payload: OmdbResponse = match resp.json().await {
            Ok(payload) => payload,
            Err(err) => {
                tracing::debug!(title, error = %err, "omdb response was not valid json");
                return None;
            }
        };

        facts_from(payload)
    }
}

/// OMDb signals "not found" in-band with `"Response": "False"`.
fn facts_from(payload: OmdbResponse) -> Option<OmdbFacts> {
    if !payload.response.eq_ignore_ascii_case("true") {
        return None;
    }

    Some(OmdbFacts {
        title: clean(payload.title),
        year: payload.year.as_deref().and_then(parse_year),
        director: clean(payload.director),
        poster_url: clean(payload.poster),
    })
}

/// OMDb uses the literal string "N/A" for unknown fields.
fn clean(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let s = s.trim();
        (!s.is_empty() && s != "N/A").then(|| s.to_string())
    })
}

fn parse_year(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

#[derive(Debug, Default, Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_year() {
        assert_eq!(parse_year("2010"), Some(2010));
        assert_eq!(parse_year("  1999 "), Some(1999));
    }

    #[test]
    fn unparsable_year_is_absent() {
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("N/A"), None);
        assert_eq!(parse_year("2010\u{2013}2012"), None);
    }

    #[test]
    fn not_found_response_yields_nothing() {
        let payload = OmdbResponse { response: "False".to_string(), ..Default::default() };
        assert_eq!(facts_from(payload), None);
    }

    #[test]
    fn sentinels_map_to_absent_fields() {
        let payload = OmdbResponse {
            response: "True".to_string(),
            title: Some("Arrival".to_string()),
            year: Some("2016".to_string()),
            director: Some("N/A".to_string()),
            poster: Some("N/A".to_string()),
        };

        let facts = facts_from(payload).unwrap();
        assert_eq!(facts.title.as_deref(), Some("Arrival"));
        assert_eq!(facts.year, Some(2016));
        assert_eq!(facts.director, None);
        assert_eq!(facts.poster_url, None);
    }

    #[test]
    fn full_response_maps_through() {
        let payload = OmdbResponse {
            response: "True".to_string(),
            title: Some("Inception".to_string()),
            year: Some("2010".to_string()),
            director: Some("Christopher Nolan".to_string()),
            poster: Some("https://img.omdbapi.com/inception.jpg".to_string()),
        };

        let facts = facts_from(payload).unwrap();
        assert_eq!(facts.title.as_deref(), Some("Inception"));
        assert_eq!(facts.year, Some(2010));
        assert_eq!(facts.director.as_deref(), Some("Christopher Nolan"));
        assert_eq!(facts.poster_url.as_deref(), Some("https://img.omdbapi.com/inception.jpg"));
    }
}
