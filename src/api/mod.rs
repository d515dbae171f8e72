// Client for the WordPress REST content API: fetch one resource collection
// with embedded media and custom fields inlined.
// Public API:
//   - ContentItem, Rendered, Embedded, MediaAsset, CustomFields, FieldValue
//   - fetch_items(base_url, section) -> Result<Vec<ContentItem>, FetchError>
//   - fetch_image(url) -> RGBA bytes + size for cover textures
//   - rendered_text(html) -> display text for rendered title markup
//
// Endpoint sample:
// https://dev-cs-55-week-11.pantheonsite.io/wp-json/wp/v2/game?_embed

use lazy_static::lazy_static;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::time::Duration;

use crate::types::Section;

pub const DEFAULT_BASE_URL: &str = "https://dev-cs-55-week-11.pantheonsite.io";

/// Client-side cap for one request, response body included. A request that
/// exceeds it is cancelled and surfaces as `FetchError::TimedOut`.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

lazy_static! {
    static ref CLIENT: reqwest::Client = reqwest::Client::builder()
        .user_agent(concat!("mediashelf/", env!("CARGO_PKG_VERSION")))
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap();
}

#[derive(Debug)]
pub enum FetchError {
    /// Non-2xx response from the API.
    RequestFailed { status: u16, reason: String },
    /// No response within `REQUEST_TIMEOUT`; the request was cancelled.
    TimedOut,
    /// Connection or DNS failure before any response arrived.
    NetworkUnavailable,
    /// Anything else, surfaced with its own message.
    Other(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::RequestFailed { status, reason } => {
                write!(f, "Request failed with HTTP status {status} {reason}")
            }
            FetchError::TimedOut => {
                f.write_str("Request timed out. Please check your internet connection.")
            }
            FetchError::NetworkUnavailable => {
                f.write_str("Network error. Please check your internet connection.")
            }
            FetchError::Other(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::TimedOut
        } else if e.is_connect() {
            FetchError::NetworkUnavailable
        } else if let Some(status) = e.status() {
            FetchError::RequestFailed {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            }
        } else {
            FetchError::Other(e.to_string())
        }
    }
}

/// One game or movie record returned by the content API.
#[derive(Debug, Deserialize, Clone)]
pub struct ContentItem {
    pub id: u64,
    #[serde(default)]
    pub title: Rendered,
    /// Rendered post body; carried in the model, not shown on cards.
    #[serde(default)]
    pub content: Rendered,
    #[serde(default)]
    pub featured_media: u64,
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<Embedded>,
    #[serde(default)]
    pub acf: Option<CustomFields>,
}

impl ContentItem {
    /// Resolved cover URL: first embedded media asset with a non-empty source.
    pub fn cover_url(&self) -> Option<&str> {
        let url = self
            .embedded
            .as_ref()?
            .featured_media
            .first()?
            .source_url
            .as_str();
        if url.is_empty() {
            None
        } else {
            Some(url)
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Rendered {
    #[serde(default)]
    pub rendered: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Embedded {
    #[serde(rename = "wp:featuredmedia", default)]
    pub featured_media: Vec<MediaAsset>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MediaAsset {
    #[serde(default)]
    pub source_url: String,
}

/// Scalar value of one custom field. Coercion to text matches generic
/// string conversion: null -> "null", true -> "true", 1999 -> "1999".
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("null"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// Custom fields in the exact order the API returned them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomFields(pub Vec<(String, FieldValue)>);

impl CustomFields {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, FieldValue)> {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for CustomFields {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldsVisitor;

        impl<'de> serde::de::Visitor<'de> for FieldsVisitor {
            type Value = CustomFields;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of custom fields")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, FieldValue>()? {
                    entries.push((key, value));
                }
                Ok(CustomFields(entries))
            }

            // WP serializes a post with no custom fields as "acf": []
            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                while seq.next_element::<serde::de::IgnoredAny>()?.is_some() {}
                Ok(CustomFields::default())
            }
        }

        deserializer.deserialize_any(FieldsVisitor)
    }
}

/// Interpret a rendered snippet as display text: entities decoded, tags
/// reduced to their text content. Title markup from the CMS is trusted and
/// interpreted rather than shown escaped (see DESIGN.md on sanitization).
pub fn rendered_text(html: &str) -> String {
    let fragment = scraper::Html::parse_fragment(html);
    fragment.root_element().text().collect()
}

/// Fetch every item of one section, with embedded media inlined.
/// Exactly one GET per call; there is no retry.
pub async fn fetch_items(
    base_url: &str,
    section: Section,
) -> Result<Vec<ContentItem>, FetchError> {
    let url = format!(
        "{}/wp-json/wp/v2/{}?_embed",
        base_url.trim_end_matches('/'),
        section.slug()
    );
    log::debug!("fetch_items: GET {}", url);

    let resp = CLIENT
        .get(&url)
        .header("Accept", "application/json")
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        log::warn!("fetch_items: http status {} for {}", status.as_u16(), url);
        return Err(FetchError::RequestFailed {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        });
    }

    let items: Vec<ContentItem> = match resp.json().await {
        Ok(v) => v,
        Err(e) if e.is_decode() => {
            let text = format!("Failed to parse JSON response: {e}");
            log::error!("fetch_items: {}", text);
            return Err(FetchError::Other(text));
        }
        Err(e) => return Err(e.into()),
    };

    log::info!("fetch_items: {} -> {} items", section.slug(), items.len());
    Ok(items)
}

/// Download a cover image and return RGBA8 bytes + size.
/// Failures are non-fatal for the card; the caller just skips the image.
pub async fn fetch_image(url: &str) -> Result<(usize, usize, Vec<u8>), String> {
    log::debug!("fetch_image: GET {}", url);

    let resp = match CLIENT
        .get(url)
        .header("Accept", "image/jpeg,image/png,image/gif,image/webp")
        .send()
        .await
    {
        Ok(r) => r,
        Err(e) => return Err(format!("request error for {}: {}", url, e)),
    };

    let status = resp.status();
    if !status.is_success() {
        return Err(format!("http status {} for {}", status.as_u16(), url));
    }

    let bytes = match resp.bytes().await {
        Ok(b) => b,
        Err(e) => return Err(format!("body read error for {}: {}", url, e)),
    };

    let img = image::load_from_memory(&bytes)
        .map_err(|e| format!("decode error for {}: {}", url, e))?;
    let rgba8 = img.to_rgba8();
    let (w, h) = rgba8.dimensions();
    Ok((w as usize, h as usize, rgba8.into_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    const SAMPLE: &str = r#"[
        {
            "id": 7,
            "title": { "rendered": "Baldur&#039;s Legacy" },
            "content": { "rendered": "<p>body</p>" },
            "featured_media": 101,
            "_embedded": {
                "wp:featuredmedia": [ { "source_url": "https://cms.example/wp-content/cover7.jpg" } ]
            },
            "acf": { "release_year": 1999, "publisher": "Black Isle", "multiplayer": false, "rating": null }
        },
        {
            "id": 9,
            "title": { "rendered": "" },
            "content": { "rendered": "" },
            "featured_media": 0,
            "acf": []
        }
    ]"#;

    #[test]
    fn parses_items_and_keeps_field_order() {
        let items: Vec<ContentItem> = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(items.len(), 2);

        let first = &items[0];
        assert_eq!(first.id, 7);
        assert_eq!(first.title.rendered, "Baldur&#039;s Legacy");
        assert_eq!(
            first.cover_url(),
            Some("https://cms.example/wp-content/cover7.jpg")
        );

        let fields = first.acf.as_ref().unwrap();
        let keys: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["release_year", "publisher", "multiplayer", "rating"]);
        assert_eq!(fields.0[0].1, FieldValue::Number(1999.into()));
        assert_eq!(fields.0[1].1, FieldValue::Text("Black Isle".into()));
        assert_eq!(fields.0[2].1, FieldValue::Bool(false));
        assert_eq!(fields.0[3].1, FieldValue::Null);

        // Empty-array form of acf parses as no fields
        let second = &items[1];
        assert!(second.acf.as_ref().unwrap().is_empty());
        assert_eq!(second.cover_url(), None);
    }

    #[test]
    fn missing_optional_keys_default() {
        let item: ContentItem = serde_json::from_str(r#"{ "id": 3 }"#).unwrap();
        assert_eq!(item.title.rendered, "");
        assert!(item.embedded.is_none());
        assert!(item.acf.is_none());
        assert_eq!(item.cover_url(), None);
    }

    #[test]
    fn empty_source_url_is_no_cover() {
        let item: ContentItem = serde_json::from_str(
            r#"{ "id": 4, "_embedded": { "wp:featuredmedia": [ { "source_url": "" } ] } }"#,
        )
        .unwrap();
        assert_eq!(item.cover_url(), None);
    }

    #[test]
    fn field_values_coerce_like_string_conversion() {
        assert_eq!(FieldValue::Number(1999.into()).to_string(), "1999");
        assert_eq!(FieldValue::Text("Drama".into()).to_string(), "Drama");
        assert_eq!(FieldValue::Bool(true).to_string(), "true");
        assert_eq!(FieldValue::Null.to_string(), "null");
    }

    #[test]
    fn rendered_text_decodes_entities_and_strips_tags() {
        assert_eq!(
            rendered_text("Baldur&#039;s Gate &amp; Beyond"),
            "Baldur's Gate & Beyond"
        );
        assert_eq!(rendered_text("<em>Neo</em> Tokyo"), "Neo Tokyo");
        assert_eq!(rendered_text("plain"), "plain");
    }

    #[test]
    fn error_messages_are_distinct_and_carry_the_status() {
        let http = FetchError::RequestFailed {
            status: 500,
            reason: "Internal Server Error".into(),
        }
        .to_string();
        assert!(http.contains("500"), "{http}");

        let timed_out = FetchError::TimedOut.to_string();
        let offline = FetchError::NetworkUnavailable.to_string();
        assert_ne!(timed_out, offline);
        assert!(timed_out.contains("timed out"));
    }

    // --- loopback fixture server for the classification paths ---

    fn http_response(status_line: &str, content_type: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            content_type,
            body.len(),
            body
        )
    }

    async fn serve_once(response: String) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 2048];
            let _ = sock.read(&mut buf).await;
            sock.write_all(response.as_bytes()).await.unwrap();
            let _ = sock.shutdown().await;
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn fetches_and_parses_a_success_response() {
        let base = serve_once(http_response("200 OK", "application/json", SAMPLE)).await;
        let items = fetch_items(&base, Section::Games).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, 7);
    }

    #[tokio::test]
    async fn non_2xx_becomes_request_failed() {
        let base = serve_once(http_response(
            "500 Internal Server Error",
            "text/html",
            "boom",
        ))
        .await;
        let err = fetch_items(&base, Section::Movies).await.unwrap_err();
        match err {
            FetchError::RequestFailed { status, .. } => assert_eq!(status, 500),
            other => panic!("expected RequestFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_surfaces_its_own_message() {
        let base = serve_once(http_response("200 OK", "application/json", "{not json")).await;
        let err = fetch_items(&base, Section::Games).await.unwrap_err();
        match err {
            FetchError::Other(msg) => assert!(msg.contains("parse"), "{msg}"),
            other => panic!("expected Other, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn connection_refused_is_network_unavailable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = fetch_items(&format!("http://{}", addr), Section::Games)
            .await
            .unwrap_err();
        assert!(
            matches!(err, FetchError::NetworkUnavailable),
            "got {err:?}"
        );
    }
}
