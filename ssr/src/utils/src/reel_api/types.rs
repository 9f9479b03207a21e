use consts::limits::{TRENDING_HASHTAGS_SHOWN, TRENDING_TOPICS_SHOWN};
use consts::GENERATE_REEL_FALLBACK_ERROR;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ReelGenError;

/// Body of `GET /trends`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendsPayload {
    #[serde(default)]
    pub hashtags: Option<Vec<String>>,
    #[serde(default)]
    pub topics: Option<Vec<String>>,
}

impl TrendsPayload {
    /// Hashtags for the trending panel, without the leading `#`
    pub fn shown_hashtags(&self) -> &[String] {
        let tags = self.hashtags.as_deref().unwrap_or_default();
        &tags[..tags.len().min(TRENDING_HASHTAGS_SHOWN)]
    }

    /// Topics for the trending panel with `snake_case` ids spelled out
    pub fn shown_topics(&self) -> Vec<String> {
        self.topics
            .as_deref()
            .unwrap_or_default()
            .iter()
            .take(TRENDING_TOPICS_SHOWN)
            .map(|topic| topic.replace('_', " "))
            .collect()
    }

    /// Nothing to show, the panel is hidden
    pub fn is_empty(&self) -> bool {
        self.shown_hashtags().is_empty() && self.shown_topics().is_empty()
    }
}

/// Raw body of `POST /generate-reel`. Not used directly by the page, see
/// [`GenerateReelResponse::into_result`].
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GenerateReelResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub video_path: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    // FastAPI puts the reason of an HTTPException here
    #[serde(default)]
    pub detail: Option<Value>,
}

/// A reel the backend finished rendering
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedReel {
    /// Path as returned by the backend
    pub download_url: String,
    /// `download_url` resolved against the service base
    pub video_url: Url,
    pub video_path: Option<String>,
}

impl GenerateReelResponse {
    pub fn into_result(self, base: &Url) -> Result<GeneratedReel, ReelGenError> {
        if !self.success {
            let reason = non_blank(self.message)
                .or_else(|| self.detail.as_ref().and_then(detail_text))
                .unwrap_or_else(|| GENERATE_REEL_FALLBACK_ERROR.to_string());
            return Err(ReelGenError::Rejected(reason));
        }

        let download_url = non_blank(self.download_url).ok_or_else(|| {
            ReelGenError::Decode("Response is missing download_url".to_string())
        })?;
        let video_url = service_path_url(base, &download_url)?;

        Ok(GeneratedReel {
            download_url,
            video_url,
            video_path: self.video_path,
        })
    }
}

/// Appends `path` to the service base. Only absolute paths on the service
/// itself are accepted, never a URL pointing at another host.
fn service_path_url(base: &Url, path: &str) -> Result<Url, ReelGenError> {
    if !path.starts_with('/') || path.starts_with("//") {
        return Err(ReelGenError::Decode(format!(
            "download_url {path:?} is not a path on the service"
        )));
    }
    let url = Url::parse(&format!("{}{path}", base.as_str().trim_end_matches('/')))
        .map_err(|e| ReelGenError::Decode(format!("Invalid download_url {path:?}: {e}")))?;
    if url.origin() != base.origin() {
        return Err(ReelGenError::Decode(format!(
            "download_url {path:?} leaves the service"
        )));
    }
    Ok(url)
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

// `detail` is a string for HTTPException and a list of `{msg, ..}` objects
// for request validation errors
fn detail_text(detail: &Value) -> Option<String> {
    match detail {
        Value::String(text) => non_blank(Some(text.clone())),
        Value::Array(items) => items
            .iter()
            .find_map(|item| item.get("msg").and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    }
}

pub fn decode_trends(body: &str) -> Result<TrendsPayload, ReelGenError> {
    serde_json::from_str(body)
        .map_err(|e| ReelGenError::Decode(format!("Failed to parse trends: {e}")))
}

pub fn decode_generate_reel(body: &str, base: &Url) -> Result<GeneratedReel, ReelGenError> {
    let response: GenerateReelResponse = serde_json::from_str(body)
        .map_err(|e| ReelGenError::Decode(format!("Failed to parse response: {e}")))?;
    response.into_result(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use consts::REEL_API_BASE;

    #[test]
    fn success_resolves_download_url_against_base() {
        let reel = decode_generate_reel(
            r#"{"success": true, "download_url": "/files/x.mp4"}"#,
            &REEL_API_BASE,
        )
        .unwrap();

        assert_eq!(reel.download_url, "/files/x.mp4");
        assert_eq!(reel.video_url.as_str(), "http://localhost:8001/files/x.mp4");
        assert_eq!(reel.video_path, None);
    }

    #[test]
    fn success_keeps_video_path() {
        let reel = decode_generate_reel(
            r#"{"success": true, "video_path": "../outputs/r.mp4", "download_url": "/outputs/r.mp4"}"#,
            &REEL_API_BASE,
        )
        .unwrap();
        assert_eq!(reel.video_path.as_deref(), Some("../outputs/r.mp4"));
    }

    #[test]
    fn failure_carries_backend_message() {
        let err = decode_generate_reel(
            r#"{"success": false, "message": "quota exceeded"}"#,
            &REEL_API_BASE,
        )
        .unwrap_err();
        assert_eq!(err, ReelGenError::Rejected("quota exceeded".into()));
    }

    #[test]
    fn failure_without_message_uses_fallback() {
        let err = decode_generate_reel(r#"{"success": false}"#, &REEL_API_BASE).unwrap_err();
        assert_eq!(err.user_message(), GENERATE_REEL_FALLBACK_ERROR);
    }

    #[test]
    fn http_exception_detail_is_surfaced() {
        let err = decode_generate_reel(r#"{"detail": "ffmpeg crashed"}"#, &REEL_API_BASE)
            .unwrap_err();
        assert_eq!(err, ReelGenError::Rejected("ffmpeg crashed".into()));

        let err = decode_generate_reel(
            r#"{"detail": [{"loc": ["body", "prompt"], "msg": "field required"}]}"#,
            &REEL_API_BASE,
        )
        .unwrap_err();
        assert_eq!(err, ReelGenError::Rejected("field required".into()));
    }

    #[test]
    fn success_without_download_url_is_a_decode_error() {
        let err = decode_generate_reel(r#"{"success": true}"#, &REEL_API_BASE).unwrap_err();
        assert!(matches!(err, ReelGenError::Decode(_)));
    }

    #[test]
    fn download_url_must_stay_on_the_service() {
        for url in [
            "//evil.example/x.mp4",
            "http://cdn.example/x.mp4",
            "https://localhost:8001/x.mp4",
            "files/x.mp4",
        ] {
            let body = format!(r#"{{"success": true, "download_url": "{url}"}}"#);
            let err = decode_generate_reel(&body, &REEL_API_BASE).unwrap_err();
            assert!(matches!(err, ReelGenError::Decode(_)), "{url} gave {err:?}");
        }
    }

    #[test]
    fn download_url_is_appended_to_the_base_path() {
        let base = Url::parse("http://127.0.0.1:9000/api/").unwrap();
        let reel = decode_generate_reel(
            r#"{"success": true, "download_url": "/outputs/x.mp4"}"#,
            &base,
        )
        .unwrap();
        assert_eq!(reel.video_url.as_str(), "http://127.0.0.1:9000/api/outputs/x.mp4");
    }

    #[test]
    fn non_json_body_is_a_decode_error() {
        let err =
            decode_generate_reel("Internal Server Error", &REEL_API_BASE).unwrap_err();
        assert!(matches!(err, ReelGenError::Decode(_)));
    }

    #[test]
    fn trends_are_truncated_for_display() {
        let hashtags: Vec<String> = (0..12).map(|i| format!("tag{i}")).collect();
        let topics: Vec<String> = (0..10).map(|i| format!("topic_{i}")).collect();
        let trends = TrendsPayload {
            hashtags: Some(hashtags),
            topics: Some(topics),
        };

        assert_eq!(trends.shown_hashtags().len(), 8);
        assert_eq!(trends.shown_hashtags()[7], "tag7");
        assert_eq!(trends.shown_topics().len(), 6);
        assert_eq!(trends.shown_topics()[0], "topic 0");
        assert!(!trends.is_empty());
    }

    #[test]
    fn trends_without_lists_are_empty() {
        let trends = decode_trends(r#"{"sounds": ["lofi"]}"#).unwrap();
        assert!(trends.is_empty());

        let trends = decode_trends(r#"{"hashtags": [], "topics": []}"#).unwrap();
        assert!(trends.is_empty());

        let trends = decode_trends(r#"{"topics": ["self_improvement"]}"#).unwrap();
        assert!(trends.shown_hashtags().is_empty());
        assert_eq!(trends.shown_topics(), vec!["self improvement".to_string()]);
        assert!(!trends.is_empty());
    }

    #[test]
    fn malformed_trends_fail_to_decode() {
        assert!(decode_trends(r#"{"hashtags": "viral"}"#).is_err());
        assert!(decode_trends("<html>").is_err());
    }
}
