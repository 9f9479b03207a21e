use consts::{GENERATE_REEL_PATH, REEL_API_BASE, TRENDS_PATH};
use reqwest::Url;

use super::{
    decode_generate_reel, decode_trends, GenerateReelRequest, GeneratedReel, ReelGenError,
    TrendsPayload,
};
use crate::web::RequestScope;

struct TextResponse {
    status: u16,
    body: String,
}

impl TextResponse {
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn endpoint(base: &Url, path: &str) -> Result<Url, ReelGenError> {
    base.join(path)
        .map_err(|e| ReelGenError::InvalidUrl(format!("{path}: {e}")))
}

fn ensure_alive(scope: &RequestScope) -> Result<(), ReelGenError> {
    if scope.is_alive() {
        Ok(())
    } else {
        Err(ReelGenError::Network("Request cancelled".to_string()))
    }
}

/// `GET /trends`. Anything but a 2xx JSON payload is an error.
pub async fn fetch_trends(scope: &RequestScope) -> Result<TrendsPayload, ReelGenError> {
    fetch_trends_from(&REEL_API_BASE, scope).await
}

async fn fetch_trends_from(
    base: &Url,
    scope: &RequestScope,
) -> Result<TrendsPayload, ReelGenError> {
    let url = endpoint(base, TRENDS_PATH)?;
    let res = transport::get_text(url, scope).await?;
    ensure_alive(scope)?;

    if !res.is_success() {
        return Err(ReelGenError::Status(res.status));
    }
    decode_trends(&res.body)
}

/// `POST /generate-reel`. Blocks until the backend has rendered the reel,
/// which commonly takes minutes.
///
/// The body is decoded whatever the status, since failures carry their
/// reason in the JSON body.
pub async fn generate_reel(
    request: &GenerateReelRequest,
    scope: &RequestScope,
) -> Result<GeneratedReel, ReelGenError> {
    generate_reel_at(&REEL_API_BASE, request, scope).await
}

async fn generate_reel_at(
    base: &Url,
    request: &GenerateReelRequest,
    scope: &RequestScope,
) -> Result<GeneratedReel, ReelGenError> {
    let url = endpoint(base, GENERATE_REEL_PATH)?;
    log::info!(
        "generating reel: style={} duration={}s images={} audio={}",
        request.style,
        request.duration_secs,
        request.images.len(),
        request.audio.is_some()
    );

    let res = transport::post_multipart(url, request, scope).await?;
    ensure_alive(scope)?;

    match decode_generate_reel(&res.body, base) {
        Err(ReelGenError::Decode(reason)) if !res.is_success() => {
            log::warn!("undecodable error body ({}): {reason}", res.status);
            Err(ReelGenError::Status(res.status))
        }
        result => result,
    }
}

#[cfg(feature = "hydrate")]
mod transport {
    use gloo::net::http::Request;
    use reqwest::Url;
    use web_sys::FormData;

    use super::{ReelGenError, TextResponse};
    use crate::reel_api::{FormPart, GenerateReelRequest};
    use crate::web::RequestScope;

    async fn into_text(
        response: gloo::net::http::Response,
    ) -> Result<TextResponse, ReelGenError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ReelGenError::Decode(format!("Failed to read response: {e}")))?;
        Ok(TextResponse { status, body })
    }

    pub(super) async fn get_text(
        url: Url,
        scope: &RequestScope,
    ) -> Result<TextResponse, ReelGenError> {
        let signal = scope.abort_signal();
        let response = Request::get(url.as_str())
            .abort_signal(signal.as_ref())
            .send()
            .await
            .map_err(|e| ReelGenError::Network(e.to_string()))?;
        into_text(response).await
    }

    pub(super) async fn post_multipart(
        url: Url,
        request: &GenerateReelRequest,
        scope: &RequestScope,
    ) -> Result<TextResponse, ReelGenError> {
        let form = FormData::new().map_err(|js_value| {
            ReelGenError::Network(format!("Failed to create FormData: {js_value:?}"))
        })?;
        for part in request.parts() {
            let name = part.name();
            let appended = match part {
                FormPart::Text { value, .. } => form.append_with_str(name, &value),
                FormPart::File { file, .. } => {
                    form.append_with_blob_and_filename(name, &file.blob, &file.name)
                }
            };
            appended.map_err(|js_value| {
                ReelGenError::Network(format!(
                    "Failed to append {name} to FormData: {js_value:?}"
                ))
            })?;
        }

        let signal = scope.abort_signal();
        let response = Request::post(url.as_str())
            .abort_signal(signal.as_ref())
            .body(form)
            .map_err(|e| ReelGenError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ReelGenError::Network(e.to_string()))?;
        into_text(response).await
    }
}

#[cfg(not(feature = "hydrate"))]
mod transport {
    use reqwest::multipart::{Form, Part};
    use reqwest::Url;

    use super::{ReelGenError, TextResponse};
    use crate::reel_api::{FormPart, GenerateReelRequest};
    use crate::web::{PickedFile, RequestScope};

    async fn into_text(response: reqwest::Response) -> Result<TextResponse, ReelGenError> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ReelGenError::Decode(format!("Failed to read response: {e}")))?;
        Ok(TextResponse { status, body })
    }

    pub(super) async fn get_text(
        url: Url,
        _scope: &RequestScope,
    ) -> Result<TextResponse, ReelGenError> {
        let response = reqwest::Client::new()
            .get(url)
            .send()
            .await
            .map_err(|e| ReelGenError::Network(e.to_string()))?;
        into_text(response).await
    }

    fn file_part(file: &PickedFile) -> Part {
        let part = || Part::bytes(file.blob.to_vec()).file_name(file.name.clone());
        if file.mime.is_empty() {
            return part();
        }
        part().mime_str(&file.mime).unwrap_or_else(|e| {
            log::warn!("ignoring mime type {} of {}: {e}", file.mime, file.name);
            part()
        })
    }

    pub(super) async fn post_multipart(
        url: Url,
        request: &GenerateReelRequest,
        _scope: &RequestScope,
    ) -> Result<TextResponse, ReelGenError> {
        let form = request
            .parts()
            .into_iter()
            .fold(Form::new(), |form, part| match part {
                FormPart::Text { name, value } => form.text(name, value),
                FormPart::File { name, file } => form.part(name, file_part(file)),
            });

        let response = reqwest::Client::new()
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ReelGenError::Network(e.to_string()))?;
        into_text(response).await
    }
}

#[cfg(all(test, not(feature = "hydrate")))]
mod tests {
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread::{self, JoinHandle};

    use super::*;
    use crate::web::PickedFile;

    /// Answers exactly one request with `status` and `body`, handing back
    /// the raw request it received.
    fn serve_once(status: &'static str, body: &'static str) -> (Url, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = Url::parse(&format!("http://{}/", listener.local_addr().unwrap())).unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            request
        });
        (base, handle)
    }

    fn read_request(stream: &mut TcpStream) -> String {
        let mut raw = Vec::new();
        let mut chunk = [0u8; 8192];
        loop {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&chunk[..n]);
            let Some(head_end) = raw.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let head = String::from_utf8_lossy(&raw[..head_end]).to_ascii_lowercase();
            let body_len = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|len| len.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if raw.len() >= head_end + 4 + body_len {
                break;
            }
        }
        String::from_utf8_lossy(&raw).into_owned()
    }

    fn file(name: &str, mime: &str) -> PickedFile {
        PickedFile::from_bytes(name, mime, vec![7u8; 32])
    }

    fn request(images: Vec<PickedFile>, audio: Option<PickedFile>) -> GenerateReelRequest {
        GenerateReelRequest {
            prompt: "My top 3 stock picks".into(),
            style: "finance".into(),
            duration_secs: 30,
            include_trending: true,
            images,
            audio,
        }
    }

    #[tokio::test]
    async fn trends_are_fetched_and_decoded() {
        let (base, server) = serve_once("200 OK", r#"{"hashtags": ["fyp"], "topics": ["ai_news"]}"#);
        let trends = fetch_trends_from(&base, &RequestScope::detached())
            .await
            .unwrap();

        assert_eq!(trends.shown_hashtags().to_vec(), vec!["fyp".to_string()]);
        assert_eq!(trends.shown_topics(), vec!["ai news".to_string()]);
        assert!(server.join().unwrap().starts_with("GET /trends HTTP/1.1"));
    }

    #[tokio::test]
    async fn trends_with_error_status_fail_even_with_json_body() {
        let (base, server) = serve_once("503 Service Unavailable", r#"{"hashtags": ["fyp"]}"#);
        let err = fetch_trends_from(&base, &RequestScope::detached())
            .await
            .unwrap_err();

        assert_eq!(err, ReelGenError::Status(503));
        server.join().unwrap();
    }

    #[tokio::test]
    async fn multipart_body_has_one_part_per_file() {
        let (base, server) = serve_once("200 OK", r#"{"success": true, "download_url": "/o/x.mp4"}"#);
        let req = request(
            vec![
                file("a.png", "image/png"),
                file("b.png", "image/png"),
                file("c.jpg", "image/jpeg"),
            ],
            Some(file("beat.mp3", "audio/mpeg")),
        );
        let reel = generate_reel_at(&base, &req, &RequestScope::detached())
            .await
            .unwrap();
        let sent = server.join().unwrap();

        assert!(sent.starts_with("POST /generate-reel HTTP/1.1"));
        assert_eq!(sent.matches(r#"name="images""#).count(), 3);
        assert_eq!(sent.matches(r#"name="audio""#).count(), 1);
        assert!(sent.contains(r#"filename="beat.mp3""#));
        assert!(sent.contains("audio/mpeg"));
        assert!(sent.contains("My top 3 stock picks"));
        assert_eq!(reel.video_url, base.join("o/x.mp4").unwrap());
    }

    #[tokio::test]
    async fn error_detail_survives_a_failed_status() {
        let (base, server) = serve_once(
            "500 Internal Server Error",
            r#"{"detail": "ffmpeg crashed"}"#,
        );
        let err = generate_reel_at(&base, &request(vec![], None), &RequestScope::detached())
            .await
            .unwrap_err();

        assert_eq!(err, ReelGenError::Rejected("ffmpeg crashed".into()));
        server.join().unwrap();
    }

    #[tokio::test]
    async fn undecodable_failed_status_reports_the_code() {
        let (base, server) = serve_once("502 Bad Gateway", "Bad Gateway");
        let err = generate_reel_at(&base, &request(vec![], None), &RequestScope::detached())
            .await
            .unwrap_err();

        assert_eq!(err, ReelGenError::Status(502));
        assert_eq!(err.user_message(), "Request failed with status 502");
        server.join().unwrap();
    }

    #[tokio::test]
    async fn result_after_cancel_is_reported_as_cancelled() {
        let (base, server) = serve_once("200 OK", r#"{"hashtags": ["fyp"]}"#);
        let scope = RequestScope::detached();
        scope.cancel();

        let err = fetch_trends_from(&base, &scope).await.unwrap_err();
        assert!(matches!(err, ReelGenError::Network(_)));
        server.join().unwrap();
    }

    #[test]
    fn unbuildable_endpoint_is_not_a_transport_error() {
        let err = endpoint(&REEL_API_BASE, "//[oops").unwrap_err();
        assert!(matches!(err, ReelGenError::InvalidUrl(_)));
    }
}
