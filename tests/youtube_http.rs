use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, headers, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ytscribe::config::YoutubeConfig;
use ytscribe::{ErrorKind, TranscriptPipeline};

const ID: &str = "dQw4w9WgXcQ";
const KEY: &str = "AIzaSyTestKey_123";

fn watch_page() -> String {
    format!(
        r#"<html><script>ytcfg.set({{"INNERTUBE_API_KEY":"{}","INNERTUBE_CONTEXT_CLIENT_NAME":1}});</script></html>"#,
        KEY
    )
}

fn pipeline(server: &MockServer) -> TranscriptPipeline {
    TranscriptPipeline::new(YoutubeConfig::default().with_base_url(&server.uri()))
}

async fn mount_watch_page(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path("/watch"))
        .and(query_param("v", ID))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_player(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/youtubei/v1/player"))
        .and(query_param("key", KEY))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

fn track(server: &MockServer, lang: &str, name: serde_json::Value, kind: Option<&str>) -> serde_json::Value {
    let mut track = json!({
        "baseUrl": format!("{}/api/timedtext?v={}&lang={}&fmt=srv3", server.uri(), ID, lang),
        "languageCode": lang,
        "name": name,
    });
    if let Some(kind) = kind {
        track["kind"] = json!(kind);
    }
    track
}

#[tokio::test]
async fn manual_track_preferred_end_to_end() {
    let server = MockServer::start().await;
    mount_watch_page(&server, watch_page()).await;

    let player = json!({
        "playabilityStatus": {"status": "OK"},
        "captions": {"playerCaptionsTracklistRenderer": {"captionTracks": [
            track(&server, "en", json!({"simpleText": "English"}), None),
            track(&server, "en", json!({"runs": [{"text": "English (auto-generated)"}]}), Some("asr")),
            track(&server, "es", json!({"runs": [{"text": "Spanish (auto-generated)"}]}), Some("asr")),
        ]}}
    });
    mount_player(&server, ResponseTemplate::new(200).set_body_json(player)).await;

    Mock::given(method("GET"))
        .and(path("/api/timedtext"))
        .and(query_param("lang", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<?xml version="1.0" encoding="utf-8" ?><transcript><text start="1.5" dur="2.25">Hello &amp; welcome</text><text start="3.75" dur="1"><i></i></text><text start="4" dur="2">to the &lt;show&gt;</text></transcript>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let result = pipeline(&server)
        .resolve_transcript(&format!("https://www.youtube.com/watch?v={}", ID), None)
        .await
        .unwrap();

    assert_eq!(result.language, "en");
    assert_eq!(result.language_name, "English");
    assert!(!result.is_auto_generated);
    assert_eq!(result.available_languages.len(), 3);
    assert_eq!(result.available_languages[2].display_name, "Spanish (auto-generated)");

    assert_eq!(result.segments.len(), 2);
    assert_eq!(result.segments[0].text, "Hello & welcome");
    assert_eq!(result.segments[0].start_ms, 1500);
    assert_eq!(result.segments[0].duration_ms, 2250);
    assert_eq!(result.segments[1].text, "to the <show>");
}

#[tokio::test]
async fn requests_carry_browser_identity_and_client_context() {
    let server = MockServer::start().await;
    let mut config = YoutubeConfig::default().with_base_url(&server.uri());
    config.user_agent = "ytscribe-test-agent/1.0".to_string();
    let consent_cookie = config.consent_cookie.clone();

    Mock::given(method("GET"))
        .and(path("/watch"))
        .and(query_param("v", ID))
        .and(header("user-agent", "ytscribe-test-agent/1.0"))
        .and(header("cookie", consent_cookie.as_str()))
        .and(headers("accept-language", vec!["en-US", "en;q=0.9"]))
        .respond_with(ResponseTemplate::new(200).set_body_string(watch_page()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/youtubei/v1/player"))
        .and(query_param("key", KEY))
        .and(body_partial_json(json!({
            "videoId": ID,
            "context": {"client": {"clientName": "ANDROID", "clientVersion": "20.10.38"}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "playabilityStatus": {"status": "OK"},
            "captions": {"playerCaptionsTracklistRenderer": {"captionTracks": [
                track(&server, "en", json!({"simpleText": "English"}), None),
            ]}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/timedtext"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"<transcript><text start="0" dur="1">hi</text></transcript>"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = TranscriptPipeline::new(config)
        .resolve_transcript(ID, None)
        .await
        .unwrap();
    assert_eq!(result.segments[0].text, "hi");

    let requests = server.received_requests().await.unwrap_or_default();
    let timed_text = requests
        .iter()
        .find(|request| request.url.path() == "/api/timedtext")
        .unwrap();
    let params: Vec<_> = timed_text.url.query_pairs().map(|(k, _)| k.into_owned()).collect();
    assert_eq!(params, ["v", "lang"]);
}

#[tokio::test]
async fn slow_watch_page_times_out_as_server_error() {
    let server = MockServer::start().await;
    let mut config = YoutubeConfig::default().with_base_url(&server.uri());
    config.page_timeout_secs = 1;

    Mock::given(method("GET"))
        .and(path("/watch"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(watch_page())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = TranscriptPipeline::new(config)
        .resolve_transcript(ID, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ServerError);
    assert!(err.message().contains("timed out"), "{}", err.message());
}

#[tokio::test]
async fn login_required_reports_upstream_reason() {
    let server = MockServer::start().await;
    mount_watch_page(&server, watch_page()).await;
    mount_player(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "playabilityStatus": {"status": "LOGIN_REQUIRED", "reason": "Sign in to confirm your age"}
        })),
    )
    .await;

    let err = pipeline(&server).resolve_transcript(ID, None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::VideoUnavailable);
    assert_eq!(err.message(), "Sign in to confirm your age");
}

#[tokio::test]
async fn captcha_page_is_rate_limited() {
    let server = MockServer::start().await;
    mount_watch_page(
        &server,
        r#"<html><form><div class="g-recaptcha" data-sitekey="abc"></div></form></html>"#.to_string(),
    )
    .await;

    let err = pipeline(&server).resolve_transcript(ID, None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RateLimited);
    assert_eq!(err.kind().http_status(), 429);
}

#[tokio::test]
async fn missing_api_key_is_unavailable() {
    let server = MockServer::start().await;
    mount_watch_page(&server, "<html><body>This video isn't available</body></html>".to_string()).await;

    let err = pipeline(&server).resolve_transcript(ID, None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::VideoUnavailable);
}

#[tokio::test]
async fn player_failure_status_is_server_error() {
    let server = MockServer::start().await;
    mount_watch_page(&server, watch_page()).await;
    mount_player(&server, ResponseTemplate::new(403)).await;

    let err = pipeline(&server).resolve_transcript(ID, None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ServerError);
    assert!(err.message().contains("403"), "{}", err.message());
}

#[tokio::test]
async fn no_caption_tracks() {
    let server = MockServer::start().await;
    mount_watch_page(&server, watch_page()).await;
    mount_player(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"playabilityStatus": {"status": "OK"}})),
    )
    .await;

    let err = pipeline(&server).list_tracks(ID).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoTranscript);
}

#[tokio::test]
async fn requested_language_missing_lists_alternatives() {
    let server = MockServer::start().await;
    mount_watch_page(&server, watch_page()).await;
    let player = json!({
        "playabilityStatus": {"status": "OK"},
        "captions": {"playerCaptionsTracklistRenderer": {"captionTracks": [
            track(&server, "en", json!("English"), None),
            track(&server, "de", json!("German"), None),
        ]}}
    });
    mount_player(&server, ResponseTemplate::new(200).set_body_json(player)).await;

    let err = pipeline(&server).resolve_transcript(ID, Some("fr")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoTranscript);
    assert!(err.message().contains("en, de"), "{}", err.message());
}

#[tokio::test]
async fn srv3_only_response_fails_clearly() {
    let server = MockServer::start().await;
    mount_watch_page(&server, watch_page()).await;
    let player = json!({
        "playabilityStatus": {"status": "OK"},
        "captions": {"playerCaptionsTracklistRenderer": {"captionTracks": [
            track(&server, "en", json!({"simpleText": "English"}), None),
        ]}}
    });
    mount_player(&server, ResponseTemplate::new(200).set_body_json(player)).await;

    Mock::given(method("GET"))
        .and(path("/api/timedtext"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<?xml version="1.0" encoding="utf-8" ?><timedtext format="3"><body><p t="0" d="1000">hi</p></body></timedtext>"#,
        ))
        .mount(&server)
        .await;

    let err = pipeline(&server).resolve_transcript(ID, None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ServerError);
}

#[tokio::test]
async fn invalid_input_makes_no_requests() {
    let server = MockServer::start().await;

    let err = pipeline(&server)
        .resolve_transcript("not a url at all", None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidUrl);

    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
}
