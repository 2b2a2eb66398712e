//! Lyric generation through the chat completions client.

mod support;

use std::sync::Arc;

use serde_json::json;
use support::{TEST_KEY, openai_client};
use tracksmartin::TracksError;
use tracksmartin::lyrics::{LyricsGenerator, LyricsRequest, SongLength};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

#[tokio::test]
async fn test_generate_parses_title_tags_and_lyrics() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", format!("Bearer {TEST_KEY}").as_str()))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "max_tokens": 1500
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            "TITLE: Neon Rain\nTAGS: synthwave, dreamy, 100 bpm\n\n[Verse 1]\nCity lights on wet glass\n\n[Chorus]\nNeon rain",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let writer = LyricsGenerator::new(Arc::new(openai_client(&server.uri())));
    let song = writer
        .generate(
            &LyricsRequest::new("late night drive", "electronic")
                .with_mood("wistful")
                .with_length(SongLength::Short),
        )
        .await
        .unwrap();

    assert_eq!(song.title, "Neon Rain");
    assert_eq!(song.tags, "synthwave, dreamy, 100 bpm");
    assert!(song.lyrics.starts_with("[Verse 1]"));
    assert!(song.lyrics.ends_with("Neon rain"));
    assert_eq!(song.genre, "electronic");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["messages"][0]["role"], "system");
    let user = body["messages"][1]["content"].as_str().unwrap();
    assert!(user.contains("late night drive"));
    assert!(user.contains("wistful"));
}

#[tokio::test]
async fn test_missing_markers_fall_back_to_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("[Verse]\nJust the words\n[Chorus]\nLa la")),
        )
        .mount(&server)
        .await;

    let writer = LyricsGenerator::new(Arc::new(openai_client(&server.uri())));
    let song = writer
        .generate(&LyricsRequest::new("summer", "hip-hop"))
        .await
        .unwrap();

    assert_eq!(song.title, "Untitled Hip-Hop Song");
    assert_eq!(song.tags, "hip-hop, original");
}

#[tokio::test]
async fn test_upstream_failure_is_generation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
        })))
        .mount(&server)
        .await;

    let writer = LyricsGenerator::new(Arc::new(openai_client(&server.uri())));
    let err = writer
        .generate(&LyricsRequest::new("rain", "blues"))
        .await
        .unwrap_err();

    match &err {
        TracksError::GenerationError { source } => match source.as_ref() {
            TracksError::ApiError { code, message, .. } => {
                assert_eq!(*code, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("unexpected cause: {other:?}"),
        },
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.status_code(), Some(401));
}

#[tokio::test]
async fn test_empty_reply_is_generation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("TITLE: Only A Title")))
        .mount(&server)
        .await;

    let writer = LyricsGenerator::new(Arc::new(openai_client(&server.uri())));
    let err = writer
        .generate(&LyricsRequest::new("rain", "blues"))
        .await
        .unwrap_err();

    assert!(matches!(err, TracksError::GenerationError { .. }), "{err:?}");
}

#[tokio::test]
async fn test_refine_returns_trimmed_reply_with_model_override() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"model": "gpt-4o"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion("\n\n[Chorus]\nCatchier now\n\n")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let writer =
        LyricsGenerator::new(Arc::new(openai_client(&server.uri()))).with_model("gpt-4o");
    let refined = writer
        .refine("[Chorus]\nPlain", "make the chorus catchier", "pop")
        .await
        .unwrap();

    assert_eq!(refined, "[Chorus]\nCatchier now");
}
