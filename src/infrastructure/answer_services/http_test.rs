use anyhow::Result;
use mockito::Matcher;
use test_utils::fever_answer_fixture;

use super::HttpAnswerService;
use crate::domain::models::AnswerService;
use crate::domain::models::Query;

impl HttpAnswerService {
    fn with_url(url: String) -> HttpAnswerService {
        return HttpAnswerService {
            url,
            timeout: "200".to_string(),
        };
    }
}

#[tokio::test]
async fn it_successfully_health_checks() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(200)
        .create_async()
        .await;

    let service = HttpAnswerService::with_url(server.url());
    let res = service.health_check().await;

    assert!(res.is_ok());
    mock.assert_async().await;
}

#[tokio::test]
async fn it_fails_health_checks() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(500)
        .create_async()
        .await;

    let service = HttpAnswerService::with_url(server.url());
    let res = service.health_check().await;

    assert!(res.is_err());
    mock.assert_async().await;
}

#[tokio::test]
async fn it_fails_health_checks_when_unreachable() {
    let service = HttpAnswerService::with_url("http://127.0.0.1:1".to_string());
    let res = service.health_check().await;

    assert!(res.is_err());
}

#[tokio::test]
async fn it_asks_a_question() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/ask")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(serde_json::json!({"query": "What is fever?"})))
        .with_status(200)
        .with_body(fever_answer_fixture())
        .create_async()
        .await;

    let service = HttpAnswerService::with_url(server.url());
    let answer = service.ask(Query::new("  What is fever?\n")).await?;
    mock.assert_async().await;

    assert_eq!(
        answer.answer,
        "A fever is a temporary increase in your body temperature, often due to an illness."
    );
    assert_eq!(answer.confidence, Some(0.92));

    return Ok(());
}

#[tokio::test]
async fn it_accepts_answers_without_confidence() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/ask")
        .with_status(200)
        .with_body(r#"{"answer":"Rest and fluids."}"#)
        .create_async()
        .await;

    let service = HttpAnswerService::with_url(server.url());
    let answer = service.ask(Query::new("What helps a cold?")).await?;
    mock.assert_async().await;

    assert_eq!(answer.answer, "Rest and fluids.");
    assert_eq!(answer.confidence, None);

    return Ok(());
}

#[tokio::test]
async fn it_clamps_confidence() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/ask")
        .with_status(200)
        .with_body(r#"{"answer":"Sure.","confidence":1.7}"#)
        .create_async()
        .await;

    let service = HttpAnswerService::with_url(server.url());
    let answer = service.ask(Query::new("Really?")).await?;
    mock.assert_async().await;

    assert_eq!(answer.confidence, Some(1.0));

    return Ok(());
}

#[tokio::test]
async fn it_ignores_a_trailing_slash() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/ask")
        .with_status(200)
        .with_body(fever_answer_fixture())
        .create_async()
        .await;

    let service = HttpAnswerService::with_url(format!("{}/", server.url()));
    service.ask(Query::new("What is fever?")).await?;
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_fails_on_server_errors() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/ask")
        .with_status(500)
        .with_body(r#"{"detail":"Internal Server Error"}"#)
        .create_async()
        .await;

    let service = HttpAnswerService::with_url(server.url());
    let res = service.ask(Query::new("What is fever?")).await;
    mock.assert_async().await;

    insta::assert_snapshot!(res.unwrap_err().to_string(), @"Answer service responded with status 500");
}

#[tokio::test]
async fn it_fails_on_a_missing_answer() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/ask")
        .with_status(200)
        .with_body(r#"{"confidence":0.5}"#)
        .create_async()
        .await;

    let service = HttpAnswerService::with_url(server.url());
    let res = service.ask(Query::new("What is fever?")).await;
    mock.assert_async().await;

    assert!(res
        .unwrap_err()
        .to_string()
        .starts_with("Malformed response from the answer service"));
}

#[tokio::test]
async fn it_fails_on_a_string_confidence() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/ask")
        .with_status(200)
        .with_body(r#"{"answer":"A fever is...","confidence":"high"}"#)
        .create_async()
        .await;

    let service = HttpAnswerService::with_url(server.url());
    let res = service.ask(Query::new("What is fever?")).await;
    mock.assert_async().await;

    assert!(res.is_err());
}

#[tokio::test]
async fn it_fails_on_a_non_json_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/ask")
        .with_status(200)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let service = HttpAnswerService::with_url(server.url());
    let res = service.ask(Query::new("What is fever?")).await;
    mock.assert_async().await;

    assert!(res.is_err());
}

#[tokio::test]
async fn it_fails_when_unreachable() {
    let service = HttpAnswerService::with_url("http://127.0.0.1:1".to_string());
    let res = service.ask(Query::new("What is fever?")).await;

    assert!(res.is_err());
}
