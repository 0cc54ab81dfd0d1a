use super::common;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use proposal::MockGenerator;
use serde_json::{json, Value};

#[tokio::test]
async fn e2e_api_returns_text_filename_and_pdf() {
    let server = common::spawn_server(MockGenerator::with_text("Proposal body X")).await;

    let resp = reqwest::Client::new()
        .post(server.url("/api/proposals"))
        .json(&json!({
            "name": "Jane",
            "company": "Acme",
            "industry": "Travel",
            "use_cases": ["Pay Out"],
            "currencies": ["USD"],
            "notes": ""
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    eprintln!("[e2e] received: proposal={} filename={}", body["proposal"], body["filename"]);

    assert_eq!(body["proposal"], "Proposal body X");
    assert_eq!(body["filename"], "Jane_proposal.pdf");
    let pdf = STANDARD.decode(body["pdf_base64"].as_str().unwrap()).unwrap();
    assert!(common::contains(&pdf, b"Proposal body X"));

    server.stop().await;
}

#[tokio::test]
async fn e2e_api_rejects_unknown_currency() {
    let server = common::spawn_server(MockGenerator::with_text("never")).await;

    let resp = reqwest::Client::new()
        .post(server.url("/api/proposals"))
        .json(&json!({
            "name": "Jane",
            "company": "Acme",
            "use_cases": ["Pay Out"],
            "currencies": ["JPY"]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kind"], "invalid_choice");
    assert_eq!(server.generator.calls(), 0);

    server.stop().await;
}

#[tokio::test]
async fn e2e_api_missing_fields_kind() {
    let server = common::spawn_server(MockGenerator::with_text("never")).await;

    let resp = reqwest::Client::new()
        .post(server.url("/api/proposals"))
        .json(&json!({ "name": "Jane" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kind"], "missing_field");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Company Name, Use Cases, Required Currencies"));

    server.stop().await;
}

#[tokio::test]
async fn e2e_api_generation_failure_is_bad_gateway() {
    let server = common::spawn_server(MockGenerator::failing("timeout")).await;

    let resp = reqwest::Client::new()
        .post(server.url("/api/proposals"))
        .json(&json!({
            "name": "Jane",
            "company": "Acme",
            "use_cases": ["Pay Out"],
            "currencies": ["USD"]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 502);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kind"], "generation");
    assert!(body.get("pdf_base64").is_none());

    server.stop().await;
}
