use super::common;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use proposal::MockGenerator;

fn extract_data_uri(html: &str) -> &str {
    let marker = "href=\"data:application/pdf;base64,";
    let start = html.find(marker).expect("download link") + marker.len();
    let end = html[start..].find('"').expect("closing quote") + start;
    &html[start..end]
}

#[tokio::test]
async fn e2e_jane_submission_shows_text_and_download() {
    let server = common::spawn_server(MockGenerator::with_text("Proposal body X")).await;

    let resp = common::post_form(&server.url("/proposal"), &common::jane_form()).await;
    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();

    assert!(html.contains("Proposal Generated Successfully!"));
    assert!(html.contains("<pre class=\"proposal\">Proposal body X</pre>"));
    assert!(html.contains("download=\"Jane_proposal.pdf\""));
    let pdf = STANDARD.decode(extract_data_uri(&html)).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
    assert!(common::contains(&pdf, b"Proposal body X"));
    assert_eq!(server.generator.calls(), 1);

    server.stop().await;
}

#[tokio::test]
async fn e2e_missing_fields_show_banner_without_generation() {
    let server = common::spawn_server(MockGenerator::with_text("never")).await;

    let resp = common::post_form(
        &server.url("/proposal"),
        &[("name", "Jane"), ("company", ""), ("industry", "Travel")],
    )
    .await;
    assert_eq!(resp.status(), 422);
    let html = resp.text().await.unwrap();

    assert!(html.contains("Please fill in all required fields in the sidebar."));
    assert!(html.contains("banner error"));
    assert!(!html.contains("Proposal Generated Successfully!"));
    assert!(!html.contains("Download Proposal as PDF"));
    assert!(html.contains("value=\"Jane\""));
    assert_eq!(server.generator.calls(), 0);

    server.stop().await;
}

#[tokio::test]
async fn e2e_generation_failure_shows_error_banner_and_no_pdf() {
    let server = common::spawn_server(MockGenerator::failing("upstream unavailable")).await;

    let resp = common::post_form(&server.url("/proposal"), &common::jane_form()).await;
    assert_eq!(resp.status(), 502);
    let html = resp.text().await.unwrap();

    assert!(html.contains(
        "An error occurred while generating the proposal: OpenAI API error: upstream unavailable"
    ));
    assert!(!html.contains("Proposal Generated Successfully!"));
    assert!(!html.contains("data:application/pdf"));

    server.stop().await;
}

#[tokio::test]
async fn e2e_multi_select_values_reach_the_prompt() {
    let server = common::spawn_server(MockGenerator::with_text("ok")).await;

    let resp = common::post_form(
        &server.url("/proposal"),
        &[
            ("name", "Raj"),
            ("company", "Globex"),
            ("industry", "Merchant Payments"),
            ("use_cases", "Pay In"),
            ("use_cases", "Fraud Detection"),
            ("currencies", "INR"),
            ("currencies", "GBP"),
            ("notes", "detailed reporting"),
        ],
    )
    .await;
    assert_eq!(resp.status(), 200);

    let prompt = server.generator.last_prompt().unwrap();
    assert!(prompt.contains("Industry: Merchant Payments"));
    assert!(prompt.contains("Use Cases: Pay In, Fraud Detection"));
    assert!(prompt.contains("Required Currencies: INR, GBP"));
    assert!(prompt.contains("Additional Requirements: detailed reporting"));

    server.stop().await;
}
