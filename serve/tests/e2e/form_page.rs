use super::common;
use proposal::MockGenerator;

#[tokio::test]
async fn e2e_index_renders_sidebar_form() {
    let server = common::spawn_server(MockGenerator::with_text("unused")).await;

    let resp = reqwest::get(server.url("/")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    eprintln!("[e2e] received {} bytes of html", html.len());

    assert!(html.contains("Lead Information"));
    for field in ["name=\"name\"", "name=\"company\"", "name=\"industry\"", "name=\"use_cases\"", "name=\"currencies\"", "name=\"notes\""] {
        assert!(html.contains(field), "missing form field {field}");
    }
    assert!(html.contains("Generate Proposal"));
    assert!(!html.contains("Download Proposal as PDF"));
    assert_eq!(server.generator.calls(), 0);

    server.stop().await;
}
