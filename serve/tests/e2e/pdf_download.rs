use super::common;
use proposal::MockGenerator;

#[tokio::test]
async fn e2e_pdf_route_returns_attachment() {
    let server = common::spawn_server(MockGenerator::with_text("Proposal body X")).await;

    let resp = common::post_form(&server.url("/proposal.pdf"), &common::jane_form()).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["content-type"], "application/pdf");
    assert_eq!(
        resp.headers()["content-disposition"],
        "attachment; filename=\"Jane_proposal.pdf\""
    );
    let bytes = resp.bytes().await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert!(common::contains(&bytes, b"Proposal body X"));

    server.stop().await;
}

#[tokio::test]
async fn e2e_pdf_route_reports_generation_error_as_page() {
    let server = common::spawn_server(MockGenerator::failing("boom")).await;

    let resp = common::post_form(&server.url("/proposal.pdf"), &common::jane_form()).await;
    assert_eq!(resp.status(), 502);
    assert!(resp.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    server.stop().await;
}
