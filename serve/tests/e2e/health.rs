use super::common;
use proposal::MockGenerator;

#[tokio::test]
async fn e2e_health_is_ok() {
    let server = common::spawn_server(MockGenerator::with_text("unused")).await;

    let resp = reqwest::get(server.url("/health")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "ok");

    server.stop().await;
}
