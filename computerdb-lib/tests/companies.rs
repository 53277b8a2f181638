mod common;

use common::MockServer;
use common::Reply;
use computerdb_lib::ComputerDbClient;
use computerdb_lib::api::PageRequest;

#[tokio::test]
async fn test_companies_use_sibling_endpoint() {
    let server = MockServer::start(|req| match req.path.as_str() {
        "/ComputerDatabase/api/companies" => Reply::json(
            200,
            r#"[{"id":1,"name":"Apple Inc."},{"id":2,"name":"Thinking Machines"}]"#,
        ),
        "/ComputerDatabase/api/companies/2" => {
            Reply::json(200, r#"{"id":2,"name":"Thinking Machines"}"#)
        }
        _ => Reply::json(404, ""),
    })
    .await;

    let client = ComputerDbClient::builder()
        .endpoint(server.url("/ComputerDatabase/api/computers"))
        .build()
        .unwrap();

    let page = client.list_companies(PageRequest::new(0, 20)).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page.records()[1].name, "Thinking Machines");

    let company = client.get_company(2).await.unwrap().unwrap();
    assert_eq!(company.id, 2);
    assert_eq!(client.get_company(99).await.unwrap(), None);

    assert_eq!(
        server.requests()[0].query.as_deref(),
        Some("page=0&pageSize=20")
    );
}
