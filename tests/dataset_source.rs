//! Loading datasets over HTTP.

use skillbook::catalog::{CatalogError, DataSource, LoadError, MAX_DATASET_SIZE};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const VALID: &str = r#"{
    "WAR": {"name_tw": "Warrior", "skills": [{"id": "heavy_swing", "name_tw": "Heavy Swing", "level": 1}]},
    "WHM": {"name_tw": "White Mage", "skills": [{"id": "stone", "name_tw": "Stone", "level": 1}]}
}"#;

async fn serve(template: ResponseTemplate) -> (MockServer, DataSource) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/jobs.json"))
        .respond_with(template)
        .mount(&server)
        .await;
    let source = DataSource::parse(&format!("{}/data/jobs.json", server.uri())).unwrap();
    (server, source)
}

#[tokio::test]
async fn test_remote_dataset_loads_in_order() {
    let (_server, source) = serve(
        ResponseTemplate::new(200)
            .set_body_string(VALID)
            .insert_header("Content-Type", "application/json"),
    )
    .await;
    assert!(matches!(source, DataSource::Remote(_)));

    let index = source.load(&reqwest::Client::new()).await.unwrap();
    let ids: Vec<&str> = index.categories().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["WAR", "WHM"]);
    assert_eq!(index.skill_count(), 2);
}

#[tokio::test]
async fn test_remote_404_is_status_error() {
    let (_server, source) = serve(ResponseTemplate::new(404)).await;

    let result = source.load(&reqwest::Client::new()).await;
    assert!(matches!(result, Err(LoadError::HttpStatus(404))));
}

#[tokio::test]
async fn test_remote_malformed_json_is_parse_error() {
    let (_server, source) = serve(ResponseTemplate::new(200).set_body_string("[1, 2, 3]")).await;

    let result = source.load(&reqwest::Client::new()).await;
    assert!(matches!(
        result,
        Err(LoadError::Catalog(CatalogError::Parse(_)))
    ));
}

#[tokio::test]
async fn test_remote_oversized_body_rejected() {
    let body = vec![b' '; MAX_DATASET_SIZE + 1];
    let (_server, source) = serve(ResponseTemplate::new(200).set_body_bytes(body)).await;

    let result = source.load(&reqwest::Client::new()).await;
    assert!(matches!(result, Err(LoadError::TooLarge(_))));
}
