use pix_navigator::{
    AppConfig,
    dataset::{DatasetClient, parse_records},
    error::DatasetError,
};

#[test]
fn test_records_keep_unknown_columns() {
    let body = r#"[
        {"provider_name": "Mercy Clinic", "city": "Springfield", "zip": "65802"},
        {"city": "Nowhere"}
    ]"#;

    let records = parse_records(body).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name(), "Mercy Clinic");
    assert_eq!(records[0].fields["city"], "Springfield");
    assert!(!records[0].fields.contains_key("provider_name"));
    assert_eq!(records[1].provider_name, None);
    assert_eq!(records[1].name(), "-");
}

#[test]
fn test_odd_provider_name_does_not_drop_the_batch() {
    let body = r#"[
        {"provider_name": "Mercy"},
        {"provider_name": 123, "zip": "1"},
        {"provider_name": null},
        {"provider_name": {"legal": "Acme LLC"}}
    ]"#;

    let records = parse_records(body).unwrap();

    assert_eq!(records.len(), 4);
    assert_eq!(records[0].name(), "Mercy");
    assert_eq!(records[1].name(), "123");
    assert_eq!(records[1].fields["zip"], "1");
    assert_eq!(records[2].name(), "-");
    assert_eq!(records[3].name(), "{\"legal\":\"Acme LLC\"}");
}

#[test]
fn test_columns_keep_response_order() {
    let records = parse_records(r#"[{"zip": "1", "city": "A", "provider_name": "P"}]"#).unwrap();

    assert_eq!(records[0].render(), "{\"provider_name\":\"P\",\"zip\":\"1\",\"city\":\"A\"}\nP");
}

#[test]
fn test_render_prints_record_then_name() {
    let records = parse_records(r#"[{"provider_name": "Mercy", "zip": "1"}, {"zip": "2"}]"#).unwrap();

    assert_eq!(
        records[0].render(),
        "{\"provider_name\":\"Mercy\",\"zip\":\"1\"}\nMercy"
    );
    assert_eq!(records[1].render(), "{\"zip\":\"2\"}\n-");
}

#[test]
fn test_non_array_body_is_a_decode_error() {
    let err = parse_records(r#"{"error": "throttled"}"#).unwrap_err();
    assert!(matches!(err, DatasetError::Decode(_)));
}

#[test]
fn test_request_carries_limit() {
    let config = AppConfig::default();
    let client = DatasetClient::from_config(&config);

    let request = client.build_request().unwrap();

    assert_eq!(request.method(), reqwest::Method::GET);
    assert!(request.url().as_str().starts_with(&config.dataset_url));
    let limit: Vec<(String, String)> = request.url().query_pairs().into_owned().collect();
    assert_eq!(limit, vec![("$limit".to_string(), "10000".to_string())]);
}

#[test]
fn test_invalid_url_is_reported() {
    let client = DatasetClient::new("not a url", 10);
    assert!(matches!(client.build_request(), Err(DatasetError::Http(_))));
}
