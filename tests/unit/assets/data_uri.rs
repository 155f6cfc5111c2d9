use super::*;

#[test]
fn base64_round_trip() {
    let uri = encode_data_uri("image/png", &[0, 1, 2, 250, 255]);
    assert!(uri.starts_with("data:image/png;base64,"));
    let parsed = parse_data_uri(&uri).unwrap();
    assert_eq!(parsed.media_type, "image/png");
    assert_eq!(parsed.bytes, vec![0, 1, 2, 250, 255]);
}

#[test]
fn percent_encoded_payload() {
    let parsed =
        parse_data_uri("data:image/svg+xml;charset=utf-8,%3Csvg%3E%3C/svg%3E").unwrap();
    assert_eq!(parsed.media_type, "image/svg+xml");
    assert_eq!(parsed.bytes, b"<svg></svg>".to_vec());
}

#[test]
fn missing_media_type_defaults_to_text() {
    let parsed = parse_data_uri("data:,hello").unwrap();
    assert_eq!(parsed.media_type, "text/plain");
    assert_eq!(parsed.bytes, b"hello".to_vec());
}

#[test]
fn malformed_uris_are_errors() {
    assert!(parse_data_uri("image.png").is_err());
    assert!(parse_data_uri("data:image/png;base64").is_err());
    assert!(parse_data_uri("data:image/png;base64,@@@").is_err());
    assert!(parse_data_uri("data:text/plain,%G1").is_err());
    assert!(parse_data_uri("data:text/plain,%4").is_err());
}

#[test]
fn scheme_check_is_case_insensitive() {
    assert!(is_data_uri("DATA:image/png;base64,AA=="));
    assert!(!is_data_uri("dat"));
    assert!(!is_data_uri("./data:thing"));
}
