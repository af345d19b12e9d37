use super::*;

fn config() -> FirestoreConfig {
    FirestoreConfig::new("admin-portal", "key-123")
}

// =============================================================
// URLs
// =============================================================

#[test]
fn list_url_targets_collection_with_page_size_and_key() {
    let url = config().list_url("adminlogin", None).expect("url");
    assert_eq!(
        url,
        "https://firestore.googleapis.com/v1/projects/admin-portal/databases/(default)/documents/adminlogin?pageSize=300&key=key-123"
    );
}

#[test]
fn list_url_encodes_page_token() {
    let url = config().list_url("adminlogin", Some("a+b/c=")).expect("url");
    assert!(url.contains("pageToken=a%2Bb%2Fc%3D"));
}

#[test]
fn patch_url_appends_id_and_update_mask() {
    let url = config().patch_url("adminlogin", "doc 1", ["password"]).expect("url");
    assert_eq!(
        url,
        "https://firestore.googleapis.com/v1/projects/admin-portal/databases/(default)/documents/adminlogin/doc%201?updateMask.fieldPaths=password&key=key-123"
    );
}

#[test]
fn base_url_trailing_slash_is_ignored() {
    let mut cfg = config();
    cfg.base_url = "http://localhost:8080/v1/".to_owned();
    let url = cfg.list_url("adminlogin", None).expect("url");
    assert!(url.starts_with("http://localhost:8080/v1/projects/admin-portal/"));
}

#[test]
fn invalid_base_url_is_config_error() {
    let mut cfg = config();
    cfg.base_url = "not a url".to_owned();
    assert!(matches!(cfg.list_url("adminlogin", None), Err(StoreError::Config(_))));
}

#[test]
fn config_deserializes_with_defaults() {
    let cfg: FirestoreConfig =
        serde_json::from_str(r#"{"project_id":"p","api_key":"k"}"#).expect("config json");
    assert_eq!(cfg.database, DEFAULT_DATABASE);
    assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
}

// =============================================================
// Decoding
// =============================================================

#[test]
fn decode_list_page_extracts_ids_and_string_fields() {
    let body = r#"{
        "documents": [
            {
                "name": "projects/p/databases/(default)/documents/adminlogin/abc",
                "fields": {
                    "email": {"stringValue": "ops@example.com"},
                    "password": {"stringValue": "pw"},
                    "name": {"stringValue": "Ops"},
                    "role": {"stringValue": "owner"}
                }
            },
            {
                "name": "projects/p/databases/(default)/documents/adminlogin/def",
                "fields": {"email": {"stringValue": "dev@example.com"}}
            }
        ],
        "nextPageToken": "next-1"
    }"#;
    let page = decode_list_page(body).expect("page");
    assert_eq!(page.documents.len(), 2);
    assert_eq!(page.documents[0].id, "abc");
    assert_eq!(page.documents[0].fields["role"], "owner");
    assert_eq!(page.documents[1].id, "def");
    assert_eq!(page.next_page_token.as_deref(), Some("next-1"));
}

#[test]
fn decode_list_page_empty_collection() {
    let page = decode_list_page("{}").expect("page");
    assert!(page.documents.is_empty());
    assert_eq!(page.next_page_token, None);
}

#[test]
fn decode_list_page_flattens_scalar_types() {
    let body = r#"{"documents": [{
        "name": "x/adminlogin/n1",
        "fields": {
            "pin": {"integerValue": "42"},
            "active": {"booleanValue": true},
            "score": {"doubleValue": 1.5},
            "note": {"nullValue": null},
            "tags": {"arrayValue": {"values": []}}
        }
    }]}"#;
    let doc = &decode_list_page(body).expect("page").documents[0];
    assert_eq!(doc.fields["pin"], "42");
    assert_eq!(doc.fields["active"], "true");
    assert_eq!(doc.fields["score"], "1.5");
    assert_eq!(doc.fields["note"], "");
    assert!(!doc.fields.contains_key("tags"));
}

#[test]
fn decode_list_page_rejects_malformed_body() {
    assert!(matches!(decode_list_page("[1,2]"), Err(StoreError::Decode(_))));
}

#[test]
fn decode_list_page_rejects_nameless_document() {
    let body = r#"{"documents": [{"name": "x/adminlogin/", "fields": {}}]}"#;
    assert!(matches!(decode_list_page(body), Err(StoreError::Decode(_))));
}

// =============================================================
// Encoding
// =============================================================

#[test]
fn encode_update_body_wraps_values_as_strings() {
    let mut fields = BTreeMap::new();
    fields.insert("password".to_owned(), "abc123".to_owned());
    assert_eq!(
        encode_update_body(&fields),
        serde_json::json!({ "fields": { "password": { "stringValue": "abc123" } } })
    );
}

#[test]
fn error_message_prefers_structured_message() {
    let body = r#"{"error": {"code": 403, "message": "Missing or insufficient permissions.", "status": "PERMISSION_DENIED"}}"#;
    assert_eq!(error_message(body), "Missing or insufficient permissions.");
    assert_eq!(error_message(" plain failure \n"), "plain failure");
}
