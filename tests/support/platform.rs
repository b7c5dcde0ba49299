//! Mock platform endpoints shared by integration tests.

use derivative_core::download::resource_path;
use derivative_core::manifest::manifest_path;
use derivative_core::{ApsClient, Credentials, DocumentSource, HttpTimeouts, RunConfig};
use serde_json::{Value, json};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Base64url-style document urn (no characters that need escaping).
pub const DOC_URN: &str = "dXJuOmFkc2sud2lwcHJvZDpmcy5maWxlOnZmLkxiQndYWDhJUU0yLVc4bnRTdHRDR0E";

pub const CLIENT_ID: &str = "test-client-id";
pub const CLIENT_SECRET: &str = "test-client-secret";
/// `base64("test-client-id:test-client-secret")`
pub const BASIC_AUTH: &str = "Basic dGVzdC1jbGllbnQtaWQ6dGVzdC1jbGllbnQtc2VjcmV0";
pub const ACCESS_TOKEN: &str = "test-access-token";

pub fn credentials() -> Credentials {
    Credentials::new(CLIENT_ID, CLIENT_SECRET)
}

pub fn client_for(server: &MockServer) -> ApsClient {
    ApsClient::new(&server.uri(), HttpTimeouts::default()).expect("client builds")
}

pub fn config_for(server: &MockServer, download_root: &std::path::Path) -> RunConfig {
    RunConfig::new(credentials())
        .with_base_url(server.uri())
        .with_document(DocumentSource::Urn(DOC_URN.to_string()))
        .with_download_root(download_root)
}

pub async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/authentication/v2/token"))
        .and(header("authorization", BASIC_AUTH))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": ACCESS_TOKEN,
            "token_type": "Bearer",
            "expires_in": 3599
        })))
        .mount(server)
        .await;
}

pub async fn mount_manifest(server: &MockServer, document_urn: &str, manifest: Value) {
    Mock::given(method("GET"))
        .and(path(manifest_path(document_urn)))
        .and(header("authorization", format!("Bearer {ACCESS_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(manifest))
        .mount(server)
        .await;
}

pub async fn mount_resource(server: &MockServer, resource_urn: &str, status: u16, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(resource_path(DOC_URN, resource_urn)))
        .and(header("authorization", format!("Bearer {ACCESS_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(status).set_body_bytes(body.to_vec()))
        .mount(server)
        .await;
}

pub fn resource_node(role: &str, urn: &str) -> Value {
    json!({ "guid": format!("guid-{urn}"), "role": role, "type": "resource", "urn": urn })
}

pub fn thumbnail_node(urn: &str, size: u32) -> Value {
    json!({
        "guid": format!("guid-{urn}"),
        "role": "thumbnail",
        "type": "resource",
        "urn": urn,
        "mime": "image/png",
        "resolution": [size, size]
    })
}

pub fn viewable(name: &str, children: Vec<Value>) -> Value {
    json!({ "guid": format!("guid-{name}"), "name": name, "role": "2d", "type": "geometry", "children": children })
}

pub fn manifest(viewables: Vec<Value>) -> Value {
    json!({
        "type": "manifest",
        "urn": DOC_URN,
        "status": "success",
        "progress": "complete",
        "region": "US",
        "derivatives": [{
            "name": "document.pdf",
            "outputType": "svf2",
            "status": "success",
            "progress": "complete",
            "children": viewables
        }]
    })
}

pub fn doc_resource(suffix: &str) -> String {
    format!("{DOC_URN}/{suffix}")
}
