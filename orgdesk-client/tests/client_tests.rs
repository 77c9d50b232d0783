//! HTTP tests for the organization API client.
//!
//! These tests run the client against a wiremock server and check the request
//! shapes it sends and how it maps responses and failures.

use orgdesk_client::{OrganizationClient, OrganizationService, ServiceEndpoint, ServiceError};
use orgdesk_org::{CreateOrganizationData, OrganizationRole, Plan, UpdateOrganizationData};
use serde_json::json;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::fmt::MakeWriter;
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Client configured for the mock server.
async fn setup() -> (MockServer, OrganizationClient) {
    let server = MockServer::start().await;
    let endpoint = ServiceEndpoint {
        base_url: server.uri(),
        api_token: Some("test-token".to_string()),
    };
    let client = OrganizationClient::new(endpoint, Duration::from_secs(5)).unwrap();
    (server, client)
}

fn organization_json(id: Uuid, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "email": "contact@acme.com",
        "created_at": "2024-01-15T10:00:00Z",
        "updated_at": "2024-01-15T10:00:00Z",
    })
}

#[tokio::test]
async fn test_create_organization_sends_trimmed_payload() {
    let (server, client) = setup().await;
    let id = Uuid::now_v7();

    Mock::given(method("POST"))
        .and(path("/api/organizations"))
        .and(header("Authorization", "Bearer test-token"))
        .and(body_json(json!({ "name": "Acme Inc", "email": "contact@acme.com" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(organization_json(id, "Acme Inc")))
        .expect(1)
        .mount(&server)
        .await;

    let org = client
        .create_organization(CreateOrganizationData {
            name: "Acme Inc".to_string(),
            email: "contact@acme.com".to_string(),
            address: None,
            phone: None,
        })
        .await
        .unwrap();

    assert_eq!(org.id, id);
    assert_eq!(org.name, "Acme Inc");
    assert!(org.created_at.is_some());
}

#[tokio::test]
async fn test_update_organization_omits_empty_fields() {
    let (server, client) = setup().await;
    let id = Uuid::now_v7();

    Mock::given(method("PUT"))
        .and(path(format!("/api/organizations/{}", id)))
        .and(body_json(json!({ "name": "Acme Group", "email": "contact@acme.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(organization_json(id, "Acme Group")))
        .expect(1)
        .mount(&server)
        .await;

    let org = client
        .update_organization(
            id,
            UpdateOrganizationData {
                name: Some("Acme Group".to_string()),
                email: Some("contact@acme.com".to_string()),
                address: None,
                phone: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(org.name, "Acme Group");
}

#[tokio::test]
async fn test_update_unknown_organization_is_not_found() {
    let (server, client) = setup().await;
    let id = Uuid::now_v7();

    Mock::given(method("PUT"))
        .and(path(format!("/api/organizations/{}", id)))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client
        .update_organization(id, UpdateOrganizationData::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(ref found) if *found == id.to_string()));
}

#[tokio::test]
async fn test_delete_organization() {
    let (server, client) = setup().await;
    let id = Uuid::now_v7();

    Mock::given(method("DELETE"))
        .and(path(format!("/api/organizations/{}", id)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_organization(id).await.unwrap();
}

#[tokio::test]
async fn test_delete_forbidden_surfaces_backend_message() {
    let (server, client) = setup().await;
    let id = Uuid::now_v7();

    Mock::given(method("DELETE"))
        .and(path(format!("/api/organizations/{}", id)))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({ "error": "Seul le propriétaire peut supprimer" })),
        )
        .mount(&server)
        .await;

    let err = client.delete_organization(id).await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.to_string(), "Seul le propriétaire peut supprimer");
}

#[tokio::test]
async fn test_add_user_by_email() {
    let (server, client) = setup().await;
    let org_id = Uuid::now_v7();

    Mock::given(method("POST"))
        .and(path(format!("/api/organizations/{}/users", org_id)))
        .and(body_json(json!({ "email": "paul@acme.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "User added",
            "user": { "id": Uuid::now_v7(), "name": "Paul Durand", "email": "paul@acme.com", "role": "member" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client.add_user_by_email(org_id, "paul@acme.com").await.unwrap();
    assert_eq!(response.user.name, "Paul Durand");
    assert_eq!(response.user.role, Some(OrganizationRole::Member));
}

#[tokio::test]
async fn test_add_user_without_account_keeps_message() {
    let (server, client) = setup().await;
    let org_id = Uuid::now_v7();

    Mock::given(method("POST"))
        .and(path(format!("/api/organizations/{}/users", org_id)))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "message": "Aucun utilisateur trouvé avec cet email" })),
        )
        .mount(&server)
        .await;

    let err = client
        .add_user_by_email(org_id, "ghost@acme.com")
        .await
        .unwrap_err();

    assert_eq!(
        err.user_message().as_deref(),
        Some("Aucun utilisateur trouvé avec cet email")
    );
}

#[tokio::test]
async fn test_get_organization_members() {
    let (server, client) = setup().await;
    let org_id = Uuid::now_v7();

    Mock::given(method("GET"))
        .and(path(format!("/api/organizations/{}/members", org_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "members": [
                { "id": Uuid::now_v7(), "name": "Jeanne", "email": "jeanne@acme.com", "role": "owner" },
                { "id": Uuid::now_v7(), "name": "Paul", "email": "paul@acme.com", "role": "member" }
            ]
        })))
        .mount(&server)
        .await;

    let members = client.get_organization_members(org_id).await.unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].role, OrganizationRole::Owner);
}

#[tokio::test]
async fn test_get_user_organization() {
    let (server, client) = setup().await;
    let id = Uuid::now_v7();

    let mut body = organization_json(id, "Acme Inc");
    body["role"] = json!("admin");
    body["plan"] = json!("enterprise");
    body["memberCount"] = json!(7);
    body["avatar"] = json!("AI");

    Mock::given(method("GET"))
        .and(path("/api/organizations/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let summary = client.get_user_organization().await.unwrap().unwrap();
    assert_eq!(summary.id(), id);
    assert_eq!(summary.role, OrganizationRole::Admin);
    assert_eq!(summary.plan, Plan::Enterprise);
    assert_eq!(summary.member_count, 7);
}

#[tokio::test]
async fn test_get_user_organization_none() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/organizations/me"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(client.get_user_organization().await.unwrap().is_none());
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication_failed() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/organizations/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client.get_user_organization().await.unwrap_err();
    assert!(matches!(err, ServiceError::AuthenticationFailed));
}

#[tokio::test]
async fn test_plain_text_error_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/organizations"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&server)
        .await;

    let err = client
        .create_organization(CreateOrganizationData {
            name: "Acme".to_string(),
            email: "a@b.com".to_string(),
            address: None,
            phone: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Api { status: 500, .. }));
    assert_eq!(err.to_string(), "database unavailable");
}

#[tokio::test]
async fn test_invalid_success_body() {
    let (server, client) = setup().await;
    let id = Uuid::now_v7();

    Mock::given(method("GET"))
        .and(path(format!("/api/organizations/{}/members", id)))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client.get_organization_members(id).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidResponse(_)));
}

/// Log sink shared with a test subscriber.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock().unwrap())
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn test_add_user_logs_email_as_field() {
    let (server, client) = setup().await;
    let org_id = Uuid::now_v7();

    Mock::given(method("POST"))
        .and(path(format!("/api/organizations/{}/users", org_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": { "name": "Paul Durand", "email": "paul@acme.com" }
        })))
        .mount(&server)
        .await;

    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(logs.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    client.add_user_by_email(org_id, "paul@acme.com").await.unwrap();

    let lines = logs.lines();
    let line = lines
        .iter()
        .find(|l| l.contains("Adding member"))
        .expect("add-member debug line");
    assert!(line.contains("email=paul@acme.com"));
    assert!(line.contains(&format!("organization_id={}", org_id)));
    assert!(!line.contains("Adding paul@acme.com"));
}
