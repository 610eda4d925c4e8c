//! Integration tests for the AlumniConnect backend.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::backend::{Backend, HttpBackend, MemoryBackend};
use crate::config::Config;
use crate::errors::AppError;
use crate::store::query::{Direction, FilterSpec, ListQuery};
use crate::store::JsonStore;
use crate::{create_router, AppState};

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
}

impl TestFixture {
    async fn new() -> Self {
        Self::with_options(Some("test-admin-token".to_string()), seed_document()).await
    }

    async fn with_options(admin_token: Option<String>, seed: Value) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let seed_file = temp_dir.path().join("seed.json");
        tokio::fs::write(&seed_file, seed.to_string())
            .await
            .expect("Failed to write seed");

        let store = JsonStore::load(&seed_file, false)
            .await
            .expect("Failed to load store");

        let config = Config {
            admin_token: admin_token.clone(),
            seed_file,
            api_base_url: None,
            persist_seed: false,
            mock_delay: Duration::ZERO,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
        };

        let state = AppState {
            backend: Arc::new(MemoryBackend::new(store, Duration::ZERO)),
            config: Arc::new(config),
        };

        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server; the temp dir can be dropped once the store is loaded
        tokio::spawn(async move {
            let _temp_dir = temp_dir;
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(Duration::from_millis(100)).await;

        let mut client_builder = Client::builder();
        if let Some(token) = admin_token {
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert("x-api-key", token.parse().unwrap());
            client_builder = client_builder.default_headers(headers);
        }

        TestFixture {
            client: client_builder.build().unwrap(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Seed document used by most tests: 12 chapters, 3 events, 2 sponsors,
/// 1 question, 1 opportunity.
fn seed_document() -> Value {
    let chapters: Vec<Value> = (1..=12)
        .map(|i| {
            json!({
                "id": format!("ch-{}", i),
                "name": format!("Chapter {}", i),
                "city": format!("City {}", i),
                "status": if i % 2 == 0 { "active" } else { "pending" },
                "memberCount": i,
                "createdAt": "2025-01-01T00:00:00Z",
                "updatedAt": "2025-01-01T00:00:00Z",
            })
        })
        .collect();

    json!({
        "events": [
            {
                "id": "ev-1",
                "title": "Homecoming Gala",
                "description": "Annual reunion dinner",
                "date": "2026-10-03T18:00:00Z",
                "location": "Alumni Hall",
                "category": "social",
                "status": "published",
                "rsvpCount": 0,
                "capacity": 2,
                "createdAt": "2025-01-01T00:00:00Z",
                "updatedAt": "2025-01-01T00:00:00Z",
            },
            {
                "id": "ev-2",
                "title": "Career Fair",
                "description": "Meet partner companies",
                "date": "2026-04-11T09:00:00Z",
                "location": "Main Campus",
                "category": "career",
                "status": "published",
                "rsvpCount": 5,
                "createdAt": "2025-01-01T00:00:00Z",
                "updatedAt": "2025-01-01T00:00:00Z",
            },
            {
                "id": "ev-3",
                "title": "Mentor Mixer",
                "date": "2026-06-20T17:00:00Z",
                "status": "draft",
                "rsvpCount": 0,
                "createdAt": "2025-01-01T00:00:00Z",
                "updatedAt": "2025-01-01T00:00:00Z",
            },
        ],
        "chapters": chapters,
        "sponsors": [
            { "id": "sp-1", "name": "Acme Corp", "tier": "gold", "active": true,
              "createdAt": "2025-01-01T00:00:00Z", "updatedAt": "2025-01-01T00:00:00Z" },
            { "id": "sp-2", "name": "Globex", "tier": "silver", "active": true,
              "createdAt": "2025-01-01T00:00:00Z", "updatedAt": "2025-01-01T00:00:00Z" },
        ],
        "qa": [
            { "id": "qa-1", "question": "How do I update my chapter?", "answered": false,
              "upvotes": 3, "tags": ["chapters"],
              "createdAt": "2025-01-01T00:00:00Z", "updatedAt": "2025-01-01T00:00:00Z" },
        ],
        "opportunities": [
            { "id": "op-1", "title": "Backend Engineer", "type": "job", "status": "open",
              "partnerId": "pa-1",
              "createdAt": "2025-01-01T00:00:00Z", "updatedAt": "2025-01-01T00:00:00Z" },
        ],
    })
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_reads_are_open_without_token() {
    let fixture = TestFixture::new().await;

    // Plain client without the admin token
    let client = Client::new();
    let resp = client
        .get(fixture.url("/api/events"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_writes_require_token() {
    let fixture = TestFixture::new().await;

    let client = Client::new();
    let resp = client
        .post(fixture.url("/api/events"))
        .json(&json!({ "title": "Intruder", "date": "2026-01-01T00:00:00Z" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_writes_reject_wrong_token() {
    let fixture = TestFixture::new().await;

    let client = Client::new();
    let resp = client
        .delete(fixture.url("/api/events/ev-1"))
        .header("x-api-key", "wrong-token")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_writes_accept_bearer_token() {
    let fixture = TestFixture::new().await;

    let client = Client::new();
    let resp = client
        .post(fixture.url("/api/chapters/ch-1/activate"))
        .header("authorization", "Bearer test-admin-token")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["status"], "active");
}

#[tokio::test]
async fn test_writes_open_when_no_token_configured() {
    let fixture = TestFixture::with_options(None, seed_document()).await;

    let resp = fixture
        .client
        .post(fixture.url("/api/qa"))
        .json(&json!({ "question": "Is dev mode open?" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_event_crud_flow() {
    let fixture = TestFixture::new().await;

    // Create
    let resp = fixture
        .client
        .post(fixture.url("/api/events"))
        .json(&json!({
            "title": "Winter Meetup",
            "date": "2026-12-05T18:00:00Z",
            "location": "Downtown",
            "tags": ["networking"],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "draft");
    assert_eq!(body["data"]["rsvpCount"], 0);
    let id = body["data"]["id"].as_str().unwrap().to_string();
    let created_at = body["data"]["createdAt"].as_str().unwrap().to_string();

    // Get
    let resp = fixture
        .client
        .get(fixture.url(&format!("/api/events/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["title"], "Winter Meetup");

    // Replace keeps id and createdAt
    let resp = fixture
        .client
        .put(fixture.url(&format!("/api/events/{}", id)))
        .json(&json!({
            "title": "Winter Meetup 2.0",
            "date": "2026-12-06T18:00:00Z",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["id"], id.as_str());
    assert_eq!(body["data"]["title"], "Winter Meetup 2.0");
    assert_eq!(body["data"]["createdAt"], created_at.as_str());
    // Replaced body has no location
    assert!(body["data"].get("location").is_none());

    // Patch is a shallow merge
    let resp = fixture
        .client
        .patch(fixture.url(&format!("/api/events/{}", id)))
        .json(&json!({ "location": "Uptown" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["location"], "Uptown");
    assert_eq!(body["data"]["title"], "Winter Meetup 2.0");
    assert_ne!(body["data"]["updatedAt"], "2025-01-01T00:00:00Z");

    // Delete
    let resp = fixture
        .client
        .delete(fixture.url(&format!("/api/events/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // Gone
    let resp = fixture
        .client
        .get(fixture.url(&format!("/api/events/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_create_event_validation() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/events"))
        .json(&json!({ "title": "   ", "date": "2026-01-01T00:00:00Z" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_missing_record_is_404() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/sponsors/sp-999"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_chapter_pagination() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/chapters?page=2&limit=5&sort=memberCount&order=asc"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 5);
    assert_eq!(items[0]["id"], "ch-6");
    assert_eq!(items[4]["id"], "ch-10");
    assert_eq!(body["pagination"]["total"], 12);
    assert_eq!(body["pagination"]["totalPages"], 3);
    assert_eq!(body["pagination"]["page"], 2);
}

#[tokio::test]
async fn test_pagination_out_of_range_page_is_empty() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/chapters?page=9&limit=5"))
        .send()
        .await
        .unwrap();

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert!(body["data"].as_array().unwrap().is_empty());
    assert_eq!(body["pagination"]["total"], 12);
}

#[tokio::test]
async fn test_event_status_filter_is_exact() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/events?status=published"))
        .send()
        .await
        .unwrap();

    let body: Value = resp.json().await.unwrap();
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    for item in items {
        assert_eq!(item["status"], "published");
    }
}

#[tokio::test]
async fn test_event_free_text_search() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/events?q=career"))
        .send()
        .await
        .unwrap();

    let body: Value = resp.json().await.unwrap();
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "ev-2");
}

#[tokio::test]
async fn test_list_sorted_descending() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/chapters?limit=12&sort=memberCount&order=desc"))
        .send()
        .await
        .unwrap();

    let body: Value = resp.json().await.unwrap();
    let items = body["data"].as_array().unwrap();
    assert_eq!(items[0]["id"], "ch-12");
    assert_eq!(items[11]["id"], "ch-1");
}

#[tokio::test]
async fn test_publish_event() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/events/ev-3/publish"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["status"], "published");
    assert_eq!(body["message"], "Event published");
}

#[tokio::test]
async fn test_rsvp_increments_until_capacity() {
    let fixture = TestFixture::new().await;

    // ev-1 has capacity 2
    for expected in 1..=2 {
        let resp = fixture
            .client
            .post(fixture.url("/api/events/ev-1/rsvp"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["data"]["rsvpCount"], expected);
    }

    let resp = fixture
        .client
        .post(fixture.url("/api/events/ev-1/rsvp"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_batch_delete_skips_missing_ids() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/events/batch-delete"))
        .json(&json!({ "ids": ["ev-1", "ev-404", "ev-2"] }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["deleted"], 2);
}

#[tokio::test]
async fn test_answer_question() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/qa/qa-1/answer"))
        .json(&json!({ "answer": "Use the chapter settings page.", "answeredBy": "u-7" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["answered"], true);
    assert_eq!(body["data"]["answer"], "Use the chapter settings page.");
    assert_eq!(body["data"]["answeredBy"], "u-7");
    assert!(body["data"]["answeredAt"].is_string());
}

#[tokio::test]
async fn test_close_opportunity() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/opportunities/op-1/close"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["status"], "closed");
}

#[tokio::test]
async fn test_patch_cannot_change_id() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .patch(fixture.url("/api/sponsors/sp-1"))
        .json(&json!({ "id": "sp-evil", "tier": "platinum" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["id"], "sp-1");
    assert_eq!(body["data"]["tier"], "platinum");
}

#[tokio::test]
async fn test_user_validation_requires_email() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/users"))
        .json(&json!({ "name": "Sam Alumni", "email": "not-an-email" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

/// A fixture server with open writes, plus an `HttpBackend` delegating to it.
async fn http_backend_fixture() -> (TestFixture, HttpBackend) {
    let fixture = TestFixture::with_options(None, seed_document()).await;
    let backend = HttpBackend::new(format!("{}/api", fixture.base_url));
    (fixture, backend)
}

#[tokio::test]
async fn test_http_backend_get_maps_404_to_none() {
    let (_fixture, backend) = http_backend_fixture().await;

    let found = backend.get("events", "ev-1").await.unwrap().unwrap();
    assert_eq!(found["title"], "Homecoming Gala");

    assert!(backend.get("events", "ev-404").await.unwrap().is_none());
}

#[tokio::test]
async fn test_http_backend_delete_maps_404_to_false() {
    let (_fixture, backend) = http_backend_fixture().await;

    assert!(!backend.delete("events", "ev-404").await.unwrap());

    assert!(backend.delete("events", "ev-3").await.unwrap());
    assert!(backend.get("events", "ev-3").await.unwrap().is_none());
}

#[tokio::test]
async fn test_http_backend_list_round_trips_query_and_pagination() {
    let (_fixture, backend) = http_backend_fixture().await;

    let query = ListQuery {
        filter: FilterSpec::new().exact("status", Some("active")),
        sort: Some(("memberCount".to_string(), Direction::Asc)),
        page: 1,
        limit: 4,
    };
    let page = backend.list("chapters", &query).await.unwrap();

    // Even-numbered seed chapters are active: 6 of 12
    assert_eq!(page.total, 6);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.items.len(), 4);
    assert_eq!(page.items[0]["id"], "ch-2");
    assert_eq!(page.items[3]["id"], "ch-8");
}

#[tokio::test]
async fn test_http_backend_create_and_merge() {
    let (_fixture, backend) = http_backend_fixture().await;

    let created = backend
        .create(
            "qa",
            json!({ "question": "Does the delegate path work?" }),
        )
        .await
        .unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["answered"], false);

    let merged = backend
        .merge("qa", &id, json!({ "upvotes": 9 }))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(merged["upvotes"], 9);

    assert!(backend
        .merge("qa", "qa-404", json!({ "upvotes": 1 }))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_http_backend_propagates_upstream_validation_error() {
    let (_fixture, backend) = http_backend_fixture().await;

    let result = backend
        .create("events", json!({ "title": "  ", "date": "2026-01-01T00:00:00Z" }))
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_http_backend_synthesizes_missing_pagination() {
    use axum::{routing::get, Json, Router};

    // A minimal upstream that returns an envelope without a pagination block
    let app = Router::new().route(
        "/v1/records",
        get(|| async {
            Json(json!({
                "success": true,
                "data": [ { "id": "r-1" }, { "id": "r-2" } ],
            }))
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    let backend = HttpBackend::new(format!("http://{}/v1", addr));
    let page = backend.list("records", &ListQuery::default()).await.unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total, 2);
    assert_eq!(page.page, 1);
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn test_application_lifecycle() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/applications"))
        .json(&json!({
            "opportunityId": "op-1",
            "applicantName": "Ada Alumna",
            "applicantEmail": "ada@example.com",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["status"], "submitted");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let resp = fixture
        .client
        .patch(fixture.url(&format!("/api/applications/{}", id)))
        .json(&json!({ "status": "accepted" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["status"], "accepted");

    let resp = fixture
        .client
        .get(fixture.url("/api/applications?status=accepted"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}
