use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use std::{
    fs,
    path::PathBuf,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;
use vacancy_nexus::db::{NewVacancy, SearchHistory, Vacancy, VacancyStorage, connect};
use vacancy_nexus::router::{RouterState, router};
use vacancy_nexus::service::VacancyService;

struct TestApp {
    app: Router,
    storage: VacancyStorage,
    path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

async fn spawn_app(label: &str) -> TestApp {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut path = std::env::temp_dir();
    path.push(format!(
        "vacancy-nexus-{label}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", path.display());
    let pool = connect(&database_url, 4).await.expect("failed to open sqlite");
    let storage = VacancyStorage::open(pool).await.expect("failed to init schema");
    let service = VacancyService::new(Arc::new(storage.clone()));
    let app = router(RouterState::new(service));

    TestApp { app, storage, path }
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };

    let resp = app
        .clone()
        .oneshot(builder.body(body).expect("failed to build request"))
        .await
        .expect("request failed");

    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    (status, bytes.to_vec())
}

fn software_engineer() -> NewVacancy {
    NewVacancy {
        title: "Software Engineer".to_string(),
        company: "Test Company".to_string(),
        location: "Test Location".to_string(),
        description: "Test Description".to_string(),
    }
}

async fn seed(app: &TestApp, vacancy: &NewVacancy) -> Vacancy {
    let (status, body) = send(
        &app.app,
        "POST",
        "/save",
        Some(serde_json::to_value(vacancy).unwrap()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&body).expect("saved vacancy json")
}

#[tokio::test]
async fn search_returns_matches_and_records_history() {
    let t = spawn_app("search").await;
    seed(&t, &software_engineer()).await;
    seed(
        &t,
        &NewVacancy {
            title: "Data Scientist".to_string(),
            ..software_engineer()
        },
    )
    .await;

    let (status, body) = send(&t.app, "GET", "/search?query=software", None).await;
    assert_eq!(status, StatusCode::OK);
    let found: Vec<Vacancy> = serde_json::from_slice(&body).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Software Engineer");

    let (status, body) = send(&t.app, "GET", "/history", None).await;
    assert_eq!(status, StatusCode::OK);
    let history: Vec<SearchHistory> = serde_json::from_slice(&body).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].query, "software");
}

#[tokio::test]
async fn search_without_match_is_empty_array() {
    let t = spawn_app("search-empty").await;

    let (status, body) = send(&t.app, "GET", "/search?query=astronaut", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!([]));
}

#[tokio::test]
async fn search_requires_query_parameter() {
    let t = spawn_app("search-missing").await;

    for uri in ["/search", "/search?query="] {
        let (status, body) = send(&t.app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    let (_, body) = send(&t.app, "GET", "/history", None).await;
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!([]));
}

#[tokio::test]
async fn search_succeeds_when_history_write_fails() {
    let t = spawn_app("history-broken").await;
    seed(&t, &software_engineer()).await;

    sqlx::query("DROP TABLE search_history")
        .execute(t.storage.pool())
        .await
        .unwrap();

    let (status, body) = send(&t.app, "GET", "/search?query=Engineer", None).await;
    assert_eq!(status, StatusCode::OK);
    let found: Vec<Vacancy> = serde_json::from_slice(&body).unwrap();
    assert_eq!(found.len(), 1);

    let (status, body) = send(&t.app, "GET", "/history", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    assert_eq!(body["error"]["message"], "An internal server error occurred.");
    assert!(!body.to_string().contains("search_history"));
}

#[tokio::test]
async fn non_canonical_ids_do_not_touch_vacancy() {
    let t = spawn_app("id-alias").await;
    let stored = seed(&t, &software_engineer()).await;
    assert_eq!(stored.id, "1");

    let (status, _) = send(&t.app, "GET", "/get/01", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&t.app, "DELETE", "/delete/01", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&t.app, "GET", "/get/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Vacancy>(&body).unwrap(), stored);
}

#[tokio::test]
async fn get_list_and_delete_vacancy() {
    let t = spawn_app("crud").await;
    let stored = seed(&t, &software_engineer()).await;

    let (status, body) = send(&t.app, "GET", &format!("/get/{}", stored.id), None).await;
    assert_eq!(status, StatusCode::OK);
    let fetched: Vacancy = serde_json::from_slice(&body).unwrap();
    assert_eq!(fetched, stored);
    assert_eq!(fetched.title, "Software Engineer");
    assert_eq!(fetched.location, "Test Location");

    let (status, body) = send(&t.app, "GET", "/list", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Vec<Vacancy>>(&body).unwrap().len(), 1);

    let (status, _) = send(&t.app, "DELETE", &format!("/delete/{}", stored.id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&t.app, "GET", &format!("/get/{}", stored.id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, _) = send(&t.app, "DELETE", "/delete/424242", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn delete_history_entries() {
    let t = spawn_app("history").await;
    send(&t.app, "GET", "/search?query=rust", None).await;

    let (_, body) = send(&t.app, "GET", "/history", None).await;
    let history: Vec<SearchHistory> = serde_json::from_slice(&body).unwrap();
    assert_eq!(history.len(), 1);

    let (status, _) = send(&t.app, "DELETE", &format!("/history/{}", history[0].id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&t.app, "DELETE", "/history/999999", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&t.app, "DELETE", "/history/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&t.app, "GET", "/history", None).await;
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!([]));
}
