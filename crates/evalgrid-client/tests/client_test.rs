use axum::extract::Query;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{http::StatusCode, Json, Router};
use evalgrid_client::{save_grid, ApiClient, ClientConfig, ListCache};
use evalgrid_core::{CellKey, PageArgs, Quarter, ScoreGrid, Selection};
use evalgrid_protocol::Metric;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Default)]
struct MockBackend {
    score_posts: Mutex<Vec<(String, Value)>>,
    metric_puts: Mutex<usize>,
    employee_gets: Mutex<usize>,
}

async fn spawn_backend(state: Arc<MockBackend>) -> String {
    let state_for_scores_post = state.clone();
    let state_for_metrics = state.clone();
    let state_for_employees = state.clone();

    let app = Router::new()
        .route(
            "/kpi/table",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params.get("employee_id").map(String::as_str), Some("7"));
                Json(json!([
                    {"department": {"id": 1}, "metric": {"id": 10}, "score": 5.0},
                    {"department": {"id": 2}, "metric": {"id": 10}, "score": 3.0}
                ]))
            })
            .post(
                move |Query(params): Query<HashMap<String, String>>,
                      Json(body): Json<Value>| {
                    let state = state_for_scores_post.clone();
                    async move {
                        let metric_id = body["metric"]["id"].as_i64().unwrap();
                        state
                            .score_posts
                            .lock()
                            .unwrap()
                            .push((params.get("quarter").cloned().unwrap_or_default(), body));
                        // metric 13 is rejected so partial failure is observable
                        if metric_id == 13 {
                            (StatusCode::INTERNAL_SERVER_ERROR, "metric locked").into_response()
                        } else {
                            (StatusCode::OK, "ok").into_response()
                        }
                    }
                },
            ),
        )
        .route(
            "/metrics",
            get(|| async {
                Json(json!([
                    {"metric_id": 10, "metric_number": 1, "section_id": 0},
                    {"metric_id": 13, "metric_number": 2, "section_id": 0}
                ]))
            })
            .put(move |Json(body): Json<Vec<Metric>>| {
                let state = state_for_metrics.clone();
                async move {
                    assert_eq!(body.len(), 2);
                    *state.metric_puts.lock().unwrap() += 1;
                    StatusCode::OK
                }
            }),
        )
        .route(
            "/employees",
            get(move |Query(params): Query<HashMap<String, String>>| {
                let state = state_for_employees.clone();
                async move {
                    assert_eq!(params.get("limit").map(String::as_str), Some("100"));
                    *state.employee_gets.lock().unwrap() += 1;
                    Json(json!([{
                        "employee_id": 7,
                        "first_name": "Anna",
                        "last_name": "Petrova",
                        "surname": "Ivanovna"
                    }]))
                }
            }),
        );

    let addr = SocketAddr::from(([127, 0, 0, 1], 0));
    let listener = TcpListener::bind(addr).await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}

fn client_for(url: &str) -> ApiClient {
    ApiClient::new(ClientConfig::builder().base_url(url).build())
}

#[tokio::test]
async fn partial_save_reports_per_cell_and_keeps_failures_dirty() {
    let state = Arc::new(MockBackend::default());
    let url = spawn_backend(state.clone()).await;
    let client = client_for(&url);

    let selection = Selection::new(7, 2025, Quarter::Q1);
    let records = client.selection_scores(selection).await.unwrap();
    assert_eq!(records.len(), 2);

    let mut grid = ScoreGrid::load(selection, &records);
    grid.set_editing(true);
    grid.set_score(CellKey::new(1, 10), 7.0).unwrap();
    grid.set_score(CellKey::new(1, 13), 4.0).unwrap();

    let report = save_grid(&client, &mut grid).await.unwrap();
    assert!(!report.is_complete());
    assert_eq!(report.total(), 2);
    assert_eq!(report.persisted, vec![CellKey::new(1, 10)]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, CellKey::new(1, 13));
    assert!(report.failed[0].1.contains("500"));

    // the failed cell keeps its edit and stays dirty for a retry
    assert!(grid.is_dirty(CellKey::new(1, 13)));
    assert!(!grid.is_dirty(CellKey::new(1, 10)));
    assert_eq!(grid.score(CellKey::new(1, 13)), Some(4.0));

    // both writes actually reached the backend with the selection params
    let posts = state.score_posts.lock().unwrap();
    assert_eq!(posts.len(), 2);
    assert!(posts.iter().all(|(quarter, _)| quarter == "1"));
}

#[tokio::test]
async fn full_save_empties_the_dirty_set() {
    let state = Arc::new(MockBackend::default());
    let url = spawn_backend(state).await;
    let client = client_for(&url);

    let selection = Selection::new(7, 2025, Quarter::Q1);
    let records = client.selection_scores(selection).await.unwrap();
    let mut grid = ScoreGrid::load(selection, &records);
    grid.set_editing(true);
    grid.set_score(CellKey::new(1, 10), 7.0).unwrap();
    grid.set_score(CellKey::new(2, 10), 9.0).unwrap();

    let report = save_grid(&client, &mut grid).await.unwrap();
    assert!(report.is_complete());
    assert_eq!(report.persisted.len(), 2);
    assert!(!grid.has_unsaved_edits());
}

#[tokio::test]
async fn list_cache_fetches_once_and_invalidates_explicitly() {
    let state = Arc::new(MockBackend::default());
    let url = spawn_backend(state.clone()).await;
    let client = client_for(&url);

    let mut cache = ListCache::new(PageArgs::default());
    let first = cache.employees(&client).await.unwrap().len();
    let second = cache.employees(&client).await.unwrap().len();
    assert_eq!(first, 1);
    assert_eq!(second, 1);
    assert_eq!(*state.employee_gets.lock().unwrap(), 1);

    let metrics = cache.metrics(&client).await.unwrap().to_vec();
    client.update_metrics(&metrics).await.unwrap();
    cache.invalidate_metrics();
    cache.metrics(&client).await.unwrap();
    assert_eq!(*state.metric_puts.lock().unwrap(), 1);

    cache.invalidate_all();
    cache.employees(&client).await.unwrap();
    assert_eq!(*state.employee_gets.lock().unwrap(), 2);
}

#[tokio::test]
async fn non_2xx_surfaces_status_and_body() {
    let state = Arc::new(MockBackend::default());
    let url = spawn_backend(state).await;
    let client = client_for(&url);

    let selection = Selection::new(7, 2025, Quarter::Q1);
    let entry = evalgrid_protocol::ScoreEntry::new(1, 13, 2.0);
    let err = client.write_score(selection, &entry).await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("500"), "unexpected error: {message}");
    assert!(message.contains("metric locked"));
}
