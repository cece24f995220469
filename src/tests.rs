//! End-to-end flows against a mock board server

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::*;

async fn mount_board(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/columns/b1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "A", "boardId": "b1", "title": "To Do" },
            { "_id": "B", "boardId": "b1", "title": "Done" }
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks/A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "T1", "columnId": "A", "content": "one" },
            { "_id": "T2", "columnId": "A", "content": "two" },
            { "_id": "T3", "columnId": "A", "content": "three" }
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks/B"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "T4", "columnId": "B", "content": "four" }
        ])))
        .mount(server)
        .await;
}

fn context(server: &MockServer) -> AppContext {
    AppContext::new(ClientConfig {
        api_base_url: server.uri(),
        ..ClientConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_login_open_board_and_drag() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/log"))
        .and(body_json(json!({ "email": "ann@example.com", "password": "hunter22" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "jwt-1" })))
        .mount(&server)
        .await;
    mount_board(&server).await;
    Mock::given(method("PATCH"))
        .and(path("/tasks-reorder"))
        .and(header("authorization", "Bearer jwt-1"))
        .and(body_json(json!({
            "tasksByColumn": [
                { "columnId": "A", "taskIds": ["T2", "T3"] },
                { "columnId": "B", "taskIds": ["T4", "T1"] }
            ]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context(&server);
    let token = ctx.session().login("ann@example.com", "hunter22").await.unwrap();
    assert_eq!(token, "jwt-1");
    assert!(ctx.is_authenticated());

    let mut board = ctx.open_board(BoardId::new("b1")).await.unwrap();
    assert_eq!(board.state().task_count(), 4);

    let mut tracker: DragTracker<TaskId, ColumnId> = DragTracker::new();
    tracker.press(TaskId::new("T1"), 0, 10, 10);
    assert!(tracker.pointer_move(40, 80));
    tracker.enter_item(TaskId::new("T4"));
    let drop = tracker.release().unwrap();
    assert!(tracker.take_click_suppression());

    let outcome = board.drag_end(drop.into()).await.unwrap();
    assert_eq!(outcome, SyncOutcome::Synced);
    let b = board.state().column(&ColumnId::new("B")).unwrap();
    assert_eq!(b.task_ids(), vec![TaskId::new("T4"), TaskId::new("T1")]);
}

#[tokio::test]
async fn test_rejected_login_stores_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/log"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .mount(&server)
        .await;

    let ctx = context(&server);
    let err = ctx.session().login("ann@example.com", "wrong").await.unwrap_err();
    assert!(err.is_auth());
    assert!(!ctx.is_authenticated());
}

#[tokio::test]
async fn test_server_rejects_reorder_board_rolls_back() {
    let server = MockServer::start().await;
    mount_board(&server).await;
    Mock::given(method("PATCH"))
        .and(path("/tasks-reorder"))
        .respond_with(ResponseTemplate::new(500).set_body_string("write failed"))
        .mount(&server)
        .await;

    let ctx = context(&server);
    let mut board = ctx.open_board(BoardId::new("b1")).await.unwrap();
    let before = board.state().clone();

    let err = board
        .drag_end(DragGesture::onto_column("T3", "B"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Server { status: 500, .. }));
    assert_eq!(board.state(), &before);
}

#[tokio::test]
async fn test_keep_local_policy_from_config() {
    let server = MockServer::start().await;
    mount_board(&server).await;
    Mock::given(method("PUT"))
        .and(path("/updateTask/T2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let ctx = AppContext::new(ClientConfig {
        api_base_url: server.uri(),
        reconcile: ReconcilePolicy::KeepLocal,
        ..ClientConfig::default()
    })
    .unwrap();
    let mut board = ctx.open_board(BoardId::new("b1")).await.unwrap();
    let task = TaskId::new("T2");

    board.begin_task_edit(&task).unwrap();
    board.set_task_draft(&task, "two, revised").unwrap();
    assert!(board.save_task(&task).await.is_err());

    assert_eq!(board.state().task(&task).unwrap().content, "two, revised");
    assert_eq!(board.edit_state(&EntityKey::Task(task)), EditState::Stale);
}
