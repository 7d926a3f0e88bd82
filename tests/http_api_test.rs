//! HTTP API tests driven through the router with `tower::ServiceExt::oneshot`.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_bytes, body_json, get, multipart_upload, post, test_app, StaticDetector};
use mission_relay::MissionId;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_start_mission_then_robot_poll() {
    let app = test_app(None);
    let router = app.server.build_router();

    let response = router.clone().oneshot(post("/start_mission", "")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["ok"], json!(true));
    let mission_id = body["mission_id"].as_str().unwrap().to_string();
    assert!(mission_id.starts_with("mission_"));

    let body = body_json(router.clone().oneshot(get("/mission_state")).await.unwrap()).await;
    assert_eq!(body, json!({"mission_state": "start"}));
    let body = body_json(router.clone().oneshot(get("/mission_state")).await.unwrap()).await;
    assert_eq!(body, json!({"mission_state": "idle"}));

    let body = body_json(router.oneshot(get("/last_status")).await.unwrap()).await;
    assert_eq!(body["status"], json!("mission_idle"));
    assert_eq!(body["mission_id"], json!(mission_id));
    assert_eq!(body["terminal_status"], json!(null));
}

#[tokio::test]
async fn test_control_commands_are_one_shot() {
    let app = test_app(None);
    let router = app.server.build_router();

    let body = body_json(router.clone().oneshot(post("/abort_mission", "")).await.unwrap()).await;
    assert_eq!(body, json!({"ok": true, "command": "abort"}));

    let body = body_json(router.clone().oneshot(get("/control_state")).await.unwrap()).await;
    assert_eq!(body, json!({"command": "abort"}));
    let body = body_json(router.clone().oneshot(get("/control_state")).await.unwrap()).await;
    assert_eq!(body, json!({"command": "none"}));

    let body = body_json(router.clone().oneshot(post("/return_home", "")).await.unwrap()).await;
    assert_eq!(body, json!({"ok": true, "command": "go_home"}));
    let body = body_json(router.oneshot(get("/control_state")).await.unwrap()).await;
    assert_eq!(body, json!({"command": "go_home"}));
}

#[tokio::test]
async fn test_status_update_always_ok() {
    let app = test_app(None);
    let router = app.server.build_router();

    for payload in ["", "not json", "[1,2]", r#"{"status": "mission_started"}"#] {
        let response = router
            .clone()
            .oneshot(post("/status_update", payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"ok": true}));
    }

    let body = body_json(router.oneshot(get("/last_status")).await.unwrap()).await;
    assert_eq!(body["status"], json!("mission_started"));
    assert_eq!(app.control.list_missions().len(), 1);
}

#[tokio::test]
async fn test_last_status_before_any_report() {
    let app = test_app(None);
    let body = body_json(app.server.build_router().oneshot(get("/last_status")).await.unwrap()).await;
    assert_eq!(
        body,
        json!({
            "status": "no_status_yet",
            "mission_state": "idle",
            "mission_id": "—",
            "terminal_status": null,
        })
    );
}

#[tokio::test]
async fn test_missions_listing_and_lookup() {
    let app = test_app(None);
    let router = app.server.build_router();
    let id = app.control.start_mission();
    app.control
        .ingest_status_report(br#"{"status": "waypoint_reached", "index": 2}"#);

    let body = body_json(router.clone().oneshot(get("/missions")).await.unwrap()).await;
    let missions = body["missions"].as_array().unwrap();
    assert_eq!(missions.len(), 1);
    assert_eq!(missions[0]["id"], json!(id.as_str()));
    assert_eq!(missions[0]["waypoints_reached"], json!([2]));

    let uri = format!("/missions/{id}");
    let body = body_json(router.clone().oneshot(get(&uri)).await.unwrap()).await;
    assert_eq!(body["status"], json!("pending"));

    let response = router.oneshot(get("/missions/mission_unknown")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["status"], json!("error"));
}

#[tokio::test]
async fn test_upload_and_serve_photo() {
    let app = test_app(None);
    let router = app.server.build_router();

    let response = router
        .clone()
        .oneshot(multipart_upload(
            &[("waypoint_index", "4"), ("image_index", "2")],
            Some(b"fake-jpeg"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["waypoint_folder"], json!("wp4"));
    let filename = body["filename"].as_str().unwrap().to_string();
    assert!(filename.starts_with("img2_") && filename.ends_with(".jpg"));
    let mission_id = body["mission_id"].as_str().unwrap().to_string();

    let summary = app.control.summarize(&MissionId::from(mission_id.as_str())).unwrap();
    assert_eq!(summary.images_count, 1);

    let body = body_json(router.clone().oneshot(get("/latest_photos")).await.unwrap()).await;
    let url = format!("/photo/{mission_id}/wp4/{filename}");
    assert_eq!(
        body,
        json!({"photos": [{"url": url, "label": format!("wp4 · {filename}")}]})
    );

    let response = router.clone().oneshot(get(&url)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "image/jpeg");
    assert_eq!(body_bytes(response).await, b"fake-jpeg");

    let missing = format!("/photo/{mission_id}/wp4/nope.jpg");
    let response = router.oneshot(get(&missing)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_defaults_waypoint_and_index() {
    let app = test_app(None);
    let response = app
        .server
        .build_router()
        .oneshot(multipart_upload(&[], Some(b"x")))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["waypoint_folder"], json!("wpunknown"));
    assert!(body["filename"].as_str().unwrap().starts_with("img0_"));
}

#[tokio::test]
async fn test_upload_without_image_is_rejected() {
    let app = test_app(None);
    let response = app
        .server
        .build_router()
        .oneshot(multipart_upload(&[("waypoint_index", "1")], None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"status": "error", "message": "no image field"})
    );
    assert!(app.control.list_missions().is_empty());
}

#[tokio::test]
async fn test_unsafe_photo_path_is_rejected() {
    let app = test_app(None);
    let response = app
        .server
        .build_router()
        .oneshot(get("/photo/mission_a/wp1/..%2Fsecret.jpg"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_with_detector_lists_predictions() {
    let detector = Arc::new(StaticDetector::new(&[("ripe", 0.8), ("unripe", 0.1)]));
    let app = test_app(Some(detector));
    let router = app.server.build_router();

    let body = body_json(
        router
            .clone()
            .oneshot(multipart_upload(
                &[("waypoint_index", "1"), ("image_index", "3")],
                Some(b"img"),
            ))
            .await
            .unwrap(),
    )
    .await;
    let filename = body["filename"].as_str().unwrap().to_string();

    let body = body_json(router.oneshot(get("/latest_predictions")).await.unwrap()).await;
    let photos = body["photos"].as_array().unwrap();
    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0]["detections"], json!(["ripe"]));
    assert_eq!(photos[0]["label"], json!(format!("wp1 · {filename}")));
    assert!(photos[0]["url"]
        .as_str()
        .unwrap()
        .ends_with(&format!("/wp1/pred_{filename}")));

    assert!(app.dir.path().exists());
}

#[tokio::test]
async fn test_photo_listings_empty_without_mission() {
    let app = test_app(None);
    let router = app.server.build_router();

    let body = body_json(router.clone().oneshot(get("/latest_photos")).await.unwrap()).await;
    assert_eq!(body, json!({"photos": []}));
    let body = body_json(router.oneshot(get("/latest_predictions")).await.unwrap()).await;
    assert_eq!(body, json!({"photos": []}));
}

#[tokio::test]
async fn test_upload_with_empty_image_index() {
    let app = test_app(None);
    let response = app
        .server
        .build_router()
        .oneshot(multipart_upload(
            &[("waypoint_index", "2"), ("image_index", "")],
            Some(b"x"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["waypoint_folder"], json!("wp2"));
    assert!(body["filename"].as_str().unwrap().starts_with("img_"));
}
