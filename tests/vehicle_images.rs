mod common;

use axum::http::StatusCode;
use serde_json::Value;

use common::{png_bytes, vehicle_payload, TestApp};

async fn new_vehicle(app: &TestApp) -> String {
    let created = app
        .create_vehicle(&vehicle_payload("BMW", "X5", 2023, 75000.0, "available"))
        .await;
    created["id"].as_str().unwrap().to_string()
}

fn timestamp(value: &Value) -> chrono::DateTime<chrono::FixedOffset> {
    chrono::DateTime::parse_from_rfc3339(value.as_str().unwrap()).unwrap()
}

fn primary_flags(images: &Value) -> Vec<bool> {
    images
        .as_array()
        .unwrap()
        .iter()
        .map(|image| image["is_primary"].as_bool().unwrap())
        .collect()
}

#[tokio::test]
async fn test_first_batch_marks_only_first_image_primary() {
    let app = TestApp::new().await;
    let id = new_vehicle(&app).await;
    let token = app.admin_token();

    let files = vec![
        ("a.png", "image/png", png_bytes(1800, 1200)),
        ("b.png", "image/png", png_bytes(640, 480)),
        ("c.png", "image/png", png_bytes(320, 200)),
    ];
    let (status, body) = app.upload(&id, Some(&token), &files).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["uploaded"], 3);
    assert_eq!(body["failed"].as_array().unwrap().len(), 0);
    assert_eq!(primary_flags(&body["images"]), vec![true, false, false]);

    // Principal y miniatura en disco para cada imagen
    assert_eq!(app.stored_files(), 6);
    for image in body["images"].as_array().unwrap() {
        assert!(app.upload_path(image["url"].as_str().unwrap()).is_file());
        assert!(app.upload_path(image["thumbnail_url"].as_str().unwrap()).is_file());
    }

    let (_, vehicle) = app.get(&format!("/api/vehicles/{}", id), None).await;
    assert_eq!(primary_flags(&vehicle["images"]), vec![true, false, false]);

    // Un segundo lote nunca trae principal
    let (status, body) = app
        .upload(&id, Some(&token), &[("d.png", "image/png", png_bytes(100, 100))])
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(primary_flags(&body["images"]), vec![false]);

    let (_, vehicle) = app.get(&format!("/api/vehicles/{}", id), None).await;
    assert_eq!(vehicle["images"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_uploaded_main_image_is_resized_and_served() {
    let app = TestApp::new().await;
    let id = new_vehicle(&app).await;

    let (status, body) = app
        .upload(&id, Some(&app.admin_token()), &[("wide.png", "image/png", png_bytes(2000, 1000))])
        .await;
    assert_eq!(status, StatusCode::OK);

    let url = body["images"][0]["url"].as_str().unwrap();
    let main = image::open(app.upload_path(url)).unwrap();
    assert_eq!((main.width(), main.height()), (1200, 600));

    let thumb_url = body["images"][0]["thumbnail_url"].as_str().unwrap();
    let thumb = image::open(app.upload_path(thumb_url)).unwrap();
    assert!(thumb.width() <= 300 && thumb.height() <= 200);

    let (status, _) = app.get(url, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_non_image_rejects_whole_batch_before_side_effects() {
    let app = TestApp::new().await;
    let id = new_vehicle(&app).await;

    let files = vec![
        ("a.png", "image/png", png_bytes(200, 100)),
        ("notas.txt", "text/plain", b"no soy una imagen".to_vec()),
    ];
    let (status, body) = app.upload(&id, Some(&app.admin_token()), &files).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert_eq!(app.stored_files(), 0);

    let (_, vehicle) = app.get(&format!("/api/vehicles/{}", id), None).await;
    assert_eq!(vehicle["images"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_corrupt_file_is_reported_and_others_continue() {
    let app = TestApp::new().await;
    let id = new_vehicle(&app).await;

    let files = vec![
        ("roto.png", "image/png", b"esto no es un png".to_vec()),
        ("bueno.png", "image/png", png_bytes(300, 200)),
    ];
    let (status, body) = app.upload(&id, Some(&app.admin_token()), &files).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["uploaded"], 1);
    assert_eq!(body["failed"][0]["filename"], "roto.png");
    // La primera guardada con éxito es la principal
    assert_eq!(primary_flags(&body["images"]), vec![true]);
    assert_eq!(app.stored_files(), 2);
}

#[tokio::test]
async fn test_batch_where_every_file_fails() {
    let app = TestApp::new().await;
    let id = new_vehicle(&app).await;

    let files = vec![("roto.jpg", "image/jpeg", b"basura".to_vec())];
    let (status, body) = app.upload(&id, Some(&app.admin_token()), &files).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "IMAGE_PROCESSING_ERROR");
    assert_eq!(app.stored_files(), 0);
}

#[tokio::test]
async fn test_upload_guards() {
    let app = TestApp::new().await;
    let id = new_vehicle(&app).await;
    let files = vec![("a.png", "image/png", png_bytes(10, 10))];

    let (status, _) = app.upload(&id, None, &files).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.upload(&id, Some(&app.token_for("cliente")), &files).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let missing = uuid::Uuid::new_v4().to_string();
    let (status, _) = app.upload(&missing, Some(&app.admin_token()), &files).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.upload(&id, Some(&app.admin_token()), &[]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_image() {
    let app = TestApp::new().await;
    let id = new_vehicle(&app).await;
    let token = app.admin_token();

    let files = vec![
        ("a.png", "image/png", png_bytes(50, 50)),
        ("b.png", "image/png", png_bytes(60, 40)),
    ];
    let (_, uploaded) = app.upload(&id, Some(&token), &files).await;
    let first = uploaded["images"][0].clone();

    // Imagen desconocida: 404 y la lista no cambia
    let unknown = uuid::Uuid::new_v4();
    let (status, _) = app
        .delete(&format!("/api/vehicles/{}/images/{}", id, unknown), Some(&token))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, vehicle) = app.get(&format!("/api/vehicles/{}", id), None).await;
    assert_eq!(vehicle["images"].as_array().unwrap().len(), 2);

    let (status, _) = app
        .delete(
            &format!("/api/vehicles/{}/images/{}", id, first["id"].as_str().unwrap()),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!app.upload_path(first["url"].as_str().unwrap()).exists());
    assert!(!app.upload_path(first["thumbnail_url"].as_str().unwrap()).exists());

    let (_, after) = app.get(&format!("/api/vehicles/{}", id), None).await;
    let images = after["images"].as_array().unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0]["id"], uploaded["images"][1]["id"]);
    // La principal no se reasigna
    assert_eq!(images[0]["is_primary"], false);
    assert!(timestamp(&after["updated_at"]) >= timestamp(&vehicle["updated_at"]));

    let missing_vehicle = uuid::Uuid::new_v4();
    let (status, _) = app
        .delete(
            &format!("/api/vehicles/{}/images/{}", missing_vehicle, first["id"].as_str().unwrap()),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_vehicle_removes_its_files() {
    let app = TestApp::new().await;
    let id = new_vehicle(&app).await;
    let token = app.admin_token();

    let (_, uploaded) = app
        .upload(&id, Some(&token), &[("a.png", "image/png", png_bytes(80, 60))])
        .await;
    assert_eq!(uploaded["uploaded"], 1);
    assert_eq!(app.stored_files(), 2);

    let (status, _) = app.delete(&format!("/api/vehicles/{}", id), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.stored_files(), 0);
}
