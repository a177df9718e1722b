use actix_multipart::form::MultipartForm;
use actix_web::{test, web, App, HttpResponse};

use construction_backend::handlers::projects::{multipart_config, ProjectForm};

const BOUNDARY: &str = "----form-boundary-61";

fn text_part(buf: &mut Vec<u8>, name: &str, value: &str) {
    buf.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
            BOUNDARY, name, value
        )
        .as_bytes(),
    );
}

fn file_part(buf: &mut Vec<u8>, name: &str, filename: &str, bytes: &[u8]) {
    buf.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: image/png\r\n\r\n",
            BOUNDARY, name, filename
        )
        .as_bytes(),
    );
    buf.extend_from_slice(bytes);
    buf.extend_from_slice(b"\r\n");
}

fn five_megabyte_png() -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    bytes.resize(5 * 1024 * 1024, 0u8);
    bytes
}

fn project_body(image_count: usize) -> Vec<u8> {
    let mut body = Vec::new();
    text_part(&mut body, "title", "Vadi Evleri");
    text_part(&mut body, "description", "Açıklama");
    text_part(&mut body, "location", "Ümraniye");
    text_part(&mut body, "status", "ONGOING");
    text_part(&mut body, "startDate", "2024-05-01");

    let png = five_megabyte_png();
    for i in 0..image_count {
        file_part(&mut body, "images", &format!("{}.png", i), &png);
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

async fn count_images(form: MultipartForm<ProjectForm>) -> HttpResponse {
    HttpResponse::Ok().body(form.images.len().to_string())
}

// Eleven 5MB files total 55MB; the extractor's stock total limit would
// reject that before the handler ever saw the request.
#[actix_web::test]
async fn extractor_accepts_a_full_sized_upload() {
    let app = test::init_service(
        App::new()
            .app_data(multipart_config())
            .route("/upload", web::post().to(count_images)),
    )
    .await;

    let request = test::TestRequest::post()
        .uri("/upload")
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        ))
        .set_payload(project_body(11))
        .to_request();

    let response = test::call_service(&app, request).await;
    assert!(response.status().is_success());

    let body = test::read_body(response).await;
    assert_eq!(body, "11");
}
