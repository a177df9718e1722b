use actix_web::HttpResponse;
use serde::Serialize;

/// `200 {"success": true, "data": ...}`
pub fn ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": data
    }))
}

/// `200 {"success": true, "data": [...], "pagination": {...}}`
pub fn paginated<T: Serialize, P: Serialize>(data: T, pagination: P) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": data,
        "pagination": pagination
    }))
}

/// `200 {"success": true, "data": ..., "message": ...}`
pub fn ok_with_message<T: Serialize>(data: T, message: &str) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": data,
        "message": message
    }))
}

/// `200 {"success": true, "message": ...}`
pub fn message(message: &str) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": message
    }))
}

/// `201 {"success": true, "data": ..., "message": ...}`
pub fn created<T: Serialize>(data: T, message: &str) -> HttpResponse {
    HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "data": data,
        "message": message
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;

    use super::paginated;

    #[actix_web::test]
    async fn pagination_sits_beside_data_not_inside_it() {
        let response = paginated(vec![1, 2], serde_json::json!({ "currentPage": 1 }));
        let bytes = to_bytes(response.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["success"], true);
        assert!(value["data"].is_array());
        assert_eq!(value["pagination"]["currentPage"], 1);
        assert!(value["data"].get("pagination").is_none());
    }
}
