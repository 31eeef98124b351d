use serde::Serialize;
use axum::Json;
use axum::http::StatusCode;
use chrono::Utc;

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub meta: ResponseMeta,
}

#[derive(Serialize)]
pub struct ResponseMeta {
    pub status: String,
    pub status_code: u16,
    pub timestamp: String,
    pub message: Option<String>,
}

impl ResponseMeta {
    fn new(status: &str, code: StatusCode, message: Option<String>) -> Self {
        ResponseMeta {
            status: status.to_string(),
            status_code: code.as_u16(),
            timestamp: Utc::now().to_rfc3339(),
            message,
        }
    }
}

pub fn success<T: Serialize>(data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        StatusCode::OK,
        Json(ApiResponse {
            data: Some(data),
            meta: ResponseMeta::new("success", StatusCode::OK, None),
        }),
    )
}

pub fn error<T>(status: StatusCode, message: String) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        status,
        Json(ApiResponse {
            data: None,
            meta: ResponseMeta::new("error", status, Some(message)),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_has_no_data() {
        let message = "Please enter a valid URL (YouTube video or website).";
        let (status, Json(body)) = error::<String>(StatusCode::BAD_REQUEST, message.into());
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(value["data"].is_null());
        assert_eq!(value["meta"]["status"], "error");
        assert_eq!(value["meta"]["status_code"], 400);
        assert_eq!(value["meta"]["message"], message);
    }

    #[test]
    fn success_envelope_wraps_data() {
        let (status, Json(body)) = success("summary text");
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["data"], "summary text");
        assert!(value["meta"]["message"].is_null());
    }
}
