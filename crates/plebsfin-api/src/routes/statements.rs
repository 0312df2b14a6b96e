//! Bank statement upload

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use plebsfin_parser::StatementTransaction;
use serde::Serialize;

use crate::{ApiError, ApiResult, AppState};

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub transactions: Vec<StatementTransaction>,
}

/// Parse the multipart field `file` into transaction candidates
pub async fn api_parse_statement(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<ParseResponse> {
    let mut multipart = multipart?;

    let mut upload: Option<Bytes> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(FILE_FIELD) {
            upload = Some(field.bytes().await?);
            break;
        }
    }

    let upload = upload.ok_or_else(|| ApiError::bad_request("No file provided"))?;
    let transactions = state.parser.parse_bytes(&upload);
    log::debug!("Parsed {} statement lines from {} bytes", transactions.len(), upload.len());

    Ok(Json(ParseResponse { transactions }))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{app, send};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::json;

    const BOUNDARY: &str = "plebsfin-boundary";

    fn multipart_request(field: &str, content: &str) -> Request<Body> {
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"statement.csv\"\r\n\
             Content-Type: text/csv\r\n\r\n{content}\r\n--{b}--\r\n",
            b = BOUNDARY,
            field = field,
            content = content,
        );
        Request::builder()
            .method("POST")
            .uri("/api/bank-statement/parse")
            .header("content-type", format!("multipart/form-data; boundary={}", BOUNDARY))
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_parse_upload() {
        let content = "Date,Description,Amount\n01/15/2024 Grocery Store $45.67\n\n12-01-2023 Refund 1,234.50\nno date here 12.00";
        let (status, body) = send(&app(), multipart_request("file", content)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"transactions": [
                {"date": "01/15/2024", "description": "Grocery Store", "amount": 45.67},
                {"date": "12-01-2023", "description": "Refund", "amount": 1234.5}
            ]})
        );
    }

    #[tokio::test]
    async fn test_missing_file_field_is_400() {
        let (status, body) = send(&app(), multipart_request("other", "01/15/2024 x 1.00")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "No file provided"}));
    }

    #[tokio::test]
    async fn test_non_multipart_body_is_400() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/bank-statement/parse")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let (status, body) = send(&app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_empty_file_parses_to_nothing() {
        let (status, body) = send(&app(), multipart_request("file", "")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"transactions": []}));
    }
}
