use serde::Serialize;
use std::collections::HashMap;

const MARKDOWN_CONTENT_TYPE: &str = "text/markdown; charset=utf-8";
const PLAIN_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Response in the shape expected by API Gateway and Lambda function URLs.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl HttpResponse {
    pub fn markdown(body: String) -> Self {
        Self::with_content_type(200, MARKDOWN_CONTENT_TYPE, body)
    }

    pub fn failure(status_code: u16, message: &str) -> Self {
        Self::with_content_type(
            status_code,
            PLAIN_CONTENT_TYPE,
            format!("Failed to build report: {}", message),
        )
    }

    fn with_content_type(status_code: u16, content_type: &str, body: String) -> Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), content_type.to_string());
        HttpResponse {
            status_code,
            headers,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::response::HttpResponse;
    use serde_json::json;

    #[test]
    fn test_markdown_response() {
        let response = HttpResponse::markdown("| Date |\n".to_string());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "statusCode": 200,
                "headers": { "content-type": "text/markdown; charset=utf-8" },
                "body": "| Date |\n"
            })
        );
    }

    #[test]
    fn test_failure_response() {
        let response = HttpResponse::failure(502, "throttled");
        assert_eq!(response.status_code, 502);
        assert_eq!(response.body, "Failed to build report: throttled");
        assert_eq!(
            response.headers.get("content-type").map(String::as_str),
            Some("text/plain; charset=utf-8")
        );
    }
}
