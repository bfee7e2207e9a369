use aws_lambda_events::encodings::Body;
use aws_lambda_events::event::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use aws_lambda_events::http;
use http::StatusCode;
use serde_json::json;
use tracing::{error, info};

use users_backend_shared::error::ServiceError;
use users_backend_shared::models::Page;
use users_backend_shared::store::UserStore;

/// Dispatches one API Gateway request. Three terminal branches keyed on the
/// method: GET lists users, POST echoes its body, anything else is rejected
/// before the store (and with it the secret store and database) is touched.
pub async fn handle_request<S>(
    request: &ApiGatewayProxyRequest,
    store: &S,
) -> ApiGatewayProxyResponse
where
    S: UserStore,
{
    info!(
        "Received request: method={}, path={:?}, query_params={:?}",
        request.http_method, request.path, request.query_string_parameters
    );

    match request.http_method.as_str() {
        "GET" => list_users(request, store).await,
        "POST" => echo_post(request),
        other => error_response(&ServiceError::UnsupportedMethod(other.to_string())),
    }
}

/// Fast-path rejection for unsupported methods. Takes only the request, so
/// the binary wrapper can answer before configuration is read or any client
/// is constructed.
pub fn reject_unsupported_method(
    request: &ApiGatewayProxyRequest,
) -> Option<ApiGatewayProxyResponse> {
    match request.http_method.as_str() {
        "GET" | "POST" => None,
        other => Some(error_response(&ServiceError::UnsupportedMethod(
            other.to_string(),
        ))),
    }
}

// GET: paginated read over the users table
async fn list_users<S>(request: &ApiGatewayProxyRequest, store: &S) -> ApiGatewayProxyResponse
where
    S: UserStore,
{
    let page = Page::from_params(
        request.query_string_parameters.first("limit"),
        request.query_string_parameters.first("offset"),
    );

    match store.list_users(&page).await {
        Ok(users) => response(
            StatusCode::OK,
            json!({
                "message": "Success",
                "data": users,
                "pagination": {
                    "limit": page.limit,
                    "offset": page.offset,
                    "nextOffset": page.next_offset(),
                },
            }),
        ),
        Err(err) => error_response(&err),
    }
}

// POST: parse and echo the JSON body; nothing is persisted
fn echo_post(request: &ApiGatewayProxyRequest) -> ApiGatewayProxyResponse {
    let body = match request
        .body
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
    {
        None => json!({}),
        Some(raw) => match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(value) => value,
            Err(err) => {
                return error_response(&ServiceError::BadRequest(format!(
                    "request body is not valid JSON: {}",
                    err
                )))
            }
        },
    };

    response(
        StatusCode::OK,
        json!({ "message": "POST request successful", "body": body }),
    )
}

// Helper to return a Json API response
fn response(status: StatusCode, body: serde_json::Value) -> ApiGatewayProxyResponse {
    let mut headers: http::HeaderMap = http::HeaderMap::new();
    headers.insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static("application/json"),
    );
    headers.insert(
        http::header::ACCESS_CONTROL_ALLOW_ORIGIN,
        http::HeaderValue::from_static("*"),
    );
    ApiGatewayProxyResponse {
        status_code: status.as_u16() as i64,
        headers,
        multi_value_headers: http::HeaderMap::new(),
        body: Some(Body::Text(body.to_string())),
        is_base64_encoded: false,
    }
}

/// Classified error response: status and safe message come from the error
/// variant, full detail only goes to the log.
pub fn error_response(err: &ServiceError) -> ApiGatewayProxyResponse {
    error!("Request failed ({}): {}", err.kind(), err);
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    response(
        status,
        json!({ "message": err.public_message(), "error": err.kind() }),
    )
}
