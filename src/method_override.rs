use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::Method;
use actix_web::web;
use actix_web_lab::middleware::Next;

const OVERRIDE_PARAM: &str = "_method";

#[derive(serde::Deserialize)]
struct MethodOverride {
    #[serde(rename = "_method")]
    method: String,
}

/// HTML forms and links can only issue GET and POST. A `_method` query
/// parameter on such a request names the method it stands for, e.g.
/// `POST /users/{id}/update?_method=PUT`. The rewrite happens before routing.
pub async fn method_override(
    mut req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let overridable = matches!(*req.method(), Method::GET | Method::POST);
    if overridable && req.query_string().contains(OVERRIDE_PARAM) {
        if let Some(method) = requested_method(req.query_string()) {
            tracing::debug!("overriding {} with {}", req.method(), method);
            req.head_mut().method = method;
        }
    }
    next.call(req).await
}

fn requested_method(query: &str) -> Option<Method> {
    let query = web::Query::<MethodOverride>::from_query(query).ok()?;
    Method::from_bytes(query.method.trim().to_uppercase().as_bytes()).ok()
}
