use actix_web::body::{BoxBody, EitherBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpResponse, ResponseError};
use actix_web_lab::middleware::Next;

use crate::authentication::PageContext;
use crate::routes::error_chain_fmt;
use crate::store::StoreError;
use crate::views::errors::{internal_error_view, not_found_view};

/// Failure of a controller step. Rendered as the 404 or 500 error page;
/// the cause of a 500 is logged, never shown.
///
/// The page built here carries no login state: [`render_error_pages`]
/// re-renders it for the requesting user.
#[derive(thiserror::Error)]
pub enum AppError {
    #[error("The requested record does not exist.")]
    NotFound,

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Unexpected(anyhow::Error::new(e))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let ctx = PageContext::anonymous();
        match self {
            AppError::NotFound => not_found_view(&ctx),
            AppError::Unexpected(_) => {
                tracing::error!(error.cause_chain = ?self, "ERROR occurred");
                internal_error_view(&ctx)
            }
        }
    }
}

/// Fallback for requests no route matched.
pub async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound)
}

/// Replaces 404 and 500 responses with the matching error page, rendered
/// with the navigation and flash messages of the requesting user.
pub async fn render_error_pages<B: MessageBody + 'static>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, actix_web::Error> {
    let res = next.call(req).await?;
    let status = res.status();
    if status != StatusCode::NOT_FOUND
        && status != StatusCode::INTERNAL_SERVER_ERROR
    {
        return Ok(res.map_into_left_body());
    }

    let ctx = match PageContext::extract(res.request()).await {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load the error page context");
            PageContext::anonymous()
        }
    };
    let page = if status == StatusCode::NOT_FOUND {
        not_found_view(&ctx)
    } else {
        internal_error_view(&ctx)
    };

    Ok(res.into_response(page).map_into_right_body())
}
