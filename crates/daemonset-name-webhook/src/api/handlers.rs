use axum::{
    body::Bytes,
    extract,
    http::{header, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{error, Span};

use crate::{
    admission_response::AdmissionResponse,
    admission_review::AdmissionReview,
    api::{api_error::ApiError, state::ApiServerState},
    config::RejectionMode,
    mutation::{self, MutationError},
};

#[tracing::instrument(
    name = "mutation",
    fields(
        host = state.hostname.as_str(),
        request_uid = tracing::field::Empty,
        namespace = tracing::field::Empty,
        name = tracing::field::Empty,
        generate_name = tracing::field::Empty,
        new_name = tracing::field::Empty,
        allowed = tracing::field::Empty,
    ),
    skip_all)]
/// Name a template-generated Pod after the node it is bound to.
pub(crate) async fn mutate_pod_handler(
    extract::State(state): extract::State<Arc<ApiServerState>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let span = Span::current();

    let (review, request) = mutation::decode_review(&body).map_err(handle_mutation_error)?;

    let response = match state.pod_namer.mutate(&request, &span) {
        Ok(response) => response,
        Err(error) if error.is_denial() && state.rejection_mode == RejectionMode::AdmissionDeny => {
            error!(error = %error, "request denied");
            AdmissionResponse::reject(
                request.uid.clone(),
                error.to_string(),
                StatusCode::BAD_REQUEST.as_u16(),
            )
        }
        Err(error) => return Err(handle_mutation_error(error)),
    };
    span.record("allowed", response.allowed);

    let review = AdmissionReview {
        request: Some(request),
        ..review
    };
    let payload = review.with_response(response).to_vec().map_err(|e| {
        error!(error = %e, "could not serialize the admission review response");
        ApiError::internal(format!("could not serialize response: {e}"))
    })?;

    Ok(([(header::CONTENT_TYPE, "application/json")], payload))
}

pub(crate) async fn readiness_handler() -> StatusCode {
    StatusCode::OK
}

fn handle_mutation_error(error: MutationError) -> ApiError {
    error!(error = %error, "cannot mutate pod");
    ApiError::from(error)
}
