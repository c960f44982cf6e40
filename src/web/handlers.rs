//! Route handlers for the form server

use crate::submit::{publish, TracingProgress};
use crate::web::form::SubmissionForm;
use crate::web::pages::{render_form, render_result};
use crate::web::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;

pub(crate) async fn form_handler() -> Html<String> {
    Html(render_form(None, None))
}

pub(crate) async fn healthz_handler() -> &'static str {
    "ok"
}

pub(crate) async fn submit_handler(
    State(state): State<AppState>,
    Form(form): Form<SubmissionForm>,
) -> Response {
    let record = match form.to_record() {
        Ok(record) => record,
        Err(e) => {
            tracing::info!(error = %e, "rejected form input");
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(render_form(Some(&form), Some(&e.to_string()))),
            )
                .into_response();
        }
    };

    let submitted_at = chrono::Local::now().naive_local();
    let outcome = match publish(
        &record,
        submitted_at,
        &state.publish,
        state.service.as_ref(),
        &TracingProgress,
        state.dry_run,
    )
    .await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = %e, "could not prepare submission");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render_form(Some(&form), Some(&e.to_string()))),
            )
                .into_response();
        }
    };

    let status = if outcome.failed_step().is_some() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };

    (status, Html(render_result(&record, &outcome))).into_response()
}
