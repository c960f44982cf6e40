//! HTML for the form page and the result page

use crate::submit::{PublishOutcome, PublishState};
use crate::types::SubmissionRecord;
use crate::web::form::{FieldKind, SubmissionForm, FIELDS};
use std::fmt::Write;

const TITLE: &str = "Submit to sonidb";

/// Escape text for HTML element and attribute content
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(body: &str) -> String {
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{TITLE}</title></head><body>\
<h1>{TITLE}</h1>{body}</body></html>"
    )
}

/// The submission form, optionally prefilled and with an error banner
pub fn render_form(values: Option<&SubmissionForm>, error: Option<&str>) -> String {
    let mut body = String::new();

    if let Some(err) = error {
        let _ = write!(body, "<p class=\"error\" role=\"alert\">{}</p>", escape_html(err));
    }

    body.push_str("<form method=\"post\" action=\"/submit\" id=\"submission_form\">");
    for field in FIELDS {
        let value = values.map_or("", |v| v.value(field.name));
        let input_type = match field.kind {
            FieldKind::Text => "type=\"text\"",
            FieldKind::Number => "type=\"number\" step=\"any\"",
        };
        let _ = write!(
            body,
            "<p><label for=\"{name}\">{label}</label><br>\
<input {input_type} id=\"{name}\" name=\"{name}\" value=\"{value}\">",
            name = field.name,
            label = escape_html(field.label),
            value = escape_html(value),
        );
        if let Some(help) = field.help {
            let _ = write!(body, "<br><small>{}</small>", escape_html(help));
        }
        body.push_str("</p>");
    }
    body.push_str("<p><button type=\"submit\">Submit</button></p></form>");

    page(&body)
}

/// Echo of the submitted record plus what happened to it
pub fn render_result(record: &SubmissionRecord, outcome: &PublishOutcome) -> String {
    let mut body = format!(
        "<p>Submitted <code>{}</code></p>",
        escape_html(&record.to_string())
    );

    let _ = write!(
        body,
        "<p>File <code>{}</code> on branch <code>{}</code></p>",
        escape_html(&outcome.target_path),
        escape_html(&outcome.branch_name)
    );

    match (outcome.state, &outcome.pull_request) {
        (PublishState::PullRequestOpened, Some(pr)) => {
            let _ = write!(
                body,
                "<p class=\"success\">Pull request <a href=\"{url}\">#{number}</a> opened for review.</p>",
                url = escape_html(&pr.html_url),
                number = pr.number
            );
        }
        (PublishState::FailedAt(step), _) => {
            let _ = write!(
                body,
                "<p class=\"error\" role=\"alert\">Publishing failed at step: {}. {}</p>",
                escape_html(&step.to_string()),
                escape_html(outcome.error.as_deref().unwrap_or_default())
            );
        }
        _ if outcome.dry_run => {
            body.push_str("<p>Dry run: nothing was sent to the repository.</p>");
        }
        _ => {}
    }

    body.push_str("<p><a href=\"/\">Submit another record</a></p>");
    page(&body)
}
