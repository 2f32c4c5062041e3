//! Minimal HTML pages for the lookup form.

use crate::error::ApiError;
use axum::response::{Html, IntoResponse, Response};

const STYLE: &str = "body{font-family:-apple-system,BlinkMacSystemFont,\"Segoe UI\",Roboto,Arial,sans-serif;\
color:#333;margin:0;padding:40px;background:#f7f8fa;text-align:center}\
.container{background:#fff;padding:20px;border-radius:12px;margin:auto;width:60%;max-width:600px}\
pre{text-align:left;background:#f4f4f4;padding:15px;border-radius:8px;border:1px solid #ddd;overflow-x:auto}\
input{padding:10px;margin:8px 0;font-size:16px}";

/// Escapes text for inclusion in HTML element content or attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Option Price Fetcher</title>\n<style>{}</style>\n</head>\n\
         <body>\n<div class=\"container\">\n{}\n</div>\n</body>\n</html>\n",
        STYLE, body
    )
}

/// Lookup form.
#[must_use]
pub fn form_page() -> String {
    layout(
        "<h1>Please Enter Option Details</h1>\n\
         <form method=\"post\" action=\"/\">\n\
         Company Symbol: <input type=\"text\" name=\"company\"><br>\n\
         Date (YYYY-MM-DD): <input type=\"text\" name=\"date\"><br>\n\
         Strike Price: <input type=\"number\" step=\"any\" name=\"strike\"><br>\n\
         <input type=\"submit\" value=\"Submit\">\n\
         </form>",
    )
}

/// Report page with the plain-text report in a `<pre>` block.
#[must_use]
pub fn result_page(report: &str) -> String {
    layout(&format!(
        "<h1>Option Price Results</h1>\n<pre>{}</pre>\n<a href=\"/\">Try another</a>",
        escape_html(report)
    ))
}

/// Error page for rejected form submissions.
#[must_use]
pub fn error_page(message: &str) -> String {
    layout(&format!(
        "<h1>Invalid Request</h1>\n<pre>{}</pre>\n<a href=\"/\">Try another</a>",
        escape_html(message)
    ))
}

/// [`ApiError`] rendered as an HTML page instead of JSON.
#[derive(Debug)]
pub struct HtmlError(pub ApiError);

impl From<ApiError> for HtmlError {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

impl IntoResponse for HtmlError {
    fn into_response(self) -> Response {
        let (status, _) = self.0.status_and_code();
        (status, Html(error_page(&self.0.to_string()))).into_response()
    }
}
