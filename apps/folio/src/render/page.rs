//! Server-rendered page: upload form, question form, status notice, transcript.
//!
//! Element ids (`cv`, `repo`, `q`, `chat`, `notice`) are stable; anything
//! styling or scripting the page keys off them.

use std::fmt::Write;

use uuid::Uuid;

use crate::assistant::models::TranscriptEntry;
use crate::render::escape_html;

/// Outcome banner shown above the transcript after a form submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

impl Notice {
    fn class(&self) -> &'static str {
        match self {
            Notice::Success(_) => "notice success",
            Notice::Failure(_) => "notice failure",
        }
    }

    fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Failure(m) => m,
        }
    }
}

pub struct PageView<'a> {
    pub session: Uuid,
    pub notice: Option<&'a Notice>,
    pub entries: &'a [TranscriptEntry],
}

const STYLE: &str = "body{font-family:sans-serif;max-width:44rem;margin:2rem auto;padding:0 1rem}\
form{margin-bottom:1.5rem}\
.notice{padding:.5rem .75rem;border-radius:4px;margin-bottom:1rem}\
.success{background:#e6f4ea;color:#1e4620}\
.failure{background:#fce8e6;color:#8c1d18}\
.exchange{border-top:1px solid #ddd;padding:.5rem 0}\
.question{font-weight:bold;margin:0}\
.answer{white-space:pre-wrap;margin:.25rem 0 0}\
time{color:#777;font-size:.8em}";

pub fn render_page(view: &PageView<'_>) -> String {
    let session = view.session;
    let mut html = String::with_capacity(2048 + view.entries.len() * 256);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Folio: ask about my CV and projects</title>\n");
    let _ = writeln!(html, "<style>{STYLE}</style>\n</head>\n<body>");
    html.push_str("<h1>Folio</h1>\n");

    let _ = writeln!(
        html,
        "<form id=\"ingest-form\" method=\"post\" action=\"/s/{session}/ingest\" enctype=\"multipart/form-data\">\n\
         <label for=\"cv\">CV</label> <input type=\"file\" id=\"cv\" name=\"cv\">\n\
         <label for=\"repo\">Repository</label> <input type=\"text\" id=\"repo\" name=\"repo_link\" placeholder=\"https://github.com/you/project\">\n\
         <button type=\"submit\">Ingest</button>\n</form>"
    );

    if let Some(notice) = view.notice {
        let _ = writeln!(
            html,
            "<div id=\"notice\" class=\"{}\" role=\"status\">{}</div>",
            notice.class(),
            escape_html(notice.message())
        );
    } else {
        html.push_str("<div id=\"notice\" role=\"status\"></div>\n");
    }

    let _ = writeln!(
        html,
        "<form id=\"ask-form\" method=\"post\" action=\"/s/{session}/ask\">\n\
         <input type=\"text\" id=\"q\" name=\"question\" placeholder=\"Ask a question\" autofocus>\n\
         <button type=\"submit\">Ask</button>\n</form>"
    );

    html.push_str("<div id=\"chat\">\n");
    for entry in view.entries {
        let _ = writeln!(
            html,
            "<div class=\"exchange\"><p class=\"question\">{}</p><p class=\"answer\">{}</p><time datetime=\"{}\">{}</time></div>",
            escape_html(&entry.question),
            escape_html(&entry.answer),
            entry.answered_at.to_rfc3339(),
            entry.answered_at.format("%H:%M:%S UTC"),
        );
    }
    html.push_str("</div>\n</body>\n</html>\n");

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(question: &str, answer: &str) -> TranscriptEntry {
        TranscriptEntry {
            question: question.to_string(),
            answer: answer.to_string(),
            answered_at: Utc::now(),
        }
    }

    fn chat_section(html: &str) -> &str {
        let start = html.find("<div id=\"chat\">").unwrap();
        &html[start..]
    }

    #[test]
    fn test_forms_target_session_routes() {
        let session = Uuid::new_v4();
        let html = render_page(&PageView {
            session,
            notice: None,
            entries: &[],
        });
        assert!(html.contains(&format!("action=\"/s/{session}/ingest\"")));
        assert!(html.contains(&format!("action=\"/s/{session}/ask\"")));
        assert!(html.contains("enctype=\"multipart/form-data\""));
        for id in ["id=\"cv\"", "id=\"repo\"", "id=\"q\"", "id=\"chat\"", "id=\"notice\""] {
            assert!(html.contains(id), "missing {id}");
        }
    }

    #[test]
    fn test_entries_rendered_in_order() {
        let entries = vec![entry("first?", "one"), entry("second?", "42")];
        let html = render_page(&PageView {
            session: Uuid::new_v4(),
            notice: None,
            entries: &entries,
        });
        let chat = chat_section(&html);
        let one = chat.find("<p class=\"answer\">one</p>").unwrap();
        let two = chat.find("<p class=\"answer\">42</p>").unwrap();
        assert!(one < two);
    }

    #[test]
    fn test_answer_markup_is_escaped() {
        let entries = vec![entry("hi", "<img src=x onerror=alert(1)>")];
        let html = render_page(&PageView {
            session: Uuid::new_v4(),
            notice: None,
            entries: &entries,
        });
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
    }

    #[test]
    fn test_success_and_failure_notices_differ() {
        let ok = Notice::Success("Knowledge ingested".to_string());
        let failed = Notice::Failure("Ingestion failed: <500>".to_string());
        let session = Uuid::new_v4();

        let ok_html = render_page(&PageView {
            session,
            notice: Some(&ok),
            entries: &[],
        });
        let failed_html = render_page(&PageView {
            session,
            notice: Some(&failed),
            entries: &[],
        });

        assert!(ok_html.contains("class=\"notice success\""));
        assert!(failed_html.contains("class=\"notice failure\""));
        assert!(failed_html.contains("Ingestion failed: &lt;500&gt;"));
        assert!(!failed_html.contains("Knowledge ingested"));
    }
}
