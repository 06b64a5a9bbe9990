//! HTML for the interview detail and feedback pages.

use crate::html::{escape, json_script, link_button, page};
use crate::interview::detail::{DetailState, ReadyView};
use crate::interview::feedback::HOME_ROUTE;
use crate::interview::view::{FeedbackView, TechIcon};

pub fn render_detail(state: &DetailState) -> String {
    match state {
        DetailState::Loading => page(
            "Interview",
            "<div class=\"loading\"><div class=\"spinner\" role=\"status\" aria-label=\"Loading\"></div></div>\n",
        ),
        DetailState::NotFound => error_panel("Interview not found"),
        DetailState::Error { message } => error_panel(message),
        DetailState::Ready(view) => render_ready(view),
    }
}

fn error_panel(message: &str) -> String {
    let body = format!(
        "<div class=\"error-panel\">\n<p class=\"error\">{}</p>\n{}\n</div>\n",
        escape(message),
        link_button(HOME_ROUTE, "Back to Home", "btn-primary")
    );
    page("Interview", &body)
}

fn render_ready(view: &ReadyView) -> String {
    let mut body = String::new();
    body.push_str("<div class=\"interview-header\">\n");
    body.push_str(&format!(
        "<h3 class=\"capitalize\">{} Interview</h3>\n",
        escape(&view.role)
    ));
    body.push_str(&render_tech_icons(&view.tech_icons));
    body.push_str(&format!(
        "<p class=\"interview-type\">{}</p>\n",
        escape(&view.interview_type)
    ));
    body.push_str("</div>\n");

    // The agent widget boots from this payload.
    body.push_str(&format!(
        "<div id=\"agent\" data-interview-id=\"{}\"></div>\n",
        escape(&view.agent.interview_id)
    ));
    body.push_str(&format!(
        "<script type=\"application/json\" id=\"agent-launch\">{}</script>\n",
        json_script(&view.agent)
    ));
    body.push_str("<script src=\"/assets/agent.js\" defer></script>\n");

    page(&format!("{} Interview", view.role), &body)
}

fn render_tech_icons(icons: &[TechIcon]) -> String {
    if icons.is_empty() {
        return String::new();
    }
    let mut out = String::from("<div class=\"tech-icons\">\n");
    for icon in icons {
        out.push_str(&format!(
            "<div class=\"tech-icon\"><span class=\"tech-tooltip\">{tech}</span><img src=\"{url}\" alt=\"{tech}\" width=\"20\" height=\"20\"></div>\n",
            tech = escape(&icon.tech),
            url = escape(&icon.url)
        ));
    }
    out.push_str("</div>\n");
    out
}

pub fn render_no_feedback(interview_id: &str) -> String {
    let body = format!(
        "<section class=\"section-feedback\">\n<h1>No Feedback Available</h1>\n\
         <p>We couldn't find any feedback for this interview.</p>\n{}\n</section>\n",
        link_button(
            &format!("/interview/{interview_id}"),
            "Back to Interview",
            "btn-primary"
        )
    );
    page("Feedback", &body)
}

pub fn render_feedback(view: &FeedbackView) -> String {
    let mut body = String::from("<section class=\"section-feedback\">\n");

    body.push_str(&format!(
        "<h1>Feedback on the Interview - <span class=\"capitalize\">{}</span> Interview</h1>\n",
        escape(&view.role)
    ));
    body.push_str(&format!(
        "<div class=\"summary\">\n<p class=\"overall\">Overall: {}</p>\n<p class=\"date\">{}</p>\n</div>\n",
        escape(&view.score_line()),
        escape(&view.date)
    ));

    if let Some(assessment) = &view.final_assessment {
        body.push_str(&format!(
            "<div class=\"final-assessment\">\n<h2>Final Assessment</h2>\n<p>{}</p>\n</div>\n",
            escape(assessment)
        ));
    }

    if !view.categories.is_empty() {
        body.push_str("<div class=\"breakdown\">\n<h2>Interview Breakdown</h2>\n");
        for category in &view.categories {
            body.push_str(&format!(
                "<div class=\"category\">\n<p class=\"category-heading\">{}</p>\n<p class=\"category-comment\">{}</p>\n</div>\n",
                escape(&category.heading),
                escape(&category.comment)
            ));
        }
        body.push_str("</div>\n");
    }

    body.push_str(&bullet_list("Strengths", "strengths", &view.strengths));
    body.push_str(&bullet_list(
        "Areas for Improvement",
        "improvements",
        &view.areas_for_improvement,
    ));

    body.push_str(&format!(
        "<div class=\"actions\">\n{}\n{}\n</div>\n</section>\n",
        link_button(HOME_ROUTE, "Back to Dashboard", "btn-secondary"),
        link_button(&view.retake_href(), "Retake Interview", "btn-primary")
    ));

    page("Feedback", &body)
}

fn bullet_list(title: &str, class: &str, items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let mut out = format!("<div class=\"{class}\">\n<h3>{}</h3>\n<ul>\n", escape(title));
    for item in items {
        out.push_str(&format!("<li>{}</li>\n", escape(item)));
    }
    out.push_str("</ul>\n</div>\n");
    out
}
