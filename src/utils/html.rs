// src/utils/html.rs

use crate::{
    models::{question::PublicQuestion, result::ScoredResult},
    services::scoring::format_elapsed,
};

/// Escapes untrusted text for HTML output.
///
/// Everything is treated as text, so names or question bodies containing
/// markup are shown literally rather than interpreted.
pub fn escape(input: &str) -> String {
    ammonia::clean_text(input)
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/static/style.css">
</head>
<body>
<main class="container">
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        body = body
    )
}

pub fn start_page() -> String {
    layout(
        "Quiz",
        r#"<h1>Quiz</h1>
<form method="post" action="/start">
<label for="name">Your name</label>
<input id="name" name="name" type="text" maxlength="100" autofocus>
<button type="submit">Start</button>
</form>"#,
    )
}

pub fn quiz_page(display_name: &str, questions: &[PublicQuestion<'_>]) -> String {
    let mut body = format!(
        "<h1>Good luck, {}</h1>\n<p>{} questions</p>\n<form method=\"post\" action=\"/submit\">\n",
        escape(display_name),
        questions.len()
    );

    for question in questions {
        // form fields are 0-based, option values 1-based
        let field = format!("q{}", question.number - 1);
        body.push_str(&format!(
            "<fieldset class=\"question\">\n<legend>{}. {}</legend>\n",
            question.number,
            escape(question.text)
        ));
        for (i, option) in question.options.iter().enumerate() {
            body.push_str(&format!(
                "<label><input type=\"radio\" name=\"{}\" value=\"{}\"> {}</label><br>\n",
                field,
                i + 1,
                escape(option)
            ));
        }
        body.push_str("</fieldset>\n");
    }

    body.push_str("<button type=\"submit\">Submit</button>\n</form>");
    layout("Quiz", &body)
}

pub fn result_page(display_name: &str, result: &ScoredResult) -> String {
    let mut body = format!(
        "<h1>{}</h1>\n<p class=\"score\">Correct answers: {} of {}</p>\n<p class=\"time\">Time: {}</p>\n<div class=\"answers\">\n",
        escape(display_name),
        result.correct_count,
        result.total,
        format_elapsed(result.elapsed)
    );

    for review in &result.answers {
        let class = if review.is_correct { "correct" } else { "incorrect" };
        let user_choice = review
            .user_choice
            .as_deref()
            .map(escape)
            .unwrap_or_else(|| "<em>not selected</em>".to_string());

        body.push_str(&format!(
            "<div class=\"answer-item {}\">\n<strong>Question {}</strong><br>\n{}<br>\n<span class=\"user-answer\">Your answer: {}</span><br>\n<span class=\"correct-answer\">Correct: {}</span>\n</div>\n",
            class,
            review.number,
            escape(&review.question),
            user_choice,
            escape(&review.correct_choice)
        ));
    }

    body.push_str("</div>\n<a href=\"/\">Start again</a>");
    layout("Result", &body)
}
