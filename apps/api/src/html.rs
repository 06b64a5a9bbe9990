//! Minimal HTML helpers shared by the server-rendered pages.

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Serializes `value` for embedding inside a `<script type="application/json">` block.
pub fn json_script(value: &impl serde::Serialize) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace('<', "\\u003c")
}

/// Wraps page content in the document shell.
pub fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{} | PrepView</title>\n<link rel=\"stylesheet\" href=\"/assets/app.css\">\n\
         </head>\n<body>\n<main class=\"root-layout\">\n{}</main>\n</body>\n</html>\n",
        escape(title),
        body
    )
}

/// `<a>` styled as a button.
pub fn link_button(href: &str, label: &str, class: &str) -> String {
    format!(
        "<a href=\"{}\" class=\"{}\">{}</a>",
        escape(href),
        class,
        escape(label)
    )
}
