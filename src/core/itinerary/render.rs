//! HTML rendering of an itinerary: Markdown body inside a fixed style template.

use pulldown_cmark::{Options, Parser, html};

const PAGE_TEMPLATE: &str = r#"<html>
<head>
    <meta charset="utf-8">
    <title>{{title}}</title>
    <style>
        body { font-family: 'Helvetica', Arial, sans-serif; line-height: 1.6; color: #333; max-width: 900px; margin: 0 auto; padding: 20px; }
        h1 { color: #2c3e50; border-bottom: 2px solid #3498db; padding-bottom: 10px; }
        h2 { color: #2980b9; }
        h3 { color: #16a085; display: flex; align-items: center; }
        .restaurant { background: #f9f9f9; padding: 15px; border-radius: 5px; margin-bottom: 15px; }
        .tip { background: #e8f4fc; padding: 10px; border-left: 4px solid #3498db; margin: 15px 0; }
        hr { border: 0; height: 1px; background: #ddd; margin: 30px 0; }
        a { color: #3498db; text-decoration: none; }
        a:hover { text-decoration: underline; }
        .map-link { margin-left: 10px; font-size: 0.8em; }
    </style>
</head>
<body>
{{body}}
</body>
</html>
"#;

const PENDING_BODY: &str = r#"<div style="text-align:center; padding:50px; color:#666; font-style:italic">
    <h3>Generating your personalized food itinerary...</h3>
    <p>This may take a moment</p>
</div>"#;

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn fill(title: &str, body: &str) -> String {
    PAGE_TEMPLATE
        .replace("{{title}}", &escape_text(title))
        .replace("{{body}}", body)
}

/// Convert itinerary Markdown to a styled, standalone HTML page.
pub fn render_html(title: &str, markdown: &str) -> String {
    let parser = Parser::new_ext(
        markdown,
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH,
    );
    let mut body = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut body, parser);
    fill(title, &body)
}

/// Placeholder page shown while an itinerary is being generated.
pub fn render_pending_html(title: &str) -> String {
    fill(title, PENDING_BODY)
}
