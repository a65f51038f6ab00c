use crate::scanner::{scan, TokenKind};

/// Escapes the four characters that matter when the text ends up inside an
/// HTML attribute or element body.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Renders source text as span-wrapped markup for the editing surface.
/// Every category except whitespace is HTML-escaped before wrapping, so
/// pasted source can never smuggle markup into the page. Empty input
/// yields a single space to preserve line height.
/// 將原始碼渲染為帶 span 標記的 HTML。除空白外的所有類別都先經過跳脫，
/// 貼上的原始碼絕不可能夾帶標記進入頁面。空輸入回傳單一空格以維持行高。
pub fn highlight_html(code: &str) -> String {
    if code.is_empty() {
        return " ".to_string();
    }

    let mut html = String::with_capacity(code.len() * 2);
    for token in scan(code) {
        match token.kind.css_class() {
            Some(class) => {
                html.push_str("<span class=\"");
                html.push_str(class);
                html.push_str("\">");
                html.push_str(&escape_html(token.text));
                html.push_str("</span>");
            }
            None if token.kind == TokenKind::Whitespace => html.push_str(token.text),
            None => html.push_str(&escape_html(token.text)),
        }
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_preserves_line_height() {
        assert_eq!(highlight_html(""), " ");
    }

    #[test]
    fn markup_inside_string_literals_is_escaped() {
        let html = highlight_html("echo \"<script>alert(1)</script>\";");
        assert!(html.contains("&lt;script&gt;"), "raw markup leaked: {html}");
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn keywords_get_their_span_class() {
        let html = highlight_html("function main() {}");
        assert!(html.contains("<span class=\"text-zephyr-magenta font-bold\">function</span>"));
        assert!(html.contains("<span class=\"text-yellow-200\">main</span>("));
    }

    #[test]
    fn whitespace_passes_through_verbatim() {
        let html = highlight_html("let\t$x");
        assert!(html.contains('\t'));
    }

    #[test]
    fn stripping_markup_reconstructs_the_input() {
        // Source characters are always escaped, so every literal `<`/`>`
        // in the output belongs to a span tag.
        let source = "if ($x > 1) { echo \"a&b\"; }";
        let html = highlight_html(source);

        let mut stripped = String::new();
        let mut in_tag = false;
        for ch in html.chars() {
            match ch {
                '<' => in_tag = true,
                '>' => in_tag = false,
                _ if !in_tag => stripped.push(ch),
                _ => {}
            }
        }
        let unescaped = stripped
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&amp;", "&");
        assert_eq!(unescaped, source);
    }
}
