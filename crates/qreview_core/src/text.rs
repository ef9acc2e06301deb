//! Escaping, truncation, and path helpers shared by the renderers.

/// Escape the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Truncate to `max_chars` characters, appending `"..."` only when text was cut.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// First `max_chars` characters of `text`, without any suffix.
pub fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Last `/`-separated segment of a source-document path.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Trim an optional string and drop empty values.
pub fn normalize_optional_nonempty(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Inline error block markup with the message escaped.
pub fn error_block_html(message: &str) -> String {
    format!("<p class=\"error\">{}</p>", escape_html(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_replaces_markup_characters() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn truncate_keeps_short_text_and_cuts_long_text() {
        let exact = "a".repeat(100);
        assert_eq!(truncate_with_ellipsis(&exact, 100), exact);

        let long = "b".repeat(101);
        let truncated = truncate_with_ellipsis(&long, 100);
        assert_eq!(truncated.len(), 103);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        let text = "é".repeat(5);
        assert_eq!(truncate_with_ellipsis(&text, 3), "ééé...");
        assert_eq!(char_prefix(&text, 2), "éé");
    }

    #[test]
    fn file_name_takes_last_segment() {
        assert_eq!(file_name("jsons/exams/rafi3-10.json"), "rafi3-10.json");
        assert_eq!(file_name("bare.json"), "bare.json");
    }

    #[test]
    fn error_block_escapes_message() {
        assert_eq!(
            error_block_html("bad <input>"),
            "<p class=\"error\">bad &lt;input&gt;</p>"
        );
        assert_eq!(normalize_optional_nonempty(Some("  ".to_string())), None);
    }
}
