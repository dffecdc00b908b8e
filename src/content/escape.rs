/// Replaces characters with a special meaning in HTML by their entities.
///
/// Every piece of store-sourced text goes through here before it is
/// concatenated into markup; only vetted structural wrappers bypass it.
/// Escapes `&`, `"`, `<`, `>` and `'`, so the result is safe in both
/// element content and attribute values.
pub fn escape_html(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut result = String::with_capacity(s.len());
    let mut start = 0;

    for (index, &byte) in bytes.iter().enumerate() {
        let replacement = match byte {
            b'&' => "&amp;",
            b'"' => "&quot;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'\'' => "&#39;",
            _ => continue,
        };

        result.push_str(&s[start..index]);
        result.push_str(replacement);
        start = index + 1;
    }

    if start == 0 {
        return s.to_string();
    }

    result.push_str(&s[start..]);
    result
}
