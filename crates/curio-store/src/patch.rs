//! In-place edits of top-level keys in a YAML document.
//!
//! Write-back must keep every byte the step did not change (comments, key
//! order, quoting, list indentation), so enrichment fields are patched into the
//! original text instead of re-serializing the whole record.

/// Set `key` to the already-formatted scalar `value`.
///
/// An existing top-level `key:` line (plain, single- or double-quoted key) and
/// any indented continuation lines under it are replaced in place, keeping the
/// key as written. A missing key is appended at the end of the document.
pub fn set_key(doc: &str, key: &str, value: &str) -> String {
    set_entry(doc, key, |token, newline| format!("{token}: {value}{newline}"))
}

/// Set `key` to a block mapping of already-formatted `field: value` pairs,
/// indented by two spaces.
pub fn set_block(doc: &str, key: &str, fields: &[(&str, String)]) -> String {
    set_entry(doc, key, |token, newline| {
        let mut entry = format!("{token}:{newline}");
        for (field, value) in fields {
            entry.push_str(&format!("  {field}: {value}{newline}"));
        }
        entry
    })
}

/// Remove a top-level `key` and its continuation lines, if present.
pub fn remove_key(doc: &str, key: &str) -> String {
    let lines: Vec<&str> = doc.split_inclusive('\n').collect();
    match find_key(&lines, key) {
        Some(span) => lines[..span.start]
            .iter()
            .chain(lines[span.end..].iter())
            .copied()
            .collect(),
        None => doc.to_string(),
    }
}

fn set_entry(doc: &str, key: &str, render: impl Fn(&str, &str) -> String) -> String {
    let lines: Vec<&str> = doc.split_inclusive('\n').collect();
    match find_key(&lines, key) {
        Some(span) => {
            let line = lines[span.start];
            let entry = render(&line[..span.token_len], line_ending(line));
            let mut out = String::with_capacity(doc.len() + entry.len());
            lines[..span.start].iter().for_each(|line| out.push_str(line));
            out.push_str(&entry);
            lines[span.end..].iter().for_each(|line| out.push_str(line));
            out
        }
        None => {
            let mut out = doc.to_string();
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&render(key, "\n"));
            out
        }
    }
}

/// Lines `[start, end)` occupied by a top-level key, and the length of the
/// key as written on its first line.
struct KeySpan {
    start: usize,
    end: usize,
    token_len: usize,
}

fn find_key(lines: &[&str], key: &str) -> Option<KeySpan> {
    let (start, token_len) = lines
        .iter()
        .enumerate()
        .find_map(|(i, line)| key_token_len(line, key).map(|len| (i, len)))?;
    let inline_value = lines[start][token_len + 1..].trim();
    let is_block = inline_value.is_empty() || inline_value.starts_with('#');

    let mut end = start + 1;
    while end < lines.len() && is_continuation(lines[end], is_block) {
        end += 1;
    }
    Some(KeySpan {
        start,
        end,
        token_len,
    })
}

/// Length of the key token if `line` starts the top-level entry `key`.
fn key_token_len(line: &str, key: &str) -> Option<usize> {
    [key.to_string(), format!("\"{key}\""), format!("'{key}'")]
        .into_iter()
        .find(|token| {
            line.strip_prefix(token.as_str())
                .and_then(|rest| rest.trim_start_matches([' ', '\t']).strip_prefix(':'))
                .is_some_and(|rest| rest.is_empty() || rest.starts_with([' ', '\t', '\r', '\n']))
        })
        .map(|token| line.find(':').unwrap_or(token.len()))
}

fn is_continuation(line: &str, is_block: bool) -> bool {
    if line.starts_with([' ', '\t']) {
        return !line.trim().is_empty();
    }
    // Block sequences may sit at column zero under their key.
    is_block && (line.starts_with("- ") || line.trim_end() == "-")
}

fn line_ending(line: &str) -> &'static str {
    if line.ends_with("\r\n") { "\r\n" } else { "\n" }
}
