use chrono::Utc;

const MAX_FILE_NAME_BYTES: usize = 255;

const EXECUTABLE_EXTENSIONS: &[&str] = &[".exe", ".bat", ".cmd", ".sh", ".ps1", ".vbs", ".js"];

/// Reduces an uploaded file name to a safe single path component.
///
/// Keeps only the basename, drops control characters, turns whitespace runs
/// into `_`, caps the length at 255 bytes keeping the extension, and defangs
/// executable extensions by appending `.txt`.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();

    let mut sanitized = String::with_capacity(base.len());
    let mut in_whitespace = false;
    for c in base.chars().filter(|c| !c.is_control()) {
        if c.is_whitespace() {
            if !in_whitespace {
                sanitized.push('_');
            }
            in_whitespace = true;
        } else {
            sanitized.push(c);
            in_whitespace = false;
        }
    }

    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        sanitized = format!("file_{}", Utc::now().timestamp_millis());
    }

    let ext = extension(&sanitized);
    let mut suffix_len = ext.len();
    if EXECUTABLE_EXTENSIONS.contains(&ext.to_lowercase().as_str()) {
        sanitized.push_str(".txt");
        suffix_len += ".txt".len();
    }

    // Cap applies to the final name, defang suffix included
    if sanitized.len() > MAX_FILE_NAME_BYTES {
        sanitized = truncate_keeping_suffix(&sanitized, suffix_len);
    }

    sanitized
}

/// Extension including the dot; a leading dot alone is not an extension
fn extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(0) | None => "",
        Some(i) => &name[i..],
    }
}

/// Shortens the stem so the name fits, keeping the trailing `suffix_len`
/// bytes; `suffix_len` must land on a char boundary
fn truncate_keeping_suffix(name: &str, suffix_len: usize) -> String {
    if suffix_len >= MAX_FILE_NAME_BYTES {
        return floor_to_char_boundary(name, MAX_FILE_NAME_BYTES).to_string();
    }
    let (stem, suffix) = name.split_at(name.len() - suffix_len);
    let stem = floor_to_char_boundary(stem, MAX_FILE_NAME_BYTES - suffix_len);
    format!("{}{}", stem, suffix)
}

fn floor_to_char_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
