//! Best-effort section locator for rule findings

/// Label the section containing `term`
///
/// Scans line-by-line for the first occurrence of `term`, then looks up to
/// five preceding lines for a heading: an ALL-CAPS line, a line starting
/// with "Section" or "Article", or a line ending in ':'. Falls back to
/// "Line N", then "General" when the term never appears.
pub fn find_section(text: &str, term: &str) -> String {
    let term_lower = term.to_lowercase();
    let lines: Vec<&str> = text.split('\n').collect();

    for (i, line) in lines.iter().enumerate() {
        if !line.to_lowercase().contains(&term_lower) {
            continue;
        }

        for j in (i.saturating_sub(5)..i).rev() {
            let candidate = lines[j].trim();
            if candidate.is_empty() {
                continue;
            }
            if is_all_caps(candidate)
                || candidate.starts_with("Section")
                || candidate.starts_with("Article")
                || candidate.ends_with(':')
            {
                return candidate.to_string();
            }
        }
        return format!("Line {}", i + 1);
    }

    "General".to_string()
}

/// True when the line has cased characters and all of them are uppercase
fn is_all_caps(line: &str) -> bool {
    let mut has_alpha = false;
    for c in line.chars() {
        if c.is_alphabetic() {
            has_alpha = true;
            if c.is_lowercase() {
                return false;
            }
        }
    }
    has_alpha
}
