/// Strip markdown code fences that models sometimes wrap JSON output in,
/// even when a JSON response type was requested.
///
/// Removes a leading ```` ``` ```` (optionally tagged `json`, any case), a
/// trailing ```` ``` ````, and surrounding whitespace. Stripping repeats until
/// nothing changes, so applying it to its own output is a no-op.
pub fn strip_code_fences(text: &str) -> &str {
    let mut current = text.trim();
    loop {
        let next = strip_once(current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_once(text: &str) -> &str {
    let mut s = text;
    if let Some(rest) = s.strip_prefix("```") {
        s = match rest.get(..4) {
            Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
            _ => rest,
        };
    }
    if let Some(rest) = s.trim_end().strip_suffix("```") {
        s = rest;
    }
    s.trim()
}
