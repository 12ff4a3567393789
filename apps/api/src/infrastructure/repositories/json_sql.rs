//! SQL fragments for JSONB id lists.
//!
//! Stored lists may be legacy non-array values, so every fragment first
//! coerces the column to an array. Ids are bound as text parameters.

/// `column` as a JSONB array; anything else reads as `[]`.
pub(crate) fn as_array(column: &str) -> String {
    format!("(CASE WHEN jsonb_typeof({column}) = 'array' THEN {column} ELSE '[]'::jsonb END)")
}

/// Append the text parameter `param` unless it is already present.
pub(crate) fn push_id(column: &str, param: &str) -> String {
    let arr = as_array(column);
    format!(
        "CASE WHEN {arr} @> jsonb_build_array({param}::text) THEN {arr} \
         ELSE {arr} || jsonb_build_array({param}::text) END"
    )
}

/// Remove every occurrence of the text parameter `param`.
pub(crate) fn pull_id(column: &str, param: &str) -> String {
    format!("{} - {param}::text", as_array(column))
}

/// Remove every element listed in the text-array parameter `param`.
pub(crate) fn pull_ids(column: &str, param: &str) -> String {
    format!("{} - {param}::text[]", as_array(column))
}

/// Escape `%`, `_` and `\` for a case-insensitive substring `ILIKE` pattern.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

/// Serialize ids the way they are stored in JSONB lists.
pub(crate) fn id_strings(ids: &[uuid::Uuid]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}
