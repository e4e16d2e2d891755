//! Free-text preparation for the Tantivy query parser.
//!
//! Search text comes from end users, not from query authors: every
//! character with a meaning in Tantivy query syntax is escaped so that
//! `tomato (stew)` or `chick-peas: spicy` never fail to parse and never
//! address a field. A fully quoted input stays a phrase query.
//!
//! Text is lower-cased as well, which keeps `AND`/`OR`/`NOT` from being
//! read as operators. The default tokenizer lower-cases anyway, so
//! matching is unaffected.

/// Prepare user text for [`tantivy::query::QueryParser`].
///
/// # Examples
///
/// ```
/// use nutrigraph::core::text::prepare_text_query;
///
/// assert_eq!(prepare_text_query("  Tomato Stew "), "tomato stew");
/// assert_eq!(prepare_text_query("region:east"), "region\\:east");
/// assert_eq!(prepare_text_query("\"doro wat\""), "\"doro wat\"");
/// ```
pub fn prepare_text_query(query: &str) -> String {
    let trimmed = query.trim();

    if trimmed.is_empty() {
        return String::new();
    }

    let lowered = trimmed.to_lowercase();

    // Fully quoted input: keep the phrase, escape what is inside
    if lowered.starts_with('"') && lowered.ends_with('"') && lowered.len() > 1 {
        let inner = &lowered[1..lowered.len() - 1];
        return format!("\"{}\"", escape_all_special(inner));
    }

    escape_all_special(&lowered)
}

/// Escape every Tantivy query syntax character.
///
/// Escaped: `: { } [ ] ( ) @ " \ + - ! ^ ~ * < > = ' ?`
fn escape_all_special(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 2);
    for ch in s.chars() {
        match ch {
            ':' | '{' | '}' | '[' | ']' | '(' | ')' | '@' | '"' | '\\' | '+' | '-' | '!' | '^'
            | '~' | '*' | '<' | '>' | '=' | '\'' | '?' => {
                result.push('\\');
                result.push(ch);
            }
            _ => result.push(ch),
        }
    }
    result
}
