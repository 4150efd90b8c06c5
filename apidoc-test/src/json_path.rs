//! Dotted paths into JSON documents: `info.title`, `servers[1].url`,
//! `paths./vehicles/{id}.get`, `items.len()`.
//!
//! Keys are split on `.` only, so OpenAPI path keys with `/` and `{}` can be
//! written as-is.

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
    /// `len()`: element count of an array or object, char count of a string.
    Len,
}

/// Split a path into segments.
///
/// # Panics
///
/// On an unclosed `[` or a non-numeric index.
pub fn parse_path(path: &str) -> Vec<Segment> {
    path.split('.')
        .filter(|part| !part.is_empty())
        .flat_map(parse_part)
        .collect()
}

fn parse_part(part: &str) -> Vec<Segment> {
    if part == "len()" {
        return vec![Segment::Len];
    }

    let (key, mut rest) = part.split_at(part.find('[').unwrap_or(part.len()));
    let mut segments = Vec::new();
    if !key.is_empty() {
        segments.push(Segment::Key(key.to_string()));
    }
    while let Some(inner) = rest.strip_prefix('[') {
        let (index, tail) = inner
            .split_once(']')
            .unwrap_or_else(|| panic!("unclosed '[' in JSON path part {part:?}"));
        let index = index
            .parse()
            .unwrap_or_else(|_| panic!("JSON path index {index:?} is not a number"));
        segments.push(Segment::Index(index));
        rest = tail;
    }
    segments
}

/// Follow `path` from `root`. Missing keys and indices give `Value::Null`.
pub fn resolve_path(root: &Value, path: &str) -> Value {
    parse_path(path)
        .into_iter()
        .fold(root.clone(), |current, segment| match segment {
            Segment::Key(key) => current.get(&key).cloned().unwrap_or(Value::Null),
            Segment::Index(index) => current.get(index).cloned().unwrap_or(Value::Null),
            Segment::Len => Value::from(len_of(&current)),
        })
}

fn len_of(value: &Value) -> usize {
    match value {
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        Value::String(s) => s.chars().count(),
        other => panic!("len() needs an array, object or string, found {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_path_key_is_one_segment() {
        assert_eq!(
            parse_path("paths./vehicles/{id}.get"),
            vec![
                Segment::Key("paths".into()),
                Segment::Key("/vehicles/{id}".into()),
                Segment::Key("get".into()),
            ]
        );
    }

    #[test]
    fn chained_indices() {
        assert_eq!(
            parse_path("grid[1][0]"),
            vec![Segment::Key("grid".into()), Segment::Index(1), Segment::Index(0)]
        );
    }

    #[test]
    #[should_panic(expected = "unclosed")]
    fn unclosed_bracket_panics() {
        parse_path("servers[0");
    }
}
