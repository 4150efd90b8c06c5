//! Extraction of OpenAPI fragments from source-file doc comments.
//!
//! A doc-comment block (`///`, `//!`, or `/** ... */`) carries an annotation
//! when one of its lines is the tag `@openapi` (or the legacy `@swagger`).
//! Everything after the tag, up to the next `@` tag or the end of the block,
//! is a YAML fragment:
//!
//! ```text
//! /// List every vehicle.
//! ///
//! /// @openapi
//! /// /vehicles:
//! ///   get:
//! ///     summary: List vehicles
//! ///     responses:
//! ///       200:
//! ///         description: All vehicles
//! ```
//!
//! Top-level keys starting with `/` (and the entries of a `paths` key) are
//! path items, `components` and `tags` are merged into the document, and any
//! other key is ignored with a warning.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::DocsError;

const TAGS: [&str; 2] = ["@openapi", "@swagger"];

/// One raw annotation found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// 1-based line of the `@openapi` tag.
    pub line: usize,
    /// Dedented YAML text following the tag.
    pub yaml: String,
}

/// Document parts collected from all annotations.
#[derive(Debug, Clone, Default)]
pub struct Annotations {
    pub paths: Map<String, Value>,
    pub components: Map<String, Value>,
    pub tags: Vec<Value>,
}

impl Annotations {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && self.components.is_empty() && self.tags.is_empty()
    }

    /// Merge one parsed annotation into the collection.
    pub fn merge(&mut self, fragment: Map<String, Value>, origin: &str) {
        for (key, value) in fragment {
            if key.starts_with('/') {
                self.merge_path(key, value, origin);
                continue;
            }
            match key.as_str() {
                "paths" => match value {
                    Value::Object(paths) => {
                        for (path, item) in paths {
                            self.merge_path(path, item, origin);
                        }
                    }
                    _ => warn!(origin, "`paths` annotation is not a mapping; ignoring"),
                },
                "components" => match value {
                    Value::Object(kinds) => self.merge_components(kinds, origin),
                    _ => warn!(origin, "`components` annotation is not a mapping; ignoring"),
                },
                "tags" => match value {
                    Value::Array(tags) => self.merge_tags(tags),
                    _ => warn!(origin, "`tags` annotation is not a list; ignoring"),
                },
                other => warn!(origin, key = other, "Unsupported top-level annotation key; ignoring"),
            }
        }
    }

    fn merge_path(&mut self, path: String, item: Value, origin: &str) {
        let Value::Object(operations) = item else {
            warn!(origin, path = %path, "Path item is not a mapping; ignoring");
            return;
        };
        let entry = self
            .paths
            .entry(path.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(existing) = entry {
            for (method, operation) in operations {
                if existing.insert(method.clone(), operation).is_some() {
                    warn!(origin, path = %path, method = %method, "Operation defined twice; the later definition wins");
                }
            }
        }
    }

    fn merge_components(&mut self, kinds: Map<String, Value>, origin: &str) {
        for (kind, entries) in kinds {
            let Value::Object(entries) = entries else {
                warn!(origin, kind = %kind, "Component group is not a mapping; ignoring");
                continue;
            };
            let group = self
                .components
                .entry(kind)
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(group) = group {
                group.extend(entries);
            }
        }
    }

    fn merge_tags(&mut self, tags: Vec<Value>) {
        for tag in tags {
            let name = tag.get("name").cloned();
            let duplicate = name.is_some()
                && self.tags.iter().any(|existing| existing.get("name") == name.as_ref());
            if !duplicate {
                self.tags.push(tag);
            }
        }
    }
}

// ── Comment extraction ──────────────────────────────────────────────────────

struct CommentLine {
    line: usize,
    text: String,
}

fn strip_one_space(s: &str) -> String {
    s.strip_prefix(' ').unwrap_or(s).trim_end().to_string()
}

/// Block comment left open at the end of a line.
#[derive(Clone, Copy, PartialEq, Eq)]
enum OpenBlock {
    Doc,
    Plain,
}

/// `///` and `//!` bodies; `////` is an ordinary comment.
fn doc_line(trimmed: &str) -> Option<&str> {
    trimmed
        .strip_prefix("///")
        .filter(|rest| !rest.starts_with('/'))
        .or_else(|| trimmed.strip_prefix("//!"))
}

/// Group the doc comments of `source` into blocks of comment-body lines.
fn comment_blocks(source: &str) -> Vec<Vec<CommentLine>> {
    let mut blocks = Vec::new();
    let mut current: Vec<CommentLine> = Vec::new();
    let mut open: Option<OpenBlock> = None;

    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;

        if let Some(kind) = open {
            let (content, closed) = match raw.find("*/") {
                Some(end) => (&raw[..end], true),
                None => (raw, false),
            };
            if kind == OpenBlock::Doc {
                let trimmed = content.trim_start();
                let text = match trimmed.strip_prefix('*') {
                    Some(after) => strip_one_space(after),
                    None => content.trim_end().to_string(),
                };
                current.push(CommentLine { line, text });
            }
            if closed {
                if kind == OpenBlock::Doc {
                    blocks.push(std::mem::take(&mut current));
                }
                open = None;
            }
            continue;
        }

        let trimmed = raw.trim_start();
        if let Some(rest) = doc_line(trimmed) {
            current.push(CommentLine {
                line,
                text: strip_one_space(rest),
            });
            continue;
        }

        if !current.is_empty() {
            blocks.push(std::mem::take(&mut current));
        }

        // `/** */` is a doc comment; `/**/` and `/*** */` are not.
        let Some(rest) = trimmed.strip_prefix("/*") else {
            continue;
        };
        let doc = rest.starts_with('*') && !rest.starts_with("**") && !rest.starts_with("*/");
        let body = if doc { &rest[1..] } else { rest };
        match body.find("*/") {
            Some(end) if doc => blocks.push(vec![CommentLine {
                line,
                text: body[..end].trim().to_string(),
            }]),
            Some(_) => {}
            None if doc => {
                open = Some(OpenBlock::Doc);
                if !body.trim().is_empty() {
                    current.push(CommentLine {
                        line,
                        text: strip_one_space(body),
                    });
                }
            }
            None => open = Some(OpenBlock::Plain),
        }
    }

    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

fn is_tag(text: &str) -> bool {
    TAGS.iter().any(|tag| {
        text.strip_prefix(tag)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
    })
}

/// Remove the common leading indentation of the non-blank lines.
fn dedent(lines: &[String]) -> String {
    let indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start_matches(' ').len())
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|l| if l.trim().is_empty() { "" } else { &l[indent..] })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Find every `@openapi` annotation in a source file.
pub fn extract_annotations(source: &str) -> Vec<Annotation> {
    let mut found = Vec::new();

    for block in comment_blocks(source) {
        let mut current: Option<(usize, Vec<String>)> = None;
        for comment in block {
            let text = comment.text.trim();
            if is_tag(text) || text.starts_with('@') {
                if let Some((line, body)) = current.take() {
                    found.push(Annotation {
                        line,
                        yaml: dedent(&body),
                    });
                }
                if is_tag(text) {
                    current = Some((comment.line, Vec::new()));
                }
                continue;
            }
            if let Some((_, body)) = current.as_mut() {
                body.push(comment.text);
            }
        }
        if let Some((line, body)) = current {
            found.push(Annotation {
                line,
                yaml: dedent(&body),
            });
        }
    }

    found
}

/// Parse an annotation's YAML into a JSON mapping.
///
/// Returns `Ok(None)` for an empty annotation.
pub fn parse_annotation(
    path: &Path,
    annotation: &Annotation,
) -> Result<Option<Map<String, Value>>, DocsError> {
    let invalid = |message: String| DocsError::Annotation {
        path: path.to_path_buf(),
        line: annotation.line,
        message,
    };

    if annotation.yaml.trim().is_empty() {
        return Ok(None);
    }
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(&annotation.yaml).map_err(|e| invalid(e.to_string()))?;
    // Via serde_yaml::Value so integer keys such as `200:` become strings.
    match serde_json::to_value(&yaml).map_err(|e| invalid(e.to_string()))? {
        Value::Object(map) => Ok(Some(map)),
        Value::Null => Ok(None),
        _ => Err(invalid("expected a mapping at the top level".to_string())),
    }
}

/// Scan one file's contents, merging its annotations. Returns how many were found.
pub fn scan_source(
    path: &Path,
    source: &str,
    into: &mut Annotations,
) -> Result<usize, DocsError> {
    let annotations = extract_annotations(source);
    for annotation in &annotations {
        if let Some(fragment) = parse_annotation(path, annotation)? {
            let origin = format!("{}:{}", path.display(), annotation.line);
            into.merge(fragment, &origin);
        }
    }
    Ok(annotations.len())
}

/// Expand the source patterns into an ordered, de-duplicated file list.
///
/// Relative patterns are resolved against `root` when given, otherwise
/// against the working directory. A pattern matching nothing is a warning,
/// or [`DocsError::NoMatch`] when `strict` is set.
pub fn resolve_sources(
    patterns: &[String],
    root: Option<&Path>,
    strict: bool,
) -> Result<Vec<PathBuf>, DocsError> {
    let mut files = Vec::new();
    let mut seen = HashSet::new();

    for pattern in patterns {
        let full = match root {
            Some(root) if Path::new(pattern).is_relative() => {
                root.join(pattern.strip_prefix("./").unwrap_or(pattern))
            }
            _ => PathBuf::from(pattern),
        };
        let entries =
            glob::glob(&full.to_string_lossy()).map_err(|e| DocsError::Pattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;

        let mut matched = 0usize;
        for entry in entries {
            let path = entry.map_err(|e| {
                let path = e.path().to_path_buf();
                DocsError::Read {
                    path,
                    source: std::io::Error::from(e),
                }
            })?;
            if !path.is_file() {
                continue;
            }
            matched += 1;
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }

        if matched == 0 {
            if strict {
                return Err(DocsError::NoMatch {
                    pattern: pattern.clone(),
                });
            }
            warn!(pattern = %pattern, "Source pattern matched no files; the document will lack its annotations");
        }
    }

    Ok(files)
}

/// Resolve the patterns and collect the annotations of every matched file.
pub fn scan_sources(
    patterns: &[String],
    root: Option<&Path>,
    strict: bool,
) -> Result<Annotations, DocsError> {
    let files = resolve_sources(patterns, root, strict)?;
    let mut annotations = Annotations::default();

    for path in &files {
        let source = std::fs::read_to_string(path).map_err(|source| DocsError::Read {
            path: path.clone(),
            source,
        })?;
        let found = scan_source(path, &source, &mut annotations)?;
        debug!(file = %path.display(), annotations = found, "Scanned source file");
    }

    Ok(annotations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triple_slash_block() {
        let src = "\
/// Lists vehicles.
///
/// @openapi
/// /vehicles:
///   get:
///     summary: List
fn list() {}
";
        let found = extract_annotations(src);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, 3);
        assert_eq!(found[0].yaml, "/vehicles:\n  get:\n    summary: List");
    }

    #[test]
    fn star_block_comment() {
        let src = "\
/**
 * @openapi
 * components:
 *   schemas:
 *     Vehicle:
 *       type: object
 */
struct Vehicle;
";
        let found = extract_annotations(src);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, 2);
        assert!(found[0].yaml.starts_with("components:\n  schemas:"));
    }

    #[test]
    fn swagger_tag_is_accepted() {
        let found = extract_annotations("/// @swagger\n/// /a:\n///   get: {}\n");
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn other_tag_ends_annotation() {
        let src = "/// @openapi\n/// /a:\n///   get: {}\n/// @deprecated\n/// not yaml: [\n";
        let found = extract_annotations(src);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].yaml, "/a:\n  get: {}");
    }

    #[test]
    fn separate_blocks_do_not_join() {
        let src = "/// @openapi\n/// /a:\n///   get: {}\nfn a() {}\n/// /b:\n///   get: {}\n";
        let found = extract_annotations(src);
        assert_eq!(found.len(), 1);
        assert!(!found[0].yaml.contains("/b"));
    }

    #[test]
    fn plain_comments_are_ignored() {
        let src = "// @openapi\n// /a:\n/* @openapi */\nfn a() {}\n";
        assert!(extract_annotations(src).is_empty());
    }

    #[test]
    fn empty_block_comment_does_not_swallow_later_docs() {
        let src = "/**/\nfn a() {}\n\n/// @openapi\n/// /a:\n///   get: {}\nfn b() {}\n";
        let found = extract_annotations(src);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, 4);
        assert_eq!(found[0].yaml, "/a:\n  get: {}");
    }

    #[test]
    fn triple_star_block_is_not_doc() {
        let src = "/*** @openapi\n * /a:\n *   get: {}\n */\n/// @openapi\n/// /b:\n///   get: {}\n";
        let found = extract_annotations(src);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].yaml, "/b:\n  get: {}");

        assert!(extract_annotations("/*** @openapi */\nfn a() {}\n").is_empty());
    }

    #[test]
    fn quadruple_slash_is_not_doc() {
        let src = "//// @openapi\n//// /a:\n////   get: {}\nfn a() {}\n";
        assert!(extract_annotations(src).is_empty());
    }

    #[test]
    fn plain_block_contents_are_skipped() {
        let src = "/*\n/// @openapi\n/// /hidden:\n///   get: {}\n*/\n/// @openapi\n/// /shown:\n///   get: {}\n";
        let found = extract_annotations(src);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, 6);
        assert!(found[0].yaml.starts_with("/shown:"));
    }

    #[test]
    fn single_line_doc_block() {
        let found = extract_annotations("/** @openapi */\nfn a() {}\n");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, 1);
    }

    #[test]
    fn tag_prefix_is_not_a_tag() {
        assert!(!is_tag("@openapix"));
        assert!(is_tag("@openapi"));
        assert!(is_tag("@openapi  trailing"));
    }

    #[test]
    fn dedent_keeps_relative_indentation() {
        let lines = vec!["    a:".to_string(), "".to_string(), "      b: 1".to_string()];
        assert_eq!(dedent(&lines), "a:\n\n  b: 1");
    }

    #[test]
    fn integer_response_keys_become_strings() {
        let annotation = Annotation {
            line: 1,
            yaml: "/a:\n  get:\n    responses:\n      200:\n        description: ok".into(),
        };
        let map = parse_annotation(Path::new("x.rs"), &annotation).unwrap().unwrap();
        assert_eq!(map["/a"]["get"]["responses"]["200"]["description"], "ok");
    }

    #[test]
    fn merge_combines_methods_on_same_path() {
        let mut acc = Annotations::default();
        let get: Map<String, Value> =
            serde_json::from_str(r#"{"/a": {"get": {"summary": "g"}}}"#).unwrap();
        let post: Map<String, Value> =
            serde_json::from_str(r#"{"paths": {"/a": {"post": {"summary": "p"}}}}"#).unwrap();
        acc.merge(get, "t");
        acc.merge(post, "t");
        assert_eq!(acc.paths["/a"]["get"]["summary"], "g");
        assert_eq!(acc.paths["/a"]["post"]["summary"], "p");
    }

    #[test]
    fn merge_dedupes_tags_by_name() {
        let mut acc = Annotations::default();
        let frag: Map<String, Value> =
            serde_json::from_str(r#"{"tags": [{"name": "Vehicles"}, {"name": "Vehicles"}]}"#)
                .unwrap();
        acc.merge(frag, "t");
        assert_eq!(acc.tags.len(), 1);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut acc = Annotations::default();
        let frag: Map<String, Value> = serde_json::from_str(r#"{"info": {"title": "x"}}"#).unwrap();
        acc.merge(frag, "t");
        assert!(acc.is_empty());
    }
}
