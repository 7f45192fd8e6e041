use std::fmt;

use percent_encoding::percent_decode_str;

use crate::models::RouteParams;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// PathPattern
///
/// A route path: `/`-separated literal segments and `:name` parameters, or
/// `*` to match anything. Literals compare ASCII case-insensitively and a
/// single trailing slash on the path is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    // `None` for the catch-all.
    segments: Option<Vec<Segment>>,
}

impl PathPattern {
    pub fn new(raw: &str) -> Self {
        if raw == "*" {
            return Self {
                raw: raw.to_string(),
                segments: None,
            };
        }

        let segments = split_segments(raw)
            .into_iter()
            .map(|segment| match segment.strip_prefix(':') {
                Some(name) if !name.is_empty() => Segment::Param(name.to_string()),
                _ => Segment::Literal(segment.to_string()),
            })
            .collect();

        Self {
            raw: raw.to_string(),
            segments: Some(segments),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_catch_all(&self) -> bool {
        self.segments.is_none()
    }

    /// Names of the `:name` segments, in order.
    pub fn param_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .flatten()
            .filter_map(|segment| match segment {
                Segment::Param(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// True when both patterns match exactly the same paths: same catch-all
    /// status, same literals ignoring ASCII case, parameters in the same
    /// positions whatever their names.
    pub fn overlaps(&self, other: &PathPattern) -> bool {
        match (&self.segments, &other.segments) {
            (None, None) => true,
            (Some(ours), Some(theirs)) => {
                ours.len() == theirs.len()
                    && ours.iter().zip(theirs).all(|pair| match pair {
                        (Segment::Literal(a), Segment::Literal(b)) => a.eq_ignore_ascii_case(b),
                        (Segment::Param(_), Segment::Param(_)) => true,
                        _ => false,
                    })
            }
            _ => false,
        }
    }

    /// Matches `path` (no query string) and returns the decoded parameters.
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        let Some(segments) = &self.segments else {
            return Some(RouteParams::new());
        };

        let parts = split_segments(path);
        if parts.len() != segments.len() {
            return None;
        }

        let mut params = RouteParams::new();
        for (segment, part) in segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal.eq_ignore_ascii_case(part) => {}
                Segment::Literal(_) => return None,
                Segment::Param(_) if part.is_empty() => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), decode_segment(part));
                }
            }
        }
        Some(params)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// `/` has no segments; `/a/b/` has `["a", "b"]`.
fn split_segments(path: &str) -> Vec<&str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('/').collect()
}

/// Percent-decodes a parameter; keeps the raw text if it is not UTF-8 once decoded.
fn decode_segment(part: &str) -> String {
    percent_decode_str(part)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| part.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_matches_empty_and_slash_only() {
        let root = PathPattern::new("/");
        assert!(root.matches("/").is_some());
        assert!(root.matches("").is_some());
        assert!(root.matches("/home").is_none());
    }

    #[test]
    fn literal_is_case_insensitive_and_tolerates_trailing_slash() {
        let about = PathPattern::new("/about");
        assert!(about.matches("/ABOUT").is_some());
        assert!(about.matches("/about/").is_some());
        assert!(about.matches("/about/us").is_none());
    }

    #[test]
    fn param_is_extracted_and_decoded() {
        let search = PathPattern::new("/search/:hashtag");
        let params = search.matches("/search/%23cats").unwrap();
        assert_eq!(params.get("hashtag").map(String::as_str), Some("#cats"));
        assert_eq!(search.param_names(), vec!["hashtag"]);
    }

    #[test]
    fn param_that_is_not_utf8_once_decoded_is_kept_verbatim() {
        let user = PathPattern::new("/user/:userId");
        let params = user.matches("/user/%FF").unwrap();
        assert_eq!(params.get("userId").map(String::as_str), Some("%FF"));
    }

    #[test]
    fn overlapping_patterns_ignore_case_slash_and_param_names() {
        let about = PathPattern::new("/about");
        assert!(about.overlaps(&PathPattern::new("/About/")));
        assert!(!about.overlaps(&PathPattern::new("/terms")));

        let post = PathPattern::new("/post/:postId");
        assert!(post.overlaps(&PathPattern::new("/POST/:id")));
        assert!(!post.overlaps(&PathPattern::new("/post/latest")));
        assert!(!post.overlaps(&PathPattern::new("*")));
        assert!(PathPattern::new("*").overlaps(&PathPattern::new("*")));
    }

    #[test]
    fn param_requires_a_non_empty_segment() {
        let post = PathPattern::new("/post/:postId");
        assert!(post.matches("/post/").is_none());
        assert!(post.matches("/post//x").is_none());
    }

    #[test]
    fn catch_all_matches_anything() {
        let any = PathPattern::new("*");
        assert!(any.is_catch_all());
        assert_eq!(any.matches("/nowhere/at/all"), Some(RouteParams::new()));
    }
}
