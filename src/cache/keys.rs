//! Cache key derivation.
//!
//! Keys are colon-delimited: `resource:METHOD[:param=value]...`. Only
//! parameters on a route's allow-list contribute, in allow-list order, so the
//! same logical request always maps to the same key regardless of how the
//! client ordered or padded its query string.

use axum::http::Method;
use url::form_urlencoded;

/// How a read-through route derives its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySpec {
    /// One key for every request, regardless of method or query.
    Fixed(String),
    /// `resource:METHOD` plus each present, non-empty allow-listed parameter.
    Parametrized {
        resource: String,
        params: &'static [&'static str],
    },
}

impl KeySpec {
    pub fn fixed(key: impl Into<String>) -> Self {
        Self::Fixed(key.into())
    }

    pub fn parametrized(resource: impl Into<String>, params: &'static [&'static str]) -> Self {
        Self::Parametrized {
            resource: resource.into(),
            params,
        }
    }

    /// Derive the key for one request.
    pub fn build(&self, method: &Method, query: Option<&str>) -> String {
        match self {
            KeySpec::Fixed(key) => key.clone(),
            KeySpec::Parametrized { resource, params } => {
                build_key(resource, method, query, params)
            }
        }
    }
}

/// Build `resource:METHOD[:name=value]*` from the allow-listed query parameters.
///
/// Values are trimmed, and skipped when nothing is left. They are then
/// form-encoded so a value containing `:` or `=` can never forge
/// another parameter segment.
pub fn build_key(
    resource: &str,
    method: &Method,
    query: Option<&str>,
    allow_list: &[&str],
) -> String {
    let mut key = format!("{resource}:{}", method.as_str());

    for name in allow_list {
        let Some(value) = first_value(query, name) else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        key.push(':');
        key.push_str(name);
        key.push('=');
        key.extend(form_urlencoded::byte_serialize(value.as_bytes()));
    }

    key
}

/// Glob pattern matching every key of a resource family.
pub fn family_pattern(base: &str) -> String {
    format!("{}:*", escape_glob(base))
}

/// Escape glob metacharacters so `input` only ever matches itself.
pub fn escape_glob(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn first_value(query: Option<&str>, name: &str) -> Option<String> {
    let query = query?;
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATEGORY: &[&str] = &["category"];
    const CATEGORY_AND_TAG: &[&str] = &["category", "tag"];

    #[test]
    fn base_form_without_parameters() {
        assert_eq!(
            build_key("projects", &Method::GET, None, CATEGORY),
            "projects:GET"
        );
    }

    #[test]
    fn recognized_parameter_is_appended() {
        assert_eq!(
            build_key("projects", &Method::GET, Some("category=web"), CATEGORY),
            "projects:GET:category=web"
        );
    }

    #[test]
    fn empty_and_absent_parameters_collapse_to_base_key() {
        let absent = build_key("projects", &Method::GET, Some(""), CATEGORY);
        let empty = build_key("projects", &Method::GET, Some("category="), CATEGORY);
        let none = build_key("projects", &Method::GET, None, CATEGORY);
        assert_eq!(absent, "projects:GET");
        assert_eq!(empty, "projects:GET");
        assert_eq!(none, "projects:GET");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(
            build_key("projects", &Method::GET, Some("category=%20web"), CATEGORY),
            "projects:GET:category=web"
        );
        assert_eq!(
            build_key("projects", &Method::GET, Some("category=web+"), CATEGORY),
            "projects:GET:category=web"
        );
        assert_eq!(
            build_key("projects", &Method::GET, Some("category=%20"), CATEGORY),
            "projects:GET"
        );
    }

    #[test]
    fn unrecognized_parameters_are_ignored() {
        let noisy = build_key(
            "projects",
            &Method::GET,
            Some("_=1712345&category=web&utm_source=x"),
            CATEGORY,
        );
        assert_eq!(noisy, "projects:GET:category=web");
    }

    #[test]
    fn allow_list_order_wins_over_request_order() {
        let a = build_key(
            "projects",
            &Method::GET,
            Some("tag=rust&category=web"),
            CATEGORY_AND_TAG,
        );
        let b = build_key(
            "projects",
            &Method::GET,
            Some("category=web&tag=rust"),
            CATEGORY_AND_TAG,
        );
        assert_eq!(a, b);
        assert_eq!(a, "projects:GET:category=web:tag=rust");
    }

    #[test]
    fn distinct_values_produce_distinct_keys() {
        let web = build_key("projects", &Method::GET, Some("category=web"), CATEGORY);
        let cli = build_key("projects", &Method::GET, Some("category=cli"), CATEGORY);
        assert_ne!(web, cli);
    }

    #[test]
    fn method_is_part_of_the_key() {
        let get = build_key("projects", &Method::GET, None, CATEGORY);
        let head = build_key("projects", &Method::HEAD, None, CATEGORY);
        assert_ne!(get, head);
    }

    #[test]
    fn values_cannot_forge_extra_segments() {
        let forged = build_key(
            "projects",
            &Method::GET,
            Some("category=web%3Atag%3Drust"),
            CATEGORY_AND_TAG,
        );
        let genuine = build_key(
            "projects",
            &Method::GET,
            Some("category=web&tag=rust"),
            CATEGORY_AND_TAG,
        );
        assert_ne!(forged, genuine);
    }

    #[test]
    fn percent_and_plus_encodings_agree() {
        let plus = build_key("projects", &Method::GET, Some("category=web+app"), CATEGORY);
        let pct = build_key("projects", &Method::GET, Some("category=web%20app"), CATEGORY);
        assert_eq!(plus, pct);
    }

    #[test]
    fn first_occurrence_of_repeated_parameter_wins() {
        let key = build_key(
            "projects",
            &Method::GET,
            Some("category=web&category=cli"),
            CATEGORY,
        );
        assert_eq!(key, "projects:GET:category=web");
    }

    #[test]
    fn fixed_spec_ignores_request_shape() {
        let spec = KeySpec::fixed("hero");
        assert_eq!(spec.build(&Method::GET, Some("x=1")), "hero");
        assert_eq!(spec.build(&Method::HEAD, None), "hero");
    }

    #[test]
    fn family_pattern_escapes_metacharacters() {
        assert_eq!(family_pattern("projects"), "projects:*");
        assert_eq!(family_pattern("a*b"), "a\\*b:*");
        assert_eq!(escape_glob("[x]?"), "\\[x\\]\\?");
    }
}
