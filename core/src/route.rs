//! Positional placeholder substitution for route-style URLs.

/// Replace every `{i}` in `template` with `"<params[i]>/"`, in index order.
///
/// Placeholders without a matching parameter are left in the output as-is,
/// and so are placeholders that a substituted value happens to introduce for
/// a later index.
pub fn resolve(template: &str, params: &[String]) -> String {
    params
        .iter()
        .enumerate()
        .fold(template.to_string(), |url, (index, value)| {
            url.replace(&format!("{{{index}}}"), &format!("{value}/"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn replaces_placeholder_with_trailing_slash_segment() {
        assert_eq!(resolve("http://x/users/{0}", &params(&["5"])), "http://x/users/5/");
    }

    #[test]
    fn replaces_every_occurrence() {
        assert_eq!(resolve("{0}-{0}", &params(&["a"])), "a/-a/");
    }

    #[test]
    fn unresolved_placeholder_is_left_literal() {
        assert_eq!(resolve("http://x/{0}{1}", &params(&["a"])), "http://x/a/{1}");
    }

    #[test]
    fn extra_params_are_ignored() {
        assert_eq!(resolve("http://x/{0}", &params(&["a", "b"])), "http://x/a/");
    }

    #[test]
    fn substituted_value_can_feed_a_later_index() {
        assert_eq!(resolve("{0}", &params(&["{1}", "b"])), "b//");
    }
}
