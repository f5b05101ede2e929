use crate::dom::ElementAttributes;
use crate::escape::css_escape;
use crate::options::IDENTITY_ATTRIBUTE;

/// Derive candidate selectors for an element, most specific first.
///
/// One candidate is emitted per attribute in `attribute_priority` that the
/// element carries with a non-empty value. When none apply, the lowercase tag
/// name is returned as the sole fallback, so the result is never empty.
pub fn derive_candidates<E>(element: &E, attribute_priority: &[String]) -> Vec<String>
where
    E: ElementAttributes + ?Sized,
{
    let mut candidates: Vec<String> = attribute_priority
        .iter()
        .filter_map(|attr| {
            let value = element.attribute(attr).filter(|v| !v.is_empty())?;
            Some(candidate_for(attr, value))
        })
        .collect();

    if candidates.is_empty() {
        candidates.push(element.tag_name().to_ascii_lowercase());
    }

    candidates
}

fn candidate_for(attribute: &str, value: &str) -> String {
    if attribute == IDENTITY_ATTRIBUTE {
        format!("#{}", css_escape(value))
    } else {
        format!("[{}=\"{}\"]", attribute, css_escape(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FakeElement {
        tag: &'static str,
        attrs: HashMap<&'static str, &'static str>,
    }

    impl ElementAttributes for FakeElement {
        fn tag_name(&self) -> &str {
            self.tag
        }

        fn attribute(&self, name: &str) -> Option<&str> {
            self.attrs.get(name).copied()
        }
    }

    fn priority() -> Vec<String> {
        crate::options::ScanOptions::default().attribute_priority
    }

    #[test]
    fn test_candidates_follow_priority_order() {
        let el = FakeElement {
            tag: "input",
            attrs: HashMap::from([
                ("placeholder", "Your email"),
                ("name", "email"),
                ("id", "email-field"),
            ]),
        };

        let candidates = derive_candidates(&el, &priority());
        assert_eq!(
            candidates,
            vec![
                "#email-field".to_string(),
                "[name=\"email\"]".to_string(),
                "[placeholder=\"Your\\ email\"]".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_values_are_ignored() {
        let el = FakeElement {
            tag: "TEXTAREA",
            attrs: HashMap::from([("id", ""), ("title", "")]),
        };

        assert_eq!(derive_candidates(&el, &priority()), vec!["textarea"]);
    }

    #[test]
    fn test_identity_value_is_escaped() {
        let el = FakeElement {
            tag: "input",
            attrs: HashMap::from([("id", "user.name")]),
        };

        assert_eq!(derive_candidates(&el, &priority()), vec!["#user\\.name"]);
    }
}
