//! In-page probes evaluated by the Chrome driver.
//!
//! Selectors are embedded as JSON string literals so quotes inside attribute
//! selectors (`input[name="email"]`) survive intact.

fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

pub fn text_content(selector: &str) -> String {
    format!(
        r#"
        (function(sel) {{
            const element = document.querySelector(sel);
            return element ? element.textContent : null;
        }})({})
        "#,
        js_string(selector)
    )
}

pub fn is_visible(selector: &str) -> String {
    format!(
        r#"
        (function(sel) {{
            const element = document.querySelector(sel);
            if (!element) return false;
            const style = window.getComputedStyle(element);
            if (style.display === 'none' || style.visibility === 'hidden') return false;
            const rect = element.getBoundingClientRect();
            return rect.width > 0 && rect.height > 0;
        }})({})
        "#,
        js_string(selector)
    )
}

pub fn get_attribute(selector: &str, name: &str) -> String {
    format!(
        r#"
        (function(sel, name) {{
            const element = document.querySelector(sel);
            return element ? element.getAttribute(name) : null;
        }})({}, {})
        "#,
        js_string(selector),
        js_string(name)
    )
}

/// Clears an input so a following keystroke sequence replaces its value
pub const CLEAR_VALUE: &str = r#"
    function() {
        this.value = '';
        this.dispatchEvent(new Event('input', { bubbles: true }));
    }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_with_quotes_are_escaped() {
        let script = text_content(r#"input[name="email"]"#);
        assert!(script.contains(r#""input[name=\"email\"]""#));
    }

    #[test]
    fn attribute_script_embeds_both_arguments() {
        let script = get_attribute("#email", "required");
        assert!(script.contains(r##""#email""##));
        assert!(script.contains(r#""required""#));
    }
}
