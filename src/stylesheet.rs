//! CSS emission for the generated image set.
//!
//! Pure text generation: one base rule, then one `max-width` media block per
//! breakpoint. Blocks are emitted in breakpoints order, never re-sorted; the
//! CSS cascade relies on later rules overriding earlier ones exactly as the
//! caller ordered the width list.

/// Inputs for one stylesheet rendering.
#[derive(Debug, Clone)]
pub struct StylesheetSpec<'a> {
    /// CSS class the rules target
    pub class: &'a str,
    /// URL base path prefixed to every image reference
    pub base_path: &'a str,
    /// File-name stem shared by the optimized image and its derivatives
    pub base_name: &'a str,
    /// File extension of the optimized image and derivatives
    pub extension: &'a str,
    /// Optional orientation keyword wrapping every rule
    pub orientation: Option<&'a str>,
    /// Widths to emit media blocks for, in emission order
    pub breakpoints: &'a [u32],
}

/// Render the stylesheet text.
pub fn render(spec: &StylesheetSpec) -> String {
    let mut css = String::new();

    let base_url = format!("{}/{}.{}", spec.base_path, spec.base_name, spec.extension);
    match spec.orientation {
        Some(orientation) => {
            css.push_str(&format!(
                "@media (orientation: {}) {{\n    .{} {{ background-image: url({}); }}\n}}\n",
                orientation, spec.class, base_url
            ));
        }
        None => {
            css.push_str(&format!(
                ".{} {{ background-image: url({}); }}\n",
                spec.class, base_url
            ));
        }
    }

    for &width in spec.breakpoints {
        let url = format!(
            "{}/{}-{}.{}",
            spec.base_path, spec.base_name, width, spec.extension
        );
        let orientation_clause = match spec.orientation {
            Some(orientation) => format!("(orientation: {}) and ", orientation),
            None => String::new(),
        };
        css.push_str(&format!(
            "@media {}(max-width: {}px) {{\n    .{} {{ background-image: url({}); }}\n}}\n",
            orientation_clause, width, spec.class, url
        ));
    }

    css
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec<'a>(orientation: Option<&'a str>, breakpoints: &'a [u32]) -> StylesheetSpec<'a> {
        StylesheetSpec {
            class: "city",
            base_path: "/img/city",
            base_name: "city",
            extension: "jpg",
            orientation,
            breakpoints,
        }
    }

    #[test]
    fn base_rule_is_unwrapped_without_orientation() {
        let css = render(&spec(None, &[]));
        assert_eq!(css, ".city { background-image: url(/img/city/city.jpg); }\n");
    }

    #[test]
    fn base_rule_is_wrapped_with_orientation() {
        let css = render(&spec(Some("landscape"), &[]));
        assert!(css.starts_with("@media (orientation: landscape) {"));
        assert!(css.contains(".city { background-image: url(/img/city/city.jpg); }"));
    }

    #[test]
    fn media_blocks_follow_breakpoint_order_not_magnitude() {
        let css = render(&spec(None, &[1024, 2048, 768]));
        let p1024 = css.find("max-width: 1024px").unwrap();
        let p2048 = css.find("max-width: 2048px").unwrap();
        let p768 = css.find("max-width: 768px").unwrap();
        assert!(p1024 < p2048 && p2048 < p768);
    }

    #[test]
    fn orientation_clause_prefixes_every_media_block() {
        let css = render(&spec(Some("portrait"), &[768]));
        assert!(css.contains(
            "@media (orientation: portrait) and (max-width: 768px) {"
        ));
        assert!(css.contains("url(/img/city/city-768.jpg)"));
    }

    #[test]
    fn base_rule_comes_before_all_media_blocks() {
        let css = render(&spec(None, &[2048, 1440, 1024, 768]));
        let base = css.find("url(/img/city/city.jpg)").unwrap();
        let first_block = css.find("@media").unwrap();
        assert!(base < first_block);
        assert_eq!(css.matches("@media").count(), 4);
    }
}
