pub const ANALYZE_BOOK: &str = include_str!("../data/prompts/analyze_book.txt");
pub const GENERATE_PLAN: &str = include_str!("../data/prompts/generate_plan.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_var() {
        assert_eq!(
            render("Hello {{name}}!", &[("name", "world")]),
            "Hello world!"
        );
    }

    #[test]
    fn test_render_multiple_vars() {
        assert_eq!(
            render("{{a}} and {{b}}", &[("a", "cats"), ("b", "dogs")]),
            "cats and dogs"
        );
    }

    #[test]
    fn test_prompts_are_non_empty() {
        assert!(!ANALYZE_BOOK.is_empty());
        assert!(!GENERATE_PLAN.is_empty());
    }

    #[test]
    fn test_analyze_book_has_title_placeholder() {
        assert!(ANALYZE_BOOK.contains("{{book_title}}"));
    }

    #[test]
    fn test_generate_plan_has_placeholders() {
        assert!(GENERATE_PLAN.contains("{{book_title}}"));
        assert!(GENERATE_PLAN.contains("{{user_context}}"));
    }

    #[test]
    fn test_generate_plan_repeats_user_context() {
        // The context appears in the task statement and again in the rules.
        assert_eq!(GENERATE_PLAN.matches("{{user_context}}").count(), 2);
    }
}
