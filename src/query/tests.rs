#[cfg(test)]
mod tests {
    use crate::query::validator::validate;

    // ============================================================
    // VALID QUERIES
    // ============================================================

    #[test]
    fn test_single_clause() {
        assert!(validate("keyword:{cats}").is_ok());
    }

    #[test]
    fn test_clause_with_spaces() {
        assert!(validate("title : {old man and the sea}").is_ok());
    }

    #[test]
    fn test_boolean_chain() {
        assert!(validate("title:{old man} AND author:{hemingway}").is_ok());
        assert!(validate("keyword:{cats} OR keyword:{dogs}").is_ok());
        assert!(validate("keyword:{cats} NOT subject:{veterinary}").is_ok());
    }

    #[test]
    fn test_and_not_operator() {
        assert!(validate("keyword:{cats} AND NOT subject:{dogs}").is_ok());
    }

    #[test]
    fn test_parenthesized_expression() {
        assert!(validate("(keyword:{a} OR title:{b}) AND subject:{c}").is_ok());
    }

    #[test]
    fn test_nested_braces_in_term() {
        assert!(validate("keyword:{set {inner} theory}").is_ok());
    }

    #[test]
    fn test_date_range_term() {
        assert!(validate("date:{1945 TO 1950}").is_ok());
    }

    #[test]
    fn test_wildcard_term() {
        // the filter refresher probes pools with this exact query
        assert!(validate("keyword:{*}").is_ok());
    }

    // ============================================================
    // INVALID QUERIES
    // ============================================================

    #[test]
    fn test_free_text_rejected() {
        let err = validate("not-a-valid-expression").unwrap_err();

        assert!(err.contains("unknown search field"), "got: {}", err);
    }

    #[test]
    fn test_empty_query_rejected() {
        assert!(validate("").is_err());
    }

    #[test]
    fn test_missing_braces_rejected() {
        let err = validate("keyword:cats").unwrap_err();

        assert!(err.contains("expected '{'"), "got: {}", err);
    }

    #[test]
    fn test_unterminated_term_rejected() {
        let err = validate("keyword:{cats").unwrap_err();

        assert!(err.contains("unterminated"), "got: {}", err);
    }

    #[test]
    fn test_unbalanced_nested_braces_rejected() {
        assert!(validate("keyword:{set {inner theory}").is_err());
    }

    #[test]
    fn test_dangling_operator_rejected() {
        let err = validate("keyword:{cats} AND").unwrap_err();

        assert!(err.contains("expected clause after AND"), "got: {}", err);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = validate("bogus:{value}").unwrap_err();

        assert!(err.contains("unknown search field: bogus"), "got: {}", err);
    }

    #[test]
    fn test_unbalanced_parentheses_rejected() {
        assert!(validate("(keyword:{a} OR title:{b}").is_err());
    }

    #[test]
    fn test_trailing_junk_rejected() {
        let err = validate("keyword:{cats} extra").unwrap_err();

        assert!(err.contains("unexpected input"), "got: {}", err);
    }

    #[test]
    fn test_leading_operator_rejected() {
        assert!(validate("AND keyword:{cats}").is_err());
    }
}
