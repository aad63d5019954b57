use yay_core::parse;

/// Assert that a document fails with the given message fragment at the given
/// 1-based position.
fn expect_error(source: &str, pattern: &str, line: usize, column: usize) {
    expect_error_bytes(source.as_bytes(), pattern, line, column);
}

fn expect_error_bytes(source: &[u8], pattern: &str, line: usize, column: usize) {
    let err = match parse(source, None) {
        Err(err) => err,
        Ok(value) => panic!(
            "expected error containing {pattern:?}, got value {value}\nsource: {source:?}"
        ),
    };
    assert!(
        err.message.contains(pattern),
        "message mismatch:\n  expected to contain: {pattern}\n  got: {}",
        err.message
    );
    assert_eq!(
        (err.line, err.column),
        (line, column),
        "position mismatch for {pattern:?}: got {}:{}",
        err.line,
        err.column
    );
}

// ============================================================================
// Encoding
// ============================================================================

mod encoding {
    use super::*;

    #[test]
    fn illegal_bom() {
        expect_error_bytes(b"\xEF\xBB\xBFa: 1\n", "Illegal BOM", 1, 1);
    }

    #[test]
    fn tab_not_allowed() {
        expect_error("a:\t1\n", "Tab not allowed (use spaces)", 1, 3);
    }

    #[test]
    fn forbidden_code_point() {
        expect_error("b: \u{7f}\n", "Forbidden code point U+007F", 1, 4);
    }

    #[test]
    fn forbidden_noncharacter() {
        expect_error("x: \"\u{fdd0}\"\n", "Forbidden code point U+FDD0", 1, 5);
    }

    #[test]
    fn illegal_surrogate_bytes() {
        expect_error_bytes(b"a: \xED\xA0\x80\n", "Illegal surrogate", 1, 4);
    }

    #[test]
    fn malformed_utf8() {
        expect_error_bytes(b"\xFF\n", "Forbidden code point U+00FF", 1, 1);
    }
}

// ============================================================================
// Layout
// ============================================================================

mod layout {
    use super::*;

    #[test]
    fn trailing_space() {
        expect_error("a: 1 \n", "Unexpected trailing space", 1, 5);
    }

    #[test]
    fn unexpected_indent_at_root() {
        expect_error("  a: 1\n", "Unexpected indent", 1, 1);
    }

    #[test]
    fn unexpected_leading_space() {
        expect_error("-  x\n", "Unexpected leading space", 1, 1);
    }

    #[test]
    fn extra_content_after_root_value() {
        expect_error("1\n2\n", "Unexpected extra content", 2, 1);
    }

    #[test]
    fn no_value_in_empty_document() {
        expect_error("", "No value found in document", 1, 1);
    }

    #[test]
    fn no_value_in_comment_only_document() {
        expect_error("# nothing here\n", "No value found in document", 1, 1);
    }
}

// ============================================================================
// Leaders
// ============================================================================

mod leaders {
    use super::*;

    #[test]
    fn missing_space_after_dash() {
        expect_error("-x\n", "Expected space after \"-\"", 1, 2);
    }

    #[test]
    fn double_space_after_compact_dash() {
        expect_error("- -  1\n", "Unexpected space after \"-\"", 1, 3);
    }

    #[test]
    fn star_is_not_a_list_marker() {
        expect_error("* item\n", "Unexpected character \"*\"", 1, 1);
    }

    #[test]
    fn block_leader_with_content_in_property() {
        expect_error("a: ` x\n", "Expected newline after block leader in property", 1, 1);
    }

    #[test]
    fn hex_leader_with_content_in_property() {
        expect_error("a: > ff\n", "Expected newline after block leader in property", 1, 1);
    }

    #[test]
    fn block_leader_on_its_own_line() {
        expect_error("a:\n  `\n", "Unexpected indent", 2, 1);
    }

    #[test]
    fn hex_leader_on_its_own_line() {
        expect_error("a:\n  >\n", "Unexpected indent", 2, 1);
    }
}

// ============================================================================
// Keys and objects
// ============================================================================

mod keys {
    use super::*;

    #[test]
    fn space_before_colon() {
        expect_error("a : 1\n", "Unexpected space before \":\"", 1, 2);
    }

    #[test]
    fn missing_space_after_colon() {
        expect_error("a:1\n", "Expected space after \":\"", 1, 2);
    }

    #[test]
    fn double_space_after_colon() {
        expect_error("a:  1\n", "Unexpected space after \":\"", 1, 4);
    }

    #[test]
    fn invalid_key_character() {
        expect_error("a b: 1\n", "Invalid key character", 1, 2);
    }

    #[test]
    fn invalid_inline_key() {
        expect_error("{$: 1}\n", "Invalid key", 1, 1);
    }

    #[test]
    fn missing_colon_in_inline_object() {
        expect_error("{a 1}\n", "Expected colon after key", 1, 1);
    }

    #[test]
    fn property_without_value() {
        expect_error("a:\n", "Expected value after property", 1, 3);
    }

    #[test]
    fn indented_scalar_shapes_are_rejected() {
        expect_error("a:\n  [1]\n", "Unexpected indent", 2, 1);
        expect_error("a:\n  {x: 1}\n", "Unexpected indent", 2, 1);
        expect_error("a:\n  <aa>\n", "Unexpected indent", 2, 1);
        expect_error("a:\n  5\n", "Unexpected indent", 2, 1);
        expect_error("a:\n  -5\n", "Unexpected indent", 2, 1);
        expect_error("a:\n  .5\n", "Unexpected indent", 2, 1);
    }

    #[test]
    fn single_concatenated_string_is_rejected() {
        expect_error("a:\n  \"only\"\n", "Unexpected indent", 2, 1);
    }
}

// ============================================================================
// Inline containers
// ============================================================================

mod inline_containers {
    use super::*;

    #[test]
    fn missing_space_after_comma() {
        expect_error("a: {x: 1,y: 2}\n", "Expected space after \",\"", 1, 9);
    }

    #[test]
    fn space_before_comma() {
        expect_error("a: {x: 1 , y: 2}\n", "Unexpected space before \",\"", 1, 9);
    }

    #[test]
    fn missing_space_after_comma_in_array() {
        expect_error("a: [1,2]\n", "Expected space after \",\"", 1, 6);
    }

    #[test]
    fn double_space_after_comma() {
        expect_error("a: [1,  2]\n", "Unexpected space after \",\"", 1, 8);
    }

    #[test]
    fn space_after_open_bracket() {
        expect_error("a: [ 1]\n", "Unexpected space after \"[\"", 1, 5);
    }

    #[test]
    fn space_before_close_bracket() {
        expect_error("a: [1 ]\n", "Unexpected space before \"]\"", 1, 6);
    }

    #[test]
    fn space_before_close_wins_over_comma() {
        // The missing space after "," is suppressed in favor of the
        // space-before-close report.
        expect_error("a: [1,2 ]\n", "Unexpected space before \"]\"", 1, 8);
    }

    #[test]
    fn space_before_inline_colon() {
        expect_error("a: {x : 1}\n", "Unexpected space before \":\"", 1, 6);
    }

    #[test]
    fn missing_space_after_inline_colon() {
        expect_error("a: {x:1}\n", "Expected space after \":\"", 1, 6);
    }

    #[test]
    fn double_space_after_inline_colon() {
        expect_error("a: {x:  1}\n", "Unexpected space after \":\"", 1, 8);
    }

    #[test]
    fn unclosed_inline_array() {
        expect_error("a: [1,\n", "Unexpected newline in inline array", 1, 4);
    }

    #[test]
    fn unclosed_inline_object() {
        expect_error("a: {x: 1\n", "Unexpected newline in inline object", 1, 4);
    }

    #[test]
    fn unclosed_root_inline_array() {
        expect_error("[1, 2\n", "Unexpected newline in inline array", 1, 1);
    }

    #[test]
    fn bare_word_in_array() {
        expect_error("a: [x]\n", "Unexpected character \"x\"", 1, 5);
    }
}

// ============================================================================
// Strings
// ============================================================================

mod strings {
    use super::*;

    #[test]
    fn unterminated_double_quoted() {
        expect_error("a: \"abc\n", "Unterminated string", 1, 7);
    }

    #[test]
    fn unterminated_at_root() {
        expect_error("\"abc\n", "Unterminated string", 1, 4);
    }

    #[test]
    fn unterminated_single_quoted() {
        expect_error("a: 'abc\n", "Unterminated string", 1, 7);
    }

    #[test]
    fn bad_escape() {
        expect_error("a: \"x\\q\"\n", "Bad escaped character", 1, 7);
    }

    #[test]
    fn braceless_unicode_escape() {
        expect_error("a: \"\\u0041\"\n", "Bad escaped character", 1, 6);
    }

    #[test]
    fn empty_unicode_escape() {
        expect_error("a: \"\\u{}\"\n", "Bad Unicode escape", 1, 7);
    }

    #[test]
    fn overlong_unicode_escape() {
        expect_error("a: \"\\u{1234567}\"\n", "Bad Unicode escape", 1, 7);
    }

    #[test]
    fn non_hex_unicode_escape() {
        expect_error("a: \"\\u{12g4}\"\n", "Bad Unicode escape", 1, 7);
    }

    #[test]
    fn surrogate_escape() {
        expect_error("a: \"\\u{d800}\"\n", "Illegal surrogate", 1, 7);
    }

    #[test]
    fn code_point_out_of_range() {
        expect_error("a: \"\\u{110000}\"\n", "Unicode code point out of range", 1, 7);
    }
}

// ============================================================================
// Numbers
// ============================================================================

mod numbers {
    use super::*;

    #[test]
    fn uppercase_exponent() {
        expect_error("a: 1E5\n", "Uppercase exponent (use lowercase 'e')", 1, 5);
    }

    #[test]
    fn space_before_decimal_point() {
        expect_error("a: 1 .5\n", "Unexpected space in number", 1, 5);
    }

    #[test]
    fn space_after_decimal_point() {
        expect_error("a: 1. 5\n", "Unexpected space in number", 1, 6);
    }

    #[test]
    fn bare_word_is_not_a_value() {
        expect_error("a: bare\n", "Unexpected character \"b\"", 1, 4);
        expect_error("bare\n", "Unexpected character \"b\"", 1, 1);
    }
}

// ============================================================================
// Bytes and hex
// ============================================================================

mod bytes {
    use super::*;

    #[test]
    fn uppercase_hex_in_scalar() {
        expect_error("a: <FF>\n", "Uppercase hex digit (use lowercase)", 1, 5);
    }

    #[test]
    fn uppercase_hex_in_free_block() {
        expect_error("> FF\n", "Uppercase hex digit (use lowercase)", 1, 3);
    }

    #[test]
    fn invalid_hex_digit() {
        expect_error("a: <zz>\n", "Invalid hex digit", 1, 4);
    }

    #[test]
    fn odd_hex_digits() {
        expect_error("a: <abc>\n", "Odd number of hex digits in byte literal", 1, 4);
    }

    #[test]
    fn odd_hex_digits_in_block() {
        expect_error("a: >\n  abc\n", "Odd number of hex digits in byte literal", 1, 1);
    }

    #[test]
    fn unmatched_angle_bracket() {
        expect_error("a: <ab\n", "Unmatched angle bracket", 1, 4);
    }

    #[test]
    fn empty_hex_block_leader() {
        expect_error(">\n", "Expected hex or comment in hex block", 1, 1);
    }
}

// ============================================================================
// Block strings
// ============================================================================

mod block_strings {
    use super::*;

    #[test]
    fn empty_block_string() {
        expect_error(
            "a: `\nb: 1\n",
            "Empty block string not allowed (use \"\" or \"\\n\" explicitly)",
            1,
            1,
        );
    }
}

// ============================================================================
// Error rendering
// ============================================================================

mod rendering {
    use super::*;

    #[test]
    fn filename_is_woven_into_the_message() {
        let err = parse(b"a:\t1\n", Some("test.yay")).unwrap_err();
        assert_eq!(err.to_string(), "Tab not allowed (use spaces) at 1:3 of <test.yay>");
        assert_eq!((err.line, err.column), (1, 3));
    }

    #[test]
    fn bare_message_without_filename() {
        let err = parse(b"a:\t1\n", None).unwrap_err();
        assert_eq!(err.to_string(), "Tab not allowed (use spaces)");
    }
}
