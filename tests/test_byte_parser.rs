use nwkarray::NewickErrorKind;
use nwkarray::parser::ByteParser;

#[test]
fn test_skip_whitespace() {
    let mut parser = ByteParser::for_str(" \r  \t\n \t x y");
    parser.skip_whitespace();
    assert_eq!(parser.peek(), Some(b'x'));

    parser.next_byte(); // skip x
    parser.skip_whitespace();
    assert_eq!(parser.peek(), Some(b'y'));
    assert_eq!(parser.position(), 11);
}

#[test]
fn test_consume_if() {
    let mut parser = ByteParser::for_str("(,");
    assert!(!parser.consume_if(b','));
    assert!(parser.consume_if(b'('));
    assert!(parser.consume_if(b','));
    assert!(parser.is_eof());
    assert_eq!(parser.next_byte(), None);
}

#[test]
fn test_parse_digit_run() {
    let mut parser = ByteParser::for_str("(1234,5)");
    parser.next_byte();
    let run = parser.parse_digit_run(20).unwrap();
    assert_eq!(run.value, 1234);
    assert_eq!(run.start, 1);
    assert_eq!(run.len, 4);
    assert!(!run.has_leading_zero(&parser));
    assert_eq!(parser.peek(), Some(b','));
}

#[test]
fn test_parse_digit_run_leading_zero() {
    let mut parser = ByteParser::for_str("007;");
    let run = parser.parse_digit_run(20).unwrap();
    assert_eq!(run.value, 7);
    assert!(run.has_leading_zero(&parser));

    let mut parser = ByteParser::for_str("0;");
    let run = parser.parse_digit_run(20).unwrap();
    assert!(!run.has_leading_zero(&parser));
}

#[test]
fn test_parse_digit_run_requires_digit() {
    let mut parser = ByteParser::for_str(",1");
    let err = parser.parse_digit_run(20).unwrap_err();
    assert!(matches!(err.kind(), NewickErrorKind::MalformedSyntax(_)));
    assert_eq!(parser.position(), 0);
}

#[test]
fn test_parse_digit_run_too_long() {
    let mut parser = ByteParser::for_str("12345)");
    let err = parser.parse_digit_run(4).unwrap_err();
    assert!(matches!(err.kind(), NewickErrorKind::LabelOverflow(_)));
    assert_eq!(err.position(), Some(0));
    // The whole run is consumed nonetheless
    assert_eq!(parser.peek(), Some(b')'));
}

#[test]
fn test_parse_digit_run_overflow() {
    let huge = format!("{}0", usize::MAX);
    let mut parser = ByteParser::for_str(&huge);
    let err = parser.parse_digit_run(64).unwrap_err();
    assert!(matches!(err.kind(), NewickErrorKind::LabelOverflow(_)));
}

#[test]
fn test_context() {
    let mut parser = ByteParser::for_str("(1,2,3,4,5);");
    parser.set_position(3);
    assert_eq!(parser.peek(), Some(b'2'));
    assert_eq!(parser.get_context_as_string(3, 4), "2,3,");
    assert_eq!(parser.get_context_as_string(10, 20), ");");
    assert_eq!(parser.get_context_as_string(99, 20), "");
}
