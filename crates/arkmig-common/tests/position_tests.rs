use super::*;

#[test]
fn test_line_map_simple() {
    let source = "line1\nline2\nline3";
    let map = LineMap::build(source);

    assert_eq!(map.line_count(), 3);
    assert_eq!(map.offset_to_position(0, source), Position::new(1, 1));
    assert_eq!(map.offset_to_position(4, source), Position::new(1, 5));
    assert_eq!(map.offset_to_position(6, source), Position::new(2, 1));
    assert_eq!(map.offset_to_position(12, source), Position::new(3, 1));
}

#[test]
fn test_line_map_windows_line_endings() {
    let source = "line1\r\nline2\r\nline3";
    let map = LineMap::build(source);

    assert_eq!(map.line_count(), 3);
    assert_eq!(map.offset_to_position(7, source), Position::new(2, 1));
}

#[test]
fn test_position_to_offset_roundtrip() {
    let source = "class A {\n    int x;\n}\n";
    let map = LineMap::build(source);

    let offset = source.find("int").expect("int in source") as u32;
    let position = map.offset_to_position(offset, source);
    assert_eq!(position, Position::new(2, 5));
    assert_eq!(map.position_to_offset(position, source), Some(offset));
}

#[test]
fn test_unknown_position_has_no_offset() {
    let source = "x";
    let map = LineMap::build(source);
    assert!(Position::UNKNOWN.is_unknown());
    assert_eq!(map.position_to_offset(Position::UNKNOWN, source), None);
}

#[test]
fn test_span_slice() {
    let text = "if (t) a = 1;";
    assert_eq!(Span::new(0, 2).slice(text), Some("if"));
    assert_eq!(Span::EMPTY.slice(text), None);
    assert_eq!(Span::new(5, 100).slice(text), None);
    assert_eq!(Span::new(4, 6).len(), 2);
}
