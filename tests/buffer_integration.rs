use piecebuf::script::{apply_script, parse_script};
use piecebuf::{Buffer, BufferError, Coordinate, PieceTable};

// --- Piece table scenarios ---

#[test]
fn test_insert_into_middle() {
    let mut table = PieceTable::new("abc");
    table.insert("hi", 1).unwrap();
    assert_eq!(table.as_text(), "ahibc");
}

#[test]
fn test_delete_tail() {
    let mut table = PieceTable::new("abc");
    table.delete(1, 2).unwrap();
    assert_eq!(table.as_text(), "a");
}

#[test]
fn test_delete_down_to_empty_and_type_again() {
    let mut table = PieceTable::new("aa");
    table.delete(0, 1).unwrap();
    table.delete(0, 1).unwrap();
    assert_eq!(table.as_text(), "");
    assert!(table.is_empty());
    assert_eq!(table.piece_count(), 1);

    table.insert("b", 0).unwrap();
    assert_eq!(table.as_text(), "b");
}

#[test]
fn test_typing_a_paragraph_stays_compact() {
    let mut table = PieceTable::new("fn main() {\n}\n");
    let body = "    println!(\"hello\");\n";
    for (i, ch) in body.chars().enumerate() {
        table.insert(&ch.to_string(), 12 + i).unwrap();
    }
    assert_eq!(table.as_text(), format!("fn main() {{\n{body}}}\n"));
    assert_eq!(table.piece_count(), 3);
}

#[test]
fn test_large_document_edit() {
    let text = "x".repeat(1_000_000);
    let mut table = PieceTable::new(&text);
    table.insert("INSERT", 500_000).unwrap();
    assert_eq!(table.len(), 1_000_006);
    assert_eq!(table.slice(500_000..500_006).unwrap(), "INSERT");
}

// --- Buffer scenarios ---

#[test]
fn test_single_char_lines() {
    let buf = Buffer::new("a\nb\nc");
    assert_eq!(buf.line(0).unwrap(), 0);
    assert_eq!(buf.column(0).unwrap(), 0);
    assert_eq!(buf.line(2).unwrap(), 1);
    assert_eq!(buf.column(2).unwrap(), 0);
    assert_eq!(buf.line(4).unwrap(), 2);
    assert_eq!(buf.column(4).unwrap(), 0);
}

#[test]
fn test_empty_line_length() {
    let buf = Buffer::new("abc\n\ndefgh\n");
    assert_eq!(buf.line_length(1).unwrap(), 1);
    assert_eq!(buf.column(4).unwrap(), 0);
}

#[test]
fn test_cursor_walk_through_edits() {
    let mut buf = Buffer::new("first\nsecond\nthird");

    // Join the first two lines, then break the result again elsewhere.
    let newline = buf.pos_for_line(1).unwrap() - 1;
    buf.delete(newline, 1).unwrap();
    assert_eq!(buf.line_count(), 2);
    assert_eq!(buf.line_text(0).unwrap(), "firstsecond\n");

    let at = buf.offset_at(0, 5).unwrap();
    buf.insert(" and\n", at).unwrap();
    assert_eq!(buf.as_text(), "first and\nsecond\nthird");
    assert_eq!(buf.position(at + 5).unwrap(), (1, 0));
    assert_eq!(buf.lines().collect::<Vec<_>>(), ["first and\n", "second\n", "third"]);
}

#[test]
fn test_out_of_bounds_queries() {
    let buf = Buffer::new("ab\ncd");
    assert_eq!(
        buf.line(6),
        Err(BufferError::OutOfBounds {
            what: Coordinate::Offset,
            index: 6,
            limit: 5,
        })
    );
    assert!(buf.pos_for_line(2).is_err());
    assert!(buf.line_length(2).is_err());
    assert!(buf.line_text(2).is_err());
    assert!(buf.slice(3..9).is_err());
}

#[test]
fn test_rejected_edits_change_nothing() {
    let mut buf = Buffer::new("ab\ncd");
    assert!(matches!(
        buf.insert("zz", 99),
        Err(BufferError::OutOfBounds { .. })
    ));
    assert!(buf.delete(3, 3).is_err());
    assert_eq!(buf.as_text(), "ab\ncd");
    assert_eq!(buf.line_count(), 2);
    assert_eq!(buf.position(5).unwrap(), (1, 2));
}

// --- Edit scripts ---

#[test]
fn test_edit_script_round_trip() {
    let mut buf = Buffer::new("Line 1\nLine 2\nLine 3");
    let ops = parse_script(&[
        "insert:13: inserted".to_string(),
        r"i:0:header\n".to_string(),
        "d:7:5".to_string(),
    ])
    .unwrap();
    apply_script(&mut buf, &ops).unwrap();
    assert_eq!(buf.as_text(), "header\n1\nLine 2 inserted\nLine 3");
    assert_eq!(buf.line_count(), 4);
}
