// Boundary Condition Tests for gxtmaker
// These tests verify lexer and table behavior at edge cases

use gxtmaker::writer::encode_table;
use gxtmaker::{compile_bytes, Error, ExitStatus, GxtReader, GxtTable, Options};

fn compile(src: &[u8]) -> GxtTable {
    compile_bytes(src, &Options::default()).unwrap()
}

/// Test an empty source produces empty blocks
#[test]
fn test_empty_source() {
    let table = compile(b"");
    assert!(table.is_empty());
    assert_eq!(table.tkey_size(), 0);
    assert_eq!(table.tdat_size(), 0);
}

/// Test a source with only comments and whitespace
#[test]
fn test_comment_only_source() {
    let table = compile(b"{ nothing here }\n\t  \n{ [NOT_A_KEY] }");
    assert!(table.is_empty());
}

/// Test key length limits
#[test]
fn test_key_length_limits() {
    let table = compile(b"[SEVEN77]ok");
    assert_eq!(table.get(b"SEVEN77"), Some(&b"ok"[..]));

    let err = compile_bytes(b"[EIGHT888]no", &Options::default()).unwrap_err();
    assert!(matches!(err, Error::KeyTooLong { row: 1, column: 9 }));

    let err = compile_bytes(b"[A]x\r\n[WAYTOOLONGKEY]no", &Options::default()).unwrap_err();
    assert!(matches!(err, Error::KeyTooLong { row: 2, column: 9 }));
    assert_eq!(err.exit_status(), ExitStatus::CompilationError);
}

/// Test NUL bytes inside a key name are discarded
#[test]
fn test_nul_in_key_discarded() {
    let table = compile(b"[A\0B]x");
    assert_eq!(table.keys()[0].name(), b"AB");

    let encoded = encode_table(&table).unwrap();
    let reader = GxtReader::parse(&encoded).unwrap();
    assert_eq!(reader.get(b"AB"), Some(&b"x"[..]));
}

/// Test NUL bytes inside a value are discarded, keeping one terminator per record
#[test]
fn test_nul_in_value_discarded() {
    let table = compile(b"[A]a\0b[B]c\0");
    assert_eq!(table.len(), 2);
    assert_eq!(table.get(b"A"), Some(&b"ab"[..]));
    assert_eq!(table.keys()[1].offset(), 3);

    let encoded = encode_table(&table).unwrap();
    let tdat = &encoded[encoded.len() - table.tdat_size()..];
    assert_eq!(tdat.iter().filter(|b| **b == 0).count(), table.len());

    let reader = GxtReader::parse(&encoded).unwrap();
    assert_eq!(reader.get(b"A"), Some(&b"ab"[..]));
    assert_eq!(reader.get(b"B"), Some(&b"c"[..]));
}

/// Test a NUL does not count toward the key length limit
#[test]
fn test_nul_not_counted_in_key_length() {
    let table = compile(b"[ABC\0\0DEFG]x");
    assert_eq!(table.keys()[0].name(), b"ABCDEFG");
}

/// Test leading whitespace is trimmed while internal and trailing whitespace is kept
#[test]
fn test_whitespace_handling() {
    let table = compile(b"[A]  hi there [B]\t\tx\ty\t");
    assert_eq!(table.get(b"A"), Some(&b"hi there "[..]));
    assert_eq!(table.get(b"B"), Some(&b"x\ty\t"[..]));
}

/// Test comments do not influence offsets
#[test]
fn test_comment_does_not_affect_offsets() {
    let plain = compile(b"[A]HelloWorld[B]Bye");
    let commented = compile(b"[A]Hello{ a long comment with [brackets] }World[B]{x}Bye");

    assert_eq!(plain, commented);
    assert_eq!(commented.keys()[1].offset(), 11);
}

/// Test a key with a whitespace-only value is not committed
#[test]
fn test_whitespace_only_value_dropped() {
    let table = compile(b"[EMPTY]   \n[FULL]text");
    assert_eq!(table.len(), 1);
    assert_eq!(table.get(b"EMPTY"), None);
    assert_eq!(table.keys()[0].offset(), 0);
}

/// Test a trailing key with no value is dropped whether or not flushing is enabled
#[test]
fn test_trailing_key_without_value() {
    for flush in [true, false] {
        let table = compile_bytes(b"[A]x[B]", &Options::default().flush_pending_on_eof(flush)).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(b"B"), None);
    }
}

/// Test the final pair is flushed only when enabled
#[test]
fn test_final_pair_flush() {
    let src = b"[A]first[B]last";

    let flushed = compile_bytes(src, &Options::default()).unwrap();
    assert_eq!(flushed.len(), 2);

    let unflushed = compile_bytes(src, &Options::default().flush_pending_on_eof(false)).unwrap();
    assert_eq!(unflushed.len(), 1);
    assert_eq!(unflushed.get(b"B"), None);
}

/// Test a value still inside an unterminated comment at end of input
#[test]
fn test_unterminated_comment_at_eof() {
    let table = compile(b"[A]kept{never closed");
    assert_eq!(table.get(b"A"), Some(&b"kept"[..]));
}

/// Test an unclosed key at end of input is discarded
#[test]
fn test_unclosed_key_at_eof() {
    let table = compile(b"[A]value[PARTIAL");
    assert_eq!(table.len(), 1);
    assert_eq!(table.get(b"A"), Some(&b"value"[..]));
}

/// Test unmatched closing delimiters are ignored, not errors
#[test]
fn test_unmatched_closers_ignored() {
    let options = Options::default().warn_unmatched_delimiters(true);
    let table = compile_bytes(b"]}[A]a]b}c", &options).unwrap();
    assert_eq!(table.get(b"A"), Some(&b"abc"[..]));
}

/// Test duplicate key names are kept in source order
#[test]
fn test_duplicate_keys_kept() {
    let table = compile(b"[DUP]one[DUP]two");
    assert_eq!(table.len(), 2);
    assert_eq!(table.get(b"DUP"), Some(&b"one"[..]));
    assert_eq!(&table.values()[1][..], &b"two"[..]);
    assert_eq!(table.keys()[1].offset(), 4);
}

/// Test an empty key name is accepted
#[test]
fn test_empty_key_name() {
    let table = compile(b"[]anonymous");
    assert_eq!(table.get(b""), Some(&b"anonymous"[..]));
}

/// Test non-ASCII bytes pass through unchanged
#[test]
fn test_high_bytes_preserved() {
    let table = compile("[UML]Grüße".as_bytes());
    assert_eq!(table.get(b"UML"), Some("Grüße".as_bytes()));
}

/// Test every chunk size yields the same table
#[test]
fn test_chunk_sizes_agree() {
    let src = b"[A]Hello{comment}World\r\n[B]  Bye";
    let reference = compile(src);

    for chunk_size in [1, 2, 3, 5, 8, 13, 1024] {
        let table = compile_bytes(src, &Options::default().chunk_size(chunk_size)).unwrap();
        assert_eq!(table, reference, "chunk size {}", chunk_size);
    }
}
