//! Record framing, element translation, and the array reader.

mod common;

use std::io::Cursor;
use std::io::Write;

use eclsum_reader::eclsum::codec::{decode_in_place, encode_in_place};
use eclsum_reader::{open, ArrayReader, EclError, TypeTag};

use common::*;

fn reader(bytes: Vec<u8>) -> ArrayReader<Cursor<Vec<u8>>> {
    ArrayReader::new(Cursor::new(bytes))
}

/// The minimal INTE example, byte for byte: KEY, count 2, values [1, 2].
const MINIMAL_INTE: &[u8] = &[
    0x00, 0x00, 0x00, 0x10, // header record head
    0x4B, 0x45, 0x59, 0x20, 0x20, 0x20, 0x20, 0x20, // "KEY     "
    0x00, 0x00, 0x00, 0x02, // count = 2
    0x49, 0x4E, 0x54, 0x45, // "INTE"
    0x00, 0x00, 0x00, 0x10, // header record tail
    0x00, 0x00, 0x00, 0x08, // body record head
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x02, // [1, 2]
    0x00, 0x00, 0x00, 0x08, // body record tail
];

#[test]
fn minimal_inte_array() {
    let mut arrays = reader(MINIMAL_INTE.to_vec());

    let array = arrays.next_array().expect("read ok").expect("one array");
    assert_eq!(array.name_str(), "KEY     ");
    assert_eq!(array.tag, TypeTag::Inte);
    assert_eq!(array.count, 2);
    assert_eq!(array.body.len(), 8);
    assert_eq!(array.int(0), 1);
    assert_eq!(array.int(1), 2);

    assert!(arrays.next_array().expect("read ok").is_none());
}

#[test]
fn builder_matches_literal_bytes() {
    assert_eq!(inte_array("KEY", &[1, 2]), MINIMAL_INTE);
}

#[test]
fn char_array_body_is_verbatim_ascii() {
    let mut arrays = reader(char_array("WORDS", &["HELLO", "WORLD"]));

    let array = arrays.next_array().expect("read ok").expect("one array");
    assert_eq!(array.tag, TypeTag::Char);
    assert_eq!(array.count, 2);
    assert_eq!(array.body, b"HELLO   WORLD   ");
    assert_eq!(array.text(0), "HELLO   ");
    assert_eq!(array.str_cell(1), b"WORLD   ");
}

#[test]
fn blocked_body_reassembles() {
    // 1001 elements arrive as a 1000-element record plus a 1-element one.
    let values: Vec<f32> = (0..1001).map(|i| i as f32).collect();
    let bytes = real_array("BIG", &values);

    // The builder must have produced exactly two body records.
    let second_head = &bytes[24 + 8 + 4000..24 + 8 + 4004];
    assert_eq!(second_head, &4i32.to_be_bytes()[..]);

    let mut arrays = reader(bytes);
    let array = arrays.next_array().expect("read ok").expect("one array");
    assert_eq!(array.count, 1001);
    assert_eq!(array.body.len(), 4004);
    assert_eq!(array.real(0), 0.0);
    assert_eq!(array.real(999), 999.0);
    assert_eq!(array.real(1000), 1000.0);
}

#[test]
fn exact_block_length_is_one_record() {
    let values: Vec<i32> = (0..1000).collect();
    let bytes = inte_array("FULL", &values);
    // header record (24) + one body record (8 + 4000), nothing else
    assert_eq!(bytes.len(), 24 + 8 + 4000);

    let mut arrays = reader(bytes);
    let array = arrays.next_array().expect("read ok").expect("one array");
    assert_eq!(array.body.len(), 4000);
    assert_eq!(array.int(999), 999);
}

#[test]
fn zero_count_array_has_no_body_records() {
    let mut bytes = header("EMPTY", "REAL", 0);
    bytes.extend_from_slice(&inte_array("NEXT", &[7]));

    let mut arrays = reader(bytes);
    let array = arrays.next_array().expect("read ok").expect("first array");
    assert_eq!(array.name_str().trim_end(), "EMPTY");
    assert_eq!(array.count, 0);
    assert!(array.body.is_empty());

    let array = arrays.next_array().expect("read ok").expect("second array");
    assert_eq!(array.name_str().trim_end(), "NEXT");
    assert_eq!(array.int(0), 7);
}

#[test]
fn mess_array_is_marker_only() {
    let mut bytes = header("MESSAGE", "MESS", 0);
    bytes.extend_from_slice(&inte_array("NEXT", &[1]));

    let mut arrays = reader(bytes);
    let array = arrays.next_array().expect("read ok").expect("mess array");
    assert_eq!(array.tag, TypeTag::Mess);
    assert!(array.body.is_empty());

    assert!(arrays.next_array().expect("read ok").is_some());
}

#[test]
fn doub_and_logi_decode() {
    let mut bytes = doub_array("DPREC", &[1.5, -2.25]);
    bytes.extend_from_slice(&logi_array("FLAGS", &[true, false, true]));

    let mut arrays = reader(bytes);
    let array = arrays.next_array().expect("read ok").expect("doub");
    assert_eq!(array.double(0), 1.5);
    assert_eq!(array.double(1), -2.25);

    let array = arrays.next_array().expect("read ok").expect("logi");
    assert!(array.logical(0));
    assert!(!array.logical(1));
    assert!(array.logical(2));
}

#[test]
fn c0nn_cells_have_tagged_width() {
    let mut payload = Vec::new();
    payload.extend_from_slice(b"0123456789ABCDEF");
    let mut bytes = header("WIDE", "C016", 1);
    bytes.extend_from_slice(&record(&payload));

    let mut arrays = reader(bytes);
    let array = arrays.next_array().expect("read ok").expect("c016");
    assert_eq!(array.tag, TypeTag::C0nn(16));
    assert_eq!(array.str_cell(0), b"0123456789ABCDEF");
}

#[test]
fn unget_replays_last_array() {
    let mut bytes = inte_array("FIRST", &[1]);
    bytes.extend_from_slice(&inte_array("SECOND", &[2]));

    let mut arrays = reader(bytes);
    let name = arrays
        .next_array()
        .expect("read ok")
        .expect("first")
        .name_str()
        .to_string();
    assert_eq!(name.trim_end(), "FIRST");

    arrays.unget();
    let replay = arrays.next_array().expect("read ok").expect("replayed");
    assert_eq!(replay.name_str().trim_end(), "FIRST");

    let second = arrays.next_array().expect("read ok").expect("second");
    assert_eq!(second.name_str().trim_end(), "SECOND");

    assert!(arrays.next_array().expect("read ok").is_none());
    // EOF is stable across repeated polls.
    assert!(arrays.next_array().expect("read ok").is_none());
}

#[test]
fn head_tail_mismatch_reports_both_markers() {
    let mut bytes = inte_array("KEY", &[1, 2]);
    let last = bytes.len() - 1;
    bytes[last] = 0x09; // corrupt the body tail marker

    let mut arrays = reader(bytes.clone());
    let err = arrays.next_array().expect_err("framing must fail");
    match err {
        EclError::HeadTailMismatch { head, tail } => {
            assert_eq!(head, 8);
            assert_eq!(tail, 9);
        }
        other => panic!("expected HeadTailMismatch, got {:?}", other),
    }
    assert_eq!(err_code(&bytes), "HeadTailMismatch");
}

fn err_code(bytes: &[u8]) -> &'static str {
    let mut arrays = reader(bytes.to_vec());
    loop {
        match arrays.next_array() {
            Ok(Some(_)) => continue,
            Ok(None) => panic!("fixture was expected to fail"),
            Err(e) => return e.code(),
        }
    }
}

#[test]
fn negative_record_length_is_a_framing_error() {
    let bytes = (-1i32).to_be_bytes().to_vec();
    assert_eq!(err_code(&bytes), "HeadTailMismatch");
}

#[test]
fn truncated_header_payload_is_eof() {
    let full = inte_array("KEY", &[1]);
    let truncated = full[..14].to_vec(); // head + 10 of 16 payload bytes
    assert_eq!(err_code(&truncated), "UnexpectedEof");
}

#[test]
fn missing_body_is_eof() {
    let bytes = header("KEY", "INTE", 2);
    let mut arrays = reader(bytes);
    let err = arrays.next_array().expect_err("body must be missing");
    assert_eq!(err.code(), "UnexpectedEof");
}

#[test]
fn oversized_segment_is_not_terminated() {
    // Header declares 2 elements but the single body record carries 3.
    let mut bytes = header("KEY", "INTE", 2);
    let mut segment = Vec::new();
    for value in [1i32, 2, 3] {
        segment.extend_from_slice(&value.to_be_bytes());
    }
    bytes.extend_from_slice(&record(&segment));

    assert_eq!(err_code(&bytes), "ArrayNotTerminated");
}

#[test]
fn undersized_blocking_is_tolerated() {
    // Two 1-element records where the standard blocking would use one
    // 2-element record; recovery tools rely on this reading fine.
    let mut bytes = header("KEY", "INTE", 2);
    bytes.extend_from_slice(&record(&1i32.to_be_bytes()));
    bytes.extend_from_slice(&record(&2i32.to_be_bytes()));

    let mut arrays = reader(bytes);
    let array = arrays.next_array().expect("read ok").expect("array");
    assert_eq!(array.int(0), 1);
    assert_eq!(array.int(1), 2);
}

#[test]
fn unknown_type_tag_is_invalid() {
    let bytes = header("KEY", "FOOB", 1);
    assert_eq!(err_code(&bytes), "InvalidArgs");
}

#[test]
fn x231_is_unsupported() {
    let bytes = header("KEY", "X231", 1);
    assert_eq!(err_code(&bytes), "Unsupported");
}

#[test]
fn short_header_record_is_header_error() {
    let bytes = record(&[0u8; 12]);
    assert_eq!(err_code(&bytes), "HeaderError");
}

#[test]
fn negative_count_is_header_error() {
    let bytes = header("KEY", "INTE", -1);
    assert_eq!(err_code(&bytes), "HeaderError");
}

#[test]
fn type_tags_round_trip_names_and_sizes() {
    let table: &[(&[u8; 4], TypeTag, usize, usize)] = &[
        (b"INTE", TypeTag::Inte, 4, 1000),
        (b"REAL", TypeTag::Real, 4, 1000),
        (b"DOUB", TypeTag::Doub, 8, 1000),
        (b"CHAR", TypeTag::Char, 8, 105),
        (b"LOGI", TypeTag::Logi, 4, 1000),
        (b"MESS", TypeTag::Mess, 0, 1000),
        (b"C016", TypeTag::C0nn(16), 16, 105),
        (b"C099", TypeTag::C0nn(99), 99, 105),
    ];

    for &(word, tag, size, block) in table {
        let parsed = TypeTag::parse(word).expect("tag parses");
        assert_eq!(parsed, tag);
        assert_eq!(&parsed.name(), word);
        assert_eq!(parsed.element_size().expect("size known"), size, "{}", tag);
        assert_eq!(parsed.block_length(), block, "{}", tag);
        assert_eq!(format!("{}", parsed).as_bytes(), &word[..]);
    }

    assert!(TypeTag::parse(b"X231").is_ok());
    assert!(TypeTag::parse(b"X231").unwrap().element_size().is_err());
    assert!(TypeTag::parse(b"C000").is_err());
    assert!(TypeTag::parse(b"ABCD").is_err());
}

#[test]
fn numeric_translation_round_trips() {
    let cases: &[(TypeTag, Vec<u8>)] = &[
        (TypeTag::Inte, 0x01020304i32.to_be_bytes().to_vec()),
        (TypeTag::Real, 3.25f32.to_be_bytes().to_vec()),
        (TypeTag::Doub, (-1.5f64).to_be_bytes().to_vec()),
        (TypeTag::Logi, 0xFFFF_FFFFu32.to_be_bytes().to_vec()),
        (TypeTag::Char, b"ABCDEFGH".to_vec()),
    ];

    for (tag, disk) in cases {
        let mut buf = disk.clone();
        decode_in_place(&mut buf, *tag, 1).expect("decode ok");
        encode_in_place(&mut buf, *tag, 1).expect("encode ok");
        assert_eq!(&buf, disk, "round trip for {}", tag);
    }
}

#[test]
fn decode_is_big_endian_to_native() {
    let mut buf = vec![0x00, 0x00, 0x00, 0x2A];
    decode_in_place(&mut buf, TypeTag::Inte, 1).expect("decode ok");
    assert_eq!(i32::from_ne_bytes(buf[..4].try_into().unwrap()), 42);
}

#[test]
fn decode_rejects_short_buffers_and_x231() {
    let mut buf = vec![0u8; 4];
    assert!(decode_in_place(&mut buf, TypeTag::Doub, 1).is_err());
    assert_eq!(
        decode_in_place(&mut buf, TypeTag::X231, 1)
            .expect_err("x231 must fail")
            .code(),
        "Unsupported"
    );
}

#[test]
fn open_missing_file_is_invalid_args() {
    let err = open("/no/such/file.UNSMRY").err().expect("open must fail");
    assert_eq!(err.code(), "InvalidArgs");
    assert!(format!("{}", err).contains("/no/such/file.UNSMRY"));
}

#[test]
fn open_reads_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("CASE.DATA");
    let mut file = std::fs::File::create(&path).expect("create fixture");
    file.write_all(&inte_array("SEQHDR", &[1]))
        .expect("write fixture");
    drop(file);

    let mut arrays = open(&path).expect("open fixture");
    let array = arrays.next_array().expect("read ok").expect("one array");
    assert_eq!(array.name_str().trim_end(), "SEQHDR");
    assert!(arrays.next_array().expect("read ok").is_none());
}
