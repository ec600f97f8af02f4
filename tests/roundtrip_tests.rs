//! Read/write round-trip coverage for both encodings.

use dxfmodel::io::{
    BinaryRecordWriter, RecordInput, RecordReader, RecordWriter, TextRecordReader,
    TextRecordWriter,
};
use dxfmodel::{Model, Record};
use proptest::prelude::*;

const DRAWING: &str = concat!(
    "999\nfloor plan\n",
    "  0\nSECTION\n  2\nHEADER\n",
    "  9\n$ACADVER\n  1\nAC1014\n",
    "  9\n$EXTMIN\n 10\n0.0\n 20\n0.0\n 30\n0.0\n",
    "  0\nENDSEC\n",
    "  0\nSECTION\n  2\nTABLES\n",
    "  0\nTABLE\n  2\nLAYER\n 70\n2\n",
    "  0\nLAYER\n  2\nWALLS\n 70\n0\n 62\n1\n  6\nCONTINUOUS\n",
    "  0\nLAYER\n  2\nDOORS\n 70\n0\n 62\n3\n  6\nCONTINUOUS\n",
    "  0\nENDTAB\n",
    "  0\nENDSEC\n",
    "  0\nSECTION\n  2\nBLOCKS\n",
    "  0\nBLOCK\n  8\n0\n  2\nDOOR\n 70\n0\n 10\n0.0\n 20\n0.0\n 30\n0.0\n  3\nDOOR\n",
    "  0\nLINE\n  8\n0\n 10\n0.0\n 20\n0.0\n 30\n0.0\n 11\n0.9\n 21\n0.0\n 31\n0.0\n",
    "  0\nENDBLK\n",
    "  0\nENDSEC\n",
    "  0\nSECTION\n  2\nENTITIES\n",
    "  0\nLINE\n  8\nWALLS\n 10\n0.0\n 20\n0.0\n 30\n0.0\n 11\n10.0\n 21\n0.0\n 31\n0.0\n",
    "  0\nCIRCLE\n  8\nWALLS\n 10\n5.0\n 20\n5.0\n 30\n0.0\n 40\n2.0\n",
    "  0\nINSERT\n  8\nDOORS\n  2\nDOOR\n 10\n3.0\n 20\n0.0\n 30\n0.0\n",
    "  0\nXFUTURE\n  8\nDOORS\n 70\n42\n1001\nACME\n",
    "  0\nENDSEC\n",
    "  0\nEOF\n"
);

#[test]
fn text_round_trip_preserves_model() {
    let first: Model = DRAWING.parse().unwrap();

    let mut buf = Vec::new();
    first.write(&mut buf).unwrap();
    let second = Model::read(buf.as_slice()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn text_output_is_stable() {
    let first: Model = DRAWING.parse().unwrap();
    let mut once = Vec::new();
    first.write(&mut once).unwrap();

    let second = Model::read(once.as_slice()).unwrap();
    let mut twice = Vec::new();
    second.write(&mut twice).unwrap();

    assert_eq!(once, twice);
}

#[test]
fn binary_round_trip_preserves_sections() {
    let first: Model = DRAWING.parse().unwrap();

    let mut buf = Vec::new();
    first.write_binary(&mut buf).unwrap();
    assert!(buf.starts_with(b"AutoCAD Binary DXF"));

    let second = Model::read(buf.as_slice()).unwrap();
    assert_eq!(first.sections(), second.sections());
    // Comments have no binary representation and do not survive.
    assert!(second.header_comments().is_empty());
}

#[test]
fn unknown_content_survives_both_encodings() {
    let first: Model = DRAWING.parse().unwrap();
    let unknown = first
        .entities()
        .iter()
        .find(|e| e.type_name() == "XFUTURE")
        .unwrap();
    assert_eq!(unknown.layer(), "DOORS");

    let mut buf = Vec::new();
    first.write_binary(&mut buf).unwrap();
    let second = Model::read(buf.as_slice()).unwrap();
    assert!(second
        .entities()
        .iter()
        .any(|e| e.type_name() == "XFUTURE"));
}

#[test]
fn control_characters_in_text_values() {
    let data = "  0\nSECTION\n  2\nENTITIES\n  0\nTEXT\n 10\n0.0\n 40\n1.0\n  1\nline1^Jline2^I^ caret\n  0\nENDSEC\n  0\nEOF\n";
    let first: Model = data.parse().unwrap();
    match &first.entities()[0] {
        // "^ " decodes to a literal caret.
        dxfmodel::entities::Entity::Text(text) => {
            assert_eq!(text.value, "line1\nline2\t^caret")
        }
        other => panic!("unexpected entity {:?}", other),
    }

    let mut buf = Vec::new();
    first.write(&mut buf).unwrap();
    let second = Model::read(buf.as_slice()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn edge_whitespace_in_text_values_round_trips() {
    let data = "  0\nSECTION\n  2\nENTITIES\n  0\nTEXT\n 10\n0.0\n 40\n1.0\n  1\npad \n  0\nENDSEC\n  0\nEOF\n";
    let first: Model = data.parse().unwrap();
    match &first.entities()[0] {
        dxfmodel::entities::Entity::Text(text) => assert_eq!(text.value, "pad "),
        other => panic!("unexpected entity {:?}", other),
    }

    let mut buf = Vec::new();
    first.write(&mut buf).unwrap();
    let second = Model::read(buf.as_slice()).unwrap();
    assert_eq!(first, second);
}

/// Dyadic doubles print exactly within 15 fractional digits.
fn nice_double() -> impl Strategy<Value = f64> {
    (-1_000_000i64..1_000_000i64).prop_map(|n| n as f64 / 1024.0)
}

fn record_strategy() -> impl Strategy<Value = Record> {
    prop_oneof![
        ("[A-Za-z0-9_.^-]{0,24}", prop_oneof![Just(1), Just(8), Just(100)])
            .prop_map(|(s, code)| Record::string(code, &s)),
        (nice_double(), prop_oneof![Just(10), Just(40), Just(140)])
            .prop_map(|(v, code)| Record::double(code, v)),
        any::<i16>().prop_map(|v| Record::integer(70, v as i32)),
        any::<i32>().prop_map(|v| Record::integer(90, v)),
        (-128i32..128).prop_map(|v| Record::integer(280, v)),
        "[0-9A-F]{1,8}".prop_map(|h| Record::hex(330, &h)),
    ]
}

proptest! {
    #[test]
    fn record_survives_text_encoding(record in record_strategy()) {
        let mut buf = Vec::new();
        {
            let mut w = TextRecordWriter::new(&mut buf);
            w.write_record(&record).unwrap();
        }
        let mut r = TextRecordReader::new(buf.as_slice());
        let read = r.read_record().unwrap().unwrap();
        prop_assert_eq!(read, record);
    }

    #[test]
    fn record_survives_binary_encoding(record in record_strategy()) {
        let mut buf = Vec::new();
        {
            let mut w = BinaryRecordWriter::new(&mut buf).unwrap();
            // Binary detection keys off the leading code-0 record.
            w.write_record(&Record::string(0, "SECTION")).unwrap();
            w.write_record(&record).unwrap();
        }
        let mut r = RecordInput::new(buf.as_slice()).unwrap();
        assert!(r.is_binary());
        let marker = r.read_record().unwrap().unwrap();
        prop_assert_eq!(marker.code, 0);
        let read = r.read_record().unwrap().unwrap();
        prop_assert_eq!(read, record);
    }
}
