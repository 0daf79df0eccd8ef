#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

fn sample_message() -> Message {
    Message::simple_request_response("dns:caller", "mac:112233445566/service", b"payload".to_vec())
        .with_transaction_uuid("abc-123")
        .with_metadata("trace", "on")
}

// JsonCodec tests

#[test]
fn JsonCodec___encode_decode___roundtrip_preserves_data() {
    let original = sample_message();

    let encoded = JsonCodec.encode(&original).unwrap();
    let decoded = JsonCodec.decode(&encoded).unwrap();

    assert_eq!(original, decoded);
}

#[test]
fn JsonCodec___encode___output_is_compact() {
    let encoded = JsonCodec.encode(&sample_message()).unwrap();

    assert!(!encoded.contains(&b'\n'));
}

#[test]
fn JsonCodec___encode_into___appends_to_existing_output() {
    let mut output = b"prefix".to_vec();

    JsonCodec.encode_into(&mut output, &sample_message()).unwrap();

    assert!(output.starts_with(b"prefix{"));
}

#[test]
fn JsonCodec___decode___invalid_json_returns_deserialization_error() {
    let result = JsonCodec.decode(b"invalid json");

    assert!(matches!(result, Err(CodecError::Deserialization(_))));
}

#[test]
fn JsonCodec___content_type___returns_application_json() {
    assert_eq!(JsonCodec.content_type(), "application/json");
}

// BincodeCodec tests

#[test]
fn BincodeCodec___encode_decode___roundtrip_preserves_data() {
    let original = sample_message();

    let encoded = BincodeCodec.encode(&original).unwrap();
    let decoded = BincodeCodec.decode(&encoded).unwrap();

    assert_eq!(original, decoded);
}

#[test]
fn BincodeCodec___decode___truncated_input_returns_error() {
    let encoded = BincodeCodec.encode(&sample_message()).unwrap();

    let result = BincodeCodec.decode(&encoded[..encoded.len() / 2]);

    assert!(matches!(result, Err(CodecError::Deserialization(_))));
}

#[test]
fn BincodeCodec___encode___differs_from_json() {
    let message = sample_message();

    assert_ne!(
        BincodeCodec.encode(&message).unwrap(),
        JsonCodec.encode(&message).unwrap()
    );
}

// Shared behavior

#[test_case(Format::Json)]
#[test_case(Format::Bincode)]
fn codec_for___format___returns_matching_codec(format: Format) {
    assert_eq!(codec_for(format).format(), format);
}

#[test_case(Format::Json)]
#[test_case(Format::Bincode)]
fn Codec___decode___empty_input_returns_error(format: Format) {
    let result = codec_for(format).decode(&[]);

    assert!(matches!(result, Err(CodecError::Deserialization(_))));
}

// CodecError tests

#[test]
fn CodecError___from_serde_error___syntax_error_becomes_deserialization() {
    let err = serde_json::from_str::<Message>("invalid").unwrap_err();

    let codec_err: CodecError = err.into();

    assert!(matches!(codec_err, CodecError::Deserialization(_)));
}

#[test]
fn encode_error___serializer_failure___becomes_serialization() {
    let unencodable = std::collections::BTreeMap::from([(vec![1u8], 1u8)]);
    let err = serde_json::to_vec(&unencodable).unwrap_err();
    assert!(!err.is_io());

    let codec_err = encode_error(err);

    assert!(matches!(codec_err, CodecError::Serialization(_)));
}

#[test]
fn CodecError___display___shows_error_message() {
    let err = CodecError::Serialization("test error".into());

    assert!(err.to_string().contains("test error"));
}

#[test]
fn CodecError___into_wrp_error___maps_each_variant() {
    let io = std::io::Error::new(std::io::ErrorKind::WriteZero, "full");

    assert!(matches!(
        WrpError::from(CodecError::Deserialization("x".into())),
        WrpError::DeserializationError(_)
    ));
    assert!(matches!(
        WrpError::from(CodecError::Serialization("x".into())),
        WrpError::SerializationError(_)
    ));
    assert!(matches!(
        WrpError::from(CodecError::InvalidFormat("x".into())),
        WrpError::UnsupportedFormat(_)
    ));
    assert!(matches!(WrpError::from(CodecError::Io(io)), WrpError::Io(_)));
}
