#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test]
fn WrpError___invalid_argument___displays_correctly() {
    let err = WrpError::InvalidArgument("nil context".into());

    let display = err.to_string();

    assert_eq!(display, "invalid argument: nil context");
}

#[test]
fn WrpError___from_io_error___converts_to_io() {
    let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");

    let err: WrpError = io_err.into();

    assert!(matches!(err, WrpError::Io(_)));
    assert!(err.to_string().contains("closed"));
}

#[test]
fn WrpError___from_serde_error___converts_to_config_error() {
    let json_err = serde_json::from_str::<String>("invalid").unwrap_err();

    let err: WrpError = json_err.into();

    assert!(matches!(err, WrpError::ConfigError(_)));
}

#[test_case(WrpError::Cancelled, true)]
#[test_case(WrpError::Timeout, true)]
#[test_case(WrpError::HandlerError("boom".into()), false)]
#[test_case(WrpError::DeserializationError("eof".into()), false)]
fn WrpError___is_context_error___only_for_cancellation_and_timeout(
    err: WrpError,
    expected: bool,
) {
    assert_eq!(err.is_context_error(), expected);
}
