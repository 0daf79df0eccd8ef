#![allow(non_snake_case)]

use super::prelude::*;
use super::{Codec, codec_for, decode_request_async};

fn relay_message() -> Message {
    Message::simple_request_response("dns:caller", "mac:112233445566/service", b"P".to_vec())
        .with_transaction_uuid("abc-123")
}

#[test]
fn prelude___config_driven_relay___reuses_inbound_bytes() {
    let config = EndpointConfig::from_json(br#"{"format": "bincode", "encoder_pool_size": 2}"#).unwrap();
    let decoders = DecoderPool::from_config(&config);
    let encoders = EncoderPool::from_config(&config);
    let inbound = codec_for(Format::Bincode).encode(&relay_message()).unwrap();

    let request = decode_request_bytes(None, inbound.clone(), &decoders).unwrap();

    assert_eq!(request.encode_bytes(&encoders).unwrap(), inbound);
    assert_eq!(encoders.capacity(), 2);
}

#[test]
fn prelude___traced_service___returns_annotated_reply() {
    let echo = Traced::new(
        "echo",
        service_fn(|request: &Request| {
            let reply = request.message().response_to(request.message().payload.clone());
            Ok(wrap_as_response(reply))
        }),
    );
    let request = wrap_as_request(None, relay_message());

    let response = echo.serve(&request).unwrap();

    assert_eq!(response.destination(), "dns:caller");
    assert_eq!(response.spans().len(), 1);
}

#[tokio::test]
async fn prelude___async_decode_with_timeout_context___carries_deadline() {
    let (ctx, _cancel) = Context::background().with_timeout(Duration::from_secs(30));
    let decoders = DecoderPool::new(1, Format::Json);
    let inbound = codec_for(Format::Json).encode(&relay_message()).unwrap();

    let request = decode_request_async(Some(ctx.clone()), &mut inbound.as_slice(), &decoders)
        .await
        .unwrap();

    assert_eq!(request.context().deadline(), ctx.deadline());
    assert!(!request.context().is_cancelled());
}
