//! UUIDs, byte blobs and colors: fixed-size values read straight from the
//! byte source.

use super::Draw;
use crate::error::GeneratorError;
use crate::source::RandomSource;
use base64::{engine::general_purpose::STANDARD, Engine};
use randkit_core::{
    ByteEncoding, BytesParams, ColorParams, GeneratedValue, GenerationMeta, PrimitiveMeta,
    UuidParams,
};
use uuid::Uuid;

/// Random bits in a version 4 UUID (6 of the 128 are fixed).
const UUID_RANDOM_BITS: u64 = 122;

/// Build a version 4, RFC 4122 variant UUID from 16 random bytes.
pub fn uuid_v4<S: RandomSource + ?Sized>(source: &mut S) -> Result<Uuid, GeneratorError> {
    let mut bytes = [0u8; 16];
    source.fill_bytes(&mut bytes)?;
    bytes[6] = (bytes[6] & 0x0f) | 0x40; // Version 4
    bytes[8] = (bytes[8] & 0x3f) | 0x80; // Variant RFC 4122
    Ok(Uuid::from_bytes(bytes))
}

pub fn format_uuid(uuid: &Uuid, hyphens: bool, uppercase: bool) -> String {
    match (hyphens, uppercase) {
        (true, false) => uuid.hyphenated().to_string(),
        (true, true) => format!("{:X}", uuid.hyphenated()),
        (false, false) => uuid.simple().to_string(),
        (false, true) => format!("{:X}", uuid.simple()),
    }
}

pub fn uuids<S: RandomSource + ?Sized>(
    source: &mut S,
    params: &UuidParams,
) -> Result<Draw, GeneratorError> {
    let values = (0..params.count)
        .map(|_| {
            uuid_v4(source)
                .map(|uuid| GeneratedValue::Text(format_uuid(&uuid, params.hyphens, params.uppercase)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Draw::new(values).with_meta(GenerationMeta::Primitive(PrimitiveMeta {
        bits: UUID_RANDOM_BITS,
    })))
}

pub fn encode_bytes(bytes: &[u8], params: &BytesParams) -> String {
    match params.encoding {
        ByteEncoding::Hex => {
            let digits = if params.uppercase {
                hex::encode_upper(bytes)
            } else {
                hex::encode(bytes)
            };
            if params.prefix {
                format!("0x{digits}")
            } else {
                digits
            }
        }
        ByteEncoding::Base64 => STANDARD.encode(bytes),
        ByteEncoding::Array => {
            let items: Vec<String> = bytes.iter().map(u8::to_string).collect();
            format!("[{}]", items.join(", "))
        }
    }
}

pub fn blobs<S: RandomSource + ?Sized>(
    source: &mut S,
    params: &BytesParams,
) -> Result<Draw, GeneratorError> {
    let values = (0..params.count)
        .map(|_| {
            source
                .bytes(params.length)
                .map(|bytes| GeneratedValue::Text(encode_bytes(&bytes, params)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Draw::new(values).with_meta(GenerationMeta::Primitive(PrimitiveMeta {
        bits: params.length as u64 * 8,
    })))
}

/// Random `#rrggbb` colors.
pub fn colors<S: RandomSource + ?Sized>(
    source: &mut S,
    params: &ColorParams,
) -> Result<Draw, GeneratorError> {
    let values = (0..params.count)
        .map(|_| {
            source
                .bytes(3)
                .map(|rgb| GeneratedValue::Text(format!("#{}", hex::encode(rgb))))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Draw::new(values).with_meta(GenerationMeta::Primitive(PrimitiveMeta { bits: 24 })))
}
