//! VietQR (NAPAS) payload encoding: TLV fields, nested merchant account
//! info and the trailing CRC-16/CCITT-FALSE checksum.

pub mod config;
pub mod crc16;
pub mod error;
pub mod payload;
pub mod render;
pub mod tlv;

pub use crc16::{crc16, crc16_hex};
pub use error::{Error, Result};
pub use payload::{build_payload, build_payload_with, verify_payload, Options, Profile};
pub use render::{render_bmp, render_text, EcLevel, RenderOptions};
pub use tlv::{build_tlv, format_tlv, parse_tlv, Tag, Tlv, Value};
