//! CRC-16/CCITT-FALSE: poly 0x1021, init 0xFFFF, no reflection, no final XOR.
//!
//! Not to be confused with CRC-16/XMODEM (init 0x0000) or CRC-16/KERMIT
//! (reflected); banking apps reject payloads checked with either.

const POLY: u16 = 0x1021;
const INIT: u16 = 0xFFFF;

pub fn crc16(buf: &[u8]) -> u16 {
    let mut crc = INIT;

    for &byte in buf {
        crc ^= u16::from(byte) << 8;

        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ POLY;
            } else {
                crc <<= 1;
            }
        }
    }

    crc
}

/// Checksum rendered as exactly four uppercase hex digits.
pub fn crc16_hex(buf: &[u8]) -> String {
    hex::encode_upper(crc16(buf).to_be_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_value() {
        assert_eq!(crc16(b"123456789"), 0x29B1);
        assert_eq!(crc16_hex(b"123456789"), "29B1");
    }

    #[test]
    fn empty_input_is_init() {
        assert_eq!(crc16(b""), 0xFFFF);
    }

    #[test]
    fn pads_to_four_digits() {
        let hex = crc16_hex(b"00020101021138540010A00000072701240006970415011009876543210208QRIBFTTA53037045802VN6304");
        assert_eq!(hex, "04F8");
    }

    #[test]
    fn uppercase_hex() {
        let hex = crc16_hex(b"test");
        assert_eq!(hex, "1FC6");
        assert!(hex.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }
}
