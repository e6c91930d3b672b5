use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    crc16::crc16_hex,
    error::{Error, Result},
    tlv::{build_tlv, format_tlv, parse_tlv, Tag, Tlv},
};

pub const PAYLOAD_FORMAT_INDICATOR: Tag = Tag::new(0);
pub const POINT_OF_INITIATION: Tag = Tag::new(1);
pub const MERCHANT_ACCOUNT_INFO: Tag = Tag::new(38);
pub const TRANSACTION_CURRENCY: Tag = Tag::new(53);
pub const TRANSACTION_AMOUNT: Tag = Tag::new(54);
pub const COUNTRY_CODE: Tag = Tag::new(58);
pub const MERCHANT_NAME: Tag = Tag::new(59);
pub const ADDITIONAL_DATA: Tag = Tag::new(62);
pub const CRC: Tag = Tag::new(63);

// Sub-tags inside 38.
const GUID: Tag = Tag::new(0);
const BENEFICIARY: Tag = Tag::new(1);
const SERVICE_CODE: Tag = Tag::new(2);
const BENEFICIARY_BIN: Tag = Tag::new(0);
const BENEFICIARY_ACCOUNT: Tag = Tag::new(1);

// Sub-tag inside 62.
const PURPOSE: Tag = Tag::new(8);

pub const STATIC_QR: &str = "11";
pub const DYNAMIC_QR: &str = "12";

/// Tag and length of the checksum field, which the checksum itself covers.
pub const CRC_PREFIX: &str = "6304";

/// Fixed scheme constants of a VietQR payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub format_indicator: String,
    pub guid: String,
    pub service_code: String,
    pub currency: String,
    pub country: String,
}

impl Profile {
    pub fn napas() -> Self {
        Self {
            format_indicator: String::from("01"),
            guid: String::from("A000000727"),
            service_code: String::from("QRIBFTTA"),
            currency: String::from("704"),
            country: String::from("VN"),
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::napas()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    pub bank_bin: String,
    pub account_number: String,
    #[serde(default)]
    pub amount: Option<u64>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub merchant_name: Option<String>,
}

impl Options {
    pub fn new(bank_bin: impl Into<String>, account_number: impl Into<String>) -> Self {
        Self {
            bank_bin: bank_bin.into(),
            account_number: account_number.into(),
            ..Self::default()
        }
    }

    pub fn amount(mut self, amount: u64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = Some(purpose.into());
        self
    }

    pub fn merchant_name(mut self, name: impl Into<String>) -> Self {
        self.merchant_name = Some(name.into());
        self
    }

    /// Amount `0` means no amount, i.e. a static QR.
    pub fn effective_amount(&self) -> Option<u64> {
        self.amount.filter(|&a| a > 0)
    }

    pub fn is_dynamic(&self) -> bool {
        self.effective_amount().is_some()
    }
}

pub fn build_payload(options: &Options) -> Result<String> {
    build_payload_with(&Profile::napas(), options)
}

pub fn build_payload_with(profile: &Profile, options: &Options) -> Result<String> {
    if options.bank_bin.is_empty() {
        return Err(Error::MissingRequiredField("bank_bin"));
    }
    if options.account_number.is_empty() {
        return Err(Error::MissingRequiredField("account_number"));
    }

    let merchant_account = Tlv::nested(
        MERCHANT_ACCOUNT_INFO,
        vec![
            Tlv::text(GUID, profile.guid.as_str()),
            Tlv::nested(
                BENEFICIARY,
                vec![
                    Tlv::text(BENEFICIARY_BIN, options.bank_bin.as_str()),
                    Tlv::text(BENEFICIARY_ACCOUNT, options.account_number.as_str()),
                ],
            ),
            Tlv::text(SERVICE_CODE, profile.service_code.as_str()),
        ],
    );

    let amount = options.effective_amount().map(|a| a.to_string());
    let initiation = if amount.is_some() {
        DYNAMIC_QR
    } else {
        STATIC_QR
    };

    let mut fields = vec![
        Tlv::text(PAYLOAD_FORMAT_INDICATOR, profile.format_indicator.as_str()),
        Tlv::text(POINT_OF_INITIATION, initiation),
        merchant_account,
        Tlv::text(TRANSACTION_CURRENCY, profile.currency.as_str()),
    ];
    if let Some(amount) = amount {
        fields.push(Tlv::text(TRANSACTION_AMOUNT, amount));
    }
    fields.push(Tlv::text(COUNTRY_CODE, profile.country.as_str()));
    if let Some(name) = &options.merchant_name {
        fields.push(Tlv::text(MERCHANT_NAME, name.as_str()));
    }
    if let Some(purpose) = &options.purpose {
        fields.push(Tlv::nested(
            ADDITIONAL_DATA,
            vec![Tlv::text(PURPOSE, purpose.as_str())],
        ));
    }

    let payload = build_tlv(&fields)?;
    let crc_input = format!("{payload}{CRC_PREFIX}");
    debug!("checksum input: {crc_input}");

    let crc = crc16_hex(crc_input.as_bytes());

    Ok(payload + &format_tlv(CRC, Some(&crc))?)
}

/// Checks the trailing checksum of a payload and returns its top-level
/// fields, checksum field included.
pub fn verify_payload(payload: &str) -> Result<Vec<Tlv>> {
    let fields = parse_tlv(payload)?;

    let found = fields
        .last()
        .filter(|f| f.t == CRC)
        .and_then(Tlv::as_text)
        .filter(|v| v.len() == 4 && v.is_ascii())
        .ok_or(Error::MissingChecksum)?;

    // Everything up to and including "6304" is covered.
    let covered = &payload[..payload.len() - found.len()];
    let expected = crc16_hex(covered.as_bytes());

    if !expected.eq_ignore_ascii_case(found) {
        return Err(Error::ChecksumMismatch {
            expected,
            found: found.to_string(),
        });
    }

    Ok(fields)
}
