use clap::ValueEnum;
use log::debug;
use qr_code::QrCode;
use serde::Deserialize;

use crate::error::{Error, Result};

/// QR error correction level. `Quartile` recovers roughly 25% damage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EcLevel {
    Low,
    Medium,
    #[default]
    Quartile,
    High,
}

impl From<EcLevel> for qr_code::EcLevel {
    fn from(level: EcLevel) -> Self {
        match level {
            EcLevel::Low => qr_code::EcLevel::L,
            EcLevel::Medium => qr_code::EcLevel::M,
            EcLevel::Quartile => qr_code::EcLevel::Q,
            EcLevel::High => qr_code::EcLevel::H,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RenderOptions {
    #[serde(default)]
    pub ec_level: EcLevel,
    /// Pixels per module.
    #[serde(default = "RenderOptions::default_scale")]
    pub scale: u8,
    /// Quiet zone, in modules.
    #[serde(default = "RenderOptions::default_border")]
    pub border: u8,
}

impl RenderOptions {
    fn default_scale() -> u8 {
        8
    }

    fn default_border() -> u8 {
        4
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            ec_level: EcLevel::default(),
            scale: Self::default_scale(),
            border: Self::default_border(),
        }
    }
}

fn encode(payload: &str, opts: &RenderOptions) -> Result<QrCode> {
    let code = QrCode::with_error_correction_level(payload, opts.ec_level.into())
        .map_err(|e| Error::Rendering(format!("{e:?}")))?;

    debug!("encoded {} chars at {:?}", payload.len(), opts.ec_level);

    Ok(code)
}

/// Renders the payload as a monochrome BMP image.
pub fn render_bmp(payload: &str, opts: &RenderOptions) -> Result<Vec<u8>> {
    let mut bmp = encode(payload, opts)?.to_bmp();

    if opts.border > 0 {
        bmp = bmp
            .add_white_border(opts.border)
            .map_err(|e| Error::Rendering(format!("{e:?}")))?;
    }
    if opts.scale > 1 {
        bmp = bmp
            .mul(opts.scale)
            .map_err(|e| Error::Rendering(format!("{e:?}")))?;
    }

    let mut out = Vec::new();
    bmp.write(&mut out)
        .map_err(|e| Error::Rendering(format!("{e:?}")))?;

    Ok(out)
}

/// Renders the payload with block characters for a terminal.
pub fn render_text(payload: &str, opts: &RenderOptions) -> Result<String> {
    Ok(encode(payload, opts)?.to_string(true, opts.border))
}
