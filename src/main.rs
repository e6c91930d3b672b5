use std::{path::PathBuf, str::FromStr};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, LevelFilter};
use serde_json::json;
use simple_logger::SimpleLogger;
use vietqr::{
    build_payload, config::Conf, render_bmp, render_text, verify_payload, EcLevel, Options,
};

/// VietQR generator: builds NAPAS payloads and renders them as QR images.
#[derive(Parser, Debug)]
#[command(name = "vietqr", version)]
struct Cli {
    /// Config file (TOML, extension optional). Defaults to ./vietqr.toml if present.
    #[arg(long, global = true)]
    config: Option<String>,
    /// Log debug output.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Build a payload and optionally write it as a BMP image.
    Generate {
        /// Beneficiary bank BIN, e.g. 970436.
        bank_bin: String,
        /// Beneficiary account number.
        account_number: String,
        /// Transaction amount in VND; 0 or omitted gives a static QR.
        #[arg(long, default_value_t = 0)]
        amount: u64,
        #[arg(long, default_value = "")]
        purpose: String,
        #[arg(long, default_value = "")]
        merchant_name: String,
        /// Image output path.
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long, value_enum)]
        ec_level: Option<EcLevel>,
        /// Pixels per module.
        #[arg(long)]
        scale: Option<u8>,
        /// Also draw the QR code in the terminal.
        #[arg(long, default_value_t = false)]
        print: bool,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Check the checksum of a payload and list its fields.
    Verify { payload: String },
}

fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut conf = Conf::load(cli.config.as_deref()).context("failed to load config")?;

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        conf.log_level
            .as_deref()
            .map(LevelFilter::from_str)
            .transpose()
            .map_err(|e| anyhow!("invalid log_level: {e}"))?
            .unwrap_or(LevelFilter::Info)
    };
    SimpleLogger::new().with_level(level).init()?;

    match cli.cmd {
        Cmd::Generate {
            bank_bin,
            account_number,
            amount,
            purpose,
            merchant_name,
            output,
            ec_level,
            scale,
            print,
            json,
        } => {
            let options = Options {
                bank_bin,
                account_number,
                amount: (amount > 0).then_some(amount),
                purpose: non_empty(purpose),
                merchant_name: non_empty(merchant_name),
            };

            if let Some(ec_level) = ec_level {
                conf.render.ec_level = ec_level;
            }
            if let Some(scale) = scale {
                conf.render.scale = scale;
            }

            let payload = build_payload(&options)?;

            if json {
                let crc = &payload[payload.len() - 4..];
                println!("{}", json!({ "payload": payload, "crc": crc }));
            } else {
                println!("{payload}");
            }

            if print {
                println!("{}", render_text(&payload, &conf.render)?);
            }

            if let Some(path) = output {
                let image = render_bmp(&payload, &conf.render)?;
                tokio::fs::write(&path, image)
                    .await
                    .with_context(|| format!("failed to write {}", path.display()))?;

                info!("QR code saved to {}", path.display());
            }
        }
        Cmd::Verify { payload } => {
            let fields = verify_payload(&payload)?;

            for field in &fields {
                println!("{} {}", field.t, field.as_text().unwrap_or_default());
            }
            info!("checksum OK");
        }
    }

    Ok(())
}
