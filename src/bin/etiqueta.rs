//! Command-line label generator.
//!
//! Reads a JSON request body (the legacy service contract) or a raw
//! CT-e/NF-e document from a file or stdin and writes the label PDF.
//!
//! Usage:
//!   etiqueta <request.json|document.xml> [output.pdf]
//!   cat request.json | etiqueta - labels.pdf

use std::env;
use std::fs;
use std::io::Read;
use std::process::ExitCode;

use etiqueta::{api, LabelRequest};

fn run() -> etiqueta::Result<()> {
    let args: Vec<String> = env::args().collect();
    let input = args.get(1).map(String::as_str).unwrap_or("-");
    let output = args.get(2).map(String::as_str).unwrap_or("etiqueta.pdf");

    let body = if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(input)?
    };

    let request = if body.trim_start().starts_with('<') {
        // Raw CT-e/NF-e document: default dimensions, fields mined from it.
        LabelRequest {
            xml: Some(body),
            ..Default::default()
        }
    } else {
        serde_json::from_str(&body)
            .map_err(|e| etiqueta::Error::Parse(format!("request body: {}", e)))?
    };

    let pdf = api::generate(&request)?;
    fs::write(output, &pdf)?;
    log::info!("wrote {} ({} bytes)", output, pdf.len());
    println!("{}", output);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        },
    }
}
