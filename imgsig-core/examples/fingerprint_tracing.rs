//! Example showing the tracing output of a full fingerprint run.
//!
//! Run with: cargo run -p imgsig-core --example fingerprint_tracing [IMAGE]
//!
//! Without an argument a synthetic PNG is generated in memory.

use std::io::Cursor;

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use imgsig_core::{Fingerprinter, Precision};
use tracing_subscriber::{fmt, EnvFilter};

fn synthetic_png() -> Vec<u8> {
    let img = ImageBuffer::from_fn(200, 150, |x, y| {
        let shade = ((x * 255) / 200) as u8;
        if (x / 25 + y / 25) % 2 == 0 {
            Rgb([shade, 80, 160])
        } else {
            Rgb([30, shade, 40])
        }
    });
    let mut buffer = Cursor::new(Vec::new());
    if let Err(e) = DynamicImage::ImageRgb8(img).write_to(&mut buffer, ImageFormat::Png) {
        eprintln!("Failed to encode demo image: {}", e);
    }
    buffer.into_inner()
}

fn main() {
    fmt()
        .with_env_filter(EnvFilter::new("imgsig_core=trace,info"))
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    println!("=== imgsig Tracing Demo ===\n");

    let bytes = match std::env::args().nth(1) {
        Some(path) => match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("Failed to read {}: {}", path, e);
                return;
            }
        },
        None => synthetic_png(),
    };

    let fingerprinter = Fingerprinter::with_image_backend();
    println!("Input: {} bytes\n", bytes.len());

    match fingerprinter.fingerprint(&bytes) {
        Ok(fingerprint) => {
            println!("\nContent type: {}", fingerprint.content_type);
            println!("Signature:    {}", fingerprint.signature.encode(Precision::new(4)));
            println!(
                "Pattern:      {} chars at default precision",
                fingerprint.pattern.encode(Precision::DEFAULT).len()
            );
        }
        Err(e) => {
            println!("\nFailed: {}", e);
        }
    }
}
