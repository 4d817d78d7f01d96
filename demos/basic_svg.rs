use std::error::Error;

use qrstyle::{EyeShape, ModuleShape, QRStyler};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let svg = QRStyler::new("https://example.com")
        .module_shape(ModuleShape::Rounded) // if not provided, defaults to ModuleShape::Square
        .eye_shape(EyeShape::Circle)        // if not provided, defaults to EyeShape::Square
        .to_svg(400)?;

    std::fs::write("basic_qr.svg", svg)?;
    println!("SVG QR code saved to: basic_qr.svg");
    Ok(())
}
