use std::error::Error;

use qrstyle::payload::{format_wifi, Payload};
use qrstyle::{Background, Color, EyeShape, LabelFont, ModuleShape, QRStyler};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    // Usage: styled_png [logo path] [font path], the font replacing the bundled one
    let mut args = std::env::args().skip(1);
    let logo = args.next();
    let font = args.next();

    let data = format_wifi("Home;Net", "correct horse", "WPA", false);
    let mut styler = QRStyler::new(&data);
    styler
        .module_shape(ModuleShape::Liquid)
        .eye_shape(EyeShape::Leaf)
        .foreground("#1d3557".parse::<Color>()?)
        .background(Background::Transparent)
        .label("Home;Net");

    if let Some(path) = logo {
        styler.logo(path.as_str());
    }
    if let Some(path) = font {
        styler.label_font(LabelFont::try_from_vec(std::fs::read(path)?)?);
    }

    println!("QR style: {}", styler.metadata());
    let out = styler.to_raster(600).await?;
    out.save("styled_qr.png")?;
    println!("Styled QR code saved to: styled_qr.png (logo: {:?})", out.logo);

    let card: Payload = serde_json::from_str(r#"{"type":"vcard","firstName":"Ada","lastName":"Lovelace"}"#)?;
    let svg = QRStyler::new(&card.to_text()).to_svg(600)?;
    std::fs::write("vcard_qr.svg", svg)?;
    println!("vCard QR code saved to: vcard_qr.svg");
    Ok(())
}
