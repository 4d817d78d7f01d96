use crate::common::{Background, Color, ECLevel, EyeShape, ModuleShape, RenderResult};
use crate::encoder::{Encode, ModuleMatrix, QrcodeEncoder};
use crate::render::{raster, svg, RasterOutput};
use crate::style::{LabelFont, LogoSource, Style};

pub struct QRStyler<'a, E: Encode = QrcodeEncoder> {
    data: &'a str,
    style: Style,
    encoder: E,
}

impl<'a> QRStyler<'a> {
    pub fn new(data: &'a str) -> Self {
        Self { data, style: Style::default(), encoder: QrcodeEncoder }
    }
}

impl<'a, E: Encode> QRStyler<'a, E> {
    pub fn encoder<F: Encode>(self, encoder: F) -> QRStyler<'a, F> {
        QRStyler { data: self.data, style: self.style, encoder }
    }

    pub fn data(&mut self, data: &'a str) -> &mut Self {
        self.data = data;
        self
    }

    pub fn style(&mut self, style: Style) -> &mut Self {
        self.style = style;
        self
    }

    pub fn module_shape(&mut self, shape: ModuleShape) -> &mut Self {
        self.style.module_shape = shape;
        self
    }

    pub fn eye_shape(&mut self, shape: EyeShape) -> &mut Self {
        self.style.eye_shape = shape;
        self
    }

    pub fn foreground(&mut self, color: Color) -> &mut Self {
        self.style.foreground = color;
        self
    }

    pub fn background(&mut self, bg: impl Into<Background>) -> &mut Self {
        self.style.background = bg.into();
        self
    }

    pub fn logo(&mut self, logo: impl Into<LogoSource>) -> &mut Self {
        self.style.logo = Some(logo.into());
        self
    }

    pub fn unset_logo(&mut self) -> &mut Self {
        self.style.logo = None;
        self
    }

    pub fn label(&mut self, label: impl Into<String>) -> &mut Self {
        self.style.label = Some(label.into());
        self
    }

    pub fn label_font(&mut self, font: LabelFont) -> &mut Self {
        self.style.label_font = Some(font);
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.style.ec_level = ec_level;
        self
    }

    pub fn get_style(&self) -> &Style {
        &self.style
    }

    pub fn metadata(&self) -> String {
        format!(
            "{{ Shape: {:?}, Eye: {:?}, Ec level: {:?}, Logo: {}, Label: {} }}",
            self.style.module_shape,
            self.style.eye_shape,
            self.style.effective_ec_level(),
            self.style.has_logo(),
            self.style.label_text().is_some()
        )
    }
}

#[cfg(test)]
mod qrstyler_util_tests {
    use super::QRStyler;
    use crate::common::{ECLevel, EyeShape, ModuleShape};

    #[test]
    fn test_metadata() {
        let mut styler = QRStyler::new("Hello, world!");
        styler.module_shape(ModuleShape::Liquid).eye_shape(EyeShape::Leaf).ec_level(ECLevel::L);
        assert_eq!(
            styler.metadata(),
            "{ Shape: Liquid, Eye: Leaf, Ec level: L, Logo: false, Label: false }"
        );
        styler.logo(vec![0u8]).label("SCAN ME");
        assert_eq!(
            styler.metadata(),
            "{ Shape: Liquid, Eye: Leaf, Ec level: H, Logo: true, Label: true }"
        );
        styler.unset_logo();
        assert_eq!(styler.get_style().effective_ec_level(), ECLevel::L);
    }
}

impl<E: Encode> QRStyler<'_, E> {
    /// Encodes the data at the effective level, which is always `H` when a logo is set.
    pub fn matrix(&self) -> RenderResult<ModuleMatrix> {
        self.encoder.encode(self.data, self.style.effective_ec_level())
    }

    pub fn to_svg(&self, size: u32) -> RenderResult<String> {
        svg::render(&self.matrix()?, &self.style, size)
    }

    pub async fn to_raster(&self, size: u32) -> RenderResult<RasterOutput> {
        let m = self.matrix()?;
        raster::render(&m, &self.style, size).await
    }
}

#[cfg(test)]
mod qrstyler_tests {
    use std::cell::Cell;

    use super::QRStyler;
    use crate::common::{Background, ECLevel, RenderError, RenderResult};
    use crate::encoder::{Encode, ModuleMatrix, QrcodeEncoder};
    use crate::render::LogoStatus;

    #[derive(Default)]
    struct RecordingEncoder {
        level: Cell<Option<ECLevel>>,
    }

    impl Encode for RecordingEncoder {
        fn encode(&self, text: &str, ecl: ECLevel) -> RenderResult<ModuleMatrix> {
            self.level.set(Some(ecl));
            QrcodeEncoder.encode(text, ecl)
        }
    }

    #[test]
    fn test_logo_forces_h() {
        let mut styler = QRStyler::new("https://example.com").encoder(RecordingEncoder::default());
        styler.ec_level(ECLevel::L).logo("data:image/png;base64,AAAA");
        let svg = styler.to_svg(300).unwrap();
        assert!(svg.contains("<image"));
        assert_eq!(styler.encoder.level.get(), Some(ECLevel::H));
    }

    #[test]
    fn test_requested_level_without_logo() {
        let mut styler = QRStyler::new("https://example.com").encoder(RecordingEncoder::default());
        styler.ec_level(ECLevel::Q);
        styler.matrix().unwrap();
        assert_eq!(styler.encoder.level.get(), Some(ECLevel::Q));
    }

    #[test]
    fn test_empty_data_rejected() {
        assert_eq!(QRStyler::new("").to_svg(300), Err(RenderError::EmptyData));
    }

    #[tokio::test]
    async fn test_empty_data_rejected_raster() {
        let res = QRStyler::new("").to_raster(300).await;
        assert_eq!(res.unwrap_err(), RenderError::EmptyData);
    }

    #[tokio::test]
    async fn test_raster_with_failed_logo() {
        let mut styler = QRStyler::new("https://example.com");
        styler.logo(vec![0u8, 1, 2]).background(Background::Transparent);
        let out = styler.to_raster(200).await.unwrap();
        assert!(matches!(out.logo, LogoStatus::Failed(_)));
        assert_eq!(out.image.dimensions(), (200, 200));
    }

    #[tokio::test]
    async fn test_raster_and_svg_share_geometry() {
        let mut styler = QRStyler::new("https://example.com");
        styler.ec_level(ECLevel::M);
        let m = styler.matrix().unwrap();
        assert_eq!(m.width(), 25);
        let out = styler.to_raster(250).await.unwrap();
        let svg = styler.to_svg(250).unwrap();
        // Every dark data module is a 10 px square in both outputs
        for r in 0..25 {
            for c in 0..25 {
                let finder = (r < 7 && c < 7) || (r < 7 && c >= 18) || (r >= 18 && c < 7);
                if finder || !m.get(r, c) {
                    continue;
                }
                let (x, y) = (c * 10, r * 10);
                assert_eq!(out.image.get_pixel(x as u32 + 5, y as u32 + 5).0, [0, 0, 0, 255]);
                let el = format!(r##"<rect x="{x}" y="{y}" width="10" height="10" fill="#000000" />"##);
                assert!(svg.contains(&el), "missing {el}");
            }
        }
    }
}
