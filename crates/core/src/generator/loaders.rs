use std::fs;
use std::path::PathBuf;

use thiserror::Error;

/// Number of lookup tables the texture deformation generator knows about
pub const TEXTURE_DEFORMATION_LUTS: i32 = 9;

/// Glyph width used to size the text writer's scroll buffer
const GLYPH_WIDTH_PX: usize = 8;

/// Errors raised while loading generator assets
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} is empty")]
    EmptyFile(PathBuf),

    #[error("{0} contains no blinkenlights frames")]
    NoFrames(PathBuf),

    #[error("{0} is not a PNG, JPEG or GIF image")]
    UnsupportedImage(PathBuf),

    #[error("texture deformation LUT {0} is out of range")]
    InvalidLut(i32),
}

/// Resolves asset file names against the data directory
#[derive(Clone, Debug)]
pub struct Resources {
    root: PathBuf,
}

impl Resources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn resolve(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    /// Read a whole asset, rejecting empty files
    pub fn read(&self, file: &str) -> Result<(PathBuf, Vec<u8>), GeneratorError> {
        let path = self.resolve(file);
        let bytes = fs::read(&path).map_err(|source| GeneratorError::Io {
            path: path.clone(),
            source,
        })?;

        if bytes.is_empty() {
            return Err(GeneratorError::EmptyFile(path));
        }

        Ok((path, bytes))
    }
}

/// Plays back `.bml` blinkenlights movies
#[derive(Clone, Debug)]
pub struct Blinkenlights {
    resources: Resources,
    file: Option<String>,
    frame_count: usize,
}

impl Blinkenlights {
    pub fn new(resources: Resources) -> Self {
        Self {
            resources,
            file: None,
            frame_count: 0,
        }
    }

    pub fn load_file(&mut self, file: &str) -> Result<(), GeneratorError> {
        let (path, bytes) = self.resources.read(file)?;
        let movie = String::from_utf8_lossy(&bytes);
        let frame_count = movie.matches("<frame").count();
        if frame_count == 0 {
            return Err(GeneratorError::NoFrames(path));
        }

        log::debug!("Loaded {} blinkenlights frames from {:?}", frame_count, path);
        self.file = Some(file.to_string());
        self.frame_count = frame_count;
        Ok(())
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }
}

/// Image formats the image generators accept, sniffed from magic bytes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
}

impl ImageFormat {
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
            Some(ImageFormat::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageFormat::Jpeg)
        } else if bytes.starts_with(b"GIF8") {
            Some(ImageFormat::Gif)
        } else {
            None
        }
    }
}

fn load_image(resources: &Resources, file: &str) -> Result<ImageFormat, GeneratorError> {
    let (path, bytes) = resources.read(file)?;
    ImageFormat::sniff(&bytes).ok_or(GeneratorError::UnsupportedImage(path))
}

/// Static image source
#[derive(Clone, Debug)]
pub struct ImageGenerator {
    resources: Resources,
    file: Option<String>,
    format: Option<ImageFormat>,
}

impl ImageGenerator {
    pub fn new(resources: Resources) -> Self {
        Self {
            resources,
            file: None,
            format: None,
        }
    }

    pub fn load_file(&mut self, file: &str) -> Result<(), GeneratorError> {
        let format = load_image(&self.resources, file)?;
        self.file = Some(file.to_string());
        self.format = Some(format);
        Ok(())
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn format(&self) -> Option<ImageFormat> {
        self.format
    }
}

/// Image source that zooms in and out of its picture
#[derive(Clone, Debug)]
pub struct ImageZoomer {
    resources: Resources,
    file: Option<String>,
}

impl ImageZoomer {
    pub fn new(resources: Resources) -> Self {
        Self {
            resources,
            file: None,
        }
    }

    pub fn load_image(&mut self, file: &str) -> Result<(), GeneratorError> {
        load_image(&self.resources, file)?;
        self.file = Some(file.to_string());
        Ok(())
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }
}

/// Warps a texture through one of a fixed set of lookup tables
#[derive(Clone, Debug)]
pub struct TextureDeformation {
    resources: Resources,
    lut: i32,
    file: Option<String>,
}

impl TextureDeformation {
    pub fn new(resources: Resources) -> Self {
        Self {
            resources,
            lut: 0,
            file: None,
        }
    }

    pub fn change_lut(&mut self, lut: i32) -> Result<(), GeneratorError> {
        if !(0..TEXTURE_DEFORMATION_LUTS).contains(&lut) {
            return Err(GeneratorError::InvalidLut(lut));
        }
        self.lut = lut;
        Ok(())
    }

    pub fn load_file(&mut self, file: &str) -> Result<(), GeneratorError> {
        load_image(&self.resources, file)?;
        self.file = Some(file.to_string());
        Ok(())
    }

    pub fn lut(&self) -> i32 {
        self.lut
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }
}

/// Scrolling text
#[derive(Clone, Debug, Default)]
pub struct Textwriter {
    text: String,
    width_px: usize,
}

impl Textwriter {
    pub fn create_text_image(&mut self, text: &str) {
        self.text = text.to_string();
        self.width_px = text.chars().count() * GLYPH_WIDTH_PX;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn width_px(&self) -> usize {
        self.width_px
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_blinkenlights_counts_frames() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("movie.bml"),
            "<blm><frame duration=\"100\"></frame><frame duration=\"100\"></frame></blm>",
        )
        .unwrap();

        let mut blink = Blinkenlights::new(Resources::new(dir.path()));
        blink.load_file("movie.bml").unwrap();

        assert_eq!(blink.frame_count(), 2);
        assert_eq!(blink.file(), Some("movie.bml"));
    }

    #[test]
    fn test_blinkenlights_rejects_missing_and_frameless_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("empty.bml"), "<blm></blm>").unwrap();

        let mut blink = Blinkenlights::new(Resources::new(dir.path()));
        assert!(matches!(
            blink.load_file("nope.bml"),
            Err(GeneratorError::Io { .. })
        ));
        assert!(matches!(
            blink.load_file("empty.bml"),
            Err(GeneratorError::NoFrames(_))
        ));
        assert_eq!(blink.file(), None);
    }

    #[test]
    fn test_image_sniffs_format() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.gif"), b"GIF89a....").unwrap();
        fs::write(dir.path().join("b.txt"), b"hello").unwrap();

        let mut image = ImageGenerator::new(Resources::new(dir.path()));
        image.load_file("a.gif").unwrap();
        assert_eq!(image.format(), Some(ImageFormat::Gif));

        assert!(matches!(
            image.load_file("b.txt"),
            Err(GeneratorError::UnsupportedImage(_))
        ));
        assert_eq!(image.file(), Some("a.gif"));
    }

    #[test]
    fn test_texture_deformation_lut_range() {
        let mut texture = TextureDeformation::new(Resources::new("."));
        texture.change_lut(TEXTURE_DEFORMATION_LUTS - 1).unwrap();
        assert!(matches!(
            texture.change_lut(TEXTURE_DEFORMATION_LUTS),
            Err(GeneratorError::InvalidLut(_))
        ));
        assert!(texture.change_lut(-1).is_err());
        assert_eq!(texture.lut(), TEXTURE_DEFORMATION_LUTS - 1);
    }

    #[test]
    fn test_textwriter_sizes_buffer() {
        let mut writer = Textwriter::default();
        writer.create_text_image("hello");
        assert_eq!(writer.text(), "hello");
        assert_eq!(writer.width_px(), 40);
    }
}
