use serde::{Deserialize, Serialize};

use super::loaders::{
    Blinkenlights, ImageGenerator, ImageZoomer, Resources, TextureDeformation, Textwriter,
};
use crate::selector::Selector;

/// Generator types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeneratorName {
    Passthru,
    Blinkenlights,
    Image,
    Plasma,
    ColorScroll,
    Fire,
    MetaBalls,
    PixelImage,
    TextureDeformation,
    ImageZoomer,
    Textwriter,
}

impl Selector for GeneratorName {
    const KIND: &'static str = "generator";

    fn all() -> &'static [Self] {
        &[
            GeneratorName::Passthru,
            GeneratorName::Blinkenlights,
            GeneratorName::Image,
            GeneratorName::Plasma,
            GeneratorName::ColorScroll,
            GeneratorName::Fire,
            GeneratorName::MetaBalls,
            GeneratorName::PixelImage,
            GeneratorName::TextureDeformation,
            GeneratorName::ImageZoomer,
            GeneratorName::Textwriter,
        ]
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// A registry entry. Procedural generators have nothing to load
#[derive(Clone, Debug)]
pub enum Generator {
    Procedural(GeneratorName),
    Blinkenlights(Blinkenlights),
    Image(ImageGenerator),
    TextureDeformation(TextureDeformation),
    ImageZoomer(ImageZoomer),
    Textwriter(Textwriter),
}

impl Generator {
    pub fn name(&self) -> GeneratorName {
        match self {
            Generator::Procedural(name) => *name,
            Generator::Blinkenlights(_) => GeneratorName::Blinkenlights,
            Generator::Image(_) => GeneratorName::Image,
            Generator::TextureDeformation(_) => GeneratorName::TextureDeformation,
            Generator::ImageZoomer(_) => GeneratorName::ImageZoomer,
            Generator::Textwriter(_) => GeneratorName::Textwriter,
        }
    }
}

/// All generators, one instance per `GeneratorName`, in index order
#[derive(Clone, Debug)]
pub struct GeneratorRegistry {
    generators: Vec<Generator>,
}

impl GeneratorRegistry {
    pub fn new(resources: Resources) -> Self {
        let generators = GeneratorName::all()
            .iter()
            .map(|name| match name {
                GeneratorName::Blinkenlights => {
                    Generator::Blinkenlights(Blinkenlights::new(resources.clone()))
                }
                GeneratorName::Image => Generator::Image(ImageGenerator::new(resources.clone())),
                GeneratorName::TextureDeformation => {
                    Generator::TextureDeformation(TextureDeformation::new(resources.clone()))
                }
                GeneratorName::ImageZoomer => {
                    Generator::ImageZoomer(ImageZoomer::new(resources.clone()))
                }
                GeneratorName::Textwriter => Generator::Textwriter(Textwriter::default()),
                other => Generator::Procedural(*other),
            })
            .collect();

        Self { generators }
    }

    pub fn get(&self, name: GeneratorName) -> Option<&Generator> {
        self.generators.get(name.index())
    }

    pub fn get_mut(&mut self, name: GeneratorName) -> Option<&mut Generator> {
        self.generators.get_mut(name.index())
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}
