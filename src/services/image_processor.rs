//! Procesador de imágenes de vehículos
//!
//! Función pura: recibe los bytes subidos y devuelve dos JPEG, la imagen
//! principal y su miniatura. No toca el disco; de eso se encarga
//! `AssetStore`.
//!
//! | Paso | Regla |
//! |---|---|
//! | Decodificar | JPEG, PNG, GIF, WebP, BMP, TIFF (crate `image`) |
//! | Color | alfa o paleta → RGB de 3 canales (el alfa se descarta, no se compone) |
//! | Principal | ancho > 1200 → ancho 1200 con la misma proporción (Lanczos3), calidad 85 |
//! | Miniatura | encajada en 300×200 sin ampliar nunca, calidad 80 |
//!
//! Cualquier fallo devuelve un único error y ninguna salida parcial.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader};
use std::io::Cursor;
use thiserror::Error;

use crate::utils::errors::AppError;

#[derive(Error, Debug)]
pub enum ImageProcessingError {
    #[error("imagen vacía")]
    Empty,
    #[error("formato de imagen no reconocido: {0}")]
    UnknownFormat(#[from] std::io::Error),
    #[error("{0}")]
    Image(#[from] image::ImageError),
}

impl From<ImageProcessingError> for AppError {
    fn from(error: ImageProcessingError) -> Self {
        AppError::ImageProcessing(error.to_string())
    }
}

/// Calidad de codificación JPEG (1-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// Límites del procesado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSettings {
    pub max_width: u32,
    pub main_quality: Quality,
    pub thumbnail_width: u32,
    pub thumbnail_height: u32,
    pub thumbnail_quality: Quality,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            max_width: 1200,
            main_quality: Quality::new(85),
            thumbnail_width: 300,
            thumbnail_height: 200,
            thumbnail_quality: Quality::new(80),
        }
    }
}

/// Resultado del procesado: dos JPEG listos para guardar
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub main: Vec<u8>,
    pub main_dimensions: (u32, u32),
    pub thumbnail: Vec<u8>,
    pub thumbnail_dimensions: (u32, u32),
}

/// Dimensiones de la imagen principal.
///
/// Solo se reduce si el ancho supera `max_width`; la altura se recalcula con
/// la misma proporción y se trunca (mínimo 1).
pub fn main_dimensions(source: (u32, u32), max_width: u32) -> (u32, u32) {
    let (width, height) = source;
    if width <= max_width {
        return source;
    }
    let ratio = max_width as f64 / width as f64;
    let new_height = ((height as f64 * ratio) as u32).max(1);
    (max_width, new_height)
}

/// Dimensiones de la miniatura encajada en `bounds` sin ampliar.
///
/// El eje que limita toca el borde de la caja; el otro toma el redondeo
/// (suelo o techo) cuya proporción se acerca más a la original.
pub fn thumbnail_dimensions(source: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (width, height) = source;
    let (box_w, box_h) = bounds;

    if box_w >= width && box_h >= height {
        return source;
    }

    let aspect = width as f64 / height as f64;
    if box_w as f64 / box_h as f64 >= aspect {
        let new_width = nearest_by(box_h as f64 * aspect, |n| {
            (aspect - n / box_h as f64).abs()
        });
        (new_width, box_h)
    } else {
        let new_height = nearest_by(box_w as f64 / aspect, |n| {
            if n == 0.0 {
                0.0
            } else {
                (aspect - box_w as f64 / n).abs()
            }
        });
        (box_w, new_height)
    }
}

fn nearest_by(value: f64, distance: impl Fn(f64) -> f64) -> u32 {
    let (floor, ceil) = (value.floor(), value.ceil());
    let best = if distance(ceil) < distance(floor) { ceil } else { floor };
    (best as u32).max(1)
}

/// Aplanar modelos con alfa, paleta o más de 8 bits a RGB8.
/// RGB8 y escala de grises de 8 bits pasan tal cual.
fn normalize_color(image: DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageLuma8(_) => image,
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}

fn decode(bytes: &[u8]) -> Result<DynamicImage, ImageProcessingError> {
    if bytes.is_empty() {
        return Err(ImageProcessingError::Empty);
    }
    let image = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .decode()?;
    Ok(image)
}

fn encode_jpeg(image: &DynamicImage, quality: Quality) -> Result<Vec<u8>, ImageProcessingError> {
    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.value());
    image.write_with_encoder(encoder)?;
    Ok(buffer)
}

/// Procesador sin estado; se ejecuta dentro de `spawn_blocking`
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageProcessor {
    settings: ImageSettings,
}

impl ImageProcessor {
    pub fn new(settings: ImageSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ImageSettings {
        &self.settings
    }

    pub fn process(&self, bytes: &[u8]) -> Result<ProcessedImage, ImageProcessingError> {
        let image = normalize_color(decode(bytes)?);

        let (width, height) = main_dimensions(image.dimensions(), self.settings.max_width);
        let main = if (width, height) == image.dimensions() {
            image
        } else {
            image.resize_exact(width, height, FilterType::Lanczos3)
        };

        // La miniatura sale de la principal ya reducida
        let (thumb_w, thumb_h) = thumbnail_dimensions(
            main.dimensions(),
            (self.settings.thumbnail_width, self.settings.thumbnail_height),
        );
        let thumbnail = if (thumb_w, thumb_h) == main.dimensions() {
            main.clone()
        } else {
            main.resize_exact(thumb_w, thumb_h, FilterType::Lanczos3)
        };

        Ok(ProcessedImage {
            main: encode_jpeg(&main, self.settings.main_quality)?,
            main_dimensions: main.dimensions(),
            thumbnail: encode_jpeg(&thumbnail, self.settings.thumbnail_quality)?,
            thumbnail_dimensions: thumbnail.dimensions(),
        })
    }
}
