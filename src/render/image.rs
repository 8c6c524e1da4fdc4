//! Custom crosshair images.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Decoded image as premultiplied BGRA rows, the layout Direct2D bitmaps expect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Bytes per row.
    pub fn stride(&self) -> u32 {
        self.width * 4
    }
}

/// Decode any supported image file into premultiplied BGRA.
pub fn load_image(path: &Path) -> Result<DecodedImage> {
    let rgba = image::open(path)
        .with_context(|| format!("Failed to decode image {:?}", path))?
        .to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut pixels = rgba.into_raw();
    for px in pixels.chunks_exact_mut(4) {
        let a = px[3] as u16;
        let premul = |c: u8| ((c as u16 * a + 127) / 255) as u8;
        let (r, g, b) = (premul(px[0]), premul(px[1]), premul(px[2]));
        px[0] = b;
        px[1] = g;
        px[2] = r;
    }

    Ok(DecodedImage {
        width,
        height,
        pixels,
    })
}

/// Keeps the last decoded image so slider drags do not re-read the file.
///
/// A failed load is remembered too, so a broken path is logged once.
#[derive(Debug, Default)]
pub struct ImageCache {
    entry: Option<(PathBuf, Option<DecodedImage>)>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Image for `path`, decoding it if it is not the cached one.
    pub fn get(&mut self, path: &Path) -> Option<&DecodedImage> {
        let stale = !matches!(&self.entry, Some((cached, _)) if cached == path);
        if stale {
            let decoded = match load_image(path) {
                Ok(img) => {
                    debug!(path = %path.display(), width = img.width, height = img.height, "Loaded custom image");
                    Some(img)
                }
                Err(e) => {
                    warn!(error = %format!("{e:#}"), "Custom image unavailable, drawing nothing");
                    None
                }
            };
            self.entry = Some((path.to_path_buf(), decoded));
        }
        self.entry.as_ref().and_then(|(_, img)| img.as_ref())
    }

    /// Forget the cached image (the file may have changed on disk).
    pub fn clear(&mut self) {
        self.entry = None;
    }
}
