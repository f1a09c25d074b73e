//! Game-over screenshots.
//!
//! The framebuffer is written as an uncompressed 24-bit BMP; no image crate
//! is needed, the bytes are laid out directly.  Saving is best effort: the
//! caller logs a failure and moves on.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use crate::error::{AppError, AppResult};

/// A copy of the framebuffer, row-major ARGB.
#[derive(Clone, Debug, PartialEq)]
pub struct Screenshot {
    pub width:  usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl Screenshot {
    /// BMP bytes: 14-byte file header, 40-byte BITMAPINFOHEADER, then
    /// bottom-up BGR rows padded to 4 bytes.
    pub fn to_bmp(&self) -> AppResult<Vec<u8>> {
        if self.width == 0 || self.height == 0 || self.pixels.len() != self.width * self.height {
            return Err(AppError::Snapshot(format!(
                "framebuffer {}x{} holds {} pixels",
                self.width, self.height, self.pixels.len()
            )));
        }

        let row_len = (self.width * 3 + 3) & !3;
        let image_len = row_len * self.height;
        let file_len = 14 + 40 + image_len;

        let mut out = Vec::with_capacity(file_len);
        // ── File header ───────────────────────────────────────────────────
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&(file_len as u32).to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());   // reserved
        out.extend_from_slice(&54u32.to_le_bytes());  // pixel data offset

        // ── Info header ───────────────────────────────────────────────────
        out.extend_from_slice(&40u32.to_le_bytes());
        out.extend_from_slice(&(self.width as i32).to_le_bytes());
        out.extend_from_slice(&(self.height as i32).to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());   // planes
        out.extend_from_slice(&24u16.to_le_bytes());  // bits per pixel
        out.extend_from_slice(&0u32.to_le_bytes());   // BI_RGB
        out.extend_from_slice(&(image_len as u32).to_le_bytes());
        out.extend_from_slice(&2835i32.to_le_bytes()); // 72 dpi
        out.extend_from_slice(&2835i32.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());   // palette colours
        out.extend_from_slice(&0u32.to_le_bytes());   // important colours

        // ── Pixels ────────────────────────────────────────────────────────
        let pad = row_len - self.width * 3;
        for row in self.pixels.chunks_exact(self.width).rev() {
            for &px in row {
                out.push(px as u8);
                out.push((px >> 8) as u8);
                out.push((px >> 16) as u8);
            }
            out.extend(std::iter::repeat(0u8).take(pad));
        }

        Ok(out)
    }
}

/// Writes screenshots as `<dir>/<YYYYmmdd_HHMMSS>.bmp`.
#[derive(Clone, Debug)]
pub struct SnapshotWriter {
    dir: PathBuf,
}

impl SnapshotWriter {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        SnapshotWriter { dir: dir.as_ref().to_path_buf() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save(&self, shot: &Screenshot) -> AppResult<PathBuf> {
        let bytes = shot.to_bmp()?;
        std::fs::create_dir_all(&self.dir)?;
        let name = format!("{}.bmp", Local::now().format("%Y%m%d_%H%M%S"));
        let path = self.dir.join(name);
        let mut f = std::fs::File::create(&path)?;
        f.write_all(&bytes)?;
        info!(path = %path.display(), "screenshot saved");
        Ok(path)
    }
}
