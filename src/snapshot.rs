//! PNG snapshot export of the current lattice.

use std::path::{Path, PathBuf};

use crate::error::SnapshotError;
use crate::lattice::Lattice;
use crate::visuals::Palette;

/// Save the lattice as a PNG, one pixel per cell, colored by `palette`.
pub fn save_png(
    path: impl AsRef<Path>,
    lattice: &Lattice,
    palette: Palette,
    state_count: u8,
) -> Result<(), SnapshotError> {
    let (width, height) = (lattice.width() as u32, lattice.height() as u32);
    let pixels = palette.rasterize(lattice.cells(), state_count);

    let img = image::RgbaImage::from_raw(width, height, pixels)
        .ok_or(SnapshotError::SizeMismatch { width, height })?;
    img.save(path.as_ref())?;
    Ok(())
}

/// Default snapshot path in the working directory, named after the rule and
/// generation, e.g. `caex-life-gen001234.png`.
pub fn default_path(rule_id: &str, generation: u64) -> PathBuf {
    PathBuf::from(format!("caex-{}-gen{:06}.png", rule_id, generation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{Edge, Topology};

    #[test]
    fn test_default_path_names() {
        let path = default_path("life", 42);
        assert_eq!(path.to_str().unwrap(), "caex-life-gen000042.png");
    }

    #[test]
    fn test_save_png_roundtrip() {
        let mut lattice = Lattice::new(8, 8, Topology::SquareMoore, Edge::Wrap);
        lattice.set(3, 3, 1);

        let path = std::env::temp_dir().join("caex-snapshot-test.png");
        save_png(&path, &lattice, Palette::Viridis, 2).unwrap();

        let img = image::open(&path).unwrap().into_rgba8();
        assert_eq!(img.dimensions(), (8, 8));
        // The live cell is not background-colored.
        assert_ne!(img.get_pixel(3, 3).0, img.get_pixel(0, 0).0);

        let _ = std::fs::remove_file(&path);
    }
}
