use std::fmt;

use image::{GenericImageView, ImageBuffer, Pixel};

use super::SkyboxError;

/// Columns in the composite sky grid.
pub const GRID_COLUMNS: u32 = 4;
/// Rows in the composite sky grid.
pub const GRID_ROWS: u32 = 3;

/// One slot of a cube map, in upload order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];

    /// Layer index of this face inside a cube texture.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// `(column, row)` of the tile holding this face in the composite image.
    pub const fn grid_cell(self) -> (u32, u32) {
        match self {
            CubeFace::PositiveX => (2, 1),
            CubeFace::NegativeX => (0, 1),
            CubeFace::PositiveY => (1, 0),
            CubeFace::NegativeY => (1, 2),
            CubeFace::PositiveZ => (1, 1),
            CubeFace::NegativeZ => (3, 1),
        }
    }
}

/// Square raster holding one face, same pixel type as its source.
pub type FaceBuffer<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;

/// Exactly six square faces of equal edge, in [`CubeFace::ALL`] order.
#[derive(Clone, PartialEq)]
pub struct FaceSet<P: Pixel> {
    edge: u32,
    faces: [FaceBuffer<P>; 6],
}

impl<P: Pixel> FaceSet<P> {
    /// Builds a set from faces already in [`CubeFace::ALL`] order.
    pub fn new(faces: [FaceBuffer<P>; 6]) -> Result<Self, SkyboxError> {
        let edge = faces[0].width();
        if edge == 0 {
            return Err(SkyboxError::ZeroTileSize);
        }
        for (face, buffer) in CubeFace::ALL.into_iter().zip(faces.iter()) {
            if buffer.dimensions() != (edge, edge) {
                return Err(SkyboxError::FaceEdgeMismatch {
                    face,
                    edge,
                    width: buffer.width(),
                    height: buffer.height(),
                });
            }
        }
        Ok(Self { edge, faces })
    }

    pub fn edge(&self) -> u32 {
        self.edge
    }

    pub fn face(&self, face: CubeFace) -> &FaceBuffer<P> {
        &self.faces[face.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (CubeFace, &FaceBuffer<P>)> {
        CubeFace::ALL.into_iter().zip(self.faces.iter())
    }

    pub fn into_faces(self) -> [FaceBuffer<P>; 6] {
        self.faces
    }
}

impl<P: Pixel> fmt::Debug for FaceSet<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaceSet").field("edge", &self.edge).finish()
    }
}

/// Crops the six cube faces out of a 4x3 composite sky image.
///
/// Each face is the `tile_size` square at `(column * tile_size, row * tile_size)`
/// for its [`CubeFace::grid_cell`]. Pixels are copied verbatim, so the output
/// keeps the source pixel type and bit depth.
pub fn extract_faces<I>(image: &I, tile_size: u32) -> Result<FaceSet<I::Pixel>, SkyboxError>
where
    I: GenericImageView,
{
    if tile_size == 0 {
        return Err(SkyboxError::ZeroTileSize);
    }

    let (width, height) = image.dimensions();
    let required_width = u64::from(tile_size) * u64::from(GRID_COLUMNS);
    let required_height = u64::from(tile_size) * u64::from(GRID_ROWS);
    if u64::from(width) < required_width || u64::from(height) < required_height {
        return Err(SkyboxError::SourceTooSmall {
            width,
            height,
            tile_size,
            required_width,
            required_height,
        });
    }

    let faces = CubeFace::ALL.map(|face| {
        let (column, row) = face.grid_cell();
        let (left, top) = (column * tile_size, row * tile_size);
        ImageBuffer::from_fn(tile_size, tile_size, |x, y| {
            image.get_pixel(left + x, top + y)
        })
    });

    log::debug!("Extracted 6 sky faces of {tile_size}px from a {width}x{height} composite");

    Ok(FaceSet {
        edge: tile_size,
        faces,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb, RgbImage, Rgba, RgbaImage};

    /// Distinct color per grid cell.
    fn cell_color(column: u32, row: u32) -> Rgb<u8> {
        Rgb([(column * 60) as u8, (row * 90) as u8, 200 - (column + row * 4) as u8])
    }

    fn grid_image(tile: u32) -> RgbImage {
        RgbImage::from_fn(tile * GRID_COLUMNS, tile * GRID_ROWS, |x, y| {
            cell_color(x / tile, y / tile)
        })
    }

    fn is_solid<P: Pixel + PartialEq>(buffer: &FaceBuffer<P>, color: P) -> bool {
        buffer.pixels().all(|p| *p == color)
    }

    #[test]
    fn test_extract_faces_count_and_edge() {
        let faces = extract_faces(&grid_image(8), 8).unwrap();
        assert_eq!(faces.edge(), 8);
        assert_eq!(faces.iter().count(), 6);
        for (_, buffer) in faces.iter() {
            assert_eq!(buffer.dimensions(), (8, 8));
        }
    }

    #[test]
    fn test_extract_faces_order_matches_grid_table() {
        let faces = extract_faces(&grid_image(4), 4).unwrap();
        let order: Vec<CubeFace> = faces.iter().map(|(face, _)| face).collect();
        assert_eq!(order, CubeFace::ALL.to_vec());

        for (face, buffer) in faces.iter() {
            let (column, row) = face.grid_cell();
            assert!(
                is_solid(buffer, cell_color(column, row)),
                "{face:?} should come from cell ({column}, {row})"
            );
        }
    }

    #[test]
    fn test_extract_faces_keeps_pixel_layout_inside_tile() {
        let tile = 4;
        let image = RgbaImage::from_fn(tile * 4, tile * 3, |x, y| Rgba([x as u8, y as u8, 7, 255]));
        let faces = extract_faces(&image, tile).unwrap();

        let ny = faces.face(CubeFace::NegativeY);
        // -Y lives at (1, 2): its top-left pixel is (4, 8) in the composite
        assert_eq!(*ny.get_pixel(0, 0), Rgba([4, 8, 7, 255]));
        assert_eq!(*ny.get_pixel(3, 2), Rgba([7, 10, 7, 255]));
    }

    #[test]
    fn test_extract_faces_preserves_bit_depth() {
        let image: ImageBuffer<Luma<u16>, Vec<u16>> =
            ImageBuffer::from_fn(8, 6, |x, _| Luma([x as u16 * 1000]));
        let faces = extract_faces(&image, 2).unwrap();
        assert_eq!(*faces.face(CubeFace::NegativeZ).get_pixel(1, 0), Luma([7000u16]));
    }

    #[test]
    fn test_extract_faces_is_idempotent() {
        let image = RgbaImage::from_fn(16, 12, |x, y| Rgba([(x * 13) as u8, (y * 7) as u8, (x ^ y) as u8, 255]));
        let first = extract_faces(&image, 4).unwrap();
        let second = extract_faces(&image, 4).unwrap();
        assert!(first == second);
    }

    #[test]
    fn test_extract_faces_accepts_larger_source() {
        let image = RgbImage::from_pixel(20, 15, Rgb([1, 2, 3]));
        let faces = extract_faces(&image, 4).unwrap();
        assert!(is_solid(faces.face(CubeFace::PositiveY), Rgb([1, 2, 3])));
    }

    #[test]
    fn test_extract_faces_rejects_small_source() {
        let image = RgbImage::new(15, 12);
        match extract_faces(&image, 4) {
            Err(SkyboxError::SourceTooSmall {
                required_width,
                required_height,
                ..
            }) => {
                assert_eq!(required_width, 16);
                assert_eq!(required_height, 12);
            }
            other => panic!("expected SourceTooSmall, got {other:?}"),
        }
    }

    #[test]
    fn test_extract_faces_rejects_zero_tile() {
        let image = RgbImage::new(4, 3);
        assert!(matches!(extract_faces(&image, 0), Err(SkyboxError::ZeroTileSize)));
    }

    #[test]
    fn test_extract_faces_full_size_composite() {
        let tile = crate::SKY_TILE_SIZE;
        let image = grid_image(tile);
        assert_eq!(image.dimensions(), (4096, 3072));

        let faces = extract_faces(&image, tile).unwrap();
        assert!(is_solid(faces.face(CubeFace::PositiveZ), cell_color(1, 1)));
        assert!(is_solid(faces.face(CubeFace::NegativeZ), cell_color(3, 1)));
    }

    #[test]
    fn test_face_set_rejects_uneven_faces() {
        let mut faces: [FaceBuffer<Rgb<u8>>; 6] = std::array::from_fn(|_| RgbImage::new(2, 2));
        faces[4] = RgbImage::new(2, 3);
        assert!(matches!(
            FaceSet::new(faces),
            Err(SkyboxError::FaceEdgeMismatch {
                face: CubeFace::PositiveZ,
                ..
            })
        ));
    }
}
