use image::Pixel;

use super::{CubeFace, FaceBuffer, FaceSet, SkyboxError};

/// Six-slot cube map that becomes ready exactly once.
///
/// Slots start empty. A face can be written once; when the sixth slot is
/// filled the texture flips to ready and raises its upload flag. Pixel data is
/// only handed out through [`CubeMapTexture::take_upload`], which returns the
/// six faces back to back in [`CubeFace::ALL`] order and clears the flag, so a
/// consumer never observes a partially populated cube.
pub struct CubeMapTexture<P: Pixel> {
    edge: u32,
    faces: [Option<FaceBuffer<P>>; 6],
    ready: bool,
    needs_upload: bool,
}

impl<P: Pixel> CubeMapTexture<P> {
    /// Empty placeholder cube map with faces of `edge` pixels.
    pub fn new(edge: u32) -> Self {
        Self {
            edge,
            faces: Default::default(),
            ready: false,
            needs_upload: false,
        }
    }

    pub fn edge(&self) -> u32 {
        self.edge
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn needs_upload(&self) -> bool {
        self.needs_upload
    }

    pub fn assigned_faces(&self) -> usize {
        self.faces.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn face(&self, face: CubeFace) -> Option<&FaceBuffer<P>> {
        self.faces[face.index()].as_ref()
    }

    /// Stores one face. Returns `true` when this call completed the cube.
    pub fn assign(&mut self, face: CubeFace, buffer: FaceBuffer<P>) -> Result<bool, SkyboxError> {
        if buffer.dimensions() != (self.edge, self.edge) {
            return Err(SkyboxError::FaceEdgeMismatch {
                face,
                edge: self.edge,
                width: buffer.width(),
                height: buffer.height(),
            });
        }

        let slot = &mut self.faces[face.index()];
        if slot.is_some() {
            return Err(SkyboxError::FaceAlreadyAssigned(face));
        }
        *slot = Some(buffer);

        if self.faces.iter().all(Option::is_some) {
            self.ready = true;
            self.needs_upload = true;
            log::debug!("Cube map complete ({}px faces)", self.edge);
            return Ok(true);
        }
        Ok(false)
    }

    /// Installs a whole face set in one step.
    ///
    /// Everything is validated up front, so on error no slot has changed.
    pub fn fill(&mut self, set: FaceSet<P>) -> Result<(), SkyboxError> {
        for face in CubeFace::ALL {
            if self.faces[face.index()].is_some() {
                return Err(SkyboxError::FaceAlreadyAssigned(face));
            }
        }
        if set.edge() != self.edge {
            let buffer = set.face(CubeFace::PositiveX);
            return Err(SkyboxError::FaceEdgeMismatch {
                face: CubeFace::PositiveX,
                edge: self.edge,
                width: buffer.width(),
                height: buffer.height(),
            });
        }

        for (face, buffer) in CubeFace::ALL.into_iter().zip(set.into_faces()) {
            self.assign(face, buffer)?;
        }
        Ok(())
    }

    /// Layered pixel data for the GPU, once, right after the cube completes.
    pub fn take_upload(&mut self) -> Option<Vec<P::Subpixel>> {
        if !self.needs_upload {
            return None;
        }
        self.needs_upload = false;

        Some(
            self.faces
                .iter()
                .flatten()
                .flat_map(|buffer| buffer.as_raw().iter().copied())
                .collect(),
        )
    }
}
