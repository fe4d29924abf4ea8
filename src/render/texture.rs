use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::RgbaImage;

use super::device::{Device, ObjectId};
use crate::utils::error::{RenderError, Result};

/// Decodes an image file into RGBA8 rows, bottom row first.
pub fn load_rgba<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| RenderError::ResourceNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let img = image::load_from_memory(&bytes).map_err(|source| RenderError::TextureDecode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.flipv().to_rgba8())
}

pub struct Texture {
    device: Rc<dyn Device>,
    id: ObjectId,
    path: PathBuf,
    width: u32,
    height: u32,
}

impl Texture {
    pub fn new<P: AsRef<Path>>(device: Rc<dyn Device>, path: P) -> Result<Self> {
        let path = path.as_ref();
        let img = load_rgba(path)?;
        let texture = Self::upload(device, &img, path.to_path_buf());
        log::info!("Loaded texture {:?} ({}x{})", path, texture.width, texture.height);
        Ok(texture)
    }

    pub fn from_rgba(device: Rc<dyn Device>, img: &RgbaImage) -> Self {
        Self::upload(device, img, PathBuf::new())
    }

    fn upload(device: Rc<dyn Device>, img: &RgbaImage, path: PathBuf) -> Self {
        let (width, height) = img.dimensions();
        let id = device.create_texture();
        device.bind_texture(Some(id));
        device.texture_parameters();
        device.texture_image_rgba8(width, height, img.as_raw());
        device.bind_texture(None);

        Self {
            device,
            id,
            path,
            width,
            height,
        }
    }

    pub fn bind(&self, slot: u32) {
        self.device.active_texture(slot);
        self.device.bind_texture(Some(self.id));
    }

    pub fn unbind(&self) {
        self.device.bind_texture(None);
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bytes_per_pixel(&self) -> u32 {
        4
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        self.device.delete_texture(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::device::fake::{Call, FakeDevice};
    use image::Rgba;

    fn write_png(dir: &Path) -> PathBuf {
        let mut img = RgbaImage::new(2, 3);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 2, Rgba([0, 0, 255, 128]));
        let path = dir.join("logo.png");
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_rows_flipped() {
        let dir = tempfile::tempdir().unwrap();
        let img = load_rgba(write_png(dir.path())).unwrap();
        assert_eq!(img.dimensions(), (2, 3));
        assert_eq!(*img.get_pixel(0, 2), Rgba([255, 0, 0, 255]));
        assert_eq!(*img.get_pixel(1, 0), Rgba([0, 0, 255, 128]));
    }

    #[test]
    fn test_texture_upload() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path());
        let fake = Rc::new(FakeDevice::new());

        let texture = Texture::new(fake.clone(), &path).unwrap();
        assert_eq!((texture.width(), texture.height()), (2, 3));
        assert_eq!(texture.bytes_per_pixel(), 4);
        assert_eq!(texture.path(), path.as_path());
        assert_eq!(
            fake.calls(),
            vec![
                Call::CreateTexture(1),
                Call::BindTexture(Some(1)),
                Call::TextureParameters,
                Call::TextureImage(2, 3, 24),
                Call::BindTexture(None),
            ]
        );

        texture.bind(1);
        let calls = fake.calls();
        assert_eq!(&calls[calls.len() - 2..], &[Call::ActiveTexture(1), Call::BindTexture(Some(1))]);

        drop(texture);
        assert!(fake.live_objects().is_empty());
    }

    #[test]
    fn test_missing_texture() {
        let fake = Rc::new(FakeDevice::new());
        let result = Texture::new(fake.clone(), "missing/texture.png");
        assert!(matches!(result, Err(RenderError::ResourceNotFound { .. })));
        assert!(fake.calls().is_empty());
    }

    #[test]
    fn test_undecodable_texture() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        fs::write(&path, b"not an image").unwrap();
        assert!(matches!(load_rgba(&path), Err(RenderError::TextureDecode { .. })));
    }
}
