//! cvqc-io - Image source and raster export
//!
//! Reads microscopy acquisitions (single or multipage TIFF, grayscale PNG)
//! into an [`ImageStack`], and writes rasters produced by the report
//! (annotated images, plots) as PNG or TIFF.
//!
//! # Examples
//!
//! ```no_run
//! let stack = cvqc_io::read_image_stack("acquisition.tif").unwrap();
//! println!("{} image(s) of {:?}", stack.len(), stack.dimensions());
//! ```

mod error;
pub mod png;
pub mod tiff;

pub use cvqc_core::ImageFormat;
pub use error::{IoError, IoResult};
pub use self::tiff::TiffCompression;

use cvqc_core::{ImageStack, Pix};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Detect the image format from the leading bytes of a file.
pub fn detect_format_from_bytes(data: &[u8]) -> ImageFormat {
    match data {
        [0x89, b'P', b'N', b'G', ..] => ImageFormat::Png,
        [b'I', b'I', 0x2a, 0x00, ..] | [b'M', b'M', 0x00, 0x2a, ..] => ImageFormat::Tiff,
        // BigTIFF
        [b'I', b'I', 0x2b, 0x00, ..] | [b'M', b'M', 0x00, 0x2b, ..] => ImageFormat::Tiff,
        _ => ImageFormat::Unknown,
    }
}

fn sniff_format<R: Read + Seek>(reader: &mut R) -> IoResult<ImageFormat> {
    let mut magic = [0u8; 8];
    let n = reader.read(&mut magic)?;
    reader.seek(SeekFrom::Start(0))?;
    Ok(detect_format_from_bytes(&magic[..n]))
}

/// Read every page of an image file.
///
/// TIFF files yield one image per page, PNG files a single image.
pub fn read_images<P: AsRef<Path>>(path: P) -> IoResult<Vec<Pix>> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);
    match sniff_format(&mut reader)? {
        ImageFormat::Tiff => tiff::read_tiff_multipage(reader),
        ImageFormat::Png => Ok(vec![png::read_png(reader)?]),
        ImageFormat::Unknown => Err(IoError::UnsupportedFormat(format!(
            "unrecognized image file: {}",
            path.display()
        ))),
    }
}

/// Read the first image of a file.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);
    match sniff_format(&mut reader)? {
        ImageFormat::Tiff => tiff::read_tiff(reader),
        ImageFormat::Png => png::read_png(reader),
        ImageFormat::Unknown => Err(IoError::UnsupportedFormat(format!(
            "unrecognized image file: {}",
            path.display()
        ))),
    }
}

/// Read an acquisition into an [`ImageStack`].
///
/// All pages must be 8 or 16 bit grayscale with identical dimensions.
///
/// # Errors
///
/// [`IoError::Io`] when the file cannot be read, a shape-class error
/// ([`IoError::is_shape_error`]) when the pages are not grayscale or not
/// uniform.
pub fn read_image_stack<P: AsRef<Path>>(path: P) -> IoResult<ImageStack> {
    let path = path.as_ref();
    let images = read_images(path)?;
    let stack = ImageStack::new(images)?;
    log::debug!(
        "read {} image(s) of {:?} at {} bpp from {}",
        stack.len(),
        stack.dimensions(),
        stack.depth().bits(),
        path.display()
    );
    Ok(stack)
}

/// Write an image to a file path.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    if format == ImageFormat::Unknown {
        return Err(IoError::UnsupportedFormat(
            "cannot write an image without a format".to_string(),
        ));
    }
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    match format {
        ImageFormat::Tiff => tiff::write_tiff(pix, &mut writer, TiffCompression::Lzw)?,
        _ => png::write_png(pix, &mut writer)?,
    }
    writer.flush()?;
    Ok(())
}

/// Write every image of a stack as one multipage TIFF.
pub fn write_image_stack<P: AsRef<Path>>(stack: &ImageStack, path: P) -> IoResult<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    let pages: Vec<&Pix> = stack.iter().collect();
    tiff::write_tiff_multipage(&pages, &mut writer, TiffCompression::Lzw)?;
    writer.flush()?;
    Ok(())
}
