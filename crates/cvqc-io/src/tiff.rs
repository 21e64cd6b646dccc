//! TIFF image format support
//!
//! Microscopy acquisitions usually arrive as (multipage) TIFF files with
//! one 8 or 16 bit grayscale plane per page. This module reads such files
//! page by page and writes grayscale or RGB pages back.

use crate::{IoError, IoResult};
use cvqc_core::{ImageFormat, Pix, PixMut, PixelDepth, color};
use std::io::{Read, Seek, Write};
use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::colortype::{Gray8, Gray16, RGB8};
use tiff::encoder::{Compression, TiffEncoder};

/// TIFF compression format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TiffCompression {
    /// No compression
    #[default]
    None,
    /// PackBits compression
    PackBits,
    /// LZW compression
    Lzw,
    /// ZIP/Deflate compression
    Zip,
}

impl TiffCompression {
    fn to_tiff_compression(self) -> Compression {
        match self {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::PackBits => Compression::Packbits,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::Zip => Compression::Deflate(tiff::encoder::DeflateLevel::default()),
        }
    }
}

fn open_decoder<R: Read + Seek>(reader: R) -> IoResult<Decoder<R>> {
    Decoder::new(reader).map_err(|e| IoError::DecodeError(format!("TIFF decode error: {}", e)))
}

/// Read a single-page TIFF image
///
/// If the TIFF file contains multiple pages, only the first page is read.
/// Use [`read_tiff_multipage`] to read all pages.
pub fn read_tiff<R: Read + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = open_decoder(reader)?;
    decode_tiff_image(&mut decoder)
}

/// Read all pages from a multipage TIFF file
pub fn read_tiff_multipage<R: Read + Seek>(reader: R) -> IoResult<Vec<Pix>> {
    let mut decoder = open_decoder(reader)?;
    let mut pages = Vec::new();

    loop {
        pages.push(decode_tiff_image(&mut decoder)?);
        if !decoder.more_images() {
            break;
        }
        decoder
            .next_image()
            .map_err(|e| IoError::DecodeError(format!("TIFF page navigation error: {}", e)))?;
    }

    log::debug!("decoded {} TIFF page(s)", pages.len());
    Ok(pages)
}

/// Get the number of pages in a TIFF file
pub fn tiff_page_count<R: Read + Seek>(reader: R) -> IoResult<usize> {
    let mut decoder = open_decoder(reader)?;
    let mut count = 1;
    while decoder.more_images() {
        decoder
            .next_image()
            .map_err(|e| IoError::DecodeError(format!("TIFF page navigation error: {}", e)))?;
        count += 1;
    }
    Ok(count)
}

/// Decode a TIFF image from the current decoder position
///
/// Only 8 and 16 bit grayscale pages are accepted.
fn decode_tiff_image<R: Read + Seek>(decoder: &mut Decoder<R>) -> IoResult<Pix> {
    let (width, height) = decoder
        .dimensions()
        .map_err(|e| IoError::DecodeError(format!("Failed to get TIFF dimensions: {}", e)))?;
    let color_type = decoder
        .colortype()
        .map_err(|e| IoError::DecodeError(format!("Failed to get TIFF color type: {}", e)))?;

    let depth = match color_type {
        ColorType::Gray(8) => PixelDepth::Bit8,
        ColorType::Gray(16) => PixelDepth::Bit16,
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported TIFF color type: {:?} (expected 8 or 16 bit grayscale)",
                color_type
            )));
        }
    };

    let mut pix_mut = PixMut::new(width, height, depth)?;
    if let (Ok(x_res), Ok(y_res)) = (
        decoder.get_tag_f32(tiff::tags::Tag::XResolution),
        decoder.get_tag_f32(tiff::tags::Tag::YResolution),
    ) {
        pix_mut.set_resolution(x_res as i32, y_res as i32);
    }

    let image_data = decoder
        .read_image()
        .map_err(|e| IoError::DecodeError(format!("Failed to read TIFF image data: {}", e)))?;

    let expected = width as usize * height as usize;
    match image_data {
        DecodingResult::U8(data) => {
            fill_gray(&mut pix_mut, data.iter().map(|&v| v as u32), data.len(), expected)?
        }
        DecodingResult::U16(data) => {
            fill_gray(&mut pix_mut, data.iter().map(|&v| v as u32), data.len(), expected)?
        }
        _ => {
            return Err(IoError::UnsupportedFormat(
                "TIFF sample format is not unsigned integer".to_string(),
            ));
        }
    }

    pix_mut.set_informat(ImageFormat::Tiff);
    Ok(pix_mut.into())
}

fn fill_gray(
    pix_mut: &mut PixMut,
    samples: impl Iterator<Item = u32>,
    len: usize,
    expected: usize,
) -> IoResult<()> {
    if len < expected {
        return Err(IoError::InvalidData(format!(
            "TIFF page holds {} samples, expected {}",
            len, expected
        )));
    }
    let width = pix_mut.width();
    for (i, val) in samples.take(expected).enumerate() {
        let x = i as u32 % width;
        let y = i as u32 / width;
        pix_mut.set_pixel_unchecked(x, y, val);
    }
    Ok(())
}

/// Write a single-page TIFF image
pub fn write_tiff<W: Write + Seek>(
    pix: &Pix,
    writer: W,
    compression: TiffCompression,
) -> IoResult<()> {
    write_tiff_multipage(&[pix], writer, compression)
}

/// Write a multipage TIFF image
///
/// # Arguments
///
/// * `pages` - The images to write
/// * `writer` - The writer to write to
/// * `compression` - The compression format to use for all pages
pub fn write_tiff_multipage<W: Write + Seek>(
    pages: &[&Pix],
    writer: W,
    compression: TiffCompression,
) -> IoResult<()> {
    if pages.is_empty() {
        return Err(IoError::InvalidData("no pages to write".to_string()));
    }

    let mut encoder = TiffEncoder::new(writer)
        .map_err(|e| IoError::EncodeError(format!("TIFF encoder error: {}", e)))?
        .with_compression(compression.to_tiff_compression());

    for pix in pages {
        write_pix_page_to_encoder(&mut encoder, pix)?;
    }
    Ok(())
}

fn write_pix_page_to_encoder<W: Write + Seek>(
    encoder: &mut TiffEncoder<W>,
    pix: &Pix,
) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();
    let encode_err = |e: tiff::TiffError| IoError::EncodeError(format!("TIFF write error: {}", e));

    match pix.depth() {
        PixelDepth::Bit1 => {
            let data: Vec<u8> = pix
                .samples()
                .into_iter()
                .map(|v| if v != 0 { 255 } else { 0 })
                .collect();
            encoder
                .write_image::<Gray8>(width, height, &data)
                .map_err(encode_err)?;
        }
        PixelDepth::Bit8 => {
            let data: Vec<u8> = pix.samples().into_iter().map(|v| v as u8).collect();
            encoder
                .write_image::<Gray8>(width, height, &data)
                .map_err(encode_err)?;
        }
        PixelDepth::Bit16 => {
            let data: Vec<u16> = pix.samples().into_iter().map(|v| v as u16).collect();
            encoder
                .write_image::<Gray16>(width, height, &data)
                .map_err(encode_err)?;
        }
        PixelDepth::Bit32 => {
            let mut data = Vec::with_capacity(width as usize * height as usize * 3);
            for pixel in pix.samples() {
                let (r, g, b) = color::extract_rgb(pixel);
                data.extend_from_slice(&[r, g, b]);
            }
            encoder
                .write_image::<RGB8>(width, height, &data)
                .map_err(encode_err)?;
        }
    }
    Ok(())
}
