//! PNG image format support
//!
//! PNG is the export format for annotated images and histogram plots.
//! Reading is supported for grayscale (8/16 bit) and 8 bit RGB(A) files.

use crate::{IoError, IoResult};
use cvqc_core::{ImageFormat, Pix, PixMut, PixelDepth, color};
use png::{BitDepth, ColorType, Decoder, Encoder};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;

    let (pix_depth, spp) = match (color_type, bit_depth) {
        (ColorType::Grayscale, BitDepth::Eight) => (PixelDepth::Bit8, 1),
        (ColorType::Grayscale, BitDepth::Sixteen) => (PixelDepth::Bit16, 1),
        (ColorType::Rgb, BitDepth::Eight) => (PixelDepth::Bit32, 3),
        (ColorType::Rgba, BitDepth::Eight) => (PixelDepth::Bit32, 4),
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG format: {:?} {:?}",
                color_type, bit_depth
            )));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let mut pix_mut = PixMut::new(width, height, pix_depth)?;
    pix_mut.set_spp(spp);

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    for y in 0..height {
        let row = &data[y as usize * bytes_per_row..];
        for x in 0..width {
            let xi = x as usize;
            let val = match color_type {
                ColorType::Grayscale if bit_depth == BitDepth::Sixteen => {
                    ((row[2 * xi] as u32) << 8) | row[2 * xi + 1] as u32
                }
                ColorType::Grayscale => row[xi] as u32,
                ColorType::Rgb => color::compose_rgb(row[3 * xi], row[3 * xi + 1], row[3 * xi + 2]),
                _ => color::compose_rgba(
                    row[4 * xi],
                    row[4 * xi + 1],
                    row[4 * xi + 2],
                    row[4 * xi + 3],
                ),
            };
            pix_mut.set_pixel_unchecked(x, y, val);
        }
    }

    pix_mut.set_informat(ImageFormat::Png);
    Ok(pix_mut.into())
}

/// Write a PNG image
///
/// 1 bpp images are written as 1 bit grayscale, 32 bpp images as 8 bit RGB.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let (color_type, bit_depth, bytes_per_row) = match pix.depth() {
        PixelDepth::Bit1 => (ColorType::Grayscale, BitDepth::One, width.div_ceil(8)),
        PixelDepth::Bit8 => (ColorType::Grayscale, BitDepth::Eight, width),
        PixelDepth::Bit16 => (ColorType::Grayscale, BitDepth::Sixteen, width * 2),
        PixelDepth::Bit32 => (ColorType::Rgb, BitDepth::Eight, width * 3),
    };
    let bytes_per_row = bytes_per_row as usize;

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(bit_depth);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let mut data = vec![0u8; bytes_per_row * height as usize];
    for y in 0..height {
        let row = &mut data[y as usize * bytes_per_row..(y as usize + 1) * bytes_per_row];
        for x in 0..width {
            let val = pix.get_pixel_unchecked(x, y);
            let xi = x as usize;
            match pix.depth() {
                PixelDepth::Bit1 => {
                    if val != 0 {
                        row[xi / 8] |= 1 << (7 - (xi % 8));
                    }
                }
                PixelDepth::Bit8 => row[xi] = val as u8,
                PixelDepth::Bit16 => {
                    row[2 * xi] = (val >> 8) as u8;
                    row[2 * xi + 1] = val as u8;
                }
                PixelDepth::Bit32 => {
                    let (r, g, b) = color::extract_rgb(val);
                    row[3 * xi..3 * xi + 3].copy_from_slice(&[r, g, b]);
                }
            }
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}
