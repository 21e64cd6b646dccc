//! Seed fill operations
//!
//! Flood fill on binary images, and border clearing built on it.

use crate::conncomp::ConnectivityType;
use crate::error::{RegionError, RegionResult};
use cvqc_core::{Pix, PixMut, PixelDepth};
use std::collections::VecDeque;

/// Flood fill in a binary image starting from a seed point
///
/// Fills the connected region holding the seed's value with `new_value`.
/// This modifies the image in place and returns the number of pixels filled.
///
/// # Arguments
///
/// * `pix` - Mutable binary image (1-bit)
/// * `seed_x` - X coordinate of the seed point
/// * `seed_y` - Y coordinate of the seed point
/// * `new_value` - Value to fill with (0 or 1)
/// * `connectivity` - Connectivity type
///
/// # Errors
///
/// Returns an error if the seed position is out of bounds or the image has
/// an unsupported depth.
pub fn floodfill(
    pix: &mut PixMut,
    seed_x: u32,
    seed_y: u32,
    new_value: u32,
    connectivity: ConnectivityType,
) -> RegionResult<u32> {
    check_binary(pix.depth())?;

    let width = pix.width();
    let height = pix.height();

    if seed_x >= width || seed_y >= height {
        return Err(RegionError::InvalidParameters(format!(
            "seed ({}, {}) outside {}x{} image",
            seed_x, seed_y, width, height
        )));
    }

    let old_value = pix.get_pixel_unchecked(seed_x, seed_y);
    let new_value = new_value & 1;
    if old_value == new_value {
        return Ok(0);
    }

    let mut filled_count = 0u32;
    let mut queue = VecDeque::new();
    pix.set_pixel_unchecked(seed_x, seed_y, new_value);
    queue.push_back((seed_x, seed_y));

    while let Some((x, y)) = queue.pop_front() {
        filled_count += 1;
        for (nx, ny) in neighbors(x, y, width, height, connectivity) {
            if pix.get_pixel_unchecked(nx, ny) == old_value {
                pix.set_pixel_unchecked(nx, ny, new_value);
                queue.push_back((nx, ny));
            }
        }
    }

    Ok(filled_count)
}

/// Remove foreground regions that touch the image border
///
/// A component is removed when any of its pixels lies within
/// `buffer + 1` pixels of an image edge; `buffer == 0` removes only the
/// components touching the edge itself. A band wider than half the image
/// clears everything.
///
/// # Arguments
///
/// * `pix` - Input binary image (1-bit)
/// * `buffer` - Extra band width beyond the outermost pixel ring
/// * `connectivity` - Connectivity type
///
/// # Returns
///
/// A new image with border-connected regions removed.
pub fn clear_border(pix: &Pix, buffer: u32, connectivity: ConnectivityType) -> RegionResult<Pix> {
    check_binary(pix.depth())?;

    let width = pix.width();
    let height = pix.height();
    let band = buffer.saturating_add(1);
    let in_band = |x: u32, y: u32| {
        x < band || y < band || x >= width.saturating_sub(band) || y >= height.saturating_sub(band)
    };

    let mut result = pix.to_mut();
    let mut removed = 0u32;
    for y in 0..height {
        for x in 0..width {
            if in_band(x, y) && result.get_pixel_unchecked(x, y) == 1 {
                removed += floodfill(&mut result, x, y, 0, connectivity)?;
            }
        }
    }

    log::trace!(
        "clear_border: removed {} pixel(s) within {} px of the edge",
        removed,
        band
    );
    Ok(result.into())
}

fn neighbors(
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    connectivity: ConnectivityType,
) -> impl Iterator<Item = (u32, u32)> {
    static FOUR: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
    static DIAGONAL: [(i32, i32); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];
    let diagonals: &'static [(i32, i32)] = if connectivity == ConnectivityType::EightWay {
        &DIAGONAL
    } else {
        &[]
    };
    FOUR.iter()
        .chain(diagonals.iter())
        .filter_map(move |&(dx, dy)| {
            let nx = x as i64 + dx as i64;
            let ny = y as i64 + dy as i64;
            (nx >= 0 && ny >= 0 && nx < width as i64 && ny < height as i64)
                .then_some((nx as u32, ny as u32))
        })
}

fn check_binary(depth: PixelDepth) -> RegionResult<()> {
    if depth != PixelDepth::Bit1 {
        return Err(RegionError::UnsupportedDepth {
            expected: "1-bit",
            actual: depth.bits(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_with_rects(w: u32, h: u32, rects: &[(u32, u32, u32, u32)]) -> Pix {
        let mut m = PixMut::new(w, h, PixelDepth::Bit1).unwrap();
        for &(x0, y0, rw, rh) in rects {
            for y in y0..y0 + rh {
                for x in x0..x0 + rw {
                    m.set_pixel(x, y, 1).unwrap();
                }
            }
        }
        m.into()
    }

    #[test]
    fn test_floodfill() {
        let mut m = PixMut::new(10, 10, PixelDepth::Bit1).unwrap();
        assert_eq!(floodfill(&mut m, 5, 5, 1, ConnectivityType::FourWay).unwrap(), 100);
        assert_eq!(floodfill(&mut m, 5, 5, 1, ConnectivityType::FourWay).unwrap(), 0);
        assert!(floodfill(&mut m, 10, 0, 0, ConnectivityType::FourWay).is_err());
    }

    #[test]
    fn test_floodfill_diagonal() {
        let mask = mask_with_rects(4, 4, &[(0, 0, 1, 1), (1, 1, 1, 1)]);
        let mut four = mask.to_mut();
        assert_eq!(floodfill(&mut four, 0, 0, 0, ConnectivityType::FourWay).unwrap(), 1);
        let mut eight = mask.to_mut();
        assert_eq!(floodfill(&mut eight, 0, 0, 0, ConnectivityType::EightWay).unwrap(), 2);
    }

    #[test]
    fn test_clear_border() {
        // One square on the left edge, one in the middle
        let mask = mask_with_rects(20, 20, &[(0, 5, 3, 3), (8, 8, 4, 4)]);
        let cleared = clear_border(&mask, 0, ConnectivityType::EightWay).unwrap();
        assert_eq!(cleared.count_ones().unwrap(), 16);
        assert_eq!(cleared.get_pixel(1, 6), Some(0));
        assert_eq!(cleared.get_pixel(9, 9), Some(1));
        // Input untouched
        assert_eq!(mask.count_ones().unwrap(), 25);
    }

    #[test]
    fn test_clear_border_buffer() {
        let mask = mask_with_rects(20, 20, &[(3, 8, 2, 2), (9, 9, 2, 2)]);
        // Band of 3 covers x = 0..=2 and misses both squares
        let cleared = clear_border(&mask, 2, ConnectivityType::EightWay).unwrap();
        assert_eq!(cleared.count_ones().unwrap(), 8);
        // Band of 4 reaches the left square only
        let cleared = clear_border(&mask, 3, ConnectivityType::EightWay).unwrap();
        assert_eq!(cleared.count_ones().unwrap(), 4);
        // A band covering the image removes everything
        let cleared = clear_border(&mask, 100, ConnectivityType::EightWay).unwrap();
        assert_eq!(cleared.count_ones().unwrap(), 0);
    }

    #[test]
    fn test_clear_border_depth() {
        let gray = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        assert!(clear_border(&gray, 0, ConnectivityType::EightWay).is_err());
    }
}
