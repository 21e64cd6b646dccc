//! Binary morphological operations
//!
//! Dilation, erosion, opening and closing of 1 bpp masks. Every operation
//! works at 32-bit word granularity: for each hit of the structuring
//! element the source row is shifted by the hit offset and OR-ed (dilation)
//! or AND-ed (erosion) into the destination row.

use crate::{MorphError, MorphResult, Sel};
use cvqc_core::{Pix, PixMut, PixelDepth};

/// How pixels outside the image are treated by erosion
///
/// Dilation always treats the outside as background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryCondition {
    /// Outside pixels are background for both dilation and erosion, so
    /// erosion eats foreground touching the image edge
    #[default]
    Asymmetric,
    /// Outside pixels are foreground for erosion, so a closing never
    /// removes foreground at the image edge
    Symmetric,
}

/// Dilate a binary image
///
/// `out(x, y)` is set when any hit `(dx, dy)` of the SEL has
/// `src(x - dx, y - dy)` set.
pub fn dilate(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    check_binary(pix)?;

    let w = pix.width();
    let h = pix.height();
    let wpl = pix.wpl() as usize;
    let mut out = PixMut::new(w, h, PixelDepth::Bit1)?;

    for (dx, dy) in sel.hit_offsets() {
        for y in 0..h as i32 {
            let src_y = y - dy;
            if src_y < 0 || src_y >= h as i32 {
                continue;
            }
            let src = pix.row_data(src_y as u32);
            let dst = out.row_data_mut(y as u32);
            for (i, word) in dst.iter_mut().enumerate().take(wpl) {
                *word |= shifted_word(src, i, dx, 0);
            }
        }
    }

    clear_unused_bits(out.data_mut(), w, wpl);
    Ok(out.into())
}

/// Erode a binary image with background outside the image
pub fn erode(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    erode_with_boundary(pix, sel, BoundaryCondition::Asymmetric)
}

/// Erode a binary image
///
/// `out(x, y)` is set when every hit `(dx, dy)` of the SEL has
/// `src(x + dx, y + dy)` set. Positions outside the image read as
/// background or foreground according to `boundary`.
pub fn erode_with_boundary(
    pix: &Pix,
    sel: &Sel,
    boundary: BoundaryCondition,
) -> MorphResult<Pix> {
    check_binary(pix)?;

    let w = pix.width();
    let h = pix.height();
    let wpl = pix.wpl() as usize;
    let fill = match boundary {
        BoundaryCondition::Asymmetric => 0,
        BoundaryCondition::Symmetric => !0u32,
    };

    let mut out = PixMut::new(w, h, PixelDepth::Bit1)?;
    out.data_mut().fill(!0);

    let mut row = vec![0u32; wpl];
    for (dx, dy) in sel.hit_offsets() {
        for y in 0..h as i32 {
            let src_y = y + dy;
            if src_y < 0 || src_y >= h as i32 {
                if boundary == BoundaryCondition::Asymmetric {
                    out.row_data_mut(y as u32).fill(0);
                }
                continue;
            }
            row.copy_from_slice(&pix.row_data(src_y as u32)[..wpl]);
            set_padding_bits(&mut row, w, fill);
            let dst = out.row_data_mut(y as u32);
            for (i, word) in dst.iter_mut().enumerate().take(wpl) {
                *word &= shifted_word(&row, i, -dx, fill);
            }
        }
    }

    clear_unused_bits(out.data_mut(), w, wpl);
    Ok(out.into())
}

/// Open a binary image (erosion followed by dilation)
pub fn open(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    let eroded = erode(pix, sel)?;
    dilate(&eroded, sel)
}

/// Close a binary image (dilation followed by erosion)
///
/// Foreground touching the image edge is partially eroded; use
/// [`close_safe`] to avoid that.
pub fn close(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    let dilated = dilate(pix, sel)?;
    erode(&dilated, sel)
}

/// Close a binary image without edge artifacts
///
/// The erosion step treats the outside of the image as foreground, so the
/// result is always a superset of the input.
pub fn close_safe(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    let dilated = dilate(pix, sel)?;
    erode_with_boundary(&dilated, sel, BoundaryCondition::Symmetric)
}

/// [`close_safe`] with a `width` x `height` brick
pub fn close_safe_brick(pix: &Pix, width: u32, height: u32) -> MorphResult<Pix> {
    if width == 0 || height == 0 {
        return Err(MorphError::InvalidSel(format!(
            "brick dimensions must be positive: {}x{}",
            width, height
        )));
    }
    let sel = Sel::create_brick(width, height)?;
    close_safe(pix, &sel)
}

/// Word `i` of `src` shifted by `shift` bits.
///
/// Positive shifts move content toward larger x. Words outside the row
/// read as `fill`.
fn shifted_word(src: &[u32], i: usize, shift: i32, fill: u32) -> u32 {
    let word = |j: isize| -> u32 {
        if j < 0 || j as usize >= src.len() {
            fill
        } else {
            src[j as usize]
        }
    };
    let abs_shift = shift.unsigned_abs();
    let word_shift = (abs_shift / 32) as isize;
    let bit_shift = abs_shift % 32;
    let i = i as isize;

    if shift >= 0 {
        if bit_shift == 0 {
            word(i - word_shift)
        } else {
            (word(i - word_shift) >> bit_shift) | (word(i - word_shift - 1) << (32 - bit_shift))
        }
    } else if bit_shift == 0 {
        word(i + word_shift)
    } else {
        (word(i + word_shift) << bit_shift) | (word(i + word_shift + 1) >> (32 - bit_shift))
    }
}

/// Set the bits past `width` in the last word of a row to match `fill`.
fn set_padding_bits(row: &mut [u32], width: u32, fill: u32) {
    let extra = width % 32;
    if extra == 0 || fill == 0 {
        return;
    }
    if let Some(last) = row.last_mut() {
        *last |= !0u32 >> extra;
    }
}

/// Clear the bits past `width` in the last word of every row.
fn clear_unused_bits(data: &mut [u32], width: u32, wpl: usize) {
    let extra = width % 32;
    if extra == 0 || wpl == 0 {
        return;
    }
    // MSB-first: valid bits are the top `extra` bits
    let mask = !0u32 << (32 - extra);
    for row in data.chunks_exact_mut(wpl) {
        row[wpl - 1] &= mask;
    }
}

fn check_binary(pix: &Pix) -> MorphResult<()> {
    if pix.depth() != PixelDepth::Bit1 {
        return Err(MorphError::UnsupportedDepth {
            expected: "1-bpp binary",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}
