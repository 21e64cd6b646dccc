//! Connected component analysis
//!
//! This module provides functions for finding and labeling connected components
//! in binary images. It uses a Union-Find (disjoint set) data structure for
//! two-pass labeling.

use crate::error::{RegionError, RegionResult};
use cvqc_core::{Box, Pix, PixMut, PixelDepth};

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    FourWay,
    /// 8-way connectivity (includes diagonals)
    #[default]
    EightWay,
}

/// A connected component in an image
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectedComponent {
    /// Unique label for this component (1-based)
    pub label: u32,
    /// Number of pixels in this component
    pub pixel_count: u32,
    /// Bounding box of this component
    pub bounds: Box,
    /// Centroid X coordinate
    pub centroid_x: f64,
    /// Centroid Y coordinate
    pub centroid_y: f64,
}

impl ConnectedComponent {
    /// Create a new connected component with its centroid at the box center
    pub fn new(label: u32, pixel_count: u32, bounds: Box) -> Self {
        Self {
            label,
            pixel_count,
            centroid_x: bounds.x as f64 + (bounds.w - 1) as f64 / 2.0,
            centroid_y: bounds.y as f64 + (bounds.h - 1) as f64 / 2.0,
            bounds,
        }
    }

    /// Whether any pixel of the component lies on the image edge
    pub fn touches_edge(&self, width: u32, height: u32) -> bool {
        self.bounds.x <= 0
            || self.bounds.y <= 0
            || self.bounds.right() >= width as i32
            || self.bounds.bottom() >= height as i32
    }
}

/// Disjoint-set forest over provisional labels
struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    fn new() -> Self {
        // label 0 is the background
        Self { parent: vec![0] }
    }

    fn make_set(&mut self) -> u32 {
        let label = self.parent.len() as u32;
        self.parent.push(label);
        label
    }

    fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            let grand = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grand;
            x = grand;
        }
        x
    }

    fn union(&mut self, a: u32, b: u32) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[hi as usize] = lo;
        }
    }
}

/// Find all connected components in a binary image
///
/// Components are returned in label order, which is the raster order
/// (top to bottom, left to right) of each component's first pixel.
pub fn find_connected_components(
    pix: &Pix,
    connectivity: ConnectivityType,
) -> RegionResult<Vec<ConnectedComponent>> {
    let labeled = label_connected_components(pix, connectivity)?;
    component_stats(&labeled)
}

/// Label all connected components in a binary image
///
/// Returns a 32-bit image where each pixel contains the label of its
/// component (0 for background). Labels are consecutive starting at 1,
/// numbered in raster order of each component's first pixel.
pub fn label_connected_components(pix: &Pix, connectivity: ConnectivityType) -> RegionResult<Pix> {
    if pix.depth() != PixelDepth::Bit1 {
        return Err(RegionError::UnsupportedDepth {
            expected: "1-bit",
            actual: pix.depth().bits(),
        });
    }

    let w = pix.width();
    let h = pix.height();
    let mut provisional = vec![0u32; w as usize * h as usize];
    let mut sets = UnionFind::new();
    let idx = |x: u32, y: u32| y as usize * w as usize + x as usize;

    // First pass: provisional labels from the already visited neighbors
    for y in 0..h {
        for x in 0..w {
            if pix.get_pixel_unchecked(x, y) == 0 {
                continue;
            }
            let mut neighbors = [0u32; 4];
            let mut n = 0;
            if x > 0 {
                neighbors[n] = provisional[idx(x - 1, y)];
                n += 1;
            }
            if y > 0 {
                neighbors[n] = provisional[idx(x, y - 1)];
                n += 1;
                if connectivity == ConnectivityType::EightWay {
                    if x > 0 {
                        neighbors[n] = provisional[idx(x - 1, y - 1)];
                        n += 1;
                    }
                    if x + 1 < w {
                        neighbors[n] = provisional[idx(x + 1, y - 1)];
                        n += 1;
                    }
                }
            }

            let mut label = 0;
            for &nb in neighbors[..n].iter().filter(|&&nb| nb != 0) {
                if label == 0 {
                    label = nb;
                } else {
                    sets.union(label, nb);
                }
            }
            if label == 0 {
                label = sets.make_set();
            }
            provisional[idx(x, y)] = label;
        }
    }

    // Second pass: resolve and renumber in raster order
    let mut final_label = vec![0u32; sets.parent.len()];
    let mut next = 0u32;
    let mut out = PixMut::new(w, h, PixelDepth::Bit32)?;
    for y in 0..h {
        for x in 0..w {
            let p = provisional[idx(x, y)];
            if p == 0 {
                continue;
            }
            let root = sets.find(p) as usize;
            if final_label[root] == 0 {
                next += 1;
                final_label[root] = next;
            }
            out.set_pixel_unchecked(x, y, final_label[root]);
        }
    }

    log::trace!("labeled {} component(s) in {}x{} mask", next, w, h);
    Ok(out.into())
}

/// Measure every component of a labeled image
///
/// # Arguments
///
/// * `labeled` - Labeled image (32-bit) with consecutive labels from 1
///
/// # Returns
///
/// One entry per label, in label order.
pub fn component_stats(labeled: &Pix) -> RegionResult<Vec<ConnectedComponent>> {
    if labeled.depth() != PixelDepth::Bit32 {
        return Err(RegionError::UnsupportedDepth {
            expected: "32-bit (labeled image)",
            actual: labeled.depth().bits(),
        });
    }

    struct Accum {
        count: u32,
        sum_x: u64,
        sum_y: u64,
        min_x: u32,
        min_y: u32,
        max_x: u32,
        max_y: u32,
    }

    let mut accums: Vec<Option<Accum>> = Vec::new();
    for y in 0..labeled.height() {
        for x in 0..labeled.width() {
            let label = labeled.get_pixel_unchecked(x, y) as usize;
            if label == 0 {
                continue;
            }
            if accums.len() < label {
                accums.resize_with(label, || None);
            }
            let acc = accums[label - 1].get_or_insert(Accum {
                count: 0,
                sum_x: 0,
                sum_y: 0,
                min_x: x,
                min_y: y,
                max_x: x,
                max_y: y,
            });
            acc.count += 1;
            acc.sum_x += x as u64;
            acc.sum_y += y as u64;
            acc.min_x = acc.min_x.min(x);
            acc.min_y = acc.min_y.min(y);
            acc.max_x = acc.max_x.max(x);
            acc.max_y = acc.max_y.max(y);
        }
    }

    Ok(accums
        .into_iter()
        .enumerate()
        .filter_map(|(i, acc)| {
            let acc = acc?;
            Some(ConnectedComponent {
                label: i as u32 + 1,
                pixel_count: acc.count,
                bounds: Box::from_inclusive_corners(
                    acc.min_x as i32,
                    acc.min_y as i32,
                    acc.max_x as i32,
                    acc.max_y as i32,
                ),
                centroid_x: acc.sum_x as f64 / acc.count as f64,
                centroid_y: acc.sum_y as f64 / acc.count as f64,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from(w: u32, h: u32, on: &[(u32, u32)]) -> Pix {
        let mut m = PixMut::new(w, h, PixelDepth::Bit1).unwrap();
        for &(x, y) in on {
            m.set_pixel(x, y, 1).unwrap();
        }
        m.into()
    }

    #[test]
    fn test_diagonal_connectivity() {
        let pix = mask_from(4, 4, &[(0, 0), (1, 1), (2, 2)]);
        let four = find_connected_components(&pix, ConnectivityType::FourWay).unwrap();
        assert_eq!(four.len(), 3);
        let eight = find_connected_components(&pix, ConnectivityType::EightWay).unwrap();
        assert_eq!(eight.len(), 1);
        assert_eq!(eight[0].pixel_count, 3);
        assert_eq!(eight[0].bounds, Box::new(0, 0, 3, 3).unwrap());
        assert_eq!(eight[0].centroid_x, 1.0);
    }

    #[test]
    fn test_u_shape_merges() {
        // Two arms joined at the bottom get provisional labels 1 and 2
        let pix = mask_from(
            5,
            3,
            &[(0, 0), (4, 0), (0, 1), (4, 1), (0, 2), (1, 2), (2, 2), (3, 2), (4, 2)],
        );
        let labeled = label_connected_components(&pix, ConnectivityType::FourWay).unwrap();
        assert_eq!(labeled.get_pixel(0, 0), Some(1));
        assert_eq!(labeled.get_pixel(4, 0), Some(1));
        assert_eq!(labeled.get_pixel(2, 1), Some(0));
        let comps = component_stats(&labeled).unwrap();
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].pixel_count, 9);
    }

    #[test]
    fn test_raster_order_labels() {
        let pix = mask_from(6, 6, &[(5, 0), (0, 3), (3, 5)]);
        let labeled = label_connected_components(&pix, ConnectivityType::EightWay).unwrap();
        assert_eq!(labeled.get_pixel(5, 0), Some(1));
        assert_eq!(labeled.get_pixel(0, 3), Some(2));
        assert_eq!(labeled.get_pixel(3, 5), Some(3));
        let comps = component_stats(&labeled).unwrap();
        assert!(comps[0].touches_edge(6, 6));
        assert_eq!(comps[2].label, 3);
    }

    #[test]
    fn test_empty_and_depth() {
        let pix = mask_from(8, 8, &[]);
        assert!(find_connected_components(&pix, ConnectivityType::EightWay)
            .unwrap()
            .is_empty());
        let gray = Pix::new(8, 8, PixelDepth::Bit8).unwrap();
        assert!(label_connected_components(&gray, ConnectivityType::EightWay).is_err());
        assert!(component_stats(&gray).is_err());
    }

    #[test]
    fn test_touches_edge() {
        let c = ConnectedComponent::new(1, 4, Box::new(2, 2, 2, 2).unwrap());
        assert!(!c.touches_edge(10, 10));
        assert!(c.touches_edge(4, 10));
        assert_eq!(c.centroid_x, 2.5);
    }
}
