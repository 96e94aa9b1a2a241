//! Subdividable dough footprint
//!
//! The shape starts as a single root region. Each accepted cut replaces the
//! visible region under the cut with a left and a right child. Every region
//! lives in an arena; split parents stay there (invisible) for auditing.
//!
//! Regions carry two horizontal positions that must never be mixed:
//! - `bounds`: logical bounds, used for hit-testing and the finish line
//! - `render_offset`: cosmetic nudge applied only when drawing

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::polar_to_cartesian;

/// Outline of the uncut dough
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShapeKind {
    #[default]
    Rect,
    Disc,
}

/// Which side of its parent's cut a region came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
    None,
}

/// Axis-aligned logical bounds (screen space, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn from_center(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            left: center.x - width / 2.0,
            right: center.x + width / 2.0,
            top: center.y - height / 2.0,
            bottom: center.y + height / 2.0,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.center_y())
    }

    /// Inclusive horizontal containment
    #[inline]
    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.left && x <= self.right
    }

    #[inline]
    pub fn strictly_contains_x(&self, x: f32) -> bool {
        x > self.left && x < self.right
    }

    fn translate_x(&mut self, dx: f32) {
        self.left += dx;
        self.right += dx;
    }
}

/// The circle a disc-shaped region was cut from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Disc {
    pub center: Vec2,
    pub radius: f32,
}

impl Disc {
    fn inscribed(bounds: &Bounds) -> Self {
        Self {
            center: bounds.center(),
            radius: bounds.width().min(bounds.height()) / 2.0,
        }
    }

    /// Half-height of the circle at horizontal position `x`
    fn half_chord(&self, x: f32) -> f32 {
        let dx = x - self.center.x;
        (self.radius * self.radius - dx * dx).max(0.0).sqrt()
    }
}

/// One contiguous piece of the dough
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub id: u32,
    pub parent: Option<u32>,
    pub bounds: Bounds,
    /// Cosmetic x offset for drawing (never used for hit-testing)
    pub render_offset: f32,
    pub side: Side,
    pub visible: bool,
    /// Set for pieces of a disc-shaped dough
    pub disc: Option<Disc>,
}

impl Region {
    /// Where the renderer should draw this piece
    pub fn render_center(&self) -> Vec2 {
        Vec2::new(self.bounds.center_x() + self.render_offset, self.bounds.center_y())
    }

    /// Closed outline for drawing, render offset applied.
    ///
    /// Rect pieces return their four corners. Disc pieces sample the part of the
    /// circle between the two cut lines: top edge left to right, then bottom
    /// edge right to left, so the cut lines close the polygon.
    pub fn outline(&self, samples: usize) -> Vec<Vec2> {
        let shift = Vec2::new(self.render_offset, 0.0);
        let b = &self.bounds;

        let Some(disc) = self.disc else {
            return vec![
                Vec2::new(b.left, b.top) + shift,
                Vec2::new(b.right, b.top) + shift,
                Vec2::new(b.right, b.bottom) + shift,
                Vec2::new(b.left, b.bottom) + shift,
            ];
        };

        let left = b.left.max(disc.center.x - disc.radius);
        let right = b.right.min(disc.center.x + disc.radius);
        if right <= left {
            return Vec::new();
        }

        // An uncut disc reads better sampled by angle
        if self.side == Side::None {
            let n = samples.max(8);
            return (0..n)
                .map(|i| {
                    let theta = i as f32 / n as f32 * std::f32::consts::TAU;
                    polar_to_cartesian(disc.center, disc.radius, theta) + shift
                })
                .collect();
        }

        let n = samples.max(2);
        let xs: Vec<f32> = (0..n)
            .map(|i| left + (right - left) * i as f32 / (n - 1) as f32)
            .collect();

        let top = xs
            .iter()
            .map(|&x| Vec2::new(x, disc.center.y - disc.half_chord(x)));
        let bottom = xs
            .iter()
            .rev()
            .map(|&x| Vec2::new(x, disc.center.y + disc.half_chord(x)));
        top.chain(bottom).map(|p| p + shift).collect()
    }
}

/// Region tree for one piece of dough
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeSplitter {
    kind: ShapeKind,
    /// Canonical bounds restored on reset
    home: Bounds,
    regions: Vec<Region>,
    /// Visible region ids, ordered left to right
    visible: Vec<u32>,
}

impl ShapeSplitter {
    pub fn new(kind: ShapeKind, home: Bounds) -> Self {
        let mut splitter = Self {
            kind,
            home,
            regions: Vec::new(),
            visible: Vec::new(),
        };
        splitter.reset();
        splitter
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn home(&self) -> Bounds {
        self.home
    }

    pub fn root(&self) -> &Region {
        &self.regions[0]
    }

    /// True once any cut has been applied
    pub fn is_split(&self) -> bool {
        self.regions.len() > 1
    }

    pub fn region(&self, id: u32) -> Option<&Region> {
        self.regions.get(id as usize)
    }

    /// Every region ever created, including split parents
    pub fn all_regions(&self) -> &[Region] {
        &self.regions
    }

    /// Visible regions, left to right
    pub fn visible_regions(&self) -> impl Iterator<Item = &Region> {
        self.visible.iter().map(|&id| &self.regions[id as usize])
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Logical footprint covered by the visible regions
    pub fn extent(&self) -> Bounds {
        let root = self.root().bounds;
        self.visible_regions().fold(
            Bounds {
                left: f32::INFINITY,
                right: f32::NEG_INFINITY,
                top: root.top,
                bottom: root.bottom,
            },
            |acc, r| Bounds {
                left: acc.left.min(r.bounds.left),
                right: acc.right.max(r.bounds.right),
                top: acc.top.min(r.bounds.top),
                bottom: acc.bottom.max(r.bounds.bottom),
            },
        )
    }

    /// Visible region whose logical span contains `x` (inclusive)
    pub fn find_region_containing(&self, x: f32) -> Option<u32> {
        self.visible_regions()
            .find(|r| r.bounds.contains_x(x))
            .map(|r| r.id)
    }

    /// Cut a visible region at `x`, returning the (left, right) child ids.
    ///
    /// No-op unless the region is visible and `x` lies strictly inside it.
    pub fn split(&mut self, id: u32, x: f32) -> Option<(u32, u32)> {
        let slot = self.visible.iter().position(|&v| v == id)?;
        let parent = self.regions.get(id as usize)?.clone();
        if !parent.visible || !parent.bounds.strictly_contains_x(x) {
            return None;
        }

        let left_id = self.regions.len() as u32;
        let right_id = left_id + 1;
        let child = |child_id, side, bounds| Region {
            id: child_id,
            parent: Some(id),
            bounds,
            render_offset: parent.render_offset,
            side,
            visible: true,
            disc: parent.disc,
        };

        self.regions.push(child(
            left_id,
            Side::Left,
            Bounds {
                right: x,
                ..parent.bounds
            },
        ));
        self.regions.push(child(
            right_id,
            Side::Right,
            Bounds {
                left: x,
                ..parent.bounds
            },
        ));
        self.regions[id as usize].visible = false;
        self.visible[slot] = left_id;
        self.visible.insert(slot + 1, right_id);

        Some((left_id, right_id))
    }

    /// Spread pieces apart for drawing: left pieces by `-offset`, right by `+offset`
    pub fn apply_cosmetic_separation(&mut self, offset: f32) {
        for &id in &self.visible {
            let region = &mut self.regions[id as usize];
            match region.side {
                Side::Left => region.render_offset -= offset,
                Side::Right => region.render_offset += offset,
                Side::None => {}
            }
        }
    }

    /// Largest logical right edge over the visible regions
    pub fn rightmost_edge(&self) -> f32 {
        self.visible_regions()
            .map(|r| r.bounds.right)
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Shift every visible region's logical bounds by `dx`
    pub fn translate_all(&mut self, dx: f32) {
        for &id in &self.visible {
            let region = &mut self.regions[id as usize];
            region.bounds.translate_x(dx);
            if let Some(disc) = region.disc.as_mut() {
                disc.center.x += dx;
            }
        }
    }

    /// Move/resize the uncut dough. Ignored once a cut exists.
    pub fn reshape_root(&mut self, bounds: Bounds) -> bool {
        if self.is_split() {
            return false;
        }
        let root = &mut self.regions[0];
        root.bounds = bounds;
        if root.disc.is_some() {
            root.disc = Some(Disc::inscribed(&bounds));
        }
        true
    }

    /// Collapse back to a single root at the canonical bounds
    pub fn reset(&mut self) {
        self.regions.clear();
        self.regions.push(Region {
            id: 0,
            parent: None,
            bounds: self.home,
            render_offset: 0.0,
            side: Side::None,
            visible: true,
            disc: (self.kind == ShapeKind::Disc).then(|| Disc::inscribed(&self.home)),
        });
        self.visible.clear();
        self.visible.push(0);
    }
}
