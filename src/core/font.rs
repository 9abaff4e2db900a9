// Typeface JSON fonts: parsing, glyph layout and outline flattening.
use super::triangulate::{contains_point, is_clockwise, signed_area};
use fnv::FnvHashMap;
use glam::Vec2;
use serde::Deserialize;
use smallvec::SmallVec;
use std::str::SplitWhitespace;

#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("invalid typeface json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("typeface resolution must be positive, got {0}")]
    InvalidResolution(f32),
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Glyph {
    /// Horizontal advance in font units.
    #[serde(default)]
    pub ha: f32,
    #[serde(default)]
    pub x_min: f32,
    #[serde(default)]
    pub x_max: f32,
    /// Outline commands, absent for blank glyphs such as space.
    #[serde(default)]
    pub o: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontBounds {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typeface {
    pub glyphs: FnvHashMap<String, Glyph>,
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub ascender: f32,
    #[serde(default)]
    pub descender: f32,
    #[serde(default)]
    pub underline_position: f32,
    #[serde(default)]
    pub underline_thickness: f32,
    #[serde(default)]
    pub bounding_box: FontBounds,
    pub resolution: f32,
}

/// A filled region: one outer ring (counter-clockwise) and its holes (clockwise).
#[derive(Clone, Debug, Default)]
pub struct Shape {
    pub outer: Vec<Vec2>,
    pub holes: SmallVec<[Vec<Vec2>; 2]>,
}

impl Typeface {
    pub fn from_json(json: &str) -> Result<Self, FontError> {
        Self::validated(serde_json::from_str(json)?)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, FontError> {
        Self::validated(serde_json::from_slice(bytes)?)
    }

    fn validated(face: Typeface) -> Result<Self, FontError> {
        if !(face.resolution > 0.0) {
            return Err(FontError::InvalidResolution(face.resolution));
        }
        Ok(face)
    }

    /// Glyph for `ch`, falling back to `?` when the face lacks it.
    pub fn glyph_for(&self, ch: char) -> Option<&Glyph> {
        let mut buf = [0u8; 4];
        if let Some(g) = self.glyphs.get(&*ch.encode_utf8(&mut buf)) {
            return Some(g);
        }
        log::warn!(
            "character {:?} does not exist in font family {:?}",
            ch,
            self.family_name
        );
        self.glyphs.get("?")
    }

    pub fn line_height(&self, size: f32) -> f32 {
        let b = &self.bounding_box;
        (b.y_max - b.y_min + self.underline_thickness) * size / self.resolution
    }

    /// Lay out `text` at `size` world units per em and flatten every glyph into shapes.
    pub fn generate_shapes(&self, text: &str, size: f32, curve_segments: u32) -> Vec<Shape> {
        let scale = size / self.resolution;
        let line_height = self.line_height(size);
        let mut pen = Vec2::ZERO;
        let mut shapes = Vec::new();
        for ch in text.chars() {
            if ch == '\n' {
                pen.x = 0.0;
                pen.y -= line_height;
                continue;
            }
            let Some(glyph) = self.glyph_for(ch) else {
                continue;
            };
            if let Some(outline) = &glyph.o {
                let contours = outline_contours(outline, scale, pen, curve_segments);
                shapes.extend(shapes_from_contours(contours));
            }
            pen.x += glyph.ha * scale;
        }
        shapes
    }
}

fn read_point(tokens: &mut SplitWhitespace<'_>, scale: f32, offset: Vec2) -> Option<Vec2> {
    let x = tokens.next()?.parse::<f32>().ok()?;
    let y = tokens.next()?.parse::<f32>().ok()?;
    Some(Vec2::new(x, y) * scale + offset)
}

#[inline]
fn push_point(contour: &mut Vec<Vec2>, p: Vec2) {
    if contour.last().map_or(true, |last| last.distance_squared(p) > 1e-12) {
        contour.push(p);
    }
}

fn finish_contour(contours: &mut Vec<Vec<Vec2>>, mut contour: Vec<Vec2>) {
    if contour.len() > 1 && contour[0].distance_squared(contour[contour.len() - 1]) <= 1e-12 {
        contour.pop();
    }
    if contour.len() >= 3 {
        contours.push(contour);
    }
}

/// Flatten a typeface outline command string into closed contours.
///
/// `q` carries the end point before its control point and `b` carries the end
/// point before both control points. Curves are sampled with `divisions` steps.
pub fn outline_contours(outline: &str, scale: f32, offset: Vec2, divisions: u32) -> Vec<Vec<Vec2>> {
    let divisions = divisions.max(1);
    let mut tokens = outline.split_whitespace();
    let mut contours = Vec::new();
    let mut current: Vec<Vec2> = Vec::new();
    let mut pen = offset;

    while let Some(action) = tokens.next() {
        match action {
            "m" => {
                let Some(p) = read_point(&mut tokens, scale, offset) else {
                    log::warn!("truncated move command in glyph outline");
                    break;
                };
                finish_contour(&mut contours, std::mem::take(&mut current));
                current.push(p);
                pen = p;
            }
            "l" => {
                let Some(p) = read_point(&mut tokens, scale, offset) else {
                    log::warn!("truncated line command in glyph outline");
                    break;
                };
                if current.is_empty() {
                    current.push(pen);
                }
                push_point(&mut current, p);
                pen = p;
            }
            "q" => {
                let (Some(end), Some(ctrl)) = (
                    read_point(&mut tokens, scale, offset),
                    read_point(&mut tokens, scale, offset),
                ) else {
                    log::warn!("truncated quadratic command in glyph outline");
                    break;
                };
                if current.is_empty() {
                    current.push(pen);
                }
                for k in 1..=divisions {
                    let t = k as f32 / divisions as f32;
                    let u = 1.0 - t;
                    push_point(&mut current, pen * (u * u) + ctrl * (2.0 * u * t) + end * (t * t));
                }
                pen = end;
            }
            "b" => {
                let (Some(end), Some(c1), Some(c2)) = (
                    read_point(&mut tokens, scale, offset),
                    read_point(&mut tokens, scale, offset),
                    read_point(&mut tokens, scale, offset),
                ) else {
                    log::warn!("truncated cubic command in glyph outline");
                    break;
                };
                if current.is_empty() {
                    current.push(pen);
                }
                for k in 1..=divisions {
                    let t = k as f32 / divisions as f32;
                    let u = 1.0 - t;
                    push_point(
                        &mut current,
                        pen * (u * u * u)
                            + c1 * (3.0 * u * u * t)
                            + c2 * (3.0 * u * t * t)
                            + end * (t * t * t),
                    );
                }
                pen = end;
            }
            "z" => finish_contour(&mut contours, std::mem::take(&mut current)),
            other => {
                log::warn!("unknown glyph outline command {:?}", other);
                break;
            }
        }
    }
    finish_contour(&mut contours, current);
    contours
}

/// Group contours into shapes by nesting depth, independent of source winding.
///
/// A contour inside an odd number of others is a hole of the smallest solid
/// that encloses it.
pub fn shapes_from_contours(contours: Vec<Vec<Vec2>>) -> Vec<Shape> {
    let depth: Vec<usize> = contours
        .iter()
        .enumerate()
        .map(|(i, c)| {
            contours
                .iter()
                .enumerate()
                .filter(|&(j, other)| j != i && contains_point(other, c[0]))
                .count()
        })
        .collect();

    let mut shapes: Vec<Shape> = Vec::new();
    let mut shape_of: Vec<Option<usize>> = vec![None; contours.len()];
    for (i, c) in contours.iter().enumerate() {
        if depth[i] % 2 == 0 {
            let mut outer = c.clone();
            if is_clockwise(&outer) {
                outer.reverse();
            }
            shape_of[i] = Some(shapes.len());
            shapes.push(Shape {
                outer,
                holes: SmallVec::new(),
            });
        }
    }

    for (i, c) in contours.iter().enumerate() {
        if depth[i] % 2 == 0 {
            continue;
        }
        let parent = contours
            .iter()
            .enumerate()
            .filter(|&(j, other)| {
                depth[j] + 1 == depth[i] && shape_of[j].is_some() && contains_point(other, c[0])
            })
            .min_by(|(_, a), (_, b)| {
                signed_area(a)
                    .abs()
                    .partial_cmp(&signed_area(b).abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .and_then(|(j, _)| shape_of[j]);
        if let Some(s) = parent {
            let mut hole = c.clone();
            if !is_clockwise(&hole) {
                hole.reverse();
            }
            shapes[s].holes.push(hole);
        }
    }
    shapes
}
