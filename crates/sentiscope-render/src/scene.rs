#![forbid(unsafe_code)]

//! Retained scene graph.
//!
//! A [`Scene`] is a tree of plain drawing primitives. It is rebuilt from
//! scratch on every state change and never patched in place, so a scene is
//! always a faithful picture of the state it was built from.
//!
//! Coordinates inside a [`Group`] are local; the group's [`Transform`] maps
//! them into the parent's space. [`Scene::circles`] and [`Scene::hit_test`]
//! work in surface coordinates.

use sentiscope_core::PostId;
use sentiscope_style::Rgb;

/// Translation plus rotation, applied as `translate(tx, ty) rotate(deg)`.
///
/// Child points are rotated about the local origin first, then translated.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub translate: (f64, f64),
    /// Clockwise rotation in degrees (SVG convention, y axis pointing down).
    pub rotate: f64,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translate: (0.0, 0.0),
        rotate: 0.0,
    };

    #[must_use]
    pub const fn translate(x: f64, y: f64) -> Self {
        Self {
            translate: (x, y),
            rotate: 0.0,
        }
    }

    #[must_use]
    pub const fn rotate(degrees: f64) -> Self {
        Self {
            translate: (0.0, 0.0),
            rotate: degrees,
        }
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Map a local point into the parent's coordinate space.
    #[must_use]
    pub fn apply(&self, (x, y): (f64, f64)) -> (f64, f64) {
        let (rx, ry) = if self.rotate == 0.0 {
            (x, y)
        } else {
            let (sin, cos) = self.rotate.to_radians().sin_cos();
            (x * cos - y * sin, x * sin + y * cos)
        };
        (rx + self.translate.0, ry + self.translate.1)
    }
}

/// Horizontal text alignment relative to the text's `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// One post drawn as a circle.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    /// Post this circle stands for.
    pub idx: PostId,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: Rgb,
    /// Outline color; `None` draws no outline.
    pub stroke: Option<Rgb>,
    pub stroke_width: f64,
}

impl Circle {
    /// Radius that reacts to the pointer: the fill plus the painted half of
    /// the outline, if any.
    #[must_use]
    pub fn hit_radius(&self) -> f64 {
        match self.stroke {
            Some(_) => self.r + self.stroke_width / 2.0,
            None => self.r,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub x: f64,
    pub y: f64,
    pub content: String,
    pub anchor: TextAnchor,
    /// Font size in pixels.
    pub font_size: f64,
    pub bold: bool,
    /// Vertically center on `y` instead of sitting on the baseline.
    pub middle_baseline: bool,
    /// `None` inherits the document default (black).
    pub fill: Option<Rgb>,
}

impl Text {
    #[must_use]
    pub fn new(x: f64, y: f64, content: impl Into<String>) -> Self {
        Self {
            x,
            y,
            content: content.into(),
            anchor: TextAnchor::Start,
            font_size: 14.0,
            bold: false,
            middle_baseline: false,
            fill: None,
        }
    }

    #[must_use]
    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    #[must_use]
    pub fn font_size(mut self, px: f64) -> Self {
        self.font_size = px;
        self
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn middle_baseline(mut self) -> Self {
        self.middle_baseline = true;
        self
    }

    #[must_use]
    pub fn fill(mut self, color: Rgb) -> Self {
        self.fill = Some(color);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Rgb,
}

/// A transformed container of child nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    /// Class name emitted in exports, used to tell groups apart.
    pub class: Option<String>,
    pub transform: Transform,
    pub children: Vec<Node>,
}

impl Group {
    #[must_use]
    pub fn new(transform: Transform) -> Self {
        Self {
            class: None,
            transform,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    /// Direct child group with the given class.
    #[must_use]
    pub fn find_group(&self, class: &str) -> Option<&Group> {
        self.children.iter().find_map(|node| match node {
            Node::Group(g) if g.class.as_deref() == Some(class) => Some(g),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &Text> {
        self.children.iter().filter_map(|node| match node {
            Node::Text(t) => Some(t),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        self.children.iter().filter_map(|node| match node {
            Node::Rect(r) => Some(r),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Circle(Circle),
    Text(Text),
    Rect(Rect),
    Group(Group),
}

impl From<Circle> for Node {
    fn from(value: Circle) -> Self {
        Self::Circle(value)
    }
}

impl From<Text> for Node {
    fn from(value: Text) -> Self {
        Self::Text(value)
    }
}

impl From<Rect> for Node {
    fn from(value: Rect) -> Self {
        Self::Rect(value)
    }
}

impl From<Group> for Node {
    fn from(value: Group) -> Self {
        Self::Group(value)
    }
}

/// A circle with its center in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedCircle<'a> {
    pub circle: &'a Circle,
    pub x: f64,
    pub y: f64,
}

/// A complete drawing surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub root: Group,
}

impl Scene {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            root: Group::default(),
        }
    }

    /// Every circle in paint order, with surface-space centers.
    #[must_use]
    pub fn circles(&self) -> Vec<PlacedCircle<'_>> {
        let mut out = Vec::new();
        collect_circles(&self.root, &|p| self.root.transform.apply(p), &mut out);
        out
    }

    /// Post under the surface point `(x, y)`.
    ///
    /// Circles painted later sit on top, so they win ties. Rotation is
    /// assumed not to scale, which holds for every [`Transform`].
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&PostId> {
        self.circles()
            .into_iter()
            .rev()
            .find(|placed| {
                let r = placed.circle.hit_radius();
                (placed.x - x).hypot(placed.y - y) <= r
            })
            .map(|placed| &placed.circle.idx)
    }
}

fn collect_circles<'a>(
    group: &'a Group,
    to_surface: &dyn Fn((f64, f64)) -> (f64, f64),
    out: &mut Vec<PlacedCircle<'a>>,
) {
    for node in &group.children {
        match node {
            Node::Circle(circle) => {
                let (x, y) = to_surface((circle.cx, circle.cy));
                out.push(PlacedCircle { circle, x, y });
            }
            Node::Group(child) => {
                let compose = |p| to_surface(child.transform.apply(p));
                collect_circles(child, &compose, out);
            }
            Node::Text(_) | Node::Rect(_) => {}
        }
    }
}
