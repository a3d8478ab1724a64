#![forbid(unsafe_code)]

//! SVG export for scenes and the gradient legend.

use std::fmt::Write;

use sentiscope_style::Rgb;

use crate::legend::LegendView;
use crate::scene::{Group, Node, Scene, Text, Transform};

/// Configuration for SVG export.
#[derive(Debug, Clone)]
pub struct SvgExporter {
    /// Font family applied to the whole document.
    pub font_family: String,
    /// Background fill; `None` leaves the document transparent.
    pub background: Option<Rgb>,
    /// Prefix the output with an XML declaration, for standalone files.
    pub xml_declaration: bool,
}

impl Default for SvgExporter {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".into(),
            background: None,
            xml_declaration: false,
        }
    }
}

impl SvgExporter {
    /// Standalone-file settings: XML declaration and white background.
    #[must_use]
    pub fn standalone() -> Self {
        Self {
            background: Some(Rgb::WHITE),
            xml_declaration: true,
            ..Self::default()
        }
    }

    /// Export a scene to an SVG string.
    ///
    /// Circles carry a `data-idx` attribute with their post id so a host page
    /// can map pointer events back to posts without redoing the hit test.
    pub fn export(&self, scene: &Scene) -> String {
        let _span = tracing::debug_span!("svg_export").entered();
        let mut out = String::with_capacity(4096);
        self.open(&mut out, scene.width, scene.height);
        write_group(&mut out, &scene.root);
        out.push_str("</svg>");
        out
    }

    /// Export the gradient legend bar with its end captions.
    pub fn export_legend(&self, legend: &LegendView) -> String {
        let mut out = String::with_capacity(1024);
        // Room below the bar for the captions.
        self.open(&mut out, legend.width, legend.caption_y() + 5.0);

        let id = escape(&legend.gradient_id());
        write!(
            out,
            "<defs><linearGradient id=\"{id}\" x1=\"0%\" y1=\"0%\" x2=\"100%\" y2=\"0%\">"
        )
        .unwrap();
        for (offset, color) in &legend.stops {
            write!(
                out,
                "<stop offset=\"{}%\" stop-color=\"{color}\"/>",
                num(offset * 100.0)
            )
            .unwrap();
        }
        out.push_str("</linearGradient></defs>");

        write!(
            out,
            "<rect width=\"{}\" height=\"{}\" fill=\"url(#{id})\"/>",
            num(legend.width),
            num(legend.height)
        )
        .unwrap();
        let y = num(legend.caption_y());
        write!(
            out,
            "<text x=\"0\" y=\"{y}\" text-anchor=\"start\" font-size=\"12px\">{}</text>",
            escape(legend.low_label)
        )
        .unwrap();
        write!(
            out,
            "<text x=\"{}\" y=\"{y}\" text-anchor=\"end\" font-size=\"12px\">{}</text>",
            num(legend.width),
            escape(legend.high_label)
        )
        .unwrap();
        out.push_str("</svg>");
        out
    }

    fn open(&self, out: &mut String, width: f64, height: f64) {
        if self.xml_declaration {
            out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        }
        let (w, h) = (num(width), num(height));
        write!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" \
             viewBox=\"0 0 {w} {h}\" font-family=\"{}\">",
            escape(&self.font_family)
        )
        .unwrap();
        if let Some(bg) = self.background {
            write!(out, "<rect width=\"100%\" height=\"100%\" fill=\"{bg}\"/>").unwrap();
        }
    }
}

fn write_group(out: &mut String, group: &Group) {
    let is_plain = group.class.is_none() && group.transform.is_identity();
    if !is_plain {
        out.push_str("<g");
        if let Some(class) = &group.class {
            write!(out, " class=\"{}\"", escape(class)).unwrap();
        }
        if !group.transform.is_identity() {
            write!(out, " transform=\"{}\"", transform_attr(group.transform)).unwrap();
        }
        out.push('>');
    }
    for node in &group.children {
        write_node(out, node);
    }
    if !is_plain {
        out.push_str("</g>");
    }
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Circle(c) => {
            write!(
                out,
                "<circle data-idx=\"{}\" cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"",
                escape(&c.idx.to_string()),
                num(c.cx),
                num(c.cy),
                num(c.r),
                c.fill
            )
            .unwrap();
            match c.stroke {
                Some(stroke) => {
                    write!(out, " stroke=\"{stroke}\"").unwrap();
                }
                None => out.push_str(" stroke=\"none\""),
            }
            write!(out, " stroke-width=\"{}\"/>", num(c.stroke_width)).unwrap();
        }
        Node::Text(t) => write_text(out, t),
        Node::Rect(r) => {
            write!(
                out,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
                num(r.x),
                num(r.y),
                num(r.width),
                num(r.height),
                r.fill
            )
            .unwrap();
        }
        Node::Group(g) => write_group(out, g),
    }
}

fn write_text(out: &mut String, t: &Text) {
    write!(
        out,
        "<text x=\"{}\" y=\"{}\" text-anchor=\"{}\" font-size=\"{}px\"",
        num(t.x),
        num(t.y),
        t.anchor.as_str(),
        num(t.font_size)
    )
    .unwrap();
    if t.bold {
        out.push_str(" font-weight=\"bold\"");
    }
    if t.middle_baseline {
        out.push_str(" alignment-baseline=\"middle\"");
    }
    if let Some(fill) = t.fill {
        write!(out, " fill=\"{fill}\"").unwrap();
    }
    write!(out, ">{}</text>", escape(&t.content)).unwrap();
}

fn transform_attr(t: Transform) -> String {
    let mut parts = Vec::new();
    if t.translate != (0.0, 0.0) {
        parts.push(format!("translate({}, {})", num(t.translate.0), num(t.translate.1)));
    }
    if t.rotate != 0.0 {
        parts.push(format!("rotate({})", num(t.rotate)));
    }
    parts.join(" ")
}

/// Format a coordinate with at most three decimals and no trailing zeros.
pub(crate) fn num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    // Avoid printing "-0".
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{rounded}")
}

pub(crate) fn escape(value: &str) -> String {
    v_htmlescape::escape(value).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Circle, Rect, TextAnchor};
    use sentiscope_core::{Metric, PostId};

    fn circle(idx: &str, stroke: Option<Rgb>) -> Circle {
        Circle {
            idx: PostId::from(idx),
            cx: 10.0,
            cy: 20.5,
            r: 4.0,
            fill: Rgb::NEUTRAL,
            stroke,
            stroke_width: 2.0,
        }
    }

    #[test]
    fn number_formatting() {
        assert_eq!(num(120.0), "120");
        assert_eq!(num(213.333_333_3), "213.333");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(-90.0), "-90");
    }

    #[test]
    fn svg_basic_structure() {
        let svg = SvgExporter::default().export(&Scene::new(1300.0, 700.0));
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains("width=\"1300\" height=\"700\""));
        assert!(!svg.contains("<rect"));
    }

    #[test]
    fn standalone_has_declaration_and_background() {
        let svg = SvgExporter::standalone().export(&Scene::new(10.0, 10.0));
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("<rect width=\"100%\" height=\"100%\" fill=\"#FFFFFF\"/>"));
    }

    #[test]
    fn circles_carry_idx_and_stroke() {
        let mut scene = Scene::new(100.0, 100.0);
        scene.root.push(circle("a\"b", None));
        scene.root.push(circle("7", Some(Rgb::BLACK)));
        let svg = SvgExporter::default().export(&scene);
        assert!(svg.contains("data-idx=\"a&quot;b\""));
        assert!(svg.contains("cx=\"10\" cy=\"20.5\" r=\"4\" fill=\"#ECECEC\" stroke=\"none\""));
        assert!(svg.contains("data-idx=\"7\""));
        assert!(svg.contains("stroke=\"#000000\" stroke-width=\"2\""));
    }

    #[test]
    fn groups_emit_transforms() {
        let mut scene = Scene::new(100.0, 100.0);
        let mut plot = Group::new(Transform::translate(120.0, 30.0)).class("plot");
        let mut axis = Group::new(Transform::rotate(-90.0));
        axis.push(Text::new(-320.0, -60.0, "Dimension 2").anchor(TextAnchor::Middle));
        plot.push(axis);
        plot.push(Rect {
            x: 0.0,
            y: 20.0,
            width: 10.0,
            height: 10.0,
            fill: Rgb::BLUE,
        });
        scene.root.push(plot);

        let svg = SvgExporter::default().export(&scene);
        assert!(svg.contains("<g class=\"plot\" transform=\"translate(120, 30)\">"));
        assert!(svg.contains("<g transform=\"rotate(-90)\">"));
        assert!(svg.contains("text-anchor=\"middle\""));
        assert!(svg.contains(">Dimension 2</text>"));
        assert!(svg.contains("<rect x=\"0\" y=\"20\" width=\"10\" height=\"10\" fill=\"#4467C4\"/>"));
    }

    #[test]
    fn text_is_escaped_and_styled() {
        let mut scene = Scene::new(100.0, 100.0);
        scene.root.push(
            Text::new(-10.0, 5.0, "<Jan & Feb>")
                .anchor(TextAnchor::End)
                .bold()
                .middle_baseline()
                .fill(Rgb::LABEL),
        );
        let svg = SvgExporter::default().export(&scene);
        assert!(svg.contains("&lt;Jan &amp; Feb&gt;"));
        assert!(svg.contains("font-weight=\"bold\""));
        assert!(svg.contains("alignment-baseline=\"middle\""));
        assert!(svg.contains("fill=\"#333333\""));
    }

    #[test]
    fn legend_gradient() {
        let svg = SvgExporter::default().export_legend(&LegendView::new(Metric::Sentiment));
        assert!(svg.contains("<linearGradient id=\"gradient-Sentiment\""));
        assert!(svg.contains("<stop offset=\"0%\" stop-color=\"#FF0000\"/>"));
        assert!(svg.contains("<stop offset=\"50%\" stop-color=\"#ECECEC\"/>"));
        assert!(svg.contains("<stop offset=\"100%\" stop-color=\"#008000\"/>"));
        assert!(svg.contains("fill=\"url(#gradient-Sentiment)\""));
        assert!(svg.contains(">Negative</text>"));
        assert!(svg.contains("x=\"200\" y=\"35\" text-anchor=\"end\""));
    }
}
