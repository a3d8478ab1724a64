#![forbid(unsafe_code)]

//! HTML export of the whole dashboard page.

use crate::detail::DetailList;
use crate::legend::LegendView;
use crate::scene::Scene;
use crate::svg::{SvgExporter, escape};

/// Shown in place of the plot before any posts are loaded.
pub const NO_DATA_MESSAGE: &str = "Load a JSON file of posts to see the plot.";

/// Configuration for HTML export.
#[derive(Debug, Clone)]
pub struct HtmlExporter {
    /// Page `<title>` and top heading.
    pub title: String,
    /// Exporter used for the embedded plot and legend.
    pub svg: SvgExporter,
}

impl Default for HtmlExporter {
    fn default() -> Self {
        Self {
            title: "Sentiscope".into(),
            svg: SvgExporter::default(),
        }
    }
}

impl HtmlExporter {
    #[must_use]
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Export a complete page: plot (or a placeholder), legend, and the
    /// selected-post list.
    pub fn export(&self, scene: Option<&Scene>, legend: &LegendView, details: &DetailList) -> String {
        let _span = tracing::debug_span!("html_export", has_scene = scene.is_some()).entered();
        let mut html = String::with_capacity(8192);

        html.push_str(
            "<!doctype html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\">\n  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
        );
        html.push_str(&format!("  <title>{}</title>\n", escape(&self.title)));
        html.push_str("</head>\n<body>\n");
        html.push_str(&format!("<h1>{}</h1>\n", escape(&self.title)));

        html.push_str("<div class=\"visualization-container\">\n");
        match scene {
            Some(scene) => {
                html.push_str(&self.svg.export(scene));
                html.push('\n');
            }
            None => html.push_str(&format!("<p class=\"empty\">{}</p>\n", escape(NO_DATA_MESSAGE))),
        }
        html.push_str("</div>\n");

        html.push_str(&self.export_legend(legend));
        html.push_str(&self.export_details(details));
        html.push_str("</body>\n</html>\n");
        html
    }

    /// Legend block: title heading plus the gradient bar.
    pub fn export_legend(&self, legend: &LegendView) -> String {
        let mut html = String::from("<div class=\"legend\">\n");
        html.push_str(&format!("<h3>{}</h3>\n", escape(&legend.title())));
        html.push_str(&self.svg.export_legend(legend));
        html.push_str("\n</div>\n");
        html
    }

    /// Selected-post block. Entries carry `data-idx` so a host page can send
    /// the matching toggle back.
    pub fn export_details(&self, details: &DetailList) -> String {
        let mut html = String::from("<div class=\"selected-posts\">\n");
        html.push_str(&format!("<h3>{}</h3>\n", escape(details.heading())));
        if let Some(message) = details.placeholder() {
            html.push_str(&format!("<p>{}</p>\n", escape(message)));
        }
        for entry in details.entries() {
            html.push_str(&format!(
                "<div class=\"post\" data-idx=\"{}\"><p>{}</p></div>\n",
                escape(&entry.idx.to_string()),
                escape(&entry.text)
            ));
        }
        html.push_str("</div>\n");
        html
    }
}
