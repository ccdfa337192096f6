use std::fmt::Write as _;

use crate::error::ChartResult;
use crate::render::{ChartOutput, InertNode, Renderer};

/// Serializes each mounted output to HTML text: a wrapper `div` carrying the
/// scoped class, a `style` element and the SVG tree.
#[derive(Debug, Default)]
pub struct MarkupRenderer {
    markup: String,
}

impl MarkupRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup of the most recent mount.
    #[must_use]
    pub fn markup(&self) -> &str {
        &self.markup
    }

    #[must_use]
    pub fn render_to_string(output: &ChartOutput) -> String {
        let mut out = String::new();
        let _ = write!(out, "<div class=\"{}\">", escape(&output.class_name));
        let css = output.style.to_css();
        if !css.is_empty() {
            let _ = write!(out, "<style>{}</style>", escape(&css));
        }
        write_node(&mut out, &output.tree);
        out.push_str("</div>");
        out
    }
}

impl Renderer for MarkupRenderer {
    fn mount(&mut self, output: &ChartOutput) -> ChartResult<()> {
        self.markup = Self::render_to_string(output);
        Ok(())
    }
}

fn write_node(out: &mut String, node: &InertNode) {
    let _ = write!(out, "<{}", node.tag);
    for (name, value) in &node.attributes {
        let _ = write!(out, " {name}=\"{}\"", escape(&value.to_string()));
    }
    if !node.styles.is_empty() {
        let inline = node
            .styles
            .iter()
            .map(|(name, value)| format!("{name}:{value}"))
            .collect::<Vec<_>>()
            .join(";");
        let _ = write!(out, " style=\"{}\"", escape(&inline));
    }
    out.push('>');
    if let Some(text) = &node.text {
        out.push_str(&escape(text));
    }
    for child in &node.children {
        write_node(out, child);
    }
    let _ = write!(out, "</{}>", node.tag);
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}
