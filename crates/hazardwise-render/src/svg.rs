//! Minimal SVG element tree.
//!
//! Every attribute value and text node goes through [`escape`] on output, so
//! callers can pass user-supplied titles and checks straight in.

use std::borrow::Cow;
use std::fmt::{self, Display, Write as _};

/// Escape the five XML-significant characters.
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Display) -> Self {
        self.attrs.push((name, value.to_string()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn rect(x: f64, y: f64, width: f64, height: f64, fill: &str) -> Self {
        Self::new("rect")
            .attr("x", x)
            .attr("y", y)
            .attr("width", width)
            .attr("height", height)
            .attr("fill", fill)
    }

    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str, width: f64) -> Self {
        Self::new("line")
            .attr("x1", x1)
            .attr("y1", y1)
            .attr("x2", x2)
            .attr("y2", y2)
            .attr("stroke", stroke)
            .attr("stroke-width", width)
    }

    pub fn polygon(points: &[(f64, f64)], fill: &str) -> Self {
        Self::new("polygon")
            .attr("points", point_list(points))
            .attr("fill", fill)
    }

    pub fn polyline(points: &[(f64, f64)], stroke: &str, width: f64) -> Self {
        Self::new("polyline")
            .attr("points", point_list(points))
            .attr("fill", "none")
            .attr("stroke", stroke)
            .attr("stroke-width", width)
    }

    pub fn label(x: f64, y: f64, size: u32, fill: &str, text: impl Into<String>) -> Self {
        Self::new("text")
            .attr("x", x)
            .attr("y", y)
            .attr("font-family", "Helvetica, Arial, sans-serif")
            .attr("font-size", size)
            .attr("fill", fill)
            .text(text)
    }

    fn write_to(&self, out: &mut String) -> fmt::Result {
        write!(out, "<{}", self.tag)?;
        for (name, value) in &self.attrs {
            write!(out, " {name}=\"{}\"", escape(value))?;
        }
        if self.text.is_none() && self.children.is_empty() {
            return out.write_str("/>");
        }
        out.write_char('>')?;
        if let Some(text) = &self.text {
            out.write_str(&escape(text))?;
        }
        for child in &self.children {
            child.write_to(out)?;
        }
        write!(out, "</{}>", self.tag)
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_to(&mut out)?;
        f.write_str(&out)
    }
}

/// `x,y x,y ...` with one decimal.
pub fn point_list(points: &[(f64, f64)]) -> String {
    let mut out = String::with_capacity(points.len() * 12);
    for (i, (x, y)) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{x:.1},{y:.1}");
    }
    out
}

/// Root `<svg>` document of a fixed pixel size.
#[derive(Debug, Clone)]
pub struct Document {
    width: u32,
    height: u32,
    body: Vec<Element>,
}

impl Document {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            body: Vec::new(),
        }
    }

    pub fn push(&mut self, element: Element) -> &mut Self {
        self.body.push(element);
        self
    }

    pub fn extend(&mut self, elements: impl IntoIterator<Item = Element>) -> &mut Self {
        self.body.extend(elements);
        self
    }

    pub fn render(&self) -> String {
        Element::new("svg")
            .attr("xmlns", "http://www.w3.org/2000/svg")
            .attr("width", self.width)
            .attr("height", self.height)
            .attr("viewBox", format!("0 0 {} {}", self.width, self.height))
            .children(self.body.iter().cloned())
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_special_characters() {
        assert_eq!(
            escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn escape_plain_text_borrows() {
        assert!(matches!(escape("Raise plinth"), Cow::Borrowed(_)));
    }

    #[test]
    fn empty_element_self_closes() {
        let e = Element::rect(0.0, 1.5, 10.0, 20.0, "#fff");
        assert_eq!(
            e.to_string(),
            r##"<rect x="0" y="1.5" width="10" height="20" fill="#fff"/>"##
        );
    }

    #[test]
    fn text_and_attributes_are_escaped() {
        let e = Element::new("text")
            .attr("data-note", "a\"b")
            .text("</text><script>");
        assert_eq!(
            e.to_string(),
            "<text data-note=\"a&quot;b\">&lt;/text&gt;&lt;script&gt;</text>"
        );
    }

    #[test]
    fn nested_children_render_in_order() {
        let g = Element::new("g")
            .child(Element::new("a"))
            .child(Element::new("b").text("x"));
        assert_eq!(g.to_string(), "<g><a/><b>x</b></g>");
    }

    #[test]
    fn point_list_formats_one_decimal() {
        assert_eq!(point_list(&[(1.0, 2.26), (3.5, 4.0)]), "1.0,2.3 3.5,4.0");
    }

    #[test]
    fn document_wraps_body_in_svg_root() {
        let mut doc = Document::new(100, 50);
        doc.push(Element::new("g"));
        let s = doc.render();
        assert!(s.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="100""#));
        assert!(s.contains(r#" height="50" viewBox="0 0 100 50"><g/>"#));
        assert!(s.ends_with("<g/></svg>"));
    }
}
