//! Fixed-layout step diagrams.
//!
//! Layout (960 x 540): a header band with the step title and query subtitle,
//! a structure silhouette on the left with a hazard overlay, a key-checks
//! panel on the right, and a hazard badge under the panel.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use hazardwise_core::{GuidanceStep, Hazard, LocationContext, StructureType};

use crate::svg::{Document, Element};

pub const WIDTH: u32 = 960;
pub const HEIGHT: u32 = 540;
pub const DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";
/// Checks listed in the side panel; the rest stay in the report text.
pub const PANEL_CHECKS: usize = 3;

const GROUND_Y: f64 = 430.0;
const FONT_BOLD: &str = "bold";
const DISCLAIMER: &str = "Illustrative guidance only. Confirm details with a qualified engineer.";

struct Palette {
    sky: &'static str,
    ground: &'static str,
    wall: &'static str,
    roof: &'static str,
    trim: &'static str,
    accent: &'static str,
    overlay: &'static str,
}

fn palette(hazard: Hazard) -> Palette {
    match hazard {
        Hazard::Flood => Palette {
            sky: "#e8f4fc",
            ground: "#8fb3c9",
            wall: "#5b8db8",
            roof: "#2f5f8a",
            trim: "#1d3b57",
            accent: "#1f78b4",
            overlay: "#3fa7e0",
        },
        Hazard::Earthquake => Palette {
            sky: "#fbf1e6",
            ground: "#b08a5a",
            wall: "#c9834a",
            roof: "#8a4b22",
            trim: "#4e2a12",
            accent: "#e06a1b",
            overlay: "#7a3e12",
        },
    }
}

/// Cut `s` to at most `max` characters, ending in an ellipsis when shortened.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn with_ellipsis(s: &str, width: usize) -> String {
    if s.chars().count() < width {
        format!("{s}…")
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

/// Greedy word wrap into at most `max_lines` lines of `width` characters.
///
/// Text that does not fit is dropped and the last line ends in an ellipsis.
pub fn wrap(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    if max_lines == 0 || width == 0 {
        return lines;
    }

    let mut current = String::new();
    let mut overflow = false;
    for word in text.split_whitespace() {
        let used = current.chars().count();
        if used == 0 {
            current = truncate(word, width);
        } else if used + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            if lines.len() == max_lines {
                overflow = true;
                break;
            }
            current = truncate(word, width);
        }
    }

    if overflow {
        if let Some(last) = lines.last_mut() {
            *last = with_ellipsis(last, width);
        }
    } else if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn masonry_house(p: &Palette) -> Vec<Element> {
    vec![
        Element::rect(160.0, 420.0, 270.0, 10.0, p.trim),
        Element::rect(170.0, 280.0, 250.0, 140.0, p.wall),
        Element::polygon(&[(150.0, 280.0), (295.0, 200.0), (440.0, 280.0)], p.roof),
        Element::rect(275.0, 350.0, 40.0, 70.0, p.trim),
        Element::rect(195.0, 310.0, 45.0, 40.0, p.sky),
        Element::rect(350.0, 310.0, 45.0, 40.0, p.sky),
    ]
}

fn rc_frame(p: &Palette) -> Vec<Element> {
    let mut out = vec![Element::rect(200.0, 175.0, 200.0, 255.0, p.wall)];
    for floor in 0..3 {
        let top = 175.0 + 85.0 * floor as f64;
        out.push(Element::rect(190.0, top - 6.0, 220.0, 12.0, p.roof));
        for bay in 0..2 {
            let x = 220.0 + 100.0 * bay as f64;
            out.push(Element::rect(x, top + 25.0, 60.0, 40.0, p.sky));
        }
    }
    for x in [200.0, 300.0, 400.0] {
        out.push(Element::line(x, 175.0, x, GROUND_Y, p.roof, 8.0));
    }
    out
}

fn school_block(p: &Palette) -> Vec<Element> {
    let mut out = vec![
        Element::rect(80.0, 290.0, 440.0, 140.0, p.wall),
        Element::rect(70.0, 278.0, 460.0, 14.0, p.roof),
        Element::rect(250.0, 250.0, 100.0, 24.0, p.trim),
        Element::rect(280.0, 360.0, 40.0, 70.0, p.trim),
    ];
    for i in 0..6 {
        let x = 100.0 + 70.0 * i as f64;
        out.push(Element::rect(x, 310.0, 45.0, 40.0, p.sky));
    }
    out
}

fn bridge_approach(p: &Palette) -> Vec<Element> {
    let embankment = [
        (40.0, GROUND_Y),
        (200.0, 330.0),
        (240.0, 330.0),
        (240.0, GROUND_Y),
    ];
    vec![
        Element::polygon(&embankment, p.roof),
        Element::rect(330.0, 330.0, 22.0, 100.0, p.trim),
        Element::rect(470.0, 330.0, 22.0, 100.0, p.trim),
        Element::rect(200.0, 312.0, 380.0, 18.0, p.wall),
        Element::line(200.0, 305.0, 580.0, 305.0, p.roof, 4.0),
    ]
}

fn silhouette(structure_type: StructureType, p: &Palette) -> Vec<Element> {
    match structure_type {
        StructureType::MasonryHouse => masonry_house(p),
        StructureType::RcFrame => rc_frame(p),
        StructureType::SchoolBlock => school_block(p),
        StructureType::BridgeApproach => bridge_approach(p),
    }
}

/// Quadratic wave from x=40 to x=580 at height `y`.
fn wave_path(y: f64) -> String {
    let mut d = format!("M40.0,{y:.1} Q55.0,{:.1} 70.0,{y:.1}", y - 8.0);
    let mut x = 100.0;
    while x <= 580.0 {
        d.push_str(&format!(" T{x:.1},{y:.1}"));
        x += 30.0;
    }
    d
}

/// Vertical zigzag centred on `x`.
fn zigzag(x: f64, top: f64, bottom: f64, amplitude: f64) -> Vec<(f64, f64)> {
    let mut points = Vec::new();
    let mut y = top;
    let mut i = 0;
    while y <= bottom {
        let dx = if i % 2 == 0 { -amplitude } else { amplitude };
        points.push((x + dx, y));
        y += 15.0;
        i += 1;
    }
    points
}

fn hazard_overlay(hazard: Hazard, p: &Palette) -> Vec<Element> {
    match hazard {
        Hazard::Flood => {
            let water = Element::rect(40.0, 395.0, 540.0, 35.0, p.overlay);
            let mut out = vec![water.attr("opacity", 0.35)];
            for y in [392.0, 410.0, 428.0] {
                out.push(
                    Element::new("path")
                        .attr("d", wave_path(y))
                        .attr("fill", "none")
                        .attr("stroke", p.overlay)
                        .attr("stroke-width", 3),
                );
            }
            out
        }
        Hazard::Earthquake => {
            let fault: Vec<(f64, f64)> = (0..=18)
                .map(|i| {
                    let y = if i % 2 == 0 { 438.0 } else { 452.0 };
                    (40.0 + 30.0 * i as f64, y)
                })
                .collect();
            vec![
                Element::polyline(&fault, p.overlay, 3.0),
                Element::polyline(&zigzag(300.0, 300.0, 420.0, 10.0), p.overlay, 3.0),
                Element::polyline(&zigzag(56.0, 220.0, 330.0, 8.0), p.accent, 2.5),
                Element::polyline(&zigzag(566.0, 220.0, 330.0, 8.0), p.accent, 2.5),
            ]
        }
    }
}

fn check_panel(
    location: &LocationContext,
    hazard: Hazard,
    step: &GuidanceStep,
    p: &Palette,
) -> Vec<Element> {
    let heading = Element::label(632.0, 156.0, 18, p.trim, "Key checks");
    let mut out = vec![
        Element::rect(610.0, 120.0, 310.0, 290.0, "#ffffff")
            .attr("rx", 14)
            .attr("stroke", p.accent)
            .attr("stroke-width", 2),
        heading.attr("font-weight", FONT_BOLD),
    ];

    if step.key_checks.is_empty() {
        let hint = "Follow the step description.";
        out.push(Element::label(632.0, 190.0, 14, p.trim, hint));
    }

    for (i, check) in step.key_checks.iter().take(PANEL_CHECKS).enumerate() {
        let y = 190.0 + 70.0 * i as f64;
        out.push(
            Element::new("circle")
                .attr("cx", 646)
                .attr("cy", y - 5.0)
                .attr("r", 13)
                .attr("fill", p.accent),
        );
        let number = Element::label(641.0, y, 14, "#ffffff", (i + 1).to_string());
        out.push(number.attr("font-weight", FONT_BOLD));
        for (j, line) in wrap(check, 28, 2).into_iter().enumerate() {
            let line_y = y + 20.0 * j as f64;
            out.push(Element::label(670.0, line_y, 14, p.trim, line));
        }
    }

    let intensity = location.province_profile.hazard_intensity(hazard);
    let percent = intensity.clamp(0.0, 1.0) * 100.0;
    let regional = format!("Regional {} intensity {percent:.0}%", hazard.as_str());
    out.push(Element::label(632.0, 396.0, 13, p.roof, regional));
    out
}

fn badge(hazard: Hazard, p: &Palette) -> Vec<Element> {
    let text = format!("{} HAZARD", hazard.as_str().to_uppercase());
    let label = Element::label(632.0, 459.0, 18, "#ffffff", text);
    vec![
        Element::rect(610.0, 430.0, 230.0, 44.0, p.accent).attr("rx", 22),
        label.attr("font-weight", FONT_BOLD),
    ]
}

/// The raw SVG markup for one step. `step_index` is zero-based.
pub fn render_svg(
    location: &LocationContext,
    hazard: Hazard,
    structure_type: StructureType,
    step: &GuidanceStep,
    step_index: usize,
) -> String {
    let p = palette(hazard);
    let title = truncate(&format!("Step {}: {}", step_index + 1, step.title), 60);
    let subtitle = truncate(
        &format!(
            "{} | {}, {} | {} mitigation",
            structure_type, location.city, location.province, hazard
        ),
        90,
    );

    let (w, h) = (f64::from(WIDTH), f64::from(HEIGHT));
    let heading = Element::label(40.0, 48.0, 26, "#ffffff", title);
    let structure = Element::new("g").attr("id", "structure");
    let overlay = Element::new("g").attr("id", "hazard");
    let checks = Element::new("g").attr("id", "checks");

    let mut doc = Document::new(WIDTH, HEIGHT);
    doc.push(Element::rect(0.0, 0.0, w, h, p.sky))
        .push(Element::rect(0.0, 0.0, w, 100.0, p.accent))
        .push(heading.attr("font-weight", FONT_BOLD))
        .push(Element::label(40.0, 80.0, 16, "#ffffff", subtitle))
        .push(Element::rect(0.0, GROUND_Y, w, h - GROUND_Y, p.ground))
        .push(structure.children(silhouette(structure_type, &p)))
        .push(overlay.children(hazard_overlay(hazard, &p)))
        .push(checks.children(check_panel(location, hazard, step, &p)))
        .extend(badge(hazard, &p))
        .push(Element::label(40.0, 515.0, 12, "#ffffff", DISCLAIMER));
    doc.render()
}

/// The step diagram as a base64 `image/svg+xml` data URI.
pub fn render(
    location: &LocationContext,
    hazard: Hazard,
    structure_type: StructureType,
    step: &GuidanceStep,
    step_index: usize,
) -> String {
    let svg = render_svg(location, hazard, structure_type, step, step_index);
    format!("{DATA_URI_PREFIX}{}", BASE64.encode(svg.as_bytes()))
}

/// Text caption describing what the diagram shows.
pub fn caption(
    location: &LocationContext,
    hazard: Hazard,
    structure_type: StructureType,
    step: &GuidanceStep,
    step_index: usize,
) -> String {
    let checks = if step.key_checks.is_empty() {
        "the site-specific checks".to_string()
    } else {
        step.key_checks
            .iter()
            .take(PANEL_CHECKS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("; ")
    };
    format!(
        "Step {n} diagram: \"{title}\" for a {structure} facing {hazard} risk in {city}, \
         {province}. Highlights: {checks}.",
        n = step_index + 1,
        title = step.title,
        structure = structure_type,
        hazard = hazard,
        city = location.city,
        province = location.province,
    )
}
