//! SVG renderer: converts `RenderCommand` lists into standalone SVG strings.

use minkowski_protocol::{RenderCommand, TextAlign, ThemeToken};

use crate::palette::Palette;

/// Render a list of commands as an SVG document string.
///
/// `width` and `height` define the SVG viewBox dimensions.
/// `dark` selects the color palette.
pub fn render_svg(commands: &[RenderCommand], width: f64, height: f64, dark: bool) -> String {
    let palette = Palette::from_dark(dark);
    let mut svg = String::with_capacity(commands.len() * 120);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:system-ui,-apple-system,sans-serif">"#,
    ));

    for cmd in commands {
        match cmd {
            RenderCommand::Clear { rect } => {
                let bg = palette.css(ThemeToken::Background);
                svg.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{bg}"/>"#,
                    rect.x, rect.y, rect.w, rect.h,
                ));
            }
            RenderCommand::DrawLine {
                from,
                to,
                color,
                width: line_width,
                dashed,
            } => {
                let stroke = palette.css(*color);
                let dash = if *dashed {
                    r#" stroke-dasharray="4 4""#
                } else {
                    ""
                };
                svg.push_str(&format!(
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{stroke}" stroke-width="{line_width}"{dash}/>"#,
                    from.x, from.y, to.x, to.y,
                ));
            }
            RenderCommand::FillRect { rect, color } => {
                svg.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
                    rect.x,
                    rect.y,
                    rect.w,
                    rect.h,
                    palette.css(*color),
                ));
            }
            RenderCommand::FillCircle {
                center,
                radius,
                color,
            } => {
                svg.push_str(&format!(
                    r#"<circle cx="{}" cy="{}" r="{radius}" fill="{}"/>"#,
                    center.x,
                    center.y,
                    palette.css(*color),
                ));
            }
            RenderCommand::DrawText {
                text,
                position,
                color,
                font_size,
                align,
            } => {
                let fill = palette.css(*color);
                let anchor = match align {
                    TextAlign::Left => "start",
                    TextAlign::Center => "middle",
                };
                svg.push_str(&format!(
                    r#"<text x="{}" y="{}" fill="{fill}" font-size="{font_size}" text-anchor="{anchor}" dominant-baseline="middle">{}</text>"#,
                    position.x,
                    position.y,
                    escape_xml(text),
                ));
            }
            // Nested <g> elements compose their transforms the same way the
            // command stack does.
            RenderCommand::PushTransform { coefficients } => {
                let [a, b, c, d, e, f] = coefficients;
                svg.push_str(&format!(
                    r#"<g transform="matrix({a} {b} {c} {d} {e} {f})">"#
                ));
            }
            RenderCommand::BeginGroup { id } => {
                svg.push_str(&format!(r#"<g id="{}">"#, escape_xml(id)));
            }
            RenderCommand::PopTransform | RenderCommand::EndGroup => svg.push_str("</g>"),
        }
    }

    svg.push_str("</svg>");
    svg
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DiagramSession, FrameState, Layout};

    #[test]
    fn basic_svg_output() {
        let session = DiagramSession::default();
        let svg = render_svg(&session.render(), 800.0, 600.0, false);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r#"<g id="frame-primed">"#));
        assert!(svg.contains("#0000ff"));
        assert!(svg.contains(r#"stroke-dasharray="4 4""#));
        assert!(svg.contains(">t′</text>"));
        assert_eq!(svg.matches("<g").count(), svg.matches("</g>").count());
    }

    #[test]
    fn contracted_observer_gets_a_matrix_group() {
        let state = FrameState {
            relativity: true,
            speed: 0.6,
            ..FrameState::default()
        };
        let session = DiagramSession::with_state(Layout::default(), state);
        let svg = render_svg(&session.render(), 800.0, 600.0, true);
        assert!(svg.contains(r#"<g transform="matrix(1 0 0 1 100 500)">"#));
        assert!(svg.contains("<circle"));
        assert!(svg.contains("#181818"));
    }

    #[test]
    fn escapes_xml_entities() {
        assert_eq!(escape_xml("a<b & 'c'"), "a&lt;b &amp; &apos;c&apos;");
    }
}
