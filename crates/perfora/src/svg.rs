//! SVG serialization of a [`Scene`].
//!
//! Two flavours of the same document. The preview flavour carries the
//! wave frame and a clip-path wrapping the content - what an interactive
//! front-end shows. The export flavour keeps the plain border and no
//! clip: the cut pattern itself, ready for CAM import.

use crate::geometry::Rect;
use crate::scene::{Frame, Scene};

/// Styles embedded in every emitted document.
const EMBEDDED_STYLES: &str = "\
.preview-rect { fill: none; stroke: #9aa4b5; stroke-width: 1; }\n\
.preview-wave-frame { fill: none; stroke: #9aa4b5; stroke-width: 1; }\n\
.hole { fill: #ffffff; stroke: #4b5563; stroke-width: 1; }\n\
.grid-line { stroke: #c5ccd8; stroke-width: 0.8; stroke-dasharray: 4 4; }";

const CLIP_ID: &str = "previewWaveClip";

/// Serialize the preview document: wave frame plus clipped content.
pub fn preview_svg(scene: &Scene) -> String {
    let mut svg = String::new();
    push_header(&mut svg, scene);

    let content = content_fragments(scene);
    match &scene.frame {
        Frame::Wave(frame) => {
            svg.push_str(&format!(
                "<path class=\"preview-wave-frame\" d=\"{}\" />\n",
                frame.path
            ));
            if content.is_empty() {
                // Nothing to clip.
            } else {
                svg.push_str(&format!(
                    "<defs><clipPath id=\"{}\" clipPathUnits=\"userSpaceOnUse\"><path d=\"{}\" /></clipPath></defs>\n",
                    CLIP_ID, frame.path
                ));
                svg.push_str(&format!("<g clip-path=\"url(#{})\">\n", CLIP_ID));
                for fragment in &content {
                    svg.push_str(fragment);
                }
                svg.push_str("</g>\n");
            }
        }
        Frame::Rect(rect) => {
            push_rect_border(&mut svg, rect);
            for fragment in &content {
                svg.push_str(fragment);
            }
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Serialize the export document: plain border, no clip.
pub fn export_svg(scene: &Scene) -> String {
    let mut svg = String::new();
    push_header(&mut svg, scene);
    push_rect_border(&mut svg, &scene.viewport);
    for fragment in content_fragments(scene) {
        svg.push_str(&fragment);
    }
    svg.push_str("</svg>\n");
    svg
}

fn push_header(svg: &mut String, scene: &Scene) {
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {} {}\" width=\"{}\" height=\"{}\">\n",
        scene.width_px, scene.height_px, scene.width_px, scene.height_px
    ));
    svg.push_str(&format!("<style>{}</style>\n", EMBEDDED_STYLES));
}

fn push_rect_border(svg: &mut String, rect: &Rect) {
    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" class=\"preview-rect\" />\n",
        rect.left, rect.top, rect.width, rect.height
    ));
}

/// Grid lines first, then holes, so circles paint on top.
fn content_fragments(scene: &Scene) -> Vec<String> {
    let mut fragments = Vec::new();
    for line in &scene.layout.grid_lines {
        fragments.push(format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" class=\"grid-line\" />\n",
            line.x1, line.y1, line.x2, line.y2
        ));
    }
    for hole in &scene.layout.holes {
        fragments.push(format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" class=\"hole\" />\n",
            hole.cx, hole.cy, hole.r
        ));
    }
    fragments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Params;
    use crate::scene::{build_scene, SceneOptions};

    #[test]
    fn preview_clips_content_inside_wave() {
        let scene = build_scene(&Params::default(), SceneOptions::default());
        let svg = preview_svg(&scene);
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains("<style>"));
        assert!(svg.contains("preview-wave-frame"));
        assert!(svg.contains("clipPath id=\"previewWaveClip\""));
        assert!(svg.contains("clip-path=\"url(#previewWaveClip)\""));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<circle").count(), scene.holes_drawn());
    }

    #[test]
    fn preview_without_wave_uses_plain_rect() {
        let options = SceneOptions {
            wave: false,
            ..SceneOptions::default()
        };
        let scene = build_scene(&Params::default(), options);
        let svg = preview_svg(&scene);
        assert!(svg.contains("class=\"preview-rect\""));
        assert!(!svg.contains("clip-path"));
    }

    #[test]
    fn export_never_clips() {
        let scene = build_scene(&Params::default(), SceneOptions::default());
        let svg = export_svg(&scene);
        assert!(svg.contains("class=\"preview-rect\""));
        assert!(!svg.contains("clipPath"));
        assert_eq!(svg.matches("<circle").count(), scene.holes_drawn());
    }

    #[test]
    fn grid_lines_serialize_when_enabled() {
        let params = Params {
            show_grid: true,
            ..Params::default()
        };
        let scene = build_scene(&params, SceneOptions::default());
        let svg = export_svg(&scene);
        assert_eq!(
            svg.matches("class=\"grid-line\"").count(),
            scene.layout.grid_lines.len()
        );
    }
}
