use crate::layout::WiringLayout;
use crate::path::{MarkerPlacement, PathDescriptor, PathRenderer, marker_defs};
use std::fmt::{self, Write};

pub struct SvgRenderer {
    pub wire_class: String,
    pub ghost_class: String,
    pub hot_class: String,
    /// Embed a default stylesheet; turn off when the host page styles wires.
    pub embed_style: bool,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            wire_class: "wire".to_string(),
            ghost_class: "ghostwire".to_string(),
            hot_class: "hot".to_string(),
            embed_style: true,
        }
    }
}

impl SvgRenderer {
    /// Render the wiring pane for a layout. Wires whose relation class is in
    /// `hot` are highlighted and drawn on top of all others.
    pub fn render(&self, layout: &WiringLayout, base: &str, hot: &[String]) -> String {
        let paths = PathRenderer::for_layout(base, layout).render(layout);
        WiringSvg {
            renderer: self,
            layout,
            base,
            paths: &paths,
            hot,
        }
        .to_string()
    }

    fn write_path(
        &self,
        out: &mut String,
        path: &PathDescriptor,
        ghost: bool,
        hot: bool,
    ) -> fmt::Result {
        let hot_class = if hot {
            format!(" {}", self.hot_class)
        } else {
            String::new()
        };
        if ghost {
            return write!(
                out,
                r#"<path class="{} {}{}" d="{}" />"#,
                escape_xml(&self.ghost_class),
                escape_xml(&path.relation),
                escape_xml(&hot_class),
                path.d()
            );
        }
        let marker = match (&path.marker, path.marker_placement) {
            (Some(id), MarkerPlacement::Start) => {
                format!(r#" marker-start="url(#{})""#, escape_xml(id))
            }
            (Some(id), MarkerPlacement::End) => {
                format!(r#" marker-end="url(#{})""#, escape_xml(id))
            }
            (None, _) => String::new(),
        };
        write!(
            out,
            r#"<path class="{}{}"{} d="{}" />"#,
            escape_xml(&path.classes(&self.wire_class)),
            escape_xml(&hot_class),
            marker,
            path.d()
        )
    }
}

struct WiringSvg<'a> {
    renderer: &'a SvgRenderer,
    layout: &'a WiringLayout,
    base: &'a str,
    paths: &'a [PathDescriptor],
    hot: &'a [String],
}

impl fmt::Display for WiringSvg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.layout.pane_width();
        let height = self.layout.height;
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" overflow="visible">"#,
            width, height
        )?;

        if self.renderer.embed_style {
            writeln!(f, "<style>{}</style>", DEFAULT_STYLE)?;
        }

        writeln!(f, "<defs>")?;
        for m in marker_defs(self.base) {
            writeln!(
                f,
                r#"<marker id="{}" class="{}" stroke="none" markerWidth="{}" markerHeight="{}" refX="{}" refY="{}"><path d="{}" /></marker>"#,
                escape_xml(&m.id),
                escape_xml(&m.class_name),
                m.width, m.height, m.ref_x, m.ref_y, m.path
            )?;
        }
        writeln!(f, "</defs>")?;

        // Ghost and visible path of each wire, hot ones sorted to the end
        // while keeping their relative order.
        let mut elements: Vec<(bool, String)> = Vec::with_capacity(self.paths.len() * 2);
        for path in self.paths {
            let hot = self.hot.contains(&path.relation);
            for ghost in [true, false] {
                let mut element = String::new();
                self.renderer.write_path(&mut element, path, ghost, hot)?;
                elements.push((hot, element));
            }
        }
        elements.sort_by_key(|(hot, _)| *hot);
        let any_hot = elements.last().is_some_and(|(hot, _)| *hot);

        if any_hot {
            writeln!(f, r#"<g class="{}">"#, escape_xml(&self.renderer.hot_class))?;
        } else {
            writeln!(f, "<g>")?;
        }
        for (_, element) in &elements {
            writeln!(f, "{}", element)?;
        }
        writeln!(f, "</g>")?;
        writeln!(f, "</svg>")
    }
}

const DEFAULT_STYLE: &str = r#"
  .ghostwire { fill: none; stroke: transparent; stroke-width: 5px; }
  .wire { pointer-events: none; fill: none; stroke: #000; stroke-width: 5px; stroke-linecap: butt; }
  .wire.down { stroke: #9e9e9e; }
  .wire.external { stroke: #795548; stroke-dasharray: 1.5ex 1ex; }
  .wire.pfvf { stroke: #3f51b5; stroke-dasharray: 1.5ex 0.5ex 0.5ex 0.5ex; }
  .wire.veth { stroke: #2e7d32; }
  .wire.macvlan { stroke: #ef6c00; stroke-dasharray: 2.5ex 0.5ex 1ex 0.5ex; }
  .wire.vxlan { stroke: #00838f; stroke-dasharray: 1ex 0.5ex; }
  .wire.vlan { stroke: #6a1b9a; }
  .ext-marker { fill: #795548; }
  .ext-marker-down { fill: #9e9e9e; }
  .macvlan-marker { fill: #ef6c00; }
  .macvlan-marker-down { fill: #9e9e9e; }
  g.hot > path.wire:not(.hot) { stroke: #e0e0e0; }
  path.wire.hot { stroke: #f50057; stroke-dasharray: 16 8; stroke-width: 6px; }
"#;

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutEngine;
    use crate::measure::{Rect, RectTable};
    use crate::wiring::{Wire, WireKind};

    fn layout() -> WiringLayout {
        let rects = RectTable::new(Rect::new(0.0, 0.0, 200.0, 300.0))
            .with("nif-1-eth0", Rect::new(0.0, 10.0, 20.0, 280.0))
            .with("nif-1-veth0", Rect::new(40.0, 10.0, 60.0, 280.0))
            .with("nif-2-eth0", Rect::new(100.0, 10.0, 120.0, 280.0));
        let wires = vec![
            Wire::two_ended(WireKind::Veth, "nif-1-veth0", "nif-2-eth0"),
            Wire::external("nif-1-eth0").down(true),
        ];
        LayoutEngine::default().layout(&wires, &rects)
    }

    #[test]
    fn test_render_basic() {
        let svg = SvgRenderer::default().render(&layout(), "", &[]);

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="48""#));
        assert!(svg.contains(r#"id="marker-externaldown""#));
        assert!(svg.contains(r#"class="wire veth rel-nif-1-veth0-nif-2-eth0""#));
        assert!(svg.contains(r#"class="ghostwire rel-nif-1-veth0-nif-2-eth0""#));
        assert!(svg.contains(r#"marker-end="url(#marker-externaldown)""#));
        assert!(svg.contains("<g>"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn test_hot_wires_drawn_last() {
        let hot = vec!["rel-nif-1-eth0".to_string()];
        let svg = SvgRenderer::default().render(&layout(), "", &hot);

        assert!(svg.contains(r#"<g class="hot">"#));
        let hot_pos = svg.find("wire external rel-nif-1-eth0 down hot").unwrap();
        let cold_pos = svg.find("wire veth").unwrap();
        assert!(cold_pos < hot_pos);
    }

    #[test]
    fn test_render_without_style() {
        let renderer = SvgRenderer {
            embed_style: false,
            ..Default::default()
        };
        let svg = renderer.render(&layout(), "", &[]);
        assert!(!svg.contains("<style>"));
    }

    #[test]
    fn test_attributes_escaped() {
        let rects = RectTable::new(Rect::new(0.0, 0.0, 200.0, 300.0))
            .with("b&\"<-nif-1-e\"x&<0", Rect::new(0.0, 10.0, 20.0, 280.0));
        let wires = vec![Wire::external("b&\"<-nif-1-e\"x&<0")];
        let layout = LayoutEngine::default().layout(&wires, &rects);
        let hot = vec!["b&\"<-rel-nif-1-e\"x&<0".to_string()];
        let svg = SvgRenderer::default().render(&layout, "b&\"<-", &hot);

        assert!(!svg.contains("e\"x&<0"));
        assert!(!svg.contains(r#"id="b&"<-"#));
        assert!(svg.contains(r#"class="wire external b&amp;&quot;&lt;-rel-nif-1-e&quot;x&amp;&lt;0 hot""#));
        assert!(svg.contains(r#"marker-end="url(#b&amp;&quot;&lt;-marker-external)""#));
        assert!(svg.contains(r#"id="b&amp;&quot;&lt;-marker-externaldown""#));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml(r#"a"b&c<d>"#), "a&quot;b&amp;c&lt;d&gt;");
        assert_eq!(escape_xml("rel-nif-1-eth0"), "rel-nif-1-eth0");
    }
}
