use anyhow::Result;
use serde::Serialize;

use scrollsnap_core::layout::StackedViewport;
use scrollsnap_core::snap::metrics::{most_visible, nearest};
use scrollsnap_core::snap::{ElementMetrics, Viewport, ViewportMetrics};
use scrollsnap_core::{AppConfig, SnapController};

/// A stack of equal sections and where it is scrolled to
#[derive(Debug, Clone)]
pub struct Layout {
    pub scroll_top: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub section_height: f64,
    pub sections: usize,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    viewport: &'a ViewportMetrics,
    sections: &'a [ElementMetrics<usize>],
    /// Where wheel input would settle
    most_visible: Option<usize>,
    /// Last section starting at or above the viewport top
    nearest: Option<usize>,
}

pub fn run(config: &AppConfig, layout: &Layout, json: bool) -> Result<()> {
    let snap = measure(config, layout)?;
    let report = Report {
        viewport: snap.viewport_metrics(),
        sections: snap.elements(),
        most_visible: most_visible(snap.elements()).map(|el| el.index),
        nearest: nearest(snap.elements(), snap.viewport_metrics()).map(|el| el.index),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_table(&report));
    }
    Ok(())
}

/// Lay the stack out and take one measurement pass
fn measure(config: &AppConfig, layout: &Layout) -> Result<SnapController<StackedViewport>> {
    let mut viewport = StackedViewport::uniform(
        layout.viewport_width,
        layout.viewport_height,
        layout.section_height,
        layout.sections,
    );
    viewport.set_scroll_top(layout.scroll_top);

    // size thresholds do not matter for a one-off measurement
    let mut snap_config = config.snap.to_config((0..layout.sections).collect());
    snap_config.min_width = Some(0.0);
    snap_config.min_height = Some(0.0);
    snap_config.detect_mobile = Some(false);
    snap_config.snap_on_start = false;

    let mut snap = SnapController::new(viewport);
    snap.init(snap_config)?;
    snap.measure();
    Ok(snap)
}

fn render_table(report: &Report<'_>) -> String {
    let vp = report.viewport;
    let mut out = format!(
        "viewport  {}x{}  top {:.1}  bottom {:.1}  max {:.1}\n",
        vp.width, vp.height, vp.top, vp.bottom, vp.max_top
    );
    out.push_str(&format!(
        "{:>5}  {:>10}  {:>10}  {:>8}\n",
        "#", "top", "bottom", "visible"
    ));
    for el in report.sections {
        out.push_str(&format!(
            "{:>5}  {:>10.1}  {:>10.1}  {:>7.1}%\n",
            el.index, el.top, el.bottom, el.visible_percentage
        ));
    }
    let show = |index: Option<usize>| index.map_or_else(|| "-".to_string(), |i| i.to_string());
    out.push_str(&format!("most visible: {}\n", show(report.most_visible)));
    out.push_str(&format!("nearest: {}\n", show(report.nearest)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(scroll_top: f64) -> Layout {
        Layout {
            scroll_top,
            viewport_width: 800.0,
            viewport_height: 600.0,
            section_height: 600.0,
            sections: 4,
        }
    }

    #[test]
    fn test_half_scrolled_sections() {
        let snap = measure(&AppConfig::default(), &layout(300.0)).unwrap();
        let elements = snap.elements();
        assert_eq!(elements.len(), 4);
        assert_eq!(elements[0].visible_percentage, 50.0);
        assert_eq!(elements[1].visible_percentage, 50.0);
        assert_eq!(elements[2].visible_percentage, 0.0);
        assert_eq!(most_visible(elements).map(|el| el.index), Some(0));
        assert_eq!(nearest(elements, snap.viewport_metrics()).map(|el| el.index), Some(0));
    }

    #[test]
    fn test_offset_is_clamped() {
        let snap = measure(&AppConfig::default(), &layout(10_000.0)).unwrap();
        assert_eq!(snap.viewport_metrics().top, 1800.0);
        assert_eq!(nearest(snap.elements(), snap.viewport_metrics()).map(|el| el.index), Some(3));
    }

    #[test]
    fn test_table_and_json_output() {
        let snap = measure(&AppConfig::default(), &layout(700.0)).unwrap();
        let report = Report {
            viewport: snap.viewport_metrics(),
            sections: snap.elements(),
            most_visible: most_visible(snap.elements()).map(|el| el.index),
            nearest: nearest(snap.elements(), snap.viewport_metrics()).map(|el| el.index),
        };

        let table = render_table(&report);
        assert!(table.contains("most visible: 1"));
        assert!(table.contains("nearest: 1"));

        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["most_visible"], 1);
        assert_eq!(json["sections"].as_array().map(Vec::len), Some(4));
        assert_eq!(json["viewport"]["max_top"], 1800.0);
    }
}
