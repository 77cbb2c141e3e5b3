//! Treemap renderer: plot rows in, one self-contained HTML document out.
//!
//! The document embeds a single inline SVG; there are no scripts and no
//! external assets, so the page renders as-is wherever it is loaded.

pub mod color;
pub mod layout;

use crate::constants::{CHART_HEIGHT, CHART_WIDTH};
use crate::models::{PlotRow, PlotTable};
use color::ChangeColorScale;
use layout::{squarify, Rect};
use std::collections::HashMap;

/// Vertical band reserved for the chart title.
const TITLE_BAND: f64 = 48.0;

/// Header strip inside an industry tile carrying the category label.
const INDUSTRY_HEADER: f64 = 20.0;

/// Padding between an industry frame and its stock tiles.
const INDUSTRY_PAD: f64 = 2.0;

struct IndustryGroup<'a> {
    name: &'a str,
    /// Sum of the retained rows' trading value; sizes the industry tile.
    weight: f64,
    rows: Vec<&'a PlotRow>,
}

/// Render the full treemap page for one plot table.
///
/// Hierarchy is root → industry → stock. Tile area encodes trading value,
/// tile color encodes price change on a zero-pinned diverging scale, and the
/// title carries the snapshot's as-of time.
pub fn render_treemap(table: &PlotTable) -> String {
    let groups = group_by_industry(&table.rows);
    let scale = ChangeColorScale::from_changes(table.rows.iter().map(|r| r.change_pct));

    let title = format!(
        "台股交易額X漲跌幅 {}",
        table.as_of.format("%Y-%m-%d %H:%M:%S")
    );

    let region = Rect::new(0.0, TITLE_BAND, CHART_WIDTH, CHART_HEIGHT - TITLE_BAND);
    let weights: Vec<f64> = groups.iter().map(|g| g.weight).collect();
    let industry_rects = squarify(&weights, region);

    let mut svg = String::with_capacity(64 * 1024);
    svg.push_str(&format!(
        r##"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg" font-family="'Noto Sans TC','Microsoft JhengHei',sans-serif">"##,
        w = CHART_WIDTH,
        h = CHART_HEIGHT
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r##"<rect width="{}" height="{}" fill="#ffffff"/>"##,
        CHART_WIDTH, CHART_HEIGHT
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r##"<text x="16" y="32" font-size="22" fill="#222222">{}</text>"##,
        xml_escape(&title)
    ));
    svg.push('\n');

    for (group, rect) in groups.iter().zip(industry_rects.iter()) {
        render_industry(&mut svg, group, *rect, &scale);
    }

    svg.push_str("</svg>");

    format!(
        "<!DOCTYPE html>\n<html lang=\"zh-Hant\">\n<head>\n<meta charset=\"utf-8\"/>\n<title>{}</title>\n<style>body{{margin:0;display:flex;justify-content:center;background:#ffffff}}svg text{{pointer-events:none}}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        xml_escape(&title),
        svg
    )
}

/// Group rows by industry, keeping the pipeline's rank order inside each
/// group, then order the groups by weight descending.
fn group_by_industry(rows: &[PlotRow]) -> Vec<IndustryGroup<'_>> {
    let mut groups: Vec<IndustryGroup<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for row in rows {
        match index.get(row.industry_category.as_str()) {
            Some(&i) => {
                groups[i].weight += row.trading_money;
                groups[i].rows.push(row);
            }
            None => {
                index.insert(row.industry_category.as_str(), groups.len());
                groups.push(IndustryGroup {
                    name: row.industry_category.as_str(),
                    weight: row.trading_money,
                    rows: vec![row],
                });
            }
        }
    }

    groups.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    groups
}

fn render_industry(svg: &mut String, group: &IndustryGroup<'_>, rect: Rect, scale: &ChangeColorScale) {
    if rect.w <= 0.0 || rect.h <= 0.0 {
        return;
    }

    svg.push_str(&format!(
        r##"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="#f2f2f2" stroke="#888888" stroke-width="1"/>"##,
        rect.x, rect.y, rect.w, rect.h
    ));
    svg.push('\n');

    let header = if rect.h > INDUSTRY_HEADER * 2.0 && rect.w > 36.0 {
        svg.push_str(&format!(
            r##"<text x="{:.2}" y="{:.2}" font-size="12" fill="#333333">{}</text>"##,
            rect.x + 4.0,
            rect.y + 14.0,
            xml_escape(group.name)
        ));
        svg.push('\n');
        INDUSTRY_HEADER
    } else {
        0.0
    };

    let inner = Rect::new(rect.x, rect.y + header, rect.w, (rect.h - header).max(0.0))
        .shrink(INDUSTRY_PAD);
    let weights: Vec<f64> = group.rows.iter().map(|r| r.trading_money).collect();

    for (row, tile) in group.rows.iter().zip(squarify(&weights, inner)) {
        render_stock(svg, row, tile, scale);
    }
}

fn render_stock(svg: &mut String, row: &PlotRow, tile: Rect, scale: &ChangeColorScale) {
    if tile.w <= 0.0 || tile.h <= 0.0 {
        return;
    }

    let fill = scale.color(row.change_pct);
    let tooltip = format!(
        "{}\n收盤價 {}\n漲跌幅(%) {}",
        row.stock_name, row.close, row.change_pct_label
    );

    svg.push_str("<g>");
    svg.push_str(&format!("<title>{}</title>", xml_escape(&tooltip)));
    svg.push_str(&format!(
        r##"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" stroke="#ffffff" stroke-width="1"/>"##,
        tile.x, tile.y, tile.w, tile.h, fill
    ));

    let cx = tile.x + tile.w / 2.0;
    let cy = tile.y + tile.h / 2.0;

    if tile.w >= 110.0 && tile.h >= 64.0 {
        // Room for the full three-line label.
        svg.push_str(&format!(
            r##"<text x="{cx:.2}" y="{:.2}" font-size="13" fill="#111111" text-anchor="middle">{}</text>"##,
            cy - 16.0,
            xml_escape(&row.stock_name)
        ));
        svg.push_str(&format!(
            r##"<text x="{cx:.2}" y="{cy:.2}" font-size="13" fill="#111111" text-anchor="middle">收盤價 {}</text>"##,
            row.close
        ));
        svg.push_str(&format!(
            r##"<text x="{cx:.2}" y="{:.2}" font-size="13" fill="#111111" text-anchor="middle">漲跌幅(%) {}</text>"##,
            cy + 16.0,
            xml_escape(&row.change_pct_label)
        ));
    } else if tile.w >= 64.0 && tile.h >= 20.0 {
        svg.push_str(&format!(
            r##"<text x="{cx:.2}" y="{:.2}" font-size="11" fill="#111111" text-anchor="middle">{}</text>"##,
            cy + 4.0,
            xml_escape(&row.stock_name)
        ));
    }

    svg.push_str("</g>\n");
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
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
    out
}
