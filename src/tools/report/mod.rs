//! Report Tools
//!
//! A single self-contained `report.html` next to the downloaded images.

pub mod types;
mod utils;

pub use types::*;
pub use utils::format_usd;
use utils::*;

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::Result;
use crate::tools::estimate::BudgetEstimate;

const REPORT_FILE: &str = "report.html";

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:2rem auto;max-width:1100px;color:#222}\
header{border-bottom:1px solid #ddd;margin-bottom:1.5rem}\
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(320px,1fr));gap:1rem}\
.card{border:1px solid #e3e3e3;border-radius:8px;padding:.75rem}\
.card img{width:100%;border-radius:4px}\
.badge{background:#345;color:#fff;border-radius:4px;padding:0 .4rem;font-size:.8rem}\
table{border-collapse:collapse;width:100%;margin-top:1rem}\
td,th{border-bottom:1px solid #eee;padding:.4rem;text-align:left}\
td.num,th.num{text-align:right}";

/// One-paragraph summary shown under the report header.
pub fn executive_summary(
    asset_count: usize,
    design_style: &str,
    budget: &BudgetEstimate,
) -> String {
    format!(
        "Generated concept renders for {} spaces with a {} style. \
         Estimated renovation range totals {} to {}.",
        asset_count,
        design_style,
        format_usd(budget.total_low()),
        format_usd(budget.total_high()),
    )
}

/// Render the report markup; image links are relative to `output_dir`.
pub fn render_html(data: &ReportData, output_dir: &Path) -> String {
    let mut html = String::new();

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <header>\n<h1>{title}</h1>\n\
         <p>Source: <a href=\"{src_attr}\">{src_text}</a></p>\n\
         <p>Design style: {style} &middot; Generated {generated}</p>\n</header>\n\
         <section>\n<h2>Executive summary</h2>\n<p>{summary}</p>\n</section>\n",
        title = text(&data.address),
        src_attr = attr(&data.source_url),
        src_text = text(&data.source_url),
        style = text(&data.design_style),
        generated = data.generated_at.format("%Y-%m-%d %H:%M UTC"),
        summary = text(&data.executive_summary),
    );

    html.push_str("<section>\n<h2>Spaces</h2>\n<div class=\"grid\">\n");
    for asset in &data.assets {
        let _ = write!(html, "<div class=\"card\">\n<h3>{}", text(&asset.label));
        if asset.is_floorplan {
            html.push_str(" <span class=\"badge\">Floor plan</span>");
        }
        let _ = write!(
            html,
            "</h3>\n<img src=\"{}\" alt=\"{} (original)\">\n",
            attr(&link_path(&asset.original_path, output_dir)),
            attr(&asset.label),
        );
        if let Some(renovated) = &asset.renovated_path {
            let _ = write!(
                html,
                "<img src=\"{}\" alt=\"{} (concept)\">\n",
                attr(&link_path(renovated, output_dir)),
                attr(&asset.label),
            );
        }
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n</section>\n");

    html.push_str(
        "<section>\n<h2>Budget</h2>\n<table>\n\
         <tr><th>Room</th><th class=\"num\">Low</th><th class=\"num\">High</th></tr>\n",
    );
    for room in &data.budget.rooms {
        let _ = write!(
            html,
            "<tr><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td></tr>\n",
            text(&room.room_label),
            format_usd(room.low),
            format_usd(room.high),
        );
    }
    let _ = write!(
        html,
        "<tr><th>Total</th><th class=\"num\">{}</th><th class=\"num\">{}</th></tr>\n\
         </table>\n</section>\n</body>\n</html>\n",
        format_usd(data.budget.total_low()),
        format_usd(data.budget.total_high()),
    );

    html
}

/// Write `report.html` into `output_dir` and return its path.
pub fn build_report(data: &ReportData, output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(REPORT_FILE);
    std::fs::write(&path, render_html(data, output_dir))?;
    info!(path = %path.display(), assets = data.assets.len(), "report written");
    Ok(path)
}
