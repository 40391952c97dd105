//! HTML dashboard generation
//!
//! Generates a self-contained HTML file with embedded CSS/JS. Every report the
//! dashboard can show is computed up front and embedded as JSON; the page only
//! switches between them and draws the charts as SVG.

use crate::cmd::read_dataset;
use crate::report::{generate_report, ChartSpec, ReportType, Selection, SelectionState};
use crate::sales::Dataset;
use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

const TITLE: &str = "Automobile Sales Statistics Dashboard";

#[derive(Args, Debug)]
pub struct HtmlCommand {
    /// CSV file containing the sales dataset ("-" for stdin)
    #[arg(short, long)]
    data: PathBuf,

    /// Year selected when the dashboard opens (defaults to the earliest year)
    #[arg(short, long)]
    year: Option<i32>,

    /// Output file path (default: opens in browser)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl HtmlCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let dataset = read_dataset(&self.data)?;
        let state = SelectionState::for_dataset(&dataset, self.year);
        if let Some(year) = self.year.filter(|y| state.year() != Some(*y)) {
            log::warn!("No sales records for {}, opening on {:?}", year, state.year());
        }

        let html = generate(&build_dashboard_data(&dataset, state));

        if let Some(ref output_path) = self.output {
            std::fs::write(output_path, &html)?;
            println!("HTML dashboard written to: {}", output_path.display());
        } else {
            // Write to temp file and open in browser
            let temp_path = std::env::temp_dir().join("autosales-dashboard.html");
            std::fs::write(&temp_path, &html)?;
            opener::open(&temp_path)?;
            println!("Opened HTML dashboard in browser: {}", temp_path.display());
        }

        Ok(())
    }
}

/// Data structure for embedding in HTML as JSON
#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub title: String,
    pub report_types: Vec<ReportOption>,
    pub years: Vec<i32>,
    pub initial: InitialSelection,
    pub recession: [ChartSpec; 4],
    pub yearly: BTreeMap<i32, [ChartSpec; 4]>,
    /// Yearly charts with no year selected, shown when the dataset has no years
    pub yearly_default: [ChartSpec; 4],
}

#[derive(Debug, Serialize)]
pub struct ReportOption {
    pub value: ReportType,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct InitialSelection {
    pub report_type: ReportType,
    pub year: Option<i32>,
    pub year_enabled: bool,
}

pub fn build_dashboard_data(dataset: &Dataset, state: SelectionState) -> DashboardData {
    let years = dataset.years();
    let yearly = years
        .iter()
        .map(|&year| (year, generate_report(dataset, &Selection::yearly(year))))
        .collect();

    DashboardData {
        title: TITLE.to_string(),
        report_types: [ReportType::Yearly, ReportType::Recession]
            .into_iter()
            .map(|value| ReportOption {
                value,
                label: value.display().to_string(),
            })
            .collect(),
        years,
        initial: InitialSelection {
            report_type: state.report_type(),
            year: state.year(),
            year_enabled: state.year_input_enabled(),
        },
        recession: generate_report(dataset, &Selection::recession()),
        yearly,
        yearly_default: generate_report(
            dataset,
            &Selection {
                report_type: ReportType::Yearly,
                year: None,
            },
        ),
    }
}

/// Generate the dashboard page
pub fn generate(data: &DashboardData) -> String {
    let json_data = serde_json::to_string(data)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/");
    let year_disabled = if data.initial.year_enabled { "" } else { " disabled" };

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <header>
        <h1>{title}</h1>
        <div class="filters">
            <div class="filter-group">
                <label for="input-report">Select Report Type</label>
                <select id="input-report"></select>
            </div>
            <div class="filter-group">
                <label for="input-year">Select Year</label>
                <select id="input-year"{year_disabled}></select>
            </div>
        </div>
    </header>

    <main>
        <section class="charts">
            <div class="card" id="plot-1"></div>
            <div class="card" id="plot-2"></div>
            <div class="card" id="plot-3"></div>
            <div class="card" id="plot-4"></div>
        </section>
    </main>

    <script>
const DATA = {json_data};
{script}
    </script>
</body>
</html>"##,
        title = TITLE,
        css = CSS,
        year_disabled = year_disabled,
        json_data = json_data,
        script = SCRIPT,
    )
}

const CSS: &str = r#"
:root {
    --accent: #6a1b9a;
    --gray-50: #f9fafb;
    --gray-200: #e5e7eb;
    --gray-300: #d1d5db;
    --gray-500: #6b7280;
    --gray-700: #374151;
    --gray-900: #111827;
}

* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
    background: var(--gray-50);
    color: var(--gray-900);
    line-height: 1.5;
}

header {
    background: white;
    border-bottom: 1px solid var(--gray-200);
    padding: 1.5rem 2rem;
}

header h1 {
    font-size: 1.75rem;
    font-weight: 700;
    color: var(--accent);
    margin-bottom: 1rem;
}

.filters {
    display: flex;
    flex-wrap: wrap;
    gap: 1.5rem;
}

.filter-group {
    display: flex;
    flex-direction: column;
    gap: 0.375rem;
}

.filter-group label {
    font-size: 0.75rem;
    font-weight: 500;
    color: var(--gray-500);
    text-transform: uppercase;
    letter-spacing: 0.05em;
}

select {
    padding: 0.5rem 0.75rem;
    border: 1px solid var(--gray-300);
    border-radius: 0.375rem;
    font-size: 0.875rem;
    background: white;
    min-width: 220px;
}

select:disabled {
    background: var(--gray-50);
    color: var(--gray-500);
}

main {
    padding: 2rem;
    max-width: 1400px;
    margin: 0 auto;
}

.charts {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(520px, 1fr));
    gap: 1.5rem;
}

.card {
    background: white;
    border-radius: 0.75rem;
    padding: 1rem;
    box-shadow: 0 1px 3px rgba(0, 0, 0, 0.1);
}

svg {
    width: 100%;
    height: auto;
    font-size: 11px;
}

.chart-title {
    font-size: 14px;
    font-weight: 600;
    fill: var(--gray-900);
}

.grid {
    stroke: var(--gray-200);
}

.tick, .legend {
    fill: var(--gray-700);
}

.axis-label {
    fill: var(--gray-500);
    font-weight: 500;
}

.empty {
    fill: var(--gray-500);
    font-size: 13px;
}
"#;

const SCRIPT: &str = r#"
const SVG_NS = 'http://www.w3.org/2000/svg';
const ACCENT = '#6A1B9A';
const PALETTE = ['#6A1B9A', '#1E88E5', '#43A047', '#FB8C00', '#E53935', '#00ACC1', '#8D6E63'];
const W = 560, H = 340;
const M = { top: 48, right: 24, bottom: 56, left: 72 };

function el(name, attrs, text) {
    const e = document.createElementNS(SVG_NS, name);
    Object.entries(attrs || {}).forEach(([k, v]) => e.setAttribute(k, v));
    if (text !== undefined) e.textContent = text;
    return e;
}

function formatNumber(v) {
    return Number(v).toLocaleString('en-GB', { maximumFractionDigits: 2 });
}

function niceMax(v) {
    if (!(v > 0)) return 1;
    const p = Math.pow(10, Math.floor(Math.log10(v)));
    const n = v / p;
    const step = n <= 1 ? 1 : n <= 2 ? 2 : n <= 5 ? 5 : 10;
    return step * p;
}

function frame(svg, chart, maxValue) {
    const plotW = W - M.left - M.right;
    const plotH = H - M.top - M.bottom;
    const top = niceMax(maxValue);
    const ticks = 5;
    for (let i = 0; i <= ticks; i++) {
        const y = M.top + plotH - plotH * i / ticks;
        svg.appendChild(el('line', { x1: M.left, x2: M.left + plotW, y1: y, y2: y, class: 'grid' }));
        svg.appendChild(el('text', { x: M.left - 8, y: y + 4, 'text-anchor': 'end', class: 'tick' }, formatNumber(top * i / ticks)));
    }
    if (chart.x_label) {
        svg.appendChild(el('text', { x: M.left + plotW / 2, y: H - 12, 'text-anchor': 'middle', class: 'axis-label' }, chart.x_label));
    }
    if (chart.y_label) {
        const cy = M.top + plotH / 2;
        svg.appendChild(el('text', { x: 16, y: cy, 'text-anchor': 'middle', transform: `rotate(-90 16 ${cy})`, class: 'axis-label' }, chart.y_label));
    }
    return { plotW, plotH, scale: v => M.top + plotH - plotH * v / top };
}

function categories(series) {
    const seen = [];
    series.forEach(p => {
        const key = String(p.x);
        if (!seen.includes(key)) seen.push(key);
    });
    return seen;
}

function xTicks(svg, labels, xs) {
    const every = Math.ceil(labels.length / 12);
    labels.forEach((label, i) => {
        if (i % every !== 0) return;
        svg.appendChild(el('text', { x: xs(i), y: H - M.bottom + 18, 'text-anchor': 'middle', class: 'tick' }, label));
    });
}

function legend(svg, names) {
    const x = W - M.right - 170;
    names.forEach((name, i) => {
        const y = M.top + i * 18;
        svg.appendChild(el('rect', { x, y, width: 12, height: 12, fill: PALETTE[i % PALETTE.length] }));
        svg.appendChild(el('text', { x: x + 18, y: y + 10, class: 'legend' }, name));
    });
}

function renderLine(svg, chart) {
    const f = frame(svg, chart, Math.max(...chart.series.map(p => p.value)));
    const n = chart.series.length;
    const xs = i => M.left + (n === 1 ? f.plotW / 2 : f.plotW * i / (n - 1));
    const points = chart.series.map((p, i) => `${xs(i)},${f.scale(p.value)}`).join(' ');
    svg.appendChild(el('polyline', { points, fill: 'none', stroke: ACCENT, 'stroke-width': 2 }));
    chart.series.forEach((p, i) => {
        const dot = el('circle', { cx: xs(i), cy: f.scale(p.value), r: 3, fill: ACCENT });
        dot.appendChild(el('title', {}, `${p.x}: ${formatNumber(p.value)}`));
        svg.appendChild(dot);
    });
    xTicks(svg, chart.series.map(p => String(p.x)), xs);
}

// Grouped series are stacked per x category
function renderBar(svg, chart) {
    const cats = categories(chart.series);
    const groups = [...new Set(chart.series.filter(p => p.group).map(p => p.group))];
    const totals = {};
    chart.series.forEach(p => {
        const key = String(p.x);
        totals[key] = (totals[key] || 0) + p.value;
    });
    const f = frame(svg, chart, Math.max(...Object.values(totals)));
    const band = f.plotW / cats.length;
    const barW = Math.max(2, band * 0.7);
    const xs = i => M.left + band * i + band / 2;
    const stacked = {};
    chart.series.forEach(p => {
        const key = String(p.x);
        const base = stacked[key] || 0;
        const y0 = f.scale(base);
        const y1 = f.scale(base + p.value);
        const color = p.group ? PALETTE[groups.indexOf(p.group) % PALETTE.length] : ACCENT;
        const rect = el('rect', {
            x: xs(cats.indexOf(key)) - barW / 2,
            y: Math.min(y0, y1),
            width: barW,
            height: Math.abs(y0 - y1),
            fill: color,
        });
        const name = p.group ? `${p.group}, ${key}` : key;
        rect.appendChild(el('title', {}, `${name}: ${formatNumber(p.value)}`));
        svg.appendChild(rect);
        stacked[key] = base + p.value;
    });
    xTicks(svg, cats, xs);
    if (groups.length) legend(svg, groups);
}

function renderPie(svg, chart) {
    const total = chart.series.reduce((sum, p) => sum + p.value, 0);
    const share = v => total > 0 ? v / total : 0;
    const cx = M.left + 130;
    const cy = M.top + (H - M.top - M.bottom) / 2 + 10;
    const r = 120;
    let angle = -Math.PI / 2;
    chart.series.forEach((p, i) => {
        const frac = share(p.value);
        const end = angle + frac * 2 * Math.PI;
        const color = PALETTE[i % PALETTE.length];
        let shape;
        if (frac >= 0.9999) {
            shape = el('circle', { cx, cy, r, fill: color });
        } else {
            const large = frac > 0.5 ? 1 : 0;
            const d = `M ${cx} ${cy} L ${cx + r * Math.cos(angle)} ${cy + r * Math.sin(angle)} `
                + `A ${r} ${r} 0 ${large} 1 ${cx + r * Math.cos(end)} ${cy + r * Math.sin(end)} Z`;
            shape = el('path', { d, fill: color, stroke: 'white', 'stroke-width': 1 });
        }
        shape.appendChild(el('title', {}, `${p.x}: ${formatNumber(p.value)} (${(frac * 100).toFixed(1)}%)`));
        svg.appendChild(shape);
        angle = end;
    });
    legend(svg, chart.series.map(p => `${p.x} (${(share(p.value) * 100).toFixed(1)}%)`));
}

function renderChart(container, chart) {
    container.innerHTML = '';
    const svg = el('svg', { viewBox: `0 0 ${W} ${H}`, role: 'img' });
    svg.appendChild(el('text', { x: W / 2, y: 24, 'text-anchor': 'middle', class: 'chart-title' }, chart.title));
    if (chart.series.length === 0) {
        svg.appendChild(el('text', { x: W / 2, y: H / 2, 'text-anchor': 'middle', class: 'empty' }, 'No data'));
    } else if (chart.kind === 'Line') {
        renderLine(svg, chart);
    } else if (chart.kind === 'Bar') {
        renderBar(svg, chart);
    } else {
        renderPie(svg, chart);
    }
    container.appendChild(svg);
}

function currentCharts(reportType, year) {
    if (reportType === 'Recession') return DATA.recession;
    return DATA.yearly[year] || DATA.yearly_default;
}

function update() {
    const reportType = document.getElementById('input-report').value;
    const yearSelect = document.getElementById('input-year');
    // The chosen year is kept while disabled
    yearSelect.disabled = reportType === 'Recession';
    currentCharts(reportType, yearSelect.value).forEach((chart, i) => {
        renderChart(document.getElementById(`plot-${i + 1}`), chart);
    });
}

function init() {
    const reportSelect = document.getElementById('input-report');
    DATA.report_types.forEach(option => {
        reportSelect.appendChild(new Option(option.label, option.value));
    });
    reportSelect.value = DATA.initial.report_type;

    const yearSelect = document.getElementById('input-year');
    DATA.years.forEach(year => yearSelect.appendChild(new Option(year, year)));
    if (DATA.initial.year !== null) yearSelect.value = DATA.initial.year;

    reportSelect.addEventListener('change', update);
    yearSelect.addEventListener('change', update);
    update();
}

document.addEventListener('DOMContentLoaded', init);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sales::read_csv;

    fn dataset() -> Dataset {
        let csv = "Year,Month,Automobile_Sales,Vehicle_Type,Advertising_Expenditure,unemployment_rate,Recession
1980,Jan,100,Sports,50,5.0,1
1981,Feb,200,Executivecar,150,4.0,0
1982,Mar,50,Smallfamiliycar,150,6.0,1";
        read_csv(csv.as_bytes()).unwrap()
    }

    #[test]
    fn dashboard_embeds_every_year() {
        let dataset = dataset();
        let data = build_dashboard_data(&dataset, SelectionState::for_dataset(&dataset, Some(1981)));

        assert_eq!(data.years, vec![1980, 1981, 1982]);
        assert_eq!(data.yearly.len(), 3);
        assert_eq!(data.yearly[&1981], generate_report(&dataset, &Selection::yearly(1981)));
        assert_eq!(data.recession, generate_report(&dataset, &Selection::recession()));
        assert_eq!(data.initial.year, Some(1981));
        assert!(data.initial.year_enabled);
        assert_eq!(data.report_types.len(), 2);
    }

    #[test]
    fn recession_start_disables_year_select() {
        let dataset = dataset();
        let mut state = SelectionState::for_dataset(&dataset, None);
        state.set_report_type(ReportType::Recession);
        let data = build_dashboard_data(&dataset, state);
        let html = generate(&data);

        assert!(!data.initial.year_enabled);
        assert!(html.contains(r#"<select id="input-year" disabled>"#));
        assert!(html.contains(r#""report_type":"Recession""#));
    }

    #[test]
    fn html_embeds_chart_data() {
        let dataset = dataset();
        let html = generate(&build_dashboard_data(&dataset, SelectionState::for_dataset(&dataset, None)));

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<select id="input-year">"#));
        assert!(html.contains("const DATA = {"));
        assert!(html.contains("Average Automobile Sales by Year (Recession)"));
        assert!(html.contains("Sports Car"));
        assert!(!html.contains("\"Smallfamiliycar\""));
        for plot in 1..=4 {
            assert!(html.contains(&format!(r#"id="plot-{}""#, plot)));
        }
    }

    #[test]
    fn empty_dataset_still_embeds_yearly_titles() {
        let dataset = Dataset::default();
        let data = build_dashboard_data(&dataset, SelectionState::for_dataset(&dataset, None));
        assert!(data.yearly.is_empty());
        assert_eq!(data.initial.year, None);
        assert!(data.yearly_default.iter().skip(1).all(ChartSpec::is_empty));

        let html = generate(&data);
        assert!(html.contains("Yearly Average Automobile Sales"));
        assert!(html.contains("Total Monthly Automobile Sales"));
        assert!(html.contains("Advertising Expenditure by Vehicle Type\""));
        assert!(html.contains("DATA.yearly[year] || DATA.yearly_default"));
    }
}
