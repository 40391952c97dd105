use schemars::JsonSchema;
use serde::Serialize;
use std::fmt;

pub const LABEL_YEAR: &str = "Year";
pub const LABEL_MONTH: &str = "Month";
pub const LABEL_AUTOMOBILE_SALES: &str = "Automobile Sales";
pub const LABEL_VEHICLE_TYPE: &str = "Vehicle Type";
pub const LABEL_ADVERTISING_EXPENDITURE: &str = "Advertising Expenditure";
pub const LABEL_UNEMPLOYMENT_RATE: &str = "Unemployment Rate";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
        };
        f.write_str(name)
    }
}

/// Category or x-axis position of a data point.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum XValue {
    Integer(i64),
    Number(f64),
    Label(String),
}

impl fmt::Display for XValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XValue::Integer(v) => write!(f, "{}", v),
            XValue::Number(v) => write!(f, "{}", v),
            XValue::Label(v) => f.write_str(v),
        }
    }
}

impl From<i32> for XValue {
    fn from(v: i32) -> Self {
        XValue::Integer(v.into())
    }
}

impl From<f64> for XValue {
    fn from(v: f64) -> Self {
        XValue::Number(v)
    }
}

impl From<&str> for XValue {
    fn from(v: &str) -> Self {
        XValue::Label(v.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct SeriesPoint {
    pub x: XValue,
    pub value: f64,
    /// Series name for grouped charts (a vehicle type display label)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl SeriesPoint {
    pub fn new(x: impl Into<XValue>, value: f64) -> Self {
        SeriesPoint {
            x: x.into(),
            value,
            group: None,
        }
    }

    pub fn grouped(x: impl Into<XValue>, value: f64, group: &str) -> Self {
        SeriesPoint {
            x: x.into(),
            value,
            group: Some(group.to_string()),
        }
    }
}

/// Renderer-agnostic description of one chart.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_label: Option<String>,
    pub series: Vec<SeriesPoint>,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, title: impl Into<String>) -> Self {
        ChartSpec {
            kind,
            title: title.into(),
            x_label: None,
            y_label: None,
            series: Vec::new(),
        }
    }

    pub fn with_axes(mut self, x_label: &str, y_label: &str) -> Self {
        self.x_label = Some(x_label.to_string());
        self.y_label = Some(y_label.to_string());
        self
    }

    pub fn with_series(mut self, series: Vec<SeriesPoint>) -> Self {
        self.series = series;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    #[cfg(test)]
    pub fn total(&self) -> f64 {
        self.series.iter().map(|p| p.value).sum()
    }

    /// Distinct group names in order of first appearance.
    pub fn groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = Vec::new();
        for name in self.series.iter().filter_map(|p| p.group.as_deref()) {
            if !groups.contains(&name) {
                groups.push(name);
            }
        }
        groups
    }
}
