use serde::{Deserialize, Serialize};

use super::page::DashboardPage;
use crate::shared::table::{CellValue, TableData};

/// Fully evaluated page, ready for the client to draw
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageView {
    pub page: DashboardPage,
    pub title: String,
    /// Sections in display order
    pub sections: Vec<Section>,
}

impl PageView {
    pub fn new(page: DashboardPage) -> Self {
        Self {
            page,
            title: page.title().to_string(),
            sections: Vec::new(),
        }
    }

    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Find a section by id
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Ids of sections that were replaced by a notice
    pub fn notice_ids(&self) -> Vec<&str> {
        self.sections
            .iter()
            .filter(|s| s.body.is_notice())
            .map(|s| s.id.as_str())
            .collect()
    }
}

/// One independently rendered block of a page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub body: SectionBody,
}

impl Section {
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: SectionBody) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum SectionBody {
    Metrics(Vec<Metric>),
    Table(TableSection),
    Chart(ChartSpec),
    Controls(Vec<Control>),
    Notice(Notice),
    Text(TextBlock),
}

impl SectionBody {
    pub fn is_notice(&self) -> bool {
        matches!(self, SectionBody::Notice(_))
    }
}

/// Single headline figure, already formatted for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

impl Metric {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSection {
    /// Line shown above the grid (e.g. "Showing 12 filtered scenarios")
    pub caption: Option<String>,
    pub data: TableData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    HorizontalBar,
    Line,
    Scatter,
    Box,
    Histogram,
    Pie,
}

/// Declarative chart description. Drawing is left to the client charting library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    /// Column on the x axis (category names for pie charts)
    pub x: String,
    /// Column on the y axis (slice values for pie charts)
    pub y: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub hover: Vec<String>,
    /// Histogram bin count
    pub bins: Option<u32>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    /// Rows feeding the chart, restricted to the columns it uses
    pub data: TableData,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, title: impl Into<String>, x: impl Into<String>, data: TableData) -> Self {
        Self {
            kind,
            title: title.into(),
            x: x.into(),
            y: None,
            color: None,
            size: None,
            hover: Vec::new(),
            bins: None,
            x_label: None,
            y_label: None,
            data,
        }
    }

    pub fn y(mut self, column: impl Into<String>) -> Self {
        self.y = Some(column.into());
        self
    }

    pub fn color(mut self, column: impl Into<String>) -> Self {
        self.color = Some(column.into());
        self
    }

    pub fn size(mut self, column: impl Into<String>) -> Self {
        self.size = Some(column.into());
        self
    }

    pub fn hover(mut self, columns: Vec<String>) -> Self {
        self.hover = columns;
        self
    }

    pub fn bins(mut self, bins: u32) -> Self {
        self.bins = Some(bins);
        self
    }

    pub fn labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = Some(x_label.into());
        self.y_label = Some(y_label.into());
        self
    }
}

/// Interactive control with its data-derived range and current value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Control {
    Slider {
        /// Request parameter this slider drives
        id: String,
        label: String,
        min: f64,
        max: f64,
        value: f64,
    },
    MultiSelect {
        id: String,
        label: String,
        options: Vec<CellValue>,
        selected: Vec<CellValue>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Human-readable message shown in place of a section that could not render
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    /// Raw rows shown under the message, when available
    pub fallback: Option<TableData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextBlock {
    pub paragraphs: Vec<String>,
    pub bullets: Vec<String>,
}

impl TextBlock {
    pub fn new(paragraphs: &[&str], bullets: &[&str]) -> Self {
        Self {
            paragraphs: paragraphs.iter().map(|s| s.to_string()).collect(),
            bullets: bullets.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_body_is_tagged_by_kind() {
        let section = Section::new(
            "avg",
            "Averages",
            SectionBody::Metrics(vec![Metric::new("Avg Lift", "1.25")]),
        );
        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(json["body"]["kind"], "metrics");
        assert_eq!(json["body"]["content"][0]["value"], "1.25");
    }

    #[test]
    fn test_notice_ids() {
        let mut view = PageView::new(DashboardPage::AssociationRules);
        view.push(Section::new("a", "A", SectionBody::Text(TextBlock::default())));
        view.push(Section::new(
            "b",
            "B",
            SectionBody::Notice(Notice {
                level: NoticeLevel::Error,
                message: "boom".to_string(),
                fallback: None,
            }),
        ));
        assert_eq!(view.notice_ids(), vec!["b"]);
        assert_eq!(view.title, "Association Rules");
    }
}
