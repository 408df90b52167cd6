use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use tracing::error;
use uuid::Uuid;

use crate::client::render::{BadgeVariant, ScoreBand};
use crate::client::Backend;
use crate::models::analysis::AnalysisSummary;

pub const EMPTY_MESSAGE: &str = "No analyses yet";
pub const EMPTY_HINT: &str = "Upload and analyze your first resume to see results here";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryCard {
    pub id: Uuid,
    pub title: String,
    pub date: String,
    pub score: i32,
    pub badge: BadgeVariant,
}

impl From<&AnalysisSummary> for HistoryCard {
    fn from(summary: &AnalysisSummary) -> Self {
        HistoryCard {
            id: summary.id,
            title: summary.resume_title.clone(),
            date: format_long_date(summary.created_at),
            score: summary.overall_score,
            badge: ScoreBand::from_score(summary.overall_score).badge(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryView {
    Loading,
    Empty,
    Loaded(Vec<HistoryCard>),
}

/// Lists the signed-in user's past analyses, newest first.
pub struct HistoryViewer {
    backend: Arc<dyn Backend>,
    view: HistoryView,
}

impl HistoryViewer {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            view: HistoryView::Loading,
        }
    }

    pub fn view(&self) -> &HistoryView {
        &self.view
    }

    /// Fetches the history. A failed fetch is logged and shown as the empty state.
    pub async fn load(&mut self) -> &HistoryView {
        self.view = HistoryView::Loading;
        let mut summaries = match self.backend.list_analyses().await {
            Ok(summaries) => summaries,
            Err(e) => {
                error!("Error fetching analyses: {e}");
                Vec::new()
            }
        };
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        self.view = if summaries.is_empty() {
            HistoryView::Empty
        } else {
            HistoryView::Loaded(summaries.iter().map(HistoryCard::from).collect())
        };
        &self.view
    }
}

impl fmt::Display for HistoryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryView::Loading => writeln!(f, "Loading..."),
            HistoryView::Empty => {
                writeln!(f, "{EMPTY_MESSAGE}")?;
                writeln!(f, "{EMPTY_HINT}")
            }
            HistoryView::Loaded(cards) => {
                writeln!(f, "Your Analysis History")?;
                for card in cards {
                    writeln!(
                        f,
                        "  {}  {}  Score: {} [{}]  {}",
                        card.title,
                        card.date,
                        card.score,
                        card.badge.as_str(),
                        card.id
                    )?;
                }
                Ok(())
            }
        }
    }
}

/// Long date with an ordinal day, e.g. "October 19th, 2026".
pub fn format_long_date(at: DateTime<Utc>) -> String {
    let day = at.day();
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{} {day}{suffix}, {}", at.format("%B"), at.year())
}
