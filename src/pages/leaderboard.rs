//! Leaderboard page
//!
//! Top and daily performer tables, every portfolio's value history and the
//! time the rankings were last refreshed.

use chrono::{DateTime, Duration, Utc};

use crate::config::Config;
use crate::render::chart::{self, NO_HISTORY};
use crate::render::table::TableOptions;
use crate::surface::escape;
use crate::types::{LeaderboardPayload, RenderingTarget};

use super::{Page, PageBuilder, PageKind};

pub const TOP_PERFORMERS_TABLE: &str = "topPerformersTable";
pub const DAILY_PERFORMERS_TABLE: &str = "dailyPerformersTable";
pub const HISTORY_PLOT: &str = "historyPlot";
pub const UPDATE_TIME: &str = "updateTime";

/// Rankings are published in US Eastern standard time
const EST_OFFSET_HOURS: i64 = 5;

/// `Fri, Mar 01. 2024 12:45PM EST`
pub fn format_update_time(at: DateTime<Utc>) -> String {
    let est = at.naive_utc() - Duration::hours(EST_OFFSET_HOURS);
    format!("{} EST", est.format("%a, %b %d. %Y %I:%M%p"))
}

pub fn render(payload: &LeaderboardPayload, config: &Config) -> Page {
    build(payload, PageBuilder::new(config))
}

pub(crate) fn build(payload: &LeaderboardPayload, mut page: PageBuilder<'_>) -> Page {
    let config = page.config;

    let options = TableOptions::default()
        .numbered(config.number_leaderboard_rows)
        .sortable(true);
    for (records, id) in [
        (&payload.top_performers, TOP_PERFORMERS_TABLE),
        (&payload.daily_performers, DAILY_PERFORMERS_TABLE),
    ] {
        if !records.is_empty() {
            page.table(records, id, options);
        }
    }

    match chart::performance_chart(&payload.history, &page.theme) {
        Ok(Some(figure)) => page.chart(HISTORY_PLOT, Ok(figure)),
        Ok(None) => chart::render_placeholder(
            &mut page.doc,
            &RenderingTarget::new(HISTORY_PLOT),
            NO_HISTORY,
        ),
        Err(e) => page.chart(HISTORY_PLOT, Err(e)),
    }

    let updated = payload
        .updated_at
        .map(format_update_time)
        .unwrap_or_else(|| "never".to_string());

    let body = format!(
        r#"        <div class="grid">
            <div class="card wide">
                <div class="card-header">
                    <span class="card-title">Performance</span>
                    <span id="{UPDATE_TIME}" class="card-title">Last updated: {updated}</span>
                </div>
                <div id="{HISTORY_PLOT}">{history}</div>
            </div>
            <div class="card">
                <div class="card-header"><span class="card-title">Top Performers</span></div>
                <table class="data-table" id="{TOP_PERFORMERS_TABLE}">{top}</table>
            </div>
            <div class="card">
                <div class="card-header"><span class="card-title">Daily Performers</span></div>
                <table class="data-table" id="{DAILY_PERFORMERS_TABLE}">{daily}</table>
            </div>
        </div>"#,
        updated = escape(&updated),
        history = page.doc.html_of(HISTORY_PLOT),
        top = page.doc.html_of(TOP_PERFORMERS_TABLE),
        daily = page.doc.html_of(DAILY_PERFORMERS_TABLE),
    );

    page.finish(PageKind::Leaderboard, &body)
}
