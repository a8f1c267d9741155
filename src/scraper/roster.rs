use std::collections::BTreeMap;

use itertools::Itertools;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::error::ScrapeResult;
use crate::fetch::RawPage;
use crate::model::{Player, Position, StatType, StatValue};
use crate::scraper::{coerce_stat_number, select_text};

/// Columns that must coerce to numbers for each stat table variant.
/// Unlisted columns keep their text as-is.
const HITTING_COLUMNS: [&str; 10] = [
    "AB", "R", "H", "HR", "RBI", "SB", "AVG", "OBP", "SLG", "OPS",
];
const PITCHING_COLUMNS: [&str; 9] = ["W", "L", "ERA", "G", "IP", "SO", "BB", "WHIP", "SV"];

/// Parse a team roster page into normalized player records.
///
/// A malformed row never fails the batch: rows are normalized with
/// placeholder values where possible and dropped (with a warning) only when
/// no identity can be recovered at all.
pub fn parse_roster(page: &RawPage, team: &str, stat_type: StatType) -> ScrapeResult<Vec<Player>> {
    let document = Html::parse_document(&page.html);
    let row_selector = Selector::parse("table.roster-table tbody tr")?;

    let name_selector = Selector::parse("td.player-info a")?;
    let info_selector = Selector::parse("td.player-info")?;
    let position_selector = Selector::parse("td.player-pos")?;
    let stat_selector = Selector::parse("td.stat")?;

    let mut players = Vec::new();
    for (index, row) in document.select(&row_selector).enumerate() {
        let link = row.select(&name_selector).next();

        let name = link
            .map(|a| {
                a.text()
                    .map(|t| t.trim())
                    .filter(|t| !t.is_empty())
                    .collect::<String>()
            })
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| select_text(&row, &info_selector));

        let id = link
            .and_then(|a| a.value().attr("href"))
            .and_then(parse_player_href)
            .map(|(id, _slug)| id);

        let (id, name) = match (id, name) {
            (Some(id), name) if !name.is_empty() => (id, name),
            (Some(id), _) => {
                warn!(row = index, team, %id, "roster row missing player name");
                (id, "Unknown Player".to_string())
            }
            (None, name) if !name.is_empty() => {
                // No link id; fall back to a name-derived placeholder so the
                // record stays addressable within this snapshot.
                let placeholder = slugify(&name);
                warn!(row = index, team, name = %name, "roster row missing player id");
                (placeholder, name)
            }
            (None, _) => {
                warn!(row = index, team, "skipping roster row with no recoverable identity");
                continue;
            }
        };

        let position = Position::parse_lenient(&select_text(&row, &position_selector));
        let stats = parse_stat_cells(&row, &stat_selector, stat_type);

        players.push(Player {
            id,
            name,
            team: team.to_string(),
            position,
            stat_type,
            stats,
            fetched_at: page.fetched_at,
        });
    }

    debug!(count = players.len(), team, %stat_type, "parsed roster");
    Ok(players)
}

/// Extract `(id, slug)` from a player link href like `/player/592450/aaron-judge`.
fn parse_player_href(href: &str) -> Option<(String, String)> {
    href.strip_prefix("/player/")
        .and_then(|s| s.split('/').collect_tuple())
        .map(|(id, slug): (&str, &str)| (id.to_string(), slug.to_string()))
}

fn parse_stat_cells(
    row: &ElementRef,
    stat_selector: &Selector,
    stat_type: StatType,
) -> BTreeMap<String, StatValue> {
    let numeric: &[&str] = match stat_type {
        StatType::Hitting => &HITTING_COLUMNS,
        StatType::Pitching => &PITCHING_COLUMNS,
    };

    row.select(stat_selector)
        .filter_map(|cell| {
            let column = cell.value().attr("data-stat")?.to_string();
            let text: String = cell
                .text()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .collect();

            let value = if numeric.contains(&column.as_str()) {
                StatValue::Number(coerce_stat_number(&text))
            } else {
                match text.parse::<f64>() {
                    Ok(n) => StatValue::Number(n),
                    Err(_) => StatValue::Text(text),
                }
            };
            Some((column, value))
        })
        .collect()
}

fn slugify(name: &str) -> String {
    name.to_ascii_lowercase()
        .split_whitespace()
        .join("-")
}
