use crate::life::{LifeStatistics, MAX_EXPECTANCY_YEARS, WEEKS_PER_YEAR};
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use std::{collections::BTreeMap, fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GridView {
    Weeks,
    Months,
    Years,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownView(pub String);

impl fmt::Display for UnknownView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown view '{}', expected weeks, months or years", self.0)
    }
}

impl std::error::Error for UnknownView {}

impl FromStr for GridView {
    type Err = UnknownView;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "weeks" => Ok(Self::Weeks),
            "months" => Ok(Self::Months),
            "years" => Ok(Self::Years),
            other => Err(UnknownView(other.to_owned())),
        }
    }
}

impl GridView {
    pub fn items_per_row(self) -> u32 {
        match self {
            Self::Weeks => 52,
            Self::Months => 12,
            Self::Years => 10,
        }
    }

    fn unit_label(self) -> &'static str {
        match self {
            Self::Weeks => "Week",
            Self::Months => "Month",
            Self::Years => "Year",
        }
    }

    fn total_items(self, stats: &LifeStatistics) -> u32 {
        match self {
            Self::Weeks => stats.total_weeks.clamp(0, i64::from(u32::MAX)) as u32,
            Self::Months => stats.life_expectancy.saturating_mul(12),
            Self::Years => stats.life_expectancy,
        }
    }

    fn lived_items(self, stats: &LifeStatistics) -> u32 {
        let lived = match self {
            Self::Weeks => stats.weeks_lived,
            Self::Months => stats.months_lived,
            Self::Years => stats.years_lived,
        };
        lived.clamp(0, i64::from(u32::MAX)) as u32
    }

    /// Age in years at the first cell of a row.
    fn age_at_row(self, row: u32) -> u32 {
        match self {
            Self::Weeks => row * self.items_per_row() / 52,
            Self::Months => row,
            Self::Years => row * 10,
        }
    }
}

/// Age range in whole years, end exclusive.
#[derive(Debug, Clone, Copy)]
pub struct Chapter {
    pub label: &'static str,
    pub start: u32,
    pub end: u32,
}

pub const LIFE_CHAPTERS: [Chapter; 5] = [
    Chapter { label: "Childhood", start: 0, end: 12 },
    Chapter { label: "Adolescence", start: 13, end: 19 },
    Chapter { label: "Early adulthood", start: 20, end: 29 },
    Chapter { label: "Middle age", start: 30, end: 59 },
    Chapter { label: "Later life", start: 60, end: 150 },
];

#[derive(Debug, Clone, Serialize)]
pub struct GridCell {
    pub index: u32,
    pub lived: bool,
    pub marked: bool,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GridRow {
    pub age: u32,
    pub chapter: Option<&'static str>,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Grid {
    pub view: GridView,
    pub items_per_row: u32,
    pub total_items: u32,
    pub lived_items: u32,
    pub rows: Vec<GridRow>,
}

pub fn build_grid(stats: &LifeStatistics, view: GridView, notes: &BTreeMap<u32, String>) -> Grid {
    let per_row = view.items_per_row();
    let total_items = view.total_items(stats);
    let lived_items = view.lived_items(stats);
    let row_count = total_items.div_ceil(per_row);

    let rows = (0..row_count)
        .map(|row| {
            let start = row * per_row;
            let end = (start + per_row).min(total_items);
            let cells = (start..end)
                .map(|index| GridCell {
                    index,
                    lived: index < lived_items,
                    marked: view == GridView::Weeks
                        && notes.get(&index).is_some_and(|note| !note.trim().is_empty()),
                    title: format!("{} {}", view.unit_label(), index + 1),
                })
                .collect();

            GridRow {
                age: view.age_at_row(row),
                chapter: chapter_label(view, row),
                cells,
            }
        })
        .collect();

    Grid {
        view,
        items_per_row: per_row,
        total_items,
        lived_items,
        rows,
    }
}

/// Label shown at the row where a chapter begins.
fn chapter_label(view: GridView, row: u32) -> Option<&'static str> {
    let age = view.age_at_row(row);
    LIFE_CHAPTERS
        .iter()
        .find(|chapter| chapter.start == age && (view == GridView::Years || age < chapter.end))
        .map(|chapter| chapter.label)
}

/// Week indexes past this fall outside every grid a form can request.
pub const MAX_WEEKS: u32 = MAX_EXPECTANCY_YEARS * WEEKS_PER_YEAR;

/// `None` when the date leaves chrono's range.
pub fn week_start_date(birth: NaiveDateTime, week: u32) -> Option<NaiveDateTime> {
    birth.checked_add_signed(Duration::weeks(i64::from(week)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::life::{compute_life_statistics, PlanningHorizon};
    use chrono::NaiveDate;

    fn stats_after_days(days: i64, years: u32) -> LifeStatistics {
        let birth = NaiveDate::from_ymd_opt(1990, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .expect("valid date");
        let horizon = PlanningHorizon::new(years).expect("positive horizon");
        compute_life_statistics(birth, horizon, birth + Duration::days(days))
    }

    #[test]
    fn weeks_view_marks_lived_and_noted_cells() {
        let stats = stats_after_days(70, 80);
        let mut notes = BTreeMap::new();
        notes.insert(3, "moved house".to_owned());
        notes.insert(4, "   ".to_owned());

        let grid = build_grid(&stats, GridView::Weeks, &notes);
        assert_eq!(grid.items_per_row, 52);
        assert_eq!(grid.total_items, 4160);
        assert_eq!(grid.rows.len(), 80);
        assert_eq!(grid.lived_items, 10);

        let first_row = &grid.rows[0].cells;
        assert!(first_row[9].lived);
        assert!(!first_row[10].lived);
        assert!(first_row[3].marked);
        assert!(!first_row[4].marked);
        assert_eq!(first_row[0].title, "Week 1");
    }

    #[test]
    fn months_and_years_views() {
        let stats = stats_after_days(3_653, 90);

        let months = build_grid(&stats, GridView::Months, &BTreeMap::new());
        assert_eq!(months.total_items, 1080);
        assert_eq!(months.rows.len(), 90);
        assert_eq!(months.lived_items, stats.months_lived as u32);
        assert_eq!(months.rows[0].cells[0].title, "Month 1");

        let years = build_grid(&stats, GridView::Years, &BTreeMap::new());
        assert_eq!(years.total_items, 90);
        assert_eq!(years.rows.len(), 9);
        assert_eq!(years.lived_items, 10);
        assert!(years.rows[0].cells.iter().all(|cell| cell.lived));
        assert!(!years.rows[1].cells[0].lived);
    }

    #[test]
    fn partial_last_row_and_no_notes_outside_weeks() {
        let stats = stats_after_days(100, 75);
        let mut notes = BTreeMap::new();
        notes.insert(0, "born".to_owned());

        let years = build_grid(&stats, GridView::Years, &notes);
        assert_eq!(years.rows.len(), 8);
        assert_eq!(years.rows[7].cells.len(), 5);
        assert!(!years.rows[0].cells[0].marked);
    }

    #[test]
    fn chapter_labels_start_on_their_row() {
        let stats = stats_after_days(0, 80);
        let weeks = build_grid(&stats, GridView::Weeks, &BTreeMap::new());
        assert_eq!(weeks.rows[0].chapter, Some("Childhood"));
        assert_eq!(weeks.rows[1].chapter, None);
        assert_eq!(weeks.rows[12].chapter, None);
        assert_eq!(weeks.rows[13].chapter, Some("Adolescence"));
        assert_eq!(weeks.rows[60].chapter, Some("Later life"));

        let years = build_grid(&stats, GridView::Years, &BTreeMap::new());
        assert_eq!(years.rows[2].chapter, Some("Early adulthood"));
        assert_eq!(years.rows[1].chapter, None);
    }

    #[test]
    fn parses_view_names() {
        assert_eq!("months".parse::<GridView>(), Ok(GridView::Months));
        assert!("decades".parse::<GridView>().is_err());
    }

    #[test]
    fn week_start_is_seven_days_per_week() {
        let birth = NaiveDate::from_ymd_opt(2000, 1, 1)
            .and_then(|date| date.and_hms_opt(6, 0, 0))
            .expect("valid date");
        let start = week_start_date(birth, 5).expect("in range");
        assert_eq!(start.to_string(), "2000-02-05 06:00:00");
    }

    #[test]
    fn week_start_out_of_range_is_none() {
        let birth = NaiveDate::from_ymd_opt(1990, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .expect("valid date");
        assert_eq!(week_start_date(birth, u32::MAX), None);
        assert_eq!(week_start_date(NaiveDateTime::MAX, 1), None);
        assert!(week_start_date(birth, MAX_WEEKS - 1).is_some());
    }
}
