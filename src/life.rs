//! Life statistics derived from a birth date-time and a planning horizon.
//!
//! Every figure is computed from the elapsed time between two wall-clock
//! date-times in the same fixed offset. The caller supplies "now", which keeps
//! [`compute_life_statistics`] a pure function.

use crate::decimal::to_fixed;
use crate::population::{population_at_year, CURRENT_WORLD_POPULATION};
use chrono::{Datelike, FixedOffset, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::Serialize;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;
const MS_PER_WEEK: i64 = 7 * MS_PER_DAY;
const MS_PER_YEAR: f64 = 365.25 * MS_PER_DAY as f64;

pub const WEEKS_PER_YEAR: u32 = 52;
/// Longest horizon the form accepts.
pub const MAX_EXPECTANCY_YEARS: u32 = 150;
const HEART_BEATS_PER_SECOND: f64 = 1.167;
const BREATHS_PER_MINUTE: i64 = 16;
const SLEEP_HOURS_PER_DAY: i64 = 8;
const PEOPLE_MET_PER_LIFETIME: f64 = 80_000.0;
const BIRTHS_PER_YEAR: f64 = 140_000_000.0;
const DEATHS_PER_YEAR: f64 = 60_000_000.0;
const EARTH_ORBIT_KM: f64 = 940_000_000.0;
const SOLAR_SYSTEM_KM_PER_HOUR: i64 = 720_000;
const LUNAR_CYCLE_DAYS: f64 = 29.5;
const SEQUOIA_LIFESPAN_YEARS: f64 = 3_000.0;
const UNIVERSE_AGE_YEARS: f64 = 13_800_000_000.0;

const BIRTH_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifeError {
    #[error("life expectancy must be a positive number of years")]
    NonPositiveHorizon,
    #[error("invalid birth date '{0}', expected YYYY-MM-DD or YYYY-MM-DDTHH:MM")]
    InvalidBirth(String),
}

/// Assumed total lifespan in years. Sizes the grid; never a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanningHorizon(u32);

impl PlanningHorizon {
    pub fn new(years: u32) -> Result<Self, LifeError> {
        if years == 0 {
            return Err(LifeError::NonPositiveHorizon);
        }
        Ok(Self(years))
    }

    pub fn years(self) -> u32 {
        self.0
    }

    pub fn total_weeks(self) -> i64 {
        i64::from(self.0) * i64::from(WEEKS_PER_YEAR)
    }
}

/// Colloquial age, "X years, Y months, Z days ..." old.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AgeBreakdown {
    pub years: i32,
    pub months: i32,
    pub days: i32,
    pub hours: i32,
    pub minutes: i32,
    pub seconds: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LifeStatistics {
    pub birth: NaiveDateTime,
    pub life_expectancy: u32,
    pub weeks_lived: i64,
    pub days_lived: i64,
    pub years_lived_fractional: f64,
    pub years_lived: i64,
    pub months_lived: i64,
    pub hours_lived: i64,
    pub minutes_lived: i64,
    pub seconds_lived: i64,
    pub age: AgeBreakdown,
    pub total_weeks: i64,
    pub weeks_remaining: i64,
    pub percentage_lived: String,
    pub seasons: i64,
    pub heart_beats: i64,
    pub breaths: i64,
    pub sleep_hours: i64,
    pub world_pop_at_birth: u64,
    pub current_world_pop: u64,
    pub people_met: i64,
    pub total_births: i64,
    pub total_deaths: i64,
    pub distance_around_sun_km: i64,
    pub distance_through_galaxy_km: i64,
    pub lunar_cycles: i64,
    pub trips_around_sun: i64,
    pub sequoia_percent: String,
    pub lifespan_percent: String,
}

/// Current wall-clock time in the given fixed offset.
pub fn now_at_offset(offset: FixedOffset) -> NaiveDateTime {
    Utc::now().with_timezone(&offset).naive_local()
}

/// Accepts the date and datetime-local shapes a browser form submits.
pub fn parse_birth(input: &str) -> Result<NaiveDateTime, LifeError> {
    let input = input.trim();
    BIRTH_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| LifeError::InvalidBirth(input.to_owned()))
}

pub fn compute_life_statistics(
    birth: NaiveDateTime,
    horizon: PlanningHorizon,
    now: NaiveDateTime,
) -> LifeStatistics {
    let elapsed = (now - birth).num_milliseconds();

    let weeks_lived = elapsed.div_euclid(MS_PER_WEEK);
    let days_lived = elapsed.div_euclid(MS_PER_DAY);
    let hours_lived = elapsed.div_euclid(MS_PER_HOUR);
    let minutes_lived = elapsed.div_euclid(MS_PER_MINUTE);
    let seconds_lived = elapsed.div_euclid(MS_PER_SECOND);
    let years = elapsed as f64 / MS_PER_YEAR;

    let total_weeks = horizon.total_weeks();
    let lived_share = weeks_lived as f64 / total_weeks as f64;

    LifeStatistics {
        birth,
        life_expectancy: horizon.years(),
        weeks_lived,
        days_lived,
        years_lived_fractional: years,
        years_lived: floor(years),
        months_lived: floor(years * 12.0),
        hours_lived,
        minutes_lived,
        seconds_lived,
        age: age_breakdown(birth, now),
        total_weeks,
        weeks_remaining: total_weeks - weeks_lived,
        percentage_lived: to_fixed(lived_share * 100.0, 1),
        seasons: floor(years * 4.0),
        heart_beats: floor((days_lived * 86_400) as f64 * HEART_BEATS_PER_SECOND),
        breaths: days_lived * 1_440 * BREATHS_PER_MINUTE,
        sleep_hours: days_lived * SLEEP_HOURS_PER_DAY,
        world_pop_at_birth: population_at_year(birth.year()),
        current_world_pop: CURRENT_WORLD_POPULATION,
        people_met: floor(lived_share * PEOPLE_MET_PER_LIFETIME),
        total_births: floor(years * BIRTHS_PER_YEAR),
        total_deaths: floor(years * DEATHS_PER_YEAR),
        distance_around_sun_km: floor(years * EARTH_ORBIT_KM),
        distance_through_galaxy_km: hours_lived * SOLAR_SYSTEM_KM_PER_HOUR,
        lunar_cycles: floor(days_lived as f64 / LUNAR_CYCLE_DAYS),
        trips_around_sun: floor(years),
        sequoia_percent: to_fixed(years / SEQUOIA_LIFESPAN_YEARS * 100.0, 2),
        lifespan_percent: to_fixed(years / UNIVERSE_AGE_YEARS * 100.0, 10),
    }
}

/// Field-wise difference with a single borrow pass, finest unit first.
///
/// A negative day difference borrows the length of the month before `now`'s
/// month, not the birth month.
pub fn age_breakdown(birth: NaiveDateTime, now: NaiveDateTime) -> AgeBreakdown {
    let mut years = now.year() - birth.year();
    let mut months = now.month() as i32 - birth.month() as i32;
    let mut days = now.day() as i32 - birth.day() as i32;
    let mut hours = now.hour() as i32 - birth.hour() as i32;
    let mut minutes = now.minute() as i32 - birth.minute() as i32;
    let mut seconds = now.second() as i32 - birth.second() as i32;

    if seconds < 0 {
        minutes -= 1;
        seconds += 60;
    }
    if minutes < 0 {
        hours -= 1;
        minutes += 60;
    }
    if hours < 0 {
        days -= 1;
        hours += 24;
    }
    if days < 0 {
        months -= 1;
        days += days_in_previous_month(now.date());
    }
    if months < 0 {
        years -= 1;
        months += 12;
    }

    AgeBreakdown {
        years,
        months,
        days,
        hours,
        minutes,
        seconds,
    }
}

fn days_in_previous_month(date: NaiveDate) -> i32 {
    // Only NaiveDate::MIN has no previous month.
    date.with_day(1)
        .and_then(|first| first.pred_opt())
        .map_or(31, |last| last.day() as i32)
}

fn floor(value: f64) -> i64 {
    value.floor() as i64
}
