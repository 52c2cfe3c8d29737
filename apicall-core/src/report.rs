//! Turns decoded service responses into the lines the scripts print.

use std::{fmt::Display, io::Write};

use chrono::{DateTime, Datelike, TimeZone, Utc};

use crate::service::{
    darksky::{DayForecast, Forecast},
    github::Repo,
    ipstack::Location,
    watson::TranslationResponse,
};

/// How many days of the forecast get printed.
pub const FORECAST_DAYS: usize = 7;

pub const LEGAL_LINES: [&str; 3] = [
    "Powered by Dark Sky",
    "https://darksky.net/poweredby/",
    "------------------------------",
];

pub fn repo_lines(repos: &[Repo]) -> Vec<String> {
    let mut lines: Vec<String> = repos.iter().map(|r| r.name.clone()).collect();
    lines.push(format!("{} repos", repos.len()));
    lines
}

pub fn location_line(location: &Location) -> String {
    format!(
        "Location: {}, {}",
        location.city.as_deref().unwrap_or("unknown"),
        location.region_code.as_deref().unwrap_or("unknown"),
    )
}

pub fn forecast_lines<Tz>(forecast: &Forecast, tz: &Tz) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    forecast
        .daily
        .data
        .iter()
        .take(FORECAST_DAYS)
        .map(|day| forecast_line(day, tz))
        .collect()
}

/// `Monday, March 5th\t\t10° to 20° ☀️`
pub fn forecast_line<Tz>(day: &DayForecast, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let date = match DateTime::<Utc>::from_timestamp(day.time, 0) {
        Some(utc) => format_day(&utc.with_timezone(tz)),
        None => "Invalid date".to_string(),
    };

    format!(
        "{date}\t\t{}° to {}° {}",
        round_half_up(day.temperature_low),
        round_half_up(day.temperature_high),
        day.icon.glyph(),
    )
}

pub fn translation_lines(response: &TranslationResponse) -> Vec<String> {
    response.translations.iter().map(|t| t.translation.clone()).collect()
}

pub fn write_lines<W, I, S>(out: &mut W, lines: I) -> std::io::Result<()>
where
    W: Write + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for line in lines {
        writeln!(out, "{}", line.as_ref())?;
    }
    Ok(())
}

fn format_day<Tz>(dt: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("{}, {} {}", dt.format("%A"), dt.format("%B"), ordinal(dt.day()))
}

/// Halves round toward positive infinity, so -2.5 becomes -2. NaN stays NaN
/// and a negative zero result prints as `0`.
pub fn round_half_up(value: f64) -> f64 {
    let rounded = value.round();
    let rounded = if value - rounded == 0.5 { rounded + 1.0 } else { rounded };
    rounded + 0.0
}

pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}
