//! Spanish time and date phrasing
//!
//! Names come from fixed tables rather than the system locale so output is
//! identical on every platform.

use chrono::{Datelike, Timelike};

/// Weekday names, Monday first
const WEEKDAYS: [&str; 7] = [
    "lunes",
    "martes",
    "miércoles",
    "jueves",
    "viernes",
    "sábado",
    "domingo",
];

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Phrase a time of day as `Son las HH:MM horas.`
#[must_use]
pub fn format_time<T: Timelike>(time: &T) -> String {
    format!("Son las {:02}:{:02} horas.", time.hour(), time.minute())
}

/// Phrase a date, e.g. `Hoy es martes 11 de noviembre de 2025.`
#[must_use]
pub fn format_date<D: Datelike>(date: &D) -> String {
    let weekday = WEEKDAYS[date.weekday().num_days_from_monday() as usize];
    let month = MONTHS[date.month0() as usize];
    format!(
        "Hoy es {weekday} {} de {month} de {}.",
        date.day(),
        date.year()
    )
}
