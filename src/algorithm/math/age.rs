/// Mean Gregorian month length (365.25 / 12), the WHO age convention.
pub const DAYS_PER_MONTH: f64 = 30.4375;

/// Oldest age tabulated by the reference tables (~5 years).
pub const MAX_AGE_IN_DAYS: u32 = 1856;

/// Month length used only to decide when trailing days make a full month.
pub const ROLLOVER_DAYS: u32 = 30;

/// Folds a full trailing month expressed in days into the month count.
#[inline]
pub fn rollover(months: u32, days: u32) -> (u32, u32) {
    let days = days.min(ROLLOVER_DAYS);

    if days == ROLLOVER_DAYS {
        (months + 1, 0)
    } else {
        (months, days)
    }
}

/// Age in days used as the reference table key, saturated at the last tabulated day.
#[inline]
pub fn normalize(months: u32, days: u32) -> u32 {
    let (months, days) = rollover(months, days);

    // @NOTE: ties go to even, 24 months is day 730 and not 731
    let age = (months as f64 * DAYS_PER_MONTH + days as f64).round_ties_even();

    (age as u32).min(MAX_AGE_IN_DAYS)
}
