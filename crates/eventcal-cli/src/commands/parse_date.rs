//! `parse-date`: resolve one date string.

use eventcal_core::{DateProfile, DateResolver, ResolvedDate};

use crate::error::CliResult;

/// Resolves `raw` with `profile` and prints the result.
pub fn run(raw: &str, profile: DateProfile) -> CliResult<()> {
    let date = DateResolver::new(profile).resolve(raw)?;
    print!("{}", describe(&date));
    Ok(())
}

/// Key/value listing of a resolved date.
pub fn describe(date: &ResolvedDate) -> String {
    let year = date
        .year()
        .map(|y| y.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "month:   {}\nday:     {}\nyear:    {}\ndisplay: {}\n",
        date.month(),
        date.day(),
        year,
        date.display()
    )
}
