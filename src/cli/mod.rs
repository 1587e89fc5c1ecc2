pub mod generate;
pub mod import;
pub mod schedule;
pub mod show;

use anyhow::Result;
use time::Date;
use time::macros::format_description;

pub fn parse_date(value: &str) -> Result<Date> {
    let format = format_description!("[year]-[month]-[day]");

    Date::parse(value, &format)
        .map_err(|err| anyhow::anyhow!("invalid date `{value}`, expected YYYY-MM-DD: {err}"))
}
