use chrono::NaiveDate;

/// Wordle #0 was published on this day.
pub fn first_puzzle_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 6, 19).expect("valid date")
}

pub fn puzzle_number(date: NaiveDate) -> i64 {
    (date - first_puzzle_date()).num_days()
}

pub fn thread_name(date: NaiveDate) -> String {
    format!("Wordle {} Official Spoiler Thread", puzzle_number(date))
}
