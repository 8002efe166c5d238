use crate::core::templates::EntryTemplate;
use crate::domain::model::{short_date, MeetingDay, ScheduleDefinition, Week};
use crate::utils::error::{Result, SyllabusError};
use crate::utils::validation::validate_non_empty_string;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

const WEEKDAY_CODES: &[(char, u32)] = &[('M', 0), ('T', 1), ('W', 2), ('R', 3), ('F', 4)];

/// 將 MTWRF 縮寫轉為星期序號 (星期一 = 0)，重複字元視為同一天
pub fn parse_weekdays(weekdays: &str) -> Result<BTreeSet<u32>> {
    let invalid: String = weekdays
        .chars()
        .filter(|c| !WEEKDAY_CODES.iter().any(|(code, _)| code == c))
        .collect();

    if !invalid.is_empty() {
        return Err(SyllabusError::InvalidWeekday { weekdays: invalid });
    }

    Ok(weekdays
        .chars()
        .filter_map(|c| {
            WEEKDAY_CODES
                .iter()
                .find(|(code, _)| *code == c)
                .map(|(_, ordinal)| *ordinal)
        })
        .collect())
}

/// 將 `MM-DD` 解析為指定年份中的日期
pub fn parse_date(year: &str, month_day: &str) -> Result<NaiveDate> {
    let value = format!("{}-{}", year.trim(), month_day.trim());
    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|e| SyllabusError::InvalidDate {
        value,
        reason: e.to_string(),
    })
}

/// 依日期範圍與上課日產生以週分組的課表
#[derive(Debug, Clone)]
pub struct ScheduleBuilder {
    start: NaiveDate,
    end: NaiveDate,
    weekdays: BTreeSet<u32>,
    exclude: Vec<NaiveDate>,
}

impl ScheduleBuilder {
    pub fn new<S: AsRef<str>>(
        year: &str,
        start: &str,
        end: &str,
        weekdays: &str,
        exclude: &[S],
    ) -> Result<Self> {
        let weekdays = parse_weekdays(weekdays)?;

        validate_non_empty_string("schedule.year", year).map_err(|_| SyllabusError::InvalidDate {
            value: year.to_string(),
            reason: "year cannot be empty".to_string(),
        })?;
        let start = parse_date(year, start)?;
        let end = parse_date(year, end)?;
        let exclude = exclude
            .iter()
            .map(|date| parse_date(year, date.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            start,
            end,
            weekdays,
            exclude,
        })
    }

    pub fn from_definition(definition: &ScheduleDefinition) -> Result<Self> {
        Self::new(
            &definition.year,
            &definition.start,
            &definition.end,
            &definition.weekdays,
            &definition.exclude,
        )
    }

    pub fn build(&self) -> Vec<Week> {
        let mut weeks: Vec<Week> = Vec::new();

        // 最早的上課日作為開新週的訊號；即使那天放假也一樣會開週
        let Some(&opening_weekday) = self.weekdays.iter().next() else {
            return weeks;
        };

        for date in self.start.iter_days().take_while(|d| *d <= self.end) {
            let weekday = date.weekday().num_days_from_monday();
            if !self.weekdays.contains(&weekday) {
                continue;
            }

            if weeks.is_empty() || weekday == opening_weekday {
                let number = weeks.len() as u32 + 1;
                tracing::debug!("📅 Opening week {} on {}", number, date);
                weeks.push(Week {
                    number,
                    title: String::new(),
                    days: Vec::new(),
                });
            }

            let is_excluded = self.exclude.contains(&date);
            if is_excluded {
                tracing::debug!("🚫 No class on {}", date);
            }

            if let Some(week) = weeks.last_mut() {
                week.days.push(MeetingDay {
                    week_number: week.number,
                    date,
                    weekday_name: date.format("%A").to_string(),
                    is_excluded,
                    agenda: Vec::new(),
                });
            }
        }

        tracing::info!(
            "📅 Built {} week(s) between {} and {}",
            weeks.len(),
            self.start,
            self.end
        );
        weeks
    }
}

pub fn build_schedule<S: AsRef<str>>(
    year: &str,
    start: &str,
    end: &str,
    weekdays: &str,
    exclude: &[S],
) -> Result<Vec<Week>> {
    Ok(ScheduleBuilder::new(year, start, end, weekdays, exclude)?.build())
}

/// 以課表 TOML 格式輸出，方便手動補上標題與進度後交給 compile
pub fn render_schedule_toml(weeks: &[Week]) -> String {
    let mut blocks = Vec::new();

    for week in weeks {
        let num = week.number.to_string();
        blocks.push(EntryTemplate::ScheduleWeek.render_with(&[("num", num.as_str())]));

        for day in &week.days {
            let date = short_date(day.date);
            let no_class = if day.is_excluded { "true" } else { "false" };
            blocks.push(EntryTemplate::ScheduleDay.render_with(&[
                ("num", num.as_str()),
                ("date", date.as_str()),
                ("weekday", day.weekday_name.as_str()),
                ("no_class", no_class),
            ]));
        }
    }

    blocks.join("\n")
}
