use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// `[schedule]` 表格：產生課表所需的日期範圍與上課日
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDefinition {
    #[serde(deserialize_with = "year_as_string")]
    pub year: String,
    pub start: String,
    pub end: String,
    #[serde(default = "default_weekdays")]
    pub weekdays: String,
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_weekdays() -> String {
    "MTWRF".to_string()
}

// year = 2024 與 year = "2024" 都接受
fn year_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Text(String),
        Number(i64),
    }

    Ok(match Year::deserialize(deserializer)? {
        Year::Text(s) => s,
        Year::Number(n) => n.to_string(),
    })
}

/// 產生器輸出的一週
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Week {
    pub number: u32,
    pub title: String,
    pub days: Vec<MeetingDay>,
}

/// 產生器輸出的一次上課日
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingDay {
    pub week_number: u32,
    pub date: NaiveDate,
    pub weekday_name: String,
    pub is_excluded: bool,
    pub agenda: Vec<String>,
}

/// 已編好的課表文件 (可手動編輯後再交給 compile)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleDocument {
    pub weeks: Vec<WeekEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekEntry {
    #[serde(skip)]
    pub id: String,
    #[serde(default)]
    pub num: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub days: Vec<DayEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub weekday: String,
    #[serde(default)]
    pub no_class: bool,
    #[serde(default)]
    pub agenda: Vec<String>,
}

/// 課表日期格式：月/日，不補零
pub fn short_date(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}

impl From<&MeetingDay> for DayEntry {
    fn from(day: &MeetingDay) -> Self {
        Self {
            date: short_date(day.date),
            weekday: day.weekday_name.clone(),
            no_class: day.is_excluded,
            agenda: day.agenda.clone(),
        }
    }
}

impl From<&Week> for WeekEntry {
    fn from(week: &Week) -> Self {
        Self {
            id: format!("week-{}", week.number),
            num: Some(i64::from(week.number)),
            title: week.title.clone(),
            days: week.days.iter().map(DayEntry::from).collect(),
        }
    }
}

impl ScheduleDocument {
    pub fn from_weeks(weeks: &[Week]) -> Self {
        Self {
            weeks: weeks.iter().map(WeekEntry::from).collect(),
        }
    }
}
