use crate::config::toml_config::REQUIRED_SECTIONS;
use crate::core::templates::{designation_notice, EntryTemplate};
use crate::domain::model::{DayEntry, ScheduleDocument};
use crate::utils::error::{Result, SyllabusError};
use crate::utils::flatten::flatten_config;
use crate::utils::substitute::{substitute_table, value_to_text};
use crate::utils::text::{wrap_paragraphs, DEFAULT_WIDTH};
use crate::utils::validation::validate_required_fields;
use toml::{Table, Value};

/// 會被渲染成條目清單的區段，輸出鍵名為複數 (例如 `books`)
pub const LIST_SECTIONS: &[&str] = &["assignment", "book", "objective"];

/// 攤平後需要重新排版的長文字欄位：(來源鍵, 目標鍵)
pub const WRAPPED_FIELDS: &[(&str, &str)] = &[
    ("course_description", "course_description"),
    ("course_catalog", "course_catalog"),
];

pub const DESIGNATION_KEY: &str = "course_designation";
pub const DESIGNATION_NOTICE_KEY: &str = "designation_notice";
pub const SCHEDULE_KEY: &str = "course_schedule";

/// 將配置、課表與 Markdown 模板組合成完整講義
#[derive(Debug, Clone)]
pub struct SyllabusRenderer {
    width: usize,
}

impl Default for SyllabusRenderer {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
        }
    }
}

impl SyllabusRenderer {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    /// 產生最終替換用的單層上下文；不會修改呼叫端的配置
    pub fn build_context(&self, config: &Table, schedule: &ScheduleDocument) -> Result<Table> {
        validate_required_fields(config, REQUIRED_SECTIONS)?;

        let mut working = config.clone();

        for section in LIST_SECTIONS {
            if let Some(value) = config.get(*section) {
                let rendered = self.render_list_section(section, value)?;
                working.insert(format!("{}s", section), Value::String(rendered));
            }
        }

        working.insert(
            SCHEDULE_KEY.to_string(),
            Value::String(self.render_schedule(schedule)),
        );

        let mut context = flatten_config(&working);

        for (source, target) in WRAPPED_FIELDS {
            if let Some(value) = context.get(*source) {
                let wrapped = wrap_paragraphs(&value_to_text(value), self.width);
                context.insert(target.to_string(), Value::String(wrapped));
            }
        }

        let code = context
            .get(DESIGNATION_KEY)
            .map(value_to_text)
            .unwrap_or_else(|| "None".to_string());
        let notice = designation_notice(&code)?;
        context.insert(
            DESIGNATION_NOTICE_KEY.to_string(),
            Value::String(notice.to_string()),
        );

        tracing::debug!("🧩 Substitution context has {} keys", context.len());
        Ok(context)
    }

    /// 串接模板 (各自去除首尾空白，中間空一行) 後做一次安全替換
    pub fn compile<S: AsRef<str>>(
        &self,
        config: &Table,
        schedule: &ScheduleDocument,
        templates: &[S],
    ) -> Result<String> {
        let context = self.build_context(config, schedule)?;

        let document = templates
            .iter()
            .map(|t| t.as_ref().trim())
            .collect::<Vec<_>>()
            .join("\n\n");

        tracing::info!(
            "📝 Rendering {} template(s) with {} week(s)",
            templates.len(),
            schedule.weeks.len()
        );
        Ok(substitute_table(&document, &context))
    }

    fn render_list_section(&self, section: &str, value: &Value) -> Result<String> {
        let template = EntryTemplate::from_name(section)?;

        let entries = value
            .as_array()
            .ok_or_else(|| SyllabusError::InvalidConfigValueError {
                field: section.to_string(),
                value: value.to_string(),
                reason: format!("expected an array of tables ([[{}]])", section),
            })?;

        let mut rendered = Vec::with_capacity(entries.len());
        for entry in entries {
            let vars = entry
                .as_table()
                .ok_or_else(|| SyllabusError::InvalidConfigValueError {
                    field: section.to_string(),
                    value: entry.to_string(),
                    reason: format!("each [[{}]] entry must be a table", section),
                })?;
            rendered.push(wrap_paragraphs(&template.render(vars), self.width));
        }

        tracing::debug!("📚 Rendered {} {} entries", rendered.len(), section);
        Ok(rendered.join("\n"))
    }

    pub fn render_schedule(&self, schedule: &ScheduleDocument) -> String {
        let mut blocks = Vec::new();

        for week in &schedule.weeks {
            let num = week.num.map(|n| n.to_string()).unwrap_or_default();
            blocks.push(
                EntryTemplate::Week.render_with(&[("num", num.as_str()), ("title", week.title.as_str())]),
            );
            blocks.extend(week.days.iter().map(render_day));
        }

        blocks.join("\n")
    }
}

fn render_day(day: &DayEntry) -> String {
    let agenda = if day.no_class {
        EntryTemplate::NoClass.render_with(&[])
    } else {
        day.agenda
            .iter()
            .map(|item| EntryTemplate::AgendaItem.render_with(&[("item", item.as_str())]))
            .collect::<String>()
    };

    EntryTemplate::Day.render_with(&[
        ("weekday", day.weekday.as_str()),
        ("date", day.date.as_str()),
        ("agenda", agenda.as_str()),
    ])
}

/// 以預設寬度編譯講義
pub fn compile<S: AsRef<str>>(
    config: &Table,
    schedule: &ScheduleDocument,
    templates: &[S],
) -> Result<String> {
    SyllabusRenderer::default().compile(config, schedule, templates)
}
