use crate::utils::error::{Result, SyllabusError};
use crate::utils::substitute::{safe_substitute, substitute_table};
use toml::Table;

/// 固定的條目模板目錄；新增一種條目只需要在表中加一列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryTemplate {
    Objective,
    Book,
    Assignment,
    Week,
    Day,
    AgendaItem,
    NoClass,
    ScheduleWeek,
    ScheduleDay,
}

struct TemplateRow {
    entry: EntryTemplate,
    name: &'static str,
    source: &'static str,
    placeholders: &'static [&'static str],
}

const CATALOG: &[TemplateRow] = &[
    TemplateRow {
        entry: EntryTemplate::Objective,
        name: "objective",
        source: "+ $description",
        placeholders: &["description"],
    },
    TemplateRow {
        entry: EntryTemplate::Book,
        name: "book",
        source: "+ $author. $title ($isbn)",
        placeholders: &["author", "title", "isbn"],
    },
    TemplateRow {
        entry: EntryTemplate::Assignment,
        name: "assignment",
        source: "| $due | $points | $name |",
        placeholders: &["due", "points", "name"],
    },
    TemplateRow {
        entry: EntryTemplate::Week,
        name: "week",
        source: "**[Week $num -- $title]{.smallcaps}**\n",
        placeholders: &["num", "title"],
    },
    TemplateRow {
        entry: EntryTemplate::Day,
        name: "day",
        // 結尾的反斜線是 Markdown 強制換行
        source: "$weekday ($date)\n\n$agenda\\\n",
        placeholders: &["weekday", "date", "agenda"],
    },
    TemplateRow {
        entry: EntryTemplate::AgendaItem,
        name: "agenda_item",
        source: "+ $item\n",
        placeholders: &["item"],
    },
    TemplateRow {
        entry: EntryTemplate::NoClass,
        name: "no_class",
        source: "+ **No class**\n",
        placeholders: &[],
    },
    TemplateRow {
        entry: EntryTemplate::ScheduleWeek,
        name: "schedule_week",
        source: "[week-$num]\nnum = $num\ntitle = \"\"\n",
        placeholders: &["num"],
    },
    TemplateRow {
        entry: EntryTemplate::ScheduleDay,
        name: "schedule_day",
        source: "  [[week-$num.days]]\n  date = \"$date\"\n  weekday = \"$weekday\"\n  no_class = $no_class\n  agenda = []\n",
        placeholders: &["num", "date", "weekday", "no_class"],
    },
];

impl EntryTemplate {
    /// 以內部名稱查詢 (例如配置中的 `assignment` 區段)
    pub fn from_name(name: &str) -> Result<Self> {
        CATALOG
            .iter()
            .find(|row| row.name.eq_ignore_ascii_case(name))
            .map(|row| row.entry)
            .ok_or_else(|| SyllabusError::TemplateNotFound {
                name: name.to_string(),
            })
    }

    // CATALOG 的列順序與列舉宣告順序一致
    fn row(&self) -> &'static TemplateRow {
        &CATALOG[*self as usize]
    }

    pub fn name(&self) -> &'static str {
        self.row().name
    }

    pub fn source(&self) -> &'static str {
        self.row().source
    }

    pub fn placeholders(&self) -> &'static [&'static str] {
        self.row().placeholders
    }

    /// 以 TOML 表格渲染 (配置中的 array-of-tables 條目)
    pub fn render(&self, vars: &Table) -> String {
        substitute_table(self.source(), vars)
    }

    /// 以鍵值對渲染
    pub fn render_with(&self, pairs: &[(&str, &str)]) -> String {
        safe_substitute(self.source(), |name| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        })
    }
}

const KLPC_NOTICE: &str = "\
This course satisfies the Language, Philosophy and Culture (KLPC) component of \
the Texas A&M University Core Curriculum. Courses in this category focus on how \
ideas, values, beliefs, and other aspects of culture express and affect human \
experience.

Students will be assessed on the following core objectives: Critical Thinking, \
to include creative thinking, innovation, inquiry, and analysis, evaluation and \
synthesis of information; Communication, to include effective development, \
interpretation and expression of ideas through written, oral, and visual \
communication; Social Responsibility, to include intercultural competence, \
knowledge of civic responsibility, and the ability to engage effectively in \
regional, national, and global communities; and Personal Responsibility, to \
include the ability to connect choices, actions, and consequences to ethical \
decision-making.";

/// 課程特殊分類 (例如核心課程代碼)，決定要插入的公告文字
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Designation {
    None,
    Klpc,
}

const DESIGNATIONS: &[(&str, Designation, &str)] = &[
    ("None", Designation::None, "None"),
    ("KLPC", Designation::Klpc, KLPC_NOTICE),
];

impl Designation {
    pub fn from_code(code: &str) -> Result<Self> {
        DESIGNATIONS
            .iter()
            .find(|(name, _, _)| *name == code)
            .map(|(_, designation, _)| *designation)
            .ok_or_else(|| SyllabusError::UnsupportedDesignation {
                code: code.to_string(),
            })
    }

    pub fn notice(&self) -> &'static str {
        DESIGNATIONS
            .iter()
            .find(|(_, designation, _)| designation == self)
            .map(|(_, _, notice)| *notice)
            .unwrap_or("None")
    }
}

/// 代碼直接換成公告文字
pub fn designation_notice(code: &str) -> Result<&'static str> {
    Designation::from_code(code).map(|d| d.notice())
}
