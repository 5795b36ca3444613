//! Convert the course spreadsheet export (CSV) into corpus JSON.
//!
//! Expected columns: `title, share_title, share_description, content`. The
//! first line is a header and is skipped. Metadata the spreadsheet does not
//! carry is derived from the title:
//!
//! - **keywords**: up to five distinct words of at least two characters from
//!   the title, then the share description.
//! - **level**: 中级 for 进阶/高级 titles, 高级 for 专业/深度, else 初级.
//! - **duration**: `N天` counts ten minutes per day, `N分钟` is taken as is,
//!   otherwise 15.
//! - **category**: first matching rule in [`CATEGORY_RULES`], else 正念冥想.

use regex::Regex;
use std::sync::LazyLock;
use zensearch_core::Course;

const MAX_KEYWORDS: usize = 5;
const MIN_KEYWORD_CHARS: usize = 2;
const DEFAULT_DURATION: u32 = 15;
const MINUTES_PER_DAY: u32 = 10;
const DEFAULT_TEACHER: &str = "Now团队";
const DEFAULT_CATEGORY: &str = "正念冥想";

/// `(category, title substrings)`, checked in order.
pub const CATEGORY_RULES: &[(&str, &[&str])] = &[
    ("睡眠改善", &["睡眠", "助眠", "舒眠"]),
    ("压力管理", &["压力", "减压", "放松"]),
    ("专注力", &["专注", "注意力"]),
    ("情绪管理", &["情绪", "焦虑"]),
    ("音乐辅助", &["音乐"]),
    ("入门基础", &["基础", "入门"]),
];

static WORD_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,，\s、]").expect("keyword split pattern must compile"));

static DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)天|(\d+)分钟").expect("duration pattern must compile"));

/// Parse CSV text into courses with sequential ids starting at 1.
///
/// Blank lines and rows with fewer than four columns are skipped.
pub fn convert_csv(text: &str) -> Vec<Course> {
    let courses: Vec<Course> = text
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(split_row)
        .filter(|cols| cols.len() >= 4)
        .zip(1u64..)
        .map(|(cols, id)| build_course(id, &cols))
        .collect();
    tracing::info!(courses = courses.len(), "csv converted");
    courses
}

/// Pretty-printed JSON array, non-ASCII left unescaped.
pub fn to_json(courses: &[Course]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(courses)
}

/// Split on commas outside double quotes. Quotes are dropped and every
/// value is trimmed.
fn split_row(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => values.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(ch),
        }
    }
    values.push(current.trim().to_string());
    values
}

fn build_course(id: u64, cols: &[String]) -> Course {
    let title = cols[0].clone();
    let share_description = &cols[2];
    let content = &cols[3];

    Course {
        id,
        keywords: keywords(&title, share_description),
        description: if content.is_empty() { share_description.clone() } else { content.clone() },
        level: level(&title).to_string(),
        duration: duration(&title),
        teacher: DEFAULT_TEACHER.to_string(),
        category: category(&title).to_string(),
        title,
    }
}

fn keywords(title: &str, share_description: &str) -> String {
    let mut words: Vec<&str> = Vec::new();
    let candidates = WORD_SPLIT
        .split(title)
        .chain(WORD_SPLIT.split(share_description))
        .filter(|w| w.chars().count() >= MIN_KEYWORD_CHARS);
    for word in candidates {
        if !words.contains(&word) {
            words.push(word);
        }
    }
    words.truncate(MAX_KEYWORDS);
    words.join(", ")
}

fn level(title: &str) -> &'static str {
    if title.contains("进阶") || title.contains("高级") {
        "中级"
    } else if title.contains("专业") || title.contains("深度") {
        "高级"
    } else {
        "初级"
    }
}

fn duration(title: &str) -> u32 {
    let Some(caps) = DURATION.captures(title) else {
        return DEFAULT_DURATION;
    };
    if let Some(days) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) {
        days.saturating_mul(MINUTES_PER_DAY)
    } else if let Some(minutes) = caps.get(2).and_then(|m| m.as_str().parse::<u32>().ok()) {
        minutes
    } else {
        DEFAULT_DURATION
    }
}

fn category(title: &str) -> &'static str {
    CATEGORY_RULES
        .iter()
        .find(|(_, needles)| needles.iter().any(|n| title.contains(n)))
        .map_or(DEFAULT_CATEGORY, |(name, _)| *name)
}
