//! 终端输出
//!
//! 命中词由引擎用 `<em>` 包裹，这里换成反色显示。
//! 遵循 `NO_COLOR`，输出不是终端时不带颜色。

use std::io::{self, IsTerminal, Write};

use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use regex::Regex;
use search_core::{Hit, SearchResults};

pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const MARK: &str = "\x1b[30;47m";
    pub const ERROR: &str = "\x1b[1;107;41m";
}

use colors::*;

static HIGHLIGHT: Lazy<Regex> = Lazy::new(|| Regex::new(r"<em>(.+?)</em>").expect("valid regex"));

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    colors_enabled(std::env::var_os("NO_COLOR").is_some(), io::stdout().is_terminal())
}

fn colors_enabled(no_color: bool, stdout_is_tty: bool) -> bool {
    !no_color && stdout_is_tty
}

pub struct Printer {
    width: usize,
    colors: bool,
}

impl Printer {
    pub fn new(width: usize, colors: bool) -> Self {
        Self { width, colors }
    }

    pub fn detect(width: usize) -> Self {
        Self::new(width, use_colors())
    }

    fn paint(&self, style: &str, text: &str) -> String {
        if self.colors {
            format!("{style}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    pub fn rule(&self, w: &mut impl Write, ch: char) -> io::Result<()> {
        let line: String = std::iter::repeat_n(ch, self.width).collect();
        writeln!(w, "{}", self.paint(DIM, &line))
    }

    /// 分隔线包围的标题，例如 `?q=rust`
    pub fn banner(&self, w: &mut impl Write, label: &str, value: &str) -> io::Result<()> {
        self.rule(w, '━')?;
        writeln!(w, "{}{}", self.paint(DIM, label), self.paint(BOLD, value))?;
        self.rule(w, '━')
    }

    pub fn no_results(&self, w: &mut impl Write) -> io::Result<()> {
        writeln!(w, "⨯ No results")?;
        self.rule(w, '─')
    }

    pub fn error(&self, w: &mut impl Write, message: &str) -> io::Result<()> {
        writeln!(w, "{}", self.paint(ERROR, &format!("ERROR: {message}")))
    }

    pub fn status(&self, w: &mut impl Write, label: &str, value: &str) -> io::Result<()> {
        writeln!(w, "{}{}", self.paint(DIM, label), self.paint(BOLD, value))
    }

    /// `<em>x</em>` 换成反色的 x；无颜色时只去掉标签
    pub fn highlight(&self, input: &str) -> String {
        let replacement = if self.colors {
            format!("{MARK}$1{RESET}{BOLD}")
        } else {
            String::from("$1")
        };
        HIGHLIGHT.replace_all(input, replacement.as_str()).into_owned()
    }

    fn field(&self, w: &mut impl Write, bullet: &str, name: &str, value: &str) -> io::Result<()> {
        writeln!(
            w,
            "{bullet}{} {}",
            self.paint(DIM, &format!("{name}:")),
            self.paint(BOLD, &self.highlight(value))
        )
    }

    pub fn hit(&self, w: &mut impl Write, hit: &Hit) -> io::Result<()> {
        self.field(w, "• ", "title", hit.title())?;
        self.field(w, "  ", "brief_content", hit.brief())?;
        self.field(w, "  ", "category", hit.category())?;
        self.field(w, "  ", "company", hit.company())?;

        let created = format_create_time(&hit.document.create_time);
        writeln!(
            w,
            "  {}",
            self.paint(DIM, &format!("id: {}  created: {created}", hit.document.id))
        )
    }

    pub fn results(&self, w: &mut impl Write, results: &SearchResults, page_size: usize) -> io::Result<()> {
        for hit in &results.hits {
            self.hit(w, hit)?;
        }
        self.rule(w, '─')?;
        writeln!(w, "{}", self.paint(DIM, &format!("{} results", results.total)))?;
        if let Some(cursor) = results.next_cursor(page_size) {
            writeln!(w, "{}", self.paint(DIM, &format!("next page: --after '{cursor}'")))?;
        }
        Ok(())
    }
}

/// 创建时间是字符串形式的秒级时间戳，无法解析时原样输出
fn format_create_time(raw: &str) -> String {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}
