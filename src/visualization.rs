use std::{fs::File, io::Write, path::Path};

use crate::{book::BookRecord, stats::Stats};

/// Width of the longest bar in a chart, in characters
pub const BAR_WIDTH: usize = 30;

/// Text rendering of library listings and statistics
#[derive(Debug)]
pub struct StatsVisualization;

impl StatsVisualization {
    /// One line per record with its position and a read badge
    #[must_use]
    pub fn render_listing(records: &[BookRecord]) -> String {
        if records.is_empty() {
            return "No books found.\n".to_string();
        }

        let mut out = String::new();
        for (idx, book) in records.iter().enumerate() {
            out.push_str(&format!(
                "[{idx}] {} by {} ({} - {}) [{}]\n",
                book.title,
                book.author,
                book.publication_year,
                book.genre,
                book.status_label()
            ));
        }
        out
    }

    /// A search hit: `**Title** by Author (Year) - Genre | Read`
    #[must_use]
    pub fn render_search_line(book: &BookRecord) -> String {
        format!(
            "**{}** by {} ({}) - {} | {}",
            book.title,
            book.author,
            book.publication_year,
            book.genre,
            book.status_label()
        )
    }

    /// Totals in one line
    #[must_use]
    pub fn render_headline(stats: &Stats) -> String {
        format!(
            "Total Books: {} | Read: {} | % Read: {}%",
            stats.total, stats.read_count, stats.percent_read
        )
    }

    /// A single bar split into read and unread parts; `None` for an empty library
    #[must_use]
    pub fn render_read_split(stats: &Stats) -> Option<String> {
        let read_width = stats.read_count.saturating_mul(BAR_WIDTH).checked_div(stats.total)?;
        let unread_width = BAR_WIDTH.saturating_sub(read_width);
        Some(format!(
            "Read vs Unread\n[{}{}] {} read / {} unread\n",
            "#".repeat(read_width),
            ".".repeat(unread_width),
            stats.read_count,
            stats.unread_count()
        ))
    }

    /// Horizontal bars scaled to the largest count
    #[must_use]
    pub fn render_bar_chart(title: &str, entries: &[(&str, usize)]) -> String {
        let mut out = format!("{title}\n");
        if entries.is_empty() {
            out.push_str("  (nothing to show)\n");
            return out;
        }

        let label_width = entries.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
        let max = entries.iter().map(|(_, count)| *count).max().unwrap_or(0);

        for &(label, count) in entries {
            out.push_str(&format!(
                "  {label:<label_width$} | {} {count}\n",
                "#".repeat(Self::bar_len(count, max))
            ));
        }
        out
    }

    /// Counts per decade, oldest first, labelled like `1960s`
    #[must_use]
    pub fn render_decades(stats: &Stats) -> String {
        let labels: Vec<(String, usize)> =
            stats.by_decade.iter().map(|(decade, count)| (format!("{decade}s"), *count)).collect();
        let entries: Vec<(&str, usize)> =
            labels.iter().map(|(label, count)| (label.as_str(), *count)).collect();
        Self::render_bar_chart("Books by Decade", &entries)
    }

    /// Headline followed by every chart
    #[must_use]
    pub fn render_report(stats: &Stats) -> String {
        let mut out = Self::render_headline(stats);
        out.push_str("\n\n");

        if let Some(split) = Self::render_read_split(stats) {
            out.push_str(&split);
            out.push('\n');
        }
        if !stats.by_genre.is_empty() {
            let entries: Vec<(&str, usize)> =
                stats.by_genre.iter().map(|(genre, count)| (genre.as_str(), *count)).collect();
            out.push_str(&Self::render_bar_chart("Books by Genre", &entries));
            out.push('\n');
        }
        if !stats.by_author.is_empty() {
            let entries: Vec<(&str, usize)> =
                stats.by_author.iter().map(|(author, count)| (author.as_str(), *count)).collect();
            out.push_str(&Self::render_bar_chart("Books by Author", &entries));
            out.push('\n');
        }
        if !stats.by_decade.is_empty() {
            out.push_str(&Self::render_decades(stats));
        }
        out
    }

    /// Generate a markdown table of every aggregate
    #[must_use]
    pub fn stats_table(stats: &Stats) -> String {
        let mut table = String::from("| Group | Key | Count |\n");
        table.push_str("|-------|-----|-------|\n");
        table.push_str(&format!("| Total | all | {} |\n", stats.total));
        table.push_str(&format!("| Status | Read | {} |\n", stats.read_count));
        table.push_str(&format!("| Status | Unread | {} |\n", stats.unread_count()));

        for (genre, count) in &stats.by_genre {
            table.push_str(&format!("| Genre | {genre} | {count} |\n"));
        }
        for (author, count) in &stats.by_author {
            table.push_str(&format!("| Author | {author} | {count} |\n"));
        }
        for (decade, count) in &stats.by_decade {
            table.push_str(&format!("| Decade | {decade}s | {count} |\n"));
        }

        table
    }

    /// Save a rendered report to a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written to
    pub fn save_report_to_file(report: &str, path: &Path) -> Result<(), std::io::Error> {
        let mut file = File::create(path)?;
        file.write_all(report.as_bytes())?;
        Ok(())
    }

    /// Bar length for `count` when `max` fills [`BAR_WIDTH`]; never zero for a non-zero count
    fn bar_len(count: usize, max: usize) -> usize {
        let len = count.saturating_mul(BAR_WIDTH).checked_div(max).unwrap_or(0);
        if count > 0 { len.max(1) } else { 0 }
    }
}
