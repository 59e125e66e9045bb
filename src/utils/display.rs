//! Terminal display utilities for catalog and book listings.

use comfy_table::{presets, Attribute, Cell, ContentArrangement, Table};
use unicode_width::UnicodeWidthChar;

use crate::models::{RemoteBookRecord, ResourceRecord};

/// Message shown when the catalog filter matches nothing
pub const NO_RESOURCES_MESSAGE: &str = "No resources matched. Try different filters.";

/// Message shown when a remote lookup yields nothing, whether it failed or not
pub const NO_BOOKS_MESSAGE: &str = "No books found.";

/// Truncate text to fit within the specified width using unicode-aware truncation.
///
/// # Examples
///
/// ```
/// use engineer_vault::utils::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("Hello World", 8), "Hello...");
/// assert_eq!(truncate_with_ellipsis("Hi", 8), "Hi");
/// ```
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let char_widths: Vec<(char, usize)> = text
        .chars()
        .map(|c| (c, UnicodeWidthChar::width(c).unwrap_or(1)))
        .collect();

    let total_width: usize = char_widths.iter().map(|(_, w)| *w).sum();
    if total_width <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut current_width = 0;
    let mut end_idx = 0;

    for (i, (_, w)) in char_widths.iter().enumerate() {
        if current_width + w > budget {
            break;
        }
        current_width += w;
        end_idx = i + 1;
    }

    if end_idx == 0 {
        return "...".to_string();
    }

    let truncated: String = char_widths[..end_idx].iter().map(|(c, _)| *c).collect();
    format!("{}...", truncated.trim_end())
}

/// Build a table of catalog resources
pub fn resource_table(resources: &[&ResourceRecord], max_title_width: usize) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Title", "Category", "Type", "Level", "Year", "Tags"]);

    for resource in resources {
        table.add_row(vec![
            Cell::new(truncate_with_ellipsis(&resource.title, max_title_width))
                .add_attribute(Attribute::Bold),
            Cell::new(resource.category.label()),
            Cell::new(resource.kind.label()),
            Cell::new(resource.level.label()),
            Cell::new(resource.year),
            Cell::new(resource.tags.join(", ")),
        ]);
    }

    table
}

/// Build a table of remote books
pub fn book_table(books: &[RemoteBookRecord], max_title_width: usize) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Title", "Author", "Year", "Link"]);

    for book in books {
        let link = match (&book.download_link, &book.online_link) {
            (Some(url), _) => format!("PDF: {}", url),
            (None, Some(url)) => format!("View: {}", url),
            (None, None) => String::new(),
        };

        table.add_row(vec![
            Cell::new(truncate_with_ellipsis(&book.title, max_title_width))
                .add_attribute(Attribute::Bold),
            Cell::new(truncate_with_ellipsis(&book.author, 30)),
            Cell::new(book.year.to_string()),
            Cell::new(link),
        ]);
    }

    table
}

/// Plain-text lines for catalog resources
pub fn resource_lines(resources: &[&ResourceRecord]) -> Vec<String> {
    resources
        .iter()
        .map(|r| format!("{}\n  {}", r.title, r.summary()))
        .collect()
}

/// Plain-text lines for remote books
pub fn book_lines(books: &[RemoteBookRecord]) -> Vec<String> {
    books
        .iter()
        .map(|book| {
            let mut line = format!("{} - {} ({})", book.title, book.author, book.year);
            if let Some(ref url) = book.download_link {
                line.push_str(&format!("\n  PDF: {}", url));
            } else if let Some(ref url) = book.online_link {
                line.push_str(&format!("\n  View: {}", url));
            }
            line
        })
        .collect()
}
