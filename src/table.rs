use crate::aggregator::Row;

const HEADERS: [&'static str; 3] = ["Date", "Inbound", "Outbound"];
const COLUMN_SEPARATOR: &str = "  ";

fn split_totals(rows: &[Row]) -> (Vec<&Row>, Vec<&Row>) {
    rows.iter().partition(|row| !row.is_totals())
}

fn column_widths(rows: &[Row]) -> [usize; 3] {
    let mut widths = [0usize; 3];
    let header: [&str; 3] = HEADERS;
    let lines = std::iter::once(header).chain(rows.iter().map(|row| row.cells()));
    for cells in lines {
        for (width, cell) in widths.iter_mut().zip(cells.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

fn plain_line(cells: [&str; 3], widths: &[usize; 3]) -> String {
    cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<String>>()
        .join(COLUMN_SEPARATOR)
}

/// Renders rows as a fixed-width table for chat notifications. The totals row
/// is set apart from the daily rows by a dash line.
pub fn render_plain(rows: &[Row]) -> String {
    let widths = column_widths(rows);
    let header = plain_line(HEADERS, &widths);
    let separator = "-".repeat(header.chars().count());
    let (daily, totals) = split_totals(rows);

    let mut lines = vec![header, separator.clone()];
    lines.extend(daily.iter().map(|row| plain_line(row.cells(), &widths)));
    lines.push(separator);
    lines.extend(totals.iter().map(|row| plain_line(row.cells(), &widths)));
    lines.join("\n")
}

fn markdown_line(cells: &[String]) -> String {
    format!("| {} |\n", cells.join(" | "))
}

/// Renders rows as a three column pipe table with a bold totals row.
pub fn render_markdown(rows: &[Row]) -> String {
    let (daily, totals) = split_totals(rows);
    let mut markdown = markdown_line(&HEADERS.iter().map(|h| h.to_string()).collect::<Vec<_>>());
    markdown.push_str(&markdown_line(&vec!["---".to_string(); HEADERS.len()]));
    for row in daily {
        markdown.push_str(&markdown_line(
            &row.cells().iter().map(|cell| cell.to_string()).collect::<Vec<_>>(),
        ));
    }
    for row in totals {
        markdown.push_str(&markdown_line(
            &row.cells()
                .iter()
                .map(|cell| format!("**{}**", cell))
                .collect::<Vec<_>>(),
        ));
    }
    markdown
}
