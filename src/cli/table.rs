//! Columnar table rendering for listing output

/// Render rows as aligned columns separated by `| `.
///
/// With headers, a `-` rule as wide as the longest line follows the header
/// row. Returns an empty string when there are no rows.
pub fn columnar(rows: &[Vec<String>], headers: Option<&[&str]>) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let column_count = headers.map_or(rows[0].len(), <[&str]>::len);
    let mut lines: Vec<Vec<String>> = Vec::with_capacity(rows.len() + 1);
    if let Some(headers) = headers {
        lines.push(headers.iter().map(|h| (*h).to_string()).collect());
    }
    lines.extend(rows.iter().map(|row| {
        let mut row: Vec<String> = row.iter().take(column_count).cloned().collect();
        row.resize(column_count, String::new());
        row
    }));

    let widths: Vec<usize> = (0..column_count)
        .map(|i| {
            let longest = lines.iter().map(|l| l[i].chars().count()).max().unwrap_or(0);
            (longest + 1).max(2)
        })
        .collect();

    let mut rendered: Vec<String> = lines
        .iter()
        .map(|line| {
            let mut out = String::new();
            for (i, cell) in line.iter().enumerate() {
                if i + 1 < column_count {
                    let pad = widths[i] - cell.chars().count();
                    out.push_str(cell);
                    out.push_str(&" ".repeat(pad));
                    out.push_str("| ");
                } else {
                    out.push_str(cell);
                }
            }
            out
        })
        .collect();

    if headers.is_some() {
        let longest = rendered.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        rendered.insert(1, "-".repeat(longest));
    }

    rendered.join("\n")
}
