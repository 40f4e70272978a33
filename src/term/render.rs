use std::io;
use console::{style, Term};

use super::log::Log;

/// Fits a string s into length l by either truncating the string, or appending char ch repeatedly
pub fn string_to_len(s: impl AsRef<str>, l: usize, ch: char) -> String {
    return console::pad_str_with(
        s.as_ref(),
        l,
        console::Alignment::Left,
        Some("..."),
        ch
    ).into_owned();
}

pub trait Renderable {
    fn log_panes(&self) -> Vec<&Log>;
    fn status_line(&self) -> String;
}

pub struct Renderer;

impl Renderer {
    fn pane_widths(&self, pane_count: usize, columns: usize) -> Box<[usize]> {
        let mut widths = Vec::<usize>::new();
        widths.reserve_exact(pane_count);

        let width_equal = columns / pane_count;
        let mut width_remainder = columns % pane_count;

        for _ in 0..pane_count {
            let mut pane_size = width_equal;
            if width_remainder > 0 {
                pane_size += 1;
                width_remainder -= 1;
            }

            widths.push(pane_size);
        }

        return widths.into_boxed_slice();
    }

    fn pane_lines(&self, log: &Log, rows: usize, columns: usize) -> Vec<String> {
        let log_data = log.data.lock().unwrap();

        // Newest lines belong at the bottom of the pane, blanks above them
        let mut recent: Vec<&String> = log_data.lines.iter().take(rows).collect();
        recent.reverse();

        let mut lines = Vec::with_capacity(rows);
        for _ in 0..rows - recent.len() {
            lines.push(format!("│ {} │", string_to_len("", columns - 4, ' ')));
        }
        for line in recent {
            lines.push(format!("│ {} │", string_to_len(line, columns - 4, ' ')));
        }

        return lines;
    }

    fn all_pane_lines(&self, rendering: &[&Log], rows: usize, columns: usize) -> Vec<String> {
        let pane_columns = self.pane_widths(rendering.len(), columns);
        let mut per_pane = Vec::<Vec<String>>::with_capacity(rendering.len());
        let mut all_lines = Vec::<String>::with_capacity(rows);

        let mut i = 0;
        for log in rendering {
            per_pane.push(self.pane_lines(&log, rows, pane_columns[i]));
            i += 1;
        }

        for i in 0..rows {
            let mut full_line = String::with_capacity(columns + 1);
            for j in 0..rendering.len() {
                full_line.push_str(&per_pane[j][i]);
            }

            all_lines.push(full_line);
        }

        return all_lines;
    }

    fn pane_header(&self, rendering: &[&Log], columns: usize) -> String {
        let pane_columns = self.pane_widths(rendering.len(), columns);
        let mut header_line = String::with_capacity(columns + 1);

        let mut i = 0;
        for s in pane_columns {
            let log = &rendering[i];

            let pane_header = format!(
                "╭{}─╮",
                string_to_len(
                    style(
                        format!(" {} Log ", log.name())
                    ).bold().to_string(),
                    s - 3,
                    '─'
                )
            );

            header_line.push_str(&pane_header);
            i += 1;
        }
        header_line.push('\n');

        return header_line;
    }

    fn pane_footer(&self, rendering: &[&Log], columns: usize) -> String {
        let pane_columns = self.pane_widths(rendering.len(), columns);
        let mut footer_line = String::with_capacity(columns + 1);

        for s in pane_columns {
            let pane_footer = format!(
                "╰{}╯",
                string_to_len(
                    "",
                    s - 2,
                    '─'
                )
            );

            footer_line.push_str(&pane_footer);
        }
        footer_line.push('\n');

        return footer_line;
    }

    fn status_footer(&self, status: &str, columns: usize) -> String {
        return string_to_len(
            style(format!(" {} ", status)).bold().reverse().to_string(),
            columns,
            ' '
        );
    }

    pub fn render(&self, term: &Term, rendering: &impl Renderable) -> io::Result<()> {
        let panes = rendering.log_panes();

        term.move_cursor_to(0, 0)?;
        term.clear_to_end_of_screen()?;
        let (rows, columns) = term.size();
        let rows = rows as usize;
        let columns = columns as usize;

        let header = self.pane_header(&panes, columns);
        let footer = self.pane_footer(&panes, columns);

        let mut content = String::with_capacity((columns + 1) * (rows - 3));
        for l in self.all_pane_lines(&panes, rows - 3, columns) {
            content.push_str(&l);
            content.push('\n');
        }

        let status = self.status_footer(&rendering.status_line(), columns);

        let mut term_str = String::with_capacity(header.len() + content.len() + footer.len() + status.len());
        term_str.push_str(&header);
        term_str.push_str(&content);
        term_str.push_str(&footer);
        term_str.push_str(&status);

        term.write_str(&term_str)?;
        term.hide_cursor()?;

        return Ok(());
    }
}
