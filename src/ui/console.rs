use crate::ui::{BookendPhase, Reporter};
use itertools::Itertools;

const RULE: &str = "----------------------------------------------------------------------------";
const MESSAGE_WIDTH: usize = 118;

/// Reporter that renders boxed tables on stdout
#[derive(Debug, Default, Clone)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for ConsoleReporter {
    fn bookend(&self, command: &str, phase: BookendPhase, message: Option<&str>) {
        println!("{}", RULE);
        println!(
            " SFCCDX | v{} | {}: {}",
            env!("CARGO_PKG_VERSION"),
            command,
            phase.label()
        );
        println!("{}", RULE);

        if let Some(message) = message {
            println!(" -- {}", message);
        }
    }

    fn success(&self, message: &str) {
        println!("{}", render_table(&["Success Message"], &[vec![format!(" -- {}", message)]]));
    }

    fn error(&self, message: &str) {
        println!("{}", render_table(&["Error Message"], &[vec![format!(" -- {}", message)]]));
    }

    fn fields(&self, rows: &[(String, String)]) {
        let rows = rows
            .iter()
            .map(|(name, value)| vec![name.clone(), value.clone()])
            .collect_vec();
        println!("{}", render_table(&["Field", "Value"], &rows));
    }

    fn results(&self, title: &str, rows: &[Vec<String>]) {
        println!("{}", render_table(&[title], rows));
    }
}

/// Render a simple boxed table. Multi-line cells are split over several rows.
pub fn render_table(head: &[&str], rows: &[Vec<String>]) -> String {
    let columns = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(head.len()))
        .max()
        .unwrap_or(0);

    let widths = (0..columns)
        .map(|column| {
            let head_width = head.get(column).map_or(0, |h| h.chars().count());
            let cell_width = rows
                .iter()
                .filter_map(|row| row.get(column))
                .flat_map(|cell| cell.lines())
                .map(|line| line.chars().count())
                .max()
                .unwrap_or(0);
            head_width.max(cell_width).min(MESSAGE_WIDTH)
        })
        .collect_vec();

    let separator = format!(
        "+{}+",
        widths.iter().map(|w| "-".repeat(w + 2)).join("+")
    );

    let mut out = vec![separator.clone()];
    out.push(render_line(&widths, |column| {
        head.get(column).map(|h| h.to_string()).unwrap_or_default()
    }));
    out.push(separator.clone());

    for row in rows {
        let cell_lines = (0..columns)
            .map(|column| {
                row.get(column)
                    .map(|cell| cell.lines().map(str::to_string).collect_vec())
                    .unwrap_or_default()
            })
            .collect_vec();
        let height = cell_lines.iter().map(Vec::len).max().unwrap_or(0).max(1);

        for line in 0..height {
            out.push(render_line(&widths, |column| {
                cell_lines[column].get(line).cloned().unwrap_or_default()
            }));
        }
    }

    out.push(separator);
    out.join("\n")
}

fn render_line(widths: &[usize], cell: impl Fn(usize) -> String) -> String {
    let cells = widths
        .iter()
        .enumerate()
        .map(|(column, width)| {
            let text: String = cell(column).chars().take(*width).collect();
            format!(" {:<width$} ", text, width = width)
        })
        .join("|");
    format!("|{}|", cells)
}
