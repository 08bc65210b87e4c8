//! Text grid for widgets.
//!
//! Rows go in, columns come out: cells are stored column-major so that
//! rendering emits one vertical stack per column inside a horizontal row.

use crate::widget::{Color, Font, WidgetStack, WidgetText};

const HEADER_FONT: Font = Font::BoldMonospacedSystem(16.0);

/// Accumulates rows of cells and renders them as a grid.
///
/// A cell may carry its own color as `"text;color"`, e.g. `"Home;#FF0000"`.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<Vec<String>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Headers are an ordinary first row; the header style comes from
    /// position, not from this call.
    pub fn add_headers<S: AsRef<str>>(&mut self, cells: &[S]) {
        self.add_row(cells);
    }

    pub fn add_row<S: AsRef<str>>(&mut self, cells: &[S]) {
        if self.columns.len() < cells.len() {
            self.columns.resize_with(cells.len(), Vec::new);
        }
        for (column, cell) in self.columns.iter_mut().zip(cells) {
            column.push(cell.as_ref().to_string());
        }
    }

    pub fn columns(&self) -> &[Vec<String>] {
        &self.columns
    }

    /// Append the grid to `widget`.
    ///
    /// Each call appends a new tree; rendering twice duplicates the grid.
    pub fn render<W: WidgetStack>(&self, widget: &mut W) {
        let inherited = widget.text_color();
        let row = widget.add_stack();
        row.set_text_color(inherited.clone());

        for cells in &self.columns {
            let column = row.add_stack();
            column.set_text_color(inherited.clone());
            column.layout_vertically();
            for (i, cell) in cells.iter().enumerate() {
                let (content, color) = split_cell(cell, &inherited);
                let text = column.add_text(content);
                text.set_text_color(color);
                if i == 0 {
                    text.set_font(HEADER_FONT);
                }
            }
            row.add_spacer();
        }
    }
}

/// Split on the first `;`; everything after it is the color.
fn split_cell<'a>(cell: &'a str, inherited: &Option<Color>) -> (&'a str, Option<Color>) {
    match cell.split_once(';') {
        Some((text, color)) => (text, Some(Color::new(color))),
        None => (cell, inherited.clone()),
    }
}
