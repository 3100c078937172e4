use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Shades cycled through to make the skeleton pulse.
pub const SHADES: [&str; 4] = ["░", "▒", "▓", "▒"];

/// Placeholder rows shown while a table is loading: `rows × columns` cells,
/// each a bar of shade characters whose intensity follows `phase`.
#[derive(Debug, Clone, Copy)]
pub struct TableLoading {
    rows: u16,
    columns: u16,
    phase: u64,
}

impl TableLoading {
    pub fn new(rows: u16, columns: u16) -> Self {
        Self {
            rows,
            columns,
            phase: 0,
        }
    }

    /// Animation step, usually the tick counter.
    pub fn phase(mut self, phase: u64) -> Self {
        self.phase = phase;
        self
    }

    fn shade(&self, row: u16) -> &'static str {
        let index = (self.phase + row as u64) % SHADES.len() as u64;
        SHADES[index as usize]
    }
}

impl Widget for TableLoading {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.columns == 0 || area.width < self.columns {
            return;
        }
        let cell_width = area.width / self.columns;
        let bar_width = cell_width.saturating_sub(1).max(1);
        let style = Style::default().fg(Color::DarkGray);

        for row in 0..self.rows.min(area.height) {
            let shade = self.shade(row);
            let bar = shade.repeat(bar_width as usize);
            for column in 0..self.columns {
                let x = area.x + column * cell_width;
                buf.set_string(x, area.y + row, &bar, style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_rows_by_columns_bars() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 12, 4));
        TableLoading::new(3, 3).render(buf.area, &mut buf);

        for y in 0..3 {
            for column in 0..3u16 {
                let x = column * 4;
                for dx in 0..3 {
                    assert_ne!(buf[(x + dx, y)].symbol(), " ", "cell {column} row {y}");
                }
                // gap between cells
                assert_eq!(buf[(x + 3, y)].symbol(), " ");
            }
        }
        assert!((0..12).all(|x| buf[(x, 3)].symbol() == " "));
    }

    #[test]
    fn phase_shifts_the_shade() {
        let mut first = Buffer::empty(Rect::new(0, 0, 4, 1));
        TableLoading::new(1, 1).render(first.area, &mut first);
        let mut next = Buffer::empty(Rect::new(0, 0, 4, 1));
        TableLoading::new(1, 1).phase(1).render(next.area, &mut next);

        assert_eq!(first[(0, 0)].symbol(), SHADES[0]);
        assert_eq!(next[(0, 0)].symbol(), SHADES[1]);
    }
}
