//! Scrollable activity log.

use std::collections::VecDeque;

use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

use crate::styles::ColorTheme;

/// Lines kept before the oldest are dropped.
pub const LOG_CAPACITY: usize = 500;

/// Bounded log with a scroll position that follows new lines until the user
/// scrolls up.
#[derive(Debug, Clone)]
pub struct LogBuffer {
    lines: VecDeque<String>,
    capacity: usize,
    offset: usize,
    follow: bool,
}

impl LogBuffer {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity: capacity.max(1),
            offset: 0,
            follow: true,
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
        if self.lines.len() > self.capacity {
            self.lines.pop_front();
            self.offset = self.offset.saturating_sub(1);
        }
        if self.follow {
            self.offset = self.last_index();
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub fn is_following(&self) -> bool {
        self.follow
    }

    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.follow = false;
        self.offset = self.offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = (self.offset + lines).min(self.last_index());
        if self.offset == self.last_index() {
            self.follow = true;
        }
    }

    fn last_index(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    /// Lines visible in a window of `height` rows. While following, the
    /// window ends at the newest line.
    pub fn visible(&self, height: usize) -> impl Iterator<Item = &str> {
        let start = if self.follow {
            self.lines.len().saturating_sub(height)
        } else {
            self.offset
        };
        self.lines.iter().skip(start).take(height).map(String::as_str)
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(LOG_CAPACITY)
    }
}

/// Render the log panel.
pub fn render_logs(frame: &mut Frame, area: Rect, logs: &LogBuffer) {
    let theme = ColorTheme::default();
    let height = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = logs
        .visible(height)
        .map(|line| ListItem::new(Line::raw(line.to_string())).style(theme.log_style(line)))
        .collect();
    let title = if logs.is_following() {
        " Log ".to_string()
    } else {
        format!(" Log ({}/{}) ", logs.offset() + 1, logs.len())
    };
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(theme.muted_style()),
    );
    frame.render_widget(list, area);
}
