use crate::command::Command;
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect, Size},
    text::{Line, Text},
    widgets::{
        block::{Block, Padding},
        Clear, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};
use std::borrow::Cow;

/// A pop-up that reports an error and waits for the user to acknowledge it
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Warning {
    lines: Vec<String>,
    scroll_offset: usize,
    max_scroll: usize,
}

impl Warning {
    const MAX_LINES: u16 = 16;
    const TEXT_WIDTH: u16 = 48;
    const WIDTH: u16 = Self::TEXT_WIDTH + 4;

    /// Build a warning from an error and its chain of causes.  `consequence`,
    /// if given, is shown after the causes, e.g., to say what will happen
    /// instead.
    pub(crate) fn from_error(e: &dyn std::error::Error, consequence: Option<&str>) -> Warning {
        let mut msgs = vec![e.to_string()];
        let mut source = e.source();
        while let Some(src) = source {
            msgs.push(src.to_string());
            source = src.source();
        }
        let mut warning = Warning::from_messages(&msgs);
        if let Some(text) = consequence {
            warning.lines.push(String::new());
            warning.lines.extend(wrap(text, "", ""));
            warning.max_scroll = max_scroll(warning.lines.len());
        }
        warning
    }

    pub(crate) fn handle_command(&mut self, cmd: Command) -> Option<WarningOutcome> {
        match (cmd, self.scrolling()) {
            (Command::Enter | Command::Esc, _) => return Some(WarningOutcome::Dismissed),
            (Command::Quit | Command::Q, _) => return Some(WarningOutcome::Quit),
            (Command::Up, true) => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            (Command::Down, true) => {
                if self.scroll_offset < self.max_scroll.saturating_sub(1) {
                    self.scroll_offset += 1;
                }
            }
            (Command::Home, true) => self.scroll_offset = 0,
            (Command::End, true) => self.scroll_offset = self.max_scroll.saturating_sub(1),
            _ => (),
        }
        None
    }

    fn scrolling(&self) -> bool {
        self.lines.len() > usize::from(Self::MAX_LINES)
    }

    fn from_messages(msgs: &[String]) -> Warning {
        let Some((first, causes)) = msgs.split_first() else {
            return Warning {
                lines: vec![String::from("Something went wrong.")],
                scroll_offset: 0,
                max_scroll: 0,
            };
        };
        let mut lines = wrap(first, "", "");
        match causes {
            [] => (),
            [cause] => {
                lines.push(String::new());
                lines.push(String::from("Caused by:"));
                lines.extend(wrap(cause, "    ", "    "));
            }
            _ => {
                lines.push(String::new());
                lines.push(String::from("Caused by:"));
                for (i, m) in causes.iter().enumerate() {
                    let init_indent = format!("{i:>5}: ");
                    lines.extend(wrap(m, &init_indent, "       "));
                }
            }
        }
        let max_scroll = max_scroll(lines.len());
        Warning {
            lines,
            scroll_offset: 0,
            max_scroll,
        }
    }
}

fn wrap(text: &str, initial_indent: &str, subsequent_indent: &str) -> Vec<String> {
    let opts = textwrap::Options::new(usize::from(Warning::TEXT_WIDTH))
        .break_words(true)
        .initial_indent(initial_indent)
        .subsequent_indent(subsequent_indent);
    textwrap::wrap(text, opts)
        .into_iter()
        .map(Cow::into_owned)
        .collect()
}

fn max_scroll(line_qty: usize) -> usize {
    line_qty.saturating_sub(usize::from(Warning::MAX_LINES) - 1)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum WarningOutcome {
    Dismissed,
    Quit,
}

impl Widget for &Warning {
    // `area` is here the area of the entire display in which the program is
    // drawing, not the area for just the widget proper.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = u16::try_from(self.lines.len())
            .unwrap_or(u16::MAX)
            .min(Warning::MAX_LINES)
            .saturating_add(4);
        let block_area = center_rect(
            area,
            Size {
                width: Warning::WIDTH.saturating_add(u16::from(self.scrolling()) * 2),
                height,
            },
        );
        let block = Block::bordered()
            .title(" WARNING ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let [text_area, ok_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
            .flex(Flex::Start)
            .spacing(1)
            .areas(block.inner(block_area));
        Clear.render(block_area, buf);
        block.render(block_area, buf);
        if self.scrolling() {
            let [text_area, scrollbar_area] =
                Layout::horizontal([Constraint::Fill(1), Constraint::Length(1)])
                    .flex(Flex::Start)
                    .spacing(1)
                    .areas(text_area);
            Text::from_iter(
                self.lines
                    .iter()
                    .skip(self.scroll_offset)
                    .take(usize::from(Warning::MAX_LINES))
                    .map(String::as_str),
            )
            .render(text_area, buf);
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .track_symbol(Some(ratatui::symbols::shade::MEDIUM));
            let mut scroll_state =
                ScrollbarState::new(self.max_scroll).position(self.scroll_offset);
            scrollbar.render(scrollbar_area, buf, &mut scroll_state);
        } else {
            Text::from_iter(self.lines.iter().map(String::as_str)).render(text_area, buf);
        }

        Line::from("[OK]").centered().render(ok_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ConfigError};
    use crate::game::GridError;

    #[test]
    fn render_grid_error() {
        let e = GridError::SmallerThanCell {
            width: 20,
            height: 20,
            cell_size: 25,
        };
        let warning = Warning::from_error(&e, None);
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        warning.render(area, &mut buffer);
        let rows = (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>();
        assert_eq!(rows[8].trim(), "");
        assert!(rows[9].trim().starts_with('┌'), "{rows:?}");
        assert!(rows[9].contains(" WARNING "), "{rows:?}");
        assert_eq!(
            rows[10].trim(),
            "│ playing field of 20x20 cannot hold a cell of     │"
        );
        assert_eq!(
            rows[11].trim(),
            "│ size 25                                          │"
        );
        assert!(rows[13].contains("[OK]"), "{rows:?}");
        assert!(rows[14].trim().starts_with('└'), "{rows:?}");
        assert_eq!(rows[15].trim(), "");
    }

    #[test]
    fn render_config_error() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("config.toml");
        fs_err::write(&path, "fps = 0\n").unwrap();
        let e = Config::load(&path, false).unwrap_err();
        assert!(matches!(e, ConfigError::Parse(_)));
        let warning = Warning::from_error(&e, Some("Using default settings."));
        assert_eq!(warning.lines[0], "failed to parse configuration file");
        assert_eq!(warning.lines[2], "Caused by:");
        assert_eq!(
            warning.lines.last().map(String::as_str),
            Some("Using default settings.")
        );
    }

    #[test]
    fn messages_one_cause() {
        let warning = Warning::from_messages(&[
            String::from("failed to read configuration file"),
            String::from("permission denied"),
        ]);
        assert_eq!(
            warning.lines,
            [
                "failed to read configuration file",
                "",
                "Caused by:",
                "    permission denied",
            ]
        );
    }

    #[test]
    fn messages_wrapped_two_causes() {
        let warning = Warning::from_messages(&[
            String::from("The snake could not be placed on a playing field this small"),
            String::from("playing field is 2 cells wide, but the snake needs 3"),
            String::from("terminal too small"),
        ]);
        assert_eq!(
            warning.lines,
            [
                "The snake could not be placed on a playing field",
                "this small",
                "",
                "Caused by:",
                "    0: playing field is 2 cells wide, but the",
                "       snake needs 3",
                "    1: terminal too small",
            ]
        );
    }

    #[test]
    fn scrolling() {
        let msgs = (0..20)
            .map(|i| format!("cause number {i}"))
            .collect::<Vec<_>>();
        let mut warning = Warning::from_messages(&msgs);
        assert!(warning.scrolling());
        assert_eq!(warning.handle_command(Command::Up), None);
        assert_eq!(warning.scroll_offset, 0);
        assert_eq!(warning.handle_command(Command::Down), None);
        assert_eq!(warning.scroll_offset, 1);
        assert_eq!(warning.handle_command(Command::End), None);
        assert_eq!(warning.scroll_offset, warning.max_scroll - 1);
        assert_eq!(warning.handle_command(Command::Down), None);
        assert_eq!(warning.scroll_offset, warning.max_scroll - 1);
        assert_eq!(warning.handle_command(Command::Home), None);
        assert_eq!(warning.scroll_offset, 0);
        assert_eq!(
            warning.handle_command(Command::Enter),
            Some(WarningOutcome::Dismissed)
        );
        assert_eq!(
            warning.handle_command(Command::Quit),
            Some(WarningOutcome::Quit)
        );
    }
}
