//! Assorted constants & hard-coded configuration
use ratatui::style::{Color, Modifier, Style};
use std::num::NonZeroU32;

/// Default number of moves the snake makes per second
pub(crate) const DEFAULT_FPS: NonZeroU32 = match NonZeroU32::new(10) {
    Some(n) => n,
    None => NonZeroU32::MIN,
};

/// Default side length of a cell of the playing field.  Every position in the
/// game is a multiple of this.
pub(crate) const DEFAULT_CELL_SIZE: u32 = 25;

/// Number of terminal columns around the playing field that are not part of
/// it: the border plus a one-column margin on each side
pub(crate) const FIELD_HORIZONTAL_CHROME: u16 = 4;

/// Number of terminal rows that are not part of the playing field: the score
/// bar, the border, and two message lines
pub(crate) const FIELD_VERTICAL_CHROME: u16 = 5;

/// Glyph for the snake's head when it is moving up
pub(crate) const SNAKE_HEAD_UP_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving down
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving right
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: char = '>';

/// Glyph for the snake's head when it is moving left
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: char = '<';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '■';

/// Glyph for the apple
pub(crate) const APPLE_SYMBOL: char = '●';

/// Glyph for the snake's head once it has crashed
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Default style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Default style for the apple
pub(crate) const APPLE_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);
