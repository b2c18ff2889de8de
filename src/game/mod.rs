mod audio;
mod direction;
mod grid;
mod paused;
mod rules;
mod sim;
mod ticker;
pub(crate) use self::grid::GridError;
pub(crate) use self::rules::{Boundary, Preset, Rules, SelfCollision, StartRow, TurnPolicy};
use self::audio::{Cue, Speaker};
use self::direction::Direction;
use self::grid::{Grid, Point};
use self::paused::{PauseOpt, Paused};
use self::sim::{Intent, SimulationEvent, SnakeSimulation, Status};
use self::ticker::Ticker;
use crate::app::Screen;
use crate::command::Command;
use crate::config::Settings;
use crate::consts;
use crate::util::center_rect;
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    buffer::{Buffer, Cell},
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};
use std::io;
use std::time::Instant;

/// The game screen: runs a [`SnakeSimulation`] on a timer, feeds it the
/// player's input, and draws it
#[derive(Debug)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    sim: SnakeSimulation<R>,
    ticker: Ticker,
    speaker: Speaker,
    settings: Settings,

    /// The pause menu, if it is open
    menu: Option<Paused>,
}

impl Game<rand::rngs::ThreadRng> {
    /// Start a new game sized to fit a terminal of size `area`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a playing field of the configured or available size
    /// cannot hold the snake.
    pub(crate) fn new(settings: Settings, area: Size) -> Result<Game, GridError> {
        Game::new_with(settings, area, rand::rng(), Speaker::new(settings.sound))
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with(
        settings: Settings,
        area: Size,
        rng: R,
        speaker: Speaker,
    ) -> Result<Game<R>, GridError> {
        let grid = field_grid(&settings, area)?;
        let sim = SnakeSimulation::new(grid, settings.rules, rng)?;
        tracing::info!(
            preset = %settings.preset,
            columns = grid.columns(),
            rows = grid.rows(),
            cell_size = grid.cell_size(),
            "starting new game"
        );
        Ok(Game {
            sim,
            ticker: Ticker::per_second(settings.fps),
            speaker,
            settings,
            menu: None,
        })
    }

    /// Wait for either the next tick or the next input event, and handle
    /// whichever comes first
    pub(crate) fn process_input(&mut self) -> io::Result<Option<Screen>> {
        if self.ticking() {
            let wait = self.ticker.wait(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.tick();
                return Ok(None);
            }
        } else {
            self.ticker.disarm();
        }
        Ok(self.handle_event(read()?))
    }

    fn tick(&mut self) {
        self.ticker.fired();
        let event = self.sim.step();
        tracing::trace!(?event, head = ?self.sim.head(), "tick");
        if self.sim.reposition_stale_apple() {
            tracing::debug!(apple = ?self.sim.apple(), "moved apple away from the far edge");
        }
        match event {
            Some(SimulationEvent::AteApple) => {
                tracing::debug!(
                    score = self.sim.score(),
                    length = self.sim.body().len(),
                    "snake ate an apple"
                );
                self.speaker.play(Cue::Chomp);
            }
            Some(SimulationEvent::Died) => {
                tracing::info!(score = self.sim.score(), "snake died");
                self.speaker.play(Cue::Crash);
            }
            Some(SimulationEvent::Restarted) => {
                tracing::info!("snake bit itself; starting over");
            }
            Some(SimulationEvent::Moved) | None => (),
        }
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        if let Event::Resize(width, height) = event {
            self.resize(Size { width, height });
            return None;
        }
        if let Some(ref mut menu) = self.menu {
            match menu.handle_event(event)? {
                PauseOpt::Resume => {
                    self.menu = None;
                    if self.sim.paused() {
                        self.sim.apply(Intent::TogglePause);
                    }
                }
                PauseOpt::Restart => self.restart(),
                PauseOpt::Quit => return Some(Screen::Quit),
            }
            return None;
        }
        if event == Event::FocusLost {
            self.open_menu();
            return None;
        }
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        match (self.sim.status(), cmd) {
            (_, Command::Quit) | (Status::Dead, Command::Q) => return Some(Screen::Quit),
            (Status::Dead, Command::R) => self.restart(),
            (Status::Dead, _) => (),
            (_, Command::Esc) => self.open_menu(),
            (_, Command::Space) => self.sim.apply(Intent::TogglePause),
            (_, Command::Up) => self.sim.apply(Intent::Turn(Direction::Up)),
            (_, Command::Down) => self.sim.apply(Intent::Turn(Direction::Down)),
            (_, Command::Left) => self.sim.apply(Intent::Turn(Direction::Left)),
            (_, Command::Right) => self.sim.apply(Intent::Turn(Direction::Right)),
            _ => (),
        }
        None
    }

    fn restart(&mut self) {
        tracing::info!(score = self.sim.score(), "restarting game");
        self.menu = None;
        self.ticker.disarm();
        if let Err(e) = self.sim.reset(self.sim.grid()) {
            tracing::warn!(error = %e, "could not restart game");
        }
    }

    fn resize(&mut self, area: Size) {
        if self.settings.columns.is_some() && self.settings.rows.is_some() {
            return;
        }
        let r = field_grid(&self.settings, area).and_then(|grid| {
            self.sim.resize(grid)?;
            Ok(grid)
        });
        match r {
            Ok(grid) => tracing::debug!(
                columns = grid.columns(),
                rows = grid.rows(),
                "resized playing field"
            ),
            Err(e) => tracing::debug!(
                width = area.width,
                height = area.height,
                error = %e,
                "terminal too small for the game; keeping the old field"
            ),
        }
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    fn ticking(&self) -> bool {
        self.menu.is_none() && self.sim.status() == Status::Running
    }

    fn open_menu(&mut self) {
        if self.sim.dead() {
            return;
        }
        if !self.sim.paused() {
            self.sim.apply(Intent::TogglePause);
        }
        self.menu = Some(Paused::new());
    }
}

/// Determine the playing field for a terminal of size `area`.  Dimensions
/// not fixed by the configuration fill the terminal, less room for the score
/// bar, border, and messages.
fn field_grid(settings: &Settings, area: Size) -> Result<Grid, GridError> {
    let columns = settings
        .columns
        .unwrap_or_else(|| area.width.saturating_sub(consts::FIELD_HORIZONTAL_CHROME));
    let rows = settings
        .rows
        .unwrap_or_else(|| area.height.saturating_sub(consts::FIELD_VERTICAL_CHROME));
    Grid::from_cells(columns, rows, settings.cell_size)
}

fn head_symbol(direction: Direction) -> char {
    match direction {
        Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
        Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
        Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
        Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
    }
}

fn screen_len(n: i32) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [score_area, block_area, msg1_area, msg2_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);
        Line::styled(format!(" Score: {}", self.sim.score()), consts::SCORE_BAR_STYLE)
            .render(score_area, buf);
        if self.sim.paused() {
            Line::from("PAUSED ").right_aligned().render(score_area, buf);
        }

        let grid = self.sim.grid();
        let block_size = Size {
            width: screen_len(grid.columns()).saturating_add(2),
            height: screen_len(grid.rows()).saturating_add(2),
        };
        let block_area = center_rect(block_area, block_size);
        if self.sim.rules().boundary == Boundary::Wrap {
            DottedBorder.render(block_area, buf);
        } else {
            Block::bordered().render(block_area, buf);
        }

        let mut field = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        field.draw_point(
            grid,
            self.sim.apple(),
            consts::APPLE_SYMBOL,
            self.settings.apple_style,
        );
        for &p in self.sim.body() {
            field.draw_point(
                grid,
                p,
                consts::SNAKE_BODY_SYMBOL,
                self.settings.snake_style,
            );
        }
        // Draw the head last so that, if it's a collision, we overwrite
        // whatever it's colliding with
        if self.sim.dead() {
            field.draw_point(
                grid,
                self.sim.head(),
                consts::COLLISION_SYMBOL,
                consts::COLLISION_STYLE,
            );
        } else {
            field.draw_point(
                grid,
                self.sim.head(),
                head_symbol(self.sim.direction()),
                self.settings.snake_style,
            );
        }

        match (self.sim.status(), self.menu) {
            (_, Some(menu)) => {
                let menu_area = center_rect(
                    area,
                    Size {
                        width: Paused::WIDTH,
                        height: Paused::HEIGHT,
                    },
                );
                menu.render(menu_area, buf);
            }
            (Status::Dead, None) => {
                Span::from(" — GAME OVER —").render(msg1_area, buf);
                Line::from_iter([
                    Span::raw(" Restart ("),
                    Span::styled("r", consts::KEY_STYLE),
                    Span::raw(") — Quit ("),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg2_area, buf);
            }
            (Status::Paused, None) => {
                Line::from_iter([
                    Span::raw(" Press "),
                    Span::styled("Space", consts::KEY_STYLE),
                    Span::raw(" to resume"),
                ])
                .render(msg1_area, buf);
            }
            (Status::Running, None) => (),
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    /// Return the cell at `pos` relative to the top-left of the canvas, or
    /// `None` if it lies outside the canvas
    fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        let x = self.area.x.checked_add(pos.x)?;
        let y = self.area.y.checked_add(pos.y)?;
        let pos = Position::new(x, y);
        if !self.area.contains(pos) {
            return None;
        }
        self.buf.cell_mut(pos)
    }

    fn draw_char(&mut self, pos: Position, symbol: char) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.set_char(symbol);
        }
    }

    /// Draw `symbol` in the terminal cell showing the grid cell that
    /// contains `p`
    fn draw_point(&mut self, grid: Grid, p: Point, symbol: char, style: Style) {
        let Some(pos) = grid.to_screen(p) else {
            return;
        };
        if let Some(cell) = self.cell_mut(pos) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}

/// Border drawn around a playing field whose edges wrap around
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct DottedBorder;

impl Widget for DottedBorder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let max_x = area.width.saturating_sub(1);
        let max_y = area.height.saturating_sub(1);
        let mut canvas = Canvas { area, buf };
        for corner in [
            Position::ORIGIN,
            Position::new(max_x, 0),
            Position::new(max_x, max_y),
            Position::new(0, max_y),
        ] {
            canvas.draw_char(corner, '·');
        }
        for x in 1..max_x {
            canvas.draw_char(Position::new(x, 0), '⋯');
            canvas.draw_char(Position::new(x, max_y), '⋯');
        }
        for y in 1..max_y {
            canvas.draw_char(Position::new(0, y), '⋮');
            canvas.draw_char(Position::new(max_x, y), '⋮');
        }
    }
}
