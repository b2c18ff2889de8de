use crate::command::Command;
use crate::config::Settings;
use crate::game::Game;
use crate::warning::{Warning, WarningOutcome};
use crossterm::event::read;
use ratatui::{backend::Backend, layout::Size, Terminal};
use std::io;

#[derive(Debug)]
pub(crate) struct App {
    screen: Screen,
    settings: Settings,
}

impl App {
    /// Create the application.  If `warning` is given, it is shown before the
    /// game starts.
    pub(crate) fn new(settings: Settings, warning: Option<Warning>) -> App {
        let screen = match warning {
            Some(warning) => Screen::Warning {
                warning,
                fatal: false,
            },
            None => Screen::Start,
        };
        App { screen, settings }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            if matches!(self.screen, Screen::Start) {
                self.screen = self.start(terminal.size()?);
            }
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        Ok(())
    }

    /// Start a game in a terminal of the given size
    fn start(&self, area: Size) -> Screen {
        match Game::new(self.settings, area) {
            Ok(game) => Screen::Game(Box::new(game)),
            Err(e) => {
                tracing::warn!(
                    width = area.width,
                    height = area.height,
                    error = %e,
                    "could not start game"
                );
                Screen::Warning {
                    warning: Warning::from_error(
                        &e,
                        Some("Enlarge the terminal or change the playing field size in the configuration file."),
                    ),
                    fatal: true,
                }
            }
        }
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        match self.screen {
            Screen::Warning { ref warning, .. } => {
                terminal.draw(|frame| frame.render_widget(warning, frame.area()))?;
            }
            Screen::Game(ref game) => {
                terminal.draw(|frame| game.draw(frame))?;
            }
            Screen::Start | Screen::Quit => (),
        }
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        match self.screen {
            Screen::Warning {
                ref mut warning,
                fatal,
            } => {
                let outcome = read()?
                    .as_key_press_event()
                    .and_then(Command::from_key_event)
                    .and_then(|cmd| warning.handle_command(cmd));
                match outcome {
                    Some(WarningOutcome::Dismissed) if !fatal => self.screen = Screen::Start,
                    Some(_) => self.screen = Screen::Quit,
                    None => (),
                }
            }
            Screen::Game(ref mut game) => {
                if let Some(screen) = game.process_input()? {
                    self.screen = screen;
                }
            }
            Screen::Start | Screen::Quit => (),
        }
        Ok(())
    }

    fn quitting(&self) -> bool {
        matches!(self.screen, Screen::Quit)
    }
}

#[derive(Debug)]
pub(crate) enum Screen {
    /// An error message to acknowledge.  If `fatal` is true, the program
    /// ends once it is dismissed; otherwise, the game starts.
    Warning { warning: Warning, fatal: bool },
    /// A game is about to be started at the terminal's current size
    Start,
    Game(Box<Game>),
    Quit,
}
