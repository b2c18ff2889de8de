use super::direction::Direction;
use super::grid::{Grid, GridError, Point};
use super::rules::{Boundary, Rules, SelfCollision, StartRow, TurnPolicy};
use rand::Rng;
use std::collections::VecDeque;

/// Something that happened during a call to [`SnakeSimulation::step()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SimulationEvent {
    /// The snake moved forwards one cell
    Moved,
    /// The snake moved onto the apple and ate it
    AteApple,
    /// The snake hit an edge or itself and is now dead
    Died,
    /// The snake hit itself and the game started over
    Restarted,
}

/// A request from the player
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Intent {
    Turn(Direction),
    TogglePause,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Status {
    Running,
    Paused,
    Dead,
}

/// The complete state of a game of Snake, advanced one move at a time by
/// [`step()`][SnakeSimulation::step]
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct SnakeSimulation<R = rand::rngs::ThreadRng> {
    rng: R,
    grid: Grid,
    rules: Rules,

    /// The positions of the snake's segments, tail first; the last element is
    /// the head.  Never empty.
    body: VecDeque<Point>,

    direction: Direction,
    apple: Point,
    score: u32,
    dead: bool,
    paused: bool,

    /// Whether a turn has been accepted since the last move
    turned: bool,
}

impl<R: Rng> SnakeSimulation<R> {
    /// Start a new game on `grid`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the snake's initial body does not fit on `grid`.
    pub(crate) fn new(grid: Grid, rules: Rules, rng: R) -> Result<SnakeSimulation<R>, GridError> {
        check_fit(grid, &rules)?;
        let mut sim = SnakeSimulation {
            rng,
            grid,
            rules,
            body: VecDeque::new(),
            direction: Direction::Right,
            apple: Point::default(),
            score: 0,
            dead: false,
            paused: false,
            turned: false,
        };
        sim.start_over();
        Ok(sim)
    }

    /// Start the game over on `grid`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the snake's initial body does not fit on `grid`, in
    /// which case the game is left untouched.
    pub(crate) fn reset(&mut self, grid: Grid) -> Result<(), GridError> {
        check_fit(grid, &self.rules)?;
        self.grid = grid;
        self.start_over();
        Ok(())
    }

    /// Start the game over on the current grid
    fn start_over(&mut self) {
        let row = match self.rules.start_row {
            StartRow::Top => 0,
            StartRow::Middle => self.grid.rows() / 2,
        };
        let mut column = 0;
        self.body.clear();
        while self.body.len() < self.rules.initial_length() {
            self.body.push_back(self.grid.cell(column, row));
            column += 1;
        }
        self.direction = Direction::Right;
        self.score = 0;
        self.dead = false;
        self.paused = false;
        self.turned = false;
        self.spawn_apple();
    }

    /// Change the size of the playing field without restarting.  The apple is
    /// respawned if it no longer lies on the field; the snake is left where
    /// it is.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the snake's initial body would not fit on `grid`, in
    /// which case the game is left untouched.
    pub(crate) fn resize(&mut self, grid: Grid) -> Result<(), GridError> {
        check_fit(grid, &self.rules)?;
        self.grid = grid;
        if !grid.contains(self.apple) {
            self.spawn_apple();
        }
        Ok(())
    }

    /// Advance the game by one move.  Returns `None` if the game is paused or
    /// over.
    pub(crate) fn step(&mut self) -> Option<SimulationEvent> {
        if self.paused || self.dead {
            return None;
        }
        self.turned = false;
        let mut new_head = self.head().offset(self.direction, self.grid.cell_size());
        if !self.grid.contains(new_head) {
            match self.rules.boundary {
                Boundary::Wrap => new_head = self.grid.wrap(new_head),
                Boundary::Lethal => {
                    self.dead = true;
                    return Some(SimulationEvent::Died);
                }
            }
        }
        if self.bites(new_head) {
            match self.rules.self_collision {
                SelfCollision::Die => {
                    self.dead = true;
                    return Some(SimulationEvent::Died);
                }
                SelfCollision::Restart => {
                    self.start_over();
                    return Some(SimulationEvent::Restarted);
                }
            }
        }
        self.body.push_back(new_head);
        let _ = self.body.pop_front();
        if new_head == self.apple {
            self.score = self.score.saturating_add(self.rules.reward.get());
            self.spawn_apple();
            let tail = self.body.front().copied().unwrap_or(new_head);
            for _ in 0..self.rules.growth() {
                self.body.push_front(tail);
            }
            Some(SimulationEvent::AteApple)
        } else {
            Some(SimulationEvent::Moved)
        }
    }

    /// If the apple lies on or past the last column or row, move it
    /// elsewhere.  Only does anything under rules with
    /// `reposition_stale_apple` set.  Returns `true` if the apple was moved.
    pub(crate) fn reposition_stale_apple(&mut self) -> bool {
        if !self.rules.reposition_stale_apple {
            return false;
        }
        let g = self.grid.cell_size();
        if self.apple.x.saturating_add(g) >= self.grid.width()
            || self.apple.y.saturating_add(g) >= self.grid.height()
        {
            self.spawn_apple();
            true
        } else {
            false
        }
    }

    /// Place the apple at a new random cell.  The snake's body is not
    /// avoided, but the new cell differs from the old one whenever the spawn
    /// area has room for more than one cell.
    fn spawn_apple(&mut self) {
        let old = self.apple;
        let xmax = self.spawn_extent(self.grid.width());
        let ymax = self.spawn_extent(self.grid.height());
        let g = self.grid.cell_size();
        let single_cell = xmax <= g && ymax <= g;
        loop {
            let x = self.grid.snap(self.rng.random_range(0..xmax));
            let y = self.grid.snap(self.rng.random_range(0..ymax));
            self.apple = Point::new(x, y);
            if single_cell || self.apple != old {
                break;
            }
        }
    }

    fn spawn_extent(&self, extent: i32) -> i32 {
        let g = self.grid.cell_size();
        if self.rules.apple_margin && extent > g {
            extent - g
        } else {
            extent
        }
    }
}

impl<R> SnakeSimulation<R> {
    /// Act on a request from the player
    pub(crate) fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::Turn(d) => {
                let _ = self.set_direction(d);
            }
            Intent::TogglePause => self.toggle_pause(),
        }
    }

    /// Point the snake in direction `requested` as of the next move.  Turning
    /// directly around is refused, as are all turns once the snake is dead.
    /// Returns `true` if the turn was accepted.
    pub(crate) fn set_direction(&mut self, requested: Direction) -> bool {
        if self.dead
            || (self.paused && !self.rules.turn_while_paused)
            || requested.is_reverse_of(self.direction)
            || (self.turned && self.rules.turns == TurnPolicy::FirstPerTick)
        {
            return false;
        }
        self.direction = requested;
        self.turned = true;
        true
    }

    /// Pause or unpause the game.  Does nothing once the snake is dead.
    pub(crate) fn toggle_pause(&mut self) {
        if !self.dead {
            self.paused = !self.paused;
        }
    }

    pub(crate) fn head(&self) -> Point {
        *self
            .body
            .back()
            .expect("snake body should always be nonempty")
    }

    /// Return the snake's segments, tail first
    pub(crate) fn body(&self) -> &VecDeque<Point> {
        &self.body
    }

    pub(crate) fn apple(&self) -> Point {
        self.apple
    }

    #[cfg(test)]
    pub(crate) fn place_apple(&mut self, apple: Point) {
        self.apple = apple;
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn grid(&self) -> Grid {
        self.grid
    }

    pub(crate) fn rules(&self) -> &Rules {
        &self.rules
    }

    pub(crate) fn paused(&self) -> bool {
        self.paused
    }

    pub(crate) fn dead(&self) -> bool {
        self.dead
    }

    pub(crate) fn status(&self) -> Status {
        if self.dead {
            Status::Dead
        } else if self.paused {
            Status::Paused
        } else {
            Status::Running
        }
    }

    /// Would a head moving to `p` run into the body?  The `safe_zone`
    /// segments nearest the head are ignored.
    fn bites(&self, p: Point) -> bool {
        let checked = self.body.len().saturating_sub(self.rules.safe_zone);
        self.body.iter().take(checked).any(|&q| q == p)
    }
}

fn check_fit(grid: Grid, rules: &Rules) -> Result<(), GridError> {
    let needed = rules.initial_length();
    if usize::try_from(grid.columns()).is_ok_and(|cols| cols >= needed) {
        Ok(())
    } else {
        Err(GridError::TooSmall {
            columns: grid.columns(),
            needed,
        })
    }
}
