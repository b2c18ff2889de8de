/// A direction in which the snake can travel
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Direction {
    #[default]
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// Return the unit step `(dx, dy)` for one move in this direction, with
    /// `y` increasing downwards
    pub(crate) fn delta(self) -> (i32, i32) {
        match self {
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
        }
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
        }
    }

    pub(crate) fn is_reverse_of(self, other: Direction) -> bool {
        self.reverse() == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Direction::Right, Direction::Left)]
    #[case(Direction::Down, Direction::Up)]
    #[case(Direction::Left, Direction::Right)]
    #[case(Direction::Up, Direction::Down)]
    fn test_reverse(#[case] d: Direction, #[case] rev: Direction) {
        assert_eq!(d.reverse(), rev);
        assert!(d.is_reverse_of(rev));
        assert!(!d.is_reverse_of(d));
    }

    #[rstest]
    #[case(Direction::Right)]
    #[case(Direction::Down)]
    #[case(Direction::Left)]
    #[case(Direction::Up)]
    fn test_delta_cancels(#[case] d: Direction) {
        let (dx, dy) = d.delta();
        let (rx, ry) = d.reverse().delta();
        assert_eq!((dx + rx, dy + ry), (0, 0));
        assert_eq!(dx.abs() + dy.abs(), 1);
    }
}
