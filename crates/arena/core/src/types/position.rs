/// Grid coordinate in arena space. North is `+y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance, the metric every sensing and engagement
    /// radius is expressed in.
    pub fn distance_squared_to(self, other: Position) -> u32 {
        let dx = i64::from(other.x) - i64::from(self.x);
        let dy = i64::from(other.y) - i64::from(self.y);
        u32::try_from(dx * dx + dy * dy).unwrap_or(u32::MAX)
    }

    /// The adjacent cell one step in `direction`.
    pub fn step(self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position::new(self.x + dx, self.y + dy)
    }

    /// Compass heading whose angle is closest to the bearing of `target`.
    ///
    /// Octant boundaries sit at tan(22.5°) ≈ 0.4142; returns
    /// [`Direction::Center`] when `target == self`.
    pub fn direction_to(self, target: Position) -> Direction {
        let dx = i64::from(target.x) - i64::from(self.x);
        let dy = i64::from(target.y) - i64::from(self.y);
        if dx == 0 && dy == 0 {
            return Direction::Center;
        }

        let (adx, ady) = (dx.abs(), dy.abs());
        if adx * 1000 >= ady * 2414 {
            if dx > 0 { Direction::East } else { Direction::West }
        } else if ady * 1000 >= adx * 2414 {
            if dy > 0 { Direction::North } else { Direction::South }
        } else {
            match (dx > 0, dy > 0) {
                (true, true) => Direction::NorthEast,
                (true, false) => Direction::SouthEast,
                (false, true) => Direction::NorthWest,
                (false, false) => Direction::SouthWest,
            }
        }
    }
}

/// Single-step headings on an eight-connected grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    Center,
}

impl Direction {
    /// The eight movement headings, clockwise from north.
    pub const COMPASS: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::NorthEast => (1, 1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::South => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, 1),
            Direction::Center => (0, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_to_picks_axis_for_shallow_bearings() {
        let origin = Position::new(5, 5);
        assert_eq!(origin.direction_to(Position::new(10, 6)), Direction::East);
        assert_eq!(origin.direction_to(Position::new(4, 0)), Direction::South);
        assert_eq!(origin.direction_to(Position::new(0, 5)), Direction::West);
    }

    #[test]
    fn direction_to_picks_diagonal_near_45_degrees() {
        let origin = Position::new(5, 5);
        assert_eq!(origin.direction_to(Position::new(8, 7)), Direction::NorthEast);
        assert_eq!(origin.direction_to(Position::new(2, 2)), Direction::SouthWest);
        assert_eq!(origin.direction_to(Position::new(3, 8)), Direction::NorthWest);
    }

    #[test]
    fn direction_to_self_is_center() {
        let p = Position::new(3, 3);
        assert_eq!(p.direction_to(p), Direction::Center);
    }

    #[test]
    fn stepping_toward_target_never_increases_distance() {
        let origin = Position::new(10, 10);
        for x in 0..20 {
            for y in 0..20 {
                let target = Position::new(x, y);
                let next = origin.step(origin.direction_to(target));
                assert!(next.distance_squared_to(target) <= origin.distance_squared_to(target));
            }
        }
    }
}
