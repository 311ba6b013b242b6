//! Simulation of a guard patrolling a lab: walk straight, turn right at obstacles, stop on leaving the map.

use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::num::NonZero;

use rayon::prelude::*;
use tracing::debug;

use crate::builder::LabBuilder;
use crate::cell::Tile;
use crate::error::{InputError, InputResult};
use crate::grid::Grid;
use crate::location::Location;
use crate::shape::{SquareStep, Step};

/// A guard's full state: where it stands and which way it faces.
pub type Pose = (Location, SquareStep);

/// The states of a [`Patrol`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PatrolState {
    /// The guard stepped forward, or has not moved yet.
    Moving,
    /// The cell ahead held an obstacle, so the guard turned right in place.
    Blocked,
    /// The guard stepped off the map. Terminal.
    Exited,
    /// The guard returned to a pose it held before and will never leave. Terminal.
    Looping,
}

impl PatrolState {
    /// Whether no further step can change this state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Exited | Self::Looping)
    }
}

/// How a complete patrol ended.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PatrolOutcome {
    /// The guard left the map after standing on `visited` distinct cells, the start included.
    Exited {
        /// Distinct cells stood on.
        visited: usize,
    },
    /// The guard is stuck in a loop.
    Looping,
}

/// The map a guard patrols, with the guard's starting pose.
///
/// [`Lab`]s should be built using a [`LabBuilder`] or parsed with [`Lab::parse`].
#[derive(Clone, Debug)]
pub struct Lab {
    tiles: Grid<Tile>,
    start: Location,
    heading: SquareStep,
}

impl Lab {
    pub(crate) fn new(tiles: Grid<Tile>, start: Location, heading: SquareStep) -> Self {
        Self { tiles, start, heading }
    }

    /// Parse a lab map: `.` is open floor, `#` an obstacle and one of `^ > v <` marks the guard and its heading.
    pub fn parse(text: &str) -> InputResult<Self> {
        let glyphs = Grid::parse_with(text, |line, ch| match ch {
            '.' | '#' => Ok((line, ch)),
            _ if SquareStep::from_glyph(ch).is_some() => Ok((line, ch)),
            _ => Err(InputError::malformed(line, format!("unexpected map tile {ch:?}"))),
        })?;

        let dims = (
            NonZero::new(glyphs.rows()).ok_or(InputError::Empty)?,
            NonZero::new(glyphs.cols()).ok_or(InputError::Empty)?,
        );
        let mut builder = LabBuilder::with_dims(dims);

        for (location, &(line, glyph)) in glyphs.indexed() {
            if glyph == Tile::Obstacle.glyph() {
                builder.add_obstacle(location);
            } else if let Some(heading) = SquareStep::from_glyph(glyph) {
                builder.place_guard(location, heading);
                if builder.is_valid().is_some() {
                    return Err(InputError::malformed(line, "more than one guard on the map"));
                }
            }
        }

        // every tile is in bounds and the second guard returned above, so only a missing guard remains
        builder.build().map_err(|_| InputError::MissingStart { markers: GUARD_GLYPHS })
    }

    /// Where the guard starts.
    pub fn start(&self) -> Location {
        self.start
    }

    /// Which way the guard initially faces.
    pub fn heading(&self) -> SquareStep {
        self.heading
    }

    /// The tiles of this lab, without the guard.
    pub fn tiles(&self) -> &Grid<Tile> {
        &self.tiles
    }

    /// Begin a patrol from the guard's starting pose.
    pub fn patrol(&self) -> Patrol<'_> {
        Patrol::new(self, None, (self.start, self.heading), HashSet::new())
    }

    /// Run the guard to completion on the unmodified map.
    pub fn walk(&self) -> PatrolOutcome {
        let mut patrol = self.patrol();
        let mut visited = HashSet::from([self.start]);

        loop {
            match patrol.step() {
                PatrolState::Moving => {
                    visited.insert(patrol.position());
                }
                PatrolState::Blocked => {}
                PatrolState::Exited => return PatrolOutcome::Exited { visited: visited.len() },
                PatrolState::Looping => return PatrolOutcome::Looping,
            }
        }
    }

    /// Every pose the guard holds on the unmodified map, in order, up to leaving the map or closing a loop.
    pub fn route(&self) -> Vec<Pose> {
        let patrol = self.patrol();
        std::iter::once(patrol.pose()).chain(patrol).collect()
    }

    /// Count the cells where a single added obstacle traps the guard in a loop.
    ///
    /// Only cells on the guard's unobstructed route can change its course, and the start is never a candidate.
    /// Each candidate resumes from the pose just before the route first enters it, with the poses
    /// held before that already marked as seen, rather than re-walking the route from the start.
    pub fn count_loop_obstructions(&self) -> usize {
        let route = self.route();

        let mut entered = HashSet::from([self.start]);
        let mut candidates = Vec::new();
        for (index, window) in route.windows(2).enumerate() {
            let (from, to) = (window[0], window[1]);
            if from.0 != to.0 && entered.insert(to.0) {
                // obstacle at `to.0`, resume from pose `index`
                candidates.push((to.0, index));
            }
        }

        candidates.par_iter()
            .filter(|(obstacle, resume_at)| {
                let seen = route[..*resume_at].iter().copied().collect();
                let mut patrol = Patrol::new(self, Some(*obstacle), route[*resume_at], seen);
                let looped = patrol.run() == PatrolState::Looping;
                if looped {
                    debug!(row = obstacle.0, col = obstacle.1, "obstruction traps the guard");
                }
                looped
            })
            .count()
    }
}

/// Markers accepted for the guard's starting position.
pub const GUARD_GLYPHS: &[char] = &['^', '>', 'v', '<'];

impl Display for Lab {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let start = self.start;
        let heading = self.heading;
        let drawn = Grid::from_array(ndarray::Array2::from_shape_fn((self.tiles.rows(), self.tiles.cols()), |index| {
            let location = Location::from(index);
            if location == start {
                heading.glyph()
            } else {
                self.tiles.get(location).map_or(' ', Tile::glyph)
            }
        }));

        write!(f, "{}", drawn)
    }
}

/// A single guard walking a [`Lab`], optionally with one extra obstacle placed on the map.
///
/// Advance it with [`Patrol::step`]; it remembers every pose it has held so it can tell when it is looping.
pub struct Patrol<'a> {
    lab: &'a Lab,
    obstruction: Option<Location>,
    position: Location,
    heading: SquareStep,
    state: PatrolState,
    seen: HashSet<Pose>,
}

impl<'a> Patrol<'a> {
    fn new(lab: &'a Lab, obstruction: Option<Location>, pose: Pose, seen: HashSet<Pose>) -> Self {
        Self {
            lab,
            obstruction,
            position: pose.0,
            heading: pose.1,
            state: PatrolState::Moving,
            seen,
        }
    }

    /// Place one extra obstacle on the map for this patrol only.
    pub fn with_obstruction(mut self, location: Location) -> Self {
        self.obstruction = Some(location);
        self
    }

    /// The guard's current location.
    pub fn position(&self) -> Location {
        self.position
    }

    /// The guard's current heading.
    pub fn heading(&self) -> SquareStep {
        self.heading
    }

    /// The guard's current pose.
    pub fn pose(&self) -> Pose {
        (self.position, self.heading)
    }

    /// The state reached by the last step.
    pub fn state(&self) -> PatrolState {
        self.state
    }

    fn tile_at(&self, location: Location) -> Option<Tile> {
        if self.obstruction == Some(location) {
            return Some(Tile::Obstacle);
        }

        self.lab.tiles.get(location).copied()
    }

    /// Perform one transition and return the new state.
    ///
    /// Once a terminal state is reached, further calls return it unchanged.
    pub fn step(&mut self) -> PatrolState {
        if self.state.is_terminal() {
            return self.state;
        }

        if !self.seen.insert(self.pose()) {
            self.state = PatrolState::Looping;
            return self.state;
        }

        let ahead = self.heading.attempt_from(self.position);
        self.state = match self.tile_at(ahead) {
            None => PatrolState::Exited,
            Some(Tile::Obstacle) => {
                self.heading = self.heading.turn_right();
                PatrolState::Blocked
            }
            Some(Tile::Open) => {
                self.position = ahead;
                PatrolState::Moving
            }
        };

        self.state
    }

    /// Step until a terminal state is reached and return it.
    pub fn run(&mut self) -> PatrolState {
        while !self.step().is_terminal() {}
        self.state
    }
}

impl Iterator for Patrol<'_> {
    type Item = Pose;

    /// Yields the pose after every non-terminal step.
    fn next(&mut self) -> Option<Self::Item> {
        match self.step().is_terminal() {
            true => None,
            false => Some(self.pose()),
        }
    }
}
