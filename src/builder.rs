use std::num::NonZero;
use std::ops::IndexMut;

use ndarray::{Array2, AssignElem};

use crate::cell::Tile;
use crate::grid::Grid;
use crate::location::{Dimension, Location};
use crate::patrol::Lab;
use crate::shape::SquareStep;

/// Why a [`LabBuilder`] refused to produce a [`Lab`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BuilderInvalidReason {
    /// A feature like an obstacle or the guard was placed outside the bounds specified by `dims` on a builder.
    FeatureOutOfBounds,
    /// The guard was placed a second time.
    GuardAlreadyPlaced,
    /// The guard was never placed.
    GuardMissing,
    /// The guard and an obstacle share a location.
    GuardOnObstacle,
}

/// A builder for [`Lab`]s, the rectangular maps a guard patrols.
///
/// Every method takes `&mut self` so calls chain; [`Clone`] a builder to branch off a partly built map.
#[derive(Clone)]
pub struct LabBuilder {
    // rows, cols
    dims: (Dimension, Dimension),
    tiles: Array2<Tile>,
    guard: Option<(Location, SquareStep)>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl Default for LabBuilder {
    fn default() -> Self {
        Self::with_dims((NonZero::new(10).unwrap(), NonZero::new(10).unwrap()))
    }
}

impl LabBuilder {
    /// Construct a new, obstacle-free [`Self`] with the specified dimensions, specified in `(rows, cols)` order.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            tiles: Array2::from_shape_simple_fn((dims.0.get(), dims.1.get()), Tile::default),
            guard: None,
            invalid_reasons: Default::default(),
        }
    }

    #[inline]
    fn in_bounds(&self, location: Location) -> bool {
        location.0 < self.dims.0.get() && location.1 < self.dims.1.get()
    }

    /// Add an obstacle at `location`.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if `location` is out of bounds.
    /// Does nothing once the builder is invalid.
    pub fn add_obstacle(&mut self, location: Location) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if !self.in_bounds(location) {
            self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
            return self;
        }

        self.tiles.index_mut(location.as_index()).assign_elem(Tile::Obstacle);
        self
    }

    /// Shorthand for multiple calls to [`Self::add_obstacle`], with the same conditions.
    pub fn add_obstacles(&mut self, locations: impl IntoIterator<Item=Location>) -> &mut Self {
        for location in locations {
            self.add_obstacle(location);
        }

        self
    }

    /// Place the guard at `location`, facing `heading`.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if `location` is out of bounds,
    /// or a [`GuardAlreadyPlaced`](BuilderInvalidReason::GuardAlreadyPlaced) invalid state if the guard is already on the map.
    /// Does nothing once the builder is invalid.
    pub fn place_guard(&mut self, location: Location, heading: SquareStep) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if !self.in_bounds(location) {
            self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
            return self;
        }

        if self.guard.is_some() {
            self.invalid_reasons.push(BuilderInvalidReason::GuardAlreadyPlaced);
            return self;
        }

        self.guard = Some((location, heading));
        self
    }

    /// The problems recorded so far, or `None` while there are none.
    /// A missing guard is only reported by [`Self::build`], since it may still be placed.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Lab`].
    /// If the builder is invalid for any reason, a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Lab, Vec<BuilderInvalidReason>> {
        let mut reasons = self.invalid_reasons.clone();

        match self.guard {
            None => reasons.push(BuilderInvalidReason::GuardMissing),
            Some((location, _)) if self.tiles.get(location.as_index()) == Some(&Tile::Obstacle) => {
                reasons.push(BuilderInvalidReason::GuardOnObstacle)
            }
            _ => {}
        }

        match (self.guard, reasons.is_empty()) {
            (Some((start, heading)), true) => Ok(Lab::new(Grid::from_array(self.tiles.clone()), start, heading)),
            _ => Err(reasons),
        }
    }
}
