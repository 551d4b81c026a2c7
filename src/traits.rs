//! Seams between the planner and its collaborators.

/// Provides a travel-time matrix (whole minutes) for a set of locations.
///
/// The matrix is indexed by the provided location order and evaluated for a
/// single hour of day. Self-entries must be 0.
pub trait DistanceMatrixProvider {
    fn matrix_for(&self, locations: &[(f64, f64)], hour_of_day: u32) -> Vec<Vec<i32>>;
}
