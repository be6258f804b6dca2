use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ExampleData;

/// Spots whose distances differ by less than this many meters are ranked by
/// rating instead of distance.
pub const RATING_BAND_METERS: f64 = 50.0;

/// A point of interest, as returned for a single area query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Spot {
    pub id: String,
    pub name: String,
    /// Coordinates as rendered by the store, e.g. `POINT(10.13 54.32)`.
    pub location: String,
    pub website: String,
    pub description: String,
    pub rating: f64,
    /// Geodesic distance in meters to the center of the query that produced
    /// this spot.
    pub distance: f64,
}

impl Spot {
    /// Whether `self` is listed ahead of `other`.
    ///
    /// Within the rating band the higher rating wins, otherwise the closer
    /// spot. The relation is not transitive: distances of 10, 40 and 70 meters
    /// are pairwise close for (10, 40) and (40, 70) but not for (10, 70).
    pub fn ranks_before(&self, other: &Spot) -> bool {
        if (self.distance - other.distance).abs() < RATING_BAND_METERS {
            self.rating > other.rating
        } else {
            self.distance < other.distance
        }
    }

    /// Orders spots with [`Spot::ranks_before`].
    ///
    /// `sort_by` expects a total order and may panic on the banding relation,
    /// so this is a stable merge sort over short insertion-sorted runs. A spot
    /// only moves ahead of another while it ranks before it, so no adjacent
    /// pair of the result contradicts the comparator and exact ties keep the
    /// store's order.
    pub fn ranked(spots: Vec<Spot>) -> Vec<Spot> {
        let mut spots = spots.into_iter();
        let mut runs = Vec::new();
        loop {
            let mut run = spots.by_ref().take(RANK_RUN_LENGTH).collect::<Vec<_>>();
            if run.is_empty() {
                break;
            }
            insertion_sort(&mut run);
            runs.push(run);
        }

        while runs.len() > 1 {
            let mut pairs = runs.into_iter();
            let mut merged = Vec::new();
            while let Some(left) = pairs.next() {
                merged.push(match pairs.next() {
                    Some(right) => merge(left, right),
                    None => left,
                });
            }
            runs = merged;
        }
        runs.pop().unwrap_or_default()
    }
}

const RANK_RUN_LENGTH: usize = 16;

fn insertion_sort(spots: &mut [Spot]) {
    for i in 1..spots.len() {
        let mut j = i;
        while j > 0 && spots[j].ranks_before(&spots[j - 1]) {
            spots.swap(j, j - 1);
            j -= 1;
        }
    }
}

// Takes from `right` only when its head ranks before the head of `left`.
fn merge(left: Vec<Spot>, right: Vec<Spot>) -> Vec<Spot> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let next = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) if r.ranks_before(l) => right.next(),
            (Some(_), Some(_)) => left.next(),
            _ => break,
        };
        merged.extend(next);
    }
    merged.extend(left);
    merged.extend(right);
    merged
}

impl ExampleData for Spot {
    fn example_data() -> Self {
        Spot {
            id: "7d1b3c1e-5f0e-4a53-9d0a-3f1f1b8f2c11".to_owned(),
            name: "Kiellinie".to_owned(),
            location: "POINT(10.1503 54.3321)".to_owned(),
            website: "https://www.kiel.de".to_owned(),
            description: "Waterfront promenade along the Kiel Fjord.".to_owned(),
            rating: 4.6,
            distance: 312.5,
        }
    }
}
