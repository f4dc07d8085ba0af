/// World population estimates at known checkpoints, ascending by year.
const CHECKPOINTS: [(i32, u64); 11] = [
    (1950, 2_500_000_000),
    (1960, 3_000_000_000),
    (1970, 3_700_000_000),
    (1980, 4_400_000_000),
    (1990, 5_300_000_000),
    (2000, 6_100_000_000),
    (2005, 6_500_000_000),
    (2010, 6_900_000_000),
    (2015, 7_300_000_000),
    (2020, 7_800_000_000),
    (2024, 8_100_000_000),
];

pub const CURRENT_WORLD_POPULATION: u64 = 8_100_000_000;

/// Population of the first checkpoint at or after `year`.
///
/// Years past the last checkpoint resolve to the latest known estimate.
pub fn population_at_year(year: i32) -> u64 {
    CHECKPOINTS
        .iter()
        .find(|(checkpoint, _)| year <= *checkpoint)
        .or_else(|| CHECKPOINTS.last())
        .map_or(CURRENT_WORLD_POPULATION, |(_, population)| *population)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_checkpoint_returns_its_value() {
        assert_eq!(population_at_year(1950), 2_500_000_000);
        assert_eq!(population_at_year(2024), 8_100_000_000);
    }

    #[test]
    fn between_checkpoints_uses_the_next_one() {
        assert_eq!(population_at_year(1955), 3_000_000_000);
        assert_eq!(population_at_year(2001), 6_500_000_000);
        assert_eq!(population_at_year(2021), 8_100_000_000);
    }

    #[test]
    fn years_outside_the_table() {
        assert_eq!(population_at_year(1900), 2_500_000_000);
        assert_eq!(population_at_year(2030), 8_100_000_000);
        assert_eq!(population_at_year(i32::MAX), CURRENT_WORLD_POPULATION);
    }
}
