#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::num::NonZero;

    use itertools::Itertools;
    use ndarray::Array2;
    use proptest::prelude::*;
    use strum::VariantArray;

    use crate::antenna::{AntennaMap, AntinodeMode};
    use crate::builder::{BuilderInvalidReason, LabBuilder};
    use crate::calibration::{Calibration, Equation, Operator};
    use crate::cell::Tile;
    use crate::claw::{Arcade, ClawMachine, Presses};
    use crate::disk::{self, DiskMap};
    use crate::error::{InputError, OrderError, StoneOverflow};
    use crate::lists::PairedLists;
    use crate::explore::{self, Elevation, IMPASSABLE, SUMMIT};
    use crate::grid::Grid;
    use crate::location::Location;
    use crate::ordering::{middle_page, OrderingRules, PrintQueue};
    use crate::patrol::{Lab, PatrolOutcome, PatrolState};
    use crate::reports::{Dampener, Report, Reports};
    use crate::shape::{CompassStep, GridShape, SquareStep, Step};
    use crate::stones::{self, Stones};
    use crate::wordsearch;

    const TRAIL_MAP: &str = "89010123
78121874
87430965
96549874
45678903
32019012
01329801
10456732
";

    const GARDEN: &str = "RRRRIICCFF
RRRRIICCCF
VVRRRCCFFF
VVRCCCJFFF
VVVVCJJCFE
VVIVCCJJEE
VVIIICJJEE
MIIIIIJJEE
MIIISIJEEE
MMMISSJEEE
";

    const LAB: &str = "....#.....
.........#
..........
..#.......
.......#..
..........
.#..^.....
........#.
#.........
......#...
";

    const PRINT_QUEUE: &str = "47|53
97|13
97|61
97|47
75|29
61|13
75|53
29|13
97|29
53|29
61|53
97|53
61|29
47|13
75|47
97|75
47|61
75|61
47|29
75|13
53|13

75,47,61,53,29
97,61,53,29,13
75,29,13
75,97,47,61,53
61,13,29
97,13,75,29,47
";

    const ANTENNAS: &str = "............
........0...
.....0......
.......0....
....0.......
......A.....
............
............
........A...
.........A..
............
............
";

    const WORDS: &str = "MMMSXXMASM
MSAMXMSMSA
AMXSXMAAMM
MSAMASMSMX
XMASAMXAMM
XXAMMXXAMA
SMSMSASXSS
SAXAMASAAA
MAMMMXMMMM
MXMXAXMASX
";

    const EQUATIONS: &str = "190: 10 19
3267: 81 40 27
83: 17 5
156: 15 6
7290: 6 8 6 15
161011: 16 10 13
192: 17 8 14
21037: 9 7 18 13
292: 11 6 16 20
";

    fn dims(rows: usize, cols: usize) -> (NonZero<usize>, NonZero<usize>) {
        (NonZero::new(rows).unwrap(), NonZero::new(cols).unwrap())
    }

    #[test]
    fn grid_round_trips_through_display() {
        let grid = Grid::parse_chars("\nab\ncd\n\n").unwrap();
        assert_eq!((grid.rows(), grid.cols()), (2, 2));
        assert_eq!(format!("{}", grid), "ab
cd
");
    }

    #[test]
    fn ragged_grid_is_malformed() {
        match Grid::parse_chars("abc\nab\n") {
            Err(InputError::Malformed { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected a malformed row, got {other:?}"),
        }

        assert!(matches!(Grid::parse_chars("\n\n"), Err(InputError::Empty)));
    }

    #[test]
    fn blank_line_inside_grid_is_malformed() {
        assert!(matches!(Grid::parse_chars("ab\n\ncd\n"), Err(InputError::Malformed { line: 2, .. })));
        assert!(matches!(Lab::parse("^.\n\n\n..\n"), Err(InputError::Malformed { line: 2, .. })));
    }

    #[test]
    fn neighbors_stay_on_grid() {
        let grid = Grid::parse_chars("ab\ncd\n").unwrap();
        let corner = grid.neighbors::<SquareStep>(Location(0, 0))
            .map(|(dir, location, cell)| (dir, location, *cell))
            .collect_vec();

        assert_eq!(corner, vec![
            (SquareStep::Right, Location(0, 1), 'b'),
            (SquareStep::Down, Location(1, 0), 'c'),
        ]);
        assert_eq!(grid.neighbors::<CompassStep>(Location(0, 0)).count(), 3);
    }

    #[test]
    fn step_directions() {
        assert_eq!(SquareStep::direction_to(Location(1, 1), Location(0, 1)), Some(SquareStep::Up));
        assert_eq!(SquareStep::direction_to(Location(1, 1), Location(0, 0)), None);
        assert_eq!(CompassStep::direction_to(Location(1, 1), Location(0, 0)), Some(CompassStep::NorthWest));

        for dir in SquareStep::VARIANTS {
            assert_eq!(dir.invert().attempt_from(dir.attempt_from(Location(3, 3))), Location(3, 3));
            assert_eq!(SquareStep::from_glyph(dir.glyph()), Some(*dir));
        }
        for dir in CompassStep::VARIANTS {
            assert_eq!(dir.invert().invert(), *dir);
            assert_ne!(dir.invert(), *dir);
        }
    }

    #[test]
    fn flat_map_has_no_trails() {
        let grid = explore::parse_elevations("000\n000\n000\n").unwrap();
        assert_eq!(explore::count_reachable(&grid, Location(1, 1)), 0);
        assert_eq!(explore::trailhead_scores(&grid), 0);
        assert_eq!(explore::trailhead_ratings(&grid), 0);
    }

    #[test]
    fn single_straight_trail() {
        let grid = explore::parse_elevations("0123456789\n").unwrap();
        assert_eq!(explore::count_reachable(&grid, Location(0, 0)), 1);
        assert_eq!(explore::count_reachable(&grid, Location(0, 9)), 1);
        assert_eq!(explore::count_reachable(&grid, Location(0, 10)), 0);
        assert_eq!(explore::trailhead_ratings(&grid), 1);
    }

    #[test]
    fn impassable_cells_split_trails() {
        let grid = explore::parse_elevations("...0...
...1...
...2...
6543456
7.....7
8.....8
9.....9
").unwrap();

        assert_eq!(grid.get(Location(0, 0)), Some(&IMPASSABLE));
        assert_eq!(explore::trailhead_scores(&grid), 2);
        assert_eq!(explore::trailhead_ratings(&grid), 2);
    }

    #[test]
    fn bad_elevation_is_rejected() {
        assert!(matches!(explore::parse_elevations("01\n2x\n"), Err(InputError::Malformed { line: 2, .. })));
    }

    #[test]
    fn trail_map_scores_and_ratings() {
        let grid = explore::parse_elevations(TRAIL_MAP).unwrap();
        assert_eq!(explore::count_reachable(&grid, Location(0, 2)), 5);
        assert_eq!(explore::trailhead_scores(&grid), 36);

        let ratings = explore::trail_ratings(&grid);
        assert_eq!(ratings.get(Location(0, 2)), Some(&20));
        assert_eq!(explore::trailhead_ratings(&grid), 81);
    }

    #[test]
    fn small_garden_regions() {
        let grid = Grid::parse_chars("AAAA\nBBCD\nBBCC\nEEEC\n").unwrap();
        let regions = explore::regions(&grid).into_iter()
            .map(|(plant, region)| (plant, region.area, region.perimeter))
            .collect_vec();

        assert_eq!(regions, vec![
            ('A', 4, 10),
            ('B', 4, 8),
            ('C', 4, 10),
            ('D', 1, 4),
            ('E', 3, 8),
        ]);
        assert_eq!(explore::fence_price(&grid), 140);
    }

    #[test]
    fn enclosed_regions_count_separately() {
        let grid = Grid::parse_chars("OOOOO\nOXOXO\nOOOOO\nOXOXO\nOOOOO\n").unwrap();
        let outer = explore::count_region(&grid, Location(0, 0));

        assert_eq!((outer.area, outer.perimeter), (21, 36));
        assert_eq!(explore::regions(&grid).len(), 5);
        assert_eq!(explore::fence_price(&grid), 772);
    }

    #[test]
    fn large_garden_price() {
        let grid = Grid::parse_chars(GARDEN).unwrap();
        assert_eq!(explore::regions(&grid).len(), 11);
        assert_eq!(explore::fence_price(&grid), 1930);
    }

    #[test]
    fn single_cell_region() {
        let grid = Grid::parse_chars("Z\n").unwrap();
        assert_eq!(explore::count_region(&grid, Location(0, 0)).price(), 4);
        assert_eq!(explore::count_region(&grid, Location(5, 5)).area, 0);
    }

    #[test]
    fn build_lab() {
        let lab = LabBuilder::with_dims(dims(3, 3))
            .add_obstacle(Location(0, 1))
            .place_guard(Location(1, 1), SquareStep::Up)
            .build()
            .unwrap();

        assert_eq!(format!("{}", lab), ".#.
.^.
...
");
        assert_eq!(format!("{}", lab.tiles()), ".#.
...
...
");
    }

    #[test]
    fn builder_invalid_reasons() {
        let mut builder = LabBuilder::with_dims(dims(3, 3));
        builder.add_obstacle(Location(3, 0));
        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::FeatureOutOfBounds]));
        // further features are ignored once invalid
        builder.place_guard(Location(1, 1), SquareStep::Up);
        assert_eq!(builder.build().unwrap_err(), vec![
            BuilderInvalidReason::FeatureOutOfBounds,
            BuilderInvalidReason::GuardMissing,
        ]);

        let twice = LabBuilder::default()
            .place_guard(Location(0, 0), SquareStep::Up)
            .place_guard(Location(0, 1), SquareStep::Up)
            .clone();
        assert_eq!(twice.is_valid(), Some(&vec![BuilderInvalidReason::GuardAlreadyPlaced]));

        assert_eq!(LabBuilder::default().build().unwrap_err(), vec![BuilderInvalidReason::GuardMissing]);

        let on_obstacle = LabBuilder::default()
            .add_obstacles([Location(2, 2), Location(4, 4)])
            .place_guard(Location(4, 4), SquareStep::Left)
            .build();
        assert_eq!(on_obstacle.unwrap_err(), vec![BuilderInvalidReason::GuardOnObstacle]);
    }

    #[test]
    fn guard_turns_once_and_leaves() {
        let lab = LabBuilder::with_dims(dims(3, 3))
            .add_obstacle(Location(0, 1))
            .place_guard(Location(1, 1), SquareStep::Up)
            .build()
            .unwrap();

        let mut patrol = lab.patrol();
        assert_eq!(patrol.step(), PatrolState::Blocked);
        assert_eq!(patrol.heading(), SquareStep::Right);
        assert_eq!(patrol.step(), PatrolState::Moving);
        assert_eq!(patrol.position(), Location(1, 2));
        assert_eq!(patrol.step(), PatrolState::Exited);
        assert_eq!(patrol.step(), PatrolState::Exited);

        assert_eq!(lab.walk(), PatrolOutcome::Exited { visited: 2 });
        assert_eq!(lab.route(), vec![
            (Location(1, 1), SquareStep::Up),
            (Location(1, 1), SquareStep::Right),
            (Location(1, 2), SquareStep::Right),
        ]);
    }

    #[test]
    fn boxed_in_guard_loops() {
        let lab = LabBuilder::with_dims(dims(3, 3))
            .add_obstacles([Location(0, 1), Location(1, 0), Location(1, 2), Location(2, 1)])
            .place_guard(Location(1, 1), SquareStep::Down)
            .build()
            .unwrap();

        assert_eq!(lab.walk(), PatrolOutcome::Looping);
        assert_eq!(lab.patrol().run(), PatrolState::Looping);
        assert_eq!(lab.count_loop_obstructions(), 0);
    }

    #[test]
    fn lab_patrol_and_obstructions() {
        let lab = Lab::parse(LAB).unwrap();
        assert_eq!(lab.start(), Location(6, 4));
        assert_eq!(lab.heading(), SquareStep::Up);
        assert_eq!(format!("{}", lab), LAB);

        assert_eq!(lab.walk(), PatrolOutcome::Exited { visited: 41 });
        assert_eq!(lab.patrol().with_obstruction(Location(6, 3)).run(), PatrolState::Looping);
        assert_eq!(lab.patrol().with_obstruction(Location(0, 0)).run(), PatrolState::Exited);
        assert_eq!(lab.count_loop_obstructions(), 6);
    }

    #[test]
    fn lab_parse_errors() {
        assert!(matches!(Lab::parse("...\n.#.\n"), Err(InputError::MissingStart { .. })));
        assert!(matches!(Lab::parse("^..\n..>\n"), Err(InputError::Malformed { line: 2, .. })));
        assert!(matches!(Lab::parse("^.?\n"), Err(InputError::Malformed { line: 1, .. })));

        let facing_left = Lab::parse("..<\n").unwrap();
        assert_eq!(facing_left.heading(), SquareStep::Left);
        assert_eq!(facing_left.walk(), PatrolOutcome::Exited { visited: 3 });
    }

    #[test]
    fn ordering_scenario() {
        let rules = OrderingRules::from_iter([(1, 2), (2, 3)]);

        assert!(rules.must_precede(1, 2));
        assert!(!rules.must_precede(1, 3));
        assert!(rules.is_consistent(&[1, 2, 3]));
        assert!(rules.is_consistent(&[1, 3]));
        assert!(!rules.is_consistent(&[3, 1, 2]));
        assert_eq!(rules.topological_order(&[3, 1, 2]), Ok(vec![1, 2, 3]));
    }

    #[test]
    fn unconstrained_pages_come_smallest_first() {
        let rules = OrderingRules::from_iter([(9, 4)]);

        assert!(rules.is_consistent(&[]));
        assert!(rules.is_consistent(&[7, 5, 6]));
        assert_eq!(rules.topological_order(&[7, 4, 9, 5]), Ok(vec![5, 7, 9, 4]));
        assert_eq!(rules.topological_order(&[4, 4, 9]), Ok(vec![9, 4]));
        assert_eq!(rules.topological_order(&[]), Ok(vec![]));
    }

    #[test]
    fn cycle_is_reported() {
        let mut rules = OrderingRules::new();
        rules.add_rule(1, 2).add_rule(2, 1).add_rule(1, 2);
        assert_eq!(rules.len(), 2);

        assert_eq!(rules.topological_order(&[3, 2, 1]), Err(OrderError::CycleDetected { remaining: vec![1, 2] }));

        let queue = PrintQueue::new(rules, vec![vec![1, 2]]);
        assert!(queue.reordered_middle_sum().is_err());
    }

    #[test]
    fn middle_pages() {
        assert_eq!(middle_page(&[75, 47, 61, 53, 29]), Some(61));
        assert_eq!(middle_page(&[1, 2]), Some(2));
        assert_eq!(middle_page(&[]), None);
    }

    #[test]
    fn print_queue_sums() {
        let queue = PrintQueue::parse(PRINT_QUEUE).unwrap();
        assert_eq!(queue.rules().len(), 21);
        assert_eq!(queue.updates().len(), 6);
        assert_eq!(queue.skipped(), 0);

        assert_eq!(queue.ordered_middle_sum(), 143);
        assert_eq!(queue.reordered_middle_sum(), Ok(123));
        assert_eq!(queue.rules().topological_order(&[97, 13, 75, 29, 47]), Ok(vec![97, 75, 47, 29, 13]));
    }

    #[test]
    fn print_queue_skips_malformed_lines() {
        let queue = PrintQueue::parse("\n1|2\nx|y\n3-4\n\n2,1\n2,a\n\n1,2\n").unwrap();
        assert_eq!(queue.rules().len(), 1);
        assert_eq!(queue.updates(), &[vec![2, 1], vec![1, 2]]);
        assert_eq!(queue.skipped(), 3);

        assert!(matches!(PrintQueue::parse("\n\n"), Err(InputError::Empty)));
        assert!(matches!(PrintQueue::parse("x|y\n\n1,a\n"), Err(InputError::Empty)));
    }

    #[test]
    fn antenna_antinodes() {
        let map = AntennaMap::parse(ANTENNAS).unwrap();
        assert_eq!(map.frequencies().collect_vec(), vec!['0', 'A']);
        assert_eq!(map.pairs().count(), 9);

        assert_eq!(map.count_antinodes(AntinodeMode::Pair), 14);
        assert_eq!(map.count_antinodes(AntinodeMode::Harmonic), 34);
    }

    #[test]
    fn harmonics_step_by_reduced_offset() {
        let map = AntennaMap::parse("T.........
...T......
.T........
..........
..........
..........
..........
..........
..........
..........
").unwrap();

        assert_eq!(map.count_antinodes(AntinodeMode::Harmonic), 9);
        assert!(map.antinodes(AntinodeMode::Harmonic).contains(&Location(0, 0)));

        // offset (2, 2) reduces to (1, 1)
        let diagonal = AntennaMap::parse("a....\n.....\n..a..\n.....\n.....\n").unwrap();
        assert_eq!(diagonal.count_antinodes(AntinodeMode::Harmonic), 5);
        assert_eq!(diagonal.antinodes(AntinodeMode::Pair), HashSet::from([Location(4, 4)]));
    }

    #[test]
    fn word_search() {
        let grid = Grid::parse_chars(WORDS).unwrap();
        assert_eq!(wordsearch::count_word(&grid, "XMAS"), 18);
        assert_eq!(wordsearch::count_crosses(&grid, "MAS"), 9);

        assert_eq!(wordsearch::count_word(&grid, ""), 0);
        assert_eq!(wordsearch::count_crosses(&grid, "XMAS"), 0);
    }

    #[test]
    fn word_search_palindrome_reads_both_ways() {
        let grid = Grid::parse_chars("ABA\n").unwrap();
        assert_eq!(wordsearch::count_word(&grid, "ABA"), 2);
        assert_eq!(wordsearch::count_word(&grid, "A"), 16);
    }

    #[test]
    fn operators() {
        assert_eq!(Operator::Concatenate.apply(12, 345), Some(12345));
        assert_eq!(Operator::Concatenate.apply(7, 0), Some(70));
        assert_eq!(Operator::Add.apply(u64::MAX, 1), None);
        assert_eq!(Operator::Multiply.apply(u64::MAX, 2), None);
    }

    #[test]
    fn equations() {
        let equation = Equation::parse(1, "3267: 81 40 27").unwrap();
        assert_eq!(equation, Equation { target: 3267, operands: vec![81, 40, 27] });
        assert!(equation.is_solvable(Operator::ARITHMETIC));

        let concatenated = Equation::parse(1, "156: 15 6").unwrap();
        assert!(!concatenated.is_solvable(Operator::ARITHMETIC));
        assert!(concatenated.is_solvable(Operator::VARIANTS));

        assert!(Equation::parse(1, "5: 5").unwrap().is_solvable(Operator::ARITHMETIC));
        assert!(!Equation::parse(1, "18446744073709551615: 18446744073709551615 2").unwrap()
            .is_solvable(Operator::VARIANTS));
        assert!(Equation::parse(3, "12 3").is_err());
        assert!(Equation::parse(3, "12:").is_err());
    }

    #[test]
    fn calibration_totals() {
        let calibration = Calibration::parse(EQUATIONS).unwrap();
        assert_eq!(calibration.equations().len(), 9);
        assert_eq!(calibration.total(Operator::ARITHMETIC), 3749);
        assert_eq!(calibration.total(Operator::VARIANTS), 11387);

        let skipping = Calibration::parse("10: 5 5\nnonsense\n\n4: 2 x\n").unwrap();
        assert_eq!(skipping.skipped(), 2);
        assert_eq!(skipping.total(Operator::ARITHMETIC), 10);

        assert!(matches!(Calibration::parse(""), Err(InputError::Empty)));
        assert!(matches!(Calibration::parse("nonsense\n10 5 5\n"), Err(InputError::Empty)));
    }

    #[test]
    fn paired_lists() {
        let lists = PairedLists::parse("3   4\n4   3\n2   5\n1   3\n3   9\n3   3\n").unwrap();
        assert_eq!(lists.len(), 6);
        assert_eq!(lists.total_distance(), 11);
        assert_eq!(lists.similarity_score(), 31);

        let skipping = PairedLists::parse("1 2\n3\n4 x\n5 6 7\n").unwrap();
        assert_eq!((skipping.len(), skipping.skipped()), (1, 3));
        assert!(matches!(PairedLists::parse("1\n"), Err(InputError::Empty)));

        assert_eq!(PairedLists::new(vec![10, 1, 7], vec![2, 8]).total_distance(), 3);
    }

    #[test]
    fn reactor_reports() {
        let reports = Reports::parse("7 6 4 2 1
1 2 7 8 9
9 7 6 2 1
1 3 2 4 5
8 6 4 4 1
1 3 6 7 9
").unwrap();

        assert_eq!(reports.reports().len(), 6);
        assert_eq!(reports.count_safe(Dampener::Off), 2);
        assert_eq!(reports.count_safe(Dampener::On), 4);
    }

    #[test]
    fn dampener_may_drop_first_or_last_level() {
        assert!(!Report::new(vec![9, 1, 2, 3]).is_safe(Dampener::Off));
        assert!(Report::new(vec![9, 1, 2, 3]).is_safe(Dampener::On));
        assert!(Report::new(vec![1, 2, 3, 9]).is_safe(Dampener::On));
        // direction is set by the first pair, which the dampener can remove
        assert!(Report::new(vec![5, 6, 4, 3, 2]).is_safe(Dampener::On));
        assert!(!Report::new(vec![1, 1, 1]).is_safe(Dampener::On));

        assert!(Report::new(vec![4]).is_safe(Dampener::Off));
        assert!(Report::parse(1, "").is_err());
        assert!(matches!(Reports::parse("a b\n"), Err(InputError::Empty)));
    }

    #[test]
    fn disk_layout_and_compaction() {
        let small = DiskMap::parse("12345\n").unwrap();
        assert_eq!(disk::render(&small.blocks()), "0..111....22222");
        assert_eq!(small.compact_blocks(), 60);
        assert_eq!(small.compact_files(), 132);

        let disk = DiskMap::parse("2333133121414131402").unwrap();
        assert_eq!(disk::render(&disk.blocks()), "00...111...2...333.44.5555.6666.777.888899");
        assert_eq!(disk.file_count(), 10);
        assert_eq!(disk.compact_blocks(), 1928);
        assert_eq!(disk.compact_files(), 2858);
    }

    #[test]
    fn disk_map_errors() {
        assert!(matches!(DiskMap::parse("12a4"), Err(InputError::Malformed { line: 1, .. })));
        assert!(matches!(DiskMap::parse("12\n34\n"), Err(InputError::Malformed { line: 2, .. })));
        assert!(matches!(DiskMap::parse("\n"), Err(InputError::Empty)));

        // nothing to move
        let packed = DiskMap::from_lengths(&[1, 0, 2]);
        assert_eq!(packed.compact_blocks(), 3);
        assert_eq!(packed.compact_files(), 3);
    }

    #[test]
    fn single_stone_rules() {
        assert_eq!(stones::blink_once(0), Ok(vec![1]));
        assert_eq!(stones::blink_once(1000), Ok(vec![10, 0]));
        assert_eq!(stones::blink_once(99), Ok(vec![9, 9]));
        assert_eq!(stones::blink_once(999), Ok(vec![2021976]));
        assert_eq!(stones::blink_once(u64::MAX / 1000), Err(StoneOverflow { stone: u64::MAX / 1000 }));
    }

    #[test]
    fn stones_after_blinking() {
        let first = Stones::parse("0 1 10 99 999\n").unwrap().blink().unwrap();
        assert_eq!(first.len(), 7);
        assert_eq!(first.count_of(9), 2);
        assert_eq!(first.count_of(0), 1);

        let stones = Stones::parse("125 17").unwrap();
        assert_eq!(stones.after(6).unwrap().len(), 22);
        assert_eq!(stones.after(25).unwrap().len(), 55312);

        assert!(matches!(Stones::parse("1 -2"), Err(InputError::Malformed { line: 1, .. })));
        assert!(matches!(Stones::parse(" \n"), Err(InputError::Empty)));
    }

    const CLAW_MACHINES: &str = "Button A: X+94, Y+34
Button B: X+22, Y+67
Prize: X=8400, Y=5400

Button A: X+26, Y+66
Button B: X+67, Y+21
Prize: X=12748, Y=12176

Button A: X+17, Y+86
Button B: X+84, Y+37
Prize: X=7870, Y=6450

Button A: X+69, Y+23
Button B: X+27, Y+71
Prize: X=18641, Y=10279
";

    #[test]
    fn claw_machine_tokens() {
        let arcade = Arcade::parse(CLAW_MACHINES).unwrap();
        assert_eq!(arcade.machines().len(), 4);
        assert_eq!(arcade.machines()[0], ClawMachine { a: (94, 34), b: (22, 67), prize: (8400, 5400) });

        assert_eq!(arcade.machines()[0].cheapest(Some(100)), Some(Presses { a: 80, b: 40 }));
        assert_eq!(arcade.machines()[1].cheapest(Some(100)), None);
        assert_eq!(arcade.fewest_tokens(), 480);

        assert!(arcade.machines()[0].corrected().cheapest(None).is_none());
        assert!(arcade.machines()[1].corrected().cheapest(None).is_some());
        assert_eq!(arcade.fewest_tokens_corrected(), 875318608908);
    }

    #[test]
    fn collinear_buttons_pick_cheapest_trade() {
        let cheap_b = ClawMachine { a: (2, 2), b: (1, 1), prize: (4, 4) };
        assert_eq!(cheap_b.cheapest(None), Some(Presses { a: 0, b: 4 }));

        let cheap_a = ClawMachine { a: (4, 4), b: (1, 1), prize: (8, 8) };
        assert_eq!(cheap_a.cheapest(None).map(|presses| presses.cost()), Some(6));

        let off_line = ClawMachine { a: (2, 2), b: (1, 1), prize: (4, 5) };
        assert_eq!(off_line.cheapest(None), None);

        let too_far = ClawMachine { a: (1, 0), b: (0, 1), prize: (101, 1) };
        assert_eq!(too_far.cheapest(Some(100)), None);
        assert_eq!(too_far.cheapest(None), Some(Presses { a: 101, b: 1 }));
    }

    #[test]
    fn arcade_skips_malformed_machines() {
        let arcade = Arcade::parse("Button A: X+1, Y+0
Button B: X+0, Y+1
Prize: X=2, Y=3

Button A: X+1
Button B: X+0, Y+1
Prize: X=2, Y=3

Prize: X=2, Y=3
").unwrap();

        assert_eq!(arcade.machines().len(), 1);
        assert_eq!(arcade.skipped(), 2);
        assert_eq!(arcade.fewest_tokens(), 9);
        assert!(matches!(Arcade::parse("Prize: X=2, Y=3\n"), Err(InputError::Empty)));
    }

    // every summit reachable from `from` by climbing one unit per step, found by exhaustive search
    fn summits_from(grid: &Grid<Elevation>, from: Location, found: &mut HashSet<Location>) -> u64 {
        let Some(&height) = grid.get(from) else {
            return 0;
        };
        if height == SUMMIT {
            found.insert(from);
            return 1;
        }

        grid.neighbors::<SquareStep>(from)
            .filter(|(_, _, next)| height < SUMMIT && **next == height + 1)
            .map(|(_, neighbor, _)| summits_from(grid, neighbor, found))
            .sum()
    }

    fn arb_grid<T: Clone + std::fmt::Debug>(cell: impl Strategy<Value=T> + Clone) -> impl Strategy<Value=Grid<T>> {
        (1usize..=5, 1usize..=5).prop_flat_map(move |(rows, cols)| {
            prop::collection::vec(cell.clone(), rows * cols)
                .prop_map(move |cells| Grid::from_array(Array2::from_shape_vec((rows, cols), cells).unwrap()))
        })
    }

    proptest! {
        #[test]
        fn reachability_matches_exhaustive_search(grid in arb_grid(0u8..=9)) {
            let ratings = explore::trail_ratings(&grid);

            for (location, _) in grid.indexed() {
                let mut found = HashSet::new();
                let paths = summits_from(&grid, location, &mut found);
                prop_assert_eq!(explore::count_reachable(&grid, location), found.len());
                prop_assert_eq!(ratings.get(location), Some(&paths));
            }
        }

        #[test]
        fn regions_partition_the_grid(grid in arb_grid(prop::sample::select(vec!['A', 'B', 'C']))) {
            let regions = explore::regions(&grid);
            prop_assert_eq!(regions.iter().map(|(_, region)| region.area).sum::<usize>(), grid.len());
            prop_assert!(regions.iter().all(|(_, region)| region.perimeter >= 4 && region.perimeter % 2 == 0));

            // each cell carries exactly one label; labels agree with region sizes and plants
            let labels = explore::region_labels(&grid);
            let members = labels.indexed().map(|(_, label)| *label).counts();
            prop_assert_eq!(members.len(), regions.len());
            for (label, (plant, region)) in regions.iter().enumerate() {
                prop_assert_eq!(members.get(&label), Some(&region.area));
                prop_assert!(labels.positions_of(&label).all(|cell| grid.get(cell) == Some(plant)));
            }

            // equal neighbors share a region, different ones never do
            for (location, plant) in grid.indexed() {
                for (_, neighbor, other) in grid.neighbors::<SquareStep>(location) {
                    prop_assert_eq!(labels.get(location) == labels.get(neighbor), plant == other);
                }
            }
        }

        #[test]
        fn topological_order_is_consistent(
            rules in prop::collection::vec((0u32..12, 0u32..12), 0..30),
            sequence in prop::collection::vec(0u32..12, 0..12)
        ) {
            // only forward rules, so there is never a cycle
            let rules = rules.into_iter().filter(|(a, b)| a < b).collect::<OrderingRules>();
            let order = rules.topological_order(&sequence).unwrap();

            prop_assert!(rules.is_consistent(&order));
            prop_assert_eq!(order.iter().copied().sorted().collect_vec(), sequence.iter().copied().sorted().dedup().collect_vec());
            if rules.is_consistent(&sequence) && sequence.iter().all_unique() {
                prop_assert_eq!(order.len(), sequence.len());
            }
        }

        #[test]
        fn patrol_is_deterministic(
            obstacles in prop::collection::vec((0usize..6, 0usize..6), 0..10),
            guard in (0usize..6, 0usize..6),
            heading in prop::sample::select(SquareStep::VARIANTS)
        ) {
            let guard = Location(guard.0, guard.1);
            let lab = LabBuilder::with_dims(dims(6, 6))
                .add_obstacles(obstacles.into_iter().map(|(row, col)| Location(row, col)).filter(|location| *location != guard))
                .place_guard(guard, heading)
                .build()
                .unwrap();

            let outcome = lab.walk();
            prop_assert_eq!(outcome, lab.walk());

            let route = lab.route();
            match outcome {
                PatrolOutcome::Exited { visited } => {
                    prop_assert!(route.iter().all_unique());
                    prop_assert_eq!(visited, route.iter().map(|(location, _)| location).unique().count());
                }
                PatrolOutcome::Looping => {
                    // the last pose closes the loop
                    let (last, earlier) = route.split_last().unwrap();
                    prop_assert!(earlier.contains(last));
                }
            }
        }

        #[test]
        fn obstructions_match_rewalking_from_start(
            obstacles in prop::collection::vec((0usize..7, 0usize..7), 0..12),
            guard in (0usize..7, 0usize..7),
            heading in prop::sample::select(SquareStep::VARIANTS)
        ) {
            let guard = Location(guard.0, guard.1);
            let lab = LabBuilder::with_dims(dims(7, 7))
                .add_obstacles(obstacles.into_iter().map(|(row, col)| Location(row, col)).filter(|location| *location != guard))
                .place_guard(guard, heading)
                .build()
                .unwrap();
            prop_assume!(matches!(lab.walk(), PatrolOutcome::Exited { .. }));

            let rewalked = lab.tiles().positions_of(&Tile::Open)
                .filter(|cell| *cell != guard)
                .filter(|cell| lab.patrol().with_obstruction(*cell).run() == PatrolState::Looping)
                .count();
            prop_assert_eq!(lab.count_loop_obstructions(), rewalked);
        }
    }
}
