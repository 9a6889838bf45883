use lifedash_core::{
    blocks_for_instant, blocks_in_quarter, distribution_by, domain_distribution, domain_progress,
    priority_distribution, progress_stats, summarize, type_distribution, upcoming_deadline_views,
    upcoming_deadlines, AnalyticsConfig, AnalyticsError, BlockType, DeadlineUrgency, Domain,
    Priority, ProgressStats, TimeBlock, DAY_MS,
};

// 2024-06-01T00:00:00Z
const AS_OF_MS: i64 = 1_717_200_000_000;

fn block(title: &str, domain: Domain, kind: BlockType, end_ms: i64, progress: u8) -> TimeBlock {
    let mut block = TimeBlock::new(title, domain, kind, AS_OF_MS - 10 * DAY_MS, end_ms);
    block.progress = progress;
    block
}

fn due_in(title: &str, days: i64, progress: u8) -> TimeBlock {
    block(
        title,
        Domain::Work,
        BlockType::Project,
        AS_OF_MS + days * DAY_MS,
        progress,
    )
}

fn titles(blocks: &[&TimeBlock]) -> Vec<String> {
    blocks.iter().map(|block| block.title.clone()).collect()
}

#[test]
fn progress_stats_of_empty_snapshot_is_all_zero() {
    assert_eq!(
        progress_stats(&[]),
        ProgressStats {
            total_blocks: 0,
            completed_blocks: 0,
            avg_progress: 0,
            total_estimated_hours: 0.0,
        }
    );
}

#[test]
fn progress_stats_counts_exact_completion_and_rounds_mean() {
    let records = vec![due_in("a", 1, 0), due_in("b", 2, 50), due_in("c", 3, 100)];
    let stats = progress_stats(&records);
    assert_eq!(stats.total_blocks, 3);
    assert_eq!(stats.completed_blocks, 1);
    assert_eq!(stats.avg_progress, 50);
}

#[test]
fn progress_stats_rounds_half_up() {
    // mean 0.5 -> 1, mean 33.33 -> 33, mean 66.67 -> 67
    assert_eq!(
        progress_stats(&[due_in("a", 1, 0), due_in("b", 1, 1)]).avg_progress,
        1
    );
    assert_eq!(
        progress_stats(&[due_in("a", 1, 0), due_in("b", 1, 0), due_in("c", 1, 100)]).avg_progress,
        33
    );
    assert_eq!(
        progress_stats(&[due_in("a", 1, 0), due_in("b", 1, 100), due_in("c", 1, 100)])
            .avg_progress,
        67
    );
}

#[test]
fn progress_stats_sums_hours_treating_absent_as_zero() {
    let mut with_hours = due_in("a", 1, 10);
    with_hours.estimated_hours = Some(12.0);
    let mut with_more_hours = due_in("b", 1, 10);
    with_more_hours.estimated_hours = Some(3.5);
    let without_hours = due_in("c", 1, 10);

    let stats = progress_stats(&[with_hours, with_more_hours, without_hours]);
    assert_eq!(stats.total_estimated_hours, 15.5);
}

#[test]
fn distribution_keeps_first_occurrence_order_and_sums_to_total() {
    let records = vec![
        block("a", Domain::Soul, BlockType::Habit, AS_OF_MS, 0),
        block("b", Domain::Financial, BlockType::Goal, AS_OF_MS, 0),
        block("c", Domain::Soul, BlockType::Goal, AS_OF_MS, 0),
        block("d", Domain::Brain, BlockType::Event, AS_OF_MS, 0),
        block("e", Domain::Financial, BlockType::Goal, AS_OF_MS, 0),
    ];

    assert_eq!(
        domain_distribution(&records),
        vec![
            (Domain::Soul, 2),
            (Domain::Financial, 2),
            (Domain::Brain, 1)
        ]
    );
    assert_eq!(
        type_distribution(&records),
        vec![
            (BlockType::Habit, 1),
            (BlockType::Goal, 3),
            (BlockType::Event, 1)
        ]
    );

    let by_priority = priority_distribution(&records);
    assert_eq!(by_priority, vec![(Priority::Medium, 5)]);

    for counts in [
        domain_distribution(&records)
            .into_iter()
            .map(|(_, count)| count)
            .sum::<usize>(),
        type_distribution(&records)
            .into_iter()
            .map(|(_, count)| count)
            .sum::<usize>(),
    ] {
        assert_eq!(counts, records.len());
    }
}

#[test]
fn distribution_by_accepts_custom_keys() {
    let records = vec![due_in("a", 1, 100), due_in("b", 1, 20), due_in("c", 1, 100)];
    let by_completion = distribution_by(&records, |block| block.is_complete());
    assert_eq!(by_completion, vec![(true, 2), (false, 1)]);
    assert!(distribution_by(&[], |block: &TimeBlock| block.domain).is_empty());
}

#[test]
fn upcoming_excludes_completed_even_inside_window() {
    let records = vec![due_in("done", 3, 100), due_in("open", 4, 99)];
    let upcoming = upcoming_deadlines(&records, AS_OF_MS, 30, 5);
    assert_eq!(titles(&upcoming), vec!["open"]);
}

#[test]
fn upcoming_excludes_past_and_beyond_window() {
    let records = vec![
        due_in("past", -2, 0),
        due_in("edge", 30, 0),
        due_in("beyond", 31, 0),
        due_in("soon", 5, 0),
    ];
    let upcoming = upcoming_deadlines(&records, AS_OF_MS, 30, 5);
    assert_eq!(titles(&upcoming), vec!["soon", "edge"]);
}

#[test]
fn upcoming_sorts_by_end_date_and_truncates_to_limit() {
    let records = vec![
        due_in("d9", 9, 0),
        due_in("d2", 2, 0),
        due_in("d7", 7, 0),
        due_in("d1", 1, 0),
        due_in("d5", 5, 0),
        due_in("d3", 3, 0),
        due_in("d8", 8, 0),
    ];
    let upcoming = upcoming_deadlines(&records, AS_OF_MS, 30, 5);
    assert_eq!(titles(&upcoming), vec!["d1", "d2", "d3", "d5", "d7"]);

    let short = upcoming_deadlines(&records, AS_OF_MS, 30, 2);
    assert_eq!(titles(&short), vec!["d1", "d2"]);
}

#[test]
fn upcoming_day_boundaries_follow_ceiling_rounding() {
    let later_today = block(
        "later today",
        Domain::Mind,
        BlockType::Event,
        AS_OF_MS + 60 * 60 * 1000,
        0,
    );
    let just_passed = block("just passed", Domain::Mind, BlockType::Event, AS_OF_MS - 1, 0);
    let day_ago = block(
        "day ago",
        Domain::Mind,
        BlockType::Event,
        AS_OF_MS - DAY_MS,
        0,
    );
    let window_edge_plus = block(
        "window edge plus",
        Domain::Mind,
        BlockType::Event,
        AS_OF_MS + 30 * DAY_MS + 1,
        0,
    );
    let records = vec![later_today, just_passed, day_ago, window_edge_plus];

    let views = upcoming_deadline_views(&records, AS_OF_MS, 30, 5);
    let summary: Vec<(String, i64)> = views
        .iter()
        .map(|view| (view.block.title.clone(), view.days_until))
        .collect();
    // A deadline <24h in the past rounds up to 0 days and still counts.
    assert_eq!(
        summary,
        vec![
            ("just passed".to_string(), 0),
            ("later today".to_string(), 1),
        ]
    );
    assert_eq!(views[0].urgency, DeadlineUrgency::Today);
    assert_eq!(views[1].urgency, DeadlineUrgency::Urgent);
}

#[test]
fn upcoming_respects_custom_window() {
    let records = vec![due_in("d3", 3, 0), due_in("d10", 10, 0)];
    let upcoming = upcoming_deadlines(&records, AS_OF_MS, 7, 5);
    assert_eq!(titles(&upcoming), vec!["d3"]);
}

#[test]
fn domain_progress_covers_all_domains() {
    let records = vec![
        block("a", Domain::Work, BlockType::Goal, AS_OF_MS, 40),
        block("b", Domain::Work, BlockType::Goal, AS_OF_MS, 81),
        block("c", Domain::Soul, BlockType::Habit, AS_OF_MS, 10),
    ];
    let rows = domain_progress(&records);
    assert_eq!(rows.len(), 6);

    let work = rows
        .iter()
        .find(|row| row.domain == Domain::Work)
        .expect("work row");
    assert_eq!((work.block_count, work.avg_progress), (2, 61));

    let brain = rows
        .iter()
        .find(|row| row.domain == Domain::Brain)
        .expect("brain row");
    assert_eq!((brain.block_count, brain.avg_progress), (0, 0));
}

#[test]
fn blocks_for_instant_uses_inclusive_range() {
    let mut spanning = block("spanning", Domain::Brain, BlockType::Project, AS_OF_MS, 0);
    spanning.start_ms = AS_OF_MS - DAY_MS;
    let mut ending_before = block(
        "before",
        Domain::Brain,
        BlockType::Project,
        AS_OF_MS - 1,
        0,
    );
    ending_before.start_ms = AS_OF_MS - DAY_MS;

    let records = vec![spanning, ending_before];
    let hits = blocks_for_instant(&records, AS_OF_MS);
    assert_eq!(titles(&hits), vec!["spanning"]);
}

#[test]
fn blocks_in_quarter_selects_overlapping_ranges() {
    // Q2 2024 = 2024-04-01 .. 2024-06-30 UTC
    let q2_start = 1_711_929_600_000;
    let q3_start = 1_719_792_000_000;

    let ranged = |title: &str, start_ms: i64, end_ms: i64| {
        let mut block = block(title, Domain::Financial, BlockType::Goal, end_ms, 0);
        block.start_ms = start_ms;
        block
    };
    let inside = ranged("inside", q2_start, q2_start + DAY_MS);
    let straddling = ranged("straddling", q3_start - DAY_MS, q3_start + DAY_MS);
    let next_quarter = ranged("next", q3_start, q3_start + DAY_MS);

    let records = vec![inside, straddling, next_quarter];
    let q2 = blocks_in_quarter(&records, 2024, 2).expect("valid quarter");
    assert_eq!(titles(&q2), vec!["inside", "straddling"]);

    let q3 = blocks_in_quarter(&records, 2024, 3).expect("valid quarter");
    assert_eq!(titles(&q3), vec!["straddling", "next"]);

    assert_eq!(
        blocks_in_quarter(&records, 2024, 5).unwrap_err(),
        AnalyticsError::InvalidQuarter(5)
    );
}

#[test]
fn summarize_bundles_every_section() {
    let records = vec![
        due_in("first", 2, 30),
        due_in("second", 20, 100),
        block("third", Domain::Mind, BlockType::Habit, AS_OF_MS + 40 * DAY_MS, 60),
    ];
    let summary = summarize(&records, AS_OF_MS, &AnalyticsConfig::default());

    assert_eq!(summary.stats.total_blocks, 3);
    assert_eq!(summary.stats.completed_blocks, 1);
    assert_eq!(summary.stats.avg_progress, 63);
    assert_eq!(
        summary.domain_distribution,
        vec![(Domain::Work, 2), (Domain::Mind, 1)]
    );
    assert_eq!(summary.upcoming.len(), 1);
    assert_eq!(summary.upcoming[0].block.title, "first");
    assert_eq!(summary.upcoming[0].days_until, 2);
    assert_eq!(summary.domain_progress.len(), 6);
}

#[test]
fn analytics_never_mutates_input() {
    let records = vec![due_in("b", 5, 0), due_in("a", 1, 0)];
    let before = records.clone();
    let _ = upcoming_deadlines(&records, AS_OF_MS, 30, 5);
    let _ = summarize(&records, AS_OF_MS, &AnalyticsConfig::default());
    assert_eq!(records, before);
}
