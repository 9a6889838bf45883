use lifedash_core::{
    BlockType, ClassificationError, Domain, Priority, TimeBlock, TimeBlockDraft,
    TimeBlockValidationError,
};
use uuid::Uuid;

fn draft() -> TimeBlockDraft {
    TimeBlockDraft {
        title: "  Save 10% of income  ".to_string(),
        domain: "financial".to_string(),
        kind: "habit".to_string(),
        priority: "high".to_string(),
        start_ms: 1_704_067_200_000,
        end_ms: 1_735_689_599_999,
        progress: 25,
        description: Some("   ".to_string()),
        estimated_hours: Some("40".to_string()),
    }
}

#[test]
fn time_block_new_sets_defaults() {
    let block = TimeBlock::new("Learn Rust", Domain::Brain, BlockType::Goal, 10, 20);

    assert!(!block.id.is_nil());
    assert_eq!(block.progress, 0);
    assert_eq!(block.priority, Priority::Medium);
    assert_eq!(block.description, None);
    assert_eq!(block.estimated_hours, None);
    assert!(!block.is_complete());
    block.validate().expect("fresh block is valid");
}

#[test]
fn validate_tolerates_reversed_range() {
    let block = TimeBlock::new("Odd range", Domain::Mind, BlockType::Event, 200, 100);
    block.validate().expect("start after end is tolerated");
}

#[test]
fn validate_rejects_broken_invariants() {
    let mut block = TimeBlock::new("Race", Domain::Physique, BlockType::Event, 0, 1);
    block.progress = 101;
    assert_eq!(
        block.validate().unwrap_err(),
        TimeBlockValidationError::ProgressOutOfRange(101)
    );

    block.progress = 0;
    block.estimated_hours = Some(-1.0);
    assert!(matches!(
        block.validate().unwrap_err(),
        TimeBlockValidationError::InvalidEstimatedHours(_)
    ));

    block.estimated_hours = None;
    block.title = "   ".to_string();
    assert_eq!(
        block.validate().unwrap_err(),
        TimeBlockValidationError::BlankTitle
    );
}

#[test]
fn set_progress_rejects_values_above_hundred() {
    let mut block = TimeBlock::new("Portfolio", Domain::Work, BlockType::Project, 0, 1);
    block.set_progress(100).expect("100 is allowed");
    assert!(block.is_complete());

    let err = block.set_progress(150).unwrap_err();
    assert_eq!(err, TimeBlockValidationError::ProgressOutOfRange(150));
    assert_eq!(block.progress, 100);
}

#[test]
fn range_helpers_are_inclusive() {
    let block = TimeBlock::new("Trip", Domain::Soul, BlockType::Event, 100, 200);
    assert!(block.contains_instant(100));
    assert!(block.contains_instant(200));
    assert!(!block.contains_instant(201));
    assert!(block.overlaps(200, 300));
    assert!(block.overlaps(0, 100));
    assert!(!block.overlaps(201, 300));
}

#[test]
fn draft_parses_into_trimmed_block() {
    let block = draft().into_block().expect("draft is valid");

    assert_eq!(block.title, "Save 10% of income");
    assert_eq!(block.domain, Domain::Financial);
    assert_eq!(block.kind, BlockType::Habit);
    assert_eq!(block.priority, Priority::High);
    assert_eq!(block.progress, 25);
    assert_eq!(block.description, None);
    assert_eq!(block.estimated_hours, Some(40.0));
}

#[test]
fn draft_hours_keep_leading_whole_number() {
    let hours = |raw: &str| {
        let mut typed = draft();
        typed.estimated_hours = Some(raw.to_string());
        typed.into_block().map(|block| block.estimated_hours)
    };

    assert_eq!(hours("12abc"), Ok(Some(12.0)));
    assert_eq!(hours("1e3"), Ok(Some(1.0)));
    assert_eq!(hours("7.9"), Ok(Some(7.0)));
    assert_eq!(hours("   "), Ok(None));
    assert_eq!(
        hours("about 5"),
        Err(TimeBlockValidationError::UnparsableEstimatedHours(
            "about 5".to_string()
        ))
    );
    assert!(matches!(
        hours("-2"),
        Err(TimeBlockValidationError::InvalidEstimatedHours(_))
    ));
}

#[test]
fn draft_keeps_caller_id_for_edits() {
    let id = Uuid::new_v4();
    let block = draft().into_block_with_id(id).expect("draft is valid");
    assert_eq!(block.id, id);
}

#[test]
fn draft_rejects_unknown_enum_values() {
    let mut bad_domain = draft();
    bad_domain.domain = "career".to_string();
    assert_eq!(
        bad_domain.into_block().unwrap_err(),
        TimeBlockValidationError::Classification(ClassificationError::UnknownDomain(
            "career".to_string()
        ))
    );

    let mut bad_kind = draft();
    bad_kind.kind = "chore".to_string();
    assert!(matches!(
        bad_kind.into_block().unwrap_err(),
        TimeBlockValidationError::Classification(ClassificationError::UnknownBlockType(_))
    ));

    let mut blank_priority = draft();
    blank_priority.priority = String::new();
    assert_eq!(
        blank_priority.into_block().unwrap_err(),
        TimeBlockValidationError::Classification(ClassificationError::Empty("priority"))
    );
}

#[test]
fn draft_rejects_blank_title_and_negative_progress() {
    let mut blank = draft();
    blank.title = " ".to_string();
    assert_eq!(
        blank.into_block().unwrap_err(),
        TimeBlockValidationError::BlankTitle
    );

    let mut negative = draft();
    negative.progress = -5;
    assert_eq!(
        negative.into_block().unwrap_err(),
        TimeBlockValidationError::ProgressOutOfRange(-5)
    );
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut block = TimeBlock::new("Run 5k", Domain::Physique, BlockType::Goal, 1_000, 2_000);
    block.id = id;
    block.progress = 60;
    block.priority = Priority::Low;
    block.estimated_hours = Some(6.0);

    let json = serde_json::to_value(&block).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["domain"], "physique");
    assert_eq!(json["type"], "goal");
    assert_eq!(json["priority"], "low");
    assert_eq!(json["progress"], 60);
    assert_eq!(json["start_ms"], 1_000);
    assert_eq!(json["estimated_hours"], 6.0);

    let decoded: TimeBlock = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, block);
}

#[test]
fn deserialize_rejects_out_of_range_progress() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "Overachiever",
        "domain": "work",
        "start_ms": 0,
        "end_ms": 10,
        "type": "project",
        "progress": 140,
        "priority": "medium"
    });

    let err = serde_json::from_value::<TimeBlock>(value).unwrap_err();
    assert!(
        err.to_string().contains("progress (140) must be within 0..=100"),
        "unexpected error: {err}"
    );
}

#[test]
fn deserialize_rejects_unknown_domain() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "Mystery",
        "domain": "career",
        "start_ms": 0,
        "end_ms": 10,
        "type": "goal",
        "progress": 0,
        "priority": "low"
    });

    assert!(serde_json::from_value::<TimeBlock>(value).is_err());
}
