use super::*;

#[test]
fn entry_requires_start_before_end() {
    assert!(ActivityEntry::new(420, 480).is_ok());
    let err = ActivityEntry::new(480, 480).unwrap_err();
    assert!(matches!(err, TimetableError::Validation(_)));
    assert!(err.to_string().contains("08:00-08:00"));
    assert!(ActivityEntry::from_times("09:00", "08:00").is_err());
}

#[test]
fn entry_builders_fill_optional_fields() {
    let e = ActivityEntry::from_times("07:00", "08:30")
        .unwrap()
        .with_mode("?")
        .with_kind(ActivityKind::EmptyCorner)
        .with_name("Soccer")
        .with_components(["Ball", "Shoes"]);
    assert_eq!(e.from(), 420);
    assert_eq!(e.to(), 510);
    assert_eq!(e.mode(), Some("?"));
    assert_eq!(e.kind(), ActivityKind::EmptyCorner);
    assert_eq!(e.name(), Some("Soccer"));
    assert_eq!(e.components(), ["Ball".to_string(), "Shoes".to_string()]);
}

#[test]
fn kind_tags_map_both_ways() {
    for kind in [
        ActivityKind::Normal,
        ActivityKind::DiagonalHatched,
        ActivityKind::DoubleCorner,
        ActivityKind::EmptyCorner,
    ] {
        assert_eq!(ActivityKind::from_tag(kind.tag()), Some(kind));
    }
    assert_eq!(ActivityKind::from_tag(""), Some(ActivityKind::Normal));
    assert_eq!(ActivityKind::from_tag("x"), None);
}

#[test]
fn timetable_preserves_insertion_order() {
    let mut tt = Timetable::new();
    let e = || ActivityEntry::new(600, 660).unwrap();
    tt.push("Wed", "Zoe", e());
    tt.push("Mon", "Adam", e());
    tt.push("Wed", "Adam", e());
    tt.push("Mon", "Zoe", e());

    let labels: Vec<_> = tt.days().iter().map(|d| d.label()).collect();
    assert_eq!(labels, ["Wed", "Mon"]);

    let wed: Vec<_> = tt.days()[0].persons().iter().map(|p| p.person.as_str()).collect();
    assert_eq!(wed, ["Zoe", "Adam"]);
    assert_eq!(tt.persons(), ["Zoe".to_string(), "Adam".to_string()]);
    assert_eq!(tt.entries().count(), 4);
}

#[test]
fn person_lane_is_reserved_without_entries() {
    let mut day = DaySchedule::new("Mon");
    day.person_mut("Adam");
    assert_eq!(day.persons().len(), 1);
    assert_eq!(day.entries_for("Adam"), Some(&[][..]));
    assert_eq!(day.entries_for("Zoe"), None);
}

#[test]
fn palette_lookup_is_case_insensitive() {
    let mut palette = Palette::new();
    palette.insert_hex("Adam", "#102030").unwrap();
    assert_eq!(palette.lookup("adam").unwrap(), Rgb8::new(0x10, 0x20, 0x30));
    assert_eq!(palette.lookup("ADAM").unwrap(), Rgb8::new(0x10, 0x20, 0x30));
    assert!(matches!(
        palette.lookup("Zoe"),
        Err(TimetableError::PaletteLookup(p)) if p == "Zoe"
    ));
    assert!(palette.insert_hex("Zoe", "blue").is_err());
    assert_eq!(palette.len(), 1);
}
