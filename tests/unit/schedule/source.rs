use super::*;
use crate::foundation::core::Rgb8;

fn fixture() -> &'static str {
    include_str!("../../fixtures/week.md")
}

#[test]
fn parses_days_persons_and_entries_in_order() {
    let doc = SourceDocument::parse(fixture()).unwrap();

    let days: Vec<_> = doc.timetable.days().iter().map(|d| d.label()).collect();
    assert_eq!(days, ["Monday", "Tuesday"]);
    assert_eq!(doc.persons, ["Adam", "Eva", "Kuba"]);

    let monday = doc.timetable.day("Monday").unwrap();
    let lanes: Vec<_> = monday.persons().iter().map(|p| p.person.as_str()).collect();
    assert_eq!(lanes, ["Adam", "Eva"]);

    let tuesday = doc.timetable.day("Tuesday").unwrap();
    let lanes: Vec<_> = tuesday.persons().iter().map(|p| p.person.as_str()).collect();
    assert_eq!(lanes, ["Kuba", "Adam"]);
    assert_eq!(tuesday.entries_for("Adam").unwrap().len(), 0);
}

#[test]
fn parses_colors_and_notes() {
    let doc = SourceDocument::parse(fixture()).unwrap();
    assert_eq!(doc.palette.len(), 3);
    assert_eq!(doc.palette.lookup("adam").unwrap(), Rgb8::new(0x1f, 0x77, 0xb4));
    assert_eq!(
        doc.notes,
        ["/ = provisional", "/Pick-up from school at 12:00"]
    );
}

#[test]
fn entry_fields_follow_markers() {
    let doc = SourceDocument::parse(fixture()).unwrap();
    let monday = doc.timetable.day("Monday").unwrap();

    let piano = &monday.entries_for("Adam").unwrap()[1];
    assert_eq!(piano.kind(), ActivityKind::DiagonalHatched);
    assert_eq!(piano.name(), Some("Piano"));
    assert_eq!(piano.components(), ["Book".to_string(), "Metronome".to_string()]);
    assert_eq!((piano.from(), piano.to()), (960, 1050));

    let swim = &monday.entries_for("Eva").unwrap()[0];
    assert_eq!(swim.mode(), Some("?"));
    assert_eq!(swim.kind(), ActivityKind::Normal);

    let tuesday = doc.timetable.day("Tuesday").unwrap();
    let kuba = tuesday.entries_for("Kuba").unwrap();
    assert_eq!(kuba[0].kind(), ActivityKind::DoubleCorner);
    assert_eq!(kuba[1].kind(), ActivityKind::EmptyCorner);
    assert_eq!(kuba[1].name(), None);
    assert!(kuba[1].components().is_empty());
}

#[test]
fn parse_entry_handles_spacing_and_unknown_tags() {
    let e = parse_entry("  [x]  9:15 - 10:00   Art class  ").unwrap();
    assert_eq!(e.kind(), ActivityKind::Normal);
    assert_eq!((e.from(), e.to()), (555, 600));
    assert_eq!(e.name(), Some("Art class"));

    let e = parse_entry("10:00-11:00 | only component").unwrap();
    assert_eq!(e.name(), None);
    assert_eq!(e.components(), ["only component".to_string()]);
}

#[test]
fn parse_entry_errors_are_classified() {
    assert!(matches!(
        parse_entry("Soccer"),
        Err(TimetableError::Parse(_))
    ));
    assert!(matches!(
        parse_entry("[d 07:00-08:00"),
        Err(TimetableError::Parse(_))
    ));
    assert!(matches!(
        parse_entry("7am-8am Soccer"),
        Err(TimetableError::MalformedTime(_))
    ));
    assert!(matches!(
        parse_entry("08:00-07:00"),
        Err(TimetableError::Validation(_))
    ));
}

#[test]
fn entries_need_a_day_and_person() {
    let err = SourceDocument::parse("* 07:00-08:00 Soccer\n").unwrap_err();
    assert!(err.to_string().contains("line 1"));

    let err = SourceDocument::parse("## Adam\n").unwrap_err();
    assert!(matches!(err, TimetableError::Parse(_)));

    let err = SourceDocument::parse("# Mon\n---\n## Adam\n").unwrap_err();
    assert!(err.to_string().contains("line 3"));
}

#[test]
fn malformed_times_report_their_line() {
    let err = SourceDocument::parse("# Mon\n## Adam\n* 07:61-08:00 X\n").unwrap_err();
    assert!(matches!(&err, TimetableError::MalformedTime(m) if m.contains("line 3")));
}

#[test]
fn redeclared_day_starts_over_in_place() {
    let src = "# Mon\n## A\n* 07:00-08:00 X\n# Tue\n## A\n* 09:00-10:00 Y\n# Mon\n## B\n* 11:00-12:00 Z\n";
    let doc = SourceDocument::parse(src).unwrap();
    let days: Vec<_> = doc.timetable.days().iter().map(|d| d.label()).collect();
    assert_eq!(days, ["Mon", "Tue"]);
    let mon = doc.timetable.day("Mon").unwrap();
    assert_eq!(mon.entries_for("A"), None);
    assert_eq!(mon.entries_for("B").unwrap().len(), 1);
    assert_eq!(doc.persons, ["A", "B"]);
}
