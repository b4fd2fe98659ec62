use super::*;
use crate::schedule::model::ActivityEntry;

#[test]
fn to_minutes_parses_padded_and_unpadded() {
    assert_eq!(to_minutes("00:00").unwrap(), 0);
    assert_eq!(to_minutes("07:05").unwrap(), 425);
    assert_eq!(to_minutes("7:05").unwrap(), 425);
    assert_eq!(to_minutes(" 21 : 30 ").unwrap(), 1290);
    assert_eq!(to_minutes("24:00").unwrap(), END_OF_DAY);
}

#[test]
fn to_minutes_rejects_malformed_text() {
    for bad in ["", "7", "07:00:00", "ab:cd", "07:", ":30", "07:60", "24:01", "-1:00", "07.30"] {
        let err = to_minutes(bad).unwrap_err();
        assert!(
            matches!(err, TimetableError::MalformedTime(_)),
            "{bad:?} gave {err}"
        );
    }
}

#[test]
fn padded_times_round_trip() {
    for minutes in 0..=END_OF_DAY {
        let text = minutes_to_time(minutes);
        assert_eq!(text.len(), 5);
        assert_eq!(to_minutes(&text).unwrap(), minutes);
        assert_eq!(minutes_to_time(to_minutes(&text).unwrap()), text);
    }
}

#[test]
fn window_spans_earliest_start_to_latest_end() {
    let mut tt = Timetable::new();
    tt.push("Mon", "A", ActivityEntry::from_times("07:00", "09:00").unwrap());
    tt.push("Tue", "B", ActivityEntry::from_times("21:00", "22:30").unwrap());
    let window = compute_window(&tt);
    assert_eq!(window, TimeWindow { from: 420, to: 1350 });
    assert_eq!(window.span().unwrap(), 930);
}

#[test]
fn empty_timetable_window_is_inverted() {
    let mut tt = Timetable::new();
    tt.day_mut("Mon").person_mut("A");
    let window = compute_window(&tt);
    assert_eq!(window, TimeWindow { from: END_OF_DAY, to: 0 });
    assert!(matches!(
        window.span(),
        Err(TimetableError::InvalidLayout(_))
    ));
}
