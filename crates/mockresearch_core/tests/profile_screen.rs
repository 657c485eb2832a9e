use chrono::NaiveDate;
use mockresearch_core::screen::profile_screen::{
    MISSING_DATA_ALERT_MESSAGE, MISSING_DATA_ALERT_TITLE, REQUIRED_PLACEHOLDER,
};
use mockresearch_core::{
    Alert, CommitOutcome, EditError, EditMode, FieldValue, PresentationHost, ProfileField,
    ProfileFrame, ProfileRecord, ProfileScreen, ProfileSection, RegionCode, ScreenEvent,
    ToolbarAction,
};

#[derive(Default)]
struct RecordingHost {
    frames: Vec<ProfileFrame>,
    alerts: Vec<Alert>,
}

impl PresentationHost for RecordingHost {
    fn render(&mut self, frame: &ProfileFrame) {
        self.frames.push(frame.clone());
    }

    fn present_alert(&mut self, alert: &Alert) {
        self.alerts.push(alert.clone());
    }
}

fn complete_profile() -> ProfileRecord {
    ProfileRecord {
        first_name: "Rod".to_string(),
        last_name: "Tavangar".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1990, 1, 1),
        email: "r@x.com".to_string(),
        phone_number: "1".to_string(),
        current_region: Some(RegionCode::parse("US").unwrap()),
    }
}

#[test]
fn viewing_frame_formats_values_and_lists_sections() {
    let frame = ProfileScreen::new(complete_profile()).frame();

    assert_eq!(frame.mode, EditMode::Viewing);
    let displays = frame
        .rows
        .iter()
        .map(|row| (row.title, row.display.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(
        displays,
        vec![
            ("First Name", "Rod"),
            ("Last Name", "Tavangar"),
            ("Date of Birth", "Jan 1, 1990"),
            ("Email", "r@x.com"),
            ("Phone Number", "1"),
            ("Current Region", "United States"),
        ]
    );
    assert!(frame.rows.iter().all(|row| !row.editable && !row.is_placeholder));
    assert_eq!(frame.sections, ProfileSection::ALL.to_vec());
    assert_eq!(
        frame
            .sections
            .iter()
            .map(|section| section.title())
            .collect::<Vec<_>>(),
        vec![
            "About Research & Privacy",
            "Notifications & Invitations",
            "Enroll in other studies",
            "Get Help",
            "Reset Study Participation",
        ]
    );
    assert!(ProfileSection::ResetStudyParticipation.is_destructive());
}

#[test]
fn region_row_shows_full_region_name() {
    let mut screen = ProfileScreen::new(complete_profile());
    screen.press_trailing().unwrap();
    screen
        .set_field(
            ProfileField::CurrentRegion,
            FieldValue::Region(Some(RegionCode::parse("fi").unwrap())),
        )
        .unwrap();
    assert_eq!(screen.press_trailing(), Ok(ScreenEvent::Saved(CommitOutcome::Saved)));

    let frame = screen.frame();
    let region_row = frame
        .rows
        .iter()
        .find(|row| row.field == ProfileField::CurrentRegion)
        .unwrap();
    assert_eq!(region_row.display, "Finland");
    assert!(!region_row.is_placeholder);
}

#[test]
fn editing_frame_hides_sections_and_marks_rows_editable() {
    let mut screen = ProfileScreen::new(complete_profile());
    assert_eq!(screen.press_trailing(), Ok(ScreenEvent::EditingStarted));

    let frame = screen.frame();
    assert_eq!(frame.mode, EditMode::Editing);
    assert!(frame.sections.is_empty());
    assert!(frame.rows.iter().all(|row| row.editable));
}

#[test]
fn cleared_field_shows_placeholder_while_editing() {
    let mut screen = ProfileScreen::new(complete_profile());
    screen.press_trailing().unwrap();
    screen
        .set_field(ProfileField::PhoneNumber, FieldValue::text(""))
        .unwrap();

    let row = screen
        .frame()
        .rows
        .into_iter()
        .find(|row| row.field == ProfileField::PhoneNumber)
        .unwrap();
    assert!(row.is_placeholder);
    assert_eq!(row.display, REQUIRED_PLACEHOLDER);
}

#[test]
fn rejected_save_raises_alert_and_keeps_edits() {
    let mut screen = ProfileScreen::new(complete_profile());
    screen.press_trailing().unwrap();
    screen
        .set_field(ProfileField::Email, FieldValue::text(""))
        .unwrap();

    assert_eq!(screen.press_trailing(), Ok(ScreenEvent::SaveRejected));
    assert_eq!(screen.mode(), EditMode::Editing);
    assert_eq!(screen.record().email, "");

    let mut host = RecordingHost::default();
    screen.render(&mut host);
    assert_eq!(host.frames.len(), 1);
    assert_eq!(host.alerts.len(), 1);
    assert_eq!(host.alerts[0].title, MISSING_DATA_ALERT_TITLE);
    assert_eq!(host.alerts[0].message, MISSING_DATA_ALERT_MESSAGE);
    assert_eq!(host.alerts[0].missing, vec![ProfileField::Email]);

    screen.dismiss_alert();
    assert!(screen.alert().is_none());
    assert_eq!(screen.record().email, "");
}

#[test]
fn leading_button_cancels_then_dismisses() {
    let mut screen = ProfileScreen::new(complete_profile());
    screen.press_trailing().unwrap();
    screen
        .set_field(ProfileField::LastName, FieldValue::text("Smith"))
        .unwrap();

    assert_eq!(screen.press_leading(), Ok(ScreenEvent::EditsDiscarded));
    assert_eq!(screen.record().last_name, "Tavangar");
    assert_eq!(screen.press_leading(), Ok(ScreenEvent::Dismissed));
}

#[test]
fn successful_save_reports_change() {
    let mut screen = ProfileScreen::new(ProfileRecord::default());
    screen.press_trailing().unwrap();
    screen
        .set_field(ProfileField::FirstName, FieldValue::text("A"))
        .unwrap();

    assert_eq!(
        screen.press_trailing(),
        Ok(ScreenEvent::Saved(CommitOutcome::Saved))
    );
    assert_eq!(screen.saved().first_name, "A");
    assert!(screen.alert().is_none());
}

#[test]
fn commit_action_while_viewing_is_an_error() {
    let mut screen = ProfileScreen::new(ProfileRecord::default());
    let err = screen
        .perform(ToolbarAction::Commit)
        .expect_err("commit requires editing");
    assert!(matches!(err, EditError::InvalidState { .. }));
    assert!(screen.alert().is_none());
}

#[test]
fn next_toolbar_action_clears_pending_alert() {
    let mut screen = ProfileScreen::new(complete_profile());
    screen.press_trailing().unwrap();
    screen
        .set_field(ProfileField::FirstName, FieldValue::text(""))
        .unwrap();
    screen.press_trailing().unwrap();
    assert!(screen.alert().is_some());

    assert_eq!(screen.press_leading(), Ok(ScreenEvent::EditsDiscarded));
    assert!(screen.alert().is_none());
    assert_eq!(screen.record(), &complete_profile());
}
