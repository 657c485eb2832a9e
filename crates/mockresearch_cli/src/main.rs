//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `mockresearch_core` linkage.
//! - Walk the profile edit rules through a scripted session with
//!   deterministic output.

use chrono::NaiveDate;
use mockresearch_core::{
    FieldValue, ProfileField, ProfileRecord, ProfileScreen, RegionCode, ScreenEvent, ToolbarAction,
};

fn main() {
    println!("mockresearch_core ping={}", mockresearch_core::ping());
    println!("mockresearch_core version={}", mockresearch_core::core_version());

    let complete = ProfileRecord {
        first_name: "Rod".to_string(),
        last_name: "Tavangar".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1990, 1, 1),
        email: "r@x.com".to_string(),
        phone_number: "1".to_string(),
        current_region: RegionCode::parse("US").ok(),
    };

    let mut screen = ProfileScreen::new(complete.clone());
    run_step(
        &mut screen,
        "clear email then save",
        |screen| screen.set_field(ProfileField::Email, FieldValue::text("")),
        ToolbarAction::Commit,
    );

    let mut screen = ProfileScreen::new(complete);
    run_step(
        &mut screen,
        "rename then cancel",
        |screen| screen.set_field(ProfileField::LastName, FieldValue::text("Smith")),
        ToolbarAction::Cancel,
    );

    let mut screen = ProfileScreen::new(ProfileRecord::default());
    run_step(
        &mut screen,
        "partial save of empty profile",
        |screen| screen.set_field(ProfileField::FirstName, FieldValue::text("A")),
        ToolbarAction::Commit,
    );
}

fn run_step<E: std::fmt::Display>(
    screen: &mut ProfileScreen,
    label: &str,
    edit: impl FnOnce(&mut ProfileScreen) -> Result<(), E>,
    finish: ToolbarAction,
) {
    println!("scenario={label}");
    if let Err(err) = screen.press_trailing() {
        println!("  begin_edit error={err}");
        return;
    }
    if let Err(err) = edit(screen) {
        println!("  set_field error={err}");
        return;
    }

    match screen.perform(finish) {
        Ok(ScreenEvent::SaveRejected) => {
            let missing = screen
                .alert()
                .map(|alert| alert.missing.len())
                .unwrap_or_default();
            println!("  result=rejected missing_fields={missing}");
        }
        Ok(event) => println!("  result={event:?}"),
        Err(err) => println!("  result=error {err}"),
    }

    println!("  mode={}", screen.mode().as_str());
    for row in screen.frame().rows {
        println!("  {}: {}", row.title, row.display);
    }
}
