use crate::app::{portfolio_page, ContactForm};
use crate::theme::ThemePreference;
use folio_core::MutableState;
use folio_testing::RobotPageRule;


/// Launches the portfolio page with externally held theme/contact state,
/// bound to the page's runtime so writes recompose.
fn launch(width: u32, height: u32) -> (RobotPageRule, MutableState<ThemePreference>, MutableState<ContactForm>) {
    let theme = MutableState::new(ThemePreference::Light);
    let contact = MutableState::new(ContactForm::default());
    let page_theme = theme.clone();
    let page_contact = contact.clone();
    let mut robot = RobotPageRule::new(width, height, move || {
        portfolio_page(page_theme.clone(), page_contact.clone())
    });
    theme.bind_runtime(robot.runtime_handle());
    contact.bind_runtime(robot.runtime_handle());
    robot.wait_for_idle();
    (robot, theme, contact)
}

/// Scrolls in viewport-sized steps until every deferred section mounted.
fn scroll_until_fully_mounted(robot: &mut RobotPageRule) {
    let mut offset = 0.0;
    while robot.placeholder_count() > 0 && offset < robot.content_height() {
        offset += 600.0;
        robot.scroll_to(offset);
    }
}
