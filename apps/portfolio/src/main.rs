use anyhow::{Context, Result};
use folio_app_shell::PageShell;
use folio_core::MutableState;
use portfolio_app::app::{portfolio_page, submit_contact, ContactForm};
use portfolio_app::theme::ThemeStore;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let store = ThemeStore::new(std::env::temp_dir().join("folio-portfolio/theme.json"));
    let theme = MutableState::new(store.get());
    let contact = MutableState::new(ContactForm::default());
    log::info!("restored theme preference: {:?}", theme.get());

    let page_theme = theme.clone();
    let page_contact = contact.clone();
    let mut shell = PageShell::new(move || {
        portfolio_page(page_theme.clone(), page_contact.clone())
    });
    theme.bind_runtime(shell.runtime_handle());
    contact.bind_runtime(shell.runtime_handle());

    shell.set_viewport(1280.0, 800.0);
    shell.run_until_idle();
    log::info!(
        "page composed at {:.0}px: {} deferred sections pending",
        shell.content_height(),
        shell.placeholder_count()
    );

    // Scroll through the page; sections mount as their regions near the
    // viewport and stay mounted afterwards.
    let mut offset = 0.0;
    while offset < shell.content_height() {
        offset += 600.0;
        shell.scroll_to(offset);
        shell.run_until_idle();
        log::info!(
            "scrolled to {:.0}: {} sections still deferred",
            shell.scroll_offset(),
            shell.placeholder_count()
        );
    }

    // Exercise the contact form: fill it, submit, watch it only log.
    ContactForm::edit(&contact, |form| {
        form.name = "Ada".into();
        form.email = "ada@example.dev".into();
        form.message = "Loved the deferred-mount writeup.".into();
    });
    shell.run_until_idle();
    submit_contact(&contact);
    shell.run_until_idle();

    // Flip the theme and persist it for the next run.
    theme.set(theme.get().toggled());
    shell.run_until_idle();
    store.set(theme.get()).context("persist theme preference")?;
    log::info!("saved theme preference: {:?}", theme.get());

    Ok(())
}
