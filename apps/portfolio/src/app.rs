//! Page composition for the portfolio.
//!
//! The chrome (header, hero, footer) composes eagerly; the four content
//! sections mount through `Deferred`, so first composition only pays for
//! what is near the viewport. Section content mirrors the records in
//! [`crate::data`].

use crate::data::{Project, ABOUT_PARAGRAPHS, PROJECTS, SKILL_GROUPS};
use crate::theme::ThemePreference;
use folio_core::{with_key, MutableState};
use folio_ui::{
    Button, Column, ColumnSpec, Deferred, DeferredSpec, Modifier, Row, RowSpec, Text, TextSpec,
    Theme,
};

pub const BRAND: &str = "Alex Doyle";
pub const NAV_SECTIONS: &[&str] = &["Home", "Projects", "About", "Skills", "Contact"];

/// Contact form fields plus the transient submission flag.
///
/// The submit handler only logs the payload; nothing ever leaves the
/// process. Edits clear the flag again so the queued note is transient.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    pub sent: bool,
}

impl ContactForm {
    pub fn edit(form: &MutableState<ContactForm>, f: impl FnOnce(&mut ContactForm)) {
        form.update(|form| {
            f(form);
            form.sent = false;
        });
    }
}

/// Logs the submission and resets the fields.
pub fn submit_contact(form: &MutableState<ContactForm>) {
    let snapshot = form.get();
    // Placeholder: replace with a real backend / email service.
    log::info!(
        "contact form submission: name={:?} email={:?} message={:?}",
        snapshot.name,
        snapshot.email,
        snapshot.message
    );
    form.update(|form| {
        form.sent = true;
        form.name.clear();
        form.email.clear();
        form.message.clear();
    });
}

fn heading(palette: &Theme) -> TextSpec {
    TextSpec::new().font_size(40.0).color(palette.text_primary)
}

fn title(palette: &Theme) -> TextSpec {
    TextSpec::new().font_size(24.0).color(palette.text_primary)
}

fn body(palette: &Theme) -> TextSpec {
    TextSpec::new().color(palette.text_primary)
}

fn muted(palette: &Theme) -> TextSpec {
    TextSpec::new().font_size(14.0).color(palette.text_muted)
}

fn section_modifier() -> Modifier {
    Modifier::empty().padding(24.0)
}

pub fn portfolio_page(theme: MutableState<ThemePreference>, contact: MutableState<ContactForm>) {
    let palette = match theme.get() {
        ThemePreference::Light => Theme::light(),
        ThemePreference::Dark => Theme::dark(),
    };
    Column(
        Modifier::empty().background(palette.background),
        ColumnSpec::default(),
        || {
            header(&palette, &theme);
            hero(&palette);
            let section = DeferredSpec::default();
            Deferred(section_modifier(), section, || projects_section(&palette));
            Deferred(section_modifier(), section, || about_section(&palette));
            Deferred(section_modifier(), section, || skills_section(&palette));
            Deferred(section_modifier(), section, || {
                contact_section(&palette, &contact)
            });
            footer(&palette);
        },
    );
}

fn header(palette: &Theme, theme: &MutableState<ThemePreference>) {
    Row(
        Modifier::empty()
            .fill_max_width()
            .padding(16.0)
            .background(palette.surface),
        RowSpec::new().spacing(24.0),
        || {
            Text(
                BRAND,
                TextSpec::new().font_size(20.0).color(palette.accent),
                Modifier::empty(),
            );
            for label in NAV_SECTIONS {
                Text(*label, muted(palette), Modifier::empty());
            }
            let toggle_label = match theme.get() {
                ThemePreference::Light => "Switch to dark",
                ThemePreference::Dark => "Switch to light",
            };
            let theme = theme.clone();
            Button(
                Modifier::empty().padding(6.0),
                move || {
                    let next = theme.get().toggled();
                    log::info!("theme switched to {next:?}");
                    theme.set(next);
                },
                || Text(toggle_label, muted(palette), Modifier::empty()),
            );
        },
    );
}

fn hero(palette: &Theme) {
    Column(
        Modifier::empty().padding(32.0).min_height(420.0),
        ColumnSpec::new().spacing(16.0),
        || {
            Text("Portfolio intro", muted(palette), Modifier::empty());
            Text(format!("Hi, I'm {BRAND}"), heading(palette), Modifier::empty());
            Text(
                "I build small, fast tools and the declarative plumbing underneath \
                 them. Clean, quick, and deliberately boring to operate.",
                body(palette),
                Modifier::empty(),
            );
            Row(Modifier::empty(), RowSpec::new().spacing(12.0), || {
                Button(
                    Modifier::empty().padding(10.0).background(palette.accent),
                    || log::info!("hero action: view work"),
                    || Text("View My Work", body(palette), Modifier::empty()),
                );
                Button(
                    Modifier::empty().padding(10.0),
                    || log::info!("hero action: get in touch"),
                    || Text("Get In Touch", body(palette), Modifier::empty()),
                );
            });
            Row(Modifier::empty(), RowSpec::new().spacing(16.0), || {
                for channel in ["GitHub", "RSS", "Email"] {
                    Text(channel, muted(palette), Modifier::empty());
                }
            });
        },
    );
}

fn projects_section(palette: &Theme) {
    Column(Modifier::empty(), ColumnSpec::new().spacing(16.0), || {
        Text("Projects", title(palette), Modifier::empty());
        for project in PROJECTS {
            with_key(&project.id, || project_card(palette, project));
        }
    });
}

fn project_card(palette: &Theme, project: &Project) {
    Column(
        Modifier::empty().padding(16.0).background(palette.surface),
        ColumnSpec::new().spacing(8.0),
        || {
            Text(
                project.name,
                TextSpec::new().font_size(20.0).color(palette.text_primary),
                Modifier::empty(),
            );
            Text(project.description, body(palette), Modifier::empty());
            for (label, detail) in [
                ("Problem", project.problem),
                ("Solution", project.solution),
                ("Role", project.role),
                ("Outcome", project.outcome),
            ] {
                if let Some(detail) = detail {
                    Text(format!("{label}: {detail}"), muted(palette), Modifier::empty());
                }
            }
            Row(Modifier::empty(), RowSpec::new().spacing(8.0), || {
                for tech in project.tech {
                    Text(*tech, muted(palette), Modifier::empty());
                }
            });
            for highlight in project.highlights {
                Text(format!("• {highlight}"), body(palette), Modifier::empty());
            }
            Row(Modifier::empty(), RowSpec::new().spacing(16.0), || {
                if project.repo.is_some() {
                    Text(
                        "Code ↗",
                        TextSpec::new().color(palette.accent),
                        Modifier::empty(),
                    );
                }
                if project.demo.is_some() {
                    Text(
                        "Demo ↗",
                        TextSpec::new().color(palette.accent),
                        Modifier::empty(),
                    );
                }
            });
        },
    );
}

fn about_section(palette: &Theme) {
    Column(Modifier::empty(), ColumnSpec::new().spacing(12.0), || {
        Text("About", title(palette), Modifier::empty());
        for paragraph in ABOUT_PARAGRAPHS {
            Text(*paragraph, body(palette), Modifier::empty());
        }
    });
}

fn skills_section(palette: &Theme) {
    Column(Modifier::empty(), ColumnSpec::new().spacing(12.0), || {
        Text("Skills", title(palette), Modifier::empty());
        for group in SKILL_GROUPS {
            with_key(&group.title, || {
                Column(Modifier::empty(), ColumnSpec::new().spacing(4.0), || {
                    Text(
                        group.title,
                        TextSpec::new().font_size(18.0).color(palette.text_primary),
                        Modifier::empty(),
                    );
                    for item in group.items {
                        Text(format!("– {item}"), muted(palette), Modifier::empty());
                    }
                });
            });
        }
    });
}

fn contact_section(palette: &Theme, contact: &MutableState<ContactForm>) {
    Column(Modifier::empty(), ColumnSpec::new().spacing(12.0), || {
        Text("Contact", title(palette), Modifier::empty());
        let form = contact.get();
        Text(format!("Name: {}", form.name), body(palette), Modifier::empty());
        Text(format!("Email: {}", form.email), body(palette), Modifier::empty());
        Text(
            format!("Message: {}", form.message),
            body(palette),
            Modifier::empty(),
        );
        let submit_target = contact.clone();
        Button(
            Modifier::empty().padding(10.0).background(palette.accent),
            move || submit_contact(&submit_target),
            || Text("Send", body(palette), Modifier::empty()),
        );
        if form.sent {
            Text(
                "Message queued ✔",
                TextSpec::new().color(palette.accent),
                Modifier::empty(),
            );
        }
        Row(Modifier::empty(), RowSpec::new().spacing(16.0), || {
            Text("hello@alexdoyle.dev", muted(palette), Modifier::empty());
            Text("GitHub ↗", muted(palette), Modifier::empty());
        });
    });
}

fn footer(palette: &Theme) {
    Column(Modifier::empty().padding(24.0), ColumnSpec::default(), || {
        Text(
            "© 2026 Alex Doyle. Composed with Folio.",
            muted(palette),
            Modifier::empty(),
        );
    });
}
