//! Static content records for the portfolio page.

pub struct Project {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub problem: Option<&'static str>,
    pub solution: Option<&'static str>,
    pub role: Option<&'static str>,
    pub outcome: Option<&'static str>,
    pub tech: &'static [&'static str],
    pub repo: Option<&'static str>,
    pub demo: Option<&'static str>,
    pub highlights: &'static [&'static str],
}

pub const PROJECTS: &[Project] = &[
    Project {
        id: "folio",
        name: "Folio, a deferred-rendering page engine",
        description: "A headless declarative page engine that defers expensive \
                      sections until they approach the viewport, keeping first \
                      paint cheap without layout jank.",
        problem: Some(
            "Long content pages paid the full composition cost up front, even \
             for sections several screens below the fold.",
        ),
        solution: Some(
            "Built a one-shot visibility gate over a region tracker: sections \
             reserve layout space with a fixed-extent placeholder and mount \
             permanently once they near the viewport.",
        ),
        role: Some("Solo developer: runtime, layout and test harness."),
        outcome: Some(
            "Initial composition touches a fraction of the page; scrolling \
             mounts the rest with no reflow when content swaps in.",
        ),
        tech: &["Rust", "Declarative UI", "Lazy mounting", "Headless testing"],
        repo: Some("https://github.com/example/folio"),
        demo: None,
        highlights: &["One-shot mount gates", "Fail-open visibility fallback"],
    },
    Project {
        id: "ledgerline",
        name: "Ledgerline, a personal finance tracker",
        description: "A small double-entry ledger with CSV import and monthly \
                      rollups, built for speed on modest hardware.",
        problem: None,
        solution: None,
        role: Some("Design and implementation."),
        outcome: None,
        tech: &["Rust", "SQLite", "CSV"],
        repo: Some("https://github.com/example/ledgerline"),
        demo: Some("https://ledgerline.example.dev"),
        highlights: &[],
    },
];

pub struct SkillGroup {
    pub title: &'static str,
    pub items: &'static [&'static str],
}

pub const SKILL_GROUPS: &[SkillGroup] = &[
    SkillGroup {
        title: "Frontend",
        items: &["Declarative UI", "Layout systems", "Accessibility"],
    },
    SkillGroup {
        title: "Backend",
        items: &["Rust services", "SQLite", "Caching"],
    },
    SkillGroup {
        title: "DevOps",
        items: &["CI pipelines", "Containerized builds"],
    },
    SkillGroup {
        title: "Testing",
        items: &["Robot harnesses", "Property-style checks"],
    },
];

pub const ABOUT_PARAGRAPHS: &[&str] = &[
    "I build small, fast tools and the UI plumbing underneath them. Most of \
     my recent work has been on rendering pipelines that stay responsive by \
     doing strictly less: composing lazily, measuring once and never \
     re-observing what is already settled.",
    "Away from the keyboard I restore old film cameras, which turns out to \
     be the same discipline: find the one part that moves too much and pin \
     it down.",
];
