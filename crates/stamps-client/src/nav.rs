//! Navigation shell and the static pages.

use stamps_identity::{IdentityError, IdentityProvider, LoginPrompt};

use crate::session::Session;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Page {
    Home,
    Create,
    MyTimestamps,
    Favourites,
    Settings,
    About,
}

impl Page {
    pub const fn title(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Create => "Create",
            Page::MyTimestamps => "My Timestamps",
            Page::Favourites => "Favourites",
            Page::Settings => "Settings",
            Page::About => "About",
        }
    }

    pub const fn path(&self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Create => "/upload",
            Page::MyTimestamps => "/timelist",
            Page::Favourites => "/favourites",
            Page::Settings => "/settings",
            Page::About => "/about",
        }
    }

    pub fn from_path(path: &str) -> Option<Page> {
        ALL_PAGES.iter().copied().find(|p| p.path() == path)
    }
}

const ALL_PAGES: [Page; 6] = [
    Page::Home,
    Page::Create,
    Page::MyTimestamps,
    Page::Favourites,
    Page::Settings,
    Page::About,
];

/// Links shown in the sidebar, in order. About is reachable but not listed.
pub const SIDEBAR_LINKS: [Page; 5] = [
    Page::Home,
    Page::Create,
    Page::MyTimestamps,
    Page::Favourites,
    Page::Settings,
];

/// Page chrome. The only state is whether the collapsible panel is open.
#[derive(Debug, Default)]
pub struct NavShell {
    panel_open: bool,
}

impl NavShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn open_panel(&mut self) {
        self.panel_open = true;
    }

    pub fn close_panel(&mut self) {
        self.panel_open = false;
    }

    pub fn toggle_panel(&mut self) {
        self.panel_open = !self.panel_open;
    }

    /// Label of the account control for `session`
    pub fn account_label(session: &Session) -> &'static str {
        if session.is_authenticated() {
            "Sign out"
        } else {
            "Connect"
        }
    }

    /// Presses the account control: signs in when signed out, signs out otherwise. Returns
    /// whether the session is signed in afterwards.
    pub fn press_account_control(
        &self,
        session: &mut Session,
        provider: &mut dyn IdentityProvider,
        prompt: &mut dyn LoginPrompt,
    ) -> Result<bool, IdentityError> {
        if session.is_authenticated() {
            session.logout(provider)?;
            Ok(false)
        } else {
            session.login(provider, prompt)
        }
    }

    pub fn render(&self, session: &Session) -> String {
        let mut out = String::new();

        for page in SIDEBAR_LINKS {
            out.push_str(&format!("  {:<15} {}\n", page.title(), page.path()));
        }
        out.push('\n');

        if let Some(principal) = session.principal() {
            out.push_str(&format!("Connected {principal}\n"));
        }
        out.push_str(&format!("[{}]\n", Self::account_label(session)));

        out
    }
}

pub fn landing_page() -> String {
    [
        "btstamps                                         Bitcoin Timestamps",
        "",
        "Timestamp Legal Documents",
        "",
        "  [CREATE TIMESTAMP]    stamps stamp <FILE> --name <NAME>",
        "  [EDUCATE ME, PLEASE]  stamps about",
        "",
    ]
    .join("\n")
}

pub fn about_page() -> String {
    let features = [
        (
            "Security",
            "Our platform uses advanced cryptographic techniques to ensure that every timestamp \
             is immutable and secure.",
        ),
        (
            "Efficiency",
            "Timestamping is done quickly and easily, allowing you to focus on your work without \
             worrying about delays.",
        ),
        (
            "Transparency",
            "Our transparent process lets you track and verify timestamps anytime, ensuring \
             peace of mind.",
        ),
        ("API", "Integrate our SDK in your project"),
        ("Github", "Access our codebase on github"),
    ];

    let mut out = String::from("About Us\n\n");
    out.push_str(
        "Welcome to our platform! We specialize in providing innovative solutions for secure and \
         verifiable timestamps, enabling you to protect the integrity of your important \
         documents and assets.\n\n",
    );

    for (title, text) in features {
        out.push_str(&format!("{title}\n  {text}\n\n"));
    }

    out.push_str(
        "Join us today and start protecting your important files with our timestamping \
         solutions.\n",
    );
    out
}
