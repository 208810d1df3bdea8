//! Plain-text rendering of view changes.

use std::fmt;
use std::io::Write;

use showcase_core::{
    ApiResponse, Notice, NoticeLevel, Section, SectionView, Tab, UserRecord, ViewError,
    ViewSurface,
};
use tracing::warn;

/// A [`ViewSurface`] that prints to a writer. Hidden sections and tabs are
/// not printed; only the one being shown is announced.
pub struct TerminalSurface<W: Write> {
    out: W,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn print_users(&mut self, users: &[UserRecord]) {
        if users.is_empty() {
            self.line(format_args!("  (no users)"));
        }
        for user in users {
            self.line(format_args!("  #{} {} <{}>", user.id, user.name, user.email));
        }
    }

    pub fn print(&mut self, text: &str) {
        self.line(format_args!("{text}"));
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{args}") {
            warn!("Failed to write to terminal: {e}");
        }
    }
}

impl<W: Write> ViewSurface for TerminalSurface<W> {
    fn set_section_visible(&mut self, section: Section, visible: bool) -> Result<(), ViewError> {
        if visible {
            self.line(format_args!("== {section} =="));
        }
        Ok(())
    }

    fn set_tab_visible(&mut self, tab: Tab, visible: bool) -> Result<(), ViewError> {
        if visible {
            self.line(format_args!("[tab: {tab}]"));
        }
        Ok(())
    }

    fn set_fragment(&mut self, fragment: &str) {
        self.line(format_args!("location: #{fragment}"));
    }

    fn render(&mut self, _section: Section, view: &SectionView) -> Result<(), ViewError> {
        match view {
            SectionView::Dashboard {
                users,
                endpoints,
                annotations,
            } => self.line(format_args!(
                "  users: {users}  endpoints: {endpoints}  annotations: {annotations}"
            )),
            SectionView::Endpoints { endpoints } => {
                for endpoint in endpoints {
                    self.line(format_args!(
                        "  {:<7}{:<24}{}",
                        endpoint.method.as_str(),
                        endpoint.path,
                        endpoint.description
                    ));
                }
            }
            SectionView::Users { users } => self.print_users(users),
            SectionView::Docs { entries } => {
                for entry in entries {
                    self.line(format_args!("  {:<12}{}", entry.name, entry.description));
                }
            }
            SectionView::Empty => {}
        }
        Ok(())
    }

    fn show_response(&mut self, response: &ApiResponse) {
        self.line(format_args!("HTTP {}", response.status));
        self.line(format_args!("{}", response.pretty_payload()));
    }

    fn notify(&mut self, notice: &Notice) {
        let level = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
        };
        self.line(format_args!("{level}: {}", notice.message));
    }
}
