//! Boundary with the presentation layer.
//!
//! # Design
//! The core never draws anything. It describes what should change through
//! the [`ViewSurface`] trait: which containers are visible, what a section
//! shows, which location fragment to display. [`CommandQueue`] implements the
//! trait by recording plain-data [`ViewCommand`]s, which is how the C ABI and
//! the tests observe the view.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::ViewError;
use crate::http::{ApiResponse, HttpMethod};
use crate::router::{Section, Tab};
use crate::types::{DocEntry, UserRecord};

/// Content produced by a section initializer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SectionView {
    Dashboard {
        users: usize,
        endpoints: usize,
        annotations: usize,
    },
    Endpoints {
        endpoints: Vec<EndpointSummary>,
    },
    Users {
        users: Vec<UserRecord>,
    },
    Docs {
        entries: Vec<DocEntry>,
    },
    /// Placeholder for hosts that register their own initializers.
    Empty,
}

/// One row of the endpoint browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointSummary {
    pub method: HttpMethod,
    pub path: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// A short user-visible message, such as a validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

/// What the core needs from the presentation layer.
///
/// Visibility and render calls may fail with [`ViewError::MissingContainer`]
/// when the host has no element for a section or tab. Callers log and skip
/// such failures.
pub trait ViewSurface {
    fn set_section_visible(&mut self, section: Section, visible: bool) -> Result<(), ViewError>;

    fn set_tab_visible(&mut self, tab: Tab, visible: bool) -> Result<(), ViewError>;

    fn set_fragment(&mut self, fragment: &str);

    fn render(&mut self, section: Section, view: &SectionView) -> Result<(), ViewError>;

    fn show_response(&mut self, response: &ApiResponse);

    fn notify(&mut self, notice: &Notice);
}

/// A recorded view change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ViewCommand {
    SectionVisibility { section: Section, visible: bool },
    TabVisibility { tab: Tab, visible: bool },
    Fragment { fragment: String },
    Render { section: Section, view: SectionView },
    Response { response: ApiResponse },
    Notice { notice: Notice },
}

/// A [`ViewSurface`] that queues commands for a host to drain.
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    commands: Vec<ViewCommand>,
    missing: HashSet<String>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend the host has no container with this id.
    pub fn without_container(mut self, id: &str) -> Self {
        self.missing.insert(id.to_string());
        self
    }

    pub fn commands(&self) -> &[ViewCommand] {
        &self.commands
    }

    /// Take every queued command, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<ViewCommand> {
        std::mem::take(&mut self.commands)
    }

    /// The most recent fragment set, if any.
    pub fn last_fragment(&self) -> Option<&str> {
        self.commands.iter().rev().find_map(|c| match c {
            ViewCommand::Fragment { fragment } => Some(fragment.as_str()),
            _ => None,
        })
    }

    /// The most recent response shown, if any.
    pub fn last_response(&self) -> Option<&ApiResponse> {
        self.commands.iter().rev().find_map(|c| match c {
            ViewCommand::Response { response } => Some(response),
            _ => None,
        })
    }

    fn check(&self, id: &str) -> Result<(), ViewError> {
        if self.missing.contains(id) {
            return Err(ViewError::MissingContainer(id.to_string()));
        }
        Ok(())
    }
}

impl ViewSurface for CommandQueue {
    fn set_section_visible(&mut self, section: Section, visible: bool) -> Result<(), ViewError> {
        self.check(section.id())?;
        self.commands
            .push(ViewCommand::SectionVisibility { section, visible });
        Ok(())
    }

    fn set_tab_visible(&mut self, tab: Tab, visible: bool) -> Result<(), ViewError> {
        self.check(tab.id())?;
        self.commands.push(ViewCommand::TabVisibility { tab, visible });
        Ok(())
    }

    fn set_fragment(&mut self, fragment: &str) {
        self.commands.push(ViewCommand::Fragment {
            fragment: fragment.to_string(),
        });
    }

    fn render(&mut self, section: Section, view: &SectionView) -> Result<(), ViewError> {
        self.check(section.id())?;
        self.commands.push(ViewCommand::Render {
            section,
            view: view.clone(),
        });
        Ok(())
    }

    fn show_response(&mut self, response: &ApiResponse) {
        self.commands.push(ViewCommand::Response {
            response: response.clone(),
        });
    }

    fn notify(&mut self, notice: &Notice) {
        self.commands.push(ViewCommand::Notice {
            notice: notice.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_container_is_reported() {
        let mut queue = CommandQueue::new().without_container("docs");
        assert_eq!(
            queue.set_section_visible(Section::Docs, true),
            Err(ViewError::MissingContainer("docs".to_string()))
        );
        assert!(queue.set_section_visible(Section::Demo, true).is_ok());
        assert_eq!(queue.commands().len(), 1);
    }

    #[test]
    fn commands_serialize_with_type_tags() {
        let cmd = ViewCommand::SectionVisibility {
            section: Section::ApiExplorer,
            visible: true,
        };
        assert_eq!(
            serde_json::to_value(&cmd).unwrap(),
            json!({ "type": "section-visibility", "section": "api-explorer", "visible": true })
        );

        let render = ViewCommand::Render {
            section: Section::Dashboard,
            view: SectionView::Dashboard {
                users: 3,
                endpoints: 9,
                annotations: 7,
            },
        };
        let value = serde_json::to_value(&render).unwrap();
        assert_eq!(value["view"]["kind"], "dashboard");
        assert_eq!(value["view"]["users"], 3);
    }

    #[test]
    fn drain_empties_the_queue() {
        let mut queue = CommandQueue::new();
        queue.set_fragment("docs");
        queue.notify(&Notice::info("hi"));
        assert_eq!(queue.last_fragment(), Some("docs"));
        assert_eq!(queue.drain().len(), 2);
        assert!(queue.commands().is_empty());
    }
}
