//! Per-visitor state and UI event handling.
//!
//! # Design
//! A `Session` owns one backend, one router and the static docs catalog, and
//! is passed by `&mut` into every event handler. Holding that borrow across
//! the simulated latency await means no other mutation from the same task
//! can slip in between a request and its answer.
//!
//! Every failure an event can cause is converted here into an `ApiResponse`
//! or a [`Notice`]; `handle` never returns an error.

use std::time::Duration;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::ShowcaseConfig;
use crate::error::{NavigationError, Result};
use crate::fixtures::DocsCatalog;
use crate::http::ApiResponse;
use crate::latency::{self, Latency, NoLatency};
use crate::router::{InitContext, Section, Tab, ViewRouter, ViewState};
use crate::service::MockApiService;
use crate::types::UserRecord;
use crate::view::{Notice, ViewSurface};

/// A discrete user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// First paint. `fragment` is the location fragment the page was opened
    /// with, possibly empty.
    Startup { fragment: String },
    NavigateSection(String),
    NavigateTab(String),
    HistoryBack,
    HistoryForward,
    /// Form submission from the API explorer.
    Request {
        method: String,
        path: String,
        body: Option<String>,
    },
    CreateUser { name: String, email: String },
    RenameUser { id: u64, name: String },
    DeleteUser { id: u64 },
}

pub struct Session {
    id: Uuid,
    api: MockApiService,
    router: ViewRouter,
    docs: DocsCatalog,
    latency: Box<dyn Latency>,
}

impl Session {
    /// Build a session from configuration: seed users, fixtures, docs and
    /// the configured latency.
    pub fn new(config: &ShowcaseConfig) -> Result<Self> {
        config.validate()?;
        let api = MockApiService::from_config(config)?;
        let docs = DocsCatalog::load(config.docs_path.as_deref())?;
        let router = ViewRouter::new(config.default_section);
        let session = Self::from_parts(api, router, docs)
            .with_boxed_latency(latency::from_config(&config.latency));
        info!(session = %session.id, "Session created");
        Ok(session)
    }

    /// Assemble a session from prebuilt parts, without latency.
    pub fn from_parts(api: MockApiService, router: ViewRouter, docs: DocsCatalog) -> Self {
        Self {
            id: Uuid::new_v4(),
            api,
            router,
            docs,
            latency: Box::new(NoLatency),
        }
    }

    pub fn with_latency(self, latency: impl Latency + 'static) -> Self {
        self.with_boxed_latency(Box::new(latency))
    }

    fn with_boxed_latency(mut self, latency: Box<dyn Latency>) -> Self {
        self.latency = latency;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn api(&self) -> &MockApiService {
        &self.api
    }

    pub fn api_mut(&mut self) -> &mut MockApiService {
        &mut self.api
    }

    pub fn router(&self) -> &ViewRouter {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut ViewRouter {
        &mut self.router
    }

    pub fn docs(&self) -> &DocsCatalog {
        &self.docs
    }

    pub fn state(&self) -> ViewState {
        self.router.state()
    }

    /// Draw the next simulated delay. Hosts that run their own timers use
    /// this instead of [`dispatch`](Self::dispatch).
    pub fn next_latency(&mut self) -> Duration {
        self.latency.next_delay()
    }

    /// Simulate a request: wait out the latency, then dispatch.
    pub async fn dispatch(&mut self, method: &str, path: &str, body: Option<&str>) -> ApiResponse {
        let delay = self.latency.next_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.api.dispatch(method, path, body)
    }

    pub fn start(&mut self, fragment: &str, surface: &mut dyn ViewSurface) -> Section {
        let ctx = InitContext {
            api: &self.api,
            docs: &self.docs,
        };
        match self.router.restore_from_location(fragment, &ctx, surface) {
            Some(section) => section,
            None => {
                self.router.show_current(&ctx, surface);
                self.router.active_section()
            }
        }
    }

    pub fn navigate_to_section(
        &mut self,
        name: &str,
        surface: &mut dyn ViewSurface,
    ) -> std::result::Result<Section, NavigationError> {
        let ctx = InitContext {
            api: &self.api,
            docs: &self.docs,
        };
        self.router.navigate_to_section(name, &ctx, surface)
    }

    pub fn navigate_to_tab(
        &mut self,
        name: &str,
        surface: &mut dyn ViewSurface,
    ) -> std::result::Result<Tab, NavigationError> {
        self.router.navigate_to_tab(name, surface)
    }

    pub fn back(&mut self, surface: &mut dyn ViewSurface) -> Option<Section> {
        let ctx = InitContext {
            api: &self.api,
            docs: &self.docs,
        };
        self.router.back(&ctx, surface)
    }

    pub fn forward(&mut self, surface: &mut dyn ViewSurface) -> Option<Section> {
        let ctx = InitContext {
            api: &self.api,
            docs: &self.docs,
        };
        self.router.forward(&ctx, surface)
    }

    pub fn restore_from_history(&mut self, section: Section, surface: &mut dyn ViewSurface) {
        let ctx = InitContext {
            api: &self.api,
            docs: &self.docs,
        };
        self.router.restore_from_history(section, &ctx, surface);
    }

    /// Handle one UI event. Failures come back as a notice (also shown on
    /// `surface`); `None` means the event completed without anything to say.
    #[instrument(skip_all, fields(session = %self.id))]
    pub async fn handle(&mut self, event: UiEvent, surface: &mut dyn ViewSurface) -> Option<Notice> {
        let notice = match event {
            UiEvent::Startup { fragment } => {
                self.start(&fragment, surface);
                None
            }
            UiEvent::NavigateSection(name) => self
                .navigate_to_section(&name, surface)
                .err()
                .map(|e| Notice::warning(e.to_string())),
            UiEvent::NavigateTab(name) => self
                .navigate_to_tab(&name, surface)
                .err()
                .map(|e| Notice::warning(e.to_string())),
            UiEvent::HistoryBack => self
                .back(surface)
                .is_none()
                .then(|| Notice::info("no earlier page")),
            UiEvent::HistoryForward => self
                .forward(surface)
                .is_none()
                .then(|| Notice::info("no later page")),
            UiEvent::Request { method, path, body } => {
                let response = self.dispatch(&method, &path, body.as_deref()).await;
                surface.show_response(&response);
                if response.status == crate::http::status::CREATED {
                    self.refresh_users(surface);
                }
                None
            }
            UiEvent::CreateUser { name, email } => match self.api.create_record(&name, &email) {
                Ok(record) => {
                    self.refresh_users(surface);
                    Some(Notice::info(format!("created {}", describe(&record))))
                }
                Err(e) => Some(Notice::warning(e.to_string())),
            },
            UiEvent::RenameUser { id, name } => match self.api.update_record_name(id, &name) {
                Ok(record) => {
                    self.refresh_users(surface);
                    Some(Notice::info(format!("renamed {}", describe(&record))))
                }
                Err(e) => Some(Notice::warning(e.to_string())),
            },
            UiEvent::DeleteUser { id } => {
                if self.api.delete_record(id) {
                    self.refresh_users(surface);
                    Some(Notice::info(format!("deleted user {id}")))
                } else {
                    Some(Notice::warning(format!("user {id} not found")))
                }
            }
        };
        if let Some(notice) = &notice {
            surface.notify(notice);
        }
        notice
    }

    /// Re-render the user list if the demo section is on screen.
    pub fn refresh_users(&self, surface: &mut dyn ViewSurface) {
        if self.router.active_section() != Section::Demo {
            return;
        }
        let ctx = InitContext {
            api: &self.api,
            docs: &self.docs,
        };
        self.router.refresh(&ctx, surface);
    }
}

fn describe(record: &UserRecord) -> String {
    format!("#{} {} <{}>", record.id, record.name, record.email)
}
