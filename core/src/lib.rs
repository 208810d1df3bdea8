//! Engine for the framework showcase site.
//!
//! # Overview
//! Two cooperating components behind one owned [`Session`]:
//! - [`MockApiService`]: an in-memory simulated backend. Requests are plain
//!   `(method, path, body)` triples dispatched through an ordered rule table
//!   over a user store and a static fixture table.
//! - [`ViewRouter`]: the single source of truth for the visible section and
//!   demo tab, with per-section initializers, a location fragment and
//!   back/forward history.
//!
//! # Design
//! - Nothing here does real I/O. The presentation layer implements
//!   [`ViewSurface`]; [`CommandQueue`] records view changes as data.
//! - Simulated latency and wall-clock time are injected ([`Latency`],
//!   [`Clock`]) so tests run synchronously.
//! - Bad input never panics: request errors become error payloads and
//!   navigation errors become notices.

pub mod clock;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod http;
pub mod latency;
pub mod logging;
pub mod router;
pub mod rules;
pub mod service;
pub mod session;
pub mod store;
pub mod types;
pub mod validation;
pub mod view;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{LatencyConfig, ShowcaseConfig};
pub use error::{
    ConfigError, Error, NavigationError, NotFoundError, ParseError, Result, UnknownMethod,
    ValidationError, ViewError,
};
pub use fixtures::{DocsCatalog, FixtureTable};
pub use http::{ApiRequest, ApiResponse, HttpMethod};
pub use latency::{Latency, NoLatency, RandomLatency};
pub use router::{History, InitContext, Section, Tab, ViewRouter, ViewState};
pub use service::{MockApiService, ServiceSettings};
pub use session::{Session, UiEvent};
pub use store::UserStore;
pub use types::{DocEntry, NewUser, RouteFixture, UserRecord};
pub use view::{CommandQueue, EndpointSummary, Notice, NoticeLevel, SectionView, ViewCommand, ViewSurface};
