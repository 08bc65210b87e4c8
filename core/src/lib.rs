//! Helpers for building home-screen widgets on top of a host app.
//!
//! # Overview
//! - [`ApiClient`]: a base for small JSON API clients (URL building, query
//!   parameters, verb-based body handling).
//! - [`Table`]: a text grid rendered into a widget's stack tree.
//! - [`Translator`]: key lookup in the device language with key fallback.
//! - [`ScriptLoader`]: downloads a script once and loads the stored copy
//!   from then on.
//!
//! # Design
//! - Every host capability is a trait passed in by the caller: [`Transport`]
//!   for HTTP, [`Storage`] for files, [`WidgetStack`] for the view tree,
//!   [`Localization`] for the device language. Nothing reaches for globals.
//! - Requests and widget trees are plain data (`HttpRequest`, `Stack`), so
//!   the core stays deterministic and test doubles are trivial.
//! - Everything is synchronous; a call blocks until its one transport or
//!   storage operation returns.

pub mod client;
pub mod error;
pub mod http;
pub mod loader;
pub mod query;
pub mod table;
pub mod translate;
#[cfg(feature = "ureq")]
pub mod ureq_transport;
pub mod widget;

pub use client::ApiClient;
pub use error::{ApiError, LoadError, TransportError};
pub use crate::http::{is_mutating_verb, Headers, HttpMethod, HttpRequest, HttpResponse, Transport};
pub use loader::{select_storage, FsStorage, Script, ScriptLoader, Storage};
pub use query::add_query_param;
pub use table::Table;
pub use translate::{EnvLocale, FixedLanguage, Localization, Translations, Translator};
#[cfg(feature = "ureq")]
pub use ureq_transport::UreqTransport;
pub use widget::{Color, Element, Font, Layout, Stack, Text, WidgetStack, WidgetText};
