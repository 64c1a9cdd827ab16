//! Memora Core Library
//!
//! This crate provides the core functionality for Memora, a smart paper
//! reader that adapts how a document is presented to the reader's chosen
//! reading mode.
//!
//! # Architecture
//!
//! - **Selector**: maps a reading mode and a document to a render payload
//!   plus an ordered set of annotation overlays
//! - **Session**: explicit per-user context holding mode, document,
//!   presentation and chat history
//! - **Surface**: renders presentations and reports clicks as typed events
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let selector = PresentationSelector::new(
//!     config.mode_profiles()?,
//!     JsonAnnotationStore::new(config.annotations_path()),
//!     FsAssetCatalog::new(config.assets_path()),
//! );
//!
//! let mut session = ViewingSession::new(config.default_mode);
//! session.supply_document(FsDocumentStore::new().upload(path)?);
//! session.select_mode(ReadingMode::Exploratory);
//! let presentation = session.render(&selector)?;
//! ```
//!
//! # Sample data
//!
//! The repository's `data/annotations/anno1..3.json` are sample annotation
//! sources for the three modes. Point the data directory at them to try the
//! CLI without setting anything up:
//!
//! ```text
//! MEMORA_DATA_DIR=./data memora read paper.pdf --mode understanding --activate 0
//! ```
//!
//! # Modules
//!
//! - `models`: Reading modes, annotations and document assets
//! - `profile`: Static per-mode presentation settings
//! - `storage`: Document, annotation and reference asset stores
//! - `selector`: Presentation resolution and activation hook
//! - `surface`: Render requests and the presentation event channel
//! - `session`: Viewing session state machine
//! - `chat`: Canned reading-assistant replies streamed token by token
//! - `config`: Application configuration

pub mod chat;
pub mod config;
pub mod error;
pub mod models;
pub mod profile;
pub mod selector;
pub mod session;
pub mod storage;
pub mod surface;

pub use chat::{CannedResponder, ChatHistory, ChatMessage, Responder, Role, TokenStream};
pub use config::Config;
pub use error::{AnnotationLoadError, AssetLoadError, InvalidModeSelection};
pub use models::{Annotation, AnnotationColor, BorderStyle, DocumentAsset, ReadingMode};
pub use profile::{ModeProfile, ModeProfiles};
pub use selector::{Notification, Presentation, PresentationSelector};
pub use session::{SessionState, ViewingSession};
pub use storage::{
    AnnotationStore, AssetCatalog, DocumentStore, FsAssetCatalog, FsDocumentStore,
    JsonAnnotationStore,
};
pub use surface::{
    event_channel, EventDispatcher, EventSender, Notifier, PresentationEvent,
    PresentationSurface, RenderRequest, ViewerSettings,
};
