//! Cre8tly Studio Core Library
//!
//! Platform-agnostic data structures and logic behind the Cre8tly Studio
//! editor: the landing-page canvas, community post schema, display widgets
//! and the small shared services (audio, theme, persistence, routing).

pub mod audio;
pub mod canvas;
pub mod color;
pub mod http;
pub mod richtext;
pub mod routing;
pub mod selection;
pub mod shapes;
pub mod storage;
pub mod theme;
pub mod time;
pub mod transform;
pub mod widgets;

pub use audio::{AudioHandle, AudioRegistry, PlaybackId};
pub use canvas::{Canvas, CanvasDocument, DUPLICATE_OFFSET};
pub use color::{ColorError, SerializableColor, TextTone, readable_text_color};
pub use http::{ClientError, Method, PreparedRequest, UploadClient, UploadClientConfig};
pub use richtext::{Element, Mark, Node, Post, SchemaError, SchemaKind, SchemaRegistry, SchemaSpec};
pub use routing::{
    EntryRouter, FixedRuntime, PendingNavigation, Route, RouteTargets, Runtime, RuntimeProbe,
};
pub use selection::{ClickModifiers, Selection};
pub use shapes::{MIN_SHAPE_SIZE, Shape, ShapeId, ShapeTrait};
pub use storage::{
    KeyValueStore, MemoryStore, SharedStore, StorageError, StorageResult, TokenStore,
};
pub use theme::{Theme, ThemePreference};
pub use transform::{TransientTransform, commit_transform};
pub use widgets::{Background, BackgroundEdit, MerchCard, ReviewSummary, StarFill, Widget};
