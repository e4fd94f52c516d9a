//! NativeView - view binding over native DOM primitives
//!
//! Lets a view manage its root element and delegated user-input events
//! using only the platform's own primitives: element query, listener
//! add/remove, selector matching and markup parsing.
//!
//! ```ignore
//! let view = NativeView::new(doc.clone(), ViewOptions::new().el("#app"))?;
//! view.delegate("click.menu", Some("li"), listener)?;
//! view.undelegate("click", Some("li"), None);
//! view.remove_element();
//! ```

mod binder;
mod delegator;
mod error;
mod input;
mod proto;
mod view;

pub use binder::{ElementBound, NativeDom};
pub use delegator::{
    split_event_key, strip_namespace, DelegationRecord, DelegationTable, EventDelegating,
};
pub use error::{ViewError, ViewResult};
pub use input::ElementInput;
pub use proto::{ElementProto, MATCHES_CANDIDATES};
pub use view::{NativeView, ViewOptions};

pub use nativeview_dom::{Document, Event, EventListener, NodeId, NodeList};
