//! # itemservice-messages
//!
//! Message resolution for the item service: `.properties` bundles loaded once
//! at startup into an immutable [`Catalog`], looked up by key through a
//! [`MessageResolver`] with locale fallback, positional arguments and
//! default messages.

pub mod catalog;
pub mod error;
pub mod format;
pub mod locale;
pub mod properties;
pub mod resolver;
pub mod source;

pub use catalog::{Bundle, Catalog};
pub use error::MessageNotFound;
pub use locale::Locale;
pub use resolver::{MessageResolver, ResolverOptions};
pub use source::{BundledSource, DirectorySource, ResourceSource};
