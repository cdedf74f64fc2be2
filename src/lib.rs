//! dotnet-domain: document .NET constructs and cross-reference them.
//!
//! A documentation domain for .NET languages. Hand-written signatures such as
//! `System.IO.File.Open(string path, FileMode mode)` are parsed and rendered
//! into signature nodes, registered under their fully qualified names, and
//! mentions like `` :dn:meth:`~System.IO.File.Open` `` are resolved to links.
//!
//! A build runs in two passes:
//!
//! 1. **Document pass**: per document, [`DotNetDomain::begin_document`]
//!    yields a [`DocumentBuilder`]; describing constructs registers them and
//!    mentions are recorded as pending references.
//! 2. **Resolution pass**: once every document is registered,
//!    [`DotNetDomain::resolve_document`] turns each mention into a link or
//!    plain text.
//!
//! ```
//! use dotnet_domain::{ConstructKind, DomainConfig, DotNetDomain, ObjectDescription, Resolution};
//!
//! let mut domain = DotNetDomain::new(DomainConfig::default());
//!
//! let mut doc = domain.begin_document("api/io");
//! doc.describe_nested(ObjectDescription::new(ConstructKind::Class, "System.IO.File"), |doc| {
//!     doc.describe(ObjectDescription::new(ConstructKind::Method, "Open(string path)"));
//! });
//! let api = doc.finish();
//!
//! let mut doc = domain.begin_document("index");
//! doc.reference("dn:meth", "~System.IO.File.Open").unwrap();
//! let index = doc.finish();
//!
//! match &domain.resolve_document(&index)[0] {
//!     Resolution::Link(link) => {
//!         assert_eq!(link.title, "Open");
//!         assert_eq!(link.href("index", ".html"), "api/io.html#System.IO.File.Open");
//!     }
//!     Resolution::Text(_) => unreachable!(),
//! }
//! assert_eq!(api.descriptions().len(), 2);
//! ```

pub mod anchor;
pub mod config;
pub mod context;
pub mod directive;
pub mod document;
pub mod domain;
pub mod fields;
pub mod kind;
pub mod node;
pub mod registry;
pub mod report;
pub mod signature;
pub mod xref;

pub use anchor::anchor_id;
pub use config::{ConfigError, DomainConfig};
pub use context::{Context, Scope};
pub use directive::{DirectiveOptions, ObjectDescription, ObjectName};
pub use document::{Document, DocumentBuilder};
pub use domain::{DotNetDomain, Resolution, ResolvedRef, SearchOrder};
pub use fields::{Field, FieldList, TypedArgument};
pub use kind::{ConstructKind, IndexRole, ObjType};
pub use node::{DescNode, IndexEntry, IndexEntryType, SigPart, SignatureNode};
pub use registry::{ObjectEntry, ObjectRegistry, Registration, RegistryEntry};
pub use report::{Reporter, Warning};
pub use signature::Signature;
pub use xref::{PendingXRef, XRefRole};
