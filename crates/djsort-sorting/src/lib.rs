//! Sortable column headers and automatic queryset ordering for templates.
//!
//! Registers two tags in the `sorting_tags` library:
//!
//! - `{% anchor fields [title] %}` renders a header link that sorts by
//!   `fields`, toggling direction when it is already the active sort
//! - `{% autosort queryset %}` reorders `queryset` by the fields the request asked for
//!
//! The request's ordering fields come from [`SortingMiddleware`], which the
//! host runs before rendering.
//!
//! ```
//! use std::sync::Arc;
//!
//! use djsort_sorting::{library, SortingConfig, SortingMiddleware};
//! use djsort_templates::{Context, Engine, Request};
//!
//! let mut engine = Engine::new();
//! engine.register_library(library(Arc::new(SortingConfig::default())));
//!
//! let template = engine
//!     .from_string("{% load sorting_tags %}{% anchor name Name %}")
//!     .unwrap();
//!
//! let mut request = Request::from_uri("/list/?sort=name&dir=asc");
//! SortingMiddleware.process(&mut request);
//! let mut context = Context::new().with_request(request);
//!
//! assert_eq!(
//!     template.render(&mut context).unwrap(),
//!     r#"<a href="/list/?sort=name&dir=desc" title="Name">Name &uarr;</a>"#
//! );
//! ```

mod anchor;
mod autosort;
mod config;
mod direction;
mod middleware;
mod queryset;

use std::sync::Arc;

pub use anchor::SortAnchorNode;
pub use autosort::SortedDataNode;
pub use config::SortingConfig;
pub use direction::SortDirection;
use djsort_templates::Library;
use djsort_templates::Node;
pub use middleware::ordering_fields;
pub use middleware::SortingMiddleware;
pub use queryset::RecordSet;

pub const LIBRARY_NAME: &str = "sorting_tags";

/// The `sorting_tags` library, with every tag sharing `config`.
#[must_use]
pub fn library(config: Arc<SortingConfig>) -> Library {
    let anchor_config = Arc::clone(&config);
    Library::new(LIBRARY_NAME)
        .tag("anchor", move |_parser, token| {
            let node = SortAnchorNode::from_token(token, Arc::clone(&anchor_config))?;
            Ok(Box::new(node) as Box<dyn Node>)
        })
        .tag("autosort", move |_parser, token| {
            let node = SortedDataNode::from_token(token, Arc::clone(&config))?;
            Ok(Box::new(node) as Box<dyn Node>)
        })
}
