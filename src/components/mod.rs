//! Concrete components
//!
//! Each component lives in its own directory under `src/components/`, which
//! binds it to `templates/components/<name>/<name>.html`.

pub mod counter;
pub mod flow;
pub mod table;

use crate::component::{self, Binding, BindingError};

pub use counter::Counter;
pub use flow::FlowComponent;
pub use table::TableComponent;

/// Resolve every component's template, failing on the first bad binding
pub fn register_all() -> Result<Vec<Binding>, BindingError> {
    Ok(vec![
        component::register::<Counter>()?,
        component::register::<TableComponent>()?,
        component::register::<FlowComponent>()?,
    ])
}
