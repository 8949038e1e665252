//! Ranks popular GitHub repositories written in a requested set of languages.
//!
//! Repositories are searched on the GitHub REST API, filtered on their language breakdown,
//! then rendered as popularity bar charts and a CSV dump.

mod infrastructure;
mod interface {
    mod api;
    mod fetcher;
    mod renderer;
    mod reporter;

    pub use api::*;
    pub use fetcher::*;
    pub use renderer::*;
    pub use reporter::*;
}
mod model;

pub use infrastructure::*;
pub use interface::*;
pub use model::*;
