mod api_rest;
mod fetcher_language_filter;
mod output_directory;
mod renderer_chart;
mod renderer_csv;
mod reporter_sequential;

pub use api_rest::*;
pub use fetcher_language_filter::*;
pub use output_directory::*;
pub use renderer_chart::*;
pub use renderer_csv::*;
pub use reporter_sequential::*;
