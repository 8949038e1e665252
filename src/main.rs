use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use env_logger::Env;
use log::{debug, info};

use github_popularity::{
    ChartRenderer, CsvRenderer, DEFAULT_CHART_SIZE, DEFAULT_SEARCH_LANGUAGE, DEFAULT_SEARCH_SORT,
    GITHUB_REST_ENDPOINT, LanguageFilterFetcher, OutputDirectory, RepositoryReporter,
    RequestedLanguages, RestRepositoryApi, ResultRenderer, SearchRepositoriesRequest,
    SequentialReporter, StdResult,
};

/// Command line arguments for the GitHub popularity report
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Languages a repository must all contain to be reported
    #[arg(
        short,
        long,
        value_delimiter = ',',
        env = "GITHUB_POPULARITY_LANGUAGES"
    )]
    languages: Vec<String>,

    /// Language the repository search is restricted to
    #[arg(long, default_value = DEFAULT_SEARCH_LANGUAGE)]
    search_language: String,

    /// Sort order of the repository search
    #[arg(long, default_value = DEFAULT_SEARCH_SORT)]
    search_sort: String,

    /// GitHub REST API endpoint
    #[arg(long, env = "GITHUB_API_ENDPOINT", default_value = GITHUB_REST_ENDPOINT)]
    endpoint: String,

    /// Directory receiving the charts and the CSV file (defaults to ~/data)
    #[arg(short, long)]
    output_directory: Option<PathBuf>,

    /// Side, in pixels, of the square chart images
    #[arg(long, default_value_t = DEFAULT_CHART_SIZE)]
    chart_size: u32,

    /// Do not generate the charts
    #[arg(long)]
    skip_charts: bool,

    /// Do not generate the CSV file
    #[arg(long)]
    skip_csv: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> StdResult<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    debug!("Arguments: {args:?}");

    let reporter = build_sequential_reporter(&args)?;
    let rendered_directories = reporter.report().await?;
    if !rendered_directories.is_empty() {
        info!("Report completed");
    }

    Ok(())
}

fn build_output_directory(args: &Args) -> StdResult<OutputDirectory> {
    match &args.output_directory {
        Some(path) => Ok(OutputDirectory::new(path)),
        None => OutputDirectory::try_from_home(),
    }
}

fn build_sequential_reporter(args: &Args) -> StdResult<Arc<dyn RepositoryReporter>> {
    let api = Arc::new(RestRepositoryApi::try_new(&args.endpoint)?);
    let fetcher = Arc::new(LanguageFilterFetcher::new(
        api,
        RequestedLanguages::new(&args.languages),
        SearchRepositoriesRequest::new(&args.search_language, &args.search_sort),
    ));
    let output_directory = build_output_directory(args)?;
    let mut renderers: Vec<Arc<dyn ResultRenderer>> = vec![];
    if !args.skip_charts {
        renderers.push(Arc::new(ChartRenderer::new(
            output_directory.clone(),
            args.chart_size,
        )));
    }
    if !args.skip_csv {
        renderers.push(Arc::new(CsvRenderer::new(output_directory)));
    }

    Ok(Arc::new(SequentialReporter::new(fetcher, renderers)))
}
