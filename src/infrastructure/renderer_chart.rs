use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use log::{debug, info};
use plotters::{coord::Shift, prelude::*, style::FontTransform};

use crate::{
    OutputDirectory, PopularityRanking, RepositoryPopularity, ResultRenderer, SearchResult,
    StdResult, popularity_gridlines, split_popularity,
};

/// The interval, in stars, between two horizontal gridlines.
pub const GRIDLINE_STEP: u64 = 5000;

/// The default side, in pixels, of the square chart images.
pub const DEFAULT_CHART_SIZE: u32 = 1800;

/// A bar chart drawn from the popularity ranking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSpec {
    /// The title of the chart, also used as the base name of its files.
    pub title: &'static str,

    /// The width of a bar, relative to the space allotted to it.
    pub bar_width: f64,

    /// The maximum number of repositories drawn, all of them if `None`.
    pub limit: Option<usize>,
}

/// The chart of every retained repository.
pub const POPULARITY_CHART: ChartSpec = ChartSpec {
    title: "Popularity Repositories",
    bar_width: 0.1,
    limit: None,
};

/// The chart of the six most popular retained repositories.
pub const SIX_MOST_POPULAR_CHART: ChartSpec = ChartSpec {
    title: "Six Most Popular Repositories",
    bar_width: 0.6,
    limit: Some(6),
};

impl ChartSpec {
    /// Selects the ranked entries drawn by the chart.
    pub fn select<'a>(&self, ranking: &'a PopularityRanking) -> &'a [RepositoryPopularity] {
        match self.limit {
            Some(limit) => ranking.top(limit),
            None => ranking.entries(),
        }
    }

    /// Computes the raster and vector image paths of the chart.
    pub fn file_paths(&self, directory: &Path) -> (PathBuf, PathBuf) {
        (
            directory.join(format!("{}.png", self.title)),
            directory.join(format!("{}.svg", self.title)),
        )
    }
}

/// Renders the retained repositories as popularity bar charts.
pub struct ChartRenderer {
    output_directory: OutputDirectory,
    size: u32,
}

impl ChartRenderer {
    /// Creates a new `ChartRenderer` instance drawing square images of the given side.
    pub fn new(output_directory: OutputDirectory, size: u32) -> Self {
        Self {
            output_directory,
            size,
        }
    }

    fn draw_chart(
        &self,
        chart: &ChartSpec,
        entries: &[RepositoryPopularity],
        directory: &Path,
    ) -> StdResult<()> {
        let (png_path, svg_path) = chart.file_paths(directory);
        let size = (self.size, self.size);
        draw_bar_chart(
            BitMapBackend::new(&png_path, size).into_drawing_area(),
            chart,
            entries,
        )
        .with_context(|| format!("Failed to draw {}", png_path.display()))?;
        draw_bar_chart(
            SVGBackend::new(&svg_path, size).into_drawing_area(),
            chart,
            entries,
        )
        .with_context(|| format!("Failed to draw {}", svg_path.display()))?;
        debug!("Drew '{}' with {} repositories", chart.title, entries.len());

        Ok(())
    }
}

impl ResultRenderer for ChartRenderer {
    fn render(&self, result: &SearchResult) -> StdResult<Option<PathBuf>> {
        if result.is_empty() {
            return Ok(None);
        }

        info!("Generating charts...");
        let ranking = PopularityRanking::try_from_items(result.items())?;
        let directory = self.output_directory.ensure()?;
        for chart in [POPULARITY_CHART, SIX_MOST_POPULAR_CHART] {
            self.draw_chart(&chart, chart.select(&ranking), directory)?;
        }
        info!("Charts successfully generated in {}", directory.display());

        Ok(Some(directory.to_path_buf()))
    }
}

fn plotting_error<E: std::fmt::Debug>(error: E) -> anyhow::Error {
    anyhow!("Plotting error: {error:?}")
}

/// Labels the bar located at `x`, bars sit on integer positions.
fn bar_label(names: &[String], x: f64) -> String {
    let index = x.round();
    if (x - index).abs() > f64::EPSILON || index < 0.0 {
        return String::new();
    }

    names.get(index as usize).cloned().unwrap_or_default()
}

fn draw_bar_chart<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    chart: &ChartSpec,
    entries: &[RepositoryPopularity],
) -> StdResult<()> {
    let (names, stars) = split_popularity(entries);
    let gridlines = popularity_gridlines(entries, GRIDLINE_STEP);
    let highest = stars.iter().copied().max().unwrap_or_default().max(1) as f64;
    let x_range = -0.5..(names.len() as f64 - 0.5);

    root.fill(&WHITE).map_err(plotting_error)?;
    let mut chart_context = ChartBuilder::on(&root)
        .caption(chart.title, ("sans-serif", 40))
        .margin(20)
        .x_label_area_size(240)
        .y_label_area_size(100)
        .build_cartesian_2d(x_range.clone(), 0f64..highest * 1.05)
        .map_err(plotting_error)?;

    let x_label = |x: &f64| bar_label(&names, *x);
    let y_label = |y: &f64| format!("{y:.0}");
    chart_context
        .configure_mesh()
        .disable_mesh()
        .x_labels(names.len())
        .x_label_formatter(&x_label)
        .x_label_style(
            ("sans-serif", 14)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .y_desc("Stars")
        .y_label_formatter(&y_label)
        .draw()
        .map_err(plotting_error)?;

    chart_context
        .draw_series(gridlines.iter().map(|&gridline| {
            let y = gridline as f64;
            PathElement::new(vec![(x_range.start, y), (x_range.end, y)], BLACK.mix(0.2))
        }))
        .map_err(plotting_error)?;
    chart_context
        .draw_series(stars.iter().enumerate().map(|(index, &value)| {
            let center = index as f64;
            let half_width = chart.bar_width / 2.0;
            Rectangle::new(
                [(center - half_width, 0.0), (center + half_width, value as f64)],
                GREEN.filled(),
            )
        }))
        .map_err(plotting_error)?;
    root.present().map_err(plotting_error)?;

    Ok(())
}
