//! Turns a search query into Alfred feedback.
//!
//! A run moves through `fetching` to exactly one of [`Outcome::Populated`],
//! [`Outcome::Empty`] or [`Outcome::Failed`], and the document is emitted once
//! whichever it reaches.

use std::io::{self, Write};

use alfred_feedback::{Emission, FeedbackDocument, FeedbackItem, ModAction, Mods};
use log::{debug, error};
use npm_registry::{PackageRecord, PackageSource, SearchError};

use crate::icon::Icon;

const PACKAGE_PAGE_URL: &str = "https://npmjs.org/package/";
const NO_RESULTS_SEARCH_URL: &str = "https://npmjs.com/search?q=";
const ERROR_SEARCH_URL: &str = "https://npmjs.org/search?q=";
const NETWORK_FAILURE_TITLE: &str = "couldn't fetch information from the registry";

/// A failure that escaped the package source while building feedback.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("icon unavailable: {0}")]
    Icon(#[source] io::Error),
}

impl RenderError {
    pub fn class_name(&self) -> &'static str {
        match self {
            RenderError::Search(e) => e.class_name(),
            RenderError::Icon(_) => "IconUnavailable",
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, RenderError::Search(e) if e.is_network())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// One item per package.
    Populated(usize),
    /// A single `no-results` item.
    Empty,
    /// A single `error` item.
    Failed,
}

pub struct Workflow<S> {
    query: String,
    source: S,
    icon: Icon,
}

impl<S: PackageSource> Workflow<S> {
    pub fn new(query: impl Into<String>, source: S, icon: Icon) -> Self {
        Self {
            query: query.into(),
            source,
            icon,
        }
    }

    /// Build the feedback document without writing it anywhere.
    pub fn render(&self) -> FeedbackDocument {
        let mut feedback = FeedbackDocument::new();
        self.render_into(&mut feedback);
        feedback
    }

    /// Build the feedback document and write it to `out` as pretty JSON.
    pub fn call<W: Write>(&self, out: W) -> io::Result<Outcome> {
        let mut emission = Emission::new(out);
        let outcome = self.render_into(emission.document_mut());

        debug!("outcome: {outcome:?}");
        if let Ok(json) = emission.document().to_pretty_json() {
            debug!("feedback: {json}");
        }

        emission.finish()?;
        Ok(outcome)
    }

    fn render_into(&self, feedback: &mut FeedbackDocument) -> Outcome {
        debug!(
            "npm-alfred {} query={:?}",
            env!("CARGO_PKG_VERSION"),
            self.query
        );

        match self.populate(feedback) {
            Ok(0) => Outcome::Empty,
            Ok(count) => Outcome::Populated(count),
            Err(err) => {
                error!("{}: {err}", err.class_name());
                // Normal and fallback items never mix.
                feedback.items.clear();
                feedback.push(self.error_item(&err));
                Outcome::Failed
            }
        }
    }

    fn populate(&self, feedback: &mut FeedbackDocument) -> Result<usize, RenderError> {
        debug!("fetching packages");
        let packages = self.source.fetch(&self.query)?;
        let icon = self
            .icon
            .resolve()
            .map_err(RenderError::Icon)?
            .to_string_lossy()
            .into_owned();

        for package in &packages {
            debug!("{package:?}");
            feedback.push(package_item(package, &icon));
        }

        if packages.is_empty() {
            feedback.push(self.no_results_item(&icon));
        }

        Ok(packages.len())
    }

    fn no_results_item(&self, icon: &str) -> FeedbackItem {
        FeedbackItem::new(
            "no-results",
            format!("No NPM packages found for '{}'.", self.query),
            "Search on npmjs.com instead",
            format!("{NO_RESULTS_SEARCH_URL}{}", urlencoding::encode(&self.query)),
        )
        .with_icon(icon)
    }

    fn error_item(&self, err: &RenderError) -> FeedbackItem {
        let title = if err.is_network() {
            NETWORK_FAILURE_TITLE.to_string()
        } else {
            format!("Error: {}", err.class_name())
        };

        FeedbackItem::new(
            "error",
            title,
            "Search on npmjs.org instead",
            format!("{ERROR_SEARCH_URL}{}", urlencoding::encode(&self.query)),
        )
    }
}

fn package_item(package: &PackageRecord, icon: &str) -> FeedbackItem {
    FeedbackItem::new(
        package.name.as_str(),
        package.name.as_str(),
        format!(
            "v{} - {}",
            package.version,
            package.info.as_deref().unwrap_or_default()
        ),
        format!("{PACKAGE_PAGE_URL}{}", package.name),
    )
    .with_icon(icon)
    .with_mods(Mods {
        alt: ModAction::link("Source code url", package.source_code_uri.as_deref()),
        ctrl: ModAction::link("Home page url", package.homepage_uri.as_deref()),
        cmd: ModAction::link("Package url", package.package_uri.as_deref()),
    })
}
