//! Core entry point for the whisky_catalog crate.
//!
//! A tasting-notes CSV is loaded into a [`dataset::Dataset`], scored into a
//! [`catalog::Catalog`] and turned into a [`page::Page`] of captioned charts.
//! The page can be served over HTTP or exported as HTML, PDF or CSV.

pub mod catalog;
pub mod chart;
pub mod config;
pub mod dataset;
pub mod figures;
pub mod fonts;
pub mod html;
pub mod metrics;
pub mod page;
pub mod palette;
pub mod pdf;
pub mod plotly;
pub mod profiles;
pub mod report;
pub mod richtext;
pub mod server;
pub mod taste;
