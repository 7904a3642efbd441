//! Core types and calculation logic for rooftop rainwater harvesting.
//!
//! This crate turns per-city rainfall and soil data, a roof area and a
//! household size into a feasibility assessment, a recommended harvesting
//! structure and subsidy information.
//!
//! # Architecture
//!
//! - [`location`] - `LocationRecord` and the `LocationSource` lookup trait
//! - [`dataset`] - bundled JSON dataset, loaded once per process
//! - [`resolver`] - primary store first, bundled dataset as fallback
//! - [`calculator`] - harvest volume, household demand, feasibility tier
//! - [`recommender`] - ordered rules choosing a harvesting structure
//! - [`subsidy`] - per-location or litre-tier subsidy information
//! - [`service`] - request validation and result assembly
//!
//! # Usage
//!
//! ```rust
//! use rwh_core::dataset::BundledDataset;
//! use rwh_core::resolver::LocationResolver;
//! use rwh_core::service::{CalculationRequest, HarvestService};
//! use rwh_core::subsidy::SubsidyPolicy;
//!
//! let resolver = LocationResolver::new(BundledDataset::embedded());
//! let service = HarvestService::new(resolver, SubsidyPolicy::PerLocation);
//!
//! let request = CalculationRequest::new("chennai", 100.0, 4);
//! let result = service.calculate(&request).unwrap();
//! assert_eq!(result.location, "Chennai");
//! assert_eq!(result.harvestable_water_litres, 119000);
//! ```

pub mod calculator;
pub mod dataset;
pub mod error;
pub mod location;
pub mod recommender;
pub mod resolver;
pub mod service;
pub mod subsidy;

pub use error::HarvestError;
