//! NCBI E-utilities client
//!
//! Implements the chained protein-to-taxonomy lookup over the Entrez
//! Programming Utilities JSON API: `esearch` finds the protein record,
//! `elink` walks to the linked taxonomy record, and `esummary` returns the
//! document summary the scientific name and TaxID are extracted from.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::{EutilsClient, DEFAULT_EUTILS_URL};
