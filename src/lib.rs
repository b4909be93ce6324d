//! # barcos
//!
//! A Rust library for encoding short identifiers as linear barcodes and rendering them as SVG.
//!
//! `barcos` validates text against a symbology's alphabet, lays the characters out as bars of
//! narrow and wide widths, and serializes the result as rectangle-based SVG markup. Encoding is a
//! pure, synchronous transform: the pattern tables are immutable and shared, and every call owns
//! its own output.
//!
//! ## Features
//!
//! - Encode Code 39: digits, letters, space and `- . $ / + %`, framed by `*`.
//! - Encode NW-7 (Codabar): digits and `- $ : / . +`, framed by a chosen `A`-`D` start/stop pair.
//! - Case-insensitive input; every character is validated before anything is drawn.
//! - Inspect the computed geometry ([`barcode::Barcode::bars`]) or render it as SVG.
//! - SVG output is sized exactly up front and never truncated.
//! - Safe Rust implementation with no unsafe code.
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! barcos = { version = "0.2", default-features = false } # Library only, without the CLI
//! ```
//!
//! ## Example
//!
//! Generate an NW-7 barcode and save it:
//!
//! ```rust
//! use barcos::barcode::generate_nw7_svg;
//! use barcos::helper::save_svg;
//!
//! let svg = generate_nw7_svg("0123456", 'A', 'A', 2, 100).unwrap();
//! save_svg(&svg, Some("target/doc-barcodes"), Some("container")).unwrap();
//! ```
//!
//! Reject characters outside the alphabet:
//!
//! ```rust
//! use barcos::barcode::Barcode;
//! use barcos::error::BarcodeError;
//!
//! let err = Barcode::encode_code39("AB#", 2, 100).unwrap_err();
//! assert!(matches!(err, BarcodeError::InvalidCharacter { position: 2, character: '#' }));
//! ```
//!
//! ## Modules
//!
//! - [`symbology`]: Character to pattern tables.
//! - [`barcode`]: Validation, layout and the encoding entry points.
//! - [`helper`]: SVG rendering and file output.
//! - [`error`]: Error type.

pub mod barcode;
pub mod error;
pub mod helper;
pub mod symbology;

pub use barcode::{generate_code39_svg, generate_nw7_svg, Barcode, Framing};
pub use error::{BarcodeError, Result};
pub use symbology::Symbology;
