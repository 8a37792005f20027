//! Output generation for week pages.
//!
//! # Submodules
//!
//! - [`html`]: Renders a `WeekPage` to an HTML fragment and writes it to disk
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── week1.html
//! ├── week2.html
//! ├── ...
//! └── week8.html
//! ```
//!
//! Every run overwrites the files it generates; nothing is merged with prior
//! content.

pub mod html;
