//! Reading and writing the tabular files, plus the optional JSON dump.
//!
//! # Submodules
//!
//! - [`table`]: manifest and results tables (`.xlsx` / `.csv` in, `.csv` out)
//! - [`json`]: writes the metric records as JSON
//!
//! # Output Structure
//!
//! ```text
//! data/
//! ├── Output Data Structure.xlsx   # template: URL_ID + metric columns
//! └── Output Data Structure.csv    # filled results table
//!
//! json_output_dir/
//! └── metrics.json
//! ```

pub mod json;
pub mod table;
