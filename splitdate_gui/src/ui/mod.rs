//! UI module for the split date GUI
//!
//! # Panel Structure
//! - `toolbar` - Header plus Submit, Save and Clear
//! - `split_date` - One date question: month picker, day and year boxes, error container
//! - `results_panel` - Right panel: accepted answers or the reasons a submit was refused
//! - `status_bar` - Bottom status messages

pub mod results_panel;
pub mod split_date;
pub mod status_bar;
pub mod toolbar;
