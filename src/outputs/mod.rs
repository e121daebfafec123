//! Output generation for the two run artifacts.
//!
//! - [`json`]: writes the results array and the fetch log object
//!
//! Both artifacts are full overwrites of human-readable JSON; a failed write
//! aborts the run rather than leaving a silently incomplete pair.

pub mod json;
