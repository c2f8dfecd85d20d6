//! Summary totals, status breakdowns, histograms and the mounted views that show them

pub mod dto;
pub mod service;
