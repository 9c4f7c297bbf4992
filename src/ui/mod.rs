pub mod dialog;
pub mod panels;
pub mod results;
