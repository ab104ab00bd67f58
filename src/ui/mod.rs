pub mod axes;
pub mod panels;
pub mod plot;
